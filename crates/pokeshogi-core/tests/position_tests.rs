use std::collections::HashSet;

use pokeshogi_core::{
    evaluate, legal_destinations, parse_position, Action, Board, DropError, GameError, GameState,
    GameStatus, Hands, MoveError, Piece, PieceId, PieceType, Player, Position, Role, StateError,
    PIECE_COUNT,
};
use serde_json::json;

fn pos(row: u8, col: u8) -> Position {
    Position::new(row, col).expect("valid position")
}

fn play(state: &GameState, moves: &[((u8, u8), (u8, u8))]) -> GameState {
    moves.iter().fold(state.clone(), |current, &(from, to)| {
        current
            .move_piece(pos(from.0, from.1), pos(to.0, to.1))
            .unwrap_or_else(|err| panic!("{from:?} -> {to:?} rejected: {err}"))
    })
}

fn all_ids(state: &GameState) -> Vec<PieceId> {
    state
        .board()
        .iter()
        .map(|(_, piece)| piece.id)
        .chain(state.hands().iter().map(|piece| piece.id))
        .collect()
}

#[test]
fn chick_capture_from_initial_position() {
    let start = GameState::new();
    let chick = start.piece_at(pos(2, 1)).cloned().expect("chick");
    assert_eq!(
        legal_destinations(start.board(), pos(2, 1), &chick).as_slice(),
        &[pos(1, 1)]
    );

    let next = start.move_piece(pos(2, 1), pos(1, 1)).unwrap();

    assert_eq!(next.turn(), Player::Player2);
    assert_eq!(next.status(), GameStatus::Playing);
    assert_eq!(next.piece_at(pos(2, 1)), None);
    assert_eq!(next.piece_at(pos(1, 1)).map(|p| p.id), Some(chick.id));

    let hand = next.hand(Player::Player1);
    assert_eq!(hand.len(), 1);
    assert_eq!(hand[0].piece_type, PieceType::Charmander);
    assert_eq!(hand[0].owner, Player::Player1);
    assert!(!hand[0].promoted);
    assert!(next.hand(Player::Player2).is_empty());

    // the previous snapshot is untouched
    assert_eq!(start, GameState::new());
}

#[test]
fn drop_requires_empty_cell_and_leaves_hand() {
    let state = play(&GameState::new(), &[((2, 1), (1, 1)), ((0, 0), (1, 0))]);
    assert_eq!(state.turn(), Player::Player1);
    let held = state.hand(Player::Player1)[0].clone();

    let err = state.drop_piece(held.id, pos(3, 1)).unwrap_err();
    assert_eq!(err, GameError::IllegalDrop(DropError::Occupied(pos(3, 1))));
    assert!(err.is_illegal_drop());
    assert_eq!(state.hand(Player::Player1).len(), 1);

    let next = state.drop_piece(held.id, pos(2, 1)).unwrap();
    let dropped = next.piece_at(pos(2, 1)).expect("dropped piece");
    assert_eq!(dropped.piece_type, PieceType::Charmander);
    assert_eq!(dropped.owner, Player::Player1);
    assert!(!dropped.promoted);
    assert_ne!(dropped.id, held.id);
    assert!(next.hand(Player::Player1).is_empty());
    assert_eq!(next.turn(), Player::Player2);
}

#[test]
fn chick_promotes_on_far_row() {
    let state = play(
        &GameState::new(),
        &[((2, 1), (1, 1)), ((0, 1), (1, 2)), ((1, 1), (0, 1))],
    );
    assert_eq!(state.status(), GameStatus::Playing);

    let hen = state.piece_at(pos(0, 1)).cloned().expect("hen");
    assert_eq!(hen.piece_type, PieceType::Charizard);
    assert_eq!(hen.role(), Role::Hen);
    assert!(hen.promoted);

    let dests = legal_destinations(state.board(), pos(0, 1), &hen);
    assert!(dests.contains(&pos(0, 0)));
    assert!(dests.contains(&pos(0, 2)));
    assert!(dests.contains(&pos(1, 1)));
    assert_eq!(dests.len(), 3);
}

#[test]
fn capturing_the_king_ends_the_game() {
    let state = play(
        &GameState::new(),
        &[((2, 1), (1, 1)), ((0, 0), (1, 0)), ((1, 1), (0, 1))],
    );

    assert_eq!(state.status(), GameStatus::Player1Win);
    assert_eq!(state.winner(), Some(Player::Player1));
    assert_eq!(state.turn(), Player::Player1);
    assert!(state
        .hand(Player::Player1)
        .iter()
        .any(|piece| piece.piece_type == PieceType::Pikachu));
    // the capturing chick still promoted on arrival
    assert_eq!(
        state.piece_at(pos(0, 1)).map(|p| p.piece_type),
        Some(PieceType::Charizard)
    );

    assert_eq!(
        state.move_piece(pos(3, 1), pos(2, 1)),
        Err(GameError::TerminalState)
    );
    let held = state.hand(Player::Player1)[0].id;
    assert_eq!(
        state.drop_piece(held, pos(2, 1)),
        Err(GameError::TerminalState)
    );
}

#[test]
fn king_walk_to_far_row_wins_by_try() {
    let state = play(
        &GameState::new(),
        &[
            ((3, 1), (2, 0)),
            ((0, 1), (1, 2)),
            ((2, 0), (1, 0)),
            ((0, 0), (0, 1)),
            ((1, 0), (0, 0)),
        ],
    );

    assert!(state.hands().is_empty());
    assert_eq!(state.status(), GameStatus::Player1Win);
    assert_eq!(
        state.piece_at(pos(0, 0)).map(|p| p.piece_type),
        Some(PieceType::Pikachu)
    );
}

#[test]
fn player_two_king_wins_by_try() {
    let state = parse_position("3/3/1k1/K2 - 2").expect("parse");
    assert_eq!(state.status(), GameStatus::Playing);
    let next = state.move_piece(pos(2, 1), pos(3, 1)).unwrap();
    assert_eq!(next.status(), GameStatus::Player2Win);
    assert_eq!(next.turn(), Player::Player2);
}

#[test]
fn player_two_chick_promotes_on_row_three() {
    let state = parse_position("k2/3/1c1/2K - 2").expect("parse");
    let next = state.move_piece(pos(2, 1), pos(3, 1)).unwrap();
    let hen = next.piece_at(pos(3, 1)).expect("hen");
    assert_eq!(hen.piece_type, PieceType::Skeledirge);
    assert!(hen.promoted);
    assert_eq!(next.status(), GameStatus::Playing);
}

#[test]
fn only_chicks_promote_by_movement() {
    let state = parse_position("3/G1E/1k1/2K - 1").expect("parse");
    let giraffe = state.move_piece(pos(1, 0), pos(0, 0)).unwrap();
    let moved = giraffe.piece_at(pos(0, 0)).expect("giraffe");
    assert_eq!(moved.piece_type, PieceType::Squirtle);
    assert!(!moved.promoted);

    let elephant = state.move_piece(pos(1, 2), pos(0, 1)).unwrap();
    let moved = elephant.piece_at(pos(0, 1)).expect("elephant");
    assert_eq!(moved.piece_type, PieceType::Bulbasaur);
    assert!(!moved.promoted);
}

#[test]
fn captured_hen_returns_as_chick() {
    let state = parse_position("k2/1H1/1g1/2K - 2").expect("parse");
    let next = state.move_piece(pos(2, 1), pos(1, 1)).unwrap();
    let hand = next.hand(Player::Player2);
    assert_eq!(hand.len(), 1);
    assert_eq!(hand[0].piece_type, PieceType::Fuecoco);
    assert!(!hand[0].promoted);
}

#[test]
fn dropped_chick_on_far_row_does_not_promote() {
    let state = parse_position("3/3/1k1/2K C 1").expect("parse");
    let held = state.hand(Player::Player1)[0].id;
    let next = state.drop_piece(held, pos(0, 1)).unwrap();
    let dropped = next.piece_at(pos(0, 1)).expect("dropped");
    assert_eq!(dropped.piece_type, PieceType::Charmander);
    assert!(!dropped.promoted);
}

#[test]
fn illegal_moves_are_rejected_without_change() {
    let state = GameState::new();

    assert_eq!(
        state.move_piece(pos(1, 0), pos(2, 0)),
        Err(GameError::IllegalMove(MoveError::EmptySource(pos(1, 0))))
    );
    assert_eq!(
        state.move_piece(pos(1, 1), pos(2, 1)),
        Err(GameError::IllegalMove(MoveError::WrongTurn {
            at: pos(1, 1),
            owner: Player::Player2,
        }))
    );
    let err = state.move_piece(pos(3, 1), pos(3, 0)).unwrap_err();
    assert_eq!(
        err,
        GameError::IllegalMove(MoveError::Unreachable {
            from: pos(3, 1),
            to: pos(3, 0),
        })
    );
    assert!(err.is_illegal_move());
    assert!(state
        .move_piece(pos(2, 1), Position::new_unchecked(7, 7))
        .unwrap_err()
        .is_illegal_move());

    assert_eq!(state, GameState::new());
}

#[test]
fn illegal_drops_are_rejected_without_change() {
    let state = play(&GameState::new(), &[((2, 1), (1, 1))]);
    let opponent_piece = state.hand(Player::Player1)[0].id;

    // it is player 2's turn and player 2 holds nothing
    assert_eq!(
        state.drop_piece(opponent_piece, pos(2, 1)),
        Err(GameError::IllegalDrop(DropError::MissingHandPiece(
            opponent_piece
        )))
    );
    assert_eq!(
        state.drop_piece(PieceId(999), Position::new_unchecked(0, 5)),
        Err(GameError::IllegalDrop(DropError::OffBoard(
            Position::new_unchecked(0, 5)
        )))
    );
    assert_eq!(state.hand(Player::Player1).len(), 1);
}

#[test]
fn apply_dispatches_actions() {
    let state = GameState::new();
    let next = state
        .apply(Action::Move {
            from: pos(2, 1),
            to: pos(1, 1),
        })
        .unwrap();
    assert_eq!(next, state.move_piece(pos(2, 1), pos(1, 1)).unwrap());
}

#[test]
fn evaluate_does_not_touch_inputs() {
    let state = play(&GameState::new(), &[((2, 1), (1, 1))]);
    let board = state.board().clone();
    let hands = state.hands().clone();
    assert_eq!(evaluate(&board, &hands), GameStatus::Playing);
    assert_eq!(&board, state.board());
    assert_eq!(&hands, state.hands());
}

#[test]
fn ids_stay_unique_through_captures_and_drops() {
    let state = play(&GameState::new(), &[((2, 1), (1, 1)), ((0, 0), (1, 0))]);
    let held = state.hand(Player::Player1)[0].id;
    let state = state.drop_piece(held, pos(2, 1)).unwrap();

    let ids = all_ids(&state);
    assert_eq!(ids.len(), PIECE_COUNT);
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), PIECE_COUNT);
}

#[test]
fn game_state_serializes_like_the_ui_expects() {
    let state = play(&GameState::new(), &[((2, 1), (1, 1))]);
    let value = serde_json::to_value(&state).expect("serialize");
    assert_eq!(value["currentTurn"], "player2");
    assert_eq!(value["gameStatus"], "playing");
    assert_eq!(value["capturedPieces"]["player1"][0]["type"], "charmander");
    assert!(value["capturedPieces"]["player2"]
        .as_array()
        .is_some_and(Vec::is_empty));

    let back: GameState = serde_json::from_value(value).expect("deserialize");
    assert_eq!(back, state);
}

#[test]
fn deserialized_state_recomputes_id_counter() {
    let mut value = serde_json::to_value(GameState::new()).expect("serialize");
    value["nextId"] = json!(0);
    let state: GameState = serde_json::from_value(value).expect("deserialize");
    assert_eq!(state, GameState::new());

    let next = state.move_piece(pos(2, 1), pos(1, 1)).unwrap();
    let ids = all_ids(&next);
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());
}

#[test]
fn deserialized_state_recomputes_status() {
    let mut value = serde_json::to_value(GameState::new()).expect("serialize");
    value["capturedPieces"]["player1"] = json!([{
        "id": 50,
        "type": "pikachu",
        "owner": "player1",
        "isPromoted": false,
        "imageUrl": "/placeholder/piece-placeholder.png"
    }]);
    assert_eq!(value["gameStatus"], "playing");

    let state: GameState = serde_json::from_value(value).expect("deserialize");
    assert_eq!(state.status(), GameStatus::Player1Win);
    assert_eq!(
        state.move_piece(pos(3, 1), pos(2, 0)),
        Err(GameError::TerminalState)
    );
}

#[test]
fn deserialize_rejects_inconsistent_pieces() {
    let mut promoted = serde_json::to_value(GameState::new()).expect("serialize");
    promoted["board"][2][1]["isPromoted"] = json!(true);
    let err = serde_json::from_value::<GameState>(promoted).unwrap_err();
    assert!(err.to_string().contains("promotion flag"), "{err}");

    let mut duplicated = serde_json::to_value(GameState::new()).expect("serialize");
    duplicated["board"][2][1]["id"] = json!(0);
    let err = serde_json::from_value::<GameState>(duplicated).unwrap_err();
    assert!(err.to_string().contains("more than once"), "{err}");
}

#[test]
fn from_parts_rejects_exhausted_ids() {
    let mut board = Board::empty();
    board
        .put(
            Piece::new(PieceId(u32::MAX), PieceType::Pikachu, Player::Player1),
            pos(3, 1),
        )
        .unwrap();
    assert_eq!(
        GameState::from_parts(board, Hands::new(), Player::Player1),
        Err(StateError::IdsExhausted)
    );
}

#[test]
fn capture_fails_cleanly_when_ids_run_out() {
    let mut board = Board::empty();
    for (id, piece_type, at) in [
        (0, PieceType::Terapagos, pos(0, 1)),
        (1, PieceType::Fuecoco, pos(1, 1)),
        (2, PieceType::Pikachu, pos(3, 1)),
        (u32::MAX - 1, PieceType::Charmander, pos(2, 1)),
    ] {
        board
            .put(Piece::new(PieceId(id), piece_type, piece_type.player()), at)
            .unwrap();
    }
    let state = GameState::from_parts(board, Hands::new(), Player::Player1).unwrap();

    assert_eq!(
        state.move_piece(pos(2, 1), pos(1, 1)),
        Err(GameError::State(StateError::IdsExhausted))
    );
    // non-capturing moves need no fresh id
    assert!(state.move_piece(pos(3, 1), pos(2, 0)).is_ok());
}

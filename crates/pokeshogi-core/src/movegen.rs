use arrayvec::ArrayVec;

use crate::board::Board;
use crate::constants::CELL_COUNT;
use crate::position::GameState;
use crate::types::{Action, ActionList, Piece, Player, Position, Role};

/// `(row, col)` step in player 1's orientation; row -1 is forward.
pub type Direction = (i8, i8);

pub const KING_DIRECTIONS: [Direction; 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub const ELEPHANT_DIRECTIONS: [Direction; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

pub const GIRAFFE_DIRECTIONS: [Direction; 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

pub const CHICK_DIRECTIONS: [Direction; 1] = [(-1, 0)];

pub const HEN_DIRECTIONS: [Direction; 6] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0)];

/// Indexed by `Role as usize`.
pub const ROLE_DIRECTIONS: [&[Direction]; 5] = [
    &KING_DIRECTIONS,
    &ELEPHANT_DIRECTIONS,
    &GIRAFFE_DIRECTIONS,
    &CHICK_DIRECTIONS,
    &HEN_DIRECTIONS,
];

pub type Destinations = ArrayVec<Position, 8>;

pub const fn directions(role: Role) -> &'static [Direction] {
    ROLE_DIRECTIONS[role as usize]
}

/// Player 2 faces the other way, so both components flip.
pub const fn orient(direction: Direction, player: Player) -> Direction {
    match player {
        Player::Player1 => direction,
        Player::Player2 => (-direction.0, -direction.1),
    }
}

pub fn legal_destinations(board: &Board, position: Position, piece: &Piece) -> Destinations {
    let mut out = Destinations::new();
    for &direction in directions(piece.role()) {
        let Some(target) = position.offset(orient(direction, piece.owner)) else {
            continue;
        };
        if board
            .get(target)
            .is_some_and(|occupant| occupant.owner == piece.owner)
        {
            continue;
        }
        out.push(target);
    }
    out
}

/// Cells a hand piece may be dropped on.
pub fn drop_targets(board: &Board) -> ArrayVec<Position, CELL_COUNT> {
    board.empty_cells()
}

pub fn generate_moves_for_position(state: &GameState, position: Position) -> Destinations {
    match state.board().get(position) {
        Some(piece) if piece.owner == state.turn() && !state.is_game_over() => {
            legal_destinations(state.board(), position, piece)
        }
        _ => Destinations::new(),
    }
}

pub fn legal_actions(state: &GameState) -> ActionList {
    let mut actions = ActionList::new();
    if state.is_game_over() {
        return actions;
    }

    let board = state.board();
    let turn = state.turn();
    for (from, piece) in board.iter().filter(|(_, piece)| piece.owner == turn) {
        for to in legal_destinations(board, from, piece) {
            actions.push(Action::Move { from, to });
        }
    }

    let targets = drop_targets(board);
    for held in state.hands().get(turn) {
        for &to in &targets {
            actions.push(Action::Drop {
                piece_id: held.id,
                to,
            });
        }
    }
    actions
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, BoardError, Hands};
use crate::catalog::{base_type_for, convert_captured_piece, demote, promoted_type};
use crate::constants::{promotion_row, PIECE_COUNT, PLACEHOLDER_IMAGE_PATH};
use crate::game::evaluate;
use crate::movegen::{generate_moves_for_position, legal_actions, legal_destinations, Destinations};
use crate::types::{Action, ActionList, GameStatus, Piece, PieceId, Player, Position};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("no piece at {0}")]
    EmptySource(Position),
    #[error("piece at {at} belongs to {owner}")]
    WrongTurn { at: Position, owner: Player },
    #[error("{to} is not reachable from {from}")]
    Unreachable { from: Position, to: Position },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DropError {
    #[error("{0} is outside the board")]
    OffBoard(Position),
    #[error("{0} is occupied")]
    Occupied(Position),
    #[error("piece {0} is not in the hand of the side to move")]
    MissingHandPiece(PieceId),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("illegal move: {0}")]
    IllegalMove(#[from] MoveError),
    #[error("illegal drop: {0}")]
    IllegalDrop(#[from] DropError),
    #[error("game is already over")]
    TerminalState,
    #[error("board error: {0}")]
    Board(#[from] BoardError),
    #[error("invalid state: {0}")]
    State(#[from] StateError),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    #[error("piece {0} has a promotion flag that disagrees with its type")]
    PromotionMismatch(PieceId),
    #[error("piece id {0} is used more than once")]
    DuplicateId(PieceId),
    #[error("piece ids are exhausted")]
    IdsExhausted,
}

impl GameError {
    pub const fn is_illegal_move(&self) -> bool {
        matches!(self, Self::IllegalMove(_))
    }

    pub const fn is_illegal_drop(&self) -> bool {
        matches!(self, Self::IllegalDrop(_))
    }
}

/// Authoritative game snapshot. Transitions borrow the current state and
/// return a new one, so earlier snapshots stay valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawGameState")]
pub struct GameState {
    board: Board,
    #[serde(rename = "capturedPieces")]
    hands: Hands,
    #[serde(rename = "currentTurn")]
    turn: Player,
    #[serde(rename = "gameStatus")]
    status: GameStatus,
    next_id: u32,
}

/// Input shape of a [`GameState`]. Status and the id counter are derived
/// again on the way in, whatever the input claims.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGameState {
    board: Board,
    #[serde(rename = "capturedPieces")]
    hands: Hands,
    #[serde(rename = "currentTurn")]
    turn: Player,
}

impl TryFrom<RawGameState> for GameState {
    type Error = StateError;

    fn try_from(raw: RawGameState) -> Result<Self, Self::Error> {
        Self::from_parts(raw.board, raw.hands, raw.turn)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn create_initial_game_state() -> GameState {
    GameState::new()
}

impl GameState {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            hands: Hands::new(),
            turn: Player::Player1,
            status: GameStatus::Playing,
            next_id: PIECE_COUNT as u32,
        }
    }

    /// Assembles a state from its pieces. The status is derived from the
    /// board and hands, and fresh ids continue past the largest id in use.
    ///
    /// Rejects duplicate ids, promotion flags that disagree with the piece
    /// type, and an id space with no room left.
    pub fn from_parts(board: Board, hands: Hands, turn: Player) -> Result<Self, StateError> {
        if let Some(piece) = pieces_in_play(&board, &hands)
            .find(|piece| piece.promoted != piece.piece_type.is_promoted())
        {
            return Err(StateError::PromotionMismatch(piece.id));
        }

        let mut ids: Vec<PieceId> = pieces_in_play(&board, &hands)
            .map(|piece| piece.id)
            .collect();
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(StateError::DuplicateId(pair[0]));
        }
        let next_id = match ids.last() {
            Some(max) => max.0.checked_add(1).ok_or(StateError::IdsExhausted)?,
            None => 0,
        };

        let status = evaluate(&board, &hands);
        Ok(Self {
            board,
            hands,
            turn,
            status,
            next_id,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn hands(&self) -> &Hands {
        &self.hands
    }

    pub fn hand(&self, player: Player) -> &[Piece] {
        self.hands.get(player)
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn piece_at(&self, position: Position) -> Option<&Piece> {
        self.board.get(position)
    }

    /// Destinations for the piece at `position`, empty unless it belongs to
    /// the side to move and the game is still running.
    pub fn destinations_from(&self, position: Position) -> Destinations {
        generate_moves_for_position(self, position)
    }

    pub fn actions(&self) -> ActionList {
        legal_actions(self)
    }

    pub fn apply(&self, action: Action) -> Result<Self, GameError> {
        match action {
            Action::Move { from, to } => self.move_piece(from, to),
            Action::Drop { piece_id, to } => self.drop_piece(piece_id, to),
        }
    }

    pub fn move_piece(&self, from: Position, to: Position) -> Result<Self, GameError> {
        self.ensure_playing()?;
        let piece = self.board.get(from).ok_or(MoveError::EmptySource(from))?;
        if piece.owner != self.turn {
            return Err(MoveError::WrongTurn {
                at: from,
                owner: piece.owner,
            }
            .into());
        }
        if !legal_destinations(&self.board, from, piece).contains(&to) {
            return Err(MoveError::Unreachable { from, to }.into());
        }

        let mut next = self.clone();
        let moving = next.board.take(from).ok_or(MoveError::EmptySource(from))?;
        if let Some(captured) = next.board.take(to) {
            let id = next.mint_id()?;
            next.hands
                .push(self.turn, convert_captured_piece(&captured, self.turn, id))?;
        }
        next.board.put(promote_if_needed(moving, to), to)?;
        next.finish_turn();
        Ok(next)
    }

    pub fn drop_piece(&self, piece_id: PieceId, to: Position) -> Result<Self, GameError> {
        self.ensure_playing()?;
        if !to.is_on_board() {
            return Err(DropError::OffBoard(to).into());
        }
        if self.board.get(to).is_some() {
            return Err(DropError::Occupied(to).into());
        }

        let mut next = self.clone();
        let held = next
            .hands
            .remove(self.turn, piece_id)
            .ok_or(DropError::MissingHandPiece(piece_id))?;
        let id = next.mint_id()?;
        let piece_type = base_type_for(self.turn, demote(held.role()));
        next.board.put(Piece::new(id, piece_type, self.turn), to)?;
        next.finish_turn();
        Ok(next)
    }

    fn ensure_playing(&self) -> Result<(), GameError> {
        if self.status.is_over() {
            Err(GameError::TerminalState)
        } else {
            Ok(())
        }
    }

    fn mint_id(&mut self) -> Result<PieceId, StateError> {
        let id = PieceId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(StateError::IdsExhausted)?;
        Ok(id)
    }

    fn finish_turn(&mut self) {
        self.status = evaluate(&self.board, &self.hands);
        if !self.status.is_over() {
            self.turn = self.turn.opponent();
        }
    }
}

fn pieces_in_play<'a>(
    board: &'a Board,
    hands: &'a Hands,
) -> impl Iterator<Item = &'a Piece> + 'a {
    board.iter().map(|(_, piece)| piece).chain(hands.iter())
}

fn promote_if_needed(piece: Piece, to: Position) -> Piece {
    if to.row != promotion_row(piece.owner) {
        return piece;
    }
    match promoted_type(piece.piece_type) {
        Some(piece_type) => Piece {
            piece_type,
            promoted: true,
            image: PLACEHOLDER_IMAGE_PATH.to_string(),
            ..piece
        },
        None => piece,
    }
}

use arrayvec::ArrayVec;

use crate::board::{Board, Hands};
use crate::constants::{promotion_row, CELL_COUNT};
use crate::movegen::{drop_targets, Destinations};
use crate::notation::{encode_position, parse_position, NotationError};
use crate::position::{GameError, GameState};
use crate::types::{GameStatus, Piece, PieceId, Player, Position, Role};

fn is_king(piece: &Piece) -> bool {
    piece.role() == Role::King
}

/// A king in a hand means its holder captured the opposing king.
pub fn check_king_capture(hands: &Hands) -> Option<Player> {
    Player::ALL
        .into_iter()
        .find(|&player| hands.get(player).iter().any(is_king))
}

/// A king standing on its opponent's back rank wins for its owner.
pub fn check_try(board: &Board) -> Option<Player> {
    board
        .iter()
        .find(|(position, piece)| is_king(piece) && position.row == promotion_row(piece.owner))
        .map(|(_, piece)| piece.owner)
}

/// Capture is checked before try, so it wins a tie.
pub fn evaluate(board: &Board, hands: &Hands) -> GameStatus {
    check_king_capture(hands)
        .or_else(|| check_try(board))
        .map_or(GameStatus::Playing, GameStatus::won_by)
}

impl GameState {
    pub fn is_game_over(&self) -> bool {
        self.status().is_over()
    }

    pub fn winner(&self) -> Option<Player> {
        self.status().winner()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected,
    Cancelled,
    Moved,
    Dropped,
    Ignored,
}

pub type Highlights = ArrayVec<Position, CELL_COUNT>;

/// Interactive session: the current state plus the transient selection a UI
/// builds up from cell and hand clicks.
#[derive(Debug, Clone, Default)]
pub struct Game {
    state: GameState,
    selected_cell: Option<Position>,
    selected_hand_piece: Option<PieceId>,
    highlights: Highlights,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            selected_cell: None,
            selected_hand_piece: None,
            highlights: Highlights::new(),
        }
    }

    pub fn from_notation(notation: &str) -> Result<Self, NotationError> {
        Ok(Self::from_state(parse_position(notation)?))
    }

    pub fn load(&mut self, notation: &str) -> Result<(), NotationError> {
        *self = Self::from_notation(notation)?;
        Ok(())
    }

    pub fn notation(&self) -> String {
        encode_position(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        self.state.board()
    }

    pub fn hands(&self) -> &Hands {
        self.state.hands()
    }

    pub fn turn(&self) -> Player {
        self.state.turn()
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn selected_cell(&self) -> Option<Position> {
        self.selected_cell
    }

    pub fn selected_hand_piece(&self) -> Option<PieceId> {
        self.selected_hand_piece
    }

    pub fn highlights(&self) -> &[Position] {
        &self.highlights
    }

    pub fn has_empty_cell(&self) -> bool {
        self.board().has_empty_cell()
    }

    pub fn legal_destinations(&self, position: Position) -> Destinations {
        self.state.destinations_from(position)
    }

    pub fn move_piece(&mut self, from: Position, to: Position) -> Result<(), GameError> {
        self.state = self.state.move_piece(from, to)?;
        self.cancel_selection();
        Ok(())
    }

    pub fn drop_piece(&mut self, piece_id: PieceId, to: Position) -> Result<(), GameError> {
        self.state = self.state.drop_piece(piece_id, to)?;
        self.cancel_selection();
        Ok(())
    }

    pub fn click_cell(&mut self, position: Position) -> ClickOutcome {
        if self.is_game_over() {
            return ClickOutcome::Ignored;
        }

        if let Some(piece_id) = self.selected_hand_piece {
            if !self.highlights.contains(&position) {
                return ClickOutcome::Ignored;
            }
            return match self.drop_piece(piece_id, position) {
                Ok(()) => ClickOutcome::Dropped,
                Err(_) => ClickOutcome::Ignored,
            };
        }

        if let Some(selected) = self.selected_cell {
            if selected == position {
                self.cancel_selection();
                return ClickOutcome::Cancelled;
            }
            if self.highlights.contains(&position) {
                return match self.move_piece(selected, position) {
                    Ok(()) => ClickOutcome::Moved,
                    Err(_) => ClickOutcome::Ignored,
                };
            }
        }

        if self
            .state
            .piece_at(position)
            .is_some_and(|piece| piece.owner == self.turn())
        {
            self.highlights = self.legal_destinations(position).into_iter().collect();
            self.selected_cell = Some(position);
            self.selected_hand_piece = None;
            return ClickOutcome::Selected;
        }

        self.cancel_selection();
        ClickOutcome::Cancelled
    }

    pub fn click_hand_piece(&mut self, piece_id: PieceId) -> ClickOutcome {
        if self.is_game_over() || !self.has_empty_cell() {
            return ClickOutcome::Ignored;
        }
        if self.hands().find(self.turn(), piece_id).is_none() {
            return ClickOutcome::Ignored;
        }
        if self.selected_hand_piece == Some(piece_id) {
            self.cancel_selection();
            return ClickOutcome::Cancelled;
        }

        self.highlights = drop_targets(self.board());
        self.selected_hand_piece = Some(piece_id);
        self.selected_cell = None;
        ClickOutcome::Selected
    }

    pub fn cancel_selection(&mut self) {
        self.selected_cell = None;
        self.selected_hand_piece = None;
        self.highlights.clear();
    }

    pub fn restart(&mut self) {
        *self = Self::new();
    }
}

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{BOARD_COLS, BOARD_ROWS, CELL_COUNT, INITIAL_LAYOUT, PIECE_COUNT, POSITIONS};
use crate::types::{Piece, PieceId, Player, Position};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("position {0} is outside the board")]
    OutOfBounds(Position),
    #[error("position {0} is already occupied")]
    Occupied(Position),
    #[error("hand of {0} is full")]
    HandFull(Player),
}

pub type Cells = [[Option<Piece>; BOARD_COLS]; BOARD_ROWS];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: Cells,
}

impl Board {
    /// The starting layout, with ids `0..8` assigned in reading order.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_starting_position();
        board
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    pub fn get(&self, position: Position) -> Option<&Piece> {
        let (r, c) = cell_coords(position)?;
        self.cells[r][c].as_ref()
    }

    pub fn is_empty_at(&self, position: Position) -> bool {
        position.is_on_board() && self.get(position).is_none()
    }

    pub fn put(&mut self, piece: Piece, position: Position) -> Result<(), BoardError> {
        let (r, c) = cell_coords(position).ok_or(BoardError::OutOfBounds(position))?;
        let cell = &mut self.cells[r][c];
        if cell.is_some() {
            return Err(BoardError::Occupied(position));
        }
        *cell = Some(piece);
        Ok(())
    }

    pub fn take(&mut self, position: Position) -> Option<Piece> {
        let (r, c) = cell_coords(position)?;
        self.cells[r][c].take()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &Piece)> + '_ {
        POSITIONS
            .iter()
            .filter_map(move |&position| self.get(position).map(|piece| (position, piece)))
    }

    pub fn empty_cells(&self) -> ArrayVec<Position, CELL_COUNT> {
        POSITIONS
            .iter()
            .copied()
            .filter(|&position| self.get(position).is_none())
            .collect()
    }

    pub fn has_empty_cell(&self) -> bool {
        POSITIONS.iter().any(|&position| self.get(position).is_none())
    }

    pub fn piece_count(&self) -> usize {
        self.iter().count()
    }

    fn setup_starting_position(&mut self) {
        let mut next_id = 0u32;
        for (row, layout) in INITIAL_LAYOUT.iter().enumerate() {
            for (col, piece_type) in layout.iter().enumerate() {
                if let Some(piece_type) = *piece_type {
                    self.cells[row][col] = Some(Piece::new(
                        PieceId(next_id),
                        piece_type,
                        piece_type.player(),
                    ));
                    next_id += 1;
                }
            }
        }
    }
}

pub type Hand = ArrayVec<Piece, PIECE_COUNT>;

/// Captured pieces waiting to be dropped, one ordered pool per player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Hands {
    player1: Hand,
    player2: Hand,
}

impl Hands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, player: Player) -> &[Piece] {
        match player {
            Player::Player1 => &self.player1,
            Player::Player2 => &self.player2,
        }
    }

    fn get_mut(&mut self, player: Player) -> &mut Hand {
        match player {
            Player::Player1 => &mut self.player1,
            Player::Player2 => &mut self.player2,
        }
    }

    pub fn push(&mut self, player: Player, piece: Piece) -> Result<(), BoardError> {
        self.get_mut(player)
            .try_push(piece)
            .map_err(|_| BoardError::HandFull(player))
    }

    pub fn find(&self, player: Player, id: PieceId) -> Option<&Piece> {
        self.get(player).iter().find(|piece| piece.id == id)
    }

    pub fn remove(&mut self, player: Player, id: PieceId) -> Option<Piece> {
        let hand = self.get_mut(player);
        let idx = hand.iter().position(|piece| piece.id == id)?;
        Some(hand.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.player1.iter().chain(self.player2.iter())
    }

    pub fn len(&self) -> usize {
        self.player1.len() + self.player2.len()
    }

    pub fn is_empty(&self) -> bool {
        self.player1.is_empty() && self.player2.is_empty()
    }
}

fn cell_coords(position: Position) -> Option<(usize, usize)> {
    if !position.is_on_board() {
        return None;
    }
    Some((usize::from(position.row), usize::from(position.col)))
}

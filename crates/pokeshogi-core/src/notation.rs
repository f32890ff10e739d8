use thiserror::Error;

use crate::board::{Board, BoardError, Hands};
use crate::constants::{BOARD_COLS, BOARD_ROWS};
use crate::position::{GameState, StateError};
use crate::types::{Piece, PieceId, PieceType, Player, Position};

pub const INITIAL_POSITION: &str = "gke/1c1/1C1/EKG - 1";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("expected 3 fields, received {0}")]
    FieldCount(usize),
    #[error("expected 4 rows, received {0}")]
    RowCount(usize),
    #[error("row {row} describes {cells} cells, expected 3")]
    RowWidth { row: usize, cells: usize },
    #[error("invalid piece '{0}'")]
    InvalidPiece(char),
    #[error("promoted piece '{0}' cannot be held in hand")]
    PromotedInHand(char),
    #[error("invalid turn '{0}'")]
    InvalidTurn(String),
    #[error("board error: {0}")]
    Board(#[from] BoardError),
    #[error("invalid position: {0}")]
    State(#[from] StateError),
}

/// Reads `<rows> <hands> <turn>`, e.g. [`INITIAL_POSITION`].
///
/// Ids are minted in reading order, board first and hands after.
pub fn parse_position(notation: &str) -> Result<GameState, NotationError> {
    let fields: Vec<&str> = notation.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(NotationError::FieldCount(fields.len()));
    }

    let mut next_id = 0u32;
    let mut mint = || {
        let id = PieceId(next_id);
        next_id += 1;
        id
    };

    let rows: Vec<&str> = fields[0].split('/').collect();
    if rows.len() != BOARD_ROWS {
        return Err(NotationError::RowCount(rows.len()));
    }

    let mut board = Board::empty();
    for (row, text) in rows.iter().enumerate() {
        let mut col = 0usize;
        for ch in text.chars() {
            if let Some(skip) = ch.to_digit(10).filter(|d| (1..=3).contains(d)) {
                col += skip as usize;
                continue;
            }
            let piece_type = PieceType::from_code(ch).ok_or(NotationError::InvalidPiece(ch))?;
            if col >= BOARD_COLS {
                return Err(NotationError::RowWidth {
                    row,
                    cells: col + 1,
                });
            }
            let position = Position::new_unchecked(row as u8, col as u8);
            board.put(Piece::new(mint(), piece_type, piece_type.player()), position)?;
            col += 1;
        }
        if col != BOARD_COLS {
            return Err(NotationError::RowWidth { row, cells: col });
        }
    }

    let mut hands = Hands::new();
    if fields[1] != "-" {
        for ch in fields[1].chars() {
            let piece_type = PieceType::from_code(ch).ok_or(NotationError::InvalidPiece(ch))?;
            if piece_type.is_promoted() {
                return Err(NotationError::PromotedInHand(ch));
            }
            let owner = piece_type.player();
            hands.push(owner, Piece::new(mint(), piece_type, owner))?;
        }
    }

    let turn = single_char(fields[2])
        .and_then(Player::from_code)
        .ok_or_else(|| NotationError::InvalidTurn(fields[2].to_string()))?;

    Ok(GameState::from_parts(board, hands, turn)?)
}

pub fn encode_position(state: &GameState) -> String {
    let rows: Vec<String> = state
        .board()
        .cells()
        .iter()
        .map(|row| {
            let mut out = String::new();
            let mut empty = 0u8;
            for cell in row {
                match cell {
                    Some(piece) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(piece.piece_type.code());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            out
        })
        .collect();

    let hands: String = state
        .hands()
        .iter()
        .map(|piece| piece.piece_type.code())
        .collect();
    let hands = if hands.is_empty() {
        "-".to_string()
    } else {
        hands
    };

    format!("{} {} {}", rows.join("/"), hands, state.turn().to_code())
}

fn single_char(field: &str) -> Option<char> {
    let mut chars = field.chars();
    let ch = chars.next()?;
    chars.next().is_none().then_some(ch)
}

pub mod board;
pub mod catalog;
pub mod constants;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod position;
pub mod types;

pub use board::{Board, BoardError, Hand, Hands};
pub use catalog::{base_type_for, convert_captured_piece, demote, promoted_type, role_of};
pub use constants::{
    back_rank, promotion_row, BOARD_COLS, BOARD_ROWS, CELL_COUNT, MAX_ACTIONS, PIECE_COUNT,
    PLACEHOLDER_IMAGE_PATH, POSITIONS,
};
pub use game::{check_king_capture, check_try, evaluate, ClickOutcome, Game};
pub use movegen::{drop_targets, legal_actions, legal_destinations, Destinations, Direction};
pub use notation::{encode_position, parse_position, NotationError, INITIAL_POSITION};
pub use position::{
    create_initial_game_state, DropError, GameError, GameState, MoveError, StateError,
};
pub use types::{
    Action, ActionList, GameStatus, Piece, PieceId, PieceType, Player, Position, Role,
};

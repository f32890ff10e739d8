use crate::types::{PieceType, Player, Position};

pub const BOARD_ROWS: usize = 4;
pub const BOARD_COLS: usize = 3;
pub const CELL_COUNT: usize = BOARD_ROWS * BOARD_COLS;

/// Every piece in play, on the board or in a hand.
pub const PIECE_COUNT: usize = 8;

/// Upper bound on legal actions: each of the 8 pieces reaches at most 12
/// cells, whether it moves on the board or drops from a hand.
pub const MAX_ACTIONS: usize = PIECE_COUNT * CELL_COUNT;

pub const PLACEHOLDER_IMAGE_PATH: &str = "/placeholder/piece-placeholder.png";

pub const POSITIONS: [Position; CELL_COUNT] = [
    Position::new_unchecked(0, 0),
    Position::new_unchecked(0, 1),
    Position::new_unchecked(0, 2),
    Position::new_unchecked(1, 0),
    Position::new_unchecked(1, 1),
    Position::new_unchecked(1, 2),
    Position::new_unchecked(2, 0),
    Position::new_unchecked(2, 1),
    Position::new_unchecked(2, 2),
    Position::new_unchecked(3, 0),
    Position::new_unchecked(3, 1),
    Position::new_unchecked(3, 2),
];

pub const BACK_RANK_BY_PLAYER: [u8; 2] = [3, 0];

pub const fn back_rank(player: Player) -> u8 {
    BACK_RANK_BY_PLAYER[player as usize]
}

/// Row on which a chick promotes; also the row a king must reach to win by try.
pub const fn promotion_row(player: Player) -> u8 {
    back_rank(player.opponent())
}

/// Indexed by `[player][role]`.
pub const ROLE_TO_PIECE_TYPE: [[PieceType; 5]; 2] = [
    [
        PieceType::Pikachu,
        PieceType::Bulbasaur,
        PieceType::Squirtle,
        PieceType::Charmander,
        PieceType::Charizard,
    ],
    [
        PieceType::Terapagos,
        PieceType::Sprigatito,
        PieceType::Quaxly,
        PieceType::Fuecoco,
        PieceType::Skeledirge,
    ],
];

/// Starting layout, row 0 (player 2's back rank) first.
pub const INITIAL_LAYOUT: [[Option<PieceType>; BOARD_COLS]; BOARD_ROWS] = [
    [
        Some(PieceType::Quaxly),
        Some(PieceType::Terapagos),
        Some(PieceType::Sprigatito),
    ],
    [None, Some(PieceType::Fuecoco), None],
    [None, Some(PieceType::Charmander), None],
    [
        Some(PieceType::Bulbasaur),
        Some(PieceType::Pikachu),
        Some(PieceType::Squirtle),
    ],
];

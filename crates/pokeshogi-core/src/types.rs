use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_COLS, BOARD_ROWS, MAX_ACTIONS, PLACEHOLDER_IMAGE_PATH};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Player1 = 0,
    Player2 = 1,
}

impl Player {
    pub const ALL: [Self; 2] = [Self::Player1, Self::Player2];

    pub const fn opponent(self) -> Self {
        match self {
            Self::Player1 => Self::Player2,
            Self::Player2 => Self::Player1,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Player1 => "player1",
            Self::Player2 => "player2",
        }
    }

    pub const fn to_code(self) -> char {
        match self {
            Self::Player1 => '1',
            Self::Player2 => '2',
        }
    }

    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            '1' => Some(Self::Player1),
            '2' => Some(Self::Player2),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    King = 0,
    Elephant = 1,
    Giraffe = 2,
    Chick = 3,
    Hen = 4,
}

impl Role {
    pub const ALL: [Self; 5] = [
        Self::King,
        Self::Elephant,
        Self::Giraffe,
        Self::Chick,
        Self::Hen,
    ];

    pub const fn letter(self) -> char {
        match self {
            Self::King => 'k',
            Self::Elephant => 'e',
            Self::Giraffe => 'g',
            Self::Chick => 'c',
            Self::Hen => 'h',
        }
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    Pikachu = 0,
    Bulbasaur = 1,
    Squirtle = 2,
    Charmander = 3,
    Charizard = 4,
    Terapagos = 5,
    Sprigatito = 6,
    Quaxly = 7,
    Fuecoco = 8,
    Skeledirge = 9,
}

impl PieceType {
    pub const ALL: [Self; 10] = [
        Self::Pikachu,
        Self::Bulbasaur,
        Self::Squirtle,
        Self::Charmander,
        Self::Charizard,
        Self::Terapagos,
        Self::Sprigatito,
        Self::Quaxly,
        Self::Fuecoco,
        Self::Skeledirge,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Pikachu => "pikachu",
            Self::Bulbasaur => "bulbasaur",
            Self::Squirtle => "squirtle",
            Self::Charmander => "charmander",
            Self::Charizard => "charizard",
            Self::Terapagos => "terapagos",
            Self::Sprigatito => "sprigatito",
            Self::Quaxly => "quaxly",
            Self::Fuecoco => "fuecoco",
            Self::Skeledirge => "skeledirge",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|piece_type| piece_type.name() == name)
    }

    /// Single-letter code used by the position notation: the role letter,
    /// uppercase for player 1 and lowercase for player 2.
    pub const fn code(self) -> char {
        let letter = self.role().letter();
        match self.player() {
            Player::Player1 => letter.to_ascii_uppercase(),
            Player::Player2 => letter,
        }
    }

    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'K' => Some(Self::Pikachu),
            'E' => Some(Self::Bulbasaur),
            'G' => Some(Self::Squirtle),
            'C' => Some(Self::Charmander),
            'H' => Some(Self::Charizard),
            'k' => Some(Self::Terapagos),
            'e' => Some(Self::Sprigatito),
            'g' => Some(Self::Quaxly),
            'c' => Some(Self::Fuecoco),
            'h' => Some(Self::Skeledirge),
            _ => None,
        }
    }

    /// The side whose skin this type belongs to.
    pub const fn player(self) -> Player {
        match self {
            Self::Pikachu | Self::Bulbasaur | Self::Squirtle | Self::Charmander | Self::Charizard => {
                Player::Player1
            }
            Self::Terapagos
            | Self::Sprigatito
            | Self::Quaxly
            | Self::Fuecoco
            | Self::Skeledirge => Player::Player2,
        }
    }

    pub const fn is_promoted(self) -> bool {
        matches!(self, Self::Charizard | Self::Skeledirge)
    }

    pub const fn role(self) -> Role {
        crate::catalog::role_of(self)
    }

    pub const fn pokedex_id(self) -> u16 {
        match self {
            Self::Pikachu => 25,
            Self::Bulbasaur => 1,
            Self::Squirtle => 7,
            Self::Charmander => 4,
            Self::Charizard => 6,
            Self::Terapagos => 1024,
            Self::Sprigatito => 906,
            Self::Quaxly => 912,
            Self::Fuecoco => 909,
            Self::Skeledirge => 911,
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    pub id: PieceId,
    #[serde(rename = "type")]
    pub piece_type: PieceType,
    pub owner: Player,
    #[serde(rename = "isPromoted")]
    pub promoted: bool,
    #[serde(rename = "imageUrl")]
    pub image: String,
}

impl Piece {
    pub fn new(id: PieceId, piece_type: PieceType, owner: Player) -> Self {
        Self {
            id,
            piece_type,
            owner,
            promoted: piece_type.is_promoted(),
            image: PLACEHOLDER_IMAGE_PATH.to_string(),
        }
    }

    pub const fn role(&self) -> Role {
        self.piece_type.role()
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_ROWS && (col as usize) < BOARD_COLS {
            Some(Self { row, col })
        } else {
            None
        }
    }

    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub const fn is_on_board(self) -> bool {
        (self.row as usize) < BOARD_ROWS && (self.col as usize) < BOARD_COLS
    }

    pub fn offset(self, delta: (i8, i8)) -> Option<Self> {
        let row = i16::from(self.row) + i16::from(delta.0);
        let col = i16::from(self.col) + i16::from(delta.1);
        let row = u8::try_from(row).ok()?;
        let col = u8::try_from(col).ok()?;
        Self::new(row, col)
    }

    pub fn parse(input: &str) -> Option<Self> {
        let (row, col) = input.split_once('-')?;
        let row = row.parse::<u8>().ok()?;
        let col = col.parse::<u8>().ok()?;
        Self::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Playing,
    Player1Win,
    Player2Win,
}

impl GameStatus {
    pub const fn won_by(player: Player) -> Self {
        match player {
            Player::Player1 => Self::Player1Win,
            Player::Player2 => Self::Player2Win,
        }
    }

    pub const fn winner(self) -> Option<Player> {
        match self {
            Self::Playing => None,
            Self::Player1Win => Some(Player::Player1),
            Self::Player2Win => Some(Player::Player2),
        }
    }

    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Playing)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Playing => "playing",
            Self::Player1Win => "player1_win",
            Self::Player2Win => "player2_win",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Action {
    Move {
        from: Position,
        to: Position,
    },
    Drop {
        #[serde(rename = "pieceId")]
        piece_id: PieceId,
        to: Position,
    },
}

pub type ActionList = ArrayVec<Action, MAX_ACTIONS>;

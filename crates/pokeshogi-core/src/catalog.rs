use crate::constants::{PLACEHOLDER_IMAGE_PATH, ROLE_TO_PIECE_TYPE};
use crate::types::{Piece, PieceId, PieceType, Player, Role};

pub const fn role_of(piece_type: PieceType) -> Role {
    match piece_type {
        PieceType::Pikachu | PieceType::Terapagos => Role::King,
        PieceType::Bulbasaur | PieceType::Sprigatito => Role::Elephant,
        PieceType::Squirtle | PieceType::Quaxly => Role::Giraffe,
        PieceType::Charmander | PieceType::Fuecoco => Role::Chick,
        PieceType::Charizard | PieceType::Skeledirge => Role::Hen,
    }
}

pub const fn base_type_for(player: Player, role: Role) -> PieceType {
    ROLE_TO_PIECE_TYPE[player as usize][role as usize]
}

/// Capture strips promotion: a hen goes back to being a chick.
pub const fn demote(role: Role) -> Role {
    match role {
        Role::Hen => Role::Chick,
        other => other,
    }
}

pub const fn promoted_type(piece_type: PieceType) -> Option<PieceType> {
    match role_of(piece_type) {
        Role::Chick => Some(base_type_for(piece_type.player(), Role::Hen)),
        _ => None,
    }
}

/// Turns a captured piece into a hand piece of the capturing side.
///
/// The result keeps the (demoted) role, switches to the capturer's skin for
/// that role, is never promoted and carries the fresh identifier `id`.
pub fn convert_captured_piece(captured: &Piece, capturing_player: Player, id: PieceId) -> Piece {
    let role = demote(role_of(captured.piece_type));
    Piece {
        id,
        piece_type: base_type_for(capturing_player, role),
        owner: capturing_player,
        promoted: false,
        image: PLACEHOLDER_IMAGE_PATH.to_string(),
    }
}

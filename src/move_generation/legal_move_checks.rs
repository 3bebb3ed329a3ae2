//! Attack queries shared by move generation, check detection and FEN checks.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::*;
use crate::moves::leaper_attacks::{king_attacks, knight_attacks, pawn_attacks};
use crate::moves::slider_attacks::{bishop_attacks, queen_attacks, rook_attacks};

#[inline]
pub fn is_king_in_check(board: &BoardState, color: Color) -> bool {
    let Some(king_sq) = board.king_square(color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

/// True when any piece of `attacker_color` attacks `square`.
///
/// Looks outward from the target square with each piece's movement pattern,
/// which gives the same answer as building the attacker's full attack set.
pub fn is_square_attacked(board: &BoardState, square: Square, attacker_color: Color) -> bool {
    let pieces = |kind: PieceKind| board.pieces(attacker_color, kind);
    let occupancy = board.occupancy();

    // A pawn of the attacking color attacks `square` exactly when a defending
    // pawn on `square` would attack the pawn's square.
    if pawn_attacks(attacker_color.opposite(), square) & pieces(PieceKind::Pawn) != 0 {
        return true;
    }
    if knight_attacks(square) & pieces(PieceKind::Knight) != 0 {
        return true;
    }
    if king_attacks(square) & pieces(PieceKind::King) != 0 {
        return true;
    }

    let diagonal = pieces(PieceKind::Bishop) | pieces(PieceKind::Queen);
    if bishop_attacks(square, occupancy) & diagonal != 0 {
        return true;
    }

    let straight = pieces(PieceKind::Rook) | pieces(PieceKind::Queen);
    rook_attacks(square, occupancy) & straight != 0
}

/// Every piece of `attacker_color` that attacks `square`.
pub fn attackers_to_square(
    board: &BoardState,
    square: Square,
    attacker_color: Color,
) -> Vec<(Square, PieceKind)> {
    let target_mask = square.mask();
    let mut attackers = Vec::new();

    for kind in PieceKind::ALL {
        for from in squares_of(board.pieces(attacker_color, kind)) {
            if piece_attacks(board, attacker_color, kind, from) & target_mask != 0 {
                attackers.push((from, kind));
            }
        }
    }

    attackers
}

/// Union of all squares attacked by `color`.
pub fn attack_set(board: &BoardState, color: Color) -> Bitboard {
    let mut attacked = 0u64;
    for kind in PieceKind::ALL {
        for from in squares_of(board.pieces(color, kind)) {
            attacked |= piece_attacks(board, color, kind, from);
        }
    }
    attacked
}

fn piece_attacks(board: &BoardState, color: Color, kind: PieceKind, from: Square) -> Bitboard {
    let occupancy = board.occupancy();
    match kind {
        PieceKind::Pawn => pawn_attacks(color, from),
        PieceKind::Knight => knight_attacks(from),
        PieceKind::Bishop => bishop_attacks(from, occupancy),
        PieceKind::Rook => rook_attacks(from, occupancy),
        PieceKind::Queen => queen_attacks(from, occupancy),
        PieceKind::King => king_attacks(from),
    }
}

//! King steps and castling.
//!
//! Castling is only emitted when the right is held, king and rook stand on
//! their home squares, the squares between them are empty, and the king is not
//! in check and does not pass through or land on an attacked square.

use crate::game_state::{board_state::BoardState, chess_types::*};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::push_targets;
use crate::moves::chess_move::{Move, MoveFlags};
use crate::moves::leaper_attacks::king_attacks;

/// Home squares and path for one castling move.
pub struct CastlingLane {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares that must be empty.
    pub empty: Bitboard,
    /// Squares the king crosses or lands on, which must not be attacked.
    pub king_path: [Square; 2],
}

pub const fn castling_lane(color: Color, side: CastleSide) -> CastlingLane {
    match (color, side) {
        (Color::White, CastleSide::Kingside) => CastlingLane {
            king_from: Square::E1,
            king_to: Square::G1,
            rook_from: Square::H1,
            rook_to: Square::F1,
            empty: Square::F1.mask() | Square::G1.mask(),
            king_path: [Square::F1, Square::G1],
        },
        (Color::White, CastleSide::Queenside) => CastlingLane {
            king_from: Square::E1,
            king_to: Square::C1,
            rook_from: Square::A1,
            rook_to: Square::D1,
            empty: Square::B1.mask() | Square::C1.mask() | Square::D1.mask(),
            king_path: [Square::D1, Square::C1],
        },
        (Color::Black, CastleSide::Kingside) => CastlingLane {
            king_from: Square::E8,
            king_to: Square::G8,
            rook_from: Square::H8,
            rook_to: Square::F8,
            empty: Square::F8.mask() | Square::G8.mask(),
            king_path: [Square::F8, Square::G8],
        },
        (Color::Black, CastleSide::Queenside) => CastlingLane {
            king_from: Square::E8,
            king_to: Square::C8,
            rook_from: Square::A8,
            rook_to: Square::D8,
            empty: Square::B8.mask() | Square::C8.mask() | Square::D8.mask(),
            king_path: [Square::D8, Square::C8],
        },
    }
}

pub fn generate_king_moves(board: &BoardState, out: &mut Vec<Move>) {
    let side = board.side_to_move();
    let Some(from) = board.king_square(side) else {
        return;
    };

    let targets = king_attacks(from) & !board.occupancy_of(side);
    push_targets(board, from, PieceKind::King, targets, out);

    generate_castling_moves(board, from, out);
}

fn generate_castling_moves(board: &BoardState, king_from: Square, out: &mut Vec<Move>) {
    let side = board.side_to_move();
    let enemy = side.opposite();

    // Cannot castle out of check.
    if is_square_attacked(board, king_from, enemy) {
        return;
    }

    for (castle_side, flag) in [
        (CastleSide::Kingside, MoveFlags::CASTLE_KINGSIDE),
        (CastleSide::Queenside, MoveFlags::CASTLE_QUEENSIDE),
    ] {
        if !board
            .castling_rights()
            .contains(CastlingRights::for_side(side, castle_side))
        {
            continue;
        }

        let lane = castling_lane(side, castle_side);
        let rook_home = board.pieces(side, PieceKind::Rook) & lane.rook_from.mask() != 0;
        if king_from != lane.king_from || !rook_home || board.occupancy() & lane.empty != 0 {
            continue;
        }
        if lane
            .king_path
            .iter()
            .any(|square| is_square_attacked(board, *square, enemy))
        {
            continue;
        }

        out.push(Move::new(lane.king_from, lane.king_to, PieceKind::King).with_flags(flag));
    }
}

//! Occupancy-aware attack maps for bishops, rooks and queens.
//!
//! Rays are traced square by square and stop on the first occupied square,
//! which is included so captures show up in the attack set.

use crate::game_state::chess_types::{Bitboard, Square};

const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

#[inline]
pub fn bishop_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    trace_rays(square, &BISHOP_DIRECTIONS, occupancy)
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    trace_rays(square, &ROOK_DIRECTIONS, occupancy)
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

fn trace_rays(square: Square, directions: &[(i32, i32)], occupancy: Bitboard) -> Bitboard {
    directions
        .iter()
        .fold(0, |acc, &(file_step, rank_step)| {
            acc | trace_ray(square, file_step, rank_step, occupancy)
        })
}

fn trace_ray(square: Square, file_step: i32, rank_step: i32, occupancy: Bitboard) -> Bitboard {
    let mut file = square.file() as i32 + file_step;
    let mut rank = square.rank() as i32 + rank_step;
    let mut attacks = 0u64;

    while (0..8).contains(&file) && (0..8).contains(&rank) {
        let bit = 1u64 << (rank * 8 + file);
        attacks |= bit;

        if occupancy & bit != 0 {
            break;
        }

        file += file_step;
        rank += rank_step;
    }

    attacks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    #[test]
    fn empty_board_ray_counts_from_d4() {
        assert_eq!(bishop_attacks(sq("d4"), 0).count_ones(), 13);
        assert_eq!(rook_attacks(sq("d4"), 0).count_ones(), 14);
        assert_eq!(queen_attacks(sq("d4"), 0).count_ones(), 27);
    }

    #[test]
    fn rook_blocker_stops_ray() {
        let attacks = rook_attacks(Square::A1, sq("a4").mask());
        assert_ne!(attacks & sq("a4").mask(), 0);
        assert_eq!(attacks & sq("a5").mask(), 0);
    }

    #[test]
    fn bishop_blocker_stops_ray() {
        let attacks = bishop_attacks(Square::C1, sq("e3").mask());
        assert_ne!(attacks & sq("e3").mask(), 0);
        assert_eq!(attacks & sq("f4").mask(), 0);
    }
}

//! Pseudo-legal knight, bishop, rook and queen moves.

use crate::game_state::{board_state::BoardState, chess_types::*};
use crate::move_generation::legal_move_shared::push_targets;
use crate::moves::chess_move::Move;
use crate::moves::leaper_attacks::knight_attacks;
use crate::moves::slider_attacks::{bishop_attacks, queen_attacks, rook_attacks};

pub fn generate_knight_moves(board: &BoardState, out: &mut Vec<Move>) {
    generate_for_kind(board, PieceKind::Knight, |from, _| knight_attacks(from), out);
}

pub fn generate_bishop_moves(board: &BoardState, out: &mut Vec<Move>) {
    generate_for_kind(board, PieceKind::Bishop, bishop_attacks, out);
}

pub fn generate_rook_moves(board: &BoardState, out: &mut Vec<Move>) {
    generate_for_kind(board, PieceKind::Rook, rook_attacks, out);
}

pub fn generate_queen_moves(board: &BoardState, out: &mut Vec<Move>) {
    generate_for_kind(board, PieceKind::Queen, queen_attacks, out);
}

fn generate_for_kind<F>(board: &BoardState, kind: PieceKind, attacks: F, out: &mut Vec<Move>)
where
    F: Fn(Square, Bitboard) -> Bitboard,
{
    let side = board.side_to_move();
    let own_occ = board.occupancy_of(side);

    for from in squares_of(board.pieces(side, kind)) {
        let targets = attacks(from, board.occupancy()) & !own_occ;
        push_targets(board, from, kind, targets, out);
    }
}

use crate::game_state::{board_state::BoardState, chess_types::*};
use crate::moves::chess_move::{Move, MoveFlags};
use crate::moves::leaper_attacks::pawn_attacks;

pub fn generate_pawn_moves(board: &BoardState, out: &mut Vec<Move>) {
    let side = board.side_to_move();
    let enemy_occ = board.occupancy_of(side.opposite());
    let empty = !board.occupancy();
    let forward: i8 = if side == Color::White { 1 } else { -1 };
    let start_rank = if side == Color::White { 1 } else { 6 };

    for from in squares_of(board.pieces(side, PieceKind::Pawn)) {
        // Pawns never stand on the last rank, so one step forward is on the board.
        if let Some(to) = from.offset(0, forward) {
            if to.mask() & empty != 0 {
                push_pawn_move(Move::new(from, to, PieceKind::Pawn), side, out);

                if from.rank() == start_rank {
                    if let Some(two_step) = to.offset(0, forward) {
                        if two_step.mask() & empty != 0 {
                            out.push(
                                Move::new(from, two_step, PieceKind::Pawn)
                                    .with_flags(MoveFlags::DOUBLE_PAWN_PUSH),
                            );
                        }
                    }
                }
            }
        }

        for to in squares_of(pawn_attacks(side, from)) {
            if to.mask() & enemy_occ != 0 {
                push_pawn_move(
                    Move::new(from, to, PieceKind::Pawn).with_flags(MoveFlags::CAPTURE),
                    side,
                    out,
                );
            } else if board.en_passant_square() == Some(to) {
                out.push(
                    Move::new(from, to, PieceKind::Pawn)
                        .with_flags(MoveFlags::CAPTURE | MoveFlags::EN_PASSANT),
                );
            }
        }
    }
}

/// Push a pawn move, expanding it into the four promotions on the last rank.
fn push_pawn_move(mv: Move, side: Color, out: &mut Vec<Move>) {
    if mv.to.rank() == side.promotion_rank() {
        for promotion in PieceKind::PROMOTIONS {
            out.push(mv.with_promotion(promotion));
        }
    } else {
        out.push(mv);
    }
}

use crate::game_state::{board_state::BoardState, chess_types::*};
use crate::moves::chess_move::{Move, MoveFlags};

/// Emit one move per target square, flagging captures of enemy pieces.
///
/// `targets` must already exclude squares holding the mover's own pieces.
#[inline]
pub fn push_targets(
    board: &BoardState,
    from: Square,
    piece: PieceKind,
    targets: Bitboard,
    out: &mut Vec<Move>,
) {
    let enemy_occ = board.occupancy_of(board.side_to_move().opposite());
    for to in squares_of(targets) {
        let mv = Move::new(from, to, piece);
        out.push(if enemy_occ & to.mask() != 0 {
            mv.with_flags(MoveFlags::CAPTURE)
        } else {
            mv
        });
    }
}

//! Mechanical move application.
//!
//! Produces the successor board for a move: relocation, capture removal
//! (including the en-passant victim), promotion substitution, the castling
//! rook hop, castling-right and en-passant updates, and the two clocks.

use crate::errors::MoveError;
use crate::game_state::{board_state::BoardState, chess_types::*};
use crate::move_generation::legal_moves_king::castling_lane;
use crate::moves::chess_move::Move;

/// Apply `mv` to `board`, checking only that the moving piece is there.
pub fn apply_move(board: &BoardState, mv: &Move) -> Result<BoardState, MoveError> {
    let side = board.side_to_move();
    let expected = Piece::new(side, mv.piece);
    match board.piece_at(mv.from) {
        Some(piece) if piece == expected => {}
        Some(piece) => {
            return Err(MoveError::illegal(
                &mv.to_string(),
                format!("{:?} {:?} on {}, expected {side} {:?}", piece.color, piece.kind, mv.from, mv.piece),
            ))
        }
        None => {
            return Err(MoveError::illegal(
                &mv.to_string(),
                format!("no piece on {}", mv.from),
            ))
        }
    }
    if board.occupancy_of(side) & mv.to.mask() != 0 {
        return Err(MoveError::illegal(
            &mv.to_string(),
            format!("{} is occupied by a {side} piece", mv.to),
        ));
    }

    Ok(apply_move_unchecked(board, mv))
}

/// Apply a move taken from this board's pseudo-legal move list.
pub(crate) fn apply_move_unchecked(board: &BoardState, mv: &Move) -> BoardState {
    let side = board.side_to_move();
    let mut next = board.clone();

    next.clear_square(mv.from);

    if mv.is_en_passant() {
        // The captured pawn sits beside the origin, on the destination file.
        let victim = Square::from_index_unchecked(mv.from.rank() * 8 + mv.to.file());
        next.clear_square(victim);
    } else {
        next.clear_square(mv.to);
    }

    let placed = mv.promotion.unwrap_or(mv.piece);
    next.put_piece(mv.to, Piece::new(side, placed));

    if let Some(castle_side) = mv.castle_side() {
        let lane = castling_lane(side, castle_side);
        next.clear_square(lane.rook_from);
        next.put_piece(lane.rook_to, Piece::new(side, PieceKind::Rook));
    }

    next.castling_rights = updated_castling_rights(board.castling_rights(), side, mv);

    next.en_passant_square = if mv.is_double_pawn_push() {
        Square::from_index((mv.from.index() + mv.to.index()) / 2)
    } else {
        None
    };

    if mv.piece == PieceKind::Pawn || mv.is_capture() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if side == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = side.opposite();
    next.recalc_occupancy();

    next
}

fn updated_castling_rights(rights: CastlingRights, side: Color, mv: &Move) -> CastlingRights {
    let mut rights = rights;

    if mv.piece == PieceKind::King {
        rights.remove(CastlingRights::for_color(side));
    }

    // A rook leaving, or being captured on, its home square loses that right.
    for square in [mv.from, mv.to] {
        rights.remove(rook_home_right(square));
    }

    rights
}

fn rook_home_right(square: Square) -> CastlingRights {
    match square {
        Square::A1 => CastlingRights::WHITE_QUEENSIDE,
        Square::H1 => CastlingRights::WHITE_KINGSIDE,
        Square::A8 => CastlingRights::BLACK_QUEENSIDE,
        Square::H8 => CastlingRights::BLACK_KINGSIDE,
        _ => CastlingRights::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::chess_move::MoveFlags;

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    #[test]
    fn double_push_sets_en_passant_and_resets_clock() {
        let board = BoardState::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 7 10").expect("FEN should parse");
        let mv = Move::new(sq("e2"), sq("e4"), PieceKind::Pawn).with_flags(MoveFlags::DOUBLE_PAWN_PUSH);
        let next = apply_move(&board, &mv).expect("move should apply");

        assert_eq!(next.en_passant_square(), Some(sq("e3")));
        assert_eq!(next.halfmove_clock(), 0);
        assert_eq!(next.fullmove_number(), 10);
        assert_eq!(next.side_to_move(), Color::Black);
        assert_eq!(next.piece_at(sq("e4")), Some(Piece::new(Color::White, PieceKind::Pawn)));
        // The original snapshot is untouched.
        assert_eq!(board.piece_at(sq("e2")), Some(Piece::new(Color::White, PieceKind::Pawn)));
    }

    #[test]
    fn en_passant_removes_the_passed_pawn() {
        let board = BoardState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let mv = Move::new(sq("e5"), sq("d6"), PieceKind::Pawn)
            .with_flags(MoveFlags::CAPTURE | MoveFlags::EN_PASSANT);
        let next = apply_move(&board, &mv).expect("move should apply");

        assert_eq!(next.piece_at(sq("d5")), None);
        assert_eq!(next.piece_at(sq("d6")), Some(Piece::new(Color::White, PieceKind::Pawn)));
        assert_eq!(next.en_passant_square(), None);
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let board = BoardState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 3 20").expect("FEN should parse");
        let mv = Move::new(Square::E8, Square::C8, PieceKind::King)
            .with_flags(MoveFlags::CASTLE_QUEENSIDE);
        let next = apply_move(&board, &mv).expect("move should apply");

        assert_eq!(next.piece_at(Square::D8), Some(Piece::new(Color::Black, PieceKind::Rook)));
        assert_eq!(next.piece_at(Square::A8), None);
        assert_eq!(
            next.castling_rights(),
            CastlingRights::WHITE_KINGSIDE | CastlingRights::WHITE_QUEENSIDE
        );
        assert_eq!(next.halfmove_clock(), 4);
        assert_eq!(next.fullmove_number(), 21);
    }

    #[test]
    fn capturing_a_home_rook_removes_its_right() {
        let board = BoardState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let mv = Move::new(Square::A1, Square::A8, PieceKind::Rook).with_flags(MoveFlags::CAPTURE);
        let next = apply_move(&board, &mv).expect("move should apply");

        assert_eq!(
            next.castling_rights(),
            CastlingRights::WHITE_KINGSIDE | CastlingRights::BLACK_KINGSIDE
        );
        assert_eq!(next.occupancy().count_ones(), 5);
    }

    #[test]
    fn promotion_substitutes_the_piece() {
        let board = BoardState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let mv = Move::new(sq("a7"), Square::A8, PieceKind::Pawn).with_promotion(PieceKind::Knight);
        let next = apply_move(&board, &mv).expect("move should apply");
        assert_eq!(next.piece_at(Square::A8), Some(Piece::new(Color::White, PieceKind::Knight)));
        assert_eq!(next.pieces(Color::White, PieceKind::Pawn), 0);
    }

    #[test]
    fn wrong_piece_or_empty_origin_is_rejected() {
        let board = BoardState::starting_position();
        let empty_origin = Move::new(sq("e4"), sq("e5"), PieceKind::Pawn);
        assert!(matches!(
            apply_move(&board, &empty_origin),
            Err(MoveError::IllegalMove { .. })
        ));

        let black_piece = Move::new(sq("e7"), sq("e5"), PieceKind::Pawn);
        assert!(matches!(
            apply_move(&board, &black_piece),
            Err(MoveError::IllegalMove { .. })
        ));
    }
}

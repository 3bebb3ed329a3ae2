//! Full legal move generation pipeline.
//!
//! Collects pseudo-legal moves piece by piece, applies each candidate, drops
//! those that leave the mover's king attacked, and optionally annotates the
//! survivors with check and mate information for notation and perft.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::PieceKind;
use crate::move_generation::legal_move_apply::apply_move_unchecked;
use crate::move_generation::legal_move_checks::{attackers_to_square, is_king_in_check};
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_pieces::{
    generate_bishop_moves, generate_knight_moves, generate_queen_moves, generate_rook_moves,
};
use crate::move_generation::move_generator::{GeneratedMove, MoveAnnotations, MoveGenerator};
use crate::moves::chess_move::Move;

/// Legal moves with check/mate annotations.
pub struct LegalMoveGenerator;

/// Legal moves without annotations; used where only counts matter.
pub struct FastLegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, board: &BoardState) -> Vec<GeneratedMove> {
        generate_legal_moves_internal(board, true)
    }
}

impl MoveGenerator for FastLegalMoveGenerator {
    fn generate_legal_moves(&self, board: &BoardState) -> Vec<GeneratedMove> {
        generate_legal_moves_internal(board, false)
    }
}

/// Legal moves for the side to move.
pub fn legal_moves(board: &BoardState) -> Vec<Move> {
    FastLegalMoveGenerator
        .generate_legal_moves(board)
        .into_iter()
        .map(|generated| generated.chess_move)
        .collect()
}

/// Pseudo-legal moves in generation order: pawns, knights, bishops, rooks,
/// queens, king.
pub fn pseudo_legal_moves(board: &BoardState) -> Vec<Move> {
    let mut pseudo = Vec::<Move>::with_capacity(128);

    generate_pawn_moves(board, &mut pseudo);
    generate_knight_moves(board, &mut pseudo);
    generate_bishop_moves(board, &mut pseudo);
    generate_rook_moves(board, &mut pseudo);
    generate_queen_moves(board, &mut pseudo);
    generate_king_moves(board, &mut pseudo);

    pseudo
}

fn generate_legal_moves_internal(board: &BoardState, annotate: bool) -> Vec<GeneratedMove> {
    let side = board.side_to_move();
    let kings = board.pieces(side, PieceKind::King).count_ones();
    assert!(
        kings == 1,
        "board invariant violated: {side} to move has {kings} kings"
    );

    let pseudo = pseudo_legal_moves(board);
    let mut legal = Vec::<GeneratedMove>::with_capacity(pseudo.len());

    for mv in pseudo {
        let next = apply_move_unchecked(board, &mv);

        // Illegal if own king is attacked after the move.
        if is_king_in_check(&next, side) {
            continue;
        }

        let annotations = if annotate {
            classify_move_annotations(&next)
        } else {
            MoveAnnotations::default()
        };

        legal.push(GeneratedMove {
            chess_move: mv,
            board_after: next,
            annotations,
        });
    }

    legal
}

fn classify_move_annotations(next: &BoardState) -> MoveAnnotations {
    let defender = next.side_to_move();
    let Some(defender_king_sq) = next.king_square(defender) else {
        return MoveAnnotations::default();
    };

    let checkers = attackers_to_square(next, defender_king_sq, defender.opposite());
    if checkers.is_empty() {
        return MoveAnnotations::default();
    }

    let has_reply = !generate_legal_moves_internal(next, false).is_empty();

    MoveAnnotations {
        gives_check: true,
        is_double_check: checkers.len() >= 2,
        is_checkmate: !has_reply,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_checks::is_king_in_check;

    #[test]
    fn fast_generator_matches_annotated_count_on_startpos() {
        let board = BoardState::starting_position();
        let annotated = LegalMoveGenerator.generate_legal_moves(&board);
        let fast = FastLegalMoveGenerator.generate_legal_moves(&board);
        assert_eq!(annotated.len(), fast.len());
        assert_eq!(fast.len(), 20);
    }

    #[test]
    fn twenty_replies_after_e4() {
        let board = BoardState::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
            .expect("FEN should parse");
        assert_eq!(legal_moves(&board).len(), 20);
    }

    #[test]
    fn generation_is_deterministic() {
        let board = BoardState::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("FEN should parse");
        assert_eq!(legal_moves(&board), legal_moves(&board));
    }

    #[test]
    fn pinned_en_passant_is_filtered() {
        // bxc6 e.p. would expose the king on the fifth rank.
        let board = BoardState::from_fen("8/8/8/KPp4r/8/8/8/7k w - c6 0 1").expect("FEN should parse");
        assert!(legal_moves(&board).iter().all(|mv| !mv.is_en_passant()));
        assert!(pseudo_legal_moves(&board).iter().any(|mv| mv.is_en_passant()));
    }

    #[test]
    fn no_legal_move_leaves_own_king_attacked() {
        let board = BoardState::from_fen("4k3/8/8/8/1b6/8/3P4/4K3 w - - 0 1").expect("FEN should parse");
        for generated in LegalMoveGenerator.generate_legal_moves(&board) {
            assert!(!is_king_in_check(&generated.board_after, board.side_to_move()));
        }
        // The d2 pawn is pinned and cannot move.
        assert!(legal_moves(&board).iter().all(|mv| mv.piece == PieceKind::King));
    }

    #[test]
    fn mate_annotation_on_fools_mate() {
        let board = BoardState::from_fen("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq g3 0 2")
            .expect("FEN should parse");
        let mate = LegalMoveGenerator
            .generate_legal_moves(&board)
            .into_iter()
            .find(|generated| generated.chess_move.to.to_string() == "h4")
            .expect("Qh4 should be legal");
        assert!(mate.annotations.gives_check);
        assert!(mate.annotations.is_checkmate);
        assert!(!mate.annotations.is_double_check);
    }

    #[test]
    #[should_panic(expected = "board invariant violated")]
    fn missing_king_is_a_contract_violation() {
        let mut board = BoardState::starting_position();
        board.clear_square(crate::game_state::chess_types::Square::E1);
        board.recalc_occupancy();
        let _ = legal_moves(&board);
    }
}

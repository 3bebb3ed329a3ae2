//! Perft: exhaustive move-tree node counts used to validate move generation.

use std::sync::Arc;
use std::thread;

use crate::game_state::board_state::BoardState;
use crate::move_generation::legal_move_generator::FastLegalMoveGenerator;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub double_checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.double_checks += rhs.double_checks;
        self.checkmates += rhs.checkmates;
    }

    fn record_leaf(&mut self, mv: &GeneratedMove) {
        self.nodes += 1;
        if mv.chess_move.is_capture() {
            self.captures += 1;
        }
        if mv.chess_move.is_en_passant() {
            self.en_passant += 1;
        }
        if mv.chess_move.is_castle() {
            self.castles += 1;
        }
        if mv.chess_move.is_promotion() {
            self.promotions += 1;
        }
        if mv.annotations.gives_check {
            self.checks += 1;
        }
        if mv.annotations.is_double_check {
            self.double_checks += 1;
        }
        if mv.annotations.is_checkmate {
            self.checkmates += 1;
        }
    }
}

/// Leaf statistics at `depth` plies. Check/mate counts need an annotating generator.
pub fn perft<G: MoveGenerator>(generator: &G, board: &BoardState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in generator.generate_legal_moves(board) {
        perft_recurse(generator, &mv, depth, 1, &mut total);
    }
    total
}

/// Node count only, with the fast generator.
pub fn perft_legal(board: &BoardState, depth: u8) -> PerftCounts {
    perft(&FastLegalMoveGenerator, board, depth)
}

/// Node counts below each root move, keyed by long algebraic text.
pub fn perft_divide(board: &BoardState, depth: u8) -> Vec<(String, usize)> {
    if depth == 0 {
        return Vec::new();
    }

    FastLegalMoveGenerator
        .generate_legal_moves(board)
        .into_iter()
        .map(|mv| {
            let nodes = perft_legal(&mv.board_after, depth - 1).nodes;
            (mv.chess_move.to_string(), nodes)
        })
        .collect()
}

/// Like [`perft`], with one OS thread per root move.
pub fn perft_multi_threaded(
    generator: Arc<dyn MoveGenerator>,
    board: &BoardState,
    depth: u8,
) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let handles: Vec<_> = generator
        .generate_legal_moves(board)
        .into_iter()
        .map(|mv| {
            let generator_ref = Arc::clone(&generator);
            thread::spawn(move || {
                let mut local = PerftCounts::default();
                perft_recurse(generator_ref.as_ref(), &mv, depth, 1, &mut local);
                local
            })
        })
        .collect();

    let mut total = PerftCounts::default();
    for handle in handles {
        match handle.join() {
            Ok(local) => total.merge(local),
            // A worker only panics on a broken board invariant; surface it.
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }
    total
}

fn perft_recurse<G: MoveGenerator + ?Sized>(
    generator: &G,
    mv: &GeneratedMove,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) {
    if current_depth == search_depth {
        counts.record_leaf(mv);
        return;
    }

    for child in generator.generate_legal_moves(&mv.board_after) {
        perft_recurse(generator, &child, search_depth, current_depth + 1, counts);
    }
}

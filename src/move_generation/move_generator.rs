use crate::game_state::board_state::BoardState;
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveAnnotations {
    pub gives_check: bool,
    pub is_double_check: bool,
    pub is_checkmate: bool,
}

#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub chess_move: Move,
    pub board_after: BoardState,
    pub annotations: MoveAnnotations,
}

/// Produces the legal moves of a position.
///
/// Output order carries no meaning but must be identical for identical input.
pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, board: &BoardState) -> Vec<GeneratedMove>;
}

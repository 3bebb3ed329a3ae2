//! Move text entry point: coordinate notation first, SAN otherwise.

use tracing::trace;

use crate::errors::MoveError;
use crate::game_state::board_state::BoardState;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::Move;
use crate::utils::long_algebraic::{parse_long_algebraic, resolve_long_algebraic};
use crate::utils::san::{parse_san, resolve_san};

/// Resolve `text` to a legal move of `board`.
pub fn parse_move(text: &str, board: &BoardState) -> Result<Move, MoveError> {
    parse_move_in(text, board, &legal_moves(board))
}

/// Like [`parse_move`], reusing an already generated legal move list.
pub fn parse_move_in(text: &str, board: &BoardState, legal: &[Move]) -> Result<Move, MoveError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(MoveError::invalid_notation(text, "empty move"));
    }

    if let Some(coordinates) = parse_long_algebraic(trimmed) {
        trace!(text = trimmed, "parsing as long algebraic");
        return resolve_long_algebraic(coordinates, trimmed, legal);
    }

    let san = parse_san(trimmed)?;
    resolve_san(san, trimmed, board, legal)
}

#[cfg(test)]
mod tests {
    use super::parse_move;
    use crate::errors::MoveError;
    use crate::game_state::board_state::BoardState;

    #[test]
    fn both_notations_reach_the_same_move() {
        let board = BoardState::starting_position();
        let by_san = parse_move("Nf3", &board).expect("Nf3 is legal");
        let by_lan = parse_move("  g1f3 ", &board).expect("g1f3 is legal");
        let by_dash = parse_move("g1-f3", &board).expect("g1-f3 is legal");
        assert_eq!(by_san, by_lan);
        assert_eq!(by_lan, by_dash);
    }

    #[test]
    fn error_kinds() {
        let board = BoardState::starting_position();
        assert!(matches!(parse_move("   ", &board), Err(MoveError::InvalidNotation { .. })));
        assert!(matches!(parse_move("hello", &board), Err(MoveError::InvalidNotation { .. })));
        assert!(matches!(parse_move("e2e5", &board), Err(MoveError::IllegalMove { .. })));
        assert!(matches!(parse_move("Ke2", &board), Err(MoveError::IllegalMove { .. })));
        assert!(matches!(parse_move("O-O", &board), Err(MoveError::IllegalMove { .. })));
    }
}

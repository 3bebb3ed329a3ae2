//! Game outcome classification.
//!
//! After every accepted move the position is classified in a fixed priority
//! order: checkmate, stalemate, fifty-move rule, insufficient material,
//! threefold repetition, check, and otherwise in progress.

use std::fmt;

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVE_LIMIT, REPETITION_DRAW_COUNT};
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    FiftyMove,
    InsufficientMaterial,
    ThreefoldRepetition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    /// The side to move is in check but has a legal reply.
    Check,
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    /// No further moves are accepted once this is true.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress | GameStatus::Check)
    }

    /// PGN result token.
    pub fn result_token(self) -> &'static str {
        match self {
            GameStatus::Checkmate {
                winner: Color::White,
            } => "1-0",
            GameStatus::Checkmate {
                winner: Color::Black,
            } => "0-1",
            GameStatus::Stalemate | GameStatus::Draw(_) => "1/2-1/2",
            GameStatus::InProgress | GameStatus::Check => "*",
        }
    }
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawReason::FiftyMove => f.write_str("fifty-move rule"),
            DrawReason::InsufficientMaterial => f.write_str("insufficient material"),
            DrawReason::ThreefoldRepetition => f.write_str("threefold repetition"),
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => f.write_str("in progress"),
            GameStatus::Check => f.write_str("check"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => f.write_str("stalemate"),
            GameStatus::Draw(reason) => write!(f, "draw by {reason}"),
        }
    }
}

/// Classify `board`, given whether the side to move has any legal move and
/// how many times the current position has occurred.
pub fn classify_position(board: &BoardState, has_legal_move: bool, repetitions: usize) -> GameStatus {
    let in_check = board.is_check();

    if !has_legal_move {
        return if in_check {
            GameStatus::Checkmate {
                winner: board.side_to_move().opposite(),
            }
        } else {
            GameStatus::Stalemate
        };
    }

    if board.halfmove_clock() >= FIFTY_MOVE_HALFMOVE_LIMIT {
        return GameStatus::Draw(DrawReason::FiftyMove);
    }
    if is_insufficient_material(board) {
        return GameStatus::Draw(DrawReason::InsufficientMaterial);
    }
    if repetitions >= REPETITION_DRAW_COUNT {
        return GameStatus::Draw(DrawReason::ThreefoldRepetition);
    }

    if in_check {
        GameStatus::Check
    } else {
        GameStatus::InProgress
    }
}

/// True when neither side can possibly deliver mate: bare kings, a single
/// minor piece against a bare king, or only bishops that all stand on one
/// square color.
pub fn is_insufficient_material(board: &BoardState) -> bool {
    let mut heavy_or_pawns: Bitboard = 0;
    for color in Color::ALL {
        heavy_or_pawns |= board.pieces(color, PieceKind::Pawn)
            | board.pieces(color, PieceKind::Rook)
            | board.pieces(color, PieceKind::Queen);
    }
    if heavy_or_pawns != 0 {
        return false;
    }

    let knights = board.pieces(Color::White, PieceKind::Knight) | board.pieces(Color::Black, PieceKind::Knight);
    let bishops = board.pieces(Color::White, PieceKind::Bishop) | board.pieces(Color::Black, PieceKind::Bishop);
    let minors = (knights | bishops).count_ones();

    if minors <= 1 {
        return true;
    }
    if knights != 0 {
        return false;
    }

    let mut colors = squares_of(bishops).map(Square::is_light);
    let first = colors.next();
    colors.all(|light| Some(light) == first)
}

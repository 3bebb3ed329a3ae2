//! Standard Algebraic Notation.
//!
//! Parsing is split in two steps: [`parse_san`] checks the grammar only, and
//! [`resolve_san`] matches the result against the legal moves of a position.
//! [`render_san`] produces the canonical form with minimal disambiguation and
//! a check or mate suffix.

use crate::errors::MoveError;
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{CastleSide, PieceKind, Square};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::Move;
use crate::utils::algebraic::{file_char, file_from_char, rank_char, rank_from_char};

/// SAN token after grammar checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanMove {
    Castle(CastleSide),
    Normal {
        piece: PieceKind,
        from_file: Option<u8>,
        from_rank: Option<u8>,
        capture: bool,
        to: Square,
        promotion: Option<PieceKind>,
    },
}

pub fn parse_san(text: &str) -> Result<SanMove, MoveError> {
    let body = text.trim_end_matches(['+', '#', '!', '?']);
    if body.is_empty() {
        return Err(MoveError::invalid_notation(text, "empty move"));
    }

    match body {
        "O-O" | "0-0" => return Ok(SanMove::Castle(CastleSide::Kingside)),
        "O-O-O" | "0-0-0" => return Ok(SanMove::Castle(CastleSide::Queenside)),
        _ => {}
    }

    let mut chars: Vec<char> = body.chars().collect();

    let piece = match chars.first().copied().and_then(PieceKind::from_san_letter) {
        Some(kind) => {
            chars.remove(0);
            kind
        }
        None => PieceKind::Pawn,
    };

    let promotion = take_promotion(text, &mut chars)?;
    if promotion.is_some() && piece != PieceKind::Pawn {
        return Err(MoveError::invalid_notation(text, "only pawns promote"));
    }

    if chars.len() < 2 {
        return Err(MoveError::invalid_notation(text, "missing destination square"));
    }
    let to_rank = chars.pop().and_then(rank_from_char);
    let to_file = chars.pop().and_then(file_from_char);
    let to = to_file
        .zip(to_rank)
        .and_then(|(file, rank)| Square::from_file_rank(file, rank))
        .ok_or_else(|| MoveError::invalid_notation(text, "bad destination square"))?;

    let capture = chars.last() == Some(&'x');
    if capture {
        chars.pop();
    }

    let (from_file, from_rank) = match chars.as_slice() {
        [] => (None, None),
        [f, r] => match (file_from_char(*f), rank_from_char(*r)) {
            (Some(file), Some(rank)) => (Some(file), Some(rank)),
            _ => return Err(MoveError::invalid_notation(text, "bad disambiguation")),
        },
        [c] => match (file_from_char(*c), rank_from_char(*c)) {
            (Some(file), _) => (Some(file), None),
            (_, Some(rank)) => (None, Some(rank)),
            _ => return Err(MoveError::invalid_notation(text, "bad disambiguation")),
        },
        _ => return Err(MoveError::invalid_notation(text, "unexpected characters")),
    };

    if piece == PieceKind::Pawn && from_rank.is_some() {
        return Err(MoveError::invalid_notation(text, "pawn moves name a file only"));
    }

    Ok(SanMove::Normal {
        piece,
        from_file,
        from_rank,
        capture,
        to,
        promotion,
    })
}

// Accepts `=Q` and a bare trailing `Q`.
fn take_promotion(text: &str, chars: &mut Vec<char>) -> Result<Option<PieceKind>, MoveError> {
    if let Some(eq) = chars.iter().position(|&c| c == '=') {
        let letter = match &chars[eq + 1..] {
            [letter] => *letter,
            _ => return Err(MoveError::invalid_notation(text, "bad promotion suffix")),
        };
        let kind = promotion_from_letter(letter.to_ascii_uppercase())
            .ok_or_else(|| MoveError::invalid_notation(text, "bad promotion piece"))?;
        chars.truncate(eq);
        return Ok(Some(kind));
    }

    match chars.last().copied().and_then(PieceKind::from_san_letter) {
        Some(kind) if chars.len() >= 3 => {
            if !PieceKind::PROMOTIONS.contains(&kind) {
                return Err(MoveError::invalid_notation(text, "bad promotion piece"));
            }
            chars.pop();
            Ok(Some(kind))
        }
        _ => Ok(None),
    }
}

fn promotion_from_letter(letter: char) -> Option<PieceKind> {
    PieceKind::from_san_letter(letter).filter(|kind| PieceKind::PROMOTIONS.contains(kind))
}

/// Match a parsed SAN token against the legal moves of `board`.
///
/// The capture marker is not required to agree with the position, and a
/// promotion without a piece letter promotes to a queen. Pawn captures must
/// still name the origin file.
pub fn resolve_san(
    san: SanMove,
    text: &str,
    board: &BoardState,
    legal: &[Move],
) -> Result<Move, MoveError> {
    let matches: Vec<Move> = match san {
        SanMove::Castle(side) => legal
            .iter()
            .filter(|m| m.castle_side() == Some(side))
            .copied()
            .collect(),
        SanMove::Normal {
            piece,
            from_file,
            from_rank,
            to,
            promotion,
            ..
        } => legal
            .iter()
            .filter(|m| {
                m.piece == piece
                    && m.to == to
                    && !m.is_castle()
                    && from_file.map_or(true, |file| m.from.file() == file)
                    // A pawn capture always names its origin file.
                    && (piece != PieceKind::Pawn || m.from.file() == m.to.file() || from_file.is_some())
                    && from_rank.map_or(true, |rank| m.from.rank() == rank)
                    && match (m.promotion, promotion) {
                        (None, None) => true,
                        (Some(kind), None) => kind == PieceKind::Queen,
                        (Some(kind), Some(want)) => kind == want,
                        (None, Some(_)) => false,
                    }
            })
            .copied()
            .collect(),
    };

    match matches.as_slice() {
        [] => Err(MoveError::illegal(text, "no legal move matches")),
        [single] => Ok(*single),
        several => Err(MoveError::AmbiguousMove {
            text: text.to_owned(),
            candidates: several
                .iter()
                .map(|m| render_san_in(m, board, legal))
                .collect(),
        }),
    }
}

/// Canonical SAN for a legal move of `board`, with `+` or `#` appended.
pub fn render_san(chess_move: &Move, board: &BoardState) -> String {
    render_san_in(chess_move, board, &legal_moves(board))
}

/// SAN for every legal move, in generation order.
pub fn legal_moves_san(board: &BoardState) -> Vec<String> {
    let legal = legal_moves(board);
    legal.iter().map(|m| render_san_in(m, board, &legal)).collect()
}

pub(crate) fn render_san_in(chess_move: &Move, board: &BoardState, legal: &[Move]) -> String {
    let mut out = match chess_move.castle_side() {
        Some(CastleSide::Kingside) => "O-O".to_owned(),
        Some(CastleSide::Queenside) => "O-O-O".to_owned(),
        None => render_body(chess_move, legal),
    };

    if let Ok(after) = board.apply(chess_move) {
        if after.is_check() {
            out.push(if legal_moves(&after).is_empty() { '#' } else { '+' });
        }
    }

    out
}

fn render_body(chess_move: &Move, legal: &[Move]) -> String {
    let mut out = String::new();

    match chess_move.piece.san_letter() {
        Some(letter) => {
            out.push(letter);
            out.push_str(&disambiguation(chess_move, legal));
            if chess_move.is_capture() {
                out.push('x');
            }
        }
        None => {
            if chess_move.is_capture() {
                out.push(file_char(chess_move.from.file()));
                out.push('x');
            }
        }
    }

    out.push_str(&chess_move.to.to_string());

    if let Some(letter) = chess_move.promotion.and_then(PieceKind::san_letter) {
        out.push('=');
        out.push(letter);
    }

    out
}

fn disambiguation(chess_move: &Move, legal: &[Move]) -> String {
    let rivals: Vec<&Move> = legal
        .iter()
        .filter(|m| m.piece == chess_move.piece && m.to == chess_move.to && m.from != chess_move.from)
        .collect();

    if rivals.is_empty() {
        return String::new();
    }

    let from = chess_move.from;
    if rivals.iter().all(|m| m.from.file() != from.file()) {
        file_char(from.file()).to_string()
    } else if rivals.iter().all(|m| m.from.rank() != from.rank()) {
        rank_char(from.rank()).to_string()
    } else {
        from.to_string()
    }
}

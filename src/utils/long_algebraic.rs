//! Long algebraic (coordinate) notation: `e2e4`, `e2-e4`, `e7e8q`, `e7e8=Q`.

use crate::errors::MoveError;
use crate::game_state::chess_types::{PieceKind, Square};
use crate::moves::chess_move::Move;

/// Coordinate move as written, before it is matched against a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongAlgebraic {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

/// Recognise coordinate notation. Returns `None` when `text` is not shaped
/// like a coordinate move so the caller can try SAN instead.
pub fn parse_long_algebraic(text: &str) -> Option<LongAlgebraic> {
    let body = text.trim_end_matches(['+', '#', '!', '?']);
    if !body.is_ascii() || body.len() < 4 {
        return None;
    }

    let from = body[0..2].parse::<Square>().ok()?;
    let mut rest = &body[2..];
    if let Some(stripped) = rest.strip_prefix(['-', 'x']) {
        rest = stripped;
    }
    if rest.len() < 2 {
        return None;
    }
    let to = rest[0..2].parse::<Square>().ok()?;
    let rest = &rest[2..];
    let rest = rest.strip_prefix('=').unwrap_or(rest);

    let promotion = match rest.chars().collect::<Vec<_>>().as_slice() {
        [] => None,
        [ch] => Some(char_to_promotion(*ch)?),
        _ => return None,
    };

    Some(LongAlgebraic {
        from,
        to,
        promotion,
    })
}

/// Match a coordinate move against the legal moves of the position.
///
/// A promotion without a piece letter is taken as a queen promotion.
pub fn resolve_long_algebraic(
    parsed: LongAlgebraic,
    text: &str,
    legal: &[Move],
) -> Result<Move, MoveError> {
    let mut candidates = legal
        .iter()
        .filter(|m| m.from == parsed.from && m.to == parsed.to)
        .peekable();

    if candidates.peek().is_none() {
        return Err(MoveError::illegal(
            text,
            format!("no legal move from {} to {}", parsed.from, parsed.to),
        ));
    }

    let wanted = parsed.promotion;
    candidates
        .find(|m| match (m.promotion, wanted) {
            (None, None) => true,
            (Some(kind), None) => kind == PieceKind::Queen,
            (Some(kind), Some(want)) => kind == want,
            (None, Some(_)) => false,
        })
        .copied()
        .ok_or_else(|| match wanted {
            Some(_) => MoveError::illegal(text, "this move is not a promotion"),
            None => MoveError::illegal(text, "promotion piece required"),
        })
}

fn char_to_promotion(ch: char) -> Option<PieceKind> {
    match ch.to_ascii_lowercase() {
        'n' => Some(PieceKind::Knight),
        'b' => Some(PieceKind::Bishop),
        'r' => Some(PieceKind::Rook),
        'q' => Some(PieceKind::Queen),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_long_algebraic, resolve_long_algebraic, LongAlgebraic};
    use crate::errors::MoveError;
    use crate::game_state::board_state::BoardState;
    use crate::game_state::chess_types::{PieceKind, Square};

    fn sq(text: &str) -> Square {
        text.parse().expect("test square should parse")
    }

    #[test]
    fn accepts_coordinate_variants() {
        let plain = LongAlgebraic {
            from: sq("e2"),
            to: sq("e4"),
            promotion: None,
        };
        assert_eq!(parse_long_algebraic("e2e4"), Some(plain));
        assert_eq!(parse_long_algebraic("e2-e4"), Some(plain));
        assert_eq!(parse_long_algebraic("e2e4+"), Some(plain));

        let promo = parse_long_algebraic("e7e8=Q").expect("promotion should parse");
        assert_eq!(promo.promotion, Some(PieceKind::Queen));
        let under = parse_long_algebraic("e7e8n").expect("underpromotion should parse");
        assert_eq!(under.promotion, Some(PieceKind::Knight));
    }

    #[test]
    fn leaves_san_shapes_alone() {
        for text in ["Nf3", "exd5", "e4", "O-O", "Qa1b2", "e7e8k", "e2e4e5", "é2e4"] {
            assert_eq!(parse_long_algebraic(text), None, "{text} is not coordinate notation");
        }
    }

    #[test]
    fn resolves_against_legal_moves() {
        let board = BoardState::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("FEN should parse");
        let legal = board.legal_moves();

        let default_queen = parse_long_algebraic("a7a8").expect("syntax ok");
        let resolved = resolve_long_algebraic(default_queen, "a7a8", &legal).expect("legal");
        assert_eq!(resolved.promotion, Some(PieceKind::Queen));

        let rook = parse_long_algebraic("a7a8r").expect("syntax ok");
        let resolved = resolve_long_algebraic(rook, "a7a8r", &legal).expect("legal");
        assert_eq!(resolved.promotion, Some(PieceKind::Rook));

        let nowhere = parse_long_algebraic("a7b8").expect("syntax ok");
        assert!(matches!(
            resolve_long_algebraic(nowhere, "a7b8", &legal),
            Err(MoveError::IllegalMove { .. })
        ));

        let king = parse_long_algebraic("h1h2q").expect("syntax ok");
        assert!(matches!(
            resolve_long_algebraic(king, "h1h2q", &legal),
            Err(MoveError::IllegalMove { .. })
        ));
    }
}

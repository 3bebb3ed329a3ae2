//! Text renderers for a board.
//!
//! `board_to_text` gives the compact ASCII grid used by `Display` and the
//! console; `render_board` adds a coordinate frame and can use Unicode glyphs.

use crate::game_state::{board_state::BoardState, chess_types::*};

/// Glyph set for [`render_board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardStyle {
    #[default]
    Ascii,
    Unicode,
}

/// Eight lines, rank 8 first, FEN letters separated by spaces and `.` for
/// empty squares.
pub fn board_to_text(board: &BoardState) -> String {
    let mut lines = Vec::with_capacity(8);

    for rank in (0..8u8).rev() {
        let cells: Vec<String> = (0..8u8)
            .map(|file| glyph(board, file, rank, BoardStyle::Ascii).to_string())
            .collect();
        lines.push(cells.join(" "));
    }

    lines.join("\n")
}

/// Board framed with file letters and rank numbers.
///
/// Assumes square indexing where `0 == a1`, `7 == h1`, and `63 == h8`.
pub fn render_board(board: &BoardState, style: BoardStyle) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0..8u8 {
            out.push(glyph(board, file, rank, style));
            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn glyph(board: &BoardState, file: u8, rank: u8, style: BoardStyle) -> char {
    let piece = Square::from_file_rank(file, rank).and_then(|sq| board.piece_at(sq));
    match (piece, style) {
        (Some(piece), BoardStyle::Ascii) => piece.fen_char(),
        (Some(piece), BoardStyle::Unicode) => piece_to_unicode(piece),
        (None, BoardStyle::Ascii) => '.',
        (None, BoardStyle::Unicode) => '·',
    }
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}

#[cfg(test)]
mod tests {
    use super::{board_to_text, render_board, BoardStyle};
    use crate::game_state::board_state::BoardState;

    #[test]
    fn ascii_grid_for_starting_position() {
        let text = board_to_text(&BoardState::starting_position());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "r n b q k b n r");
        assert_eq!(lines[3], ". . . . . . . .");
        assert_eq!(lines[7], "R N B Q K B N R");
    }

    #[test]
    fn framed_unicode_board() {
        let text = render_board(&BoardState::starting_position(), BoardStyle::Unicode);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "  a b c d e f g h");
        assert_eq!(lines[1], "8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8");
        assert_eq!(lines[8], "1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ 1");
    }
}

//! PGN read/write utilities for game history interchange.
//!
//! Writes a finished or ongoing [`ChessGame`] as PGN with the seven-tag roster
//! and SAN movetext, and reads PGN back by replaying its moves through the
//! rules engine.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::errors::PgnError;
use crate::game::chess_game::ChessGame;
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::Color;

const MAX_LINE_WIDTH: usize = 80;

#[derive(Debug, Clone)]
pub struct PgnGame {
    pub headers: BTreeMap<String, String>,
    pub game: ChessGame,
    pub result: String,
}

/// PGN for `game`, dated today.
pub fn write_pgn(game: &ChessGame) -> String {
    write_pgn_dated(game, Local::now().date_naive())
}

pub fn write_pgn_dated(game: &ChessGame, date: NaiveDate) -> String {
    let result = game.status().result_token();
    let mut headers: Vec<(&str, String)> = vec![
        ("Event", "Casual Game".to_owned()),
        ("Site", "Local".to_owned()),
        ("Date", date.format("%Y.%m.%d").to_string()),
        ("Round", "-".to_owned()),
        ("White", "White".to_owned()),
        ("Black", "Black".to_owned()),
        ("Result", result.to_owned()),
    ];

    let initial = game.initial_board();
    if *initial != BoardState::starting_position() {
        headers.push(("SetUp", "1".to_owned()));
        headers.push(("FEN", initial.to_fen()));
    }

    let mut out = String::new();
    for (key, value) in &headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let mut tokens = Vec::<String>::with_capacity(game.history().len() * 2 + 1);
    for (index, entry) in game.history().iter().enumerate() {
        let before = &entry.board_before;
        let number = before.fullmove_number();
        match before.side_to_move() {
            Color::White => tokens.push(format!("{number}.")),
            Color::Black if index == 0 => tokens.push(format!("{number}...")),
            Color::Black => {}
        }
        tokens.push(entry.san.clone());
    }
    tokens.push(result.to_owned());

    out.push_str(&wrap_tokens(&tokens));
    out.push('\n');
    out
}

fn wrap_tokens(tokens: &[String]) -> String {
    let mut out = String::new();
    let mut line_len = 0usize;

    for token in tokens {
        if line_len > 0 && line_len + 1 + token.len() > MAX_LINE_WIDTH {
            out.push('\n');
            line_len = 0;
        } else if line_len > 0 {
            out.push(' ');
            line_len += 1;
        }
        out.push_str(token);
        line_len += token.len();
    }

    out
}

pub fn read_pgn(pgn: &str) -> Result<PgnGame, PgnError> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext_lines = Vec::<&str>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }
        if trimmed.starts_with('[') {
            let (k, v) = parse_header_line(trimmed)?;
            headers.insert(k, v);
        } else {
            movetext_lines.push(trimmed);
        }
    }

    let mut game = if headers.get("SetUp").map(String::as_str) == Some("1") {
        let fen = headers.get("FEN").ok_or(PgnError::MissingFen)?;
        ChessGame::from_fen(fen)?
    } else if let Some(fen) = headers.get("FEN") {
        ChessGame::from_fen(fen)?
    } else {
        ChessGame::new()
    };

    let mut result = "*".to_owned();

    let movetext = strip_pgn_comments_and_variations(&movetext_lines.join(" "));
    for token in movetext.split_whitespace() {
        if is_move_number_token(token) || token.starts_with('$') {
            continue;
        }

        if is_result_token(token) {
            result = token.to_owned();
            break;
        }

        let san = strip_move_number_prefix(token);
        game.submit(san).map_err(|source| PgnError::Move {
            ply: game.history().len() + 1,
            text: san.to_owned(),
            source,
        })?;
    }

    if let Some(header_result) = headers.get("Result") {
        result = normalize_result(header_result).to_owned();
    }

    debug!(plies = game.history().len(), %result, "PGN game read");

    Ok(PgnGame {
        headers,
        game,
        result,
    })
}

fn parse_header_line(line: &str) -> Result<(String, String), PgnError> {
    let invalid = || PgnError::InvalidHeader(line.to_owned());

    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(invalid)?;
    let (key, value_raw) = inner.split_once(' ').ok_or_else(invalid)?;
    let value_raw = value_raw.trim();

    if key.is_empty() || value_raw.len() < 2 || !value_raw.starts_with('"') || !value_raw.ends_with('"') {
        return Err(invalid());
    }
    let value = value_raw[1..value_raw.len() - 1].replace("\\\"", "\"");
    Ok((key.trim().to_owned(), value))
}

fn strip_pgn_comments_and_variations(text: &str) -> String {
    let mut out = String::new();
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' => paren_depth = paren_depth.saturating_add(1),
            ')' => paren_depth = paren_depth.saturating_sub(1),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

fn is_move_number_token(token: &str) -> bool {
    let digits = token.trim_end_matches('.');
    digits.len() < token.len() && !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

// `12.Nf3` and `12...Nf6` carry the move number glued to the move.
fn strip_move_number_prefix(token: &str) -> &str {
    let digits = token.trim_start_matches(|c: char| c.is_ascii_digit());
    if digits.len() < token.len() && digits.starts_with('.') {
        digits.trim_start_matches('.')
    } else {
        token
    }
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{read_pgn, write_pgn_dated};
    use crate::errors::PgnError;
    use crate::game::chess_game::ChessGame;
    use crate::game::game_status::GameStatus;
    use crate::game_state::chess_types::Color;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date")
    }

    #[test]
    fn writes_roster_and_movetext() {
        let mut game = ChessGame::new();
        for text in ["f3", "e5", "g4", "Qh4"] {
            game.submit(text).expect("move is legal");
        }

        let pgn = write_pgn_dated(&game, date());
        assert!(pgn.starts_with("[Event \"Casual Game\"]\n"));
        assert!(pgn.contains("[Date \"2024.03.09\"]\n"));
        assert!(pgn.contains("[Result \"0-1\"]\n"));
        assert!(!pgn.contains("SetUp"));
        assert!(pgn.ends_with("1. f3 e5 2. g4 Qh4# 0-1\n"));
    }

    #[test]
    fn round_trip_custom_fen_with_black_to_move() {
        let fen = "4k3/4p3/8/8/8/8/4P3/4K3 b - - 0 7";
        let mut game = ChessGame::from_fen(fen).expect("FEN should parse");
        for text in ["e5", "e4"] {
            game.submit(text).expect("move is legal");
        }

        let pgn = write_pgn_dated(&game, date());
        assert!(pgn.contains("[SetUp \"1\"]\n"));
        assert!(pgn.contains("7... e5 8. e4 *"));

        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert_eq!(parsed.game.initial_board().to_fen(), fen);
        assert_eq!(parsed.game.board(), game.board());
        assert_eq!(parsed.result, "*");
    }

    #[test]
    fn reads_comments_variations_nags_and_glued_numbers() {
        let pgn = r#"[Event "Test"]
[Result "1-0"]

1.e4 {best by test} e5 (1...c5 2.Nf3) 2.Nf3 $1 Nc6 3.Bb5!? a6 1-0
"#;
        let parsed = read_pgn(pgn).expect("PGN should parse");
        assert_eq!(parsed.game.san_history(), vec!["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"]);
        assert_eq!(parsed.result, "1-0");
        assert_eq!(parsed.headers.get("Event").map(String::as_str), Some("Test"));
        assert_eq!(parsed.game.board().side_to_move(), Color::White);
        assert_eq!(parsed.game.status(), GameStatus::InProgress);
    }

    #[test]
    fn read_errors() {
        assert!(matches!(read_pgn("[Event Test]\n"), Err(PgnError::InvalidHeader(_))));
        assert!(matches!(read_pgn("[SetUp \"1\"]\n\n*"), Err(PgnError::MissingFen)));
        match read_pgn("1. e4 e5 2. Ke3 *") {
            Err(PgnError::Move { ply, text, .. }) => {
                assert_eq!(ply, 3);
                assert_eq!(text, "Ke3");
            }
            other => panic!("expected a replay error, got {other:?}"),
        }
    }
}

//! Algebraic square coordinates (`a1`..`h8`).
//!
//! Converts between human-readable coordinates and [`Square`] values; reused by
//! the FEN, long algebraic, SAN and PGN codecs.

use std::fmt;
use std::str::FromStr;

use crate::errors::SquareParseError;
use crate::game_state::chess_types::Square;

#[inline]
pub fn file_char(file: u8) -> char {
    char::from(b'a' + file)
}

#[inline]
pub fn rank_char(rank: u8) -> char {
    char::from(b'1' + rank)
}

#[inline]
pub fn file_from_char(ch: char) -> Option<u8> {
    ('a'..='h').contains(&ch).then(|| ch as u8 - b'a')
}

#[inline]
pub fn rank_from_char(ch: char) -> Option<u8> {
    ('1'..='8').contains(&ch).then(|| ch as u8 - b'1')
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", file_char(self.file()), rank_char(self.rank()))
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(SquareParseError(s.to_owned()));
        };

        file_from_char(file)
            .zip(rank_from_char(rank))
            .and_then(|(file, rank)| Square::from_file_rank(file, rank))
            .ok_or_else(|| SquareParseError(s.to_owned()))
    }
}

//! Errors used throughout the rules engine.
//!
//! Every recoverable failure mode has a typed variant here: notation that does
//! not parse, moves that are not legal in the current position, submissions
//! after the game has ended, malformed FEN and broken game records. None of
//! these leave a game in a partially-updated state, so callers can simply
//! report the error and re-prompt.
//!
//! A broken board invariant (for example a side to move without a king) is not
//! represented here. Such positions cannot be built through the public API, and
//! the move generator panics if it ever meets one.

use thiserror::Error;

use crate::game::game_status::GameStatus;
use crate::game_state::chess_types::{Color, Square};

/// Failure to parse, validate, apply or undo a move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// The text does not match any supported move grammar.
    #[error("invalid move notation \"{text}\": {reason}")]
    InvalidNotation { text: String, reason: String },

    /// The text is well formed but names no legal move in the current position.
    #[error("illegal move \"{text}\": {reason}")]
    IllegalMove { text: String, reason: String },

    /// Short notation matched more than one legal move.
    #[error("ambiguous move \"{text}\", candidates: {}", .candidates.join(", "))]
    AmbiguousMove {
        text: String,
        candidates: Vec<String>,
    },

    /// A move was submitted after the game reached a terminal state.
    #[error("game is over: {status}")]
    GameOver { status: GameStatus },

    /// Undo was requested with no move in the history.
    #[error("no move to undo")]
    NoHistory,
}

impl MoveError {
    pub(crate) fn invalid_notation(text: &str, reason: impl Into<String>) -> Self {
        MoveError::InvalidNotation {
            text: text.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn illegal(text: &str, reason: impl Into<String>) -> Self {
        MoveError::IllegalMove {
            text: text.to_owned(),
            reason: reason.into(),
        }
    }
}

/// A square coordinate that is not `a1`..`h8`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid square \"{0}\"")]
pub struct SquareParseError(pub String);

/// Failure to build a board from Forsyth-Edwards Notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN is missing the {0} field")]
    MissingField(&'static str),

    #[error("FEN has extra trailing fields")]
    TrailingFields,

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid side to move: {0}")]
    InvalidSideToMove(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en-passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),

    #[error("{color} must have exactly one king, found {count}")]
    KingCount { color: Color, count: u32 },

    #[error("pawn on back rank at {0}")]
    PawnOnBackRank(Square),

    #[error("{0} is in check but it is not their move")]
    OppositeSideInCheck(Color),
}

/// Failure to load a serialized game record.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("game record I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed game record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid start position: {0}")]
    Fen(#[from] FenError),

    #[error("move {ply} (\"{text}\") could not be replayed: {source}")]
    Move {
        ply: usize,
        text: String,
        #[source]
        source: MoveError,
    },
}

/// Failure to read a PGN game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PgnError {
    #[error("invalid PGN header line: {0}")]
    InvalidHeader(String),

    #[error("PGN SetUp is \"1\" but the FEN header is missing")]
    MissingFen,

    #[error("invalid PGN start position: {0}")]
    Fen(#[from] FenError),

    #[error("PGN move {ply} (\"{text}\") could not be replayed: {source}")]
    Move {
        ply: usize,
        text: String,
        #[source]
        source: MoveError,
    },
}

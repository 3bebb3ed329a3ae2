//! Serializable game record.
//!
//! A record is the start position plus the SAN of every move played. Loading
//! replays the moves through a fresh [`ChessGame`], so a record can never
//! produce a position the rules would not reach.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors::RecordError;
use crate::game::chess_game::ChessGame;
use crate::game_state::board_state::BoardState;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameRecord {
    /// `None` for the standard starting position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_fen: Option<String>,
    pub moves: Vec<String>,
}

impl GameRecord {
    pub fn from_game(game: &ChessGame) -> Self {
        let initial = game.initial_board();
        let start_fen = (*initial != BoardState::starting_position()).then(|| initial.to_fen());
        Self {
            start_fen,
            moves: game.san_history(),
        }
    }

    /// Rebuild the game by replaying every move from the start position.
    #[instrument(skip(self), fields(moves = self.moves.len()))]
    pub fn replay(&self) -> Result<ChessGame, RecordError> {
        let mut game = match &self.start_fen {
            Some(fen) => ChessGame::from_fen(fen)?,
            None => ChessGame::new(),
        };

        for (index, text) in self.moves.iter().enumerate() {
            game.submit(text).map_err(|source| RecordError::Move {
                ply: index + 1,
                text: text.clone(),
                source,
            })?;
        }

        debug!(status = %game.status(), "record replayed");
        Ok(game)
    }

    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), RecordError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, RecordError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::GameRecord;
    use crate::errors::{MoveError, RecordError};
    use crate::game::chess_game::ChessGame;

    #[test]
    fn json_round_trip_replays_the_same_game() {
        let mut game = ChessGame::new();
        for text in ["e4", "e5", "Nf3", "Nc6", "Bb5"] {
            game.submit(text).expect("opening move is legal");
        }

        let record = GameRecord::from_game(&game);
        assert_eq!(record.start_fen, None);
        let json = record.to_json().expect("record serializes");
        assert!(!json.contains("start_fen"));

        let loaded = GameRecord::from_json(&json).expect("record deserializes");
        assert_eq!(loaded, record);
        let replayed = loaded.replay().expect("record replays");
        assert_eq!(replayed.board(), game.board());
        assert_eq!(replayed.san_history(), game.san_history());
    }

    #[test]
    fn custom_start_is_kept() {
        let fen = "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1";
        let game = ChessGame::from_fen(fen).expect("FEN should parse");
        let record = GameRecord::from_game(&game);
        assert_eq!(record.start_fen.as_deref(), Some(fen));
    }

    #[test]
    fn replay_reports_the_failing_ply() {
        let record = GameRecord {
            start_fen: None,
            moves: vec!["e4".to_owned(), "e5".to_owned(), "Ke3".to_owned()],
        };
        match record.replay() {
            Err(RecordError::Move { ply, text, source }) => {
                assert_eq!(ply, 3);
                assert_eq!(text, "Ke3");
                assert!(matches!(source, MoveError::IllegalMove { .. }));
            }
            other => panic!("expected a move error, got {other:?}"),
        }

        assert!(matches!(GameRecord::from_json("{"), Err(RecordError::Json(_))));
        let bad_fen = GameRecord {
            start_fen: Some("not a fen".to_owned()),
            moves: Vec::new(),
        };
        assert!(matches!(bad_fen.replay(), Err(RecordError::Fen(_))));
    }
}

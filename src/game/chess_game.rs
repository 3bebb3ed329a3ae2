//! The game state machine.
//!
//! `ChessGame` owns the current position, the move history and the cached
//! legal moves, and re-classifies the game after every change. Submissions are
//! all-or-nothing: a rejected move leaves the game exactly as it was.

use std::collections::HashMap;

use tracing::{debug, info, instrument};

use crate::errors::{FenError, MoveError};
use crate::game::game_status::{classify_position, GameStatus};
use crate::game_state::board_state::{BoardState, PositionKey};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::Move;
use crate::utils::notation::parse_move_in;
use crate::utils::san::render_san_in;

/// One accepted move together with the position it was played from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub board_before: BoardState,
    pub chess_move: Move,
    pub san: String,
}

#[derive(Debug, Clone)]
pub struct ChessGame {
    initial: BoardState,
    history: Vec<HistoryEntry>,
    board: BoardState,
    legal: Vec<Move>,
    status: GameStatus,
    // Occurrences of every position reached so far, the current one included.
    repetitions: HashMap<PositionKey, usize>,
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessGame {
    /// A game from the standard starting position.
    pub fn new() -> Self {
        Self::from_board(BoardState::starting_position())
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        BoardState::from_fen(fen).map(Self::from_board)
    }

    pub fn from_board(board: BoardState) -> Self {
        let mut game = Self {
            initial: board.clone(),
            history: Vec::new(),
            legal: Vec::new(),
            status: GameStatus::InProgress,
            repetitions: HashMap::new(),
            board,
        };
        *game.repetitions.entry(game.board.position_key()).or_insert(0) += 1;
        game.refresh();
        game
    }

    #[inline]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    #[inline]
    pub fn initial_board(&self) -> &BoardState {
        &self.initial
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal
    }

    #[inline]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Legal moves of the current position in SAN, in generation order.
    pub fn legal_moves_text(&self) -> Vec<String> {
        self.legal
            .iter()
            .map(|m| render_san_in(m, &self.board, &self.legal))
            .collect()
    }

    pub fn san_history(&self) -> Vec<String> {
        self.history.iter().map(|entry| entry.san.clone()).collect()
    }

    /// How many times the current position has occurred in this game.
    pub fn repetition_count(&self) -> usize {
        self.repetitions
            .get(&self.board.position_key())
            .copied()
            .unwrap_or(0)
    }

    /// Parse `text` in coordinate or SAN notation and play it.
    #[instrument(skip(self), fields(ply = self.history.len()))]
    pub fn submit(&mut self, text: &str) -> Result<GameStatus, MoveError> {
        self.ensure_not_over()?;
        let chess_move = parse_move_in(text, &self.board, &self.legal).inspect_err(|err| {
            debug!(%err, "move rejected");
        })?;
        self.play(chess_move)
    }

    /// Play a move value; it must be one of the current legal moves.
    #[instrument(skip(self, chess_move), fields(ply = self.history.len(), chess_move = %chess_move))]
    pub fn submit_move(&mut self, chess_move: Move) -> Result<GameStatus, MoveError> {
        self.ensure_not_over()?;
        if !self.legal.contains(&chess_move) {
            debug!("move rejected: not in the legal move list");
            return Err(MoveError::illegal(
                &chess_move.to_string(),
                "not a legal move in this position",
            ));
        }
        self.play(chess_move)
    }

    /// Take back the last move. Allowed from terminal states.
    #[instrument(skip(self), fields(ply = self.history.len()))]
    pub fn undo(&mut self) -> Result<Move, MoveError> {
        let entry = self.history.pop().ok_or(MoveError::NoHistory)?;

        let key = self.board.position_key();
        if let Some(count) = self.repetitions.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                self.repetitions.remove(&key);
            }
        }

        self.board = entry.board_before;
        self.refresh();
        debug!(san = %entry.san, status = %self.status, "move undone");
        Ok(entry.chess_move)
    }

    /// Back to this game's initial position with an empty history.
    #[instrument(skip(self), fields(ply = self.history.len()))]
    pub fn restart(&mut self) {
        *self = Self::from_board(self.initial.clone());
        info!("game restarted");
    }

    fn ensure_not_over(&self) -> Result<(), MoveError> {
        if self.status.is_terminal() {
            debug!(status = %self.status, "move rejected: game is over");
            return Err(MoveError::GameOver {
                status: self.status,
            });
        }
        Ok(())
    }

    fn play(&mut self, chess_move: Move) -> Result<GameStatus, MoveError> {
        let san = render_san_in(&chess_move, &self.board, &self.legal);
        let next = self.board.apply(&chess_move)?;

        let board_before = std::mem::replace(&mut self.board, next);
        self.history.push(HistoryEntry {
            board_before,
            chess_move,
            san,
        });
        *self.repetitions.entry(self.board.position_key()).or_insert(0) += 1;
        self.refresh();

        if self.status.is_terminal() {
            info!(status = %self.status, "game over");
        } else {
            debug!(move_text = %chess_move, status = %self.status, "move accepted");
        }
        Ok(self.status)
    }

    fn refresh(&mut self) {
        self.legal = legal_moves(&self.board);
        self.status = classify_position(&self.board, !self.legal.is_empty(), self.repetition_count());
    }
}

#[cfg(test)]
mod tests {
    use super::ChessGame;
    use crate::errors::MoveError;
    use crate::game::game_status::{DrawReason, GameStatus};
    use crate::game_state::chess_types::Color;

    fn play_all(game: &mut ChessGame, moves: &[&str]) -> GameStatus {
        let mut status = game.status();
        for text in moves {
            status = game
                .submit(text)
                .unwrap_or_else(|err| panic!("{text} should be accepted: {err}"));
        }
        status
    }

    #[test]
    fn fresh_game() {
        let game = ChessGame::new();
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.legal_moves().len(), 20);
        assert_eq!(game.repetition_count(), 1);
        assert!(game.legal_moves_text().contains(&"Nf3".to_owned()));

        let mut game = game;
        play_all(&mut game, &["e4"]);
        assert_eq!(game.legal_moves().len(), 20);
    }

    #[test]
    fn rejected_move_leaves_game_untouched() {
        let mut game = ChessGame::new();
        let before = game.board().clone();
        assert!(matches!(game.submit("e2e5"), Err(MoveError::IllegalMove { .. })));
        assert!(matches!(game.submit("zz"), Err(MoveError::InvalidNotation { .. })));
        assert_eq!(game.board(), &before);
        assert!(game.history().is_empty());
    }

    #[test]
    fn fools_mate_then_undo() {
        let mut game = ChessGame::new();
        let status = play_all(&mut game, &["f3", "e5", "g4", "Qh4"]);
        assert_eq!(status, GameStatus::Checkmate { winner: Color::Black });
        assert_eq!(game.san_history(), vec!["f3", "e5", "g4", "Qh4#"]);
        assert!(matches!(game.submit("a3"), Err(MoveError::GameOver { .. })));

        let undone = game.undo().expect("undo is allowed after mate");
        assert_eq!(undone.to_string(), "d8h4");
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.history().len(), 3);
    }

    #[test]
    fn undo_on_empty_history() {
        let mut game = ChessGame::new();
        assert_eq!(game.undo(), Err(MoveError::NoHistory));
    }

    #[test]
    fn threefold_and_repetition_bookkeeping() {
        let mut game = ChessGame::new();
        play_all(&mut game, &["Nf3", "Nf6", "Ng1", "Ng8"]);
        assert_eq!(game.repetition_count(), 2);
        let status = play_all(&mut game, &["Nf3", "Nf6", "Ng1", "Ng8"]);
        assert_eq!(status, GameStatus::Draw(DrawReason::ThreefoldRepetition));

        game.undo().expect("history is not empty");
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.repetition_count(), 2);
    }

    #[test]
    fn restart_returns_to_initial_position() {
        let fen = "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1";
        let mut game = ChessGame::from_fen(fen).expect("FEN should parse");
        play_all(&mut game, &["e4", "Kd7"]);
        game.restart();
        assert_eq!(game.board().to_fen(), fen);
        assert!(game.history().is_empty());
    }

    #[test]
    fn submit_move_requires_a_legal_move() {
        let mut game = ChessGame::new();
        let first = game.legal_moves()[0];
        game.submit_move(first).expect("generated move is legal");
        assert!(matches!(game.submit_move(first), Err(MoveError::IllegalMove { .. })));
    }
}

//! Line-oriented console front end.
//!
//! Reads one command per line, routes it to the shared game handle and prints
//! the board and a status message after every accepted move.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::{info, warn};

use crate::errors::{MoveError, RecordError};
use crate::game::chess_game::ChessGame;
use crate::game::game_handle::{self, GameHandle};
use crate::game::game_record::GameRecord;
use crate::game::game_status::GameStatus;
use crate::utils::pgn::write_pgn;
use crate::utils::render_game_state::{render_board, BoardStyle};

const HELP_TEXT: &str = "\
Commands:
  <move>        play a move, e.g. e4, Nf3, O-O, e7e8q
  moves         list the legal moves
  board         show the board
  fen           show the position as FEN
  pgn           show the game as PGN
  undo          take back the last move
  restart       start the game over
  save [path]   write the game record as JSON
  help          show this text
  quit          leave";

#[derive(Debug, Clone, Default)]
pub struct ConsoleConfig {
    pub style: BoardStyle,
    /// Default target for `save`, also written on exit.
    pub save_path: Option<PathBuf>,
}

pub fn run_stdio_loop(game: ChessGame, config: ConsoleConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut console = ConsoleState::new(game, config);

    console.print_board(&mut stdout)?;
    writeln!(stdout, "Type 'help' for commands.")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = console.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    console.autosave(&mut stdout)
}

pub struct ConsoleState {
    game: GameHandle,
    config: ConsoleConfig,
}

impl ConsoleState {
    pub fn new(game: ChessGame, config: ConsoleConfig) -> Self {
        Self {
            game: game_handle::wrap(game),
            config,
        }
    }

    pub fn handle(&self) -> &GameHandle {
        &self.game
    }

    /// Returns `true` when the loop should stop.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();

        match cmd {
            "help" => writeln!(out, "{HELP_TEXT}")?,
            "moves" => {
                let moves = game_handle::legal_moves_text(&self.game);
                writeln!(out, "Legal Moves: {}", moves.join(", "))?;
            }
            "board" => self.print_board(out)?,
            "fen" => writeln!(out, "{}", game_handle::current_board(&self.game).to_fen())?,
            "pgn" => {
                let pgn = self.with_game(write_pgn);
                write!(out, "{pgn}")?;
            }
            "undo" => match game_handle::undo_move(&self.game) {
                Ok(_) => {
                    writeln!(out, "Move undone.")?;
                    self.print_board(out)?;
                }
                Err(err) => writeln!(out, "Cannot undo: {err}.")?,
            },
            "restart" => {
                self.game = game_handle::restart(&self.game);
                writeln!(out, "Game restarted.")?;
                self.print_board(out)?;
            }
            "save" => {
                let path = parts.next().map(PathBuf::from).or_else(|| self.config.save_path.clone());
                match path {
                    Some(path) => self.save_to(path, out)?,
                    None => writeln!(out, "No save path given.")?,
                }
            }
            "quit" | "exit" => return Ok(true),
            _ => self.submit(trimmed, out)?,
        }

        Ok(false)
    }

    fn submit(&mut self, text: &str, out: &mut impl Write) -> io::Result<()> {
        match game_handle::submit_move(&self.game, text) {
            Ok(status) => {
                self.print_board(out)?;
                writeln!(out, "{}", status_message(status))?;
            }
            Err(MoveError::GameOver { status }) => {
                writeln!(out, "The game is over ({status}). Type 'restart' to play again.")?;
            }
            Err(err) => writeln!(out, "Invalid move! Try again. ({err})")?,
        }
        Ok(())
    }

    fn print_board(&self, out: &mut impl Write) -> io::Result<()> {
        let board = game_handle::current_board(&self.game);
        writeln!(out, "{}", render_board(&board, self.config.style))?;
        writeln!(out, "{} to move.", board.side_to_move())
    }

    fn save_to(&self, path: PathBuf, out: &mut impl Write) -> io::Result<()> {
        let record = game_handle::game_record(&self.game);
        match record.save(&path) {
            Ok(()) => {
                info!(path = %path.display(), "game record saved");
                writeln!(out, "Game saved to {}.", path.display())
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "saving game record failed");
                writeln!(out, "Could not save game: {err}")
            }
        }
    }

    fn autosave(&self, out: &mut impl Write) -> io::Result<()> {
        match self.config.save_path.clone() {
            Some(path) => self.save_to(path, out),
            None => Ok(()),
        }
    }

    fn with_game<T>(&self, f: impl FnOnce(&ChessGame) -> T) -> T {
        let game = self.game.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&game)
    }
}

fn status_message(status: GameStatus) -> String {
    match status {
        GameStatus::InProgress => "Move successful!".to_owned(),
        GameStatus::Check => "Check!".to_owned(),
        GameStatus::Checkmate { .. } => "Checkmate! Game over.".to_owned(),
        GameStatus::Stalemate => "Stalemate! Game over.".to_owned(),
        GameStatus::Draw(reason) => format!("Draw ({reason})! Game over."),
    }
}

/// Load the starting game for `play`: a saved record, a FEN, or the standard
/// start, in that order of preference.
pub fn load_game(fen: Option<&str>, record: Option<&GameRecord>) -> Result<ChessGame, RecordError> {
    match (record, fen) {
        (Some(record), _) => record.replay(),
        (None, Some(fen)) => Ok(ChessGame::from_fen(fen)?),
        (None, None) => Ok(ChessGame::new()),
    }
}

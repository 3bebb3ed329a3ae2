//! Shared game handle for front ends.
//!
//! Every operation locks the game for its whole duration, so concurrent
//! callers observe moves one at a time. Reads hand back owned snapshots.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::errors::MoveError;
use crate::game::chess_game::ChessGame;
use crate::game::game_record::GameRecord;
use crate::game::game_status::GameStatus;
use crate::game_state::board_state::BoardState;
use crate::moves::chess_move::Move;

pub type GameHandle = Arc<Mutex<ChessGame>>;

/// A game from the standard starting position.
pub fn new_game() -> GameHandle {
    wrap(ChessGame::new())
}

pub fn wrap(game: ChessGame) -> GameHandle {
    Arc::new(Mutex::new(game))
}

pub fn current_board(handle: &GameHandle) -> BoardState {
    lock(handle).board().clone()
}

pub fn legal_moves_text(handle: &GameHandle) -> Vec<String> {
    lock(handle).legal_moves_text()
}

pub fn submit_move(handle: &GameHandle, text: &str) -> Result<GameStatus, MoveError> {
    lock(handle).submit(text)
}

pub fn undo_move(handle: &GameHandle) -> Result<Move, MoveError> {
    lock(handle).undo()
}

pub fn game_status(handle: &GameHandle) -> GameStatus {
    lock(handle).status()
}

pub fn game_record(handle: &GameHandle) -> GameRecord {
    GameRecord::from_game(&lock(handle))
}

/// Reset the game in place and return the same handle, so every holder of a
/// clone sees the restarted game.
pub fn restart(handle: &GameHandle) -> GameHandle {
    lock(handle).restart();
    Arc::clone(handle)
}

// A panic while the lock was held cannot leave a half-applied move: every
// mutation replaces whole values, so a poisoned lock is still consistent.
fn lock(handle: &GameHandle) -> MutexGuard<'_, ChessGame> {
    handle.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn handle_operations() {
        let handle = new_game();
        assert_eq!(legal_moves_text(&handle).len(), 20);
        assert_eq!(submit_move(&handle, "e4"), Ok(GameStatus::InProgress));
        assert_eq!(game_record(&handle).moves, vec!["e4".to_owned()]);

        let undone = undo_move(&handle).expect("one move to undo");
        assert_eq!(undone.to_string(), "e2e4");
        assert_eq!(current_board(&handle), BoardState::starting_position());

        submit_move(&handle, "d4").expect("d4 is legal");
        let restarted = restart(&handle);
        assert!(Arc::ptr_eq(&restarted, &handle));
        assert_eq!(current_board(&handle), BoardState::starting_position());
        assert_eq!(game_status(&handle), GameStatus::InProgress);
    }

    #[test]
    fn concurrent_submissions_are_serialized() {
        let handle = new_game();
        let workers: Vec<_> = ["e4", "d4"]
            .into_iter()
            .map(|text| {
                let handle = Arc::clone(&handle);
                thread::spawn(move || submit_move(&handle, text).is_ok())
            })
            .collect();

        let accepted = workers
            .into_iter()
            .map(|worker| worker.join().expect("worker thread should not panic"))
            .filter(|ok| *ok)
            .count();

        // Whichever lands second is a white move on black's turn.
        assert_eq!(accepted, 1);
        assert_eq!(game_record(&handle).moves.len(), 1);
    }
}

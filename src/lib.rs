//! Crate root module declarations for the chessge rules engine.
//!
//! Exposes the board model, move generation, notation codecs, the game state
//! machine and the console front end so the binary, tests and benches can
//! import stable module paths.

pub mod errors;
pub mod logging;

pub mod game_state {
    pub mod board_state;
    pub mod chess_rules;
    pub mod chess_types;
}

pub mod moves {
    pub mod chess_move;
    pub mod leaper_attacks;
    pub mod slider_attacks;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_pawn;
    pub mod legal_moves_pieces;
    pub mod move_generator;
    pub mod perft;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod notation;
    pub mod pgn;
    pub mod render_game_state;
    pub mod san;
}

pub mod game {
    pub mod chess_game;
    pub mod game_handle;
    pub mod game_record;
    pub mod game_status;
}

pub mod console {
    pub mod console_top;
}

pub use errors::{FenError, MoveError, PgnError, RecordError};
pub use game::chess_game::ChessGame;
pub use game::game_status::{DrawReason, GameStatus};
pub use game_state::board_state::BoardState;
pub use moves::chess_move::Move;

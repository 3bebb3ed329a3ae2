use std::sync::Arc;
use std::time::Instant;

use chessge::console::console_top::{load_game, run_stdio_loop, ConsoleConfig};
use chessge::errors::{FenError, RecordError};
use chessge::game::game_record::GameRecord;
use chessge::game_state::board_state::BoardState;
use chessge::logging::init_logging;
use chessge::move_generation::legal_move_generator::LegalMoveGenerator;
use chessge::move_generation::perft::{perft, perft_divide, perft_multi_threaded};
use chessge::utils::render_game_state::BoardStyle;
use clap::Parser;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
enum ChessgeError {
    #[error("could not start the game: {0}")]
    Record(#[from] RecordError),

    #[error("invalid FEN: {0}")]
    Fen(#[from] FenError),

    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

mod arguments {
    use std::path::PathBuf;

    use clap::{Args, Parser, Subcommand, ValueEnum};

    /// Chess rules engine with a console front end
    #[derive(Parser)]
    #[command(name = "chessge", version, about)]
    pub struct ChessgeArgs {
        /// Log filter used when RUST_LOG is not set
        #[arg(long, global = true, default_value = "warn")]
        pub log_level: String,

        #[command(subcommand)]
        pub command: Option<Commands>,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Commands {
        /// Play a game in the terminal (default command)
        Play(PlayArgs),

        /// Count leaf nodes of the move tree
        Perft {
            /// Depth in plies
            #[arg(short, long)]
            depth: u8,

            /// Position to count from
            #[arg(short, long)]
            fen: Option<String>,

            /// Print the node count below every root move
            #[arg(long)]
            divide: bool,

            /// Split the root moves across threads
            #[arg(short, long)]
            threads: bool,
        },
    }

    #[derive(Debug, Clone, Default, Args)]
    pub struct PlayArgs {
        /// Start from this position instead of the standard one
        #[arg(long, conflicts_with = "load")]
        pub fen: Option<String>,

        /// Board glyphs
        #[arg(long, value_enum, default_value_t = Style::Ascii)]
        pub style: Style,

        /// Resume a saved JSON game record
        #[arg(long)]
        pub load: Option<PathBuf>,

        /// Where `save` writes by default; also written on exit
        #[arg(long)]
        pub save: Option<PathBuf>,
    }

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
    pub enum Style {
        #[default]
        Ascii,
        Unicode,
    }
}

fn run() -> Result<(), ChessgeError> {
    let args = arguments::ChessgeArgs::parse();

    if let Err(err) = init_logging(&args.log_level) {
        eprintln!("logging disabled: {err}");
    }

    match args
        .command
        .unwrap_or_else(|| arguments::Commands::Play(arguments::PlayArgs::default()))
    {
        arguments::Commands::Play(play) => {
            let record = play.load.as_deref().map(GameRecord::load).transpose()?;
            let game = load_game(play.fen.as_deref(), record.as_ref())?;
            let config = ConsoleConfig {
                style: match play.style {
                    arguments::Style::Ascii => BoardStyle::Ascii,
                    arguments::Style::Unicode => BoardStyle::Unicode,
                },
                save_path: play.save,
            };
            info!(fen = %game.board().to_fen(), "starting console game");
            run_stdio_loop(game, config)?;
        }
        arguments::Commands::Perft {
            depth,
            fen,
            divide,
            threads,
        } => {
            let board = match fen {
                Some(fen) => BoardState::from_fen(&fen)?,
                None => BoardState::starting_position(),
            };

            if divide {
                let mut total = 0usize;
                for (lan, nodes) in perft_divide(&board, depth) {
                    println!("{lan}: {nodes}");
                    total += nodes;
                }
                println!();
                println!("Nodes searched: {total}");
                return Ok(());
            }

            let started = Instant::now();
            let counts = if threads {
                perft_multi_threaded(Arc::new(LegalMoveGenerator), &board, depth)
            } else {
                perft(&LegalMoveGenerator, &board, depth)
            };
            let elapsed = started.elapsed();

            println!("Depth: {depth}");
            println!("Nodes: {}", counts.nodes);
            println!("Captures: {}", counts.captures);
            println!("En passant: {}", counts.en_passant);
            println!("Castles: {}", counts.castles);
            println!("Promotions: {}", counts.promotions);
            println!("Checks: {}", counts.checks);
            println!("Double checks: {}", counts.double_checks);
            println!("Checkmates: {}", counts.checkmates);
            println!("Time: {:.3}s", elapsed.as_secs_f64());
        }
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

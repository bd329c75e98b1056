//! Command-line interface for hyperxo.

use clap::{Parser, Subcommand};
use hyperxo::{Difficulty, GameState, Move, MoveError, Position};
use std::path::PathBuf;

/// Hyperxo - hyper tic-tac-toe engine and minimax opponent
#[derive(Parser, Debug)]
#[command(name = "hyperxo")]
#[command(about = "Hyper tic-tac-toe engine with a minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a full game between two computer opponents
    Selfplay {
        /// Difficulty for X (easy, medium, hard)
        #[arg(long, default_value = "medium")]
        x: Difficulty,

        /// Difficulty for O (easy, medium, hard)
        #[arg(long, default_value = "medium")]
        o: Difficulty,

        /// Opponent config applied to both sides (difficulty still comes from --x/--o)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Replay a move list and print the opponent's suggestion as JSON
    Suggest {
        /// Comma-separated `board:cell` pairs, e.g. "4:4,4:0"
        #[arg(long, default_value = "")]
        moves: String,

        /// Search difficulty
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,

        /// Optional opponent config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Errors parsing a move list.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveListError {
    /// A pair isn't `board:cell`.
    #[display("Malformed move '{}', expected board:cell", _0)]
    Malformed(String),

    /// A pair names a board or cell that doesn't exist.
    #[display("Unknown position '{}'", _0)]
    UnknownPosition(String),

    /// A move was illegal when replayed.
    #[display("Move {} is illegal: {}", index, error)]
    Illegal {
        /// Zero-based index in the list.
        index: usize,
        /// Why the engine rejected it.
        error: MoveError,
    },
}

impl std::error::Error for MoveListError {}

/// Replays a `board:cell` list from the initial state.
///
/// Boards and cells accept an index (0-8) or a label such as `center`.
/// Marks alternate starting with X.
pub fn replay_moves(list: &str) -> Result<GameState, MoveListError> {
    list.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .enumerate()
        .try_fold(GameState::new(), |state, (index, pair)| {
            let (board, cell) = pair
                .split_once(':')
                .ok_or_else(|| MoveListError::Malformed(pair.to_string()))?;
            let mov = Move::new(state.current_player(), parse_position(board)?, parse_position(cell)?);
            state
                .apply_move(mov)
                .map_err(|error| MoveListError::Illegal { index, error })
        })
}

fn parse_position(text: &str) -> Result<Position, MoveListError> {
    Position::from_label_or_number(text)
        .ok_or_else(|| MoveListError::UnknownPosition(text.trim().to_string()))
}

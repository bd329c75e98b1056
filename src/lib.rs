//! Hyper tic-tac-toe rules engine and computer opponent.
//!
//! Hyper tic-tac-toe (also called ultimate tic-tac-toe) is played on a 3×3
//! grid of 3×3 sub-boards. The cell a player marks names the sub-board the
//! opponent must play in next; winning three sub-boards in a line wins the
//! game.
//!
//! # Architecture
//!
//! - **Games**: The rules engine, with contracts and invariants checked on every move
//! - **Opponent**: Depth-limited alpha-beta minimax at three difficulty tiers
//! - **Session**: Two-player sessions with an optional computer opponent
//! - **Config**: TOML configuration for the opponent
//!
//! # Example
//!
//! ```
//! use hyperxo::{Difficulty, GameState, Position, choose};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = GameState::new().play(Position::Center, Position::Center)?;
//! let reply = choose(&state, Difficulty::Easy)?;
//! assert_eq!(reply.board, Position::Center);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod games;
pub mod opponent;
pub mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, OpponentConfig};

// Crate-level exports - Game types
pub use games::hyperxo::{
    ActiveBoard, GameState, Mark, MetaBoard, Move, MoveError, Player, Position, Square,
    StateError, Status, SubBoard, apply_move, is_terminal, legal_moves, new_game, winner,
};

// Crate-level exports - Opponent
pub use opponent::{Difficulty, DifficultyError, Opponent, SearchError, SearchResult, choose};

// Crate-level exports - Session management
pub use session::{
    BoardView, GameSession, LogEntry, MoveView, PlayerId, PlayerType, SessionError, SessionId,
    SessionSnapshot,
};

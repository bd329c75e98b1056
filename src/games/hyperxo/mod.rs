//! Hyper (ultimate) tic-tac-toe rules engine.

mod action;
pub mod contracts;
mod engine;
pub mod invariants;
mod position;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use engine::{apply_move, is_terminal, legal_moves, new_game, winner};
pub use position::Position;
pub use types::{ActiveBoard, GameState, MetaBoard, Player, Square, StateError, Status, SubBoard};

/// Alias for clarity in session management.
pub type Mark = Player;

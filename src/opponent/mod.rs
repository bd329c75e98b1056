//! Search-based computer opponent.
//!
//! The opponent is a pure function of the state it is given: it explores
//! private copies, keeps nothing between calls and returns one of the
//! state's legal moves.

mod difficulty;
pub mod eval;
mod minimax;
pub mod tt;
pub mod zobrist;

pub use difficulty::{Difficulty, DifficultyError};
pub use minimax::SearchResult;

use crate::config::OpponentConfig;
use crate::games::hyperxo::{GameState, Move};
use derive_getters::Getters;
use minimax::Searcher;
use tracing::{info, instrument, warn};

/// Default cap on transposition table entries.
pub const DEFAULT_TT_CAPACITY: usize = 1 << 18;

/// Errors from the opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SearchError {
    /// The state is terminal or has no legal moves.
    #[display("No legal moves available")]
    NoLegalMoves,
}

impl std::error::Error for SearchError {}

/// A minimax player at a fixed difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Opponent {
    /// Search depth tier.
    difficulty: Difficulty,
    /// Stop after this many nodes and fall back to the last finished depth.
    node_budget: Option<u64>,
    /// Transposition table entry cap.
    tt_capacity: usize,
}

impl Opponent {
    /// Creates an unbounded opponent at the given difficulty.
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            node_budget: None,
            tt_capacity: DEFAULT_TT_CAPACITY,
        }
    }

    /// Creates an opponent from configuration.
    pub fn from_config(config: &OpponentConfig) -> Self {
        Self {
            difficulty: *config.difficulty(),
            node_budget: *config.node_budget(),
            tt_capacity: *config.tt_capacity(),
        }
    }

    /// Replaces the difficulty tier.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Sets or clears the node budget.
    pub fn with_node_budget(mut self, node_budget: Option<u64>) -> Self {
        self.node_budget = node_budget;
        self
    }

    /// Picks a move for the side to move.
    pub fn choose(&self, state: &GameState) -> Result<Move, SearchError> {
        self.analyze(state).map(|result| result.best_move)
    }

    /// Searches the state and reports the chosen move with its score.
    #[instrument(skip(self, state), fields(difficulty = %self.difficulty, player = %state.current_player()))]
    pub fn analyze(&self, state: &GameState) -> Result<SearchResult, SearchError> {
        let moves = state.legal_moves();
        if moves.is_empty() {
            warn!(status = ?state.status(), "Search requested with no legal moves");
            return Err(SearchError::NoLegalMoves);
        }

        let mut searcher = Searcher::new(state.current_player(), self.tt_capacity, self.node_budget);
        let result = searcher.run(state, &moves, self.difficulty.depth());

        info!(
            best_move = %result.best_move,
            score = result.score,
            depth = result.depth,
            nodes = result.nodes,
            "Opponent chose move"
        );
        Ok(result)
    }
}

impl Default for Opponent {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

/// Picks a move at the given difficulty.
pub fn choose(state: &GameState, difficulty: Difficulty) -> Result<Move, SearchError> {
    Opponent::new(difficulty).choose(state)
}

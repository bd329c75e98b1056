//! Transposition table for the minimax search.
//!
//! Lives for a single search so the opponent keeps no state between moves.

use crate::games::hyperxo::Move;
use std::collections::HashMap;

/// How a stored score relates to the true minimax value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The score is the exact value.
    Exact,
    /// The true value is at least the score.
    Lower,
    /// The true value is at most the score.
    Upper,
}

/// A stored search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// Remaining depth the node was searched to.
    pub depth: u8,
    /// Distance from the root; terminal scores depend on it.
    pub ply: u8,
    /// Score from the root player's perspective.
    pub score: i32,
    /// Kind of bound `score` represents.
    pub bound: Bound,
    /// Best move found, used first when the node is searched again.
    pub best_move: Option<Move>,
}

/// Hash-keyed table with a fixed entry cap.
#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: HashMap<u64, TTEntry>,
    capacity: usize,
}

impl TranspositionTable {
    /// Creates a table that holds at most `capacity` positions.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity,
        }
    }

    /// Looks up a position.
    pub fn probe(&self, hash: u64) -> Option<&TTEntry> {
        self.entries.get(&hash)
    }

    /// Stores or replaces a position. New positions are dropped once full.
    pub fn store(&mut self, hash: u64, entry: TTEntry) {
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&hash) {
            return;
        }
        self.entries.insert(hash, entry);
    }

    /// Number of stored positions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

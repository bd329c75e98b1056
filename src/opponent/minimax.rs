//! Depth-limited alpha-beta minimax with iterative deepening.
//!
//! The root always walks the legal moves in engine order (sub-board, then
//! cell) and only replaces its best move on a strictly greater score, so
//! the chosen move is the first best move plain minimax would find.
//! Ordering and the transposition table only apply below the root, where
//! they change how much is searched but not the values returned.

use super::eval::{WIN, evaluate, move_priority, terminal_score};
use super::tt::{Bound, TTEntry, TranspositionTable};
use super::zobrist::{self, ZobristTable};
use crate::games::hyperxo::{GameState, Move, Player};
use serde::Serialize;
use std::cmp::Reverse;
use tracing::{debug, instrument, warn};

/// Bound wider than any reachable score.
const INF: i32 = WIN + 1;

/// Outcome of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// The chosen move, always one of the root's legal moves.
    pub best_move: Move,
    /// Its score from the mover's perspective.
    pub score: i32,
    /// Deepest iteration that completed.
    pub depth: u8,
    /// Nodes visited over all iterations.
    pub nodes: u64,
}

/// Root iteration result.
enum Iteration {
    Complete(Move, i32),
    Aborted(Option<(Move, i32)>),
}

/// Per-search state. Built fresh for every call.
pub(crate) struct Searcher {
    root_player: Player,
    zobrist: &'static ZobristTable,
    tt: TranspositionTable,
    nodes: u64,
    node_budget: Option<u64>,
    aborted: bool,
}

impl Searcher {
    pub(crate) fn new(root_player: Player, tt_capacity: usize, node_budget: Option<u64>) -> Self {
        Self {
            root_player,
            zobrist: zobrist::table(),
            tt: TranspositionTable::new(tt_capacity),
            nodes: 0,
            node_budget,
            aborted: false,
        }
    }

    /// Searches `state` to `max_depth` plies.
    ///
    /// `root_moves` must be the non-empty legal moves of `state`.
    #[instrument(skip(self, state, root_moves), fields(moves = root_moves.len()))]
    pub(crate) fn run(&mut self, state: &GameState, root_moves: &[Move], max_depth: u8) -> SearchResult {
        let root_hash = self.zobrist.hash(state);
        let mut completed: Option<(Move, i32, u8)> = None;
        let mut partial: Option<(Move, i32)> = None;

        for depth in 1..=max_depth.max(1) {
            match self.search_root(state, root_hash, root_moves, depth) {
                Iteration::Complete(mov, score) => {
                    debug!(depth, %mov, score, nodes = self.nodes, "Iteration complete");
                    completed = Some((mov, score, depth));
                }
                Iteration::Aborted(best) => {
                    warn!(depth, nodes = self.nodes, "Node budget exhausted");
                    partial = best;
                    break;
                }
            }
        }

        let (best_move, score, depth) = completed
            .or_else(|| partial.map(|(mov, score)| (mov, score, 0)))
            .unwrap_or((root_moves[0], 0, 0));

        SearchResult {
            best_move,
            score,
            depth,
            nodes: self.nodes,
        }
    }

    fn search_root(&mut self, state: &GameState, hash: u64, moves: &[Move], depth: u8) -> Iteration {
        let mut alpha = -INF;
        let mut best: Option<(Move, i32)> = None;

        for &mov in moves {
            let mut child = *state;
            child.place(mov);
            let child_hash = self.zobrist.update(hash, state, mov, &child);
            let score = self.minimax(&child, child_hash, depth - 1, 1, alpha, INF);
            if self.aborted {
                return Iteration::Aborted(best);
            }
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((mov, score));
            }
            alpha = alpha.max(score);
        }

        match best {
            Some((mov, score)) => Iteration::Complete(mov, score),
            None => Iteration::Aborted(None),
        }
    }

    fn minimax(
        &mut self,
        state: &GameState,
        hash: u64,
        depth: u8,
        ply: u8,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;
        if self.node_budget.is_some_and(|budget| self.nodes > budget) {
            self.aborted = true;
            return 0;
        }

        if let Some(score) = terminal_score(state.status(), self.root_player, ply) {
            return score;
        }
        if depth == 0 {
            return evaluate(state, self.root_player);
        }

        let mut hint = None;
        if let Some(entry) = self.tt.probe(hash) {
            hint = entry.best_move;
            if entry.depth == depth && entry.ply == ply {
                match entry.bound {
                    Bound::Exact => return entry.score,
                    Bound::Lower => alpha = alpha.max(entry.score),
                    Bound::Upper => beta = beta.min(entry.score),
                }
                if alpha >= beta {
                    return entry.score;
                }
            }
        }
        let (window_alpha, window_beta) = (alpha, beta);

        let mut moves = state.legal_moves();
        moves.sort_by_key(|mov| Reverse((Some(*mov) == hint, move_priority(state, mov))));

        let maximizing = state.current_player() == self.root_player;
        let mut value = if maximizing { -INF } else { INF };
        let mut best_move = None;

        for mov in moves {
            let mut child = *state;
            child.place(mov);
            let child_hash = self.zobrist.update(hash, state, mov, &child);
            let score = self.minimax(&child, child_hash, depth - 1, ply + 1, alpha, beta);
            if self.aborted {
                return 0;
            }

            if maximizing {
                if score > value {
                    value = score;
                    best_move = Some(mov);
                }
                alpha = alpha.max(value);
            } else {
                if score < value {
                    value = score;
                    best_move = Some(mov);
                }
                beta = beta.min(value);
            }
            if alpha >= beta {
                break;
            }
        }

        let bound = if value <= window_alpha {
            Bound::Upper
        } else if value >= window_beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.tt.store(
            hash,
            TTEntry {
                depth,
                ply,
                score: value,
                bound,
                best_move,
            },
        );

        value
    }
}

//! Zobrist hashing for transposition lookups.
//!
//! Keys come from a fixed-seed generator so hashes are reproducible across
//! runs. Sub-board statuses are functions of the squares and need no keys.

use crate::games::hyperxo::{ActiveBoard, GameState, Move, Player, Position, Square};
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64;
use std::sync::OnceLock;

const SEED: u64 = 0x4859_5045_5258_4f21;

/// Random keys for every (player, board, cell), the side to move and the
/// active board.
#[derive(Debug, Clone)]
pub struct ZobristTable {
    squares: [[u64; 81]; 2],
    o_to_move: u64,
    /// Index 0-8 for a forced board, 9 for any.
    active: [u64; 10],
}

impl ZobristTable {
    /// Builds a table from the given seed.
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);
        let mut squares = [[0u64; 81]; 2];
        for player in squares.iter_mut() {
            for key in player.iter_mut() {
                *key = rng.next_u64();
            }
        }
        let o_to_move = rng.next_u64();
        let mut active = [0u64; 10];
        for key in active.iter_mut() {
            *key = rng.next_u64();
        }
        Self {
            squares,
            o_to_move,
            active,
        }
    }

    fn square_key(&self, player: Player, board: Position, cell: Position) -> u64 {
        let side = match player {
            Player::X => 0,
            Player::O => 1,
        };
        self.squares[side][board.to_index() * 9 + cell.to_index()]
    }

    fn active_key(&self, active: ActiveBoard) -> u64 {
        match active {
            ActiveBoard::Any => self.active[9],
            ActiveBoard::Only(pos) => self.active[pos.to_index()],
        }
    }

    /// Computes the hash of a state from scratch.
    pub fn hash(&self, state: &GameState) -> u64 {
        let mut hash = self.active_key(state.active_board());
        if state.current_player() == Player::O {
            hash ^= self.o_to_move;
        }
        for board in Position::ALL {
            for cell in Position::ALL {
                if let Square::Occupied(player) = state.board().get(board, cell) {
                    hash ^= self.square_key(player, board, cell);
                }
            }
        }
        hash
    }

    /// Derives the hash of `after`, the result of playing `mov` on `before`.
    pub fn update(&self, hash: u64, before: &GameState, mov: Move, after: &GameState) -> u64 {
        hash ^ self.square_key(mov.player, mov.board, mov.cell)
            ^ self.o_to_move
            ^ self.active_key(before.active_board())
            ^ self.active_key(after.active_board())
    }
}

/// The process-wide table built from the fixed seed.
pub fn table() -> &'static ZobristTable {
    static TABLE: OnceLock<ZobristTable> = OnceLock::new();
    TABLE.get_or_init(|| ZobristTable::new(SEED))
}

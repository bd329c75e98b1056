//! Game engine operations for hyper tic-tac-toe.
//!
//! Every operation takes a state by reference and, where the game changes,
//! returns a new [`GameState`]. The caller's value is never modified.

use super::action::{Move, MoveError};
use super::contracts::{Contract, LegalMove, MoveContract};
use super::{ActiveBoard, GameState, Player, Position};
use tracing::{debug, instrument, warn};

impl GameState {
    /// Sub-boards the side to move may play in, in index order.
    ///
    /// Empty once the game is over.
    pub fn playable_boards(&self) -> Vec<Position> {
        if self.status().is_terminal() {
            return Vec::new();
        }
        match self.active_board() {
            ActiveBoard::Only(pos) if self.board().sub_board(pos).is_open() => vec![pos],
            _ => Position::ALL
                .into_iter()
                .filter(|&pos| self.board().sub_board(pos).is_open())
                .collect(),
        }
    }

    /// All legal moves for the side to move.
    ///
    /// Ordered by sub-board index, then cell index. This order is the
    /// tie-break order used by the opponent.
    pub fn legal_moves(&self) -> Vec<Move> {
        let player = self.current_player();
        self.playable_boards()
            .into_iter()
            .flat_map(|board| {
                self.board()
                    .sub_board(board)
                    .empty_positions()
                    .map(move |cell| Move::new(player, board, cell))
            })
            .collect()
    }

    /// Checks a move against every precondition.
    pub fn is_legal(&self, mov: &Move) -> bool {
        LegalMove::check(mov, self).is_ok()
    }

    /// Applies a move, returning the resulting state.
    ///
    /// Fails without side effects if the move is illegal. On success the
    /// next player is sent to the sub-board matching the cell just played,
    /// or anywhere if that sub-board is already closed.
    #[instrument(skip(self), fields(player = %mov.player, board = mov.board.to_index(), cell = mov.cell.to_index()))]
    pub fn apply_move(&self, mov: Move) -> Result<GameState, MoveError> {
        MoveContract::pre(self, &mov).inspect_err(|e| {
            warn!(error = %e, "Rejected illegal move");
        })?;

        let mut next = *self;
        next.place(mov);

        #[cfg(debug_assertions)]
        MoveContract::post(self, &next)?;

        debug!(
            status = ?next.status(),
            active = ?next.active_board(),
            "Move applied"
        );
        Ok(next)
    }

    /// Places a mark for the side to move.
    pub fn play(&self, board: Position, cell: Position) -> Result<GameState, MoveError> {
        self.apply_move(Move::new(self.current_player(), board, cell))
    }

    /// True once the game is won or drawn.
    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    /// The winner, if the game has one.
    pub fn winner(&self) -> Option<Player> {
        self.status().winner()
    }

    /// Replays moves from the empty board.
    #[instrument(skip(moves), fields(count = moves.len()))]
    pub fn replay(moves: &[Move]) -> Result<GameState, MoveError> {
        moves
            .iter()
            .try_fold(GameState::new(), |state, &mov| state.apply_move(mov))
    }
}

/// Creates an empty game.
pub fn new_game() -> GameState {
    GameState::new()
}

/// Legal moves for the side to move, in sub-board then cell order.
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    state.legal_moves()
}

/// Applies `player`'s mark at `cell` of sub-board `board` (indices 0-8).
pub fn apply_move(
    state: &GameState,
    board: usize,
    cell: usize,
    player: Player,
) -> Result<GameState, MoveError> {
    state.apply_move(Move::from_indices(player, board, cell)?)
}

/// True once the game is won or drawn.
pub fn is_terminal(state: &GameState) -> bool {
    state.is_terminal()
}

/// The winner, if the game has one.
pub fn winner(state: &GameState) -> Option<Player> {
    state.winner()
}

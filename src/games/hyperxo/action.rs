//! First-class action types for hyper tic-tac-toe.
//!
//! Moves are domain events, not side effects. They carry the player's
//! intent and are validated against a state before they are applied.

use super::{Player, Position};
use serde::{Deserialize, Serialize};

/// A move: a player placing their mark at `cell` inside sub-board `board`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The sub-board being played in.
    pub board: Position,
    /// The cell within that sub-board.
    pub cell: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, board: Position, cell: Position) -> Self {
        Self {
            player,
            board,
            cell,
        }
    }

    /// Creates a move from raw indices, rejecting anything outside 0-8.
    pub fn from_indices(player: Player, board: usize, cell: usize) -> Result<Self, MoveError> {
        let board = Position::from_index(board).ok_or(MoveError::OutOfRange(board))?;
        let cell = Position::from_index(cell).ok_or(MoveError::OutOfRange(cell))?;
        Ok(Self::new(player, board, cell))
    }

    /// Returns the `(board, cell)` index pair.
    pub fn indices(&self) -> (usize, usize) {
        (self.board.to_index(), self.cell.to_index())
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} / {}", self.player, self.board.label(), self.cell.label())
    }
}

/// Reasons a move is illegal in a given state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// It's not this player's turn.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(Player),

    /// The move ignores the sub-board the player was sent to.
    #[display("Must play in {} board, not {}", expected, got)]
    WrongBoard {
        /// The sub-board the player is confined to.
        expected: Position,
        /// The sub-board the move targeted.
        got: Position,
    },

    /// The sub-board is already won or drawn.
    #[display("Board {} is already closed", _0)]
    BoardClosed(Position),

    /// The square is already occupied.
    #[display("Square {} of board {} is already occupied", _1, _0)]
    SquareOccupied(Position, Position),

    /// A board or cell index outside 0-8.
    #[display("Index {} is out of range (must be 0-8)", _0)]
    OutOfRange(usize),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}

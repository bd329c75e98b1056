//! Core domain types for hyper tic-tac-toe.

use super::action::Move;
use super::invariants::{Invariant, TurnBalanceInvariant};
use super::position::Position;
use super::rules;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// A square on a sub-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }
}

/// Resolution of a sub-board or of the whole game.
///
/// Transitions are monotonic: `InProgress` may become `Won` or `Draw`,
/// and a terminal status never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Still open for play.
    InProgress,
    /// Three in a row for the player.
    Won(Player),
    /// Filled (or every sub-board closed) with no line.
    Draw,
}

impl Status {
    /// True for `Won` and `Draw`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            Status::Won(player) => Some(player),
            _ => None,
        }
    }
}

/// One of the nine inner 3x3 boards.
///
/// The status is cached and rewritten together with every placement, so
/// it always equals [`rules::sub_board_status`] of the squares. On the wire
/// a sub-board is just its nine squares. Squares where both players hold
/// a line are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[Square; 9]", into = "[Square; 9]")]
pub struct SubBoard {
    squares: [Square; 9],
    status: Status,
}

impl SubBoard {
    /// Creates a new empty sub-board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
            status: Status::InProgress,
        }
    }

    /// Builds a sub-board from raw squares, deriving its status.
    ///
    /// Fails with [`StateError::RivalLines`] if both players hold a line.
    pub fn from_squares(squares: [Square; 9]) -> Result<Self, StateError> {
        if rules::check_rival_lines(&squares) {
            return Err(StateError::RivalLines);
        }
        Ok(Self {
            squares,
            status: rules::sub_board_status(&squares),
        })
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Returns the cached status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// True while the sub-board still accepts moves.
    pub fn is_open(&self) -> bool {
        self.status == Status::InProgress
    }

    /// Empty positions in index order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL
            .into_iter()
            .filter(move |&pos| self.is_empty(pos))
    }

    /// Places a mark and refreshes the cached status.
    pub(crate) fn place(&mut self, pos: Position, player: Player) {
        self.squares[pos.to_index()] = Square::Occupied(player);
        self.status = rules::sub_board_status(&self.squares);
    }
}

impl Default for SubBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<[Square; 9]> for SubBoard {
    type Error = StateError;

    fn try_from(squares: [Square; 9]) -> Result<Self, Self::Error> {
        Self::from_squares(squares)
    }
}

impl From<SubBoard> for [Square; 9] {
    fn from(board: SubBoard) -> Self {
        board.squares
    }
}

/// The 3x3 grid of sub-boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[SubBoard; 9]", into = "[SubBoard; 9]")]
pub struct MetaBoard {
    boards: [SubBoard; 9],
}

impl MetaBoard {
    /// Creates a meta-board of nine empty sub-boards.
    pub fn new() -> Self {
        Self {
            boards: [SubBoard::new(); 9],
        }
    }

    /// Builds a meta-board from nine sub-boards.
    ///
    /// Fails with [`StateError::RivalMetaLines`] if both players hold a line
    /// of won sub-boards.
    pub fn from_sub_boards(boards: [SubBoard; 9]) -> Result<Self, StateError> {
        if rules::check_meta_rival_lines(&boards) {
            return Err(StateError::RivalMetaLines);
        }
        Ok(Self { boards })
    }

    /// Returns the sub-board at the given position.
    pub fn sub_board(&self, pos: Position) -> &SubBoard {
        &self.boards[pos.to_index()]
    }

    /// Returns all sub-boards in row-major order.
    pub fn sub_boards(&self) -> &[SubBoard; 9] {
        &self.boards
    }

    /// Gets the square at `cell` inside the sub-board at `board`.
    pub fn get(&self, board: Position, cell: Position) -> Square {
        self.sub_board(board).get(cell)
    }

    /// Overall status computed from the sub-board statuses.
    pub fn status(&self) -> Status {
        rules::meta_status(&self.boards)
    }

    /// Counts squares occupied by the player across all sub-boards.
    pub fn count(&self, player: Player) -> usize {
        self.boards
            .iter()
            .flat_map(|b| b.squares().iter())
            .filter(|&&s| s == Square::Occupied(player))
            .count()
    }

    pub(crate) fn sub_board_mut(&mut self, pos: Position) -> &mut SubBoard {
        &mut self.boards[pos.to_index()]
    }
}

impl TryFrom<[SubBoard; 9]> for MetaBoard {
    type Error = StateError;

    fn try_from(boards: [SubBoard; 9]) -> Result<Self, Self::Error> {
        Self::from_sub_boards(boards)
    }
}

impl From<MetaBoard> for [SubBoard; 9] {
    fn from(board: MetaBoard) -> Self {
        board.boards
    }
}

impl Default for MetaBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MetaBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for big_row in 0..3 {
            if big_row > 0 {
                writeln!(f, "======++=======++======")?;
            }
            for small_row in 0..3 {
                let blocks: Vec<String> = (0..3)
                    .map(|big_col| {
                        let board = &self.boards[big_row * 3 + big_col];
                        (0..3)
                            .map(|i| match board.squares[small_row * 3 + i] {
                                Square::Empty => " ".to_string(),
                                Square::Occupied(p) => p.to_string(),
                            })
                            .collect::<Vec<_>>()
                            .join("|")
                    })
                    .collect();
                writeln!(f, "{}", blocks.join(" || "))?;
            }
        }
        Ok(())
    }
}

/// Which sub-board the side to move may play in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActiveBoard {
    /// Any sub-board that is still in progress.
    Any,
    /// Only this sub-board, which is in progress.
    Only(Position),
}

impl ActiveBoard {
    /// Returns the forced sub-board, if any.
    pub fn position(self) -> Option<Position> {
        match self {
            ActiveBoard::Any => None,
            ActiveBoard::Only(pos) => Some(pos),
        }
    }
}

/// Reasons a deserialized or hand-built state is rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum StateError {
    /// The stored game status differs from the one derived from the squares.
    #[display("Stored status {stored:?} does not match derived status {derived:?}")]
    StatusMismatch {
        /// Status carried by the input.
        stored: Status,
        /// Status computed from the squares.
        derived: Status,
    },

    /// The active sub-board is already won or drawn.
    #[display("Active board {} is already closed", _0)]
    ActiveBoardClosed(Position),

    /// Both players hold a line on the same sub-board.
    #[display("Both players hold a line on one sub-board")]
    RivalLines,

    /// Both players hold a line of won sub-boards.
    #[display("Both players hold a line of sub-boards")]
    RivalMetaLines,

    /// Mark counts don't fit alternating turns starting with X.
    #[display("{x} X marks and {o} O marks with {to_move} to move")]
    TurnImbalance {
        /// Marks placed by X.
        x: usize,
        /// Marks placed by O.
        o: usize,
        /// Side to move carried by the input.
        to_move: Player,
    },
}

impl std::error::Error for StateError {}

/// Complete game state: the sole unit of truth.
///
/// `GameState` is `Copy`; every operation that changes the game returns a
/// new value, so a caller's copy is never disturbed by search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGameState")]
pub struct GameState {
    board: MetaBoard,
    to_move: Player,
    active: ActiveBoard,
    status: Status,
}

impl GameState {
    /// Creates an empty game with X to move anywhere.
    pub fn new() -> Self {
        Self {
            board: MetaBoard::new(),
            to_move: Player::X,
            active: ActiveBoard::Any,
            status: Status::InProgress,
        }
    }

    /// Builds a state from an arbitrary position.
    ///
    /// The game status is derived from the board and an active sub-board
    /// that is already closed relaxes to [`ActiveBoard::Any`]. Mark counts
    /// are not checked, so puzzle positions can be set up directly;
    /// deserialization rejects them.
    pub fn from_position(board: MetaBoard, to_move: Player, active: ActiveBoard) -> Self {
        let active = match active {
            ActiveBoard::Only(pos) if !board.sub_board(pos).is_open() => ActiveBoard::Any,
            other => other,
        };
        Self {
            status: board.status(),
            board,
            to_move,
            active,
        }
    }

    /// Returns the meta-board.
    pub fn board(&self) -> &MetaBoard {
        &self.board
    }

    /// Returns the player to move.
    pub fn current_player(&self) -> Player {
        self.to_move
    }

    /// Returns the active sub-board constraint.
    pub fn active_board(&self) -> ActiveBoard {
        self.active
    }

    /// Returns the game status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Applies a move without validation.
    ///
    /// Callers must only pass moves produced by `legal_moves` on this state.
    pub(crate) fn place(&mut self, mv: Move) {
        self.board.sub_board_mut(mv.board).place(mv.cell, mv.player);
        self.status = self.board.status();
        self.to_move = mv.player.opponent();
        self.active = if self.board.sub_board(mv.cell).is_open() {
            ActiveBoard::Only(mv.cell)
        } else {
            ActiveBoard::Any
        };
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

/// Unvalidated wire form of [`GameState`].
#[derive(Deserialize)]
struct RawGameState {
    board: MetaBoard,
    to_move: Player,
    active: ActiveBoard,
    status: Status,
}

impl TryFrom<RawGameState> for GameState {
    type Error = StateError;

    fn try_from(raw: RawGameState) -> Result<Self, Self::Error> {
        let derived = raw.board.status();
        if derived != raw.status {
            return Err(StateError::StatusMismatch {
                stored: raw.status,
                derived,
            });
        }
        if let ActiveBoard::Only(pos) = raw.active
            && !raw.board.sub_board(pos).is_open()
        {
            return Err(StateError::ActiveBoardClosed(pos));
        }
        let state = Self {
            board: raw.board,
            to_move: raw.to_move,
            active: raw.active,
            status: raw.status,
        };
        if !TurnBalanceInvariant::holds(&state) {
            return Err(StateError::TurnImbalance {
                x: state.board.count(Player::X),
                o: state.board.count(Player::O),
                to_move: state.to_move,
            });
        }
        Ok(state)
    }
}

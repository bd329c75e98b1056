//! Game session management.
//!
//! A session binds two opaque player identities to the X and O marks,
//! routes their moves through the engine, optionally drives a computer
//! opponent, and keeps the move log. Transport and serialization of the
//! resulting [`SessionSnapshot`] are up to the caller.

use crate::games::hyperxo::{GameState, Mark, Move, MoveError, Position, Square, Status};
use crate::opponent::{Difficulty, Opponent, SearchError};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// Unique identifier for a player.
pub type PlayerId = String;

/// Type of player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerType {
    /// Human player submitting moves.
    Human,
    /// Built-in minimax opponent.
    Computer,
}

/// A player in a game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Player's unique ID.
    pub id: PlayerId,
    /// Player's name.
    pub name: String,
    /// Type of player.
    pub player_type: PlayerType,
    /// Which mark this player uses (X or O).
    pub mark: Mark,
}

/// Errors from session operations.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum SessionError {
    /// No player with this ID is registered.
    #[display("Unknown player {}", _0)]
    UnknownPlayer(PlayerId),

    /// Both marks are taken.
    #[display("Session already has 2 players")]
    SessionFull,

    /// The player tried to move out of turn.
    #[display("Not your turn. Waiting for player {}", _0)]
    NotYourTurn(Mark),

    /// The engine rejected the move.
    #[display("Invalid move: {}", _0)]
    #[from]
    IllegalMove(MoveError),

    /// The opponent could not produce a move.
    #[display("Opponent failed: {}", _0)]
    #[from]
    Search(SearchError),
}

impl std::error::Error for SessionError {}

/// A game session with two players.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Session ID.
    pub id: SessionId,
    state: GameState,
    history: Vec<Move>,
    player_x: Option<Player>,
    player_o: Option<Player>,
    opponent: Option<Opponent>,
}

impl GameSession {
    /// Creates a new game session.
    #[instrument]
    pub fn new(id: SessionId) -> Self {
        info!(session_id = %id, "Creating new game session");
        Self {
            id,
            state: GameState::new(),
            history: Vec::new(),
            player_x: None,
            player_o: None,
            opponent: None,
        }
    }

    /// Creates a session where a human plays X against the computer as O.
    #[instrument(skip(human_name))]
    pub fn against_computer(
        id: SessionId,
        human_id: PlayerId,
        human_name: String,
        opponent: Opponent,
    ) -> Result<Self, SessionError> {
        let difficulty = *opponent.difficulty();
        let mut session = Self::new(id);
        session.register_player(human_id, human_name, PlayerType::Human)?;
        session.register_player(
            format!("computer-{}", difficulty),
            format!("Computer ({})", difficulty),
            PlayerType::Computer,
        )?;
        session.opponent = Some(opponent);
        Ok(session)
    }

    /// Returns the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the moves played so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Difficulty of the computer opponent, if there is one.
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.opponent.as_ref().map(|o| *o.difficulty())
    }

    /// Registers a player in the session.
    /// Returns the mark assigned to the player (X or O).
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn register_player(
        &mut self,
        id: PlayerId,
        name: String,
        player_type: PlayerType,
    ) -> Result<Mark, SessionError> {
        let mark = if self.player_x.is_none() {
            Mark::X
        } else if self.player_o.is_none() {
            Mark::O
        } else {
            warn!(player_id = %id, "Session already has 2 players");
            return Err(SessionError::SessionFull);
        };

        info!(player_id = %id, %mark, "Registering player");
        let player = Player {
            id,
            name,
            player_type,
            mark,
        };
        match mark {
            Mark::X => self.player_x = Some(player),
            Mark::O => self.player_o = Some(player),
        }
        Ok(mark)
    }

    /// Gets the player with the given ID.
    pub fn get_player(&self, player_id: &str) -> Option<&Player> {
        [&self.player_x, &self.player_o]
            .into_iter()
            .flatten()
            .find(|p| p.id == player_id)
    }

    /// Gets the player holding the given mark.
    pub fn player_for(&self, mark: Mark) -> Option<&Player> {
        match mark {
            Mark::X => self.player_x.as_ref(),
            Mark::O => self.player_o.as_ref(),
        }
    }

    /// Checks if it's the given player's turn.
    pub fn is_players_turn(&self, player_id: &str) -> bool {
        let Some(player) = self.get_player(player_id) else {
            debug!(player_id, "Player not found in session");
            return false;
        };
        player.mark == self.state.current_player()
    }

    /// Makes a move for the given player.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn make_move(
        &mut self,
        player_id: &str,
        board: usize,
        cell: usize,
    ) -> Result<GameState, SessionError> {
        let player = self.get_player(player_id).ok_or_else(|| {
            warn!(player_id, "Unknown player attempted move");
            SessionError::UnknownPlayer(player_id.to_string())
        })?;

        if player.mark != self.state.current_player() {
            warn!(
                player_id,
                expected_mark = %self.state.current_player(),
                player_mark = %player.mark,
                "Player tried to move out of turn"
            );
            return Err(SessionError::NotYourTurn(self.state.current_player()));
        }

        let mov = Move::from_indices(player.mark, board, cell)?;
        self.commit(mov)
    }

    /// Lets the computer move if it holds the side to move.
    ///
    /// Returns `Ok(None)` when it is not the computer's turn or the game is over.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn play_computer_turn(&mut self) -> Result<Option<Move>, SessionError> {
        if self.state.is_terminal() {
            return Ok(None);
        }
        let to_move = self.state.current_player();
        let is_computer = self
            .player_for(to_move)
            .is_some_and(|p| p.player_type == PlayerType::Computer);
        let Some(opponent) = self.opponent.as_ref().filter(|_| is_computer) else {
            return Ok(None);
        };

        let mov = opponent.choose(&self.state)?;
        self.commit(mov)?;
        Ok(Some(mov))
    }

    fn commit(&mut self, mov: Move) -> Result<GameState, SessionError> {
        self.state = self.state.apply_move(mov).inspect_err(|e| {
            warn!(%mov, error = %e, "Invalid move");
        })?;
        self.history.push(mov);

        info!(%mov, status = ?self.state.status(), "Move completed successfully");
        Ok(self.state)
    }

    /// Serializable view of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        let boards = self
            .state
            .board()
            .sub_boards()
            .iter()
            .enumerate()
            .map(|(index, b)| BoardView {
                index,
                cells: b.squares().map(Square::player),
                winner: b.status().winner(),
                drawn: b.status() == Status::Draw,
            })
            .collect();

        let available_moves: Vec<MoveView> =
            self.state.legal_moves().iter().map(MoveView::from).collect();

        SessionSnapshot {
            id: self.id.clone(),
            current_player: self.state.current_player(),
            next_board_index: self.state.active_board().position().map(Position::to_index),
            winner: self.state.winner(),
            drawn: self.state.status() == Status::Draw,
            boards,
            available_boards: self
                .state
                .playable_boards()
                .into_iter()
                .map(Position::to_index)
                .collect(),
            available_moves,
            move_log: self.history.iter().map(LogEntry::from).collect(),
            last_move: self.history.last().map(LogEntry::from),
        }
    }
}

/// One sub-board in a [`SessionSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    /// Sub-board index (0-8).
    pub index: usize,
    /// Occupant of each cell.
    pub cells: [Option<Mark>; 9],
    /// Winner of the sub-board.
    pub winner: Option<Mark>,
    /// True if the sub-board is drawn.
    pub drawn: bool,
}

/// A `(board, cell)` index pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveView {
    /// Sub-board index (0-8).
    pub board: usize,
    /// Cell index (0-8).
    pub cell: usize,
}

impl From<&Move> for MoveView {
    fn from(mov: &Move) -> Self {
        let (board, cell) = mov.indices();
        Self { board, cell }
    }
}

/// A played move in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Mark that moved.
    pub player: Mark,
    /// Sub-board index (0-8).
    pub board_index: usize,
    /// Cell index (0-8).
    pub cell_index: usize,
}

impl From<&Move> for LogEntry {
    fn from(mov: &Move) -> Self {
        let (board_index, cell_index) = mov.indices();
        Self {
            player: mov.player,
            board_index,
            cell_index,
        }
    }
}

/// Transport-neutral view of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Session ID.
    pub id: SessionId,
    /// Mark to move.
    pub current_player: Mark,
    /// Forced sub-board, if any.
    pub next_board_index: Option<usize>,
    /// Winner of the game.
    pub winner: Option<Mark>,
    /// True if the game is drawn.
    pub drawn: bool,
    /// All nine sub-boards.
    pub boards: Vec<BoardView>,
    /// Legal moves for the side to move.
    pub available_moves: Vec<MoveView>,
    /// Sub-boards containing a legal move.
    pub available_boards: Vec<usize>,
    /// Moves played so far.
    pub move_log: Vec<LogEntry>,
    /// The most recent move.
    pub last_move: Option<LogEntry>,
}

//! Contract-based validation for hyper tic-tac-toe.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::{Move, MoveError};
use super::invariants::{InvariantSet, TransitionInvariants};
use super::{ActiveBoard, GameState, Position, Square};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: The game must still be in progress.
pub struct GameNotOver;

impl GameNotOver {
    /// Fails with [`MoveError::GameOver`] on a terminal state.
    #[instrument(skip(state))]
    pub fn check(_mov: &Move, state: &GameState) -> Result<(), MoveError> {
        if state.status().is_terminal() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: It must be the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails with [`MoveError::WrongPlayer`] when the mark is not the side to move.
    #[instrument(skip(state))]
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        if mov.player != state.current_player() {
            Err(MoveError::WrongPlayer(mov.player))
        } else {
            Ok(())
        }
    }
}

/// Precondition: The move must respect the board the player was sent to.
pub struct BoardIsActive;

impl BoardIsActive {
    /// Fails with [`MoveError::WrongBoard`] when confined elsewhere.
    #[instrument(skip(state))]
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        match state.active_board() {
            ActiveBoard::Only(expected) if expected != mov.board => Err(MoveError::WrongBoard {
                expected,
                got: mov.board,
            }),
            _ => Ok(()),
        }
    }
}

/// Precondition: The target sub-board must not be won or drawn.
pub struct BoardIsOpen;

impl BoardIsOpen {
    /// Fails with [`MoveError::BoardClosed`] on a terminal sub-board.
    #[instrument(skip(state))]
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        if state.board().sub_board(mov.board).is_open() {
            Ok(())
        } else {
            Err(MoveError::BoardClosed(mov.board))
        }
    }
}

/// Precondition: The target square must be empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Fails with [`MoveError::SquareOccupied`] on a taken square.
    #[instrument(skip(state))]
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        if state.board().sub_board(mov.board).is_empty(mov.cell) {
            Ok(())
        } else {
            Err(MoveError::SquareOccupied(mov.board, mov.cell))
        }
    }
}

/// Composite precondition: every check above, in order.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(state))]
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        GameNotOver::check(mov, state)?;
        PlayersTurn::check(mov, state)?;
        BoardIsActive::check(mov, state)?;
        BoardIsOpen::check(mov, state)?;
        SquareIsEmpty::check(mov, state)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions: [`LegalMove`].
///
/// Postconditions:
/// - Exactly one square changed, and it was empty before
/// - Cached statuses match a fresh recomputation
/// - The active board, when forced, is still in progress
pub struct MoveContract;

impl Contract<GameState, Move> for MoveContract {
    fn pre(state: &GameState, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, state)
    }

    #[instrument(skip_all)]
    fn post(before: &GameState, after: &GameState) -> Result<(), MoveError> {
        let changed: Vec<(Position, Position)> = Position::ALL
            .iter()
            .flat_map(|&b| Position::ALL.iter().map(move |&c| (b, c)))
            .filter(|&(b, c)| before.board().get(b, c) != after.board().get(b, c))
            .collect();

        match changed.as_slice() {
            [(b, c)] if before.board().get(*b, *c) == Square::Empty => {}
            _ => {
                warn!(changed = changed.len(), "Board monotonicity violated");
                return Err(MoveError::InvariantViolation(format!(
                    "Postcondition failed: expected one newly filled square, found {} changes",
                    changed.len()
                )));
            }
        }

        TransitionInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hyperxo::{MetaBoard, Player, SubBoard};

    fn mv(player: Player, board: usize, cell: usize) -> Move {
        Move::from_indices(player, board, cell).unwrap()
    }

    #[test]
    fn test_precondition_empty_square() {
        let state = GameState::new();
        assert!(MoveContract::pre(&state, &mv(Player::X, 4, 4)).is_ok());
    }

    #[test]
    fn test_precondition_occupied_square() {
        let state = GameState::new().apply_move(mv(Player::X, 4, 4)).unwrap();
        assert_eq!(
            MoveContract::pre(&state, &mv(Player::O, 4, 4)),
            Err(MoveError::SquareOccupied(Position::Center, Position::Center))
        );
    }

    #[test]
    fn test_precondition_wrong_turn() {
        let state = GameState::new();
        assert_eq!(
            MoveContract::pre(&state, &mv(Player::O, 0, 0)),
            Err(MoveError::WrongPlayer(Player::O))
        );
    }

    #[test]
    fn test_precondition_wrong_board() {
        let state = GameState::new().apply_move(mv(Player::X, 0, 4)).unwrap();
        assert_eq!(
            MoveContract::pre(&state, &mv(Player::O, 0, 0)),
            Err(MoveError::WrongBoard {
                expected: Position::Center,
                got: Position::TopLeft,
            })
        );
    }

    #[test]
    fn test_precondition_closed_board() {
        let x = Square::Occupied(Player::X);
        let e = Square::Empty;
        let mut boards = [SubBoard::new(); 9];
        boards[0] = SubBoard::from_squares([x, x, x, e, e, e, e, e, e]).unwrap();
        let state = GameState::from_position(
            MetaBoard::from_sub_boards(boards).unwrap(),
            Player::O,
            ActiveBoard::Any,
        );
        assert_eq!(
            MoveContract::pre(&state, &mv(Player::O, 0, 4)),
            Err(MoveError::BoardClosed(Position::TopLeft))
        );
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = GameState::new();
        let after = before.apply_move(mv(Player::X, 2, 6)).unwrap();
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_missing_move() {
        let before = GameState::new();
        assert!(matches!(
            MoveContract::post(&before, &before),
            Err(MoveError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_postcondition_detects_double_move() {
        let before = GameState::new();
        let mut after = before;
        after.place(mv(Player::X, 0, 0));
        after.place(mv(Player::O, 0, 1));
        assert!(MoveContract::post(&before, &after).is_err());
    }
}

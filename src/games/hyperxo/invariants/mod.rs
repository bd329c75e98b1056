//! First-class invariants for hyper tic-tac-toe.
//!
//! Invariants are logical properties that must hold throughout game execution.
//! They are testable independently and serve as documentation of system guarantees.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check_one<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        check_one::<S, I3>(state, &mut violations);

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod active_board;
pub mod status_consistent;
pub mod turn_balance;

pub use active_board::ActiveBoardInvariant;
pub use status_consistent::StatusConsistentInvariant;
pub use turn_balance::TurnBalanceInvariant;

/// Invariants every legal transition preserves, whatever the starting position.
pub type TransitionInvariants = (StatusConsistentInvariant, ActiveBoardInvariant);

/// All hyper tic-tac-toe invariants for games played from the empty board.
pub type HyperXoInvariants = (
    StatusConsistentInvariant,
    ActiveBoardInvariant,
    TurnBalanceInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hyperxo::{GameState, Move, Player, Position};

    #[test]
    fn test_invariant_set_holds_for_empty_game() {
        assert!(HyperXoInvariants::check_all(&GameState::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let moves = [
            Move::new(Player::X, Position::TopLeft, Position::Center),
            Move::new(Player::O, Position::Center, Position::TopRight),
            Move::new(Player::X, Position::TopRight, Position::TopLeft),
        ];
        let state = GameState::replay(&moves).expect("valid replay");
        assert!(HyperXoInvariants::check_all(&state).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut state = GameState::new();
        // Two X marks in a row breaks the turn balance.
        state.place(Move::new(Player::X, Position::TopLeft, Position::Center));
        state.place(Move::new(Player::X, Position::Center, Position::Center));

        let violations = HyperXoInvariants::check_all(&state).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].description, TurnBalanceInvariant::description());
    }

    #[test]
    fn test_two_invariants_as_set() {
        assert!(TransitionInvariants::check_all(&GameState::new()).is_ok());
    }
}

//! Status consistency: cached statuses equal a fresh recomputation.

use super::super::rules::{meta_status, sub_board_status};
use super::super::GameState;
use super::Invariant;

/// Invariant: every cached status is a pure function of the squares.
///
/// Each sub-board's status must match [`sub_board_status`] of its squares
/// and the game status must match [`meta_status`] of the sub-boards.
pub struct StatusConsistentInvariant;

impl Invariant<GameState> for StatusConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        let boards = state.board().sub_boards();
        boards
            .iter()
            .all(|b| b.status() == sub_board_status(b.squares()))
            && state.status() == meta_status(boards)
    }

    fn description() -> &'static str {
        "Cached statuses match the squares"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hyperxo::{GameState, Player};

    #[test]
    fn test_holds_through_full_game() {
        let mut state = GameState::new();
        // Always take the last legal move until the game ends.
        while let Some(&mv) = state.legal_moves().last() {
            state = state.apply_move(mv).unwrap();
            assert!(StatusConsistentInvariant::holds(&state));
        }
        assert!(state.is_terminal());
    }

    #[test]
    fn test_empty_game_holds() {
        let state = GameState::new();
        assert!(StatusConsistentInvariant::holds(&state));
        assert_eq!(state.current_player(), Player::X);
    }
}

//! Turn balance invariant: players alternate starting with X.

use super::super::{GameState, Player};
use super::Invariant;

/// Invariant: X has placed the same number of marks as O, or one more,
/// and the side to move follows from that count.
pub struct TurnBalanceInvariant;

impl Invariant<GameState> for TurnBalanceInvariant {
    fn holds(state: &GameState) -> bool {
        let x = state.board().count(Player::X);
        let o = state.board().count(Player::O);
        match x.checked_sub(o) {
            Some(0) => state.current_player() == Player::X,
            Some(1) => state.current_player() == Player::O,
            _ => false,
        }
    }

    fn description() -> &'static str {
        "Players alternate starting with X"
    }
}

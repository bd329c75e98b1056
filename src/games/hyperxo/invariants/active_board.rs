//! Active board invariant: a forced sub-board is always playable.

use super::super::{ActiveBoard, GameState};
use super::Invariant;

/// Invariant: when the side to move is confined to one sub-board,
/// that sub-board is still in progress.
pub struct ActiveBoardInvariant;

impl Invariant<GameState> for ActiveBoardInvariant {
    fn holds(state: &GameState) -> bool {
        match state.active_board() {
            ActiveBoard::Any => true,
            ActiveBoard::Only(pos) => state.board().sub_board(pos).is_open(),
        }
    }

    fn description() -> &'static str {
        "Forced sub-board is still in progress"
    }
}

//! Game rules for hyper tic-tac-toe.
//!
//! Pure functions that resolve a 3x3 grid. The same line logic runs at
//! both levels: over squares for a sub-board, and over sub-board statuses
//! for the meta-board.

pub mod draw;
pub mod win;

pub use draw::{all_closed, is_full};
pub use win::{
    LINES, check_meta_rival_lines, check_meta_winner, check_rival_lines, check_winner, line_winner,
    rival_lines,
};

use super::{Square, Status, SubBoard};

/// Status of a sub-board derived from its squares.
pub fn sub_board_status(squares: &[Square; 9]) -> Status {
    if let Some(winner) = check_winner(squares) {
        Status::Won(winner)
    } else if is_full(squares) {
        Status::Draw
    } else {
        Status::InProgress
    }
}

/// Status of the whole game derived from its sub-boards.
pub fn meta_status(boards: &[SubBoard; 9]) -> Status {
    if let Some(winner) = check_meta_winner(boards) {
        Status::Won(winner)
    } else if all_closed(boards) {
        Status::Draw
    } else {
        Status::InProgress
    }
}

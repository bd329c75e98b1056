//! Win detection shared by sub-boards and the meta-board.

use super::super::{Player, Position, Square, SubBoard};

/// The eight three-in-a-row lines of a 3x3 grid.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

fn line_owner(owner: &impl Fn(Position) -> Option<Player>, [a, b, c]: [Position; 3]) -> Option<Player> {
    let p = owner(a)?;
    (owner(b) == Some(p) && owner(c) == Some(p)).then_some(p)
}

/// Finds the first complete line given an owner for each grid slot.
pub fn line_winner(owner: impl Fn(Position) -> Option<Player>) -> Option<Player> {
    LINES.iter().find_map(|&line| line_owner(&owner, line))
}

/// True if both players own a complete line, which no real game reaches.
pub fn rival_lines(owner: impl Fn(Position) -> Option<Player>) -> bool {
    let owners: Vec<Player> = LINES
        .iter()
        .filter_map(|&line| line_owner(&owner, line))
        .collect();
    owners.contains(&Player::X) && owners.contains(&Player::O)
}

/// Checks if a player has three in a row on a sub-board's squares.
pub fn check_winner(squares: &[Square; 9]) -> Option<Player> {
    line_winner(|pos| squares[pos.to_index()].player())
}

/// Checks a sub-board's squares for lines held by both players.
pub fn check_rival_lines(squares: &[Square; 9]) -> bool {
    rival_lines(|pos| squares[pos.to_index()].player())
}

/// A won sub-board counts as its winner's mark; drawn and open sub-boards
/// count as empty.
fn meta_owner(boards: &[SubBoard; 9], pos: Position) -> Option<Player> {
    boards[pos.to_index()].status().winner()
}

/// Checks for a line of won sub-boards.
pub fn check_meta_winner(boards: &[SubBoard; 9]) -> Option<Player> {
    line_winner(|pos| meta_owner(boards, pos))
}

/// Checks the meta-board for lines of won sub-boards held by both players.
pub fn check_meta_rival_lines(boards: &[SubBoard; 9]) -> bool {
    rival_lines(|pos| meta_owner(boards, pos))
}

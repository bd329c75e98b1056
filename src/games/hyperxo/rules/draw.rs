//! Draw detection for sub-boards and the meta-board.

use super::super::{Square, SubBoard};

/// Checks if every square is occupied.
///
/// A full sub-board with no winner is drawn.
pub fn is_full(squares: &[Square; 9]) -> bool {
    squares.iter().all(|s| *s != Square::Empty)
}

/// Checks if every sub-board is won or drawn.
///
/// With no meta line completed this makes the whole game a draw.
pub fn all_closed(boards: &[SubBoard; 9]) -> bool {
    boards.iter().all(|b| b.status().is_terminal())
}

#[cfg(test)]
mod tests {
    use super::super::super::{Player, Status};
    use super::super::{check_winner, sub_board_status};
    use super::*;

    const X: Square = Square::Occupied(Player::X);
    const O: Square = Square::Occupied(Player::O);
    const E: Square = Square::Empty;

    #[test]
    fn test_partial_board_not_full() {
        assert!(!is_full(&[X, E, E, E, O, E, E, E, E]));
    }

    #[test]
    fn test_draw_detection() {
        // X O X / X O O / O X X
        let squares = [X, O, X, X, O, O, O, X, X];
        assert!(is_full(&squares));
        assert_eq!(check_winner(&squares), None);
        assert_eq!(sub_board_status(&squares), Status::Draw);
    }

    #[test]
    fn test_full_board_with_line_is_won() {
        let squares = [X, X, X, O, O, X, X, O, O];
        assert!(is_full(&squares));
        assert_eq!(sub_board_status(&squares), Status::Won(Player::X));
    }

    #[test]
    fn test_all_closed() {
        let drawn = SubBoard::from_squares([X, O, X, X, O, O, O, X, X]).unwrap();
        let mut boards = [drawn; 9];
        assert!(all_closed(&boards));
        boards[4] = SubBoard::new();
        assert!(!all_closed(&boards));
    }
}

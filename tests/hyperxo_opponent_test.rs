//! Computer opponent behavior.

use hyperxo::{
    ActiveBoard, Difficulty, GameState, MetaBoard, Move, Opponent, Player, Position, SearchError,
    Square, Status, SubBoard, choose,
};

const X: Square = Square::Occupied(Player::X);
const O: Square = Square::Occupied(Player::O);
const E: Square = Square::Empty;

const DRAWN: [Square; 9] = [X, O, X, X, O, O, O, X, X];

/// X holds the top-center and top-right sub-boards and can take the
/// top-left one (and the game) only at its bottom-right cell.
fn winning_position() -> GameState {
    let drawn = SubBoard::from_squares(DRAWN).unwrap();
    let won = SubBoard::from_squares([X, X, X, O, O, E, E, E, E]).unwrap();
    let boards = [
        SubBoard::from_squares([X, O, E, O, X, E, E, E, E]).unwrap(),
        won,
        won,
        drawn,
        SubBoard::new(),
        SubBoard::new(),
        drawn,
        drawn,
        drawn,
    ];
    GameState::from_position(
        MetaBoard::from_sub_boards(boards).unwrap(),
        Player::X,
        ActiveBoard::Only(Position::TopLeft),
    )
}

#[test]
fn test_takes_immediate_win_at_every_difficulty() {
    let state = winning_position();
    let expected = Move::new(Player::X, Position::TopLeft, Position::BottomRight);
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let mov = choose(&state, difficulty).unwrap();
        assert_eq!(mov, expected, "{difficulty}");
        let after = state.apply_move(mov).unwrap();
        assert_eq!(after.status(), Status::Won(Player::X));
    }
}

#[test]
fn test_choice_is_deterministic() {
    let state = GameState::new()
        .play(Position::Center, Position::TopRight)
        .and_then(|s| s.play(Position::TopRight, Position::BottomLeft))
        .unwrap();
    for difficulty in [Difficulty::Easy, Difficulty::Medium] {
        let first = Opponent::new(difficulty).analyze(&state).unwrap();
        let second = Opponent::new(difficulty).analyze(&state).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_respects_forced_board() {
    let state = GameState::new().play(Position::TopLeft, Position::BottomRight).unwrap();
    let mov = choose(&state, Difficulty::Medium).unwrap();
    assert_eq!(mov.board, Position::BottomRight);
    assert_eq!(mov.player, Player::O);
    assert!(state.legal_moves().contains(&mov));
}

#[test]
fn test_caller_state_unchanged() {
    let state = GameState::new().play(Position::Center, Position::Center).unwrap();
    let before = state;
    let _ = choose(&state, Difficulty::Medium).unwrap();
    assert_eq!(state, before);
}

#[test]
fn test_terminal_state_has_no_choice() {
    let meta = MetaBoard::from_sub_boards([SubBoard::from_squares(DRAWN).unwrap(); 9]).unwrap();
    let state = GameState::from_position(meta, Player::O, ActiveBoard::Any);
    assert_eq!(choose(&state, Difficulty::Hard), Err(SearchError::NoLegalMoves));
}

#[test]
fn test_search_result_serializes() {
    let result = Opponent::new(Difficulty::Easy).analyze(&GameState::new()).unwrap();
    let json = serde_json::to_value(result).unwrap();
    assert_eq!(json["depth"], 1);
    assert!(json["best_move"]["board"].is_string());
}

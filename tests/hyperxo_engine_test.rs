//! Rules engine behavior through the public API.

use hyperxo::{
    ActiveBoard, GameState, MetaBoard, Move, MoveError, Player, Position, Square, StateError,
    Status, SubBoard, apply_move, is_terminal, legal_moves, new_game, winner,
};
use strum::IntoEnumIterator;

const X: Square = Square::Occupied(Player::X);
const O: Square = Square::Occupied(Player::O);
const E: Square = Square::Empty;

/// Full sub-board with no line.
const DRAWN: [Square; 9] = [X, O, X, X, O, O, O, X, X];

fn won_by_x() -> SubBoard {
    SubBoard::from_squares([X, X, X, O, O, E, E, E, E]).unwrap()
}

/// Plays `plies` moves, always the first legal one.
fn first_moves(plies: usize) -> GameState {
    let mut state = new_game();
    for _ in 0..plies {
        let mov = legal_moves(&state)[0];
        state = state.apply_move(mov).unwrap();
    }
    state
}

#[test]
fn test_center_of_center_redirects_to_center() {
    let state = apply_move(&new_game(), 4, 4, Player::X).unwrap();
    assert_eq!(state.active_board(), ActiveBoard::Only(Position::Center));
    assert_eq!(state.current_player(), Player::O);
    assert_eq!(state.board().get(Position::Center, Position::Center), X);
    assert!(
        legal_moves(&state)
            .iter()
            .all(|mov| mov.board == Position::Center)
    );
}

#[test]
fn test_top_row_wins_sub_board() {
    let board = SubBoard::from_squares([X, X, X, E, E, E, E, E, E]).unwrap();
    assert_eq!(board.status(), Status::Won(Player::X));
    assert!(!board.is_open());
}

#[test]
fn test_full_sub_board_without_line_is_drawn() {
    assert_eq!(SubBoard::from_squares(DRAWN).unwrap().status(), Status::Draw);
}

#[test]
fn test_all_drawn_sub_boards_draw_the_game() {
    let meta = MetaBoard::from_sub_boards([SubBoard::from_squares(DRAWN).unwrap(); 9]).unwrap();
    assert_eq!(meta.status(), Status::Draw);

    let state = GameState::from_position(meta, Player::X, ActiveBoard::Any);
    assert!(is_terminal(&state));
    assert_eq!(winner(&state), None);
    assert!(legal_moves(&state).is_empty());
}

#[test]
fn test_redirect_to_closed_board_opens_every_live_board() {
    let mut boards = [SubBoard::new(); 9];
    boards[0] = won_by_x();
    let state = GameState::from_position(
        MetaBoard::from_sub_boards(boards).unwrap(),
        Player::O,
        ActiveBoard::Only(Position::Center),
    );

    let next = state.play(Position::Center, Position::TopLeft).unwrap();
    assert_eq!(next.active_board(), ActiveBoard::Any);

    let moves = legal_moves(&next);
    assert_eq!(moves.len(), 8 * 9 - 1);
    assert!(moves.iter().all(|mov| mov.board != Position::TopLeft));
    for board in Position::iter().skip(1) {
        assert!(moves.iter().any(|mov| mov.board == board), "{board} missing");
    }
}

#[test]
fn test_illegal_moves_are_rejected_and_state_untouched() {
    let state = apply_move(&new_game(), 4, 4, Player::X).unwrap();
    let before = state;

    assert_eq!(
        apply_move(&state, 4, 0, Player::X),
        Err(MoveError::WrongPlayer(Player::X))
    );
    assert_eq!(
        apply_move(&state, 0, 0, Player::O),
        Err(MoveError::WrongBoard {
            expected: Position::Center,
            got: Position::TopLeft,
        })
    );
    assert_eq!(
        apply_move(&state, 4, 4, Player::O),
        Err(MoveError::SquareOccupied(Position::Center, Position::Center))
    );
    assert_eq!(
        apply_move(&state, 9, 0, Player::O),
        Err(MoveError::OutOfRange(9))
    );
    assert_eq!(state, before);
}

#[test]
fn test_no_moves_after_game_over() {
    let mut state = new_game();
    while !is_terminal(&state) {
        let mov = legal_moves(&state)[0];
        state = state.apply_move(mov).unwrap();
    }
    let mov = Move::new(state.current_player(), Position::Center, Position::Center);
    assert_eq!(state.apply_move(mov), Err(MoveError::GameOver));
}

#[test]
fn test_legal_moves_are_exactly_the_accepted_moves() {
    for plies in [0, 1, 7, 15, 30] {
        let state = first_moves(plies);
        let legal = legal_moves(&state);
        for player in [Player::X, Player::O] {
            for board in Position::iter() {
                for cell in Position::iter() {
                    let mov = Move::new(player, board, cell);
                    assert_eq!(
                        state.apply_move(mov).is_ok(),
                        legal.contains(&mov),
                        "plies {plies}, {mov}"
                    );
                    assert_eq!(state.is_legal(&mov), legal.contains(&mov), "plies {plies}, {mov}");
                }
            }
        }
    }
}

#[test]
fn test_redirect_follows_played_cell() {
    let mut state = new_game();
    for step in 0..40 {
        if is_terminal(&state) {
            break;
        }
        let moves = legal_moves(&state);
        let mov = moves[(step * 7) % moves.len()];
        state = state.apply_move(mov).unwrap();

        let expected = if state.board().sub_board(mov.cell).is_open() {
            ActiveBoard::Only(mov.cell)
        } else {
            ActiveBoard::Any
        };
        assert_eq!(state.active_board(), expected);
        assert_eq!(state.status(), state.board().status());
    }
}

#[test]
fn test_json_round_trip_matches_replay() {
    let mut state = new_game();
    let mut history = Vec::new();
    for step in 0..25 {
        let moves = legal_moves(&state);
        let mov = moves[(step * 5) % moves.len()];
        history.push(mov);
        state = state.apply_move(mov).unwrap();
    }

    let json = serde_json::to_string(&state).unwrap();
    let decoded: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, state);
    assert_eq!(GameState::replay(&history).unwrap(), state);
}

#[test]
fn test_deserialize_rejects_wrong_status() {
    let mut value = serde_json::to_value(first_moves(3)).unwrap();
    value["status"] = serde_json::json!({ "Won": "X" });
    let err = serde_json::from_value::<GameState>(value).unwrap_err();
    assert!(err.to_string().contains("does not match"), "{err}");
}

#[test]
fn test_deserialize_rejects_closed_active_board() {
    let mut boards = [SubBoard::new(); 9];
    boards[0] = won_by_x();
    let state = GameState::from_position(MetaBoard::from_sub_boards(boards).unwrap(), Player::O, ActiveBoard::Any);

    let mut value = serde_json::to_value(state).unwrap();
    value["active"] = serde_json::json!({ "Only": "TopLeft" });
    assert!(serde_json::from_value::<GameState>(value).is_err());

    let closed = StateError::ActiveBoardClosed(Position::TopLeft);
    assert!(closed.to_string().contains("Top-left"));
}

#[test]
fn test_sub_board_with_both_lines_is_rejected() {
    let squares = [X, X, X, O, O, O, E, E, E];
    assert_eq!(SubBoard::from_squares(squares), Err(StateError::RivalLines));

    let json = serde_json::to_value(squares).unwrap();
    assert!(serde_json::from_value::<SubBoard>(json).is_err());
}

#[test]
fn test_meta_board_with_both_lines_is_rejected() {
    let o_won = SubBoard::from_squares([O, O, O, X, X, E, E, E, E]).unwrap();
    let mut boards = [SubBoard::new(); 9];
    boards[..3].copy_from_slice(&[won_by_x(); 3]);
    boards[6..].copy_from_slice(&[o_won; 3]);
    assert_eq!(
        MetaBoard::from_sub_boards(boards),
        Err(StateError::RivalMetaLines)
    );
}

#[test]
fn test_deserialize_rejects_impossible_mark_counts() {
    let mut boards = [SubBoard::new(); 9];
    boards[1] = SubBoard::from_squares([O, O, O, X, E, E, E, E, E]).unwrap();
    boards[2] = SubBoard::from_squares([O, E, E, E, E, E, E, E, E]).unwrap();
    let state = GameState::from_position(
        MetaBoard::from_sub_boards(boards).unwrap(),
        Player::X,
        ActiveBoard::Any,
    );
    assert_eq!(state.status(), Status::InProgress);

    let value = serde_json::to_value(state).unwrap();
    let err = serde_json::from_value::<GameState>(value).unwrap_err();
    assert!(err.to_string().contains("4 O marks"), "{err}");
}

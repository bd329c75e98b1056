//! Static evaluation for non-terminal leaves, plus cheap move ordering.
//!
//! All scores are from one player's perspective and stay far inside
//! `(-WIN, WIN)`, so a forced result always outranks a heuristic one.

use crate::games::hyperxo::rules::LINES;
use crate::games::hyperxo::{GameState, Move, Player, Position, Square, Status, SubBoard};

/// Score of a won game at the root. Wins found `ply` moves deep score
/// `WIN - ply`, so the quickest win is preferred.
pub const WIN: i32 = 1_000_000;

/// Meta-line weight by number of sub-boards held on an unblocked line.
const META_LINE: [i32; 3] = [0, 40, 160];
/// Bonus for holding the center sub-board.
const META_CENTER: i32 = 6;
/// Bonus for holding a corner sub-board.
const META_CORNER: i32 = 3;
/// Weight of every sub-board won.
const SUB_BOARD_WON: i32 = 20;
/// Local line weight by number of marks on a line the opponent hasn't touched.
const LOCAL_LINE: [i32; 3] = [0, 10, 50];
/// Bonus for the center cell of a live sub-board.
const LOCAL_CENTER: i32 = 3;

/// Score of a finished game, adjusted for how deep it was found.
pub fn terminal_score(status: Status, me: Player, ply: u8) -> Option<i32> {
    let distance = WIN - i32::from(ply);
    match status {
        Status::InProgress => None,
        Status::Draw => Some(0),
        Status::Won(p) if p == me => Some(distance),
        Status::Won(_) => Some(-distance),
    }
}

/// Heuristic value of a position for `me`.
///
/// Rewards won sub-boards (center and corners more), open lines of won
/// sub-boards on the meta-board, open lines inside live sub-boards, and
/// live center cells.
pub fn evaluate(state: &GameState, me: Player) -> i32 {
    let boards = state.board().sub_boards();
    let mut score = 0;

    for line in LINES {
        let statuses = line.map(|pos| boards[pos.to_index()].status());
        if statuses.contains(&Status::Draw) {
            continue;
        }
        let mine = statuses.iter().filter(|&&s| s == Status::Won(me)).count();
        let theirs = statuses
            .iter()
            .filter(|&&s| s == Status::Won(me.opponent()))
            .count();
        match (mine, theirs) {
            (m, 0) if m < 3 => score += META_LINE[m],
            (0, o) if o < 3 => score -= META_LINE[o],
            _ => {}
        }
    }

    for pos in Position::ALL {
        let board = &boards[pos.to_index()];
        let sign = match board.status() {
            Status::Won(p) if p == me => 1,
            Status::Won(_) => -1,
            Status::Draw => continue,
            Status::InProgress => {
                score += local_potential(board, me);
                continue;
            }
        };
        let geometry = if pos == Position::Center {
            META_CENTER
        } else if pos.is_corner() {
            META_CORNER
        } else {
            0
        };
        score += sign * (SUB_BOARD_WON + geometry);
    }

    score
}

/// Open-line and center-cell value of a live sub-board.
fn local_potential(board: &SubBoard, me: Player) -> i32 {
    let mut score = 0;
    for line in LINES {
        let squares = line.map(|pos| board.get(pos));
        let mine = squares.iter().filter(|&&s| s == Square::Occupied(me)).count();
        let theirs = squares
            .iter()
            .filter(|&&s| s == Square::Occupied(me.opponent()))
            .count();
        match (mine, theirs) {
            (m, 0) if m < 3 => score += LOCAL_LINE[m],
            (0, o) if o < 3 => score -= LOCAL_LINE[o],
            _ => {}
        }
    }
    match board.get(Position::Center) {
        Square::Occupied(p) if p == me => score + LOCAL_CENTER,
        Square::Occupied(_) => score - LOCAL_CENTER,
        Square::Empty => score,
    }
}

/// Lines through `cell` where `player` already has the other two squares.
fn completes_line(board: &SubBoard, player: Player, cell: Position) -> bool {
    LINES.iter().filter(|line| line.contains(&cell)).any(|line| {
        line.iter()
            .filter(|&&pos| pos != cell)
            .all(|&pos| board.get(pos) == Square::Occupied(player))
    })
}

/// Open two-in-a-row threats for `player` on a sub-board.
fn threats(board: &SubBoard, player: Player) -> i32 {
    let count = LINES
        .iter()
        .filter(|line| {
            let squares = line.map(|pos| board.get(pos));
            squares.iter().filter(|&&s| s == Square::Occupied(player)).count() == 2
                && squares.contains(&Square::Empty)
        })
        .count();
    count as i32
}

/// Cheap ordering score for trying a move early.
///
/// Local wins first, then local blocks, then moves that send the
/// opponent somewhere harmless, with a geometric tiebreak.
pub fn move_priority(state: &GameState, mov: &Move) -> i32 {
    let me = mov.player;
    let board = state.board().sub_board(mov.board);

    if completes_line(board, me, mov.cell) {
        return 1_000;
    }
    if completes_line(board, me.opponent(), mov.cell) {
        return 900;
    }

    // Where the opponent is sent after this move. Playing the last empty
    // square of the target itself is ignored here.
    let target = state.board().sub_board(mov.cell);
    let send = if target.is_open() {
        15 * threats(target, me) - 10 * threats(target, me.opponent())
    } else {
        -30
    };

    let geometry = if mov.cell == Position::Center {
        4
    } else if mov.cell.is_corner() {
        2
    } else {
        1
    };

    send + geometry
}

//! Lookahead primitives shared by the heuristic strategies.
//!
//! Every function here evaluates hypothetical moves on copies of the board
//! and never modifies the board it is given. Scans run in row-major order,
//! so "first" always means lowest row, then lowest column.

use crate::board::{BoardState, Cell, Mark, ALL_CELLS, CORNERS};

/// Corner pairs checked by `opposite_corner`, as (occupied, candidate).
///
/// The first two entries restate the same diagonal in both directions, as
/// do the last two. Order matters: the first matching pair wins.
const OPPOSITE_CORNER_PAIRS: [(Cell, Cell); 4] = [
    (CORNERS[0], CORNERS[3]),
    (CORNERS[3], CORNERS[0]),
    (CORNERS[1], CORNERS[2]),
    (CORNERS[2], CORNERS[1]),
];

/// True if placing `mark` at (row, col) completes a line. False for
/// illegal moves.
pub fn would_win(board: &BoardState, row: usize, col: usize, mark: Mark) -> bool {
    board
        .with_move(Cell::new(row, col), mark)
        .is_some_and(|next| next.win_check(mark))
}

/// Returns the first empty cell where `mark` would win immediately.
pub fn find_immediate_win(board: &BoardState, mark: Mark) -> Option<Cell> {
    ALL_CELLS
        .into_iter()
        .find(|c| would_win(board, c.row, c.col, mark))
}

/// Number of distinct empty cells where `mark` would win immediately.
pub fn count_immediate_wins(board: &BoardState, mark: Mark) -> usize {
    ALL_CELLS
        .iter()
        .filter(|c| would_win(board, c.row, c.col, mark))
        .count()
}

/// True if placing `mark` at (row, col) leaves `mark` with two or more
/// immediate wins. False for illegal moves.
pub fn is_fork_move(board: &BoardState, mark: Mark, row: usize, col: usize) -> bool {
    board
        .with_move(Cell::new(row, col), mark)
        .is_some_and(|next| count_immediate_wins(&next, mark) >= 2)
}

/// Returns the first cell that is a fork for `mark`.
pub fn find_fork_move(board: &BoardState, mark: Mark) -> Option<Cell> {
    ALL_CELLS
        .into_iter()
        .find(|c| is_fork_move(board, mark, c.row, c.col))
}

/// All cells that are forks for `mark`, in row-major order.
pub fn fork_cells(board: &BoardState, mark: Mark) -> Vec<Cell> {
    ALL_CELLS
        .into_iter()
        .filter(|c| is_fork_move(board, mark, c.row, c.col))
        .collect()
}

/// Returns the empty corner diagonally opposite a corner held by
/// `target`, taking the first match from `OPPOSITE_CORNER_PAIRS`.
pub fn opposite_corner(board: &BoardState, target: Mark) -> Option<Cell> {
    OPPOSITE_CORNER_PAIRS
        .iter()
        .find(|(held, free)| board.at(*held) == target && board.is_valid(*free))
        .map(|&(_, free)| free)
}

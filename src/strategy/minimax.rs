//! Exhaustive minimax search.
//!
//! Scores every line of play to the end of the game from the searching
//! mark's point of view:
//!
//! - own win: `10 - filled` (earlier wins score higher)
//! - opponent win: `-10 + filled` (later losses score higher)
//! - tie: `0`
//!
//! The root tries each legal move in row-major order and keeps the first
//! one with the strictly greatest value, so the choice is deterministic.
//!
//! `search` memoizes node values for the duration of one call, keyed by
//! the board and the side to move. A node's value depends on nothing else,
//! so the result is identical to `search_exhaustive`, which walks the full
//! tree without a memo.

use std::collections::HashMap;

use tracing::trace;

use crate::board::{BoardState, Cell, Mark};

/// Score magnitude of a win before the depth adjustment.
pub const WIN_SCORE: i32 = 10;

/// Result of a search: the chosen cell and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub cell: Cell,
    /// Minimax value of the position after playing `cell`.
    pub score: i32,
    /// Positions evaluated (memo hits excluded).
    pub nodes: u64,
}

/// Finds the best move for `mark`. Returns `None` if the board has no
/// empty cell or `mark` is `Empty`.
pub fn search(board: &BoardState, mark: Mark) -> Option<SearchResult> {
    Searcher::new(mark, true).root(board)
}

/// Same as `search` but without memoization: every node of the remaining
/// tree is expanded.
pub fn search_exhaustive(board: &BoardState, mark: Mark) -> Option<SearchResult> {
    Searcher::new(mark, false).root(board)
}

/// Scores a finished board for `me`, or `None` if play continues.
pub fn terminal_score(board: &BoardState, me: Mark) -> Option<i32> {
    let filled = board.filled() as i32;
    if board.win_check(me) {
        Some(WIN_SCORE - filled)
    } else if board.win_check(me.opponent()) {
        Some(-WIN_SCORE + filled)
    } else if board.tie_check() {
        Some(0)
    } else {
        None
    }
}

struct Searcher {
    me: Mark,
    memo: Option<HashMap<(u32, bool), i32>>,
    nodes: u64,
}

impl Searcher {
    fn new(me: Mark, memoize: bool) -> Self {
        Searcher {
            me,
            memo: memoize.then(HashMap::new),
            nodes: 0,
        }
    }

    fn root(&mut self, board: &BoardState) -> Option<SearchResult> {
        if !self.me.is_player() {
            return None;
        }

        let mut best: Option<(Cell, i32)> = None;
        for cell in board.empty_cells() {
            let Some(next) = board.with_move(cell, self.me) else {
                continue;
            };
            let score = self.value(&next, false);
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((cell, score));
            }
        }

        let (cell, score) = best?;
        trace!(mark = ?self.me, %cell, score, nodes = self.nodes, "minimax move");
        Some(SearchResult {
            cell,
            score,
            nodes: self.nodes,
        })
    }

    /// Value of `board` with `me` to move when `maximizing`, else the
    /// opponent to move.
    fn value(&mut self, board: &BoardState, maximizing: bool) -> i32 {
        let key = (board.key(), maximizing);
        if let Some(&v) = self.memo.as_ref().and_then(|m| m.get(&key)) {
            return v;
        }
        self.nodes += 1;

        let v = match terminal_score(board, self.me) {
            Some(score) => score,
            None => {
                let mover = if maximizing { self.me } else { self.me.opponent() };
                let mut best = if maximizing { i32::MIN } else { i32::MAX };
                for cell in board.empty_cells() {
                    let Some(next) = board.with_move(cell, mover) else {
                        continue;
                    };
                    let score = self.value(&next, !maximizing);
                    best = if maximizing { best.max(score) } else { best.min(score) };
                }
                best
            }
        };

        if let Some(memo) = self.memo.as_mut() {
            memo.insert(key, v);
        }
        v
    }
}

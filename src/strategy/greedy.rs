//! Greedy strategy.
//!
//! Four rules, first match wins: take an immediate win, block the
//! opponent's immediate win, take the center, else play a random empty
//! cell. There is no corner or edge preference, which keeps it a weaker
//! baseline than the other strategies.

use rand::Rng;
use tracing::trace;

use super::{check_playable, random_move, DecideError};
use crate::board::{BoardState, Cell, Mark, CENTER};
use crate::lookahead::find_immediate_win;

/// Which greedy rule produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GreedyRule {
    Win,
    Block,
    Center,
    Random,
}

/// A greedy move and the rule that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreedyDecision {
    pub cell: Cell,
    pub rule: GreedyRule,
}

/// Chooses a move for `mark`.
pub fn decide(
    board: &BoardState,
    mark: Mark,
    rng: &mut impl Rng,
) -> Result<GreedyDecision, DecideError> {
    check_playable(board, mark)?;

    let (cell, rule) = if let Some(cell) = find_immediate_win(board, mark) {
        (cell, GreedyRule::Win)
    } else if let Some(cell) = find_immediate_win(board, mark.opponent()) {
        (cell, GreedyRule::Block)
    } else if board.is_valid(CENTER) {
        (CENTER, GreedyRule::Center)
    } else {
        let cell = random_move(board, rng).ok_or(DecideError::NoLegalMoves)?;
        (cell, GreedyRule::Random)
    };

    trace!(?mark, ?rule, %cell, "greedy move");
    Ok(GreedyDecision { cell, rule })
}

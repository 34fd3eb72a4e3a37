//! Move-selection strategies.
//!
//! Each strategy is a pure function of the board and the mark it plays:
//! it reads the board, explores copies as needed, and answers with a cell.
//! The caller commits the move. `Strategy` is the closed set of variants
//! behind the common `decide_move` contract.

pub mod greedy;
pub mod minimax;
pub mod rule_based;

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{BoardState, Cell, Mark};

pub use greedy::{GreedyDecision, GreedyRule};
pub use minimax::SearchResult;
pub use rule_based::{Rule, RuleDecision};

/// Reasons a strategy cannot produce a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecideError {
    /// The board is full. Callers check win/tie after every move, so this
    /// points at an orchestration bug.
    #[error("no legal moves remain")]
    NoLegalMoves,

    #[error("cannot decide a move for the empty mark")]
    EmptyMark,
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy '{0}' (expected greedy, rule-based, minimax, or random)")]
pub struct ParseStrategyError(pub String);

/// A move-selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Win, block, center, else random. The weak baseline.
    Greedy,
    /// Ten-rule cascade with fork creation and blocking. Never loses.
    RuleBased,
    /// Full game-tree search. Never loses and wins as fast as possible.
    Minimax,
    /// Uniformly random empty cell.
    Random,
}

/// Every strategy, weakest last.
pub const ALL_STRATEGIES: [Strategy; 4] = [
    Strategy::Minimax,
    Strategy::RuleBased,
    Strategy::Greedy,
    Strategy::Random,
];

impl Strategy {
    /// Returns the canonical name used on the command line and in records.
    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Greedy => "greedy",
            Strategy::RuleBased => "rule-based",
            Strategy::Minimax => "minimax",
            Strategy::Random => "random",
        }
    }

    /// Chooses a cell for `mark` to play on `board`.
    ///
    /// `board` is never modified. `rng` is only drawn from by the random
    /// fallbacks, so minimax ignores it entirely.
    pub fn decide_move(
        &self,
        board: &BoardState,
        mark: Mark,
        rng: &mut impl Rng,
    ) -> Result<Cell, DecideError> {
        match self {
            Strategy::Greedy => greedy::decide(board, mark, rng).map(|d| d.cell),
            Strategy::RuleBased => rule_based::decide(board, mark, rng).map(|d| d.cell),
            Strategy::Minimax => {
                check_playable(board, mark)?;
                minimax::search(board, mark)
                    .map(|r| r.cell)
                    .ok_or(DecideError::NoLegalMoves)
            }
            Strategy::Random => {
                check_playable(board, mark)?;
                random_move(board, rng).ok_or(DecideError::NoLegalMoves)
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greedy" | "regular" => Ok(Strategy::Greedy),
            "rule-based" | "rule_based" | "rules" | "unbeatable" => Ok(Strategy::RuleBased),
            "minimax" => Ok(Strategy::Minimax),
            "random" => Ok(Strategy::Random),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Picks a uniformly random empty cell, or `None` on a full board.
pub fn random_move(board: &BoardState, rng: &mut impl Rng) -> Option<Cell> {
    let empty: Vec<Cell> = board.empty_cells().collect();
    if empty.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..empty.len());
    Some(empty[idx])
}

/// Rejects the empty mark and full boards before a strategy runs.
pub(crate) fn check_playable(board: &BoardState, mark: Mark) -> Result<(), DecideError> {
    if !mark.is_player() {
        return Err(DecideError::EmptyMark);
    }
    if board.is_full() {
        return Err(DecideError::NoLegalMoves);
    }
    Ok(())
}

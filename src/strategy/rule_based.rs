//! Rule-cascade strategy.
//!
//! Applies ten rules in a fixed order and plays the first one that yields
//! a cell. The order is load-bearing: in particular the opposite-corners
//! check must run before fork creation, because on that exact position the
//! fork search picks a corner that loses.
//!
//! 1. Win immediately.
//! 2. Block the opponent's immediate win.
//! 3. Holding the center against opponent marks on both ends of a
//!    diagonal: take the first free edge.
//! 4. Create a fork.
//! 5. Block the opponent's fork.
//! 6. Take the center.
//! 7. Take the corner opposite an opponent corner.
//! 8. Take any corner.
//! 9. Take any edge.
//! 10. Random empty cell (unreachable on a non-full board).
//!
//! Played out against every possible opponent line, the cascade never
//! loses with either mark.

use rand::Rng;
use tracing::trace;

use super::{check_playable, random_move, DecideError};
use crate::board::{BoardState, Cell, Mark, CENTER, CORNERS, EDGES};
use crate::lookahead::{find_fork_move, find_immediate_win, fork_cells, opposite_corner};

/// The cascade step that produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Win,
    Block,
    AvoidOppositeCorners,
    Fork,
    BlockFork,
    Center,
    OppositeCorner,
    EmptyCorner,
    EmptyEdge,
    Random,
}

impl Rule {
    /// Position of the rule in the cascade, starting at 1.
    pub const fn number(self) -> u8 {
        match self {
            Rule::Win => 1,
            Rule::Block => 2,
            Rule::AvoidOppositeCorners => 3,
            Rule::Fork => 4,
            Rule::BlockFork => 5,
            Rule::Center => 6,
            Rule::OppositeCorner => 7,
            Rule::EmptyCorner => 8,
            Rule::EmptyEdge => 9,
            Rule::Random => 10,
        }
    }
}

/// A cascade move and the rule that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDecision {
    pub cell: Cell,
    pub rule: Rule,
}

/// Chooses a move for `mark` by running the cascade.
pub fn decide(
    board: &BoardState,
    mark: Mark,
    rng: &mut impl Rng,
) -> Result<RuleDecision, DecideError> {
    check_playable(board, mark)?;
    let opp = mark.opponent();

    let (cell, rule) = if let Some(c) = find_immediate_win(board, mark) {
        (c, Rule::Win)
    } else if let Some(c) = find_immediate_win(board, opp) {
        (c, Rule::Block)
    } else if let Some(c) = avoid_opposite_corners(board, mark) {
        (c, Rule::AvoidOppositeCorners)
    } else if let Some(c) = find_fork_move(board, mark) {
        (c, Rule::Fork)
    } else if let Some(c) = block_fork(board, mark) {
        (c, Rule::BlockFork)
    } else if board.is_valid(CENTER) {
        (CENTER, Rule::Center)
    } else if let Some(c) = opposite_corner(board, opp) {
        (c, Rule::OppositeCorner)
    } else if let Some(c) = first_free(board, &CORNERS) {
        (c, Rule::EmptyCorner)
    } else if let Some(c) = first_free(board, &EDGES) {
        (c, Rule::EmptyEdge)
    } else {
        let c = random_move(board, rng).ok_or(DecideError::NoLegalMoves)?;
        (c, Rule::Random)
    };

    trace!(?mark, rule = rule.number(), %cell, "rule-based move");
    Ok(RuleDecision { cell, rule })
}

/// Rule 3. With `mark` on the center and the opponent on both corners of
/// one diagonal, any corner lets the opponent fork; an edge forces a block
/// instead. Returns `None` when the pattern is absent or no edge is free.
fn avoid_opposite_corners(board: &BoardState, mark: Mark) -> Option<Cell> {
    if board.at(CENTER) != mark {
        return None;
    }
    let opp = mark.opponent();
    let holds = |a: Cell, b: Cell| board.at(a) == opp && board.at(b) == opp;
    let [top_left, top_right, bottom_left, bottom_right] = CORNERS;
    if holds(top_left, bottom_right) || holds(top_right, bottom_left) {
        first_free(board, &EDGES)
    } else {
        None
    }
}

/// Rule 5. If the opponent has a fork available, prefer a move that leaves
/// them with none; failing that, occupy the first fork cell directly.
fn block_fork(board: &BoardState, mark: Mark) -> Option<Cell> {
    let opp = mark.opponent();
    let threats = fork_cells(board, opp);
    let first_threat = *threats.first()?;

    let spoiler = board.empty_cells().find(|&c| {
        board
            .with_move(c, mark)
            .is_some_and(|next| find_fork_move(&next, opp).is_none())
    });
    Some(spoiler.unwrap_or(first_threat))
}

/// First empty cell from `cells`, in the given order.
fn first_free(board: &BoardState, cells: &[Cell]) -> Option<Cell> {
    cells.iter().copied().find(|&c| board.is_valid(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::parse_board;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const X: Mark = Mark::First;
    const O: Mark = Mark::Second;

    fn decide_on(notation: &str, mark: Mark) -> RuleDecision {
        let board = parse_board(notation).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);
        decide(&board, mark, &mut rng).unwrap()
    }

    #[test]
    fn empty_board_takes_center() {
        let d = decide_on(".../.../...", X);
        assert_eq!(d.cell, CENTER);
        assert_eq!(d.rule, Rule::Center);
    }

    #[test]
    fn takes_immediate_win() {
        let d = decide_on("OO./XX./...", X);
        assert_eq!(d.cell, Cell::new(1, 2));
        assert_eq!(d.rule, Rule::Win);
    }

    #[test]
    fn blocks_bottom_row_threat() {
        let d = decide_on(".../.../OO.", X);
        assert_eq!(d.cell, Cell::new(2, 2));
        assert_eq!(d.rule, Rule::Block);
    }

    #[test]
    fn opposite_corners_forces_an_edge() {
        for notation in ["X../.O./..X", "..X/.O./X.."] {
            let d = decide_on(notation, O);
            assert_eq!(d.rule, Rule::AvoidOppositeCorners, "{}", notation);
            assert_eq!(d.cell, Cell::new(0, 1));
        }
    }

    #[test]
    fn opposite_corners_runs_before_fork_blocking() {
        // No O move removes both X forks here, so the fork block falls back
        // to a corner, which loses. Rule 3 must answer with an edge first.
        let board = parse_board("X../.O./..X").unwrap();
        assert_eq!(fork_cells(&board, X), vec![Cell::new(0, 2), Cell::new(2, 0)]);
        assert_eq!(block_fork(&board, O), Some(Cell::new(0, 2)));

        let d = decide_on("X../.O./..X", O);
        assert!(EDGES.contains(&d.cell));
    }

    #[test]
    fn creates_fork() {
        // X at (1,2) threatens both the middle row and the right column.
        let d = decide_on("O../X../.OX", X);
        assert_eq!(d.rule, Rule::Fork);
        assert_eq!(d.cell, Cell::new(1, 2));
    }

    #[test]
    fn blocks_fork() {
        let d = decide_on(".X./.../.OX", O);
        assert_eq!(d.rule, Rule::BlockFork);
        assert_eq!(d.cell, Cell::new(0, 0));

        let d = decide_on("X../.OX/..O", X);
        assert_eq!(d.rule, Rule::BlockFork);
        assert_eq!(d.cell, Cell::new(2, 0));
    }

    #[test]
    fn block_fork_leaves_opponent_without_forks() {
        let board = parse_board(".X./.../.OX").unwrap();
        assert!(!fork_cells(&board, X).is_empty());
        let cell = block_fork(&board, O).unwrap();
        let next = board.with_move(cell, O).unwrap();
        assert!(fork_cells(&next, X).is_empty());
    }

    #[test]
    fn block_fork_is_none_without_threats() {
        let board = parse_board(".../.X./...").unwrap();
        assert_eq!(block_fork(&board, O), None);
    }

    #[test]
    fn takes_opposite_corner() {
        let d = decide_on("..O/.X./...", X);
        assert_eq!(d.rule, Rule::OppositeCorner);
        assert_eq!(d.cell, Cell::new(2, 0));
    }

    #[test]
    fn answers_center_with_a_corner() {
        let d = decide_on(".../.X./...", O);
        assert_eq!(d.rule, Rule::EmptyCorner);
        assert_eq!(d.cell, Cell::new(0, 0));
    }

    #[test]
    fn takes_last_edge() {
        let d = decide_on("XOX/.X./OXO", O);
        assert_eq!(d.rule, Rule::EmptyEdge);
        assert_eq!(d.cell, Cell::new(1, 0));
    }

    #[test]
    fn answers_corner_with_center() {
        let d = decide_on("X../.../...", O);
        assert_eq!(d.rule, Rule::Center);
    }

    #[test]
    fn rule_numbers_are_ordered() {
        let rules = [
            Rule::Win,
            Rule::Block,
            Rule::AvoidOppositeCorners,
            Rule::Fork,
            Rule::BlockFork,
            Rule::Center,
            Rule::OppositeCorner,
            Rule::EmptyCorner,
            Rule::EmptyEdge,
            Rule::Random,
        ];
        for (i, r) in rules.iter().enumerate() {
            assert_eq!(r.number() as usize, i + 1);
        }
    }
}

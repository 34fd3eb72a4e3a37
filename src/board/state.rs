//! Game state representation.
//!
//! Holds the 3x3 grid and the fill counter. Owns move validity and the
//! terminal checks (win, tie) that every strategy and the arena rely on.

use std::fmt;

use super::cell::{Cell, ALL_CELLS, BOARD_SIZE, CELL_COUNT, LINES};
use super::mark::Mark;

/// Reasons a move is rejected. The board is left unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cell ({row}, {col}) is off the board")]
    OutOfRange { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    #[error("cannot place an empty mark")]
    EmptyMark,
}

/// Complete board state at a point in time.
///
/// Small and `Copy`: lookahead clones the whole board rather than
/// applying and undoing moves. `filled` always equals the number of
/// non-empty cells, so fields are private and writes go through
/// `apply_move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoardState {
    grid: [[Mark; BOARD_SIZE]; BOARD_SIZE],
    filled: u8,
}

impl BoardState {
    /// Creates an empty board.
    pub fn new() -> Self {
        BoardState::default()
    }

    /// Clears every cell for a fresh game.
    pub fn reset(&mut self) {
        *self = BoardState::default();
    }

    /// Places `mark` at (row, col).
    ///
    /// Fails without touching the board if the cell is off the board,
    /// already occupied, or `mark` is `Empty`.
    pub fn apply_move(&mut self, row: usize, col: usize, mark: Mark) -> Result<(), MoveError> {
        if !mark.is_player() {
            return Err(MoveError::EmptyMark);
        }
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(MoveError::OutOfRange { row, col });
        }
        if self.grid[row][col] != Mark::Empty {
            return Err(MoveError::Occupied { row, col });
        }
        self.grid[row][col] = mark;
        self.filled += 1;
        Ok(())
    }

    /// `apply_move` taking a `Cell`.
    pub fn play(&mut self, cell: Cell, mark: Mark) -> Result<(), MoveError> {
        self.apply_move(cell.row, cell.col, mark)
    }

    /// Returns a copy of this board with `mark` placed on `cell`, or `None`
    /// if the move is illegal. `self` is never modified.
    pub fn with_move(&self, cell: Cell, mark: Mark) -> Option<BoardState> {
        let mut copy = *self;
        copy.play(cell, mark).ok().map(|_| copy)
    }

    /// True iff (row, col) is on the board and empty.
    pub fn is_valid_move(&self, row: usize, col: usize) -> bool {
        row < BOARD_SIZE && col < BOARD_SIZE && self.grid[row][col] == Mark::Empty
    }

    /// `is_valid_move` taking a `Cell`.
    pub fn is_valid(&self, cell: Cell) -> bool {
        self.is_valid_move(cell.row, cell.col)
    }

    /// Reads a cell. Panics if (row, col) is off the board; callers validate
    /// coordinates first.
    pub fn get_cell(&self, row: usize, col: usize) -> Mark {
        self.grid[row][col]
    }

    /// `get_cell` taking a `Cell`.
    pub fn at(&self, cell: Cell) -> Mark {
        self.get_cell(cell.row, cell.col)
    }

    /// True iff some row, column, or diagonal is entirely `mark`.
    /// `Empty` never wins.
    pub fn win_check(&self, mark: Mark) -> bool {
        if !mark.is_player() {
            return false;
        }
        LINES
            .iter()
            .any(|line| line.iter().all(|&c| self.at(c) == mark))
    }

    /// True iff the board is full and neither player has a line.
    pub fn tie_check(&self) -> bool {
        self.is_full() && !self.win_check(Mark::First) && !self.win_check(Mark::Second)
    }

    /// Returns the player holding a complete line, if any.
    pub fn winner(&self) -> Option<Mark> {
        [Mark::First, Mark::Second]
            .into_iter()
            .find(|&m| self.win_check(m))
    }

    /// True once the game is decided: a win for either mark, or a tie.
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Number of occupied cells.
    pub fn filled(&self) -> usize {
        self.filled as usize
    }

    pub fn is_full(&self) -> bool {
        self.filled() == CELL_COUNT
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        ALL_CELLS.into_iter().filter(move |&c| self.is_valid(c))
    }

    /// Base-3 encoding of the grid in row-major order (Empty = 0, First = 1,
    /// Second = 2). Distinct boards map to distinct keys below 3^9.
    pub fn key(&self) -> u32 {
        ALL_CELLS
            .iter()
            .fold(0, |acc, &c| acc * 3 + self.at(c).digit())
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   0   1   2")?;
        for row in 0..BOARD_SIZE {
            write!(f, "{}  ", row)?;
            for col in 0..BOARD_SIZE {
                let symbol = match self.grid[row][col] {
                    Mark::Empty => ' ',
                    m => m.symbol(),
                };
                write!(f, "{}", symbol)?;
                if col < BOARD_SIZE - 1 {
                    write!(f, " | ")?;
                }
            }
            writeln!(f)?;
            if row < BOARD_SIZE - 1 {
                writeln!(f, "  ---+---+---")?;
            }
        }
        Ok(())
    }
}

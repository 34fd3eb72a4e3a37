//! Board coordinates.
//!
//! A `Cell` is a (row, col) pair and doubles as the move type: a strategy
//! answers with the cell it wants its mark placed on.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Side length of the board.
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A (row, col) coordinate. Also used as a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }

    /// True if both coordinates lie on the board.
    pub const fn in_range(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Row-major index in `0..CELL_COUNT`. Only meaningful for in-range cells.
    pub const fn index(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The center cell.
pub const CENTER: Cell = Cell::new(1, 1);

/// Corner cells in preference order.
pub const CORNERS: [Cell; 4] = [
    Cell::new(0, 0),
    Cell::new(0, 2),
    Cell::new(2, 0),
    Cell::new(2, 2),
];

/// Edge (side) cells in preference order.
pub const EDGES: [Cell; 4] = [
    Cell::new(0, 1),
    Cell::new(1, 0),
    Cell::new(1, 2),
    Cell::new(2, 1),
];

/// All cells in row-major scan order.
pub const ALL_CELLS: [Cell; CELL_COUNT] = [
    Cell::new(0, 0),
    Cell::new(0, 1),
    Cell::new(0, 2),
    Cell::new(1, 0),
    Cell::new(1, 1),
    Cell::new(1, 2),
    Cell::new(2, 0),
    Cell::new(2, 1),
    Cell::new(2, 2),
];

/// The eight winning lines: three rows, three columns, main diagonal,
/// anti-diagonal.
pub const LINES: [[Cell; 3]; 8] = [
    [Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)],
    [Cell::new(1, 0), Cell::new(1, 1), Cell::new(1, 2)],
    [Cell::new(2, 0), Cell::new(2, 1), Cell::new(2, 2)],
    [Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)],
    [Cell::new(0, 1), Cell::new(1, 1), Cell::new(2, 1)],
    [Cell::new(0, 2), Cell::new(1, 2), Cell::new(2, 2)],
    [Cell::new(0, 0), Cell::new(1, 1), Cell::new(2, 2)],
    [Cell::new(0, 2), Cell::new(1, 1), Cell::new(2, 0)],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_cells_is_row_major() {
        for (i, cell) in ALL_CELLS.iter().enumerate() {
            assert_eq!(cell.index(), i);
        }
    }

    #[test]
    fn range_check() {
        assert!(Cell::new(2, 2).in_range());
        assert!(!Cell::new(3, 0).in_range());
        assert!(!Cell::new(0, 3).in_range());
    }

    #[test]
    fn every_cell_lies_on_a_line() {
        for cell in ALL_CELLS {
            assert!(LINES.iter().any(|line| line.contains(&cell)));
        }
        // Center sits on four lines, corners on three, edges on two.
        let count = |c: Cell| LINES.iter().filter(|l| l.contains(&c)).count();
        assert_eq!(count(CENTER), 4);
        assert!(CORNERS.iter().all(|&c| count(c) == 3));
        assert!(EDGES.iter().all(|&c| count(c) == 2));
    }
}

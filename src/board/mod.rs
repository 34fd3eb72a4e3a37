//! Board representation and game-state types.
//!
//! Contains marks, cell coordinates and the winning-line table, and the
//! board state with its validity and terminal checks.

pub mod cell;
pub mod mark;
pub mod state;

pub use cell::{Cell, ALL_CELLS, BOARD_SIZE, CELL_COUNT, CENTER, CORNERS, EDGES, LINES};
pub use mark::{Mark, PLAYER_MARKS};
pub use state::{BoardState, MoveError};

//! Compact board notation.
//!
//! A board is written as three rows separated by `/`, top row first, each
//! row exactly three characters: `X` for the first mark, `O` for the
//! second, `.` for an empty cell.
//!
//! Example: `X.O/.X./..O`
//!
//! Parsing does not check turn order, so puzzle positions (e.g. two X's
//! and no O's) are accepted.

use crate::board::{BoardState, Mark, BOARD_SIZE};

/// Errors that can occur while parsing board notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("expected 3 rows separated by '/', got {0}")]
    WrongRowCount(usize),

    #[error("row {row} has {len} cells, expected 3: '{text}'")]
    WrongRowLength { row: usize, len: usize, text: String },

    #[error("invalid cell character '{0}'")]
    InvalidCell(char),
}

/// Parses board notation into a `BoardState`.
pub fn parse_board(s: &str) -> Result<BoardState, NotationError> {
    let rows: Vec<&str> = s.trim().split('/').collect();
    if rows.len() != BOARD_SIZE {
        return Err(NotationError::WrongRowCount(rows.len()));
    }

    let mut board = BoardState::new();
    for (row, text) in rows.iter().enumerate() {
        let len = text.chars().count();
        if len != BOARD_SIZE {
            return Err(NotationError::WrongRowLength {
                row,
                len,
                text: text.to_string(),
            });
        }
        for (col, c) in text.chars().enumerate() {
            let mark = Mark::from_symbol(c).ok_or(NotationError::InvalidCell(c))?;
            if mark.is_player() {
                // Each cell is visited once, so placement cannot collide.
                board
                    .apply_move(row, col, mark)
                    .map_err(|_| NotationError::InvalidCell(c))?;
            }
        }
    }
    Ok(board)
}

/// Encodes a board into notation.
pub fn encode_board(board: &BoardState) -> String {
    let mut out = String::with_capacity(BOARD_SIZE * (BOARD_SIZE + 1));
    for row in 0..BOARD_SIZE {
        if row > 0 {
            out.push('/');
        }
        for col in 0..BOARD_SIZE {
            out.push(board.get_cell(row, col).symbol());
        }
    }
    out
}

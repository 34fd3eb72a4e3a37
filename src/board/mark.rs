//! Cell contents and player symbols.
//!
//! A `Mark` is what occupies a cell: nothing, or one of the two players'
//! symbols. `First` always moves first and is written `X`; `Second` is `O`.

use serde::{Deserialize, Serialize};

/// The contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    #[default]
    Empty,
    First,
    Second,
}

/// The two marks a player can place, in move order.
pub const PLAYER_MARKS: [Mark; 2] = [Mark::First, Mark::Second];

impl Mark {
    /// Returns the other player's mark. `Empty` has no opponent.
    pub const fn opponent(self) -> Mark {
        match self {
            Mark::First => Mark::Second,
            Mark::Second => Mark::First,
            Mark::Empty => Mark::Empty,
        }
    }

    /// True for `First` and `Second`.
    pub const fn is_player(self) -> bool {
        !matches!(self, Mark::Empty)
    }

    /// Returns the single-character board notation.
    pub const fn symbol(self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::First => 'X',
            Mark::Second => 'O',
        }
    }

    /// Parses a mark from its single-character board notation.
    pub fn from_symbol(c: char) -> Option<Mark> {
        match c {
            '.' => Some(Mark::Empty),
            'X' | 'x' => Some(Mark::First),
            'O' | 'o' => Some(Mark::Second),
            _ => None,
        }
    }

    /// Base-3 digit used by `BoardState::key`.
    pub(crate) const fn digit(self) -> u32 {
        match self {
            Mark::Empty => 0,
            Mark::First => 1,
            Mark::Second => 2,
        }
    }
}

//! The [`Cell`] type: the state of a single grid square.

use std::fmt;

/// Observable state of a grid square.
///
/// `Path`, `Wall` and `Target` are part of the static layout. `Agent` and
/// `Visited` are derived views: the agent position and the search overlay
/// are stored beside the layout, not in it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Path,
    Wall,
    Agent,
    Target,
    Visited,
}

impl Cell {
    /// Map code for an open square.
    pub const PATH_CODE: u8 = 0;
    /// Map code for a wall.
    pub const WALL_CODE: u8 = 1;
    /// Map code for the agent's starting square.
    pub const AGENT_CODE: u8 = 2;
    /// Map code for a target.
    pub const TARGET_CODE: u8 = 3;

    /// Decode a map code. `Visited` has no code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            Self::PATH_CODE => Some(Self::Path),
            Self::WALL_CODE => Some(Self::Wall),
            Self::AGENT_CODE => Some(Self::Agent),
            Self::TARGET_CODE => Some(Self::Target),
            _ => None,
        }
    }

    /// Whether the agent may stand here.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Single-character rendering used by `Display` for grids.
    pub const fn rune(self) -> char {
        match self {
            Self::Path => '.',
            Self::Wall => '#',
            Self::Agent => '@',
            Self::Target => '*',
            Self::Visited => 'o',
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rune())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_decode() {
        assert_eq!(Cell::from_code(0), Some(Cell::Path));
        assert_eq!(Cell::from_code(1), Some(Cell::Wall));
        assert_eq!(Cell::from_code(2), Some(Cell::Agent));
        assert_eq!(Cell::from_code(3), Some(Cell::Target));
        assert_eq!(Cell::from_code(4), None);
    }

    #[test]
    fn only_walls_block() {
        assert!(Cell::Visited.is_passable());
        assert!(!Cell::Wall.is_passable());
    }
}

//! Error types for map construction and grid mutation.

use std::fmt;

use crate::cell::Cell;
use crate::geom::Point;

/// Errors that can occur when building a [`Grid`](crate::Grid) from a map
/// description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The map has no rows or no columns.
    Empty,
    /// A row's length differs from the first row's.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A cell holds a code outside `0..=3`.
    InvalidCode { code: u8, pos: Point },
    /// A text map contains a character that is not a digit.
    InvalidChar { ch: char, pos: Point },
    /// No agent start (`2`) was found.
    MissingStart,
    /// More than one agent start was found.
    MultipleStarts { first: Point, second: Point },
    /// No target (`3`) was found.
    NoTargets,
    /// A stored grid buffer does not cover the map rectangle.
    SizeMismatch { expected: usize, found: usize },
    /// A stored layout holds a cell that only exists as a derived view.
    StrayCell { cell: Cell, pos: Point },
    /// A stored agent or start position is off the map or on a wall.
    BlockedAgent(Point),
    /// A stored target set disagrees with the layout at `pos`.
    TargetMismatch(Point),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "map: no cells"),
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "map: row {row} has {found} cells, expected {expected}"
            ),
            Self::InvalidCode { code, pos } => {
                write!(f, "map: invalid cell code {code} at {pos}")
            }
            Self::InvalidChar { ch, pos } => {
                write!(f, "map: invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::MissingStart => write!(f, "map: no agent start position"),
            Self::MultipleStarts { first, second } => {
                write!(f, "map: multiple agent starts at {first} and {second}")
            }
            Self::NoTargets => write!(f, "map: no targets"),
            Self::SizeMismatch { expected, found } => {
                write!(f, "map: buffer has {found} cells, expected {expected}")
            }
            Self::StrayCell { cell, pos } => {
                write!(f, "map: layout holds {cell:?} at {pos}")
            }
            Self::BlockedAgent(p) => write!(f, "map: agent position {p} is not passable"),
            Self::TargetMismatch(p) => {
                write!(f, "map: target set and layout disagree at {p}")
            }
        }
    }
}

impl std::error::Error for MapError {}

/// Contract violations on grid mutation.
///
/// Correct search logic never triggers these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// The agent was asked to move onto a wall or off the grid.
    InvalidMove(Point),
    /// A position that is not an uncollected target was collected.
    NoTarget(Point),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMove(p) => write!(f, "invalid move to {p}"),
            Self::NoTarget(p) => write!(f, "no target at {p}"),
        }
    }
}

impl std::error::Error for GridError {}

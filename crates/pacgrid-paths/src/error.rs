//! Search outcomes that are not a collected run.

use std::fmt;

use pacgrid_core::{GridError, Point};

/// Errors returned by the searches and the collection driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The frontier ran dry before `target` was reached from `from`.
    Unreachable { from: Point, target: Point },
    /// Depth-first traversal exhausted every branch with targets left.
    Unsolvable {
        /// Targets still uncollected.
        remaining: usize,
        /// Squares entered before giving up.
        entries: usize,
    },
    /// A grid contract was violated by the search itself.
    Grid(GridError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable { from, target } => {
                write!(f, "target {target} is unreachable from {from}")
            }
            Self::Unsolvable { remaining, entries } => write!(
                f,
                "traversal exhausted after {entries} entries with {remaining} targets left"
            ),
            Self::Grid(e) => write!(f, "grid contract violated: {e}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for SearchError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

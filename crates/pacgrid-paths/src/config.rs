//! Run configuration.

use std::fmt;
use std::str::FromStr;

/// Which search drives the run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strategy {
    /// One exhaustive depth-first traversal with backtracking.
    Dfs,
    /// Breadth-first search per target.
    #[default]
    Bfs,
    /// A* with a Manhattan heuristic per target.
    Astar,
}

impl Strategy {
    /// All strategies, in declaration order.
    pub const ALL: [Strategy; 3] = [Strategy::Dfs, Strategy::Bfs, Strategy::Astar];

    /// Lower-case name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dfs => "dfs",
            Self::Bfs => "bfs",
            Self::Astar => "astar",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Error returned when a strategy name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrategyError(String);

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown strategy \u{201c}{}\u{201d} (expected dfs, bfs or astar)",
            self.0
        )
    }
}

impl std::error::Error for ParseStrategyError {}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dfs" => Ok(Self::Dfs),
            "bfs" => Ok(Self::Bfs),
            "astar" | "a*" | "a-star" => Ok(Self::Astar),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// What depth-first traversal does with a square's visited mark after a
/// branch below it returns.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Backtrack {
    /// Marks stay for the whole traversal. Every square is entered at most
    /// once per incoming edge.
    #[default]
    KeepMarks,
    /// Marks are cleared on the way back, so a square may be entered again
    /// along a different branch. Terminates, but may explore exponentially
    /// many branches on open maps.
    ClearMarks,
}

/// What the per-target driver does when a target cannot be reached.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OnUnreachable {
    /// Stop the run with [`SearchError::Unreachable`](crate::SearchError).
    #[default]
    Abort,
    /// Leave the target uncollected and move on to the next one.
    Skip,
}

/// Options for a collection run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    pub strategy: Strategy,
    pub backtrack: Backtrack,
    pub on_unreachable: OnUnreachable,
}

impl RunConfig {
    /// Default options with the given strategy.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Set the strategy (builder).
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the depth-first backtrack policy (builder).
    pub fn with_backtrack(mut self, backtrack: Backtrack) -> Self {
        self.backtrack = backtrack;
        self
    }

    /// Set the unreachable-target policy (builder).
    pub fn with_on_unreachable(mut self, on_unreachable: OnUnreachable) -> Self {
        self.on_unreachable = on_unreachable;
        self
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_from_partial_json() {
        let c: RunConfig = serde_json::from_str(r#"{"strategy":"astar"}"#).unwrap();
        assert_eq!(c, RunConfig::new(Strategy::Astar));
        let c: RunConfig =
            serde_json::from_str(r#"{"backtrack":"clear_marks","on_unreachable":"skip"}"#)
                .unwrap();
        assert_eq!(c.backtrack, Backtrack::ClearMarks);
        assert_eq!(c.on_unreachable, OnUnreachable::Skip);
    }
}

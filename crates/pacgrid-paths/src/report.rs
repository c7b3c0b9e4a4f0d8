//! Run results.

use pacgrid_core::Point;

use crate::config::Strategy;

/// One collected target and the agent moves spent reaching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    pub target: Point,
    /// Moves since the previous collection. For depth-first runs this
    /// includes backtracking moves.
    pub steps: usize,
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    pub strategy: Strategy,
    /// True iff every target was collected.
    pub done: bool,
    /// Primitive search steps: squares entered for depth-first runs,
    /// frontier pops for breadth-first and A* runs.
    pub steps: usize,
    /// Collected targets, in collection order.
    pub collected: Vec<Leg>,
    /// Targets left behind because they could not be reached.
    pub skipped: Vec<Point>,
}

impl RunReport {
    pub(crate) fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            done: false,
            steps: 0,
            collected: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Total agent moves over the whole run.
    pub fn moves(&self) -> usize {
        self.collected.iter().map(|l| l.steps).sum()
    }

    /// Collected targets in order.
    pub fn targets(&self) -> impl Iterator<Item = Point> + '_ {
        self.collected.iter().map(|l| l.target)
    }
}

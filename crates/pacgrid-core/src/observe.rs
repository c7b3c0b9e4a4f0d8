//! Observation hook for renderers and recorders.
//!
//! Searches report every agent move and overlay transition through an
//! [`Observer`]. Observers get a shared borrow of the grid, so they can draw
//! it but never change it. `()` is the headless observer.

use std::fmt;

use crate::geom::Point;
use crate::grid::Grid;

/// Something that happened to the grid during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// A new leg towards `target` starts from `from`.
    LegStarted { from: Point, target: Point },
    /// A search popped `pos` from its frontier and marked it visited.
    Expanded(Point),
    /// The agent moved from one square to an adjacent one.
    Moved { from: Point, to: Point },
    /// `pos` received a visited mark.
    Visited(Point),
    /// `pos` lost its visited mark.
    Unvisited(Point),
    /// Every visited mark was cleared at once.
    OverlayReset,
    /// The agent returned to `pos` after exhausting a branch.
    Backtracked(Point),
    /// The target at `pos` was collected.
    Collected(Point),
    /// The run ended; `done` is true iff every target was collected.
    Finished { done: bool },
}

impl fmt::Display for Event {
    /// Short annotation suitable for a status line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LegStarted { from, target } => write!(f, "heading from {from} to {target}"),
            Self::Expanded(p) => write!(f, "expanding {p}"),
            Self::Moved { from, to } => write!(f, "move {from} -> {to}"),
            Self::Visited(p) => write!(f, "visited {p}"),
            Self::Unvisited(p) => write!(f, "unvisited {p}"),
            Self::OverlayReset => write!(f, "overlay cleared"),
            Self::Backtracked(p) => write!(f, "backtracking to {p}"),
            Self::Collected(p) => write!(f, "target collected at {p}!"),
            Self::Finished { done: true } => write!(f, "all targets collected"),
            Self::Finished { done: false } => write!(f, "finished with targets left"),
        }
    }
}

/// Receives a notification after each grid transition.
pub trait Observer {
    fn observe(&mut self, grid: &Grid, event: &Event);
}

impl Observer for () {
    #[inline]
    fn observe(&mut self, _grid: &Grid, _event: &Event) {}
}

impl<O: Observer + ?Sized> Observer for &mut O {
    #[inline]
    fn observe(&mut self, grid: &Grid, event: &Event) {
        (**self).observe(grid, event);
    }
}

/// Observer that keeps every event, and optionally a rendered snapshot of
/// the grid after each one.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    events: Vec<Event>,
    snapshots: Option<Vec<String>>,
}

impl Recorder {
    /// Record events only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record events and a text snapshot of the grid after each one.
    pub fn with_snapshots() -> Self {
        Self {
            events: Vec::new(),
            snapshots: Some(Vec::new()),
        }
    }

    /// Recorded events, oldest first.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Recorded snapshots, if enabled.
    pub fn snapshots(&self) -> Option<&[String]> {
        self.snapshots.as_deref()
    }

    /// Number of events matching `pred`.
    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    /// The agent's trail: the start of the first move, then every
    /// destination in order.
    pub fn trail(&self) -> Vec<Point> {
        let mut trail = Vec::new();
        for e in &self.events {
            if let Event::Moved { from, to } = *e {
                if trail.is_empty() {
                    trail.push(from);
                }
                trail.push(to);
            }
        }
        trail
    }
}

impl Observer for Recorder {
    fn observe(&mut self, grid: &Grid, event: &Event) {
        self.events.push(event.clone());
        if let Some(snaps) = self.snapshots.as_mut() {
            snaps.push(grid.to_string());
        }
    }
}

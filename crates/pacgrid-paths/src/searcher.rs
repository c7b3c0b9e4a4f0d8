use std::collections::{BinaryHeap, VecDeque};

use pacgrid_core::{Event, Grid, Observer, Point, Range};

use crate::astar::{HeuristicCache, OpenEntry};
use crate::dfs::Frame;
use crate::neighbors::Neighbors;
use crate::reconstruct::Parents;

// ---------------------------------------------------------------------------
// Searcher
// ---------------------------------------------------------------------------

/// Central coordinator for searches on one grid.
///
/// `Searcher` owns every scratch structure the searches need (parent links,
/// the BFS queue, the A* open list and heuristic cache, the depth-first
/// stack) so that the per-target legs of a run reuse the same allocations.
/// The visited overlay lives on the [`Grid`] itself.
pub struct Searcher {
    pub(crate) rng: Range,
    pub(crate) parents: Parents,
    // BFS
    pub(crate) queue: VecDeque<(Point, Point)>,
    // A*
    pub(crate) open: BinaryHeap<OpenEntry>,
    pub(crate) heuristic: HeuristicCache,
    pub(crate) seq: u64,
    // depth-first
    pub(crate) stack: Vec<Frame>,
    // shared scratch buffer for neighbor queries
    pub(crate) neighbors: Neighbors,
    /// Frontier pops (BFS/A*) or squares entered (DFS) since the last reset.
    pub(crate) steps: usize,
}

impl Searcher {
    /// Create a new `Searcher` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            parents: Parents::new(rng),
            queue: VecDeque::new(),
            open: BinaryHeap::new(),
            heuristic: HeuristicCache::new(rng),
            seq: 0,
            stack: Vec::new(),
            neighbors: Neighbors::new(),
            steps: 0,
        }
    }

    /// Create a `Searcher` sized for `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.bounds())
    }

    /// The grid rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Primitive steps counted since the last [`reset_steps`](Self::reset_steps).
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Zero the step counter.
    pub fn reset_steps(&mut self) {
        self.steps = 0;
    }

    /// Parent links left by the last breadth-first or A* search.
    pub fn parents(&self) -> &Parents {
        &self.parents
    }

    /// Adopt `grid`'s rectangle if it differs from the current one.
    pub(crate) fn prepare(&mut self, grid: &Grid) {
        let rng = grid.bounds();
        if rng != self.rng {
            self.rng = rng;
            self.parents.set_range(rng);
            self.heuristic.set_range(rng);
        }
    }
}

/// Mark `p` visited and tell the observer if the mark changed.
pub(crate) fn mark<O: Observer>(grid: &mut Grid, p: Point, obs: &mut O) {
    if grid.mark_visited(p) {
        obs.observe(grid, &Event::Visited(p));
    }
}

/// Clear the whole overlay and tell the observer if any mark was set.
pub(crate) fn reset_overlay<O: Observer>(grid: &mut Grid, obs: &mut O) {
    if grid.visited_count() > 0 {
        grid.reset_visited();
        obs.observe(grid, &Event::OverlayReset);
    }
}

/// Clear `p`'s mark and tell the observer if it changed.
pub(crate) fn unmark<O: Observer>(grid: &mut Grid, p: Point, obs: &mut O) {
    if grid.clear_visited(p) {
        obs.observe(grid, &Event::Unvisited(p));
    }
}

/// Step the agent onto an adjacent square and report the move.
pub(crate) fn step<O: Observer>(
    grid: &mut Grid,
    to: Point,
    obs: &mut O,
) -> Result<(), pacgrid_core::GridError> {
    let from = grid.agent();
    grid.move_agent_to(to)?;
    obs.observe(grid, &Event::Moved { from, to });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_follows_grid_size() {
        let small = Grid::parse("2 3").unwrap();
        let big = Grid::parse("2 0 0\n0 0 0\n0 0 3").unwrap();
        let mut s = Searcher::for_grid(&small);
        assert_eq!(s.range(), small.bounds());
        s.prepare(&big);
        assert_eq!(s.range(), big.bounds());
        assert_eq!(s.parents().range(), big.bounds());
    }

    #[test]
    fn step_reports_move() {
        let mut g = Grid::parse("2 3").unwrap();
        let mut rec = pacgrid_core::Recorder::new();
        step(&mut g, Point::at(0, 1), &mut rec).unwrap();
        assert_eq!(
            rec.events(),
            &[Event::Moved {
                from: Point::at(0, 0),
                to: Point::at(0, 1),
            }]
        );
        assert!(step(&mut g, Point::at(0, 2), &mut rec).is_err());
        assert_eq!(rec.events().len(), 1);
    }
}

use pacgrid_core::{Event, Grid, Observer, Point, Range};

use crate::distance::manhattan;
use crate::error::SearchError;
use crate::searcher::{Searcher, mark, reset_overlay};

// ---------------------------------------------------------------------------
// Open list entry
// ---------------------------------------------------------------------------

/// A frontier entry, ordered by `f` and then by insertion sequence for use
/// in `BinaryHeap`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct OpenEntry {
    pub(crate) f: i32,
    pub(crate) seq: u64,
    pub(crate) g: i32,
    pub(crate) pos: Point,
    pub(crate) parent: Point,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first, and the
        // earliest push among equal f.
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Heuristic cache
// ---------------------------------------------------------------------------

/// Per-square cache of the Manhattan estimate to the current goal.
///
/// Entries are invalidated lazily by bumping the generation at the start of
/// each search.
pub(crate) struct HeuristicCache {
    rng: Range,
    values: Vec<i32>,
    generations: Vec<u32>,
    generation: u32,
}

impl HeuristicCache {
    pub(crate) fn new(rng: Range) -> Self {
        Self {
            rng,
            values: vec![0; rng.len()],
            generations: vec![0; rng.len()],
            generation: 0,
        }
    }

    pub(crate) fn set_range(&mut self, rng: Range) {
        self.rng = rng;
        if rng.len() > self.values.len() {
            self.values.resize(rng.len(), 0);
            self.generations.resize(rng.len(), 0);
        }
        self.invalidate();
    }

    /// Forget every cached value.
    pub(crate) fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stale entries could alias the new generation.
            self.generations.fill(0);
            self.generation = 1;
        }
    }

    /// Estimated distance from `p` to `goal`, computed once per generation.
    pub(crate) fn estimate(&mut self, p: Point, goal: Point) -> i32 {
        let Some(i) = self.rng.index(p) else {
            return manhattan(p, goal);
        };
        if self.generations[i] != self.generation {
            self.generations[i] = self.generation;
            self.values[i] = manhattan(p, goal);
        }
        self.values[i]
    }
}

impl Searcher {
    /// Compute a shortest route from `from` to `to` using A* with the
    /// Manhattan distance as heuristic.
    ///
    /// The heuristic is consistent on a 4-connected unit-cost grid, so the
    /// first time a square is popped its cost is final; later duplicates are
    /// skipped. Among equal `f = g + h` the entry pushed first is popped
    /// first. Returns the full route (both endpoints included) or
    /// [`SearchError::Unreachable`].
    pub fn astar_path<O: Observer>(
        &mut self,
        grid: &mut Grid,
        from: Point,
        to: Point,
        obs: &mut O,
    ) -> Result<Vec<Point>, SearchError> {
        self.prepare(grid);
        self.parents.clear();
        self.open.clear();
        self.heuristic.invalidate();
        reset_overlay(grid, obs);

        if from == to {
            return Ok(vec![from]);
        }
        if !grid.is_passable(to) {
            return Err(SearchError::Unreachable { from, target: to });
        }

        mark(grid, from, obs);
        for &n in self
            .neighbors
            .cardinal(from, |q| grid.is_passable(q) && !grid.is_visited(q))
        {
            let h = self.heuristic.estimate(n, to);
            self.open.push(OpenEntry {
                f: 1 + h,
                seq: self.seq,
                g: 1,
                pos: n,
                parent: from,
            });
            self.seq += 1;
        }

        let found = 'search: loop {
            let Some(current) = self.open.pop() else {
                break 'search false;
            };
            let cp = current.pos;

            // Skip stale entries.
            if grid.is_visited(cp) {
                continue;
            }
            grid.mark_visited(cp);
            self.parents.set(cp, current.parent);
            self.steps += 1;
            obs.observe(grid, &Event::Expanded(cp));
            log::trace!("astar: expand {cp} g={} f={}", current.g, current.f);

            if cp == to {
                break 'search true;
            }

            let g = current.g + 1;
            for &n in self
                .neighbors
                .cardinal(cp, |q| grid.is_passable(q) && !grid.is_visited(q))
            {
                let h = self.heuristic.estimate(n, to);
                self.open.push(OpenEntry {
                    f: g + h,
                    seq: self.seq,
                    g,
                    pos: n,
                    parent: cp,
                });
                self.seq += 1;
            }
        };

        if !found {
            log::debug!("astar: {to} unreachable from {from}");
            return Err(SearchError::Unreachable { from, target: to });
        }

        self.parents
            .path(from, to)
            .ok_or(SearchError::Unreachable { from, target: to })
    }
}

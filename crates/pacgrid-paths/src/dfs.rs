//! Exhaustive depth-first collection with backtracking.
//!
//! The traversal is one continuous walk: the agent physically steps into
//! every square it explores and steps back out when a branch is exhausted.
//! Targets are collected in discovery order as the agent enters them, and
//! the walk stops the moment the last one is collected.

use pacgrid_core::{Event, Grid, Observer, Point};

use crate::config::Backtrack;
use crate::error::SearchError;
use crate::report::Leg;
use crate::searcher::{Searcher, mark, reset_overlay, step, unmark};

/// One level of the explicit traversal stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Frame {
    pub(crate) pos: Point,
    /// Index into [`Point::DIRECTIONS`] of the next direction to try.
    pub(crate) next: usize,
}

impl Searcher {
    /// Walk the grid depth-first from the agent's square, collecting targets
    /// as they are entered, until none remain.
    ///
    /// A neighbour is entered only if it is passable and unmarked; the
    /// current square is marked just before stepping into a neighbour, so
    /// squares on the active branch are never re-entered. After a branch
    /// returns, `backtrack` decides whether the mark is cleared.
    ///
    /// On success the agent stays where the last target was collected and
    /// the collected legs are returned. [`steps`](Self::steps) grows by the
    /// number of squares entered, the start included.
    pub fn dfs_collect<O: Observer>(
        &mut self,
        grid: &mut Grid,
        backtrack: Backtrack,
        obs: &mut O,
    ) -> Result<Vec<Leg>, SearchError> {
        self.prepare(grid);
        self.stack.clear();
        reset_overlay(grid, obs);

        let mut legs = Vec::new();
        let mut moves = 0;
        let mut entries = 0;

        let start = grid.agent();
        if self.enter(grid, start, &mut entries, &mut moves, &mut legs, obs)? {
            return Ok(legs);
        }
        self.stack.push(Frame {
            pos: start,
            next: 0,
        });

        while let Some(top) = self.stack.last_mut() {
            let pos = top.pos;

            if top.next == Point::DIRECTIONS.len() {
                // Branch exhausted: step back to the square below on the stack.
                self.stack.pop();
                if let Some(below) = self.stack.last() {
                    let back = below.pos;
                    step(grid, back, obs)?;
                    moves += 1;
                    obs.observe(grid, &Event::Backtracked(back));
                    if backtrack == Backtrack::ClearMarks {
                        unmark(grid, back, obs);
                    }
                }
                continue;
            }

            let n = pos + Point::DIRECTIONS[top.next];
            top.next += 1;

            if !grid.is_passable(n) || grid.is_visited(n) {
                continue;
            }

            mark(grid, pos, obs);
            step(grid, n, obs)?;
            moves += 1;
            if self.enter(grid, n, &mut entries, &mut moves, &mut legs, obs)? {
                return Ok(legs);
            }
            self.stack.push(Frame { pos: n, next: 0 });
        }

        log::debug!(
            "dfs: exhausted after {entries} entries, {} targets left",
            grid.targets().len()
        );
        Err(SearchError::Unsolvable {
            remaining: grid.targets().len(),
            entries,
        })
    }

    /// Account for entering `p`; collect it if it is a target. Returns
    /// whether that was the last target.
    fn enter<O: Observer>(
        &mut self,
        grid: &mut Grid,
        p: Point,
        entries: &mut usize,
        moves: &mut usize,
        legs: &mut Vec<Leg>,
        obs: &mut O,
    ) -> Result<bool, SearchError> {
        *entries += 1;
        self.steps += 1;
        if !grid.is_target(p) {
            return Ok(false);
        }
        grid.collect_target(p)?;
        obs.observe(grid, &Event::Collected(p));
        log::debug!("dfs: collected {p} after {} moves", *moves);
        legs.push(Leg {
            target: p,
            steps: *moves,
        });
        *moves = 0;
        Ok(grid.is_done())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacgrid_core::Recorder;

    fn collect(map: &str, backtrack: Backtrack) -> (Grid, Result<Vec<Leg>, SearchError>, usize) {
        let mut g = Grid::parse(map).unwrap();
        let mut s = Searcher::for_grid(&g);
        let r = s.dfs_collect(&mut g, backtrack, &mut ());
        let steps = s.steps();
        (g, r, steps)
    }

    #[test]
    fn open_three_by_three() {
        let (g, r, entries) = collect("2 0 0\n0 0 0\n0 0 3", Backtrack::KeepMarks);
        let legs = r.unwrap();
        assert!(g.is_done());
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].target, Point::at(2, 2));
        assert_eq!(g.agent(), Point::at(2, 2));
        assert!(entries >= 5);
        assert!(entries <= 4 * g.passable_count());
    }

    #[test]
    fn first_branch_goes_right() {
        // Right is tried before down, so the corridor along row 0 is
        // explored first and the target at its end is found without
        // backtracking.
        let (_, r, entries) = collect("2 0 3\n0 0 0", Backtrack::KeepMarks);
        assert_eq!(r.unwrap()[0].steps, 2);
        assert_eq!(entries, 3);
    }

    #[test]
    fn collects_in_discovery_order() {
        let map = "\
3 0 2 0 0 3
0 1 1 1 1 0";
        let (g, r, _) = collect(map, Backtrack::KeepMarks);
        let legs = r.unwrap();
        assert!(g.is_done());
        // Right comes before left, so the far-right target is found first.
        assert_eq!(legs[0].target, Point::at(0, 5));
        assert_eq!(legs[1].target, Point::at(0, 0));
    }

    #[test]
    fn dead_end_backtracks() {
        // Up leads into a dead end that has to be walked back out of.
        let map = "\
0 1 1
2 0 3
1 1 1";
        let mut g = Grid::parse(map).unwrap();
        let mut s = Searcher::for_grid(&g);
        let mut rec = Recorder::new();
        s.dfs_collect(&mut g, Backtrack::KeepMarks, &mut rec).unwrap();
        assert_eq!(rec.count(|e| matches!(e, Event::Backtracked(_))), 1);
        assert!(g.is_done());
        let trail = rec.trail();
        assert_eq!(
            trail,
            vec![
                Point::at(1, 0),
                Point::at(0, 0),
                Point::at(1, 0),
                Point::at(1, 1),
                Point::at(1, 2),
            ]
        );
        assert!(trail.windows(2).all(|w| w[0].is_adjacent(w[1])));
    }

    #[test]
    fn keep_marks_never_unmarks() {
        let map = "\
0 0 0
2 0 0
0 0 3";
        let mut g = Grid::parse(map).unwrap();
        let mut s = Searcher::for_grid(&g);
        let mut rec = Recorder::new();
        s.dfs_collect(&mut g, Backtrack::KeepMarks, &mut rec).unwrap();
        assert_eq!(rec.count(|e| matches!(e, Event::Unvisited(_))), 0);
    }

    #[test]
    fn clear_marks_terminates_and_collects() {
        let map = "\
2 0 0 0
0 0 1 0
0 0 0 3";
        let (g, r, _) = collect(map, Backtrack::ClearMarks);
        assert!(r.is_ok());
        assert!(g.is_done());
    }

    #[test]
    fn clear_marks_unmarks_on_backtrack() {
        let map = "\
0 1 0
2 0 1
1 3 1";
        let mut g = Grid::parse(map).unwrap();
        let mut s = Searcher::for_grid(&g);
        let mut rec = Recorder::new();
        s.dfs_collect(&mut g, Backtrack::ClearMarks, &mut rec).unwrap();
        assert!(rec.count(|e| matches!(e, Event::Unvisited(_))) > 0);
        assert!(g.is_done());
    }

    #[test]
    fn unreachable_target_is_unsolvable() {
        let map = "\
2 0 1 3
0 0 1 0";
        let (g, r, _) = collect(map, Backtrack::KeepMarks);
        assert_eq!(
            r,
            Err(SearchError::Unsolvable {
                remaining: 1,
                entries: 5,
            })
        );
        assert!(!g.is_done());
        // Fully unwound back to the start.
        assert_eq!(g.agent(), Point::at(0, 0));
    }
}

//! The collection driver.
//!
//! Breadth-first and A* runs are a loop of legs: pick the nearest
//! uncollected target, search a route to it, walk the agent along the
//! route, collect. Depth-first runs are a single traversal.

use pacgrid_core::{Event, Grid, Observer, Point};

use crate::config::{OnUnreachable, RunConfig, Strategy};
use crate::error::SearchError;
use crate::report::{Leg, RunReport};
use crate::searcher::{Searcher, mark, reset_overlay, step};
use crate::select::select_nearest;

/// Collect every target on `grid` as configured, reporting each transition
/// to `obs`.
///
/// Convenience wrapper around [`Searcher::run`] with a fresh searcher.
pub fn run<O: Observer>(
    grid: &mut Grid,
    config: &RunConfig,
    obs: &mut O,
) -> Result<RunReport, SearchError> {
    Searcher::for_grid(grid).run(grid, config, obs)
}

impl Searcher {
    /// Collect every target on `grid` as configured.
    ///
    /// Target order for breadth-first and A* runs is nearest-first from the
    /// agent's current square, re-evaluated after every collection; it is
    /// not an optimal tour.
    pub fn run<O: Observer>(
        &mut self,
        grid: &mut Grid,
        config: &RunConfig,
        obs: &mut O,
    ) -> Result<RunReport, SearchError> {
        log::info!(
            "{} run: {} targets from {}",
            config.strategy,
            grid.targets().len(),
            grid.agent()
        );
        self.reset_steps();

        let mut report = RunReport::new(config.strategy);
        match config.strategy {
            Strategy::Dfs => {
                report.collected = self.dfs_collect(grid, config.backtrack, obs)?;
            }
            Strategy::Bfs | Strategy::Astar => self.collect_legs(grid, config, obs, &mut report)?,
        }
        report.steps = self.steps;
        report.done = grid.is_done();

        obs.observe(grid, &Event::Finished { done: report.done });
        log::info!(
            "{} run finished: done={} steps={} moves={}",
            config.strategy,
            report.done,
            report.steps,
            report.moves()
        );
        Ok(report)
    }

    /// Route to the target at `to` with the configured per-target search.
    ///
    /// Depth-first runs have no per-target search of their own; asking for
    /// one routes with breadth-first search.
    pub fn find_path<O: Observer>(
        &mut self,
        strategy: Strategy,
        grid: &mut Grid,
        from: Point,
        to: Point,
        obs: &mut O,
    ) -> Result<Vec<Point>, SearchError> {
        match strategy {
            Strategy::Astar => self.astar_path(grid, from, to, obs),
            Strategy::Bfs | Strategy::Dfs => self.bfs_path(grid, from, to, obs),
        }
    }

    fn collect_legs<O: Observer>(
        &mut self,
        grid: &mut Grid,
        config: &RunConfig,
        obs: &mut O,
        report: &mut RunReport,
    ) -> Result<(), SearchError> {
        loop {
            let skipped = &report.skipped;
            let candidates = grid.targets().iter().filter(|t| !skipped.contains(*t));
            let Some(target) = select_nearest(grid.agent(), candidates) else {
                break;
            };

            let from = grid.agent();
            obs.observe(grid, &Event::LegStarted { from, target });

            let path = match self.find_path(config.strategy, grid, from, target, obs) {
                Ok(path) => path,
                Err(SearchError::Unreachable { .. })
                    if config.on_unreachable == OnUnreachable::Skip =>
                {
                    log::warn!("skipping {target}: unreachable from {from}");
                    report.skipped.push(target);
                    continue;
                }
                Err(e) => return Err(e),
            };
            log::debug!("leg {from} -> {target}: {} moves", path.len() - 1);

            // The overlay now shows the walked trail rather than the search.
            reset_overlay(grid, obs);
            mark(grid, from, obs);
            for &p in &path[1..] {
                step(grid, p, obs)?;
                mark(grid, p, obs);
            }

            grid.collect_target(target)?;
            obs.observe(grid, &Event::Collected(target));
            report.collected.push(Leg {
                target,
                steps: path.len() - 1,
            });
        }
        Ok(())
    }
}

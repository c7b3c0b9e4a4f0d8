use pacgrid_core::{Event, Grid, Observer, Point};

use crate::error::SearchError;
use crate::searcher::{Searcher, mark, reset_overlay};

impl Searcher {
    /// Compute a shortest route from `from` to `to` with breadth-first search.
    ///
    /// The grid's visited overlay is reset first and then used as the closed
    /// set: a square is marked when it is popped from the queue, and stale
    /// duplicates are skipped. Returns the full route (both endpoints
    /// included) or [`SearchError::Unreachable`] once the queue runs dry.
    pub fn bfs_path<O: Observer>(
        &mut self,
        grid: &mut Grid,
        from: Point,
        to: Point,
        obs: &mut O,
    ) -> Result<Vec<Point>, SearchError> {
        self.prepare(grid);
        self.parents.clear();
        self.queue.clear();
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
            self.queue.push_back((n, from));
        }

        let mut found = false;
        while let Some((cp, parent)) = self.queue.pop_front() {
            if grid.is_visited(cp) {
                continue;
            }
            grid.mark_visited(cp);
            self.parents.set(cp, parent);
            self.steps += 1;
            obs.observe(grid, &Event::Expanded(cp));
            log::trace!("bfs: expand {cp} from {parent}");

            if cp == to {
                found = true;
                break;
            }

            for &n in self
                .neighbors
                .cardinal(cp, |q| grid.is_passable(q) && !grid.is_visited(q))
            {
                self.queue.push_back((n, cp));
            }
        }

        if !found {
            log::debug!("bfs: {to} unreachable from {from}");
            return Err(SearchError::Unreachable { from, target: to });
        }

        self.parents
            .path(from, to)
            .ok_or(SearchError::Unreachable { from, target: to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacgrid_core::Recorder;

    fn route(map: &str, to: Point) -> Result<Vec<Point>, SearchError> {
        let mut g = Grid::parse(map).unwrap();
        let mut s = Searcher::for_grid(&g);
        let from = g.agent();
        s.bfs_path(&mut g, from, to, &mut ())
    }

    #[test]
    fn open_three_by_three() {
        let path = route("2 0 0\n0 0 0\n0 0 3", Point::at(2, 2)).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], Point::at(0, 0));
        assert_eq!(path[4], Point::at(2, 2));
        assert!(path.windows(2).all(|w| w[0].is_adjacent(w[1])));
    }

    #[test]
    fn follows_direction_order_on_ties() {
        // Up is blocked at the border, so right is explored before down.
        let path = route("2 0 0\n0 0 0\n0 0 3", Point::at(2, 2)).unwrap();
        assert_eq!(
            path,
            vec![
                Point::at(0, 0),
                Point::at(0, 1),
                Point::at(0, 2),
                Point::at(1, 2),
                Point::at(2, 2),
            ]
        );
    }

    #[test]
    fn routes_around_walls() {
        let map = "\
2 1 3
0 1 0
0 0 0";
        let path = route(map, Point::at(0, 2)).unwrap();
        assert_eq!(path.len() - 1, 6);
    }

    #[test]
    fn walled_in_target_is_unreachable() {
        let map = "\
2 0 0 0 0
0 0 1 0 0
0 1 3 1 0
0 0 1 0 0";
        assert_eq!(
            route(map, Point::at(2, 2)),
            Err(SearchError::Unreachable {
                from: Point::at(0, 0),
                target: Point::at(2, 2),
            })
        );
    }

    #[test]
    fn wall_goal_is_unreachable() {
        assert!(matches!(
            route("2 1 3", Point::at(0, 1)),
            Err(SearchError::Unreachable { .. })
        ));
    }

    #[test]
    fn same_square() {
        assert_eq!(route("2 3", Point::at(0, 0)), Ok(vec![Point::at(0, 0)]));
    }

    #[test]
    fn expansions_are_reported() {
        let mut g = Grid::parse("2 0 3").unwrap();
        let mut s = Searcher::for_grid(&g);
        let mut rec = Recorder::new();
        s.bfs_path(&mut g, Point::at(0, 0), Point::at(0, 2), &mut rec)
            .unwrap();
        assert_eq!(
            rec.events(),
            &[
                Event::Visited(Point::at(0, 0)),
                Event::Expanded(Point::at(0, 1)),
                Event::Expanded(Point::at(0, 2)),
            ]
        );
        assert_eq!(s.steps(), 2);
        // The search never moves the agent.
        assert_eq!(g.agent(), Point::at(0, 0));
    }

    #[test]
    fn parents_rederive_to_same_route() {
        let mut g = Grid::parse("2 0 0 0\n0 1 1 0\n0 0 0 3").unwrap();
        let mut s = Searcher::for_grid(&g);
        let path = s
            .bfs_path(&mut g, Point::at(0, 0), Point::at(2, 3), &mut ())
            .unwrap();
        let back = crate::Parents::from_path(g.bounds(), &path);
        assert_eq!(back.path(path[0], *path.last().unwrap()), Some(path));
    }
}

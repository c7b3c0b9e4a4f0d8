use pacgrid_core::{Cell, Grid, Point};
use pacgrid_paths::{Parents, RunConfig, SearchError, Searcher, Strategy as Plan, manhattan, run};
use proptest::prelude::*;

/// A random map with the start in the top-left corner and one target.
fn arb_map() -> impl Strategy<Value = Vec<Vec<u8>>> {
    (2usize..9, 2usize..9).prop_flat_map(|(w, h)| {
        (
            prop::collection::vec(prop::bool::weighted(0.3), w * h),
            0..w * h,
        )
            .prop_map(move |(walls, target)| {
                let target = if target == 0 { w * h - 1 } else { target };
                (0..h)
                    .map(|y| {
                        (0..w)
                            .map(|x| {
                                let i = y * w + x;
                                if i == 0 {
                                    Cell::AGENT_CODE
                                } else if i == target {
                                    Cell::TARGET_CODE
                                } else if walls[i] {
                                    Cell::WALL_CODE
                                } else {
                                    Cell::PATH_CODE
                                }
                            })
                            .collect()
                    })
                    .collect()
            })
    })
}

fn target_of(g: &Grid) -> Point {
    *g.targets().first().unwrap()
}

proptest! {
    #[test]
    fn bfs_and_astar_agree(rows in arb_map()) {
        let mut a = Grid::from_rows(&rows).unwrap();
        let mut b = a.clone();
        let to = target_of(&a);
        let mut s = Searcher::for_grid(&a);
        let bfs = s.bfs_path(&mut a, Point::ZERO, to, &mut ());
        let astar = s.astar_path(&mut b, Point::ZERO, to, &mut ());
        match (bfs, astar) {
            (Ok(p), Ok(q)) => {
                prop_assert_eq!(p.len(), q.len());
                prop_assert!(p.len() as i32 - 1 >= manhattan(Point::ZERO, to));
            }
            (Err(e), Err(f)) => {
                prop_assert_eq!(e, f);
            }
            (p, q) => prop_assert!(false, "bfs {:?} vs astar {:?}", p, q),
        }
    }

    #[test]
    fn routes_are_walkable(rows in arb_map()) {
        let mut g = Grid::from_rows(&rows).unwrap();
        let to = target_of(&g);
        let mut s = Searcher::for_grid(&g);
        if let Ok(path) = s.astar_path(&mut g, Point::ZERO, to, &mut ()) {
            prop_assert_eq!(path.first(), Some(&Point::ZERO));
            prop_assert_eq!(path.last(), Some(&to));
            prop_assert!(path.iter().all(|&p| g.is_passable(p)));
            prop_assert!(path.windows(2).all(|w| w[0].is_adjacent(w[1])));
        }
    }

    #[test]
    fn parent_links_round_trip(rows in arb_map()) {
        let mut g = Grid::from_rows(&rows).unwrap();
        let to = target_of(&g);
        let mut s = Searcher::for_grid(&g);
        if let Ok(path) = s.bfs_path(&mut g, Point::ZERO, to, &mut ()) {
            let rederived = Parents::from_path(g.bounds(), &path);
            prop_assert_eq!(rederived.path(Point::ZERO, to), Some(path.clone()));
            for w in path.windows(2) {
                prop_assert_eq!(s.parents().get(w[1]), Some(w[0]));
            }
        }
    }

    #[test]
    fn dfs_terminates_within_bound(rows in arb_map()) {
        let mut g = Grid::from_rows(&rows).unwrap();
        let to = target_of(&g);
        let reachable = Searcher::for_grid(&g)
            .bfs_path(&mut g.clone(), Point::ZERO, to, &mut ())
            .is_ok();
        let passable = g.passable_count();
        match run(&mut g, &RunConfig::new(Plan::Dfs), &mut ()) {
            Ok(report) => {
                prop_assert!(reachable);
                prop_assert!(report.done);
                prop_assert!(report.steps <= 4 * passable);
            }
            Err(SearchError::Unsolvable { remaining, entries }) => {
                prop_assert!(!reachable);
                prop_assert_eq!(remaining, 1);
                prop_assert!(entries <= 4 * passable);
            }
            Err(e) => prop_assert!(false, "unexpected {}", e),
        }
    }

    #[test]
    fn done_iff_targets_empty(rows in arb_map(), astar in any::<bool>()) {
        let mut g = Grid::from_rows(&rows).unwrap();
        let plan = if astar { Plan::Astar } else { Plan::Bfs };
        match run(&mut g, &RunConfig::new(plan), &mut ()) {
            Ok(report) => {
                prop_assert!(report.done);
                prop_assert!(g.is_done());
                prop_assert_eq!(report.collected.len(), 1);
            }
            Err(SearchError::Unreachable { .. }) => prop_assert!(!g.is_done()),
            Err(e) => prop_assert!(false, "unexpected {}", e),
        }
    }
}

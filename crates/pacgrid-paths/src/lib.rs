//! Target collection on pacgrid maps.
//!
//! This crate drives an agent over a [`Grid`](pacgrid_core::Grid) until every
//! target is collected, with one of three interchangeable strategies:
//!
//! - **DFS** one exhaustive depth-first traversal with backtracking
//!   ([`Searcher::dfs_collect`])
//! - **BFS** shortest routes per target ([`Searcher::bfs_path`])
//! - **A\*** shortest routes per target with a Manhattan heuristic
//!   ([`Searcher::astar_path`])
//!
//! BFS and A* runs pick targets nearest-first ([`select_nearest`]) and
//! rebuild each route from parent links ([`Parents`]). All searches operate
//! through [`Searcher`], which owns and reuses the scratch structures, and
//! report every grid transition to an [`Observer`](pacgrid_core::Observer).
//!
//! # Strategies
//!
//! | Strategy | Target order | Route per target |
//! |---|---|---|
//! | [`Strategy::Dfs`] | discovery order | no, one continuous walk |
//! | [`Strategy::Bfs`] | nearest first | shortest |
//! | [`Strategy::Astar`] | nearest first | shortest |

mod astar;
mod bfs;
mod config;
mod dfs;
mod distance;
mod error;
mod neighbors;
mod reconstruct;
mod report;
mod run;
mod searcher;
mod select;

pub use config::{Backtrack, OnUnreachable, ParseStrategyError, RunConfig, Strategy};
pub use distance::manhattan;
pub use error::SearchError;
pub use neighbors::Neighbors;
pub use reconstruct::Parents;
pub use report::{Leg, RunReport};
pub use run::run;
pub use searcher::Searcher;
pub use select::select_nearest;

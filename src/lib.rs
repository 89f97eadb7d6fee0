//! # grid_astar
//!
//! Steppable [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) pathfinding on a
//! grid. Agents move in the 8-neighborhood: cardinal moves cost 1.0 and diagonal
//! moves cost 1.4, while the heuristic is the straight-line (Euclidean) distance
//! to the goal.
//!
//! A search can be run to completion, observed through a callback, or advanced
//! one node expansion at a time, which is handy for animating the search. The
//! cost fields of every cell stay readable on the [Grid] afterwards.
//!
//! ```
//! use grid_astar::{find_path, Grid, Point};
//!
//! //  ___
//! // |S  |
//! // | # |
//! // |  G|
//! //  ___
//! let mut grid = Grid::with_obstacles(3, 3, [Point::new(1, 1)]).unwrap();
//! let result = find_path(&mut grid, Point::new(0, 0), Point::new(2, 2)).unwrap();
//! let path = result.into_path().unwrap();
//! assert_eq!(path.len(), 4);
//! ```
//!
//! Stepping through a search:
//! ```
//! use grid_astar::{AstarSolver, Grid, Point, SearchEvent};
//!
//! let mut grid = Grid::new(4, 4).unwrap();
//! let solver = AstarSolver::new();
//! let mut search = solver.search(&mut grid, Point::new(0, 0), Point::new(3, 2)).unwrap();
//! while let Some(event) = search.step() {
//!     if let SearchEvent::Visited(visit) = event {
//!         println!("{:?}: f = {}", visit.point, visit.f_cost);
//!     }
//! }
//! assert!(search.result().unwrap().is_found());
//! ```
mod error;
mod grid;
mod path;
#[cfg(feature = "scenario")]
pub mod scenario;
mod search;
pub mod solver;

pub use crate::error::{Endpoint, EndpointIssue, Error, Result};
pub use crate::grid::{Cell, Grid, NEIGHBOR_OFFSETS};
pub use crate::path::Path;
pub use crate::search::{PathResult, Search, SearchEvent, Visit};
pub use crate::solver::{astar::AstarSolver, SearchConfig};
pub use grid_util::Point;

/// Cost of a horizontal or vertical move.
pub const CARDINAL_COST: f32 = 1.0;
/// Cost of a diagonal move, an approximation of sqrt(2).
pub const DIAGONAL_COST: f32 = 1.4;

const N_SMALLVEC_SIZE: usize = 8;

/// Finds a path from `start` to `goal` with the default [SearchConfig].
pub fn find_path(grid: &mut Grid, start: Point, goal: Point) -> Result<PathResult> {
    AstarSolver::new().find_path(grid, start, goal)
}

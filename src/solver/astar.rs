use grid_util::Point;
use itertools::Itertools;

use crate::error::Result;
use crate::grid::Grid;
use crate::search::{PathResult, Search, SearchEvent};
use crate::solver::SearchConfig;

/// Entry point for A* searches on a [Grid].
///
/// The solver only holds the [SearchConfig]; all per-search state lives in the
/// [Search] it creates, so one solver can be reused for any number of grids.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver {
    pub config: SearchConfig,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(config: SearchConfig) -> AstarSolver {
        AstarSolver { config }
    }

    /// Starts a search that is advanced with [Search::step] or by iterating it.
    pub fn search<'g>(&self, grid: &'g mut Grid, start: Point, goal: Point) -> Result<Search<'g>> {
        Search::new(grid, start, goal, self.config)
    }

    /// Runs a search to completion.
    pub fn find_path(&self, grid: &mut Grid, start: Point, goal: Point) -> Result<PathResult> {
        Ok(self.search(grid, start, goal)?.run())
    }

    /// Runs a search to completion, calling `observer` with every
    /// [SearchEvent] as it happens.
    pub fn find_path_with<F>(
        &self,
        grid: &mut Grid,
        start: Point,
        goal: Point,
        observer: F,
    ) -> Result<PathResult>
    where
        F: FnMut(&SearchEvent),
    {
        Ok(self.search(grid, start, goal)?.run_with(observer))
    }

    /// Total movement cost of walking along `path`, which has to consist of adjacent points.
    pub fn path_cost(&self, path: &[Point]) -> f32 {
        path.iter()
            .tuple_windows()
            .map(|(a, b)| self.config.step_cost(*a, *b))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let mut grid = Grid::new(1, 1).unwrap();
        let solver = AstarSolver::new();
        let start = Point::new(0, 0);
        let path = solver
            .find_path(&mut grid, start, start)
            .unwrap()
            .into_path()
            .unwrap();
        assert_eq!(path, vec![start]);
        assert_eq!(path.cost(), 0.0);
    }

    /// Asserts that the optimal 3 step detour around the center is found.
    #[test]
    fn solve_simple_problem() {
        let mut grid = Grid::with_obstacles(3, 3, [Point::new(1, 1)]).unwrap();
        let solver = AstarSolver::new();

        let start = Point::new(0, 0);
        let end = Point::new(2, 2);
        let path = solver
            .find_path(&mut grid, start, end)
            .unwrap()
            .into_path()
            .unwrap();
        assert_eq!(path.len(), 4);
        assert!(approx(path.cost(), 3.4));
        assert!(!path.points().contains(&Point::new(1, 1)));
        assert!(approx(solver.path_cost(path.points()), path.cost()));
    }

    #[test]
    fn straight_diagonal() {
        let mut grid = Grid::new(5, 5).unwrap();
        let solver = AstarSolver::new();
        let path = solver
            .find_path(&mut grid, Point::new(0, 0), Point::new(4, 4))
            .unwrap()
            .into_path()
            .unwrap();
        let expected: Vec<Point> = (0..5).map(|i| Point::new(i, i)).collect();
        assert_eq!(path, expected);
        assert!(approx(path.cost(), 5.6));
    }

    #[test]
    fn test_complex() {
        let mut grid = Grid::new(10, 10).unwrap();
        for p in [(1, 1), (5, 0), (0, 5), (8, 8)] {
            grid.set_traversable(Point::new(p.0, p.1), false).unwrap();
        }
        let solver = AstarSolver::new();
        let path = solver
            .find_path(&mut grid, Point::new(0, 0), Point::new(7, 7))
            .unwrap()
            .into_path()
            .unwrap();
        // One cardinal detour around (1, 1) on top of the pure diagonal
        assert_eq!(path.len(), 9);
        assert!(approx(path.cost(), 6.0 * 1.4 + 2.0));
    }

    #[test]
    fn exact_diagonal_cost() {
        let mut grid = Grid::new(4, 4).unwrap();
        let solver = AstarSolver::with_config(SearchConfig::exact());
        let path = solver
            .find_path(&mut grid, Point::new(3, 0), Point::new(0, 3))
            .unwrap()
            .into_path()
            .unwrap();
        assert_eq!(path.len(), 4);
        assert!(approx(path.cost(), 3.0 * std::f32::consts::SQRT_2));
    }

    #[test]
    fn weighted_search_still_reaches_goal() {
        let mut grid = Grid::with_obstacles(
            8,
            8,
            (0..7).map(|y| Point::new(4, y)),
        )
        .unwrap();
        let solver = AstarSolver::with_config(SearchConfig::default().with_heuristic_factor(1.5));
        let result = solver
            .find_path(&mut grid, Point::new(0, 0), Point::new(7, 0))
            .unwrap();
        let path = result.path().unwrap();
        assert_eq!(path.goal(), Some(Point::new(7, 0)));
        assert!(path.points().contains(&Point::new(4, 7)));
    }

    #[test]
    fn blocked_goal_is_invalid_endpoint() {
        let mut grid = Grid::with_obstacles(3, 3, [Point::new(2, 2)]).unwrap();
        let solver = AstarSolver::new();
        let mut events = 0;
        let result =
            solver.find_path_with(&mut grid, Point::new(0, 0), Point::new(2, 2), |_| events += 1);
        assert!(matches!(result, Err(Error::InvalidEndpoint { .. })));
        assert_eq!(events, 0);
    }

    #[test]
    fn path_cost_of_mixed_moves() {
        let solver = AstarSolver::new();
        let path = [
            Point::new(0, 0),
            Point::new(1, 1),
            Point::new(2, 1),
            Point::new(3, 0),
        ];
        assert!(approx(solver.path_cost(&path), 1.4 + 1.0 + 1.4));
        assert_eq!(solver.path_cost(&path[..1]), 0.0);
    }
}

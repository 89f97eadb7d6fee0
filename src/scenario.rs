//! Random maps for demos, benchmarks and tests.
//!
//! A [RandomScenario] produces a [Scenario]: a grid with scattered obstacles
//! and a start and goal that are both traversable and some distance apart.
//! Nothing guarantees that the goal is reachable; a walled-off goal is a
//! legitimate scenario.
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::search::Search;
use crate::solver::astar::AstarSolver;
use grid_util::Point;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

const MAX_ENDPOINT_ATTEMPTS: usize = 10_000;

/// A grid together with the endpoints of a search on it.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub grid: Grid,
    pub start: Point,
    pub goal: Point,
}

impl Scenario {
    /// Starts a search between the scenario's endpoints.
    pub fn search(&mut self, solver: &AstarSolver) -> Result<Search<'_>> {
        solver.search(&mut self.grid, self.start, self.goal)
    }
}

/// Settings for generating a [Scenario].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomScenario {
    pub width: usize,
    pub height: usize,
    /// Number of distinct cells to block.
    pub obstacle_count: usize,
    /// Minimal Manhattan distance between start and goal.
    pub min_separation: usize,
}

impl RandomScenario {
    /// `width + 5` obstacles and a start and goal at least `width / 2 + 1` apart.
    pub fn new(width: usize, height: usize) -> RandomScenario {
        RandomScenario {
            width,
            height,
            obstacle_count: width + 5,
            min_separation: width / 2 + 1,
        }
    }

    pub fn with_obstacle_count(mut self, obstacle_count: usize) -> RandomScenario {
        self.obstacle_count = obstacle_count;
        self
    }

    pub fn with_min_separation(mut self, min_separation: usize) -> RandomScenario {
        self.min_separation = min_separation;
        self
    }

    /// Picks start and goal first and then blocks `obstacle_count` other cells.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Scenario> {
        let mut grid = Grid::new(self.width, self.height)?;
        let cell_count = self.width * self.height;
        if cell_count < 2 {
            return Err(Error::Scenario(format!(
                "a {}x{} grid cannot hold distinct start and goal cells",
                self.width, self.height
            )));
        }
        if self.obstacle_count > cell_count - 2 {
            return Err(Error::Scenario(format!(
                "{} obstacles do not fit next to start and goal on a {}x{} grid",
                self.obstacle_count, self.width, self.height
            )));
        }
        let max_separation = self.width + self.height - 2;
        if self.min_separation > max_separation {
            return Err(Error::Scenario(format!(
                "no two cells of a {}x{} grid are {} apart",
                self.width, self.height, self.min_separation
            )));
        }

        let (start, goal) = self.pick_endpoints(rng)?;
        let mut candidates: Vec<Point> = grid
            .cells()
            .map(|c| c.point())
            .filter(|&p| p != start && p != goal)
            .collect();
        let (obstacles, _) = candidates.partial_shuffle(rng, self.obstacle_count);
        for &p in obstacles.iter() {
            grid.set_traversable(p, false)?;
        }
        grid.update();
        debug!(
            "Generated {}x{} scenario from {} to {} with {} obstacles",
            self.width, self.height, start, goal, self.obstacle_count
        );
        Ok(Scenario { grid, start, goal })
    }

    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        Point::new(
            rng.gen_range(0..self.width) as i32,
            rng.gen_range(0..self.height) as i32,
        )
    }

    fn pick_endpoints<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(Point, Point)> {
        for _ in 0..MAX_ENDPOINT_ATTEMPTS {
            let start = self.random_point(rng);
            let goal = self.random_point(rng);
            let separation = (start.x - goal.x).unsigned_abs() + (start.y - goal.y).unsigned_abs();
            if start != goal && separation as usize >= self.min_separation {
                return Ok((start, goal));
            }
        }
        Err(Error::Scenario(format!(
            "no start and goal {} apart found after {} attempts",
            self.min_separation, MAX_ENDPOINT_ATTEMPTS
        )))
    }
}

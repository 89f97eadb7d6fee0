//! Incremental A* over a [Grid].
//!
//! A [Search] performs one node expansion per [step](Search::step) and reports
//! what it did as a [SearchEvent]. It can be driven step by step (for example
//! once per frame of an animation), consumed as an iterator, or run to
//! completion with an optional observer callback.
use crate::error::{Endpoint, EndpointIssue, Error, Result};
use crate::grid::{Cell, Grid};
use crate::path::Path;
use crate::solver::SearchConfig;
use fxhash::FxBuildHasher;
use grid_util::Point;
use indexmap::IndexSet;
use log::{debug, info, trace};
use std::cmp::Ordering;
use std::iter::FusedIterator;

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// The cost fields of a cell at the moment it was moved to the closed set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Visit {
    pub point: Point,
    pub g_cost: f32,
    pub h_cost: f32,
    pub f_cost: f32,
}

impl Visit {
    fn of(cell: &Cell) -> Visit {
        Visit {
            point: cell.point(),
            g_cost: cell.g_cost(),
            h_cost: cell.h_cost(),
            f_cost: cell.f_cost(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SearchEvent {
    /// A cell was taken from the open set and closed.
    Visited(Visit),
    /// Terminal: the goal was reached.
    PathFound(Path),
    /// Terminal: the open set ran empty before the goal was reached.
    NoPath,
}

impl SearchEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SearchEvent::Visited(_))
    }
}

/// Outcome of a completed search. Not finding a path is a regular outcome, not an error.
#[derive(Clone, Debug, PartialEq)]
pub enum PathResult {
    Found(Path),
    NoPath,
}

impl PathResult {
    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found(_))
    }
    pub fn path(&self) -> Option<&Path> {
        match self {
            PathResult::Found(path) => Some(path),
            PathResult::NoPath => None,
        }
    }
    pub fn into_path(self) -> Option<Path> {
        match self {
            PathResult::Found(path) => Some(path),
            PathResult::NoPath => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Expanding,
    /// The goal is closed, the next step reports the path.
    Reached,
    Finished,
}

/// A single in-flight A* search.
///
/// The search borrows the grid mutably for its whole lifetime, so the grid
/// cannot be edited or searched by anybody else in the meantime. Dropping the
/// search between steps abandons it; the costs it left behind are cleared by
/// the next search.
#[derive(Debug)]
pub struct Search<'g> {
    grid: &'g mut Grid,
    config: SearchConfig,
    start: usize,
    goal: usize,
    open: FxIndexSet<usize>,
    closed: Vec<bool>,
    current: Option<usize>,
    phase: Phase,
    expansions: usize,
    result: Option<PathResult>,
}

fn endpoint_index(grid: &Grid, point: Point, endpoint: Endpoint) -> Result<usize> {
    let issue = match grid.index_of(point) {
        Some(ix) if grid.cell_at(ix).is_traversable() => return Ok(ix),
        Some(_) => EndpointIssue::Blocked,
        None => EndpointIssue::OutOfBounds,
    };
    debug!("Rejecting {} {}: {}", endpoint, point, issue);
    Err(Error::InvalidEndpoint {
        endpoint,
        point,
        issue,
    })
}

impl<'g> Search<'g> {
    /// Validates both endpoints and prepares the grid for a new search. On
    /// error the grid is left untouched.
    pub fn new(
        grid: &'g mut Grid,
        start: Point,
        goal: Point,
        config: SearchConfig,
    ) -> Result<Search<'g>> {
        let start_ix = endpoint_index(grid, start, Endpoint::Start)?;
        let goal_ix = endpoint_index(grid, goal, Endpoint::Goal)?;
        debug!("Searching path from {} to {}", start, goal);

        grid.reset_costs();
        let h_cost = config.heuristic(start, goal);
        let cell = grid.cell_at_mut(start_ix);
        cell.g_cost = 0.0;
        cell.h_cost = h_cost;

        let mut open = FxIndexSet::default();
        let phase = if start_ix == goal_ix {
            Phase::Reached
        } else {
            open.insert(start_ix);
            Phase::Expanding
        };
        let closed = vec![false; grid.width() * grid.height()];
        Ok(Search {
            grid,
            config,
            start: start_ix,
            goal: goal_ix,
            open,
            closed,
            current: None,
            phase,
            expansions: 0,
            result: None,
        })
    }

    pub fn grid(&self) -> &Grid {
        &*self.grid
    }
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
    pub fn start(&self) -> Point {
        self.grid.cell_at(self.start).point()
    }
    pub fn goal(&self) -> Point {
        self.grid.cell_at(self.goal).point()
    }
    /// The cell expanded by the latest step.
    pub fn current(&self) -> Option<Point> {
        self.current.map(|ix| self.grid.cell_at(ix).point())
    }
    /// Number of cells closed so far.
    pub fn expansions(&self) -> usize {
        self.expansions
    }
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }
    /// The outcome, once the terminal event has been produced.
    pub fn result(&self) -> Option<&PathResult> {
        self.result.as_ref()
    }
    pub fn open_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.open.iter().map(|&ix| self.grid.cell_at(ix).point())
    }
    pub fn is_open(&self, point: Point) -> bool {
        self.grid
            .index_of(point)
            .map_or(false, |ix| self.open.contains(&ix))
    }
    pub fn is_closed(&self, point: Point) -> bool {
        self.grid.index_of(point).map_or(false, |ix| self.closed[ix])
    }

    /// Performs one unit of work. Returns [None] once the terminal event has
    /// been returned.
    pub fn step(&mut self) -> Option<SearchEvent> {
        match self.phase {
            Phase::Finished => None,
            Phase::Reached => {
                let path = self.retrace();
                info!(
                    "Found path of {} cells with cost {} after {} expansions",
                    path.len(),
                    path.cost(),
                    self.expansions
                );
                self.finish(PathResult::Found(path.clone()));
                Some(SearchEvent::PathFound(path))
            }
            Phase::Expanding => Some(self.expand()),
        }
    }

    /// Drives the search to completion.
    pub fn run(self) -> PathResult {
        self.run_with(|_| {})
    }

    /// Drives the search to completion, handing every event to `observer` in order.
    pub fn run_with<F>(mut self, mut observer: F) -> PathResult
    where
        F: FnMut(&SearchEvent),
    {
        while let Some(event) = self.step() {
            observer(&event);
        }
        self.result.unwrap_or(PathResult::NoPath)
    }

    fn finish(&mut self, result: PathResult) {
        self.phase = Phase::Finished;
        self.result = Some(result);
    }

    fn expand(&mut self) -> SearchEvent {
        let Some(current) = self.lowest_cost() else {
            debug!(
                "Open set exhausted after {} expansions: {} is not reachable from {}",
                self.expansions,
                self.goal(),
                self.start()
            );
            self.finish(PathResult::NoPath);
            return SearchEvent::NoPath;
        };
        self.open.swap_remove(&current);
        self.closed[current] = true;
        self.current = Some(current);
        self.expansions += 1;

        let visit = Visit::of(self.grid.cell_at(current));
        trace!(
            "Visiting {} (g = {}, h = {}, f = {})",
            visit.point,
            visit.g_cost,
            visit.h_cost,
            visit.f_cost
        );
        if current == self.goal {
            self.phase = Phase::Reached;
        } else {
            self.relax_neighbors(current);
        }
        SearchEvent::Visited(visit)
    }

    /// Lowest f-cost in the open set, ties going to the lower h-cost and then to
    /// the lower cell index. The order is total, so the choice never depends on
    /// how the open set happens to be arranged.
    fn lowest_cost(&self) -> Option<usize> {
        self.open
            .iter()
            .copied()
            .min_by(|&a, &b| self.compare_priority(a, b))
    }

    fn compare_priority(&self, a: usize, b: usize) -> Ordering {
        let (cell_a, cell_b) = (self.grid.cell_at(a), self.grid.cell_at(b));
        cell_a
            .f_cost()
            .total_cmp(&cell_b.f_cost())
            .then(cell_a.h_cost().total_cmp(&cell_b.h_cost()))
            .then(a.cmp(&b))
    }

    fn relax_neighbors(&mut self, current: usize) {
        let (current_point, current_g) = {
            let cell = self.grid.cell_at(current);
            (cell.point(), cell.g_cost())
        };
        let goal_point = self.goal();
        for n in self.grid.neighbor_indices(current_point) {
            let neighbor = self.grid.cell_at(n);
            if self.closed[n] || !neighbor.is_traversable() {
                continue;
            }
            let neighbor_point = neighbor.point();
            let tentative_g = current_g + self.config.step_cost(current_point, neighbor_point);
            let in_open = self.open.contains(&n);
            if tentative_g < neighbor.g_cost() || !in_open {
                let h_cost = self.config.heuristic(neighbor_point, goal_point);
                let neighbor = self.grid.cell_at_mut(n);
                neighbor.g_cost = tentative_g;
                neighbor.h_cost = h_cost;
                neighbor.parent = Some(current_point);
                if !in_open {
                    self.open.insert(n);
                }
            }
        }
    }

    fn retrace(&self) -> Path {
        let goal = self.grid.cell_at(self.goal);
        let mut points: Vec<Point> = std::iter::successors(Some(goal.point()), |p| {
            self.grid.cell(*p).and_then(Cell::parent)
        })
        .collect();
        points.reverse();
        Path::new(points, goal.g_cost())
    }
}

impl Iterator for Search<'_> {
    type Item = SearchEvent;

    fn next(&mut self) -> Option<SearchEvent> {
        self.step()
    }
}

impl FusedIterator for Search<'_> {}

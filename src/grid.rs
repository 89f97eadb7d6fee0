use crate::error::{Error, Result};
use crate::N_SMALLVEC_SIZE;
use core::fmt;
use grid_util::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Offsets of the 8-neighborhood in enumeration order: the four cardinal
/// directions first, then the four diagonals.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (0, -1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// A single tile of a [Grid] together with the bookkeeping of the last search that touched it.
///
/// Cells compare equal iff they sit at the same position; costs and parent are
/// mutable search state and take no part in identity.
#[derive(Clone, Debug)]
pub struct Cell {
    point: Point,
    traversable: bool,
    pub(crate) g_cost: f32,
    pub(crate) h_cost: f32,
    pub(crate) parent: Option<Point>,
}

impl Cell {
    fn new(point: Point) -> Cell {
        Cell {
            point,
            traversable: true,
            g_cost: f32::INFINITY,
            h_cost: f32::INFINITY,
            parent: None,
        }
    }
    fn reset(&mut self) {
        self.g_cost = f32::INFINITY;
        self.h_cost = f32::INFINITY;
        self.parent = None;
    }
    pub fn point(&self) -> Point {
        self.point
    }
    pub fn is_traversable(&self) -> bool {
        self.traversable
    }
    /// Best known cost from the start, infinite if the cell was never reached.
    pub fn g_cost(&self) -> f32 {
        self.g_cost
    }
    /// Heuristic estimate of the remaining cost to the goal.
    pub fn h_cost(&self) -> f32 {
        self.h_cost
    }
    /// Always `g_cost + h_cost`.
    pub fn f_cost(&self) -> f32 {
        self.g_cost + self.h_cost
    }
    /// The cell this one was reached from on the best known path.
    pub fn parent(&self) -> Option<Point> {
        self.parent
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point
    }
}

impl Eq for Cell {}

/// [Grid] owns a fixed `width * height` arena of [Cell]s. Only the contents of
/// cells change after creation. Like a pathing grid it also keeps track of
/// 8-connected components in a [UnionFind] so that reachability can be queried
/// without searching.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl Grid {
    /// Creates a grid with every cell traversable and all costs infinite.
    pub fn new(width: usize, height: usize) -> Result<Grid> {
        let count = width.checked_mul(height);
        let representable = i32::try_from(width).is_ok() && i32::try_from(height).is_ok();
        let count = match count {
            Some(count) if count > 0 && representable => count,
            _ => return Err(Error::InvalidDimension { width, height }),
        };
        let cells = (0..count)
            .map(|ix| Cell::new(Point::new((ix % width) as i32, (ix / width) as i32)))
            .collect();
        let mut grid = Grid {
            width,
            height,
            cells,
            components: UnionFind::new(count),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    /// Creates a grid in which the given points are blocked.
    pub fn with_obstacles<I>(width: usize, height: usize, obstacles: I) -> Result<Grid>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut grid = Grid::new(width, height)?;
        for point in obstacles {
            grid.set_traversable(point, false)?;
        }
        grid.update();
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
    }
    pub(crate) fn index_of(&self, point: Point) -> Option<usize> {
        if self.in_bounds(point) {
            Some(point.y as usize * self.width + point.x as usize)
        } else {
            None
        }
    }
    fn checked_index(&self, point: Point) -> Result<usize> {
        self.index_of(point).ok_or(Error::OutOfBounds {
            point,
            width: self.width,
            height: self.height,
        })
    }
    pub(crate) fn cell_at(&self, ix: usize) -> &Cell {
        &self.cells[ix]
    }
    pub(crate) fn cell_at_mut(&mut self, ix: usize) -> &mut Cell {
        &mut self.cells[ix]
    }

    pub fn cell(&self, point: Point) -> Option<&Cell> {
        self.index_of(point).map(|ix| &self.cells[ix])
    }
    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }
    pub fn is_traversable(&self, point: Point) -> Result<bool> {
        let ix = self.checked_index(point)?;
        Ok(self.cells[ix].traversable)
    }

    /// Blocks or unblocks a cell. Joins newly connected components and flags the
    /// components as dirty if blocking may have split one apart.
    pub fn set_traversable(&mut self, point: Point, traversable: bool) -> Result<()> {
        let ix = self.checked_index(point)?;
        if self.cells[ix].traversable == traversable {
            return Ok(());
        }
        self.cells[ix].traversable = traversable;
        if traversable {
            for n in self.neighbor_indices(point) {
                if self.cells[n].traversable {
                    self.components.union(ix, n);
                }
            }
        } else {
            self.components_dirty = true;
        }
        Ok(())
    }

    /// The in-bounds points of the 8-neighborhood of `point`, in the order of
    /// [NEIGHBOR_OFFSETS]. Blocked neighbors are included.
    pub fn neighbors(&self, point: Point) -> Result<SmallVec<[Point; N_SMALLVEC_SIZE]>> {
        self.checked_index(point)?;
        Ok(self
            .neighbor_indices(point)
            .into_iter()
            .map(|ix| self.cells[ix].point)
            .collect())
    }
    pub(crate) fn neighbor_indices(&self, point: Point) -> SmallVec<[usize; N_SMALLVEC_SIZE]> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|(dx, dy)| self.index_of(Point::new(point.x + dx, point.y + dy)))
            .collect()
    }

    /// Clears the costs and parents left behind by a previous search.
    pub fn reset_costs(&mut self) {
        self.cells.iter_mut().for_each(Cell::reset);
    }

    /// Checks if start and goal are traversable and on the same connected component.
    pub fn reachable(&mut self, start: Point, goal: Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not both traversable cells of one connected component.
    pub fn unreachable(&mut self, start: Point, goal: Point) -> bool {
        self.update();
        match (self.index_of(start), self.index_of(goal)) {
            (Some(start_ix), Some(goal_ix)) => {
                !self.cells[start_ix].traversable
                    || !self.cells[goal_ix].traversable
                    || !self.components.equiv(start_ix, goal_ix)
            }
            _ => true,
        }
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&mut self, point: Point) -> Option<usize> {
        self.update();
        self.index_of(point).map(|ix| self.components.find(ix))
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up traversable grid
    /// neighbours to the same components.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.cells.len());
        self.components_dirty = false;
        for ix in 0..self.cells.len() {
            if !self.cells[ix].traversable {
                continue;
            }
            let p = self.cells[ix].point;
            // Links to the remaining four neighbours follow from symmetry
            for (dx, dy) in [(1, 0), (0, 1), (1, 1), (1, -1)] {
                if let Some(n) = self.index_of(Point::new(p.x + dx, p.y + dy)) {
                    if self.cells[n].traversable {
                        self.components.union(ix, n);
                    }
                }
            }
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            let line: String = row
                .iter()
                .map(|c| if c.traversable { '.' } else { '#' })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            Grid::new(0, 3).unwrap_err(),
            Error::InvalidDimension {
                width: 0,
                height: 3
            }
        );
        assert!(Grid::new(4, 0).is_err());
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn new_grid_is_open_with_infinite_costs() {
        let grid = Grid::new(4, 3).unwrap();
        assert_eq!(grid.cells().count(), 12);
        for cell in grid.cells() {
            assert!(cell.is_traversable());
            assert_eq!(cell.g_cost(), f32::INFINITY);
            assert_eq!(cell.h_cost(), f32::INFINITY);
            assert_eq!(cell.f_cost(), f32::INFINITY);
            assert_eq!(cell.parent(), None);
        }
        assert_eq!(grid.cell(Point::new(3, 2)).unwrap().point(), Point::new(3, 2));
    }

    #[test]
    fn set_traversable_out_of_bounds() {
        let mut grid = Grid::new(3, 3).unwrap();
        for p in [Point::new(-1, 0), Point::new(3, 1), Point::new(0, 3)] {
            assert!(matches!(
                grid.set_traversable(p, false),
                Err(Error::OutOfBounds { .. })
            ));
        }
        assert!(grid.cells().all(Cell::is_traversable));
        grid.set_traversable(Point::new(2, 2), false).unwrap();
        assert!(!grid.is_traversable(Point::new(2, 2)).unwrap());
    }

    #[test]
    fn corner_neighbors_in_fixed_order() {
        let grid = Grid::new(5, 5).unwrap();
        let neighbors = grid.neighbors(Point::new(0, 0)).unwrap();
        assert_eq!(
            neighbors.as_slice(),
            &[Point::new(0, 1), Point::new(1, 0), Point::new(1, 1)]
        );
    }

    #[test]
    fn interior_neighbors_include_blocked_cells() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_traversable(Point::new(1, 2), false).unwrap();
        let neighbors = grid.neighbors(Point::new(1, 1)).unwrap();
        assert_eq!(neighbors.len(), 8);
        assert_eq!(neighbors[0], Point::new(1, 2));
        assert_eq!(neighbors[7], Point::new(2, 2));
        assert!(grid.neighbors(Point::new(3, 3)).is_err());
    }

    #[test]
    fn cells_compare_by_position() {
        let mut grid = Grid::new(2, 1).unwrap();
        let before = grid.cell(Point::new(0, 0)).unwrap().clone();
        grid.cell_at_mut(0).g_cost = 3.0;
        assert_eq!(&before, grid.cell(Point::new(0, 0)).unwrap());
        assert_ne!(&before, grid.cell(Point::new(1, 0)).unwrap());
    }

    #[test]
    fn reset_clears_search_state() {
        let mut grid = Grid::new(2, 2).unwrap();
        let cell = grid.cell_at_mut(3);
        cell.g_cost = 1.4;
        cell.h_cost = 0.0;
        cell.parent = Some(Point::new(0, 0));
        grid.reset_costs();
        let cell = grid.cell(Point::new(1, 1)).unwrap();
        assert_eq!(cell.g_cost(), f32::INFINITY);
        assert_eq!(cell.parent(), None);
    }

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // Corresponds to the following 3x2 grid:
        //  ___
        // |.#.|
        // |.#.|
        //  ___
        let mut grid =
            Grid::with_obstacles(3, 2, [Point::new(1, 0), Point::new(1, 1)]).unwrap();
        assert!(grid.reachable(Point::new(0, 0), Point::new(0, 1)));
        assert!(grid.unreachable(Point::new(0, 0), Point::new(2, 0)));
        assert!(grid.unreachable(Point::new(0, 0), Point::new(1, 1)));
        assert_ne!(
            grid.get_component(Point::new(0, 0)),
            grid.get_component(Point::new(2, 1))
        );
    }

    #[test]
    fn reachable_through_diagonal_gap() {
        //  __
        // |.#|
        // |#.|
        //  __
        let mut grid =
            Grid::with_obstacles(2, 2, [Point::new(1, 0), Point::new(0, 1)]).unwrap();
        assert!(grid.reachable(Point::new(0, 0), Point::new(1, 1)));
    }

    #[test]
    fn components_follow_edits() {
        let mut grid = Grid::new(3, 3).unwrap();
        for y in 0..3 {
            grid.set_traversable(Point::new(1, y), false).unwrap();
        }
        assert!(grid.unreachable(Point::new(0, 0), Point::new(2, 2)));
        grid.set_traversable(Point::new(1, 1), true).unwrap();
        assert!(grid.reachable(Point::new(0, 0), Point::new(2, 2)));
    }

    #[test]
    fn display_marks_obstacles() {
        let grid = Grid::with_obstacles(3, 2, [Point::new(1, 0)]).unwrap();
        assert_eq!(format!("{}", grid), ".#.\n...\n");
    }
}

use core::fmt;
use grid_util::Point;
use std::ops::Index;

/// An ordered sequence of grid points from start to goal (both inclusive),
/// together with the total movement cost of walking it.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Vec<Point>,
    cost: f32,
}

impl Path {
    pub fn new(points: Vec<Point>, cost: f32) -> Path {
        Path { points, cost }
    }

    pub fn cost(&self) -> f32 {
        self.cost
    }

    /// Number of cells on the path, including start and goal.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of moves, one less than the number of cells.
    pub fn steps(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn goal(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }
}

impl Index<usize> for Path {
    type Output = Point;
    fn index(&self, index: usize) -> &Point {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;
    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl PartialEq<Vec<Point>> for Path {
    fn eq(&self, rhs: &Vec<Point>) -> bool {
        &self.points == rhs
    }
}

impl fmt::Display for Path {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Path[Cost = {}]: ", self.cost)?;
        match self.points.split_first() {
            None => write!(fmt, "<empty>"),
            Some((first, rest)) => {
                write!(fmt, "({}, {})", first.x, first.y)?;
                for p in rest {
                    write!(fmt, " -> ({}, {})", p.x, p.y)?;
                }
                Ok(())
            }
        }
    }
}

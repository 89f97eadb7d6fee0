use crate::{CARDINAL_COST, DIAGONAL_COST};
use grid_util::Point;

pub mod astar;

/// Movement costs and heuristic scaling used by a search.
///
/// The default charges [CARDINAL_COST] for straight moves and [DIAGONAL_COST]
/// (1.4) for diagonal ones. Because 1.4 is slightly below the true length of a
/// diagonal, the Euclidean heuristic can overestimate by up to about 1% and
/// paths may in rare cases be that much longer than optimal. Use
/// [SearchConfig::exact] for a strictly admissible setup.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub cardinal_cost: f32,
    pub diagonal_cost: f32,
    /// Scales the heuristic. Values above 1.0 give Weighted A*, which expands
    /// fewer nodes at the price of optimality.
    pub heuristic_factor: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            cardinal_cost: CARDINAL_COST,
            diagonal_cost: DIAGONAL_COST,
            heuristic_factor: 1.0,
        }
    }
}

impl SearchConfig {
    /// Uses sqrt(2) for diagonal moves.
    pub fn exact() -> SearchConfig {
        SearchConfig {
            diagonal_cost: std::f32::consts::SQRT_2,
            ..Default::default()
        }
    }

    pub fn with_cardinal_cost(mut self, cost: f32) -> SearchConfig {
        self.cardinal_cost = cost;
        self
    }

    pub fn with_diagonal_cost(mut self, cost: f32) -> SearchConfig {
        self.diagonal_cost = cost;
        self
    }

    pub fn with_heuristic_factor(mut self, factor: f32) -> SearchConfig {
        self.heuristic_factor = factor;
        self
    }

    /// Cost of moving between two adjacent points. A move is diagonal when both
    /// coordinates change.
    pub fn step_cost(&self, from: Point, to: Point) -> f32 {
        if from.x != to.x && from.y != to.y {
            self.diagonal_cost
        } else {
            self.cardinal_cost
        }
    }

    /// Euclidean distance to the goal times the heuristic factor.
    pub fn heuristic(&self, point: Point, goal: Point) -> f32 {
        let dx = (point.x - goal.x) as f32;
        let dy = (point.y - goal.y) as f32;
        dx.hypot(dy) * self.heuristic_factor
    }
}

//! Error types for grid construction, grid access and search setup.
//!
//! Failing to find a path is not an error; see [PathResult](crate::PathResult).

use core::fmt;
use grid_util::Point;
use thiserror::Error;

/// Which end of a search an [Error::InvalidEndpoint] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

/// Why an endpoint was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndpointIssue {
    OutOfBounds,
    Blocked,
}

impl fmt::Display for EndpointIssue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EndpointIssue::OutOfBounds => write!(f, "lies outside the grid"),
            EndpointIssue::Blocked => write!(f, "is not traversable"),
        }
    }
}

#[derive(Error, Clone, Debug, PartialEq)]
pub enum Error {
    /// A grid was requested with a zero (or unrepresentably large) extent.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    #[error("point {point} is outside the {width}x{height} grid")]
    OutOfBounds {
        point: Point,
        width: usize,
        height: usize,
    },

    /// Start or goal cannot take part in a search. Raised before any cell is touched.
    #[error("{endpoint} {point} {issue}")]
    InvalidEndpoint {
        endpoint: Endpoint,
        point: Point,
        issue: EndpointIssue,
    },

    #[error("cannot generate scenario: {0}")]
    Scenario(String),
}

pub type Result<T> = std::result::Result<T, Error>;

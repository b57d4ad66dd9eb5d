//! Error types shared by the generator and the pathfinder.

use std::fmt;

use thiserror::Error;

use crate::coordinates::{GridCoord, WorldPosition};

/// Which end of a path query a cell was supplied as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// The cell the path starts from.
    Start,
    /// The cell the path leads to.
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Start => "start",
            Self::End => "end",
        })
    }
}

/// Failures reported by maze generation and path queries.
///
/// None of these are fatal: each one describes a condition the caller can recover from, for
/// instance by retrying with another cell or by treating the query as "no path".
#[derive(Clone, Debug, PartialEq, Error)]
pub enum MazeError {
    /// The generation config cannot describe a maze.
    #[error("invalid generation config: {reason}")]
    InvalidConfig {
        /// Human readable description of the offending field.
        reason: String,
    },
    /// A query was issued before the pathfinder was successfully initialized.
    #[error("pathfinder has not been initialized with a maze")]
    UninitializedPathfinder,
    /// The cell array handed to the pathfinder does not match the declared dimensions.
    #[error("cell count {actual} does not match the declared {width}x{height} grid")]
    CellCountMismatch {
        /// Declared grid width.
        width: u32,
        /// Declared grid height.
        height: u32,
        /// Number of cells actually supplied.
        actual: usize,
    },
    /// One of the query endpoints is outside the grid or is a wall.
    #[error("{endpoint} cell {position} is out of bounds or not walkable")]
    InvalidCell {
        /// Which endpoint was rejected.
        endpoint: Endpoint,
        /// The rejected coordinate.
        position: GridCoord,
    },
    /// The search exhausted every reachable cell without meeting the end.
    #[error("no path found from {start} to {end}")]
    NoPathFound {
        /// Start of the failed query.
        start: GridCoord,
        /// End of the failed query.
        end: GridCoord,
    },
    /// A world position handed to a query has a NaN or infinite planar component.
    #[error("world position {position} is not finite")]
    NonFiniteWorldPosition {
        /// The rejected position.
        position: WorldPosition,
    },
    /// The expanding ring search found no floor cell at all.
    #[error("no walkable cell found near {position}")]
    NoWalkableCellFound {
        /// Position the search was centred on.
        position: GridCoord,
    },
}

impl MazeError {
    /// Shorthand for building a [`MazeError::InvalidConfig`] from anything printable.
    pub(crate) fn invalid_config<R: fmt::Display>(reason: R) -> Self {
        Self::InvalidConfig {
            reason: reason.to_string(),
        }
    }
}

/// Failures reported when parsing coordinates from text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseCoordError {
    /// The text did not contain the expected number of comma separated components.
    #[error("expected a coordinate of the form {expected}, got '{input}'")]
    Arity {
        /// The text that was parsed.
        input: String,
        /// The accepted shape, such as `x,y`.
        expected: &'static str,
    },
    /// One of the components is not a number.
    #[error("'{component}' in '{input}' is not a number")]
    Component {
        /// The text that was parsed.
        input: String,
        /// The offending component.
        component: String,
    },
}

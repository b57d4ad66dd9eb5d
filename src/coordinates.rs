//! Grid and world coordinate types.
//!
//! This module contains the two coordinate spaces the crate works in: integer grid coordinates
//! addressing cells of the expanded maze, and floating point world positions used by whatever
//! consumes the maze to place geometry or walk a path.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParseCoordError;

/// Integer coordinate of a cell in the expanded maze grid.
///
/// The origin is the top-left cell, `x` grows eastwards and `y` grows southwards. Coordinates are
/// signed because conversions from world space may land outside the grid on either side, and such
/// positions still need to be representable before they are checked against the grid bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    /// Column of the cell.
    pub x: i32,
    /// Row of the cell.
    pub y: i32,
}

impl GridCoord {
    /// Builds a grid coordinate from its column and row.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the coordinate displaced by the given offset, or `None` on integer overflow.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    /// Chebyshev distance between two coordinates, `max(|dx|, |dy|)`.
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Manhattan distance between two coordinates, `|dx| + |dy|`.
    #[must_use]
    pub fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }

    /// World position of the centre of this cell on the floor plane.
    #[expect(
        clippy::cast_precision_loss,
        reason = "Grid coordinates are bounded far below the 2^24 limit of exact f32 integers."
    )]
    #[must_use]
    pub fn world_center(self, cell_size: f32) -> WorldPosition {
        let half = cell_size * 0.5;
        WorldPosition::new(
            (self.x as f32).mul_add(cell_size, half),
            (self.y as f32).mul_add(cell_size, half),
            0.,
        )
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.x, self.y)
    }
}

impl FromStr for GridCoord {
    type Err = ParseCoordError;

    /// Parses a coordinate written as `x,y`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut parts = input.split(',').map(str::trim);
        let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ParseCoordError::Arity {
                input: input.to_owned(),
                expected: "x,y",
            });
        };

        let parse = |component: &str| {
            component
                .parse::<i32>()
                .map_err(|_err| ParseCoordError::Component {
                    input: input.to_owned(),
                    component: component.to_owned(),
                })
        };

        Ok(Self::new(parse(x)?, parse(y)?))
    }
}

/// Position in world space.
///
/// The maze lies on the `z = 0` plane; `x` and `y` follow the grid axes scaled by the cell size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPosition {
    /// Coordinate along the grid's column axis.
    pub x: f32,
    /// Coordinate along the grid's row axis.
    pub y: f32,
    /// Height above the maze floor.
    pub z: f32,
}

impl WorldPosition {
    /// Builds a world position from its three components.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for WorldPosition {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl FromStr for WorldPosition {
    type Err = ParseCoordError;

    /// Parses a position written as `x,y` or `x,y,z`. A missing `z` defaults to the floor plane.
    /// Components must be finite, so `NaN` and `inf` are rejected.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let components = input
            .split(',')
            .map(|component| {
                let component = component.trim();
                component
                    .parse::<f32>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .ok_or_else(|| ParseCoordError::Component {
                        input: input.to_owned(),
                        component: component.to_owned(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        match components.as_slice() {
            [x, y] => Ok(Self::new(*x, *y, 0.)),
            [x, y, z] => Ok(Self::new(*x, *y, *z)),
            _ => Err(ParseCoordError::Arity {
                input: input.to_owned(),
                expected: "x,y[,z]",
            }),
        }
    }
}

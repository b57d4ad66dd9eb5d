//! Maze generation parameters.

use serde::{Deserialize, Serialize};

use crate::{error::MazeError, generators::Algorithm};

/// Largest accepted width or height, in cells.
///
/// Keeps every cell index and grid coordinate inside `i32` and bounds the work a single path query
/// can do.
pub const MAX_DIMENSION: u32 = 16_384;

/// Default random seed.
const DEFAULT_SEED: u64 = 12_345;
/// Default grid width and height in cells.
const DEFAULT_SIZE: u32 = 21;
/// Default edge length of a cell in world units.
pub const DEFAULT_CELL_SIZE: f32 = 200.;
/// Default wall height in world units.
const DEFAULT_WALL_HEIGHT: f32 = 300.;

/// Everything needed to generate a maze.
///
/// Generation is a pure function of this value: the same config always yields the same cells.
/// Missing fields fall back to their defaults when deserializing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Seed for the random source; the same seed reproduces the same layout.
    pub seed: u64,
    /// Width of the expanded grid in cells. Odd values give a closed east wall.
    pub width: u32,
    /// Height of the expanded grid in cells. Odd values give a closed south wall.
    pub height: u32,
    /// Algorithm used to carve the room graph.
    pub algorithm: Algorithm,
    /// Edge length of a cell in world units.
    pub cell_size: f32,
    /// Height of the walls in world units. Not used by generation itself; carried for consumers
    /// that place geometry.
    pub wall_height: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            algorithm: Algorithm::default(),
            cell_size: DEFAULT_CELL_SIZE,
            wall_height: DEFAULT_WALL_HEIGHT,
        }
    }
}

impl GenerationConfig {
    /// Checks that the config describes a maze that can be generated.
    ///
    /// # Errors
    ///
    /// - [`MazeError::InvalidConfig`] when a dimension is zero or above [`MAX_DIMENSION`], or when
    ///   the cell size or wall height is not a positive finite number.
    pub fn validate(&self) -> Result<(), MazeError> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 {
                return Err(MazeError::invalid_config(format_args!(
                    "{name} must be at least 1"
                )));
            }
            if value > MAX_DIMENSION {
                return Err(MazeError::invalid_config(format_args!(
                    "{name} {value} exceeds the maximum of {MAX_DIMENSION}"
                )));
            }
        }

        for (name, value) in [
            ("cell size", self.cell_size),
            ("wall height", self.wall_height),
        ] {
            if !value.is_finite() || value <= 0. {
                return Err(MazeError::invalid_config(format_args!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        Ok(())
    }

    /// Number of room columns, `ceil(width / 2)`.
    #[must_use]
    pub fn room_width(&self) -> usize {
        usize::try_from(self.width.div_ceil(2)).unwrap_or_default()
    }

    /// Number of room rows, `ceil(height / 2)`.
    #[must_use]
    pub fn room_height(&self) -> usize {
        usize::try_from(self.height.div_ceil(2)).unwrap_or_default()
    }

    /// Total number of cells in the expanded grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        usize::try_from(u64::from(self.width) * u64::from(self.height)).unwrap_or(usize::MAX)
    }
}

//! Cardinal directions and the passage bitmask rooms carry.

use bitflags::bitflags;

bitflags! {
    /// Open passages leaving a room.
    ///
    /// Each bit marks a carved connection toward the neighbouring room in that direction. The bit
    /// values are part of the room graph's external shape and must not change.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Passages: u8 {
        /// Passage toward the room at `x + 1`.
        const EAST = 1;
        /// Passage toward the room at `y - 1`.
        const NORTH = 1 << 1;
        /// Passage toward the room at `y + 1`.
        const SOUTH = 1 << 2;
        /// Passage toward the room at `x - 1`.
        const WEST = 1 << 3;
    }
}

/// One of the four cardinal directions on the grid.
///
/// North points toward decreasing `y`, matching the row-major layout where row zero is the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward increasing `x`.
    East,
    /// Toward decreasing `y`.
    North,
    /// Toward increasing `y`.
    South,
    /// Toward decreasing `x`.
    West,
}

impl Direction {
    /// Canonical order in which directions are listed before any shuffling or scanning.
    pub const ALL: [Self; 4] = [Self::East, Self::West, Self::North, Self::South];

    /// Returns the direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::East => Self::West,
            Self::North => Self::South,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Returns the passage bit standing for this direction.
    #[must_use]
    pub const fn passage(self) -> Passages {
        match self {
            Self::East => Passages::EAST,
            Self::North => Passages::NORTH,
            Self::South => Passages::SOUTH,
            Self::West => Passages::WEST,
        }
    }

    /// Returns the `(dx, dy)` step one cell in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::East => (1, 0),
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

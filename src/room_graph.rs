//! Half-resolution room connectivity graph.
//!
//! A maze of `width x height` cells is carved on a coarser grid of `ceil(width / 2) x
//! ceil(height / 2)` rooms. Each room records the passages leaving it as a [`Passages`] mask, and
//! every passage is stored on both of the rooms it joins.

use std::collections::VecDeque;

use crate::direction::{Direction, Passages};

/// Grid of rooms and the passages carved between them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomGraph {
    /// Number of room columns.
    width: usize,
    /// Number of room rows.
    height: usize,
    /// Passage mask of every room, row-major.
    passages: Vec<Passages>,
}

impl RoomGraph {
    /// Creates a `width x height` room grid with no passages carved.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            passages: vec![Passages::empty(); width.saturating_mul(height)],
        }
    }

    /// Number of room columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of room rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of rooms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.passages.len()
    }

    /// Returns `true` when the graph has no rooms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Row-major index of the room at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub const fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Column and row of the room at `index`.
    #[must_use]
    pub const fn position(&self, index: usize) -> (usize, usize) {
        if self.width == 0 {
            return (0, 0);
        }
        (index % self.width, index / self.width)
    }

    /// Passage mask of the room at `index`; empty for indices outside the grid.
    #[must_use]
    pub fn passages(&self, index: usize) -> Passages {
        self.passages
            .get(index)
            .copied()
            .unwrap_or_else(Passages::empty)
    }

    /// Returns `true` if no passage has been carved into or out of the room yet.
    #[must_use]
    pub fn is_untouched(&self, index: usize) -> bool {
        self.passages(index).is_empty()
    }

    /// Index of the room one step from `index` in `direction`, if it lies inside the grid.
    #[must_use]
    pub fn neighbour(&self, index: usize, direction: Direction) -> Option<usize> {
        if index >= self.len() {
            return None;
        }

        let (x, y) = self.position(index);
        let (next_x, next_y) = match direction {
            Direction::East => (x.checked_add(1)?, y),
            Direction::West => (x.checked_sub(1)?, y),
            Direction::North => (x, y.checked_sub(1)?),
            Direction::South => (x, y.checked_add(1)?),
        };

        self.index(next_x, next_y)
    }

    /// Carves a passage from `index` toward `direction`.
    ///
    /// The bit is set on the room and the opposite bit on its neighbour, so both sides always
    /// agree. Returns the neighbour's index, or `None` (carving nothing) when the neighbour would
    /// fall outside the grid.
    pub fn carve(&mut self, index: usize, direction: Direction) -> Option<usize> {
        let next = self.neighbour(index, direction)?;

        if let Some(passages) = self.passages.get_mut(index) {
            passages.insert(direction.passage());
        }
        if let Some(passages) = self.passages.get_mut(next) {
            passages.insert(direction.opposite().passage());
        }

        Some(next)
    }

    /// Number of undirected passages carved.
    ///
    /// Each passage is counted once through its east or south side.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.passages
            .iter()
            .map(|passages| {
                usize::from(passages.contains(Passages::EAST))
                    + usize::from(passages.contains(Passages::SOUTH))
            })
            .sum()
    }

    /// Returns `true` if every passage bit is matched by the opposite bit on the neighbour and no
    /// bit points outside the grid.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        (0..self.len()).all(|index| {
            Direction::ALL.into_iter().all(|direction| {
                if !self.passages(index).contains(direction.passage()) {
                    return true;
                }

                self.neighbour(index, direction).is_some_and(|next| {
                    self.passages(next)
                        .contains(direction.opposite().passage())
                })
            })
        })
    }

    /// Returns `true` if every room can be reached from room zero by following passages.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        if self.is_empty() {
            return true;
        }

        let mut seen = vec![false; self.len()];
        let mut queue = VecDeque::from([0]);
        let mut reached = 0_usize;
        if let Some(first) = seen.first_mut() {
            *first = true;
        }

        while let Some(index) = queue.pop_front() {
            reached += 1;
            for direction in Direction::ALL {
                if !self.passages(index).contains(direction.passage()) {
                    continue;
                }
                let Some(next) = self.neighbour(index, direction) else {
                    continue;
                };
                if let Some(flag) = seen.get_mut(next) {
                    if !*flag {
                        *flag = true;
                        queue.push_back(next);
                    }
                }
            }
        }

        reached == self.len()
    }

    /// Returns `true` if the passages form a spanning tree: connected with exactly one edge fewer
    /// than there are rooms.
    #[must_use]
    pub fn is_spanning_tree(&self) -> bool {
        self.is_symmetric()
            && self.is_connected()
            && self.edge_count() == self.len().saturating_sub(1)
    }
}

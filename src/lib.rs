//! Seeded maze generation and breadth-first pathfinding.
//!
//! A maze is carved at half resolution as a graph of rooms, each room knowing which of its four
//! sides is open, by one of three algorithms: a depth-first backtracker, randomized Prim or
//! randomized Kruskal. The room graph is then expanded into a full resolution grid of floor and
//! wall cells, with rooms at even coordinates and the connectors between them at odd ones. The
//! same seed and parameters always produce the same grid.
//!
//! The [`Pathfinder`] loads the walkable cells of a grid and answers shortest-path queries between
//! cells, converting to and from world positions and snapping positions that land inside a wall to
//! the nearest floor cell.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The logger backend is only initialized by the binary crate."
)]

pub mod cli;
pub mod config;
pub mod coordinates;
pub mod direction;
pub mod disjoint_set;
pub mod error;
pub mod generators;
pub mod grid;
pub mod pathfinding;
pub mod random;
pub mod room_graph;

pub use config::GenerationConfig;
pub use coordinates::{GridCoord, WorldPosition};
pub use error::MazeError;
pub use generators::Algorithm;
pub use grid::{Cell, MazeGrid};
pub use pathfinding::{PathResult, Pathfinder};

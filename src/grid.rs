//! Full resolution floor/wall grid and its expansion from the room graph.
//!
//! Rooms sit at even coordinates of the final grid: room `(rx, ry)` becomes cell `(2rx, 2ry)`.
//! The odd coordinates between two rooms are connector cells, opened only when the rooms on both
//! sides share a passage. Every other cell stays wall.

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    config::GenerationConfig,
    coordinates::{GridCoord, WorldPosition},
    direction::Direction,
    error::MazeError,
    random::DeterministicRandom,
    room_graph::RoomGraph,
};

/// Character marking a wall in the `.labmap` text format.
const LABMAP_WALL: char = '2';
/// Character marking a walkable cell in the `.labmap` text format.
const LABMAP_FLOOR: char = '3';
/// Character marking the start of a route in the `.labmap` text format.
const LABMAP_START: char = '1';
/// Character marking the end of a route in the `.labmap` text format.
const LABMAP_END: char = '4';

/// This structure represents one cell of the expanded maze.
///
/// Cells are produced in row-major order by [`MazeGrid::generate`] and carry both their grid
/// coordinate and the world position of their centre, so consumers placing geometry do not need
/// to redo the transform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// This field holds the grid coordinate of the cell, with the origin at the top-left cell.
    pub position: GridCoord,
    /// This field holds the world position of the centre of the cell on the floor plane, derived
    /// from the cell size of the config the maze was generated from.
    pub world_position: WorldPosition,
    /// This field indicates whether the cell can be walked on. Room cells and opened connectors
    /// are floor; every other cell is wall.
    pub is_floor: bool,
}

/// This function expands a room graph into a row-major `width x height` floor mask.
///
/// The mask starts as all wall. Each room inside the grid opens its own cell, and each passage bit
/// on a room opens the connector one step in that direction when it is inside the grid. Rooms whose
/// cell falls outside the grid are skipped.
#[must_use]
pub fn expand_rooms(rooms: &RoomGraph, width: usize, height: usize) -> Vec<bool> {
    let mut floor = vec![false; width.saturating_mul(height)];
    let mut open = |x: usize, y: usize| {
        if x < width && y < height {
            if let Some(cell) = floor.get_mut(y * width + x) {
                *cell = true;
            }
        }
    };

    for room in 0..rooms.len() {
        let (room_x, room_y) = rooms.position(room);
        let (Some(x), Some(y)) = (room_x.checked_mul(2), room_y.checked_mul(2)) else {
            continue;
        };
        if x >= width || y >= height {
            continue;
        }

        open(x, y);

        let passages = rooms.passages(room);
        for direction in Direction::ALL {
            if !passages.contains(direction.passage()) {
                continue;
            }

            let connector = match direction {
                Direction::East => x.checked_add(1).map(|east| (east, y)),
                Direction::West => x.checked_sub(1).map(|west| (west, y)),
                Direction::North => y.checked_sub(1).map(|north| (x, north)),
                Direction::South => y.checked_add(1).map(|south| (x, south)),
            };
            if let Some((connector_x, connector_y)) = connector {
                open(connector_x, connector_y);
            }
        }
    }

    floor
}

/// This structure holds a generated maze: the config it came from and its cells.
///
/// This is the value an external persistence layer stores so a maze can be reused without
/// regenerating it. It serializes to a plain object with the config and the cell array, and
/// [`MazeGrid::from_parts`] rebuilds it with the same consistency checks generation guarantees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MazeGrid {
    /// Parameters the maze was generated from.
    config: GenerationConfig,
    /// Every cell, row-major: `cells[y * width + x]`.
    cells: Vec<Cell>,
}

impl MazeGrid {
    /// This function generates the maze described by `config`.
    ///
    /// A fresh [`DeterministicRandom`] seeded from the config drives the selected algorithm, and
    /// the resulting room graph is expanded into cells. Once the config is valid generation cannot
    /// fail.
    ///
    /// # Errors
    ///
    /// - [`MazeError::InvalidConfig`] if [`GenerationConfig::validate`] rejects the config.
    pub fn generate(config: GenerationConfig) -> Result<Self, MazeError> {
        config.validate()?;

        let rooms = Self::carve(&config);
        let floor = expand_rooms(
            &rooms,
            usize::try_from(config.width).map_err(MazeError::invalid_config)?,
            usize::try_from(config.height).map_err(MazeError::invalid_config)?,
        );

        let columns = i32::try_from(config.width).map_err(MazeError::invalid_config)?;
        let rows = i32::try_from(config.height).map_err(MazeError::invalid_config)?;
        let cell_size = config.cell_size;
        let cells: Vec<Cell> = (0..rows)
            .flat_map(|y| (0..columns).map(move |x| GridCoord::new(x, y)))
            .zip(floor)
            .map(|(position, is_floor)| Cell {
                position,
                world_position: position.world_center(cell_size),
                is_floor,
            })
            .collect();

        let grid = Self { config, cells };
        info!(
            "generated {}x{} maze with {:?} from seed {}: {} floors, {} walls",
            grid.config.width,
            grid.config.height,
            grid.config.algorithm,
            grid.config.seed,
            grid.floor_count(),
            grid.wall_count()
        );

        Ok(grid)
    }

    /// This function rebuilds a maze from a config and previously generated cells, such as the
    /// two halves of a stored maze.
    ///
    /// # Errors
    ///
    /// - [`MazeError::InvalidConfig`] if the config is invalid.
    /// - [`MazeError::CellCountMismatch`] if the cell count does not match the config dimensions.
    pub fn from_parts(config: GenerationConfig, cells: Vec<Cell>) -> Result<Self, MazeError> {
        config.validate()?;
        if cells.len() != config.cell_count() {
            return Err(MazeError::CellCountMismatch {
                width: config.width,
                height: config.height,
                actual: cells.len(),
            });
        }

        Ok(Self { config, cells })
    }

    /// Carves the room graph for `config` with a fresh random source.
    fn carve(config: &GenerationConfig) -> RoomGraph {
        let mut random = DeterministicRandom::new(config.seed);
        config
            .algorithm
            .build(config.room_width(), config.room_height(), &mut random)
    }

    /// This function regenerates the intermediate room graph this maze was expanded from.
    ///
    /// Generation is deterministic, so replaying the config yields exactly the graph the cells
    /// came from. Useful for inspecting the connectivity without decoding the cells.
    #[must_use]
    pub fn room_graph(&self) -> RoomGraph {
        Self::carve(&self.config)
    }

    /// Parameters the maze was generated from.
    #[must_use]
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Width of the grid in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.config.width
    }

    /// Height of the grid in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.config.height
    }

    /// All cells, row-major.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Consumes the maze and returns its cells.
    #[must_use]
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    /// This function returns the cell at `coord`, or `None` when the coordinate lies outside the
    /// grid on any side.
    #[must_use]
    pub fn cell(&self, coord: GridCoord) -> Option<&Cell> {
        let x = u32::try_from(coord.x).ok()?;
        let y = u32::try_from(coord.y).ok()?;
        if x >= self.width() || y >= self.height() {
            return None;
        }

        let index = u64::from(y) * u64::from(self.width()) + u64::from(x);
        self.cells.get(usize::try_from(index).ok()?)
    }

    /// Returns `true` if `coord` is inside the grid and walkable.
    #[must_use]
    pub fn is_floor(&self, coord: GridCoord) -> bool {
        self.cell(coord).is_some_and(|cell| cell.is_floor)
    }

    /// This function returns `true` if the dimensions are positive and match the number of cells.
    ///
    /// It always holds for generated mazes and is meant for values coming back from storage,
    /// which may have been edited or truncated.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width() > 0 && self.height() > 0 && self.cells.len() == self.config.cell_count()
    }

    /// Number of walkable cells.
    #[must_use]
    pub fn floor_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_floor).count()
    }

    /// Number of wall cells.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.cells.len() - self.floor_count()
    }

    /// This function renders the grid in the `.labmap` digit format, one line per row.
    ///
    /// Walls are written as `2` and floors as `3`. The optional route endpoints are marked `1`
    /// and `4`, taking precedence over the cell they sit on. Every row, the last one included,
    /// ends with a newline.
    #[must_use]
    pub fn to_labmap(&self, start: Option<GridCoord>, end: Option<GridCoord>) -> String {
        let width = usize::try_from(self.width()).unwrap_or(usize::MAX);
        let mut output = String::with_capacity(self.cells.len() + self.cells.len() / width.max(1));

        for row in self.cells.chunks(width.max(1)) {
            for cell in row {
                output.push(if Some(cell.position) == start {
                    LABMAP_START
                } else if Some(cell.position) == end {
                    LABMAP_END
                } else if cell.is_floor {
                    LABMAP_FLOOR
                } else {
                    LABMAP_WALL
                });
            }
            output.push('\n');
        }

        output
    }
}

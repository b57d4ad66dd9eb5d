//! Shortest-path queries over an expanded maze.
//!
//! This module contains the breadth-first search used to route between two floor cells, the
//! transforms between world and grid coordinates, and the expanding ring search that recovers a
//! walkable cell when a world position lands inside a wall.

use std::collections::VecDeque;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    config::DEFAULT_CELL_SIZE,
    coordinates::{GridCoord, WorldPosition},
    direction::Direction,
    error::{Endpoint, MazeError},
    grid::{Cell, MazeGrid},
};

/// This constant holds the order in which the breadth-first search expands the neighbours of a
/// dequeued cell.
///
/// When several shortest paths exist between two cells, this order decides which parent gets
/// recorded first for every cell and thus which of the paths is returned. It stays the same for
/// the whole search, so the same query on the same grid always yields the same path.
pub const NEIGHBOUR_ORDER: [Direction; 4] = [
    Direction::East,
    Direction::West,
    Direction::South,
    Direction::North,
];

/// This structure holds the outcome of a path query.
///
/// A successful query fills the grid path and the matching world positions. The [`Default`] value
/// is the empty, unsuccessful result, which is what callers get to fall back on when a query
/// returns an error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// This field indicates whether a path was found. It is only `true` for results built from a
    /// completed search.
    pub success: bool,
    /// This field holds the grid coordinates of every cell on the path, in order from the start
    /// to the end, with both endpoints included. Consecutive cells are always orthogonal
    /// neighbours.
    pub path: Vec<GridCoord>,
    /// This field holds the world position of the centre of every cell in [`PathResult::path`],
    /// index for index, on the floor plane.
    pub world_path: Vec<WorldPosition>,
    /// This field holds the number of cells on the path, which is one more than the number of
    /// steps taken.
    pub length: usize,
}

impl PathResult {
    /// Builds a successful result from a start-to-end path.
    fn found(path: Vec<GridCoord>, cell_size: f32) -> Self {
        let world_path = path
            .iter()
            .map(|coord| coord.world_center(cell_size))
            .collect();

        Self {
            success: true,
            length: path.len(),
            path,
            world_path,
        }
    }
}

/// Walkability snapshot taken from a cell array.
#[derive(Clone, Debug)]
struct WalkableGrid {
    /// Floor flag of every cell, row-major.
    walkable: Vec<bool>,
    /// Number of columns.
    width: i32,
    /// Number of rows.
    height: i32,
}

impl WalkableGrid {
    /// Row-major index of `coord`, or `None` outside the grid.
    fn index(&self, coord: GridCoord) -> Option<usize> {
        if coord.x < 0 || coord.y < 0 || coord.x >= self.width || coord.y >= self.height {
            return None;
        }

        let index = i64::from(coord.y) * i64::from(self.width) + i64::from(coord.x);
        usize::try_from(index).ok()
    }

    /// Returns `true` if `coord` is inside the grid and a floor cell.
    fn is_walkable(&self, coord: GridCoord) -> bool {
        self.index(coord)
            .and_then(|index| self.walkable.get(index))
            .copied()
            .unwrap_or(false)
    }

    /// Breadth-first search from `start`, returning the path to `end` when it is reachable.
    ///
    /// Both endpoints must already be known to be walkable.
    fn shortest_path(&self, start: GridCoord, end: GridCoord) -> Option<Vec<GridCoord>> {
        let mut visited = vec![false; self.walkable.len()];
        let mut parents: Vec<Option<GridCoord>> = vec![None; self.walkable.len()];
        let mut queue = VecDeque::from([start]);
        if let Some(flag) = self.index(start).and_then(|index| visited.get_mut(index)) {
            *flag = true;
        }

        let mut dequeued = 0_usize;
        let mut reached = false;
        while let Some(current) = queue.pop_front() {
            dequeued += 1;
            if current == end {
                reached = true;
                break;
            }

            for direction in NEIGHBOUR_ORDER {
                let (dx, dy) = direction.delta();
                let Some(next) = current.offset(dx, dy).filter(|next| self.is_walkable(*next))
                else {
                    continue;
                };
                let Some(index) = self.index(next) else {
                    continue;
                };

                if visited.get(index) == Some(&false) {
                    if let Some(flag) = visited.get_mut(index) {
                        *flag = true;
                    }
                    if let Some(parent) = parents.get_mut(index) {
                        *parent = Some(current);
                    }
                    queue.push_back(next);
                }
            }
        }

        debug!("pathfinder: dequeued {dequeued} cells searching {start} -> {end}");
        if !reached {
            return None;
        }

        let mut path = vec![end];
        let mut current = end;
        while current != start {
            let parent = self
                .index(current)
                .and_then(|index| parents.get(index).copied().flatten())?;
            path.push(parent);
            current = parent;
        }
        path.reverse();

        Some(path)
    }
}

/// This structure holds the state of the breadth-first path finder over a maze grid.
///
/// The pathfinder copies the walkability of a cell array once in [`Pathfinder::initialize`] and
/// then answers any number of queries against that snapshot. Queries only read the snapshot, so
/// an initialized pathfinder can be shared between threads; re-initializing it needs exclusive
/// access.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    /// Loaded grid, `None` until a successful initialization.
    grid: Option<WalkableGrid>,
    /// Edge length of a cell in world units.
    cell_size: f32,
}

impl Default for Pathfinder {
    fn default() -> Self {
        Self::new()
    }
}

impl Pathfinder {
    /// This function creates an uninitialized pathfinder. Every query made before a successful
    /// call to [`Pathfinder::initialize`] fails with [`MazeError::UninitializedPathfinder`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            grid: None,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }

    /// This function loads the walkable cells of a `width x height` grid into the pathfinder.
    ///
    /// Only the floor flags of the cells are kept, indexed row-major, together with the cell size
    /// used for the world transforms. Any previously loaded grid is dropped first, so a failed call
    /// leaves the pathfinder uninitialized rather than holding stale data.
    ///
    /// # Errors
    ///
    /// - [`MazeError::CellCountMismatch`] if `cells.len() != width * height`.
    /// - [`MazeError::InvalidConfig`] if `cell_size` is not a positive finite number or the
    ///   dimensions do not fit the coordinate range.
    pub fn initialize(
        &mut self,
        cells: &[Cell],
        width: u32,
        height: u32,
        cell_size: f32,
    ) -> Result<(), MazeError> {
        self.grid = None;

        let expected = usize::try_from(u64::from(width) * u64::from(height)).ok();
        if expected != Some(cells.len()) {
            warn!(
                "pathfinder: cell count ({}) doesn't match size ({width} x {height})",
                cells.len()
            );
            return Err(MazeError::CellCountMismatch {
                width,
                height,
                actual: cells.len(),
            });
        }

        if !cell_size.is_finite() || cell_size <= 0. {
            warn!("pathfinder: rejected cell size {cell_size}");
            return Err(MazeError::invalid_config(format_args!(
                "cell size must be a positive number, got {cell_size}"
            )));
        }

        let (Ok(grid_width), Ok(grid_height)) = (i32::try_from(width), i32::try_from(height))
        else {
            return Err(MazeError::invalid_config(format_args!(
                "{width}x{height} grid exceeds the coordinate range"
            )));
        };

        self.grid = Some(WalkableGrid {
            walkable: cells.iter().map(|cell| cell.is_floor).collect(),
            width: grid_width,
            height: grid_height,
        });
        self.cell_size = cell_size;

        Ok(())
    }

    /// This function loads a generated maze, taking the dimensions and the cell size from the
    /// config the maze was generated from.
    ///
    /// # Errors
    ///
    /// See [`Pathfinder::initialize`].
    pub fn initialize_from_grid(&mut self, grid: &MazeGrid) -> Result<(), MazeError> {
        self.initialize(
            grid.cells(),
            grid.width(),
            grid.height(),
            grid.config().cell_size,
        )
    }

    /// This function returns `true` once a grid has been loaded successfully.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.grid.is_some()
    }

    /// This function returns the edge length of a cell in world units.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// This function returns `true` if `coord` is inside the loaded grid and walkable. It is
    /// always `false` before initialization.
    #[must_use]
    pub fn is_valid_cell(&self, coord: GridCoord) -> bool {
        self.grid
            .as_ref()
            .is_some_and(|grid| grid.is_walkable(coord))
    }

    /// This function maps a world position to the grid cell containing it.
    ///
    /// Both planar components are divided by the cell size and floored, so positions left of or
    /// above the grid map to negative coordinates. The result may lie outside the grid and should
    /// be checked with [`Pathfinder::is_valid_cell`]. The height component is ignored.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Float to int casts saturate, which is the wanted behaviour far outside the grid."
    )]
    #[must_use]
    pub fn world_to_grid(&self, position: WorldPosition) -> GridCoord {
        GridCoord::new(
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
        )
    }

    /// This function returns the world position of the centre of a grid cell, on the floor plane.
    #[must_use]
    pub fn grid_to_world(&self, coord: GridCoord) -> WorldPosition {
        coord.world_center(self.cell_size)
    }

    /// This function finds the walkable cell closest to `coord` by Chebyshev distance.
    ///
    /// Rings of growing radius, from zero up to the larger grid dimension, are scanned along their
    /// perimeter with `dx` in the outer loop and `dy` in the inner loop, both ascending. The first
    /// walkable cell met is returned, which makes the choice among equally near cells
    /// deterministic. Returns `None` if the pathfinder is uninitialized or no floor cell is within
    /// range.
    #[must_use]
    pub fn find_nearest_walkable_cell(&self, coord: GridCoord) -> Option<GridCoord> {
        let grid = self.grid.as_ref()?;
        let max_radius = grid.width.max(grid.height);

        let probe = |dx: i32, dy: i32| {
            coord
                .offset(dx, dy)
                .filter(|candidate| grid.is_walkable(*candidate))
        };

        for radius in 0..=max_radius {
            for dx in -radius..=radius {
                if dx.abs() == radius {
                    for dy in -radius..=radius {
                        if let Some(found) = probe(dx, dy) {
                            return Some(found);
                        }
                    }
                } else {
                    for dy in [-radius, radius] {
                        if let Some(found) = probe(dx, dy) {
                            return Some(found);
                        }
                    }
                }
            }
        }

        None
    }

    /// This function finds a shortest path between two floor cells.
    ///
    /// Runs a breadth-first search from `start`, expanding neighbours in [`NEIGHBOUR_ORDER`] and
    /// stopping as soon as `end` is dequeued. The path is rebuilt by following the recorded parent
    /// of each cell back from `end`. `start == end` yields a single-cell path.
    ///
    /// # Errors
    ///
    /// - [`MazeError::UninitializedPathfinder`] if no grid has been loaded.
    /// - [`MazeError::InvalidCell`] if `start` or `end` is out of bounds or a wall, tagged with the
    ///   offending endpoint.
    /// - [`MazeError::NoPathFound`] if `end` is not reachable from `start`.
    pub fn find_path(&self, start: GridCoord, end: GridCoord) -> Result<PathResult, MazeError> {
        let Some(grid) = self.grid.as_ref() else {
            warn!("pathfinder: not initialized");
            return Err(MazeError::UninitializedPathfinder);
        };

        for (endpoint, position) in [(Endpoint::Start, start), (Endpoint::End, end)] {
            if !grid.is_walkable(position) {
                warn!("pathfinder: {endpoint} position {position} is not walkable");
                return Err(MazeError::InvalidCell { endpoint, position });
            }
        }

        if start == end {
            return Ok(PathResult::found(vec![start], self.cell_size));
        }

        let Some(path) = grid.shortest_path(start, end) else {
            warn!("pathfinder: no path found from {start} to {end}");
            return Err(MazeError::NoPathFound { start, end });
        };

        Ok(PathResult::found(path, self.cell_size))
    }

    /// This function finds a shortest path from a world position to a grid cell.
    ///
    /// The world position is mapped to its grid cell with [`Pathfinder::world_to_grid`]. If that
    /// cell is not walkable, the nearest walkable cell found by
    /// [`Pathfinder::find_nearest_walkable_cell`] is used as the start instead.
    ///
    /// # Errors
    ///
    /// - [`MazeError::UninitializedPathfinder`] if no grid has been loaded.
    /// - [`MazeError::NonFiniteWorldPosition`] if the planar components of `world_start` are not
    ///   finite numbers.
    /// - [`MazeError::NoWalkableCellFound`] if no floor cell is near the start.
    /// - Any error of [`Pathfinder::find_path`].
    pub fn find_path_from_world(
        &self,
        world_start: WorldPosition,
        grid_end: GridCoord,
    ) -> Result<PathResult, MazeError> {
        if !self.is_initialized() {
            warn!("pathfinder: not initialized");
            return Err(MazeError::UninitializedPathfinder);
        }

        if !world_start.x.is_finite() || !world_start.y.is_finite() {
            warn!("pathfinder: start position {world_start} is not finite");
            return Err(MazeError::NonFiniteWorldPosition {
                position: world_start,
            });
        }

        let mut start = self.world_to_grid(world_start);
        if !self.is_valid_cell(start) {
            let Some(nearest) = self.find_nearest_walkable_cell(start) else {
                warn!("pathfinder: no walkable cell near {start}");
                return Err(MazeError::NoWalkableCellFound { position: start });
            };
            debug!("pathfinder: {world_start} maps to {start}, snapped to {nearest}");
            start = nearest;
        }

        self.find_path(start, grid_end)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{config::GenerationConfig, generators::Algorithm};

    /// Builds a row-major cell array from a floor mask.
    fn cells_from_mask(width: i32, mask: &[bool]) -> Vec<Cell> {
        mask.iter()
            .enumerate()
            .map(|(index, is_floor)| {
                let index = i32::try_from(index).expect("small test grid");
                let position = GridCoord::new(index % width, index / width);
                Cell {
                    position,
                    world_position: position.world_center(1.),
                    is_floor: *is_floor,
                }
            })
            .collect()
    }

    /// Builds a pathfinder over a grid drawn as rows of `#` (wall) and `.` (floor).
    fn pathfinder_from_rows(rows: &[&str]) -> Pathfinder {
        let width = rows.first().map_or(0, |row| row.len());
        let mask: Vec<bool> = rows
            .iter()
            .flat_map(|row| row.bytes().map(|byte| byte == b'.'))
            .collect();
        let width = u32::try_from(width).expect("small test grid");
        let height = u32::try_from(rows.len()).expect("small test grid");

        let mut pathfinder = Pathfinder::new();
        pathfinder
            .initialize(
                &cells_from_mask(i32::try_from(width).expect("small"), &mask),
                width,
                height,
                1.,
            )
            .expect("consistent test grid");
        pathfinder
    }

    /// Generates a maze and loads it into a fresh pathfinder.
    fn generated(
        width: u32,
        height: u32,
        seed: u64,
        algorithm: Algorithm,
    ) -> (MazeGrid, Pathfinder) {
        let grid = MazeGrid::generate(GenerationConfig {
            seed,
            width,
            height,
            algorithm,
            ..GenerationConfig::default()
        })
        .expect("valid config");
        let mut pathfinder = Pathfinder::new();
        pathfinder
            .initialize_from_grid(&grid)
            .expect("generated grids are consistent");
        (grid, pathfinder)
    }

    /// Shortest path length in cells by repeated relaxation, or `None` when unreachable.
    fn brute_force_length(
        pathfinder: &Pathfinder,
        start: GridCoord,
        end: GridCoord,
    ) -> Option<usize> {
        let grid = pathfinder.grid.as_ref().expect("initialized");
        let mut distance = vec![usize::MAX; grid.walkable.len()];
        *distance
            .get_mut(grid.index(start).expect("in bounds"))
            .expect("in bounds") = 0;

        let mut changed = true;
        while changed {
            changed = false;
            for y in 0..grid.height {
                for x in 0..grid.width {
                    let here = GridCoord::new(x, y);
                    if !grid.is_walkable(here) {
                        continue;
                    }
                    let here_distance = *distance
                        .get(grid.index(here).expect("in bounds"))
                        .expect("in bounds");
                    if here_distance == usize::MAX {
                        continue;
                    }
                    for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                        let next = GridCoord::new(x + dx, y + dy);
                        if !grid.is_walkable(next) {
                            continue;
                        }
                        let slot = distance
                            .get_mut(grid.index(next).expect("in bounds"))
                            .expect("in bounds");
                        if here_distance + 1 < *slot {
                            *slot = here_distance + 1;
                            changed = true;
                        }
                    }
                }
            }
        }

        let steps = *distance.get(grid.index(end)?)?;
        (steps != usize::MAX).then(|| steps + 1)
    }

    /// Asserts that a path starts and ends at the given cells and only takes floor steps.
    fn assert_valid_path(
        pathfinder: &Pathfinder,
        result: &PathResult,
        start: GridCoord,
        end: GridCoord,
    ) {
        assert!(result.success);
        assert_eq!(result.path.first(), Some(&start));
        assert_eq!(result.path.last(), Some(&end));
        assert_eq!(result.length, result.path.len());
        assert_eq!(result.world_path.len(), result.path.len());

        for pair in result.path.windows(2) {
            if let [from, to] = pair {
                assert_eq!(from.manhattan_distance(*to), 1, "{from} -> {to} is not a step");
                assert!(pathfinder.is_valid_cell(*from));
                assert!(pathfinder.is_valid_cell(*to));
            }
        }
    }

    #[test]
    fn test_query_before_initialize() {
        let pathfinder = Pathfinder::new();

        assert!(!pathfinder.is_initialized());
        assert_eq!(
            pathfinder.find_path(GridCoord::new(0, 0), GridCoord::new(1, 0)),
            Err(MazeError::UninitializedPathfinder)
        );
        assert_eq!(
            pathfinder.find_path_from_world(WorldPosition::default(), GridCoord::new(0, 0)),
            Err(MazeError::UninitializedPathfinder)
        );
        assert_eq!(pathfinder.find_nearest_walkable_cell(GridCoord::new(0, 0)), None);
    }

    #[test]
    fn test_initialize_rejects_mismatched_cells() {
        let (grid, mut pathfinder) = generated(5, 5, 42, Algorithm::Backtracker);
        assert!(pathfinder.is_initialized());

        let result = pathfinder.initialize(grid.cells(), 5, 4, 200.);

        assert_eq!(
            result,
            Err(MazeError::CellCountMismatch {
                width: 5,
                height: 4,
                actual: 25,
            })
        );
        assert!(!pathfinder.is_initialized());
        assert_eq!(
            pathfinder.find_path(GridCoord::new(0, 0), GridCoord::new(0, 0)),
            Err(MazeError::UninitializedPathfinder)
        );
    }

    #[test]
    fn test_initialize_rejects_bad_cell_size() {
        let (grid, mut pathfinder) = generated(5, 5, 42, Algorithm::Backtracker);

        let result = pathfinder.initialize(grid.cells(), 5, 5, 0.);

        assert!(matches!(result, Err(MazeError::InvalidConfig { .. })));
        assert!(!pathfinder.is_initialized());
    }

    #[test]
    fn test_five_by_five_seed_42() {
        let (_, pathfinder) = generated(5, 5, 42, Algorithm::Backtracker);
        let start = GridCoord::new(0, 0);
        let end = GridCoord::new(4, 4);

        let result = pathfinder.find_path(start, end).expect("maze is connected");

        assert!((9..=25).contains(&result.length), "length {}", result.length);
        assert_valid_path(&pathfinder, &result, start, end);
    }

    #[test]
    fn test_start_equals_end() {
        let (_, pathfinder) = generated(5, 5, 42, Algorithm::Backtracker);
        let cell = GridCoord::new(2, 2);

        let result = pathfinder.find_path(cell, cell).expect("room cells are floor");

        assert!(result.success);
        assert_eq!(result.length, 1);
        assert_eq!(result.path, vec![cell]);
        assert_eq!(result.world_path, vec![WorldPosition::new(500., 500., 0.)]);
    }

    #[test]
    fn test_invalid_endpoints() {
        let pathfinder = pathfinder_from_rows(&["..#", "..."]);

        assert_eq!(
            pathfinder.find_path(GridCoord::new(2, 0), GridCoord::new(0, 0)),
            Err(MazeError::InvalidCell {
                endpoint: Endpoint::Start,
                position: GridCoord::new(2, 0),
            })
        );
        assert_eq!(
            pathfinder.find_path(GridCoord::new(0, 0), GridCoord::new(3, 1)),
            Err(MazeError::InvalidCell {
                endpoint: Endpoint::End,
                position: GridCoord::new(3, 1),
            })
        );
        assert_eq!(
            pathfinder.find_path(GridCoord::new(-1, 0), GridCoord::new(0, 0)),
            Err(MazeError::InvalidCell {
                endpoint: Endpoint::Start,
                position: GridCoord::new(-1, 0),
            })
        );
    }

    #[test]
    fn test_disconnected_grid_reports_no_path() {
        let pathfinder = pathfinder_from_rows(&["..#..", "..#.."]);
        let start = GridCoord::new(0, 0);
        let end = GridCoord::new(4, 1);

        assert_eq!(
            pathfinder.find_path(start, end),
            Err(MazeError::NoPathFound { start, end })
        );
    }

    #[test]
    fn test_tie_break_prefers_east_then_south() {
        let pathfinder = pathfinder_from_rows(&["...", "...", "..."]);

        let result = pathfinder
            .find_path(GridCoord::new(0, 0), GridCoord::new(1, 1))
            .expect("open grid");

        assert_eq!(
            result.path,
            vec![GridCoord::new(0, 0), GridCoord::new(1, 0), GridCoord::new(1, 1)]
        );
    }

    #[test]
    fn test_path_around_walls() {
        let pathfinder = pathfinder_from_rows(&[".....", "####.", ".....", ".####", "....."]);
        let start = GridCoord::new(0, 0);
        let end = GridCoord::new(4, 4);

        let result = pathfinder.find_path(start, end).expect("serpentine is connected");

        assert_eq!(result.length, 17);
        assert_valid_path(&pathfinder, &result, start, end);
    }

    #[test]
    fn test_coordinate_transforms() {
        let (_, pathfinder) = generated(9, 9, 1, Algorithm::Prim);

        assert_eq!(
            pathfinder.world_to_grid(WorldPosition::new(350., 50., 120.)),
            GridCoord::new(1, 0)
        );
        assert_eq!(
            pathfinder.world_to_grid(WorldPosition::new(-0.5, -250., 0.)),
            GridCoord::new(-1, -2)
        );
        assert_eq!(
            pathfinder.grid_to_world(GridCoord::new(1, 2)),
            WorldPosition::new(300., 500., 0.)
        );

        let centre = pathfinder.grid_to_world(GridCoord::new(4, 7));
        assert_eq!(pathfinder.world_to_grid(centre), GridCoord::new(4, 7));
    }

    #[test]
    fn test_nearest_walkable_cell() {
        let pathfinder = pathfinder_from_rows(&["#####", "#####", "##.##", "#####"]);

        assert_eq!(
            pathfinder.find_nearest_walkable_cell(GridCoord::new(2, 2)),
            Some(GridCoord::new(2, 2))
        );
        assert_eq!(
            pathfinder.find_nearest_walkable_cell(GridCoord::new(0, 0)),
            Some(GridCoord::new(2, 2))
        );
        assert_eq!(
            pathfinder.find_nearest_walkable_cell(GridCoord::new(-2, 5)),
            Some(GridCoord::new(2, 2))
        );
    }

    #[test]
    fn test_nearest_walkable_cell_tie_break() {
        let pathfinder = pathfinder_from_rows(&["#..", "###", ".##"]);

        // (0, 2), (1, 0) and (2, 0) are all at distance one from the centre; the scan visits the
        // lowest dx first.
        assert_eq!(
            pathfinder.find_nearest_walkable_cell(GridCoord::new(1, 1)),
            Some(GridCoord::new(0, 2))
        );
    }

    #[test]
    fn test_nearest_walkable_cell_out_of_range() {
        let walls = pathfinder_from_rows(&["###", "###"]);
        assert_eq!(walls.find_nearest_walkable_cell(GridCoord::new(1, 1)), None);

        let lonely = pathfinder_from_rows(&[".##", "###"]);
        assert_eq!(lonely.find_nearest_walkable_cell(GridCoord::new(40, 40)), None);
    }

    #[test]
    fn test_find_path_from_world_snaps_to_floor() {
        let pathfinder = pathfinder_from_rows(&["...", "#.#", "..."]);

        let result = pathfinder
            .find_path_from_world(WorldPosition::new(0.5, 1.5, 0.), GridCoord::new(2, 2))
            .expect("snapped start is connected");

        assert_eq!(result.path.first(), Some(&GridCoord::new(0, 0)));
        assert_eq!(result.path.last(), Some(&GridCoord::new(2, 2)));
        assert_eq!(result.length, 5);
    }

    #[test]
    fn test_find_path_from_world_without_floor() {
        let pathfinder = pathfinder_from_rows(&["##", "##"]);

        assert_eq!(
            pathfinder.find_path_from_world(WorldPosition::new(0.5, 0.5, 0.), GridCoord::new(0, 0)),
            Err(MazeError::NoWalkableCellFound {
                position: GridCoord::new(0, 0),
            })
        );
    }

    #[test]
    fn test_find_path_from_world_rejects_non_finite_start() {
        let pathfinder = pathfinder_from_rows(&["...", "...", "..."]);

        for start in [
            WorldPosition::new(f32::NAN, f32::NAN, 0.),
            WorldPosition::new(0.5, f32::INFINITY, 0.),
            WorldPosition::new(f32::NEG_INFINITY, 0.5, 0.),
        ] {
            let result = pathfinder.find_path_from_world(start, GridCoord::new(2, 2));
            assert!(
                matches!(result, Err(MazeError::NonFiniteWorldPosition { .. })),
                "{start} must be rejected, got {result:?}"
            );
        }

        let result = pathfinder
            .find_path_from_world(WorldPosition::new(0.5, 0.5, f32::NAN), GridCoord::new(2, 2))
            .expect("height is ignored");
        assert_eq!(result.path.first(), Some(&GridCoord::new(0, 0)));
    }

    #[test]
    fn test_brute_force_length_reports_unreachable() {
        let pathfinder = pathfinder_from_rows(&[".#.", ".#."]);

        assert_eq!(
            brute_force_length(&pathfinder, GridCoord::new(0, 0), GridCoord::new(2, 1)),
            None
        );
        assert_eq!(
            brute_force_length(&pathfinder, GridCoord::new(0, 0), GridCoord::new(0, 1)),
            Some(2)
        );
    }

    #[test]
    fn test_default_result_is_failure() {
        let result = PathResult::default();

        assert!(!result.success);
        assert!(result.path.is_empty());
        assert_eq!(result.length, 0);
    }

    #[test]
    fn test_pathfinder_is_shareable() {
        /// Compiles only for types that can be shared across threads.
        const fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Pathfinder>();
    }

    proptest! {
        #[test]
        fn bfs_is_optimal_on_generated_mazes(
            seed in any::<u64>(),
            choice in 0_usize..3,
            from in any::<prop::sample::Index>(),
            to in any::<prop::sample::Index>(),
        ) {
            let algorithm = [Algorithm::Backtracker, Algorithm::Prim, Algorithm::Kruskal]
                .get(choice)
                .copied()
                .unwrap_or_default();
            let (grid, pathfinder) = generated(5, 5, seed, algorithm);
            let floors: Vec<GridCoord> = grid
                .cells()
                .iter()
                .filter(|cell| cell.is_floor)
                .map(|cell| cell.position)
                .collect();
            let start = *from.get(&floors);
            let end = *to.get(&floors);

            let result = pathfinder.find_path(start, end).expect("generated mazes are connected");

            prop_assert_eq!(Some(result.length), brute_force_length(&pathfinder, start, end));
            assert_valid_path(&pathfinder, &result, start, end);
        }

        #[test]
        fn bfs_matches_brute_force_on_random_grids(
            mask in prop::collection::vec(any::<bool>(), 42),
            from in any::<prop::sample::Index>(),
            to in any::<prop::sample::Index>(),
        ) {
            let mut pathfinder = Pathfinder::new();
            pathfinder
                .initialize(&cells_from_mask(7, &mask), 7, 6, 1.)
                .expect("consistent grid");
            let floors: Vec<GridCoord> = cells_from_mask(7, &mask)
                .into_iter()
                .filter(|cell| cell.is_floor)
                .map(|cell| cell.position)
                .collect();
            prop_assume!(!floors.is_empty());
            let start = *from.get(&floors);
            let end = *to.get(&floors);

            match brute_force_length(&pathfinder, start, end) {
                Some(length) => {
                    let result = pathfinder.find_path(start, end).expect("reachable");
                    prop_assert_eq!(result.length, length);
                    assert_valid_path(&pathfinder, &result, start, end);
                }
                None => {
                    prop_assert_eq!(
                        pathfinder.find_path(start, end),
                        Err(MazeError::NoPathFound { start, end })
                    );
                }
            }
        }

        #[test]
        fn nearest_cell_minimizes_chebyshev_distance(
            mask in prop::collection::vec(any::<bool>(), 30),
            x in -4_i32..10,
            y in -4_i32..9,
        ) {
            let cells = cells_from_mask(6, &mask);
            let mut pathfinder = Pathfinder::new();
            pathfinder.initialize(&cells, 6, 5, 1.).expect("consistent grid");
            let probe = GridCoord::new(x, y);

            let best = cells
                .iter()
                .filter(|cell| cell.is_floor)
                .map(|cell| cell.position.chebyshev_distance(probe))
                .min();
            let found = pathfinder.find_nearest_walkable_cell(probe);

            match (best, found) {
                (Some(distance), Some(cell)) => {
                    prop_assert!(pathfinder.is_valid_cell(cell));
                    prop_assert_eq!(cell.chebyshev_distance(probe), distance);
                }
                (Some(distance), None) => {
                    prop_assert!(distance > 6, "missed a floor cell within range");
                }
                (None, found) => prop_assert_eq!(found, None),
            }
        }
    }
}

//! Maze generation algorithms over the room graph.
//!
//! All three generators produce a perfect maze: a spanning tree over every room, so any two rooms
//! are joined by exactly one route. They differ in the texture of the result. The backtracker
//! carves long winding corridors with few branches, Prim grows outward from a random seed room
//! and leaves many short dead ends, and Kruskal joins random edges everywhere at once with no
//! particular bias.
//!
//! Generators are plain functions of the room dimensions and a [`DeterministicRandom`]; nothing
//! survives between calls.

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    direction::Direction, disjoint_set::DisjointSet, random::DeterministicRandom,
    room_graph::RoomGraph,
};

/// Selects the algorithm used to carve the room graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Depth-first carving with random neighbour order.
    #[default]
    Backtracker,
    /// Randomized Prim: grow the maze from a random frontier cell.
    Prim,
    /// Randomized Kruskal: join shuffled edges between disjoint regions.
    Kruskal,
}

impl Algorithm {
    /// Carves a `width x height` room graph with this algorithm.
    pub fn build(self, width: usize, height: usize, random: &mut DeterministicRandom) -> RoomGraph {
        let graph = match self {
            Self::Backtracker => backtracker(width, height, random),
            Self::Prim => prim(width, height, random),
            Self::Kruskal => kruskal(width, height, random),
        };

        debug!(
            "{self:?} carved {} passages over {}x{} rooms",
            graph.edge_count(),
            width,
            height
        );

        graph
    }
}

/// Pending work for the backtracker: a room and the directions still to try from it.
#[derive(Clone, Copy, Debug)]
struct Frame {
    /// Room being carved from.
    room: usize,
    /// Shuffled directions to try, in order.
    directions: [Direction; 4],
    /// Position of the next direction to try in [`Frame::directions`].
    next: usize,
}

impl Frame {
    /// Enters `room`, drawing its direction order from `random`.
    fn enter(room: usize, random: &mut DeterministicRandom) -> Self {
        let mut directions = Direction::ALL;
        random.shuffle(&mut directions);

        Self {
            room,
            directions,
            next: 0,
        }
    }
}

/// Carves a maze by depth-first search from room `(0, 0)`.
///
/// On entering a room the four directions are shuffled; each is tried in turn, and any neighbour
/// with nothing carved yet gets a passage and becomes the new current room. When a room runs out of
/// directions the search returns to the room it came from. The pending rooms live on an explicit
/// stack, so grid size is bounded by memory rather than by call depth.
pub fn backtracker(width: usize, height: usize, random: &mut DeterministicRandom) -> RoomGraph {
    let mut graph = RoomGraph::new(width, height);
    let Some(start) = graph.index(0, 0) else {
        return graph;
    };

    let mut stack = vec![Frame::enter(start, random)];

    while let Some(frame) = stack.last_mut() {
        let Some(direction) = frame.directions.get(frame.next).copied() else {
            let _ = stack.pop();
            continue;
        };
        frame.next += 1;
        let room = frame.room;

        let Some(next) = graph.neighbour(room, direction) else {
            continue;
        };
        if graph.is_untouched(next) {
            let _ = graph.carve(room, direction);
            stack.push(Frame::enter(next, random));
        }
    }

    graph
}

/// Membership of a room during Prim's algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum CellState {
    /// Not yet adjacent to the maze.
    #[default]
    Out,
    /// Adjacent to the maze and waiting in the frontier list.
    Frontier,
    /// Part of the maze.
    In,
}

/// Working state of a single Prim run.
struct PrimState {
    /// Passages carved so far.
    graph: RoomGraph,
    /// Membership of every room, row-major.
    states: Vec<CellState>,
    /// Rooms currently in the frontier.
    frontier: Vec<usize>,
}

impl PrimState {
    /// Membership of the room at `index`; rooms outside the grid read as [`CellState::Out`].
    fn state(&self, index: usize) -> CellState {
        self.states.get(index).copied().unwrap_or_default()
    }

    /// Moves `room` into the maze and pushes every neighbour still outside onto the frontier.
    fn absorb(&mut self, room: usize) {
        if let Some(state) = self.states.get_mut(room) {
            *state = CellState::In;
        }

        for direction in Direction::ALL {
            let Some(next) = self.graph.neighbour(room, direction) else {
                continue;
            };
            if let Some(state) = self.states.get_mut(next) {
                if *state == CellState::Out {
                    *state = CellState::Frontier;
                    self.frontier.push(next);
                }
            }
        }
    }

    /// Directions from `room` that lead to a room already in the maze.
    fn inward_directions(&self, room: usize) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|direction| {
                self.graph
                    .neighbour(room, *direction)
                    .is_some_and(|next| self.state(next) == CellState::In)
            })
            .collect()
    }
}

/// Carves a maze with randomized Prim's algorithm.
///
/// A uniformly random room seeds the maze. Each step removes a uniformly random frontier room,
/// joins it to one uniformly random neighbour already in the maze and adds its own outside
/// neighbours to the frontier, until the frontier is empty.
pub fn prim(width: usize, height: usize, random: &mut DeterministicRandom) -> RoomGraph {
    let graph = RoomGraph::new(width, height);
    if graph.is_empty() {
        return graph;
    }

    let start_x = random.next_in_range(0, width - 1);
    let start_y = random.next_in_range(0, height - 1);

    let mut state = PrimState {
        states: vec![CellState::Out; graph.len()],
        frontier: Vec::new(),
        graph,
    };
    if let Some(start) = state.graph.index(start_x, start_y) {
        state.absorb(start);
    }

    while !state.frontier.is_empty() {
        let pick = random.next_in_range(0, state.frontier.len() - 1);
        let room = state.frontier.swap_remove(pick);

        let inward = state.inward_directions(room);
        if let Some(last) = inward.len().checked_sub(1) {
            let choice = random.next_in_range(0, last);
            if let Some(direction) = inward.get(choice) {
                let _ = state.graph.carve(room, *direction);
            }
        }

        state.absorb(room);
    }

    state.graph
}

/// Carves a maze with randomized Kruskal's algorithm.
///
/// Every undirected edge is listed once, through the west and north side of each room, and the
/// list is shuffled. Walking the shuffled list, an edge is carved whenever its two rooms are still
/// in different sets of a [`DisjointSet`], and the sets are merged.
pub fn kruskal(width: usize, height: usize, random: &mut DeterministicRandom) -> RoomGraph {
    let mut graph = RoomGraph::new(width, height);
    let mut sets = DisjointSet::new(graph.len());

    let mut edges = Vec::with_capacity(graph.len().saturating_mul(2));
    for room in 0..graph.len() {
        let (x, y) = graph.position(room);
        if x > 0 {
            edges.push((room, Direction::West));
        }
        if y > 0 {
            edges.push((room, Direction::North));
        }
    }

    random.shuffle(&mut edges);

    for (room, direction) in edges {
        let Some(next) = graph.neighbour(room, direction) else {
            continue;
        };
        if sets.union(room, next) {
            let _ = graph.carve(room, direction);
        }
    }

    graph
}

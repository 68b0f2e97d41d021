//! The maze as a graph: one node per cell, one edge per knocked down internal wall.

use petgraph::algo;
use petgraph::graph::{self, NodeIndex};
use petgraph::{Graph, Undirected};
use std::fmt::Write;

use crate::cells::{CompassPrimary, MapCoordinate};
use crate::maze_map::MazeMap;
use crate::wall_grid::WallGrid;

pub type PassageGraph = Graph<MapCoordinate, (), Undirected, u32>;

/// Build the passage graph of a wall grid. Node indices are the row major cell indices.
pub fn passage_graph(grid: &WallGrid, map: &MazeMap) -> PassageGraph {
    let cells_count = map.cells_count();
    let mut graph = PassageGraph::with_capacity(cells_count, cells_count);
    for cell in map {
        let _ = graph.add_node(cell.map_coordinate());
    }

    let row_length = map.size().cells_per_side();
    for cell in map {
        let coord = cell.map_coordinate();
        // Looking only South and East visits every internal wall once.
        for dir in &[CompassPrimary::South, CompassPrimary::East] {
            let neighbour = coord.offset(*dir).filter(|n| map.is_valid_coordinate(*n));
            let wall_open = cell.grid_coordinate()
                .wall_towards(*dir)
                .map_or(false, |wall| grid.is_open(wall));

            if let (Some(neighbour_coord), true) = (neighbour, wall_open) {
                let _ = graph.add_edge(node_index(coord, row_length),
                                       node_index(neighbour_coord, row_length),
                                       ());
            }
        }
    }
    graph
}

/// Number of opened walls between two cells, ignoring the entrance and exit.
pub fn internal_openings(grid: &WallGrid, map: &MazeMap) -> usize {
    passage_graph(grid, map).edge_count()
}

/// A perfect maze is a spanning tree of its cells: connected with one edge fewer than nodes.
pub fn is_perfect(graph: &PassageGraph) -> bool {
    let nodes = graph.node_count();
    nodes > 0 && graph.edge_count() == nodes - 1 && algo::connected_components(graph) == 1
}

/// Serialise the passages as text: line 1 is "n m" (vertex and edge counts), every further line
/// is an edge between two 1-based vertex indices.
pub fn edges_text(graph: &PassageGraph) -> String {
    let mut graph_data = String::new();
    let _ = writeln!(graph_data, "{} {}", graph.node_count(), graph.edge_count());
    for edge in graph.raw_edges() {
        let _ = writeln!(graph_data, "{} {}", edge.source().index() + 1, edge.target().index() + 1);
    }
    graph_data
}

#[inline]
pub fn node_index(coord: MapCoordinate, row_length: usize) -> NodeIndex<u32> {
    graph::NodeIndex::new(coord.row_major_index(row_length))
}

use fnv::FnvHashMap;
use itertools::Itertools;
use smallvec::SmallVec;

use crate::cells::MapCoordinate;
use crate::maze_map::MazeMap;
use crate::passages::{self, PassageGraph};

/// Flood fill distances, in steps through passages, from one start cell.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: MapCoordinate,
    distances: FnvHashMap<MapCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// None if the start coordinate is not on the map.
    pub fn new(graph: &PassageGraph,
               map: &MazeMap,
               start_coordinate: MapCoordinate)
               -> Option<Distances> {

        if !map.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let row_length = map.size().cells_per_side();
        let mut distances =
            FnvHashMap::with_capacity_and_hasher(map.cells_count(), Default::default());
        distances.insert(start_coordinate, 0);
        let mut max = 0;

        // Every link is one step, so the first time a cell is reached is via a shortest route
        // and the distances map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {
                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for linked in graph.neighbors(passages::node_index(*cell_coord, row_length)) {
                    let linked_coord = graph[linked];
                    if !distances.contains_key(&linked_coord) {
                        distances.insert(linked_coord, distance_to_cell + 1);
                        new_frontier.push(linked_coord);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> MapCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// None for unreachable or invalid coordinates.
    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: MapCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    pub fn furthest_points(&self) -> SmallVec<[MapCoordinate; 8]> {
        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == self.max_distance)
            .map(|(coord, _)| *coord)
            .sorted()
            .collect()
    }
}

/// Walk back from `end_point` towards the start of `distances_from_start`, always stepping to a
/// linked cell one closer. None if the end point is unreachable.
pub fn shortest_path(graph: &PassageGraph,
                     map: &MazeMap,
                     distances_from_start: &Distances,
                     end_point: MapCoordinate)
                     -> Option<Vec<MapCoordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let row_length = map.size().cells_per_side();
    let start = distances_from_start.start();

    let mut path = vec![end_point];
    let mut current_coord = end_point;

    while current_coord != start {
        let closer = graph.neighbors(passages::node_index(current_coord, row_length))
            .map(|linked| graph[linked])
            .filter_map(|coord| {
                distances_from_start.distance_from_start_to(coord).map(|d| (coord, d))
            })
            .min_by_key(|&(_, d)| d);

        match closer {
            Some((closer_coord, closer_distance)) if closer_distance < current_distance => {
                current_coord = closer_coord;
                current_distance = closer_distance;
                path.push(current_coord);
            }
            // Not getting any closer: the distances do not belong to this graph.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::GridCoordinate;
    use crate::units::MazeSize;
    use crate::wall_grid::{WallGrid, PASSAGE_MARKER};

    fn mc(row: usize, column: usize) -> MapCoordinate {
        MapCoordinate::new(row, column)
    }

    /// 2x2 maze with the given internal walls knocked down.
    fn small_maze(open_walls: &[(usize, usize)]) -> (PassageGraph, MazeMap) {
        let size = MazeSize::new(2).unwrap();
        let map = MazeMap::build(size);
        let mut grid = WallGrid::new(size);
        for cell in &map {
            grid.open(cell.grid_coordinate(), PASSAGE_MARKER).unwrap();
        }
        for &(row, column) in open_walls {
            grid.open(GridCoordinate::new(row, column), PASSAGE_MARKER).unwrap();
        }
        (passages::passage_graph(&grid, &map), map)
    }

    #[test]
    fn distances_construction_requires_valid_start_coordinate() {
        let (graph, map) = small_maze(&[]);
        assert!(Distances::new(&graph, &map, mc(2, 0)).is_none());
    }

    #[test]
    fn start() {
        let (graph, map) = small_maze(&[]);
        let distances = Distances::new(&graph, &map, mc(1, 1)).unwrap();
        assert_eq!(distances.start(), mc(1, 1));
        assert_eq!(distances.max(), 0);
    }

    #[test]
    fn distances_to_unreachable_cells_is_none() {
        let (graph, map) = small_maze(&[]);
        let distances = Distances::new(&graph, &map, mc(0, 0)).unwrap();
        for cell in &map {
            let coord = cell.map_coordinate();
            if coord == mc(0, 0) {
                assert_eq!(distances.distance_from_start_to(coord), Some(0));
            } else {
                assert_eq!(distances.distance_from_start_to(coord), None);
            }
        }
        assert_eq!(shortest_path(&graph, &map, &distances, mc(1, 1)), None);
    }

    #[test]
    fn distances_along_a_u_bend() {
        // (0,0) -> (1,0) -> (1,1) -> (0,1)
        let (graph, map) = small_maze(&[(2, 1), (3, 2), (2, 3)]);
        let distances = Distances::new(&graph, &map, mc(0, 0)).unwrap();

        assert_eq!(distances.distance_from_start_to(mc(0, 0)), Some(0));
        assert_eq!(distances.distance_from_start_to(mc(1, 0)), Some(1));
        assert_eq!(distances.distance_from_start_to(mc(1, 1)), Some(2));
        assert_eq!(distances.distance_from_start_to(mc(0, 1)), Some(3));
        assert_eq!(distances.max(), 3);
        assert_eq!(&*distances.furthest_points(), &[mc(0, 1)]);
    }

    #[test]
    fn path_along_a_u_bend() {
        let (graph, map) = small_maze(&[(2, 1), (3, 2), (2, 3)]);
        let distances = Distances::new(&graph, &map, mc(0, 0)).unwrap();
        assert_eq!(shortest_path(&graph, &map, &distances, mc(0, 1)),
                   Some(vec![mc(0, 0), mc(1, 0), mc(1, 1), mc(0, 1)]));
        assert_eq!(shortest_path(&graph, &map, &distances, mc(0, 0)), Some(vec![mc(0, 0)]));
    }

    #[test]
    fn furthest_points_of_a_fork() {
        // (0,1) <- (0,0) -> (1,0)
        let (graph, map) = small_maze(&[(1, 2), (2, 1)]);
        let distances = Distances::new(&graph, &map, mc(0, 0)).unwrap();
        assert_eq!(&*distances.furthest_points(), &[mc(0, 1), mc(1, 0)]);
    }
}

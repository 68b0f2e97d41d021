use smallvec::SmallVec;
use std::slice;

use crate::cells::{Cell, CompassPrimary, GridCoordinate, MapCoordinate};
use crate::units::MazeSize;

pub type CoordinateSmallVec = SmallVec<[MapCoordinate; 4]>;

/// Neighbour insertion order: up, down, left, right.
/// Seeded generation depends on this order staying fixed.
const NEIGHBOUR_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::North,
                                                   CompassPrimary::South,
                                                   CompassPrimary::West,
                                                   CompassPrimary::East];

/// The N * N logical maze: one `Cell` per map coordinate, stored row major.
///
/// Each map row/column index `i` corresponds to the `i`th odd integer in `[0, 2N)` of the wall
/// grid, held in a lookup table so that cell and wall addressing share one source of truth.
#[derive(Clone, PartialEq, Debug)]
pub struct MazeMap {
    size: MazeSize,
    cells: Vec<Cell>,
    odd_indices: Vec<usize>,
}

impl MazeMap {
    pub fn build(size: MazeSize) -> MazeMap {
        let side = size.cells_per_side();
        let odd_indices = (0..2 * side).filter(|i| i % 2 != 0).collect::<Vec<usize>>();

        let mut cells = Vec::with_capacity(size.cells_count());
        for (map_row, &grid_row) in odd_indices.iter().enumerate() {
            for (map_column, &grid_column) in odd_indices.iter().enumerate() {
                cells.push(Cell::new(MapCoordinate::new(map_row, map_column),
                                     GridCoordinate::new(grid_row, grid_column)));
            }
        }

        MazeMap {
            size,
            cells,
            odd_indices,
        }
    }

    #[inline]
    pub fn size(&self) -> MazeSize {
        self.size
    }

    #[inline]
    pub fn cells_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: MapCoordinate) -> bool {
        let side = self.size.cells_per_side();
        coord.row < side && coord.column < side
    }

    pub fn cell(&self, coord: MapCoordinate) -> Option<&Cell> {
        self.cell_index(coord).map(|index| &self.cells[index])
    }

    pub fn cell_mut(&mut self, coord: MapCoordinate) -> Option<&mut Cell> {
        match self.cell_index(coord) {
            Some(index) => Some(&mut self.cells[index]),
            None => None,
        }
    }

    pub fn grid_coordinate(&self, coord: MapCoordinate) -> Option<GridCoordinate> {
        if self.is_valid_coordinate(coord) {
            Some(GridCoordinate::new(self.odd_indices[coord.row], self.odd_indices[coord.column]))
        } else {
            None
        }
    }

    /// Inverse of `grid_coordinate`. None for wall tiles and for tiles outside the grid.
    pub fn map_coordinate(&self, coord: GridCoordinate) -> Option<MapCoordinate> {
        if !coord.is_cell_position() {
            return None;
        }
        let map_coord = MapCoordinate::new((coord.row - 1) / 2, (coord.column - 1) / 2);
        if self.is_valid_coordinate(map_coord) {
            Some(map_coord)
        } else {
            None
        }
    }

    /// In-bounds cells to the North, South, West or East, in that order.
    pub fn neighbours(&self, coord: MapCoordinate) -> CoordinateSmallVec {
        NEIGHBOUR_DIRECTIONS.iter()
            .filter_map(|dir| coord.offset(*dir))
            .filter(|neighbour| self.is_valid_coordinate(*neighbour))
            .collect()
    }

    /// The neighbours the carving walk may still move into.
    pub fn unvisited_neighbours(&self, coord: MapCoordinate) -> CoordinateSmallVec {
        self.neighbours(coord)
            .into_iter()
            .filter(|neighbour| self.cell(*neighbour).map_or(false, |cell| !cell.is_visited()))
            .collect()
    }

    /// Marks the cell visited. Returns true if this is the first visit.
    pub fn mark_visited(&mut self, coord: MapCoordinate) -> bool {
        match self.cell_mut(coord) {
            Some(cell) if !cell.is_visited() => {
                cell.mark_visited();
                true
            }
            _ => false,
        }
    }

    pub fn is_visited(&self, coord: MapCoordinate) -> bool {
        self.cell(coord).map_or(false, Cell::is_visited)
    }

    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_visited()).count()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<Cell> {
        self.cells.iter()
    }

    #[inline]
    fn cell_index(&self, coord: MapCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row_major_index(self.size.cells_per_side()))
        } else {
            None
        }
    }
}

impl<'a> IntoIterator for &'a MazeMap {
    type Item = &'a Cell;
    type IntoIter = slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fnv::FnvHashSet;
    use itertools::Itertools;

    fn map_of(n: usize) -> MazeMap {
        MazeMap::build(MazeSize::new(n).expect("valid maze size"))
    }

    fn mc(row: usize, column: usize) -> MapCoordinate {
        MapCoordinate::new(row, column)
    }

    #[test]
    fn cell_count() {
        assert_eq!(map_of(1).cells_count(), 1);
        assert_eq!(map_of(7).cells_count(), 49);
    }

    #[test]
    fn grid_coordinates_are_odd_and_bijective() {
        let m = map_of(6);
        let mut seen_grid_coords =
            FnvHashSet::with_capacity_and_hasher(m.cells_count(), Default::default());
        for cell in &m {
            let map_coord = cell.map_coordinate();
            let grid_coord = cell.grid_coordinate();
            assert!(grid_coord.is_cell_position());
            assert_eq!(grid_coord, GridCoordinate::new(2 * map_coord.row + 1, 2 * map_coord.column + 1));
            assert_eq!(m.grid_coordinate(map_coord), Some(grid_coord));
            assert_eq!(m.map_coordinate(grid_coord), Some(map_coord));
            assert!(seen_grid_coords.insert(grid_coord));
        }
        assert_eq!(seen_grid_coords.len(), 36);
    }

    #[test]
    fn non_cell_tiles_have_no_map_coordinate() {
        let m = map_of(3);
        assert_eq!(m.map_coordinate(GridCoordinate::new(0, 0)), None);
        assert_eq!(m.map_coordinate(GridCoordinate::new(1, 2)), None);
        assert_eq!(m.map_coordinate(GridCoordinate::new(2, 1)), None);
        assert_eq!(m.map_coordinate(GridCoordinate::new(7, 1)), None);
        assert_eq!(m.grid_coordinate(mc(3, 0)), None);
    }

    #[test]
    fn neighbour_cells() {
        let m = map_of(10);
        let check_expected_neighbours = |coord, expected_neighbours: &[MapCoordinate]| {
            let neighbours = m.neighbours(coord).iter().cloned().sorted().collect::<Vec<_>>();
            let expected = expected_neighbours.iter().cloned().sorted().collect::<Vec<_>>();
            assert_eq!(neighbours, expected);
        };

        // corners
        check_expected_neighbours(mc(0, 0), &[mc(1, 0), mc(0, 1)]);
        check_expected_neighbours(mc(0, 9), &[mc(1, 9), mc(0, 8)]);
        check_expected_neighbours(mc(9, 0), &[mc(8, 0), mc(9, 1)]);
        check_expected_neighbours(mc(9, 9), &[mc(8, 9), mc(9, 8)]);

        // sides
        check_expected_neighbours(mc(0, 4), &[mc(1, 4), mc(0, 3), mc(0, 5)]);
        check_expected_neighbours(mc(5, 9), &[mc(4, 9), mc(6, 9), mc(5, 8)]);

        check_expected_neighbours(mc(1, 1), &[mc(0, 1), mc(2, 1), mc(1, 0), mc(1, 2)]);
    }

    #[test]
    fn neighbour_order_is_up_down_left_right() {
        let m = map_of(3);
        assert_eq!(&*m.neighbours(mc(1, 1)), &[mc(0, 1), mc(2, 1), mc(1, 0), mc(1, 2)]);
    }

    #[test]
    fn single_cell_has_no_neighbours() {
        let m = map_of(1);
        assert!(m.neighbours(mc(0, 0)).is_empty());
    }

    #[test]
    fn unvisited_neighbours_shrink_as_cells_are_visited() {
        let mut m = map_of(3);
        assert_eq!(m.unvisited_neighbours(mc(1, 1)).len(), 4);

        assert!(m.mark_visited(mc(0, 1)));
        assert!(m.mark_visited(mc(1, 2)));
        assert_eq!(&*m.unvisited_neighbours(mc(1, 1)), &[mc(2, 1), mc(1, 0)]);
        assert_eq!(m.visited_count(), 2);
    }

    #[test]
    fn mark_visited_reports_first_visit_only() {
        let mut m = map_of(2);
        assert!(!m.is_visited(mc(1, 1)));
        assert!(m.mark_visited(mc(1, 1)));
        assert!(!m.mark_visited(mc(1, 1)));
        assert!(m.is_visited(mc(1, 1)));
        assert!(!m.mark_visited(mc(5, 5)));
        assert_eq!(m.visited_count(), 1);
    }
}

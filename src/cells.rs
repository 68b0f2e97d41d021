use std::convert::From;

/// Position of a cell in the N * N logical maze.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct MapCoordinate {
    pub row: usize,
    pub column: usize,
}

/// Position of a tile in the (2N + 1) * (2N + 1) wall grid.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: usize,
    pub column: usize,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl MapCoordinate {
    pub fn new(row: usize, column: usize) -> MapCoordinate {
        MapCoordinate { row, column }
    }

    /// Row major index of this coordinate on a map with `row_length` cells per row.
    #[inline]
    pub fn row_major_index(&self, row_length: usize) -> usize {
        self.row * row_length + self.column
    }

    #[inline]
    pub fn from_row_major_index(index: usize, row_length: usize) -> MapCoordinate {
        MapCoordinate::new(index / row_length, index % row_length)
    }

    /// The coordinate 1 cell away in the given direction.
    /// Returns None if it would go below zero, upper bounds are the map's business.
    pub fn offset(&self, dir: CompassPrimary) -> Option<MapCoordinate> {
        let (row, column) = (self.row, self.column);
        match dir {
            CompassPrimary::North => row.checked_sub(1).map(|r| MapCoordinate::new(r, column)),
            CompassPrimary::South => Some(MapCoordinate::new(row + 1, column)),
            CompassPrimary::East => Some(MapCoordinate::new(row, column + 1)),
            CompassPrimary::West => column.checked_sub(1).map(|c| MapCoordinate::new(row, c)),
        }
    }
}

impl From<(usize, usize)> for MapCoordinate {
    fn from(row_column_pair: (usize, usize)) -> MapCoordinate {
        MapCoordinate::new(row_column_pair.0, row_column_pair.1)
    }
}

impl GridCoordinate {
    pub fn new(row: usize, column: usize) -> GridCoordinate {
        GridCoordinate { row, column }
    }

    /// Is this the position of a cell rather than a wall or wall corner.
    #[inline]
    pub fn is_cell_position(&self) -> bool {
        self.row % 2 == 1 && self.column % 2 == 1
    }

    /// The wall tile shared with the neighbouring cell in the given direction.
    pub fn wall_towards(&self, dir: CompassPrimary) -> Option<GridCoordinate> {
        let (row, column) = (self.row, self.column);
        match dir {
            CompassPrimary::North => row.checked_sub(1).map(|r| GridCoordinate::new(r, column)),
            CompassPrimary::South => Some(GridCoordinate::new(row + 1, column)),
            CompassPrimary::East => Some(GridCoordinate::new(row, column + 1)),
            CompassPrimary::West => column.checked_sub(1).map(|c| GridCoordinate::new(row, c)),
        }
    }

    /// Shift by a uniform border on the top and left, e.g. when moving into a padded grid.
    #[inline]
    pub fn shifted(&self, by: usize) -> GridCoordinate {
        GridCoordinate::new(self.row + by, self.column + by)
    }
}

impl From<(usize, usize)> for GridCoordinate {
    fn from(row_column_pair: (usize, usize)) -> GridCoordinate {
        GridCoordinate::new(row_column_pair.0, row_column_pair.1)
    }
}

impl CompassPrimary {
    /// The direction of travel from `from` to the adjacent cell `to`.
    ///
    /// Returns None unless the cells differ by exactly 1 on exactly one axis.
    pub fn between(from: MapCoordinate, to: MapCoordinate) -> Option<CompassPrimary> {
        let row_delta = to.row as isize - from.row as isize;
        let column_delta = to.column as isize - from.column as isize;
        match (row_delta, column_delta) {
            (-1, 0) => Some(CompassPrimary::North),
            (1, 0) => Some(CompassPrimary::South),
            (0, 1) => Some(CompassPrimary::East),
            (0, -1) => Some(CompassPrimary::West),
            _ => None,
        }
    }

    pub fn opposite(&self) -> CompassPrimary {
        match *self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }
}

/// A single maze unit.
///
/// Both coordinates are fixed when the maze map is built. The visited flag flips once, when the
/// carving walk first enters the cell, and is never reset.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    visited: bool,
    map_coordinate: MapCoordinate,
    grid_coordinate: GridCoordinate,
}

impl Cell {
    pub fn new(map_coordinate: MapCoordinate, grid_coordinate: GridCoordinate) -> Cell {
        Cell {
            visited: false,
            map_coordinate,
            grid_coordinate,
        }
    }

    #[inline]
    pub fn mark_visited(&mut self) {
        self.visited = true;
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    #[inline]
    pub fn map_coordinate(&self) -> MapCoordinate {
        self.map_coordinate
    }

    #[inline]
    pub fn grid_coordinate(&self) -> GridCoordinate {
        self.grid_coordinate
    }
}

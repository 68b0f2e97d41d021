use std::error::Error;
use std::fmt;
use std::slice;

use crate::cells::GridCoordinate;
use crate::units::{BorderWidth, MazeSize};

/// Numeric value of a wall tile when the grid is exported as intensities.
pub const WALL_INTENSITY: f32 = 1.0;

/// Weight of a plain passage marker.
pub const PASSAGE_MARKER: f32 = 0.0;

/// One entry of the wall grid.
///
/// Passages carry a weight in `[0, 1)` that renderers may use as a colour gradient; it has no
/// meaning for the maze structure.
#[derive(PartialEq, Copy, Clone, Debug)]
pub enum Tile {
    Wall,
    Passage(f32),
}

impl Tile {
    #[inline]
    pub fn is_wall(&self) -> bool {
        *self == Tile::Wall
    }

    #[inline]
    pub fn is_passage(&self) -> bool {
        !self.is_wall()
    }

    #[inline]
    pub fn intensity(&self) -> f32 {
        match *self {
            Tile::Wall => WALL_INTENSITY,
            Tile::Passage(weight) => weight,
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum OpenError {
    InvalidGridCoordinate(GridCoordinate),
}

impl fmt::Display for OpenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            OpenError::InvalidGridCoordinate(coord) => {
                write!(f, "grid coordinate ({}, {}) is outside the wall grid", coord.row, coord.column)
            }
        }
    }
}

impl Error for OpenError {}

/// Square lattice of walls and passages.
///
/// For an N * N maze the side is 2N + 1: odd-odd tiles are cells, odd-even and even-odd tiles are
/// the walls shared between neighbouring cells and the even rows and columns form the border.
/// Knocking down a wall and carving a cell are the same operation, `open`.
#[derive(Clone, PartialEq, Debug)]
pub struct WallGrid {
    side: usize,
    tiles: Vec<Tile>,
}

impl WallGrid {
    /// A grid for a maze of the given size with every tile a wall.
    pub fn new(size: MazeSize) -> WallGrid {
        WallGrid::walled(size.grid_side())
    }

    fn walled(side: usize) -> WallGrid {
        WallGrid {
            side,
            tiles: vec![Tile::Wall; side * side],
        }
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        coord.row < self.side && coord.column < self.side
    }

    pub fn tile(&self, coord: GridCoordinate) -> Option<Tile> {
        if self.is_valid_coordinate(coord) {
            Some(self.tiles[self.index(coord)])
        } else {
            None
        }
    }

    /// Is there a passage at the coordinate. False outside the grid.
    #[inline]
    pub fn is_open(&self, coord: GridCoordinate) -> bool {
        self.tile(coord).map_or(false, |tile| tile.is_passage())
    }

    /// Turn the tile into a passage carrying `weight`.
    ///
    /// Passages never close again, opening an already open tile only replaces its weight.
    pub fn open(&mut self, coord: GridCoordinate, weight: f32) -> Result<(), OpenError> {
        if self.is_valid_coordinate(coord) {
            let index = self.index(coord);
            self.tiles[index] = Tile::Passage(weight);
            Ok(())
        } else {
            Err(OpenError::InvalidGridCoordinate(coord))
        }
    }

    /// A copy of this grid framed by `border` rows and columns of wall on every side.
    pub fn pad(&self, border: BorderWidth) -> WallGrid {
        let BorderWidth(width) = border;
        let mut padded = WallGrid::walled(self.side + 2 * width);
        for (row_index, row) in self.rows().enumerate() {
            let start = padded.index(GridCoordinate::new(row_index + width, width));
            padded.tiles[start..start + self.side].copy_from_slice(row);
        }
        padded
    }

    /// Remove `border` rows and columns from every side, the inverse of `pad`.
    ///
    /// Returns None if nothing would remain.
    pub fn strip(&self, border: BorderWidth) -> Option<WallGrid> {
        let BorderWidth(width) = border;
        if 2 * width >= self.side {
            return None;
        }
        let side = self.side - 2 * width;
        let tiles = self.rows()
            .skip(width)
            .take(side)
            .flat_map(|row| row[width..width + side].iter().cloned())
            .collect();
        Some(WallGrid { side, tiles })
    }

    #[inline]
    pub fn rows(&self) -> slice::Chunks<Tile> {
        self.tiles.chunks(self.side)
    }

    /// Coordinates of the passages in one column, top to bottom.
    pub fn openings_in_column(&self, column: usize) -> Vec<GridCoordinate> {
        if column >= self.side {
            return vec![];
        }
        (0..self.side)
            .map(|row| GridCoordinate::new(row, column))
            .filter(|coord| self.is_open(*coord))
            .collect()
    }

    /// Numeric export: walls are `WALL_INTENSITY`, passages their weight.
    pub fn intensities(&self) -> Vec<Vec<f32>> {
        self.rows()
            .map(|row| row.iter().map(Tile::intensity).collect())
            .collect()
    }

    pub fn passages_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_passage()).count()
    }

    #[inline]
    fn index(&self, coord: GridCoordinate) -> usize {
        coord.row * self.side + coord.column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_of(n: usize) -> WallGrid {
        WallGrid::new(MazeSize::new(n).expect("valid maze size"))
    }

    fn gc(row: usize, column: usize) -> GridCoordinate {
        GridCoordinate::new(row, column)
    }

    #[test]
    fn new_grid_is_all_wall() {
        let g = grid_of(4);
        assert_eq!(g.side(), 9);
        assert_eq!(g.rows().count(), 9);
        assert!(g.rows().all(|row| row.len() == 9 && row.iter().all(Tile::is_wall)));
        assert_eq!(g.passages_count(), 0);
    }

    #[test]
    fn open_tiles() {
        let mut g = grid_of(2);
        assert!(!g.is_open(gc(1, 1)));
        g.open(gc(1, 1), PASSAGE_MARKER).expect("open failed");
        g.open(gc(1, 2), 0.25).expect("open failed");

        assert_eq!(g.tile(gc(1, 1)), Some(Tile::Passage(PASSAGE_MARKER)));
        assert_eq!(g.tile(gc(1, 2)), Some(Tile::Passage(0.25)));
        assert!(g.is_open(gc(1, 2)));
        assert_eq!(g.passages_count(), 2);
    }

    #[test]
    fn reopening_keeps_a_passage() {
        let mut g = grid_of(2);
        g.open(gc(3, 3), 0.5).expect("open failed");
        g.open(gc(3, 3), PASSAGE_MARKER).expect("open failed");
        assert_eq!(g.tile(gc(3, 3)), Some(Tile::Passage(PASSAGE_MARKER)));
        assert_eq!(g.passages_count(), 1);
    }

    #[test]
    fn no_opening_outside_the_grid() {
        let mut g = grid_of(2);
        assert_eq!(g.open(gc(5, 0), PASSAGE_MARKER),
                   Err(OpenError::InvalidGridCoordinate(gc(5, 0))));
        assert_eq!(g.tile(gc(0, 5)), None);
        assert!(!g.is_open(gc(5, 5)));
    }

    #[test]
    fn pad_frames_with_walls() {
        let mut g = grid_of(1);
        g.open(gc(1, 0), PASSAGE_MARKER).expect("open failed");
        g.open(gc(1, 1), PASSAGE_MARKER).expect("open failed");

        let padded = g.pad(BorderWidth(2));
        assert_eq!(padded.side(), 7);
        assert_eq!(padded.passages_count(), 2);
        assert!(padded.is_open(gc(3, 2)));
        assert!(padded.is_open(gc(3, 3)));
        for i in 0..7 {
            for border in &[0, 1, 5, 6] {
                assert!(!padded.is_open(gc(i, *border)));
                assert!(!padded.is_open(gc(*border, i)));
            }
        }
    }

    #[test]
    fn strip_undoes_pad() {
        let mut g = grid_of(3);
        g.open(gc(1, 0), PASSAGE_MARKER).expect("open failed");
        g.open(gc(3, 3), 0.3).expect("open failed");
        g.open(gc(5, 6), 0.6).expect("open failed");

        let padded = g.pad(BorderWidth(2));
        assert_eq!(padded.strip(BorderWidth(2)), Some(g.clone()));
        assert_eq!(g.pad(BorderWidth(0)), g);
    }

    #[test]
    fn strip_everything_is_none() {
        let g = grid_of(1);
        assert_eq!(g.strip(BorderWidth(2)), None);
        assert_eq!(g.strip(BorderWidth(1)).map(|s| s.side()), Some(1));
    }

    #[test]
    fn column_openings() {
        let mut g = grid_of(3);
        g.open(gc(3, 0), PASSAGE_MARKER).expect("open failed");
        g.open(gc(5, 0), PASSAGE_MARKER).expect("open failed");
        assert_eq!(g.openings_in_column(0), vec![gc(3, 0), gc(5, 0)]);
        assert!(g.openings_in_column(6).is_empty());
        assert!(g.openings_in_column(99).is_empty());
    }

    #[test]
    fn intensity_export() {
        let mut g = grid_of(1);
        g.open(gc(1, 1), 0.5).expect("open failed");
        let values = g.intensities();
        assert_eq!(values.len(), 3);
        assert_eq!(values[0], vec![WALL_INTENSITY; 3]);
        assert_eq!(values[1], vec![WALL_INTENSITY, 0.5, WALL_INTENSITY]);
    }
}

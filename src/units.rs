/// Width of a wall border, counted in grid tiles.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct BorderWidth(pub usize);

/// Side length in pixels of one rendered grid tile. Max 255.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellPixels(pub u8);

/// Side length of a square maze, counted in cells.
///
/// Only constructible for sizes whose wall grid can be addressed, so holding one means the
/// maze map and wall grid can be allocated.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct MazeSize(usize);

impl MazeSize {
    pub fn new(cells_per_side: usize) -> Option<MazeSize> {
        if cells_per_side == 0 {
            return None;
        }
        cells_per_side
            .checked_mul(2)
            .and_then(|doubled| doubled.checked_add(1))
            .and_then(|grid_side| grid_side.checked_mul(grid_side))
            .map(|_| MazeSize(cells_per_side))
    }

    #[inline]
    pub fn cells_per_side(&self) -> usize {
        self.0
    }

    #[inline]
    pub fn cells_count(&self) -> usize {
        self.0 * self.0
    }

    /// Side of the wall grid: the cells, the walls between them and the two border lines.
    #[inline]
    pub fn grid_side(&self) -> usize {
        2 * self.0 + 1
    }
}

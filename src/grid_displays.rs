use fnv::FnvHashSet;
use std::fmt;

use crate::cells::{GridCoordinate, MapCoordinate};
use crate::grid_traits::GridDisplay;
use crate::wall_grid::WallGrid;

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<MapCoordinate>,
}
impl PathDisplay {
    pub fn new(path: &[MapCoordinate]) -> Self {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: MapCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_coordinates: Vec<MapCoordinate>,
    end_coordinates: Vec<MapCoordinate>,
}
impl StartEndPointsDisplay {
    pub fn new(starts: Vec<MapCoordinate>, ends: Vec<MapCoordinate>) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_coordinates: starts,
            end_coordinates: ends,
        }
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: MapCoordinate) -> String {
        if self.start_coordinates.contains(&coord) {
            String::from(" S ")
        } else if self.end_coordinates.contains(&coord) {
            String::from(" E ")
        } else {
            String::from("   ")
        }
    }
}

/// Box drawing text rendering of a wall grid, optionally filling the cell bodies.
///
/// Every grid row is one line of text. Wall corners and vertical walls take one glyph, cells and
/// horizontal walls take three.
pub struct TextMaze<'a> {
    grid: &'a WallGrid,
    display: Option<&'a dyn GridDisplay>,
}

impl<'a> TextMaze<'a> {
    pub fn new(grid: &'a WallGrid) -> TextMaze<'a> {
        TextMaze {
            grid,
            display: None,
        }
    }

    pub fn with_display(grid: &'a WallGrid, display: &'a dyn GridDisplay) -> TextMaze<'a> {
        TextMaze {
            grid,
            display: Some(display),
        }
    }

    fn corner(&self, coord: GridCoordinate) -> &'static str {
        const WALL_L: &str = "╴";
        const WALL_R: &str = "╶";
        const WALL_U: &str = "╵";
        const WALL_D: &str = "╷";
        const WALL_LR: &str = "─";
        const WALL_UD: &str = "│";
        const WALL_LD: &str = "┐";
        const WALL_RU: &str = "└";
        const WALL_LU: &str = "┘";
        const WALL_RD: &str = "┌";
        const WALL_LRU: &str = "┴";
        const WALL_LRD: &str = "┬";
        const WALL_LRUD: &str = "┼";
        const WALL_RUD: &str = "├";
        const WALL_LUD: &str = "┤";

        let is_wall = |row: Option<usize>, column: Option<usize>| match (row, column) {
            (Some(r), Some(c)) => self.grid.tile(GridCoordinate::new(r, c)).map_or(false, |t| t.is_wall()),
            _ => false,
        };
        let (row, column) = (coord.row, coord.column);
        let show_left_section = is_wall(Some(row), column.checked_sub(1));
        let show_right_section = is_wall(Some(row), Some(column + 1));
        let show_up_section = is_wall(row.checked_sub(1), Some(column));
        let show_down_section = is_wall(Some(row + 1), Some(column));

        match (show_left_section, show_right_section, show_up_section, show_down_section) {
            (true, true, true, true) => WALL_LRUD,
            (true, true, true, false) => WALL_LRU,
            (true, true, false, true) => WALL_LRD,
            (true, false, true, true) => WALL_LUD,
            (false, true, true, true) => WALL_RUD,
            (true, true, false, false) => WALL_LR,
            (false, false, true, true) => WALL_UD,
            (false, true, true, false) => WALL_RU,
            (true, false, false, true) => WALL_LD,
            (true, false, true, false) => WALL_LU,
            (false, true, false, true) => WALL_RD,
            (true, false, false, false) => WALL_L,
            (false, true, false, false) => WALL_R,
            (false, false, true, false) => WALL_U,
            (false, false, false, true) => WALL_D,
            (false, false, false, false) => " ",
        }
    }
}

impl<'a> fmt::Display for TextMaze<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const UNCARVED_CELL: &str = "███";
        const WALL_LR_3: &str = "───";
        const WALL_UD: &str = "│";
        let default_cell_body = String::from("   ");

        for (row_index, row) in self.grid.rows().enumerate() {
            let mut line = String::new();
            for (column_index, tile) in row.iter().enumerate() {
                let coord = GridCoordinate::new(row_index, column_index);
                let glyphs = match (row_index % 2 == 0, column_index % 2 == 0) {
                    (true, true) if tile.is_wall() => self.corner(coord),
                    (true, true) => " ",
                    (true, false) => if tile.is_wall() { WALL_LR_3 } else { "   " },
                    (false, true) => if tile.is_wall() { WALL_UD } else { " " },
                    (false, false) => {
                        if tile.is_wall() {
                            UNCARVED_CELL
                        } else {
                            let map_coord = MapCoordinate::new(row_index / 2, column_index / 2);
                            let body = self.display
                                .map(|displayer| displayer.render_cell_body(map_coord))
                                .unwrap_or_else(|| default_cell_body.clone());
                            line.push_str(&body);
                            continue;
                        }
                    }
                };
                line.push_str(glyphs);
            }
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl fmt::Display for WallGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", TextMaze::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::MazeSize;
    use crate::wall_grid::PASSAGE_MARKER;

    fn mc(row: usize, column: usize) -> MapCoordinate {
        MapCoordinate::new(row, column)
    }

    /// 2x2 maze: entrance West of (0,0), passages (0,0)-(1,0)-(1,1)-(0,1), exit East of (0,1).
    fn u_bend() -> WallGrid {
        let mut g = WallGrid::new(MazeSize::new(2).unwrap());
        for &(row, column) in &[(1, 0), (1, 1), (2, 1), (3, 1), (3, 2), (3, 3), (2, 3), (1, 3), (1, 4)] {
            g.open(GridCoordinate::new(row, column), PASSAGE_MARKER).unwrap();
        }
        g
    }

    #[test]
    fn uncarved_grid_text() {
        let g = WallGrid::new(MazeSize::new(1).unwrap());
        assert_eq!(format!("{}", g), "┌───┐\n│███│\n└───┘\n");
    }

    #[test]
    fn carved_grid_text() {
        let expected = "╶───┬───╴\n    │    \n╷   ╵   ╷\n│       │\n└───────┘\n";
        assert_eq!(format!("{}", u_bend()), expected);
    }

    #[test]
    fn path_display_text() {
        let g = u_bend();
        let path = [mc(0, 0), mc(1, 0), mc(1, 1), mc(0, 1)];
        let display = PathDisplay::new(&path);
        let text = format!("{}", TextMaze::with_display(&g, &display));
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines[1], "  . │ .  ");
        assert_eq!(lines[3], "│ .   . │");
    }

    #[test]
    fn start_end_display() {
        let display = StartEndPointsDisplay::new(vec![mc(0, 0)], vec![mc(0, 1)]);
        assert_eq!(display.render_cell_body(mc(0, 0)), " S ");
        assert_eq!(display.render_cell_body(mc(0, 1)), " E ");
        assert_eq!(display.render_cell_body(mc(1, 1)), "   ");
    }
}

//! Randomised depth first search maze generation with backtracking.
//!
//! The walk starts at a random cell on the western edge, repeatedly knocks down the wall to a
//! random unvisited neighbour and moves into it. On a dead end it backtracks along the path it
//! came until some cell still has an unvisited neighbour. Every cell is entered exactly once, so
//! the opened walls form a spanning tree of the cells: a perfect maze.

use log::{debug, trace};
use rand::Rng;
use std::error::Error;
use std::fmt;

use crate::cells::{CompassPrimary, GridCoordinate, MapCoordinate};
use crate::maze_map::MazeMap;
use crate::passages::{self, PassageGraph};
use crate::pathing::{self, Distances};
use crate::units::{BorderWidth, MazeSize};
use crate::wall_grid::{WallGrid, PASSAGE_MARKER};

/// Border added around a finished maze before it is handed to a renderer.
pub const PADDING: BorderWidth = BorderWidth(2);

/// Source of uniform random choices for the carving walk.
///
/// Any `rand::Rng` is a random source. Tests can supply their own fixed sequence.
pub trait RandomSource {
    /// A uniformly chosen index in `[0, len)`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;

    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            items.get(self.pick_index(items.len()))
        }
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    #[inline]
    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GenerationError {
    InvalidSize(usize),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GenerationError::InvalidSize(n) => {
                write!(f, "invalid maze size {}, expected a positive number of cells per side", n)
            }
        }
    }
}

impl Error for GenerationError {}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GeneratorState {
    Unstarted,
    Carving,
    Finished,
}

/// How opened tiles are weighted.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum PassageStyle {
    /// Every passage has the plain passage marker weight.
    Marker,
    /// Passages are weighted by their grid column so that a renderer can colour carving progress
    /// from west to east. The weight is always below the wall intensity.
    ColumnGradient,
}

impl PassageStyle {
    pub fn weight(&self, coord: GridCoordinate, size: MazeSize) -> f32 {
        match *self {
            PassageStyle::Marker => PASSAGE_MARKER,
            PassageStyle::ColumnGradient => {
                coord.column as f32 / (3 * size.cells_per_side()) as f32
            }
        }
    }
}

impl Default for PassageStyle {
    fn default() -> Self {
        PassageStyle::Marker
    }
}

/// Carves one maze, a step at a time.
///
/// `Unstarted -> Carving -> Finished`. The first `advance` opens the entrance and the start cell,
/// every following `advance` moves the walk into one new cell until all cells are visited, and
/// the last one opens the exit. Snapshots of the grid are only ever observable between whole
/// steps.
#[derive(Debug)]
pub struct MazeGenerator<R: RandomSource> {
    size: MazeSize,
    rng: R,
    passage_style: PassageStyle,
    state: GeneratorState,
    map: MazeMap,
    grid: WallGrid,
    path: Vec<MapCoordinate>,
    visited_count: usize,
    entrance: Option<GridCoordinate>,
    exit: Option<GridCoordinate>,
}

impl<R: RandomSource> MazeGenerator<R> {
    /// Rejects a zero (or unaddressably large) size before allocating anything.
    pub fn new(cells_per_side: usize, rng: R) -> Result<MazeGenerator<R>, GenerationError> {
        let size = MazeSize::new(cells_per_side)
            .ok_or(GenerationError::InvalidSize(cells_per_side))?;

        Ok(MazeGenerator {
            size,
            rng,
            passage_style: PassageStyle::default(),
            state: GeneratorState::Unstarted,
            map: MazeMap::build(size),
            grid: WallGrid::new(size),
            path: Vec::with_capacity(size.cells_count()),
            visited_count: 0,
            entrance: None,
            exit: None,
        })
    }

    pub fn with_passage_style(mut self, passage_style: PassageStyle) -> MazeGenerator<R> {
        self.passage_style = passage_style;
        self
    }

    #[inline]
    pub fn state(&self) -> GeneratorState {
        self.state
    }

    #[inline]
    pub fn size(&self) -> MazeSize {
        self.size
    }

    #[inline]
    pub fn wall_grid(&self) -> &WallGrid {
        &self.grid
    }

    #[inline]
    pub fn maze_map(&self) -> &MazeMap {
        &self.map
    }

    #[inline]
    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    /// Perform the next whole step of generation.
    ///
    /// Returns the grid as it stands after the step, or None once the maze is finished.
    pub fn advance(&mut self) -> Option<&WallGrid> {
        match self.state {
            GeneratorState::Unstarted => {
                self.start();
                self.state = GeneratorState::Carving;
            }
            GeneratorState::Carving => {
                if self.visited_count < self.size.cells_count() {
                    self.carve_step();
                } else {
                    self.finish();
                    self.state = GeneratorState::Finished;
                }
            }
            GeneratorState::Finished => return None,
        }
        Some(&self.grid)
    }

    /// Lazily yield a snapshot of the grid after every step: the initial frame, one per carved
    /// cell and the final frame with the exit open.
    pub fn frames(self) -> Frames<R> {
        Frames { generator: self }
    }

    /// Run to completion.
    pub fn generate(mut self) -> Maze {
        while self.advance().is_some() {}
        self.into_maze()
            .expect("a generator that stopped advancing has finished its maze")
    }

    /// The finished maze. None until generation is complete.
    pub fn into_maze(self) -> Option<Maze> {
        match (self.state, self.entrance, self.exit) {
            (GeneratorState::Finished, Some(entrance), Some(exit)) => {
                Some(Maze {
                    size: self.size,
                    map: self.map,
                    grid: self.grid,
                    entrance,
                    exit,
                })
            }
            _ => None,
        }
    }

    fn start(&mut self) {
        let start_row = self.rng.pick_index(self.size.cells_per_side());
        let start = MapCoordinate::new(start_row, 0);
        let start_grid_row = self.grid_coordinate(start).row;

        let entrance = GridCoordinate::new(start_grid_row, 0);
        self.open(entrance);
        self.entrance = Some(entrance);
        debug!("entrance at map row {} of {}", start_row, self.size.cells_per_side());

        self.enter(start);
    }

    fn carve_step(&mut self) {
        let mut current = *self.path
            .last()
            .expect("the walk path is never empty while carving");
        let mut neighbours = self.map.unvisited_neighbours(current);

        while neighbours.is_empty() {
            self.path.pop();
            current = *self.path
                .last()
                .expect("backtracked past the start cell with unvisited cells remaining");
            trace!("backtrack to {:?}", current);
            neighbours = self.map.unvisited_neighbours(current);
        }

        let next = *self.rng
            .choose(&neighbours[..])
            .expect("neighbours are not empty");
        let direction = CompassPrimary::between(current, next)
            .unwrap_or_else(|| panic!("{:?} and {:?} are not adjacent cells", current, next));

        let current_grid_coord = self.grid_coordinate(current);
        let wall = current_grid_coord.wall_towards(direction)
            .expect("cells have walls on every side");
        self.open(wall);
        self.open(current_grid_coord);
        trace!("{:?} -> {:?} heading {:?}", current, next, direction);

        self.enter(next);
    }

    fn finish(&mut self) {
        let exit_row = self.rng.pick_index(self.size.cells_per_side());
        let exit_grid_row = self.grid_coordinate(MapCoordinate::new(exit_row, 0)).row;
        let exit = GridCoordinate::new(exit_grid_row, self.grid.side() - 1);
        self.open(exit);
        self.exit = Some(exit);
        self.path.clear();

        debug!("exit at map row {}, {} cells carved in a {}x{} maze",
               exit_row,
               self.visited_count,
               self.size.cells_per_side(),
               self.size.cells_per_side());
    }

    /// Move the walk into a cell it has not visited before.
    fn enter(&mut self, coord: MapCoordinate) {
        let first_visit = self.map.mark_visited(coord);
        debug_assert!(first_visit, "{:?} entered twice", coord);
        let grid_coord = self.grid_coordinate(coord);
        self.open(grid_coord);
        self.visited_count += 1;
        self.path.push(coord);
    }

    fn open(&mut self, coord: GridCoordinate) {
        let weight = self.passage_style.weight(coord, self.size);
        self.grid
            .open(coord, weight)
            .unwrap_or_else(|e| panic!("carving outside the wall grid: {}", e));
    }

    #[inline]
    fn grid_coordinate(&self, coord: MapCoordinate) -> GridCoordinate {
        self.map
            .grid_coordinate(coord)
            .unwrap_or_else(|| panic!("{:?} is not on the maze map", coord))
    }
}

/// Iterator over grid snapshots, see `MazeGenerator::frames`.
#[derive(Debug)]
pub struct Frames<R: RandomSource> {
    generator: MazeGenerator<R>,
}

impl<R: RandomSource> Frames<R> {
    /// The finished maze once every frame has been consumed.
    pub fn into_maze(self) -> Option<Maze> {
        self.generator.into_maze()
    }
}

impl<R: RandomSource> Iterator for Frames<R> {
    type Item = WallGrid;

    fn next(&mut self) -> Option<WallGrid> {
        self.generator.advance().cloned()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // initial + one per remaining cell + final
        let remaining = match self.generator.state() {
            GeneratorState::Unstarted => self.generator.size.cells_count() + 1,
            GeneratorState::Carving => {
                self.generator.size.cells_count() - self.generator.visited_count + 1
            }
            GeneratorState::Finished => 0,
        };
        (remaining, Some(remaining))
    }
}

impl<R: RandomSource> ExactSizeIterator for Frames<R> {}

/// A finished perfect maze.
#[derive(Clone, PartialEq, Debug)]
pub struct Maze {
    size: MazeSize,
    map: MazeMap,
    grid: WallGrid,
    entrance: GridCoordinate,
    exit: GridCoordinate,
}

impl Maze {
    #[inline]
    pub fn size(&self) -> MazeSize {
        self.size
    }

    #[inline]
    pub fn maze_map(&self) -> &MazeMap {
        &self.map
    }

    /// The unpadded wall grid.
    #[inline]
    pub fn wall_grid(&self) -> &WallGrid {
        &self.grid
    }

    /// The wall grid framed by `PADDING`, as consumed by renderers.
    pub fn padded(&self) -> WallGrid {
        self.grid.pad(PADDING)
    }

    /// The border opening on the western edge.
    #[inline]
    pub fn entrance(&self) -> GridCoordinate {
        self.entrance
    }

    /// The border opening on the eastern edge.
    #[inline]
    pub fn exit(&self) -> GridCoordinate {
        self.exit
    }

    pub fn entrance_cell(&self) -> MapCoordinate {
        MapCoordinate::new((self.entrance.row - 1) / 2, 0)
    }

    pub fn exit_cell(&self) -> MapCoordinate {
        MapCoordinate::new((self.exit.row - 1) / 2, self.size.cells_per_side() - 1)
    }

    pub fn passage_graph(&self) -> PassageGraph {
        passages::passage_graph(&self.grid, &self.map)
    }

    /// The unique route through the maze from the entrance cell to the exit cell.
    pub fn solution(&self) -> Vec<MapCoordinate> {
        let graph = self.passage_graph();
        Distances::new(&graph, &self.map, self.entrance_cell())
            .and_then(|distances| {
                pathing::shortest_path(&graph, &self.map, &distances, self.exit_cell())
            })
            .expect("every cell of a perfect maze is reachable")
    }
}

/// Generate a complete maze with plain passage markers.
pub fn recursive_backtracker<R: RandomSource>(cells_per_side: usize,
                                              rng: R)
                                              -> Result<Maze, GenerationError> {
    Ok(MazeGenerator::new(cells_per_side, rng)?.generate())
}

//! **dfs_mazes** generates perfect mazes by randomised depth first search, and renders them as
//! text, images or an animation of the carving.

pub mod cells;
pub mod generators;
pub mod grid_displays;
pub mod grid_traits;
pub mod maze_map;
pub mod passages;
pub mod pathing;
pub mod renderers;
pub mod units;
pub mod wall_grid;

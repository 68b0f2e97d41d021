use docopt::Docopt;
use dfs_mazes::{
    generators::{self, Maze, MazeGenerator, PassageStyle},
    passages,
    grid_displays::{PathDisplay, StartEndPointsDisplay, TextMaze},
    grid_traits::GridDisplay,
    renderers::{self, ColourScheme, RenderOptions, RenderOptionsBuilder},
    units::CellPixels,
    wall_grid::WallGrid,
};
use env_logger::Env;
use log::info;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "DFS Mazes

Usage:
    maze_driver -h | --help
    maze_driver [--size=<n>] [--seed=<s>] [--gradient] [--show-path] [--save-edges=<path>]
    maze_driver text [--text-out=<path>] [--size=<n>] [--seed=<s>] [--gradient] [--show-path] [--save-edges=<path>]
    maze_driver image --image-out=<path> [--cell-pixels=<n>] [--colours=<scheme>] [--size=<n>] [--seed=<s>] [--gradient] [--show-path] [--save-edges=<path>]
    maze_driver gif --gif-out=<path> [--frame-delay=<ms>] [--cell-pixels=<n>] [--colours=<scheme>] [--size=<n>] [--seed=<s>] [--gradient] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --size=<n>             The maze is n * n cells [default: 20].
    --seed=<s>             Seed for a reproducible maze. Random if not given.
    --gradient             Weight passages by their column so images show the carving direction.
    --show-path            Show the route from the entrance to the exit.
    --text-out=<path>      Output file path for a textual rendering of a maze. Printed if not given.
    --image-out=<path>     Output file path for an image rendering of a maze. Always PNG format.
    --gif-out=<path>       Output file path for an animation of the maze being carved.
    --frame-delay=<ms>     Milliseconds between animation frames [default: 180].
    --cell-pixels=<n>      Pixel count to render one grid tile [default: 10] max 255.
    --colours=<scheme>     Colour map for images, summer or blues [default: summer].
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_size: usize,
    flag_seed: Option<u64>,
    flag_gradient: bool,
    flag_show_path: bool,
    cmd_text: bool,
    flag_text_out: String,
    cmd_image: bool,
    flag_image_out: String,
    cmd_gif: bool,
    flag_gif_out: String,
    flag_frame_delay: u32,
    flag_cell_pixels: u8,
    flag_colours: String,
    flag_save_edges: String,
}

mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            ImageFailure(::image::ImageError);
            Io(::std::io::Error);
            Generation(::dfs_mazes::generators::GenerationError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let rng = match args.flag_seed {
        Some(seed) => XorShiftRng::seed_from_u64(seed),
        None => XorShiftRng::from_entropy(),
    };
    info!("Generating a {0}x{0} maze, seed {1:?}", args.flag_size, args.flag_seed);

    let passage_style = if args.flag_gradient {
        PassageStyle::ColumnGradient
    } else {
        PassageStyle::Marker
    };
    let generator = MazeGenerator::new(args.flag_size, rng)?.with_passage_style(passage_style);

    let maze = if args.cmd_gif {
        save_carving_animation(generator, &args)?
    } else {
        generator.generate()
    };

    if !args.flag_save_edges.is_empty() {
        write_text_to_file(&passages::edges_text(&maze.passage_graph()), &args.flag_save_edges)
            .chain_err(|| format!("Failed to write maze graph to text file {}", args.flag_save_edges))?;
        info!("Saved maze edges to {}", args.flag_save_edges);
    }

    if args.cmd_image {
        let options = render_options(&args, Some(&maze))?;
        renderers::save_png(&maze.padded(), &options, &args.flag_image_out)?;
        info!("Saved maze image to {}", args.flag_image_out);
    }

    let do_text_render = args.cmd_text || !(args.cmd_image || args.cmd_gif);
    if do_text_render {
        let text = maze_text(&maze, args.flag_show_path);
        if args.flag_text_out.is_empty() {
            print!("{}", text);
        } else {
            write_text_to_file(&text, &args.flag_text_out)
                .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
            info!("Saved maze text to {}", args.flag_text_out);
        }
    }

    Ok(())
}

/// Carve the maze one frame at a time, writing every padded snapshot to the gif.
fn save_carving_animation(generator: MazeGenerator<XorShiftRng>, maze_args: &MazeArgs) -> Result<Maze> {
    let options = render_options(maze_args, None)?;
    let mut frames = generator.frames();
    let frames_count = renderers::save_gif(frames.by_ref().map(|grid| grid.pad(generators::PADDING)),
                                           &options,
                                           maze_args.flag_frame_delay,
                                           &maze_args.flag_gif_out)?;
    info!("Saved {} frame animation to {}", frames_count, maze_args.flag_gif_out);

    let maze = frames.into_maze().ok_or("Animation stopped before the maze was finished")?;
    Ok(maze)
}

/// The carving animation has no solution to show, so it passes no maze.
fn render_options(maze_args: &MazeArgs, maze: Option<&Maze>) -> Result<RenderOptions> {
    let colours = maze_args.flag_colours.parse::<ColourScheme>()?;
    let path = match maze {
        Some(maze) if maze_args.flag_show_path => {
            Some(renderers::path_tiles(&maze.solution(), generators::PADDING.0))
        }
        _ => None,
    };

    Ok(RenderOptionsBuilder::new()
        .cell_pixels(CellPixels(maze_args.flag_cell_pixels))
        .colours(colours)
        .path(path)
        .build())
}

fn maze_text(maze: &Maze, show_path: bool) -> String {
    let grid: &WallGrid = maze.wall_grid();
    let display: Box<dyn GridDisplay> = if show_path {
        Box::new(PathDisplay::new(&maze.solution()))
    } else {
        Box::new(StartEndPointsDisplay::new(vec![maze.entrance_cell()], vec![maze.exit_cell()]))
    };
    format!("{}", TextMaze::with_display(grid, &*display))
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

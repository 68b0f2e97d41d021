//! Raster output of wall grids: single PNG images and looping GIF animations of the carving.

use image::codecs::gif::{GifEncoder, Repeat};
use image::error::{ImageError, LimitError, LimitErrorKind};
use image::{Delay, DynamicImage, Frame, ImageResult, Rgb, RgbImage};
use log::debug;
use std::convert::TryFrom;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::str::FromStr;

use crate::cells::{GridCoordinate, MapCoordinate};
use crate::units::CellPixels;
use crate::wall_grid::WallGrid;

/// A linear colour map over tile intensities, 0.0 (open passage) to 1.0 (wall).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColourScheme {
    /// Green passages shading to yellow walls.
    Summer,
    /// Near white passages shading to dark blue walls.
    Blues,
}

impl ColourScheme {
    fn end_points(&self) -> ([u8; 3], [u8; 3]) {
        match *self {
            ColourScheme::Summer => ([0, 128, 102], [255, 255, 102]),
            ColourScheme::Blues => ([247, 251, 255], [8, 48, 107]),
        }
    }

    /// Colour of an intensity, clamped into 0.0 to 1.0.
    pub fn colour(&self, intensity: f32) -> Rgb<u8> {
        let t = if intensity.is_nan() {
            0.0
        } else {
            intensity.max(0.0).min(1.0)
        };
        let (low, high) = self.end_points();
        let lerp = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
        Rgb([lerp(low[0], high[0]), lerp(low[1], high[1]), lerp(low[2], high[2])])
    }
}

impl Default for ColourScheme {
    fn default() -> ColourScheme {
        ColourScheme::Summer
    }
}

impl FromStr for ColourScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<ColourScheme, String> {
        match s.to_lowercase().as_str() {
            "summer" => Ok(ColourScheme::Summer),
            "blues" => Ok(ColourScheme::Blues),
            other => Err(format!("unknown colour scheme '{}', expected summer or blues", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    cell_pixels: CellPixels,
    colours: ColourScheme,
    path_colour: Rgb<u8>,
    path: Option<Vec<GridCoordinate>>,
}

impl RenderOptions {
    pub fn cell_pixels(&self) -> CellPixels {
        self.cell_pixels
    }
    pub fn colours(&self) -> ColourScheme {
        self.colours
    }
    pub fn path(&self) -> Option<&[GridCoordinate]> {
        self.path.as_ref().map(|p| &p[..])
    }
}

pub struct RenderOptionsBuilder {
    options: RenderOptions,
}

impl RenderOptionsBuilder {
    pub fn new() -> RenderOptionsBuilder {
        RenderOptionsBuilder {
            options: RenderOptions {
                cell_pixels: CellPixels(10),
                colours: ColourScheme::default(),
                path_colour: Rgb([220, 20, 60]),
                path: None,
            },
        }
    }

    pub fn cell_pixels(mut self, cell_pixels: CellPixels) -> RenderOptionsBuilder {
        self.options.cell_pixels = cell_pixels;
        self
    }
    pub fn colours(mut self, colours: ColourScheme) -> RenderOptionsBuilder {
        self.options.colours = colours;
        self
    }
    pub fn path_colour(mut self, colour: Rgb<u8>) -> RenderOptionsBuilder {
        self.options.path_colour = colour;
        self
    }
    /// Tiles of the rendered grid to highlight. See `path_tiles`.
    pub fn path(mut self, path: Option<Vec<GridCoordinate>>) -> RenderOptionsBuilder {
        self.options.path = path;
        self
    }
    pub fn build(self) -> RenderOptions {
        self.options
    }
}

impl Default for RenderOptionsBuilder {
    fn default() -> RenderOptionsBuilder {
        RenderOptionsBuilder::new()
    }
}

/// Grid tiles covered by a route through cells: every cell plus the wall between each consecutive
/// pair. `border` is the padding around the grid the route will be drawn on.
pub fn path_tiles(path: &[MapCoordinate], border: usize) -> Vec<GridCoordinate> {
    let cell_tile = |coord: MapCoordinate| GridCoordinate::new(2 * coord.row + 1, 2 * coord.column + 1);

    let mut tiles = Vec::with_capacity(path.len() * 2);
    for (i, &coord) in path.iter().enumerate() {
        let tile = cell_tile(coord);
        if let Some(&previous) = i.checked_sub(1).and_then(|prev| path.get(prev)) {
            let previous_tile = cell_tile(previous);
            tiles.push(GridCoordinate::new((tile.row + previous_tile.row) / 2,
                                           (tile.column + previous_tile.column) / 2)
                .shifted(border));
        }
        tiles.push(tile.shifted(border));
    }
    tiles
}

/// Pixel side of the image of a grid with `grid_side` tiles per side. None if it does not fit
/// in an image dimension.
pub fn image_side(grid_side: usize, cell_pixels: CellPixels) -> Option<u32> {
    let CellPixels(block) = cell_pixels;
    u32::try_from(grid_side).ok()?.checked_mul(u32::from(block.max(1)))
}

/// Rasterise a grid, one square block of `cell_pixels` per tile.
pub fn render_image(grid: &WallGrid, options: &RenderOptions) -> ImageResult<RgbImage> {
    let side = image_side(grid.side(), options.cell_pixels)
        .ok_or_else(|| ImageError::Limits(LimitError::from_kind(LimitErrorKind::DimensionError)))?;
    let block = u32::from(options.cell_pixels.0.max(1));
    let mut img = RgbImage::new(side, side);

    for (row_index, row) in grid.rows().enumerate() {
        for (column_index, tile) in row.iter().enumerate() {
            let colour = options.colours.colour(tile.intensity());
            fill_block(&mut img, row_index as u32, column_index as u32, block, colour);
        }
    }

    if let Some(path) = options.path() {
        for tile in path.iter().filter(|t| grid.is_valid_coordinate(**t)) {
            fill_block(&mut img, tile.row as u32, tile.column as u32, block, options.path_colour);
        }
    }

    Ok(img)
}

fn fill_block(img: &mut RgbImage, row: u32, column: u32, block: u32, colour: Rgb<u8>) {
    for y in row * block..(row + 1) * block {
        for x in column * block..(column + 1) * block {
            img.put_pixel(x, y, colour);
        }
    }
}

pub fn save_png<P: AsRef<Path>>(grid: &WallGrid, options: &RenderOptions, path: P) -> ImageResult<()> {
    let img = render_image(grid, options)?;
    img.save(path.as_ref())?;
    debug!("Saved {}x{} png to {}", img.width(), img.height(), path.as_ref().display());
    Ok(())
}

/// Encode every grid as one frame of an infinitely looping GIF. Returns the number of frames.
pub fn save_gif<I, P>(frames: I, options: &RenderOptions, frame_delay_ms: u32, path: P) -> ImageResult<usize>
    where I: IntoIterator<Item = WallGrid>,
          P: AsRef<Path>
{
    let file = File::create(path.as_ref())?;
    let mut encoder = GifEncoder::new(BufWriter::new(file));
    encoder.set_repeat(Repeat::Infinite)?;

    let delay = Delay::from_numer_denom_ms(frame_delay_ms, 1);
    let mut frames_count = 0;
    for grid in frames {
        let rgba = DynamicImage::ImageRgb8(render_image(&grid, options)?).into_rgba8();
        encoder.encode_frame(Frame::from_parts(rgba, 0, 0, delay))?;
        frames_count += 1;
    }
    debug!("Saved {} frame gif to {}", frames_count, path.as_ref().display());
    Ok(frames_count)
}

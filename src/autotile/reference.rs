//! Reference pattern sheet loading and per-cell pixel sampling
//!
//! The sheet is a grid of 32x32 cells separated by 1px gaps inside a 1px
//! border. Each cell's shape is read from eight sample points, one per
//! [`Direction`], in the same order the encoder uses.

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::autotile::bitmask::{ConnectivityBitmask, Direction};
use crate::autotile::matcher::SpriteCoordinate;
use crate::io::configuration::{
    CELL_SIZE, COLOR_THRESHOLD, SAMPLE_INSET, SHEET_COLUMNS, SHEET_ROWS, cell_origin,
};
use crate::io::error::{GameError, Result};

/// Anything that can produce the reference pattern pixels
pub trait PatternSource {
    /// Decode the reference image
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be produced
    fn load(&self) -> Result<RgbaImage>;
}

impl PatternSource for RgbaImage {
    fn load(&self) -> Result<RgbaImage> {
        Ok(self.clone())
    }
}

/// Reference sheet stored as a PNG on disk
#[derive(Debug, Clone)]
pub struct PngPatternSource {
    path: PathBuf,
}

impl PngPatternSource {
    /// Point at a PNG file; nothing is read until [`PatternSource::load`]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the image file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PatternSource for PngPatternSource {
    fn load(&self) -> Result<RgbaImage> {
        let img = image::open(&self.path).map_err(|e| GameError::PatternLoad {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(img.to_rgba8())
    }
}

/// Decoded reference pixels with the sheet's cell layout
#[derive(Debug, Clone)]
pub struct ReferenceSheet {
    pixels: RgbaImage,
    columns: u32,
    rows: u32,
}

impl ReferenceSheet {
    /// Wrap decoded pixels using the standard 12x4 layout
    pub const fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels,
            columns: SHEET_COLUMNS,
            rows: SHEET_ROWS,
        }
    }

    /// Number of cell columns
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cell rows
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Whether the pixel at (x, y) is foreground
    ///
    /// Pixels outside the image count as background.
    pub fn is_colored(&self, x: u32, y: u32) -> bool {
        self.pixels
            .get_pixel_checked(x, y)
            .is_some_and(|pixel| pixel.0.iter().take(3).any(|&c| c < COLOR_THRESHOLD))
    }

    /// Bitmask painted into the cell at `coordinate`
    pub fn cell_bitmask(&self, coordinate: SpriteCoordinate) -> ConnectivityBitmask {
        let start_x = cell_origin(coordinate.x);
        let start_y = cell_origin(coordinate.y);

        Direction::ALL
            .into_iter()
            .filter(|&direction| {
                let (dx, dy) = sample_offset(direction);
                self.is_colored(start_x + dx, start_y + dy)
            })
            .fold(ConnectivityBitmask::EMPTY, ConnectivityBitmask::with)
    }

    /// Every cell coordinate in row-major scan order
    pub fn coordinates(&self) -> impl Iterator<Item = SpriteCoordinate> + '_ {
        let columns = self.columns;
        (0..self.rows).flat_map(move |y| (0..columns).map(move |x| SpriteCoordinate::new(x, y)))
    }
}

/// Pixel offset of a direction's sample point from a cell's top-left corner
///
/// Corners and edge midpoints are pulled [`SAMPLE_INSET`] pixels inside the cell.
pub const fn sample_offset(direction: Direction) -> (u32, u32) {
    let near = SAMPLE_INSET;
    let mid = CELL_SIZE / 2;
    let far = CELL_SIZE - SAMPLE_INSET;

    match direction {
        Direction::TopLeft => (near, near),
        Direction::Top => (mid, near),
        Direction::TopRight => (far, near),
        Direction::Right => (far, mid),
        Direction::BottomRight => (far, far),
        Direction::Bottom => (mid, far),
        Direction::BottomLeft => (near, far),
        Direction::Left => (near, mid),
    }
}

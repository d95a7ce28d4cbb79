//! Reference sheet painting and sprite composition to PNG

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage, imageops};
use ndarray::Array2;

use crate::autotile::bitmask::{ConnectivityBitmask, Direction};
use crate::autotile::matcher::SpriteCoordinate;
use crate::autotile::reference::sample_offset;
use crate::io::configuration::{
    CELL_SIZE, SHEET_COLUMNS, SHEET_ROWS, cell_origin, checked_cell_origin, sheet_extent,
};
use crate::io::error::{GameError, Result, invalid_parameter};

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const CONNECTED: Rgba<u8> = Rgba([255, 105, 180, 255]);
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

// Half-width of the square painted around each sample point
const PAINT_RADIUS: u32 = 3;

/// Paint a reference sheet whose cells read back as the given bitmasks
///
/// Cells are filled row-major; unused cells stay blank (bitmask 0).
///
/// # Errors
///
/// Returns an error if more masks are given than the sheet has cells
pub fn render_pattern_sheet(masks: &[ConnectivityBitmask]) -> Result<RgbaImage> {
    let capacity = (SHEET_COLUMNS * SHEET_ROWS) as usize;
    if masks.len() > capacity {
        return Err(invalid_parameter(
            "masks",
            &masks.len(),
            &format!("a reference sheet holds at most {capacity} cells"),
        ));
    }

    let mut img = ImageBuffer::from_pixel(
        sheet_extent(SHEET_COLUMNS),
        sheet_extent(SHEET_ROWS),
        BACKGROUND,
    );

    for (index, &mask) in masks.iter().enumerate() {
        let index = index as u32;
        let start_x = cell_origin(index % SHEET_COLUMNS);
        let start_y = cell_origin(index / SHEET_COLUMNS);

        for direction in Direction::ALL.into_iter().filter(|&d| mask.has(d)) {
            let (dx, dy) = sample_offset(direction);
            let (cx, cy) = (start_x + dx, start_y + dy);
            for y in cy - PAINT_RADIUS..=cy + PAINT_RADIUS {
                for x in cx - PAINT_RADIUS..=cx + PAINT_RADIUS {
                    if let Some(pixel) = img.get_pixel_mut_checked(x, y) {
                        *pixel = CONNECTED;
                    }
                }
            }
        }
    }

    Ok(img)
}

/// Assemble a grid of sprites cut from a sprite sheet
///
/// Each `Some` coordinate copies one cell of `sheet` into the output; `None`
/// cells and coordinates outside the sheet stay transparent.
pub fn compose_sprites(sprites: &Array2<Option<SpriteCoordinate>>, sheet: &RgbaImage) -> RgbaImage {
    let (rows, cols) = sprites.dim();
    let mut out = ImageBuffer::from_pixel(cols as u32 * CELL_SIZE, rows as u32 * CELL_SIZE, TRANSPARENT);

    for ((row, col), sprite) in sprites.indexed_iter() {
        let Some(coordinate) = sprite else {
            continue;
        };
        let origin = checked_cell_origin(coordinate.x).zip(checked_cell_origin(coordinate.y));
        let Some((x, y)) = origin.filter(|&(x, y)| {
            x.checked_add(CELL_SIZE).is_some_and(|right| right <= sheet.width())
                && y.checked_add(CELL_SIZE).is_some_and(|bottom| bottom <= sheet.height())
        }) else {
            log::debug!(
                "Sprite ({}, {}) lies outside the sheet, leaving ({row}, {col}) blank",
                coordinate.x,
                coordinate.y
            );
            continue;
        };

        let cell = imageops::crop_imm(sheet, x, y, CELL_SIZE, CELL_SIZE).to_image();
        imageops::replace(
            &mut out,
            &cell,
            i64::from(col as u32 * CELL_SIZE),
            i64::from(row as u32 * CELL_SIZE),
        );
    }

    out
}

/// Load a sprite sheet image
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_sprite_sheet(path: &Path) -> Result<RgbaImage> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|e| GameError::PatternLoad {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Compose sprites and write them as a PNG
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_sprites_as_png(
    sprites: &Array2<Option<SpriteCoordinate>>,
    sheet: &RgbaImage,
    output_path: &Path,
) -> Result<()> {
    let img = compose_sprites(sprites, sheet);

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| GameError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path).map_err(|e| GameError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })
}

//! Geometry, matching and scoring constants shared across the engine

// Reference sheet and sprite sheet share one cell geometry
/// Edge length of a sheet cell in pixels
pub const CELL_SIZE: u32 = 32;
/// Gap between adjacent sheet cells in pixels
pub const CELL_GAP: u32 = 1;
/// Border around the whole sheet in pixels
pub const SHEET_BORDER: u32 = 1;
/// Number of cell columns in the reference sheet
pub const SHEET_COLUMNS: u32 = 12;
/// Number of cell rows in the reference sheet
pub const SHEET_ROWS: u32 = 4;

/// Distance of the sampled pixels from the cell edges
pub const SAMPLE_INSET: u32 = 4;

// Near-white pixels are background, anything darker on any channel is foreground
/// Channel value below which a pixel counts as coloured
pub const COLOR_THRESHOLD: u8 = 200;

/// Cost of a mismatched edge-sharing neighbour
pub const CARDINAL_WEIGHT: u32 = 10;
/// Cost of a mismatched corner neighbour
pub const DIAGONAL_WEIGHT: u32 = 1;
/// Upper bound of the weighted distance (4 cardinals + 4 diagonals)
pub const MAX_WEIGHTED_DISTANCE: u32 = 4 * CARDINAL_WEIGHT + 4 * DIAGONAL_WEIGHT;

// Score factors
/// Points per revealed tile
pub const TILES_REVEALED_MULTIPLIER: u32 = 10;
/// Penalty per player move
pub const MOVES_PENALTY: u32 = 2;
/// Penalty per elapsed second
pub const TIME_PENALTY: u32 = 1;

/// Number of entries kept in the local high-score list
pub const MAX_SCORES: usize = 10;

/// Payload written into consumed tiles
pub const PLAIN_PATH_PAYLOAD: &str = "C";

/// Pixel origin of a sheet cell along one axis
pub const fn cell_origin(index: u32) -> u32 {
    SHEET_BORDER + index * (CELL_SIZE + CELL_GAP)
}

/// Pixel origin of a sheet cell, `None` if it does not fit in `u32`
pub const fn checked_cell_origin(index: u32) -> Option<u32> {
    match index.checked_mul(CELL_SIZE + CELL_GAP) {
        Some(offset) => offset.checked_add(SHEET_BORDER),
        None => None,
    }
}

/// Pixel width of a sheet with the given number of columns
pub const fn sheet_extent(cells: u32) -> u32 {
    if cells == 0 {
        return 2 * SHEET_BORDER;
    }
    2 * SHEET_BORDER + cells * CELL_SIZE + (cells - 1) * CELL_GAP
}

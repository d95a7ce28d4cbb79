//! Level grid storage backed by a fixed-size `ndarray` matrix

use ndarray::Array2;

use crate::autotile::bitmask::Direction;
use crate::game::tile::{Position, TileRecord};
use crate::io::error::{GameError, Result, invalid_level};

/// Rectangular grid of tile records, fixed in size for a level's lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameGrid {
    tiles: Array2<TileRecord>,
}

impl GameGrid {
    /// Build a grid of hidden tiles from rows of payload strings
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The grid has no rows or no columns
    /// - Rows have different lengths
    /// - A payload uses an unknown category code
    pub fn from_payloads<R, S>(rows: &[R]) -> Result<Self>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let row_count = rows.len();
        let col_count = rows.first().map_or(0, |row| row.as_ref().len());
        if row_count == 0 || col_count == 0 {
            return Err(invalid_level(&"grid is empty"));
        }

        let mut records = Vec::with_capacity(row_count * col_count);
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != col_count {
                return Err(invalid_level(&format!(
                    "row {row} has {} cells, expected {col_count}",
                    cells.len()
                )));
            }
            for (col, payload) in cells.iter().enumerate() {
                let payload = payload.as_ref();
                let record = TileRecord::from_payload(Position::new(row, col), payload)
                    .ok_or_else(|| {
                        invalid_level(&format!("unknown tile '{payload}' at ({row}, {col})"))
                    })?;
                records.push(record);
            }
        }

        let tiles = Array2::from_shape_vec((row_count, col_count), records)
            .map_err(|e| invalid_level(&e))?;
        Ok(Self { tiles })
    }

    /// Get the number of rows in the grid
    pub fn rows(&self) -> usize {
        self.tiles.nrows()
    }

    /// Get the number of columns in the grid
    pub fn cols(&self) -> usize {
        self.tiles.ncols()
    }

    /// Grid dimensions (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.tiles.dim()
    }

    /// Whether a position lies inside the grid
    pub fn contains(&self, position: Position) -> bool {
        position.row < self.rows() && position.col < self.cols()
    }

    /// Reject positions outside the grid
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] if the position is not inside the grid
    pub fn validate(&self, position: Position) -> Result<Position> {
        if self.contains(position) {
            Ok(position)
        } else {
            Err(GameError::OutOfBounds {
                position: (position.row, position.col),
                dimensions: self.dimensions(),
            })
        }
    }

    /// Tile at a position, `None` when off-grid
    pub fn get(&self, position: Position) -> Option<&TileRecord> {
        self.tiles.get(position.index())
    }

    /// Mutable tile at a position, `None` when off-grid
    pub fn get_mut(&mut self, position: Position) -> Option<&mut TileRecord> {
        self.tiles.get_mut(position.index())
    }

    /// Neighbouring tile in a direction, `None` when off-grid
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<&TileRecord> {
        position
            .offset(direction.offset())
            .and_then(|neighbor| self.get(neighbor))
    }

    /// Iterate all tiles in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &TileRecord> {
        self.tiles.iter()
    }

    /// Number of revealed tiles
    pub fn revealed_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.revealed).count()
    }

    /// Mark every tile as revealed
    pub fn reveal_all(&mut self) {
        for tile in &mut self.tiles {
            tile.revealed = true;
        }
    }
}

//! Game rules on top of the autotiling engine
//!
//! This module contains the playable side of the engine:
//! - Tile categories and per-cell records
//! - The level grid
//! - Inventory, combat and tile interactions
//! - Level state driven by player clicks

/// Battle tracking and resolution
pub mod combat;
/// Level grid storage
pub mod grid;
/// Tile interaction rules
pub mod interaction;
/// Player inventory
pub mod inventory;
/// Level state and the click-driven game loop
pub mod state;
/// Tile categories, payloads and records
pub mod tile;

pub use grid::GameGrid;
pub use state::{ActionOutcome, GameGridState, GameStatus};
pub use tile::{CategoryClass, Position, TileCategory, TileRecord};

//! Tile-reveal maze engine with bitmask autotiling
//!
//! Revealed tiles pick their sprite by encoding which of their eight
//! neighbours connect to them and matching that bitmask against a reference
//! pattern sheet. Around that sits the game itself: reveal rules, keys, doors,
//! items and monsters.

#![forbid(unsafe_code)]

/// Connectivity bitmasks, reference sheet matching and sprite caching
pub mod autotile;
/// Level grid, tile interactions and game state
pub mod game;
/// Input/output operations and error handling
pub mod io;

pub use io::error::{GameError, Result};

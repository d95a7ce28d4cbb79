/// Command-line interface and level runner
pub mod cli;
/// Geometry, matching and scoring constants
pub mod configuration;
/// Error types
pub mod error;
/// Reference sheet painting and sprite PNG export
pub mod image;
/// Level file format and catalogs
pub mod level;
/// Score calculation and high-score persistence
pub mod scores;

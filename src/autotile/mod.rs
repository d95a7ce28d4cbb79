/// Neighbour descriptors, bitmask encoding and weighted distance
pub mod bitmask;
/// Memoization of precisely resolved sprite coordinates
pub mod cache;
/// Cardinal-shape placeholder sprites
pub mod heuristic;
/// Sprite resolution against the reference sheet
pub mod matcher;
/// Neighbour connectivity and adjacency predicates
pub mod neighbors;
/// Reference sheet loading and pixel sampling
pub mod reference;

pub use bitmask::{ConnectivityBitmask, Direction, NeighborDescriptor};
pub use cache::{SpriteCache, SpriteKey};
pub use matcher::{PatternMatcher, SpriteCoordinate};

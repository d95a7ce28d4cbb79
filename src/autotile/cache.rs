use crate::autotile::bitmask::ConnectivityBitmask;
use crate::autotile::matcher::SpriteCoordinate;
use crate::game::tile::CategoryClass;
use std::collections::HashMap;

/// Key for caching resolved sprite coordinates
///
/// Identifies a connectivity pattern within one category class.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SpriteKey {
    /// Connectivity class of the tile being drawn
    pub class: CategoryClass,
    /// Encoded neighbour connectivity
    pub mask: ConnectivityBitmask,
}

impl SpriteKey {
    /// Create a sprite key
    pub const fn new(class: CategoryClass, mask: ConnectivityBitmask) -> Self {
        Self { class, mask }
    }
}

/// Store of precisely resolved sprite coordinates
///
/// Entries never expire: the reference sheet is immutable for the lifetime of
/// the process, so a resolved key always maps to the same coordinate.
#[derive(Default, Debug, Clone)]
pub struct SpriteCache {
    /// Key to resolved coordinate mapping
    resolved: HashMap<SpriteKey, SpriteCoordinate>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
}

impl SpriteCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a key, recording a hit or a miss
    pub fn lookup(&mut self, key: SpriteKey) -> Option<SpriteCoordinate> {
        let found = self.resolved.get(&key).copied();
        if found.is_some() {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
        found
    }

    /// Peek at a key without touching the statistics
    pub fn get(&self, key: SpriteKey) -> Option<SpriteCoordinate> {
        self.resolved.get(&key).copied()
    }

    /// Whether a key has been resolved
    pub fn contains(&self, key: SpriteKey) -> bool {
        self.resolved.contains_key(&key)
    }

    /// Store a resolved coordinate, returning whether the key was new
    ///
    /// An existing entry is kept as is, so a key never changes once populated.
    pub fn insert(&mut self, key: SpriteKey, coordinate: SpriteCoordinate) -> bool {
        use std::collections::hash_map::Entry;

        match self.resolved.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(coordinate);
                true
            }
        }
    }

    /// Number of resolved keys
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    /// Whether nothing has been resolved yet
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// Drop every entry and reset the statistics
    pub fn clear(&mut self) {
        self.resolved.clear();
        self.stats = CacheStats::default();
    }
}

//! Sprite resolution with a cached precise lookup and an instant placeholder
//!
//! [`PatternMatcher::resolve_sprite`] never blocks: on a cache miss it queues
//! the precise lookup and answers with the cardinal-shape estimate. The caller
//! drains the queue with [`PatternMatcher::run_pending`] from its event loop;
//! every newly cached key fires the `on_resolved` callback so the caller can
//! redraw with the precise coordinate.

use std::collections::{HashSet, VecDeque};

use crate::autotile::bitmask::{ConnectivityBitmask, weighted_distance};
use crate::autotile::cache::{SpriteCache, SpriteKey};
use crate::autotile::heuristic;
use crate::autotile::reference::{PatternSource, ReferenceSheet};
use crate::game::tile::CategoryClass;
use crate::io::configuration::MAX_WEIGHTED_DISTANCE;

/// Cell index into the sprite sheet grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteCoordinate {
    /// Column index
    pub x: u32,
    /// Row index
    pub y: u32,
}

impl SpriteCoordinate {
    /// Create a sprite coordinate
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Single-slot notification fired once per cache population
pub type ResolvedCallback = Box<dyn FnMut(SpriteKey, SpriteCoordinate)>;

/// Availability of the reference pattern pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceStatus {
    /// Not requested yet
    Unloaded,
    /// Decoded and ready for sampling
    Ready,
    /// Failed to load; only estimates will be served
    Unavailable,
}

enum ReferenceState {
    Unloaded,
    Ready(ReferenceSheet),
    Unavailable,
}

/// Resolves connectivity bitmasks to sprite coordinates
pub struct PatternMatcher<S> {
    source: S,
    reference: ReferenceState,
    cache: SpriteCache,
    queue: VecDeque<SpriteKey>,
    queued: HashSet<SpriteKey>,
    on_resolved: Option<ResolvedCallback>,
}

impl<S: PatternSource> PatternMatcher<S> {
    /// Create a matcher with an empty cache
    pub fn new(source: S) -> Self {
        Self::with_cache(source, SpriteCache::new())
    }

    /// Create a matcher around an existing (possibly pre-seeded) cache
    pub fn with_cache(source: S, cache: SpriteCache) -> Self {
        Self {
            source,
            reference: ReferenceState::Unloaded,
            cache,
            queue: VecDeque::new(),
            queued: HashSet::new(),
            on_resolved: None,
        }
    }

    /// Register the resolution callback, replacing any previous one
    pub fn on_resolved<F>(&mut self, callback: F)
    where
        F: FnMut(SpriteKey, SpriteCoordinate) + 'static,
    {
        self.on_resolved = Some(Box::new(callback));
    }

    /// Remove the resolution callback
    pub fn clear_on_resolved(&mut self) {
        self.on_resolved = None;
    }

    /// Sprite for a class and bitmask, answered immediately
    ///
    /// Returns the cached precise coordinate when available. Otherwise the
    /// precise lookup is queued (once per key) and the cardinal-shape estimate
    /// is returned.
    pub fn resolve_sprite(
        &mut self,
        class: CategoryClass,
        mask: ConnectivityBitmask,
    ) -> SpriteCoordinate {
        let key = SpriteKey::new(class, mask);
        if let Some(coordinate) = self.cache.lookup(key) {
            return coordinate;
        }

        if !matches!(self.reference, ReferenceState::Unavailable) && self.queued.insert(key) {
            self.queue.push_back(key);
        }

        heuristic::estimate(mask)
    }

    /// Number of queued precise lookups
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Current state of the reference pixels
    pub const fn reference_status(&self) -> ReferenceStatus {
        match self.reference {
            ReferenceState::Unloaded => ReferenceStatus::Unloaded,
            ReferenceState::Ready(_) => ReferenceStatus::Ready,
            ReferenceState::Unavailable => ReferenceStatus::Unavailable,
        }
    }

    /// Load the reference pixels now instead of on the first lookup
    pub fn preload(&mut self) -> ReferenceStatus {
        self.ensure_loaded();
        self.reference_status()
    }

    /// Complete every queued precise lookup
    ///
    /// Loads the reference on first use. Each key that enters the cache fires
    /// the registered callback once. Returns the number of new cache entries;
    /// when the reference is unavailable the queue is dropped and 0 returned.
    pub fn run_pending(&mut self) -> usize {
        if self.queue.is_empty() {
            return 0;
        }

        if !self.ensure_loaded() {
            self.queue.clear();
            self.queued.clear();
            return 0;
        }
        let ReferenceState::Ready(sheet) = &self.reference else {
            return 0;
        };

        let mut populated = 0;
        while let Some(key) = self.queue.pop_front() {
            self.queued.remove(&key);
            let coordinate = find_best_match(sheet, key.mask);
            if self.cache.insert(key, coordinate) {
                populated += 1;
                log::debug!(
                    "Resolved {:?} mask {:#010b} to ({}, {})",
                    key.class,
                    key.mask.bits(),
                    coordinate.x,
                    coordinate.y
                );
                if let Some(callback) = self.on_resolved.as_mut() {
                    callback(key, coordinate);
                }
            }
        }

        populated
    }

    /// Run the precise lookup for one bitmask without touching the cache
    ///
    /// Returns `None` when the reference is unavailable.
    pub fn precise_lookup(&mut self, mask: ConnectivityBitmask) -> Option<SpriteCoordinate> {
        self.ensure_loaded();
        match &self.reference {
            ReferenceState::Ready(sheet) => Some(find_best_match(sheet, mask)),
            ReferenceState::Unloaded | ReferenceState::Unavailable => None,
        }
    }

    /// Resolved coordinates so far
    pub const fn cache(&self) -> &SpriteCache {
        &self.cache
    }

    /// Mutable access to the cache, e.g. to pre-seed or invalidate entries
    pub const fn cache_mut(&mut self) -> &mut SpriteCache {
        &mut self.cache
    }

    /// Consume the matcher and hand back its cache
    pub fn into_cache(self) -> SpriteCache {
        self.cache
    }

    fn ensure_loaded(&mut self) -> bool {
        if matches!(self.reference, ReferenceState::Unloaded) {
            self.reference = match self.source.load() {
                Ok(pixels) => {
                    log::info!(
                        "Loaded reference pattern ({}x{} px)",
                        pixels.width(),
                        pixels.height()
                    );
                    ReferenceState::Ready(ReferenceSheet::new(pixels))
                }
                Err(err) => {
                    log::warn!("Reference pattern unavailable, using estimated sprites: {err}");
                    ReferenceState::Unavailable
                }
            };
        }
        matches!(self.reference, ReferenceState::Ready(_))
    }
}

/// Scan the sheet for the cell that best represents `target`
///
/// Cells are scanned row-major and the first exact match wins. Without an
/// exact match the cell with the lowest weighted distance is returned, ties
/// going to the earliest cell; if nothing beats the maximum distance the
/// answer is (0, 0).
pub fn find_best_match(sheet: &ReferenceSheet, target: ConnectivityBitmask) -> SpriteCoordinate {
    let mut closest = SpriteCoordinate::default();
    let mut closest_distance = MAX_WEIGHTED_DISTANCE;

    for coordinate in sheet.coordinates() {
        let cell_mask = sheet.cell_bitmask(coordinate);
        if cell_mask == target {
            return coordinate;
        }

        let distance = weighted_distance(cell_mask, target);
        if distance < closest_distance {
            closest_distance = distance;
            closest = coordinate;
        }
    }

    closest
}

//! Tests for sprite resolution: exact and nearest matches, queueing, caching and degradation

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use image::RgbaImage;
    use tilemaze::autotile::bitmask::ConnectivityBitmask;
    use tilemaze::autotile::cache::{SpriteCache, SpriteKey};
    use tilemaze::autotile::heuristic::estimate;
    use tilemaze::autotile::matcher::{
        PatternMatcher, ReferenceStatus, SpriteCoordinate, find_best_match,
    };
    use tilemaze::autotile::reference::{PatternSource, ReferenceSheet};
    use tilemaze::game::tile::CategoryClass;
    use tilemaze::io::error::invalid_parameter;
    use tilemaze::io::image::render_pattern_sheet;

    const CROSS: ConnectivityBitmask = ConnectivityBitmask(0b1010_1010);
    const TOP: ConnectivityBitmask = ConnectivityBitmask(0b0000_0010);

    struct FailingSource {
        loads: Rc<Cell<usize>>,
    }

    impl PatternSource for FailingSource {
        fn load(&self) -> tilemaze::Result<RgbaImage> {
            self.loads.set(self.loads.get() + 1);
            Err(invalid_parameter("pattern", &"test", &"unavailable"))
        }
    }

    fn sheet(masks: &[u8]) -> RgbaImage {
        let masks: Vec<ConnectivityBitmask> = masks.iter().copied().map(ConnectivityBitmask).collect();
        render_pattern_sheet(&masks).unwrap()
    }

    // Tests exact matches win over closer-looking heuristics
    // Verified by skipping the exact-match early return
    #[test]
    fn test_exact_match_is_returned() {
        let reference = ReferenceSheet::new(sheet(&[0, TOP.0, CROSS.0]));
        assert_eq!(find_best_match(&reference, CROSS), SpriteCoordinate::new(2, 0));
        assert_eq!(find_best_match(&reference, TOP), SpriteCoordinate::new(1, 0));
    }

    // Tests duplicate exact matches favour the lowest row, then lowest column
    // Verified by scanning column-major
    #[test]
    fn test_duplicate_exact_matches_prefer_row_major_first() {
        let mut masks = vec![0u8; 48];
        masks[13] = CROSS.0;
        masks[30] = CROSS.0;
        masks[24] = CROSS.0;
        let reference = ReferenceSheet::new(sheet(&masks));

        assert_eq!(find_best_match(&reference, CROSS), SpriteCoordinate::new(1, 1));
    }

    // Tests the nearest cell is chosen when no exact match exists
    // Verified by weighting diagonals like cardinals
    #[test]
    fn test_nearest_match_by_weighted_distance() {
        let reference = ReferenceSheet::new(sheet(&[TOP.0, 0b1111_1111, CROSS.0]));
        // Cross plus one corner: 1 away from the cross, 3 away from the full cell
        let target = ConnectivityBitmask(0b1010_1011);
        assert_eq!(find_best_match(&reference, target), SpriteCoordinate::new(2, 0));

        // Cardinal top and right only: the top stub is 10 away, the cross 20
        let corner = ConnectivityBitmask(0b0000_1010);
        assert_eq!(find_best_match(&reference, corner), SpriteCoordinate::new(0, 0));
    }

    // Tests a target at maximum distance from every cell falls back to (0, 0)
    // Verified by using <= when tracking the closest cell
    #[test]
    fn test_max_distance_falls_back_to_origin() {
        let reference = ReferenceSheet::new(sheet(&[]));
        assert_eq!(
            find_best_match(&reference, ConnectivityBitmask(u8::MAX)),
            SpriteCoordinate::new(0, 0)
        );
    }

    // Tests first request returns the estimate and queues exactly one lookup
    // Verified by queueing every miss without deduplication
    #[test]
    fn test_miss_returns_estimate_and_deduplicates() {
        let mut matcher = PatternMatcher::new(sheet(&[0, TOP.0, CROSS.0]));

        let first = matcher.resolve_sprite(CategoryClass::Walkable, CROSS);
        let second = matcher.resolve_sprite(CategoryClass::Walkable, CROSS);

        assert_eq!(first, estimate(CROSS));
        assert_eq!(second, estimate(CROSS));
        assert_eq!(matcher.pending(), 1);
        assert_eq!(matcher.reference_status(), ReferenceStatus::Unloaded);
    }

    // Tests a resolved key stays fixed and notifies exactly once
    // Verified by invoking the callback on every run_pending
    #[test]
    fn test_resolution_populates_cache_and_notifies_once() {
        let mut matcher = PatternMatcher::new(sheet(&[0, TOP.0, CROSS.0]));
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        matcher.on_resolved(move |key, coordinate| sink.borrow_mut().push((key, coordinate)));

        matcher.resolve_sprite(CategoryClass::Walkable, CROSS);
        assert_eq!(matcher.run_pending(), 1);
        assert_eq!(matcher.run_pending(), 0);

        let key = SpriteKey::new(CategoryClass::Walkable, CROSS);
        assert_eq!(*events.borrow(), vec![(key, SpriteCoordinate::new(2, 0))]);

        for _ in 0..3 {
            assert_eq!(
                matcher.resolve_sprite(CategoryClass::Walkable, CROSS),
                SpriteCoordinate::new(2, 0)
            );
        }
        assert_eq!(matcher.pending(), 0);
        assert_eq!(events.borrow().len(), 1);
        assert_eq!(matcher.cache().stats.hits, 3);
    }

    // Tests the estimate and the precise answer may disagree for one mask
    // Verified by seeding the cache with the estimate
    #[test]
    fn test_estimate_and_precise_can_differ() {
        let mut masks = vec![0u8; 48];
        masks[27] = CROSS.0;
        let mut matcher = PatternMatcher::new(sheet(&masks));

        let placeholder = matcher.resolve_sprite(CategoryClass::Wall, CROSS);
        matcher.run_pending();
        let precise = matcher.resolve_sprite(CategoryClass::Wall, CROSS);

        assert_eq!(placeholder, SpriteCoordinate::new(15, 0));
        assert_eq!(precise, SpriteCoordinate::new(3, 2));
        assert_ne!(placeholder, precise);
    }

    // Tests a load failure is attempted once and leaves estimates in place
    // Verified by retrying the load on every run_pending
    #[test]
    fn test_load_failure_degrades_to_estimates() {
        let loads = Rc::new(Cell::new(0));
        let mut matcher = PatternMatcher::new(FailingSource {
            loads: Rc::clone(&loads),
        });
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        matcher.on_resolved(move |_, _| flag.set(true));

        matcher.resolve_sprite(CategoryClass::Walkable, TOP);
        assert_eq!(matcher.run_pending(), 0);
        assert_eq!(matcher.reference_status(), ReferenceStatus::Unavailable);

        assert_eq!(
            matcher.resolve_sprite(CategoryClass::Walkable, TOP),
            estimate(TOP)
        );
        assert_eq!(matcher.pending(), 0);
        assert_eq!(matcher.run_pending(), 0);
        assert_eq!(matcher.precise_lookup(TOP), None);

        assert_eq!(loads.get(), 1);
        assert!(!fired.get());
        assert!(matcher.cache().is_empty());
    }

    // Tests a pre-seeded cache is served without queueing
    // Verified by ignoring the injected cache
    #[test]
    fn test_preseeded_cache_is_used() {
        let mut cache = SpriteCache::new();
        let key = SpriteKey::new(CategoryClass::Walkable, TOP);
        cache.insert(key, SpriteCoordinate::new(7, 3));
        let mut matcher = PatternMatcher::with_cache(sheet(&[TOP.0]), cache);

        assert_eq!(
            matcher.resolve_sprite(CategoryClass::Walkable, TOP),
            SpriteCoordinate::new(7, 3)
        );
        assert_eq!(matcher.pending(), 0);

        matcher.cache_mut().clear();
        assert_eq!(
            matcher.resolve_sprite(CategoryClass::Walkable, TOP),
            estimate(TOP)
        );
        assert_eq!(matcher.pending(), 1);
    }

    // Tests preload and precise_lookup on a healthy source
    // Verified by never transitioning out of Unloaded
    #[test]
    fn test_preload_and_precise_lookup() {
        let mut matcher = PatternMatcher::new(sheet(&[0, CROSS.0]));
        assert_eq!(matcher.preload(), ReferenceStatus::Ready);
        assert_eq!(matcher.precise_lookup(CROSS), Some(SpriteCoordinate::new(1, 0)));
        assert!(matcher.into_cache().is_empty());
    }
}

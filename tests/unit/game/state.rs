//! Tests for level setup, click handling, battles, sprites and scoring

#[cfg(test)]
mod tests {
    use tilemaze::GameError;
    use tilemaze::autotile::bitmask::ConnectivityBitmask;
    use tilemaze::autotile::heuristic::estimate;
    use tilemaze::autotile::matcher::{PatternMatcher, SpriteCoordinate};
    use tilemaze::game::combat::BattleResult;
    use tilemaze::game::inventory::InventoryOps;
    use tilemaze::game::state::{ActionOutcome, GameGridState, GameStatus};
    use tilemaze::game::tile::{Position, TileCategory};
    use tilemaze::io::image::render_pattern_sheet;
    use tilemaze::io::level::{Enemy, Item, Level, LevelCatalog};

    fn level(rows: &[&[&str]], start: Position) -> Level {
        Level {
            id: 3,
            name: "test".to_string(),
            start,
            grid: rows
                .iter()
                .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
                .collect(),
            catalog: LevelCatalog {
                enemies: vec![Enemy {
                    kind: "goblin".to_string(),
                    name: "Goblin".to_string(),
                    hp: 10,
                    attack: 3,
                }],
                items: vec![Item {
                    id: "sword".to_string(),
                    name: "Sword".to_string(),
                    kind: "weapon".to_string(),
                }],
            },
        }
    }

    fn maze() -> GameGridState {
        let rows: [&[&str]; 3] = [
            &["S", "C", "K:red", "D:red", "E"],
            &["W", "M:goblin", "W", "W", "C"],
            &["C", "A:sword", "C", "C", "C"],
        ];
        GameGridState::from_level(&level(&rows, Position::new(0, 0))).unwrap()
    }

    fn category(state: &GameGridState, row: usize, col: usize) -> TileCategory {
        state.grid().get(Position::new(row, col)).unwrap().category
    }

    // Tests a fresh level reveals only the start tile
    // Verified by revealing the start tile's neighbours as well
    #[test]
    fn test_from_level() {
        let state = maze();
        assert_eq!(state.tiles_revealed(), 1);
        assert_eq!(state.player(), Position::new(0, 0));
        assert_eq!(state.moves(), 0);
        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.level_id(), 3);
        assert!(state.catalog().find_enemy("goblin").is_some());
    }

    // Tests a start outside the grid is a level error
    // Verified by clamping the start into the grid
    #[test]
    fn test_start_outside_grid() {
        let rows: [&[&str]; 1] = [&["S", "E"]];
        let result = GameGridState::from_level(&level(&rows, Position::new(0, 2)));
        assert!(matches!(result, Err(GameError::InvalidLevel { .. })));
    }

    // Tests reveal gating and the outcomes of clicks away from the player
    // Verified by revealing tiles with only a diagonal revealed neighbour
    #[test]
    fn test_click_reveal_gating() {
        let mut state = maze();

        assert_eq!(state.click(Position::new(1, 1)).unwrap(), ActionOutcome::Unreachable);
        assert_eq!(state.tiles_revealed(), 1);

        let wall = state.click(Position::new(1, 0)).unwrap();
        assert!(matches!(
            wall,
            ActionOutcome::Interacted {
                revealed: true,
                moved: false,
                ..
            }
        ));

        assert_eq!(state.click(Position::new(2, 0)).unwrap(), ActionOutcome::Revealed);
        assert_eq!(state.click(Position::new(2, 0)).unwrap(), ActionOutcome::NoChange);
        assert_eq!(state.tiles_revealed(), 3);
        assert_eq!(state.moves(), 0);
        assert_eq!(state.player(), Position::new(0, 0));
    }

    // Tests clicks outside the grid are rejected
    // Verified by ignoring off-grid clicks silently
    #[test]
    fn test_click_out_of_bounds() {
        let mut state = maze();
        assert!(matches!(
            state.click(Position::new(7, 0)),
            Err(GameError::OutOfBounds { .. })
        ));
    }

    // Tests walking through key and door to the exit
    // Verified by leaving consumed tiles in their original category
    #[test]
    fn test_key_door_exit() {
        let mut state = maze();
        for col in 1..=4 {
            let outcome = state.click(Position::new(0, col)).unwrap();
            assert!(
                matches!(outcome, ActionOutcome::Interacted { moved: true, .. }),
                "column {col}: {outcome:?}"
            );
        }

        assert_eq!(category(&state, 0, 2), TileCategory::Path);
        assert_eq!(category(&state, 0, 3), TileCategory::Path);
        assert!(!state.inventory().has_key("red"));
        assert_eq!(state.moves(), 4);
        assert_eq!(state.status(), GameStatus::Victory);

        assert_eq!(state.click(Position::new(1, 4)).unwrap(), ActionOutcome::Ignored);
    }

    // Tests a locked door blocks and keeps the player in place
    // Verified by moving onto blocked tiles
    #[test]
    fn test_locked_door_blocks() {
        let rows: [&[&str]; 1] = [&["S", "D:red", "E"]];
        let mut state = GameGridState::from_level(&level(&rows, Position::new(0, 0))).unwrap();

        let outcome = state.click(Position::new(0, 1)).unwrap();
        assert!(matches!(outcome, ActionOutcome::Interacted { moved: false, .. }));
        assert_eq!(state.player(), Position::new(0, 0));
        assert_eq!(state.moves(), 0);
        assert_eq!(category(&state, 0, 1), TileCategory::Door);
    }

    // Tests a pending battle freezes clicks until the player flees
    // Verified by accepting clicks during a battle
    #[test]
    fn test_battle_blocks_and_flee() {
        let mut state = maze();
        state.click(Position::new(0, 1)).unwrap();

        let outcome = state.click(Position::new(1, 1)).unwrap();
        let ActionOutcome::Interacted { interaction, moved, .. } = outcome else {
            panic!("expected an interaction");
        };
        assert!(interaction.triggers_battle);
        assert!(!moved);
        assert!(state.combat().is_active());

        assert_eq!(state.click(Position::new(0, 2)).unwrap(), ActionOutcome::Ignored);
        assert!(state.flee());
        assert!(!state.flee());
        assert_eq!(state.fight(), None);
        assert_eq!(category(&state, 1, 1), TileCategory::Monster);
        assert!(matches!(
            state.click(Position::new(0, 2)).unwrap(),
            ActionOutcome::Interacted { moved: true, .. }
        ));
    }

    // Tests fighting without a weapon loses the level
    // Verified by letting unarmed fights succeed
    #[test]
    fn test_fight_without_weapon() {
        let mut state = maze();
        state.click(Position::new(0, 1)).unwrap();
        state.click(Position::new(1, 1)).unwrap();

        assert_eq!(state.fight(), Some(BattleResult::Defeat));
        assert_eq!(state.status(), GameStatus::Defeat);
        assert_eq!(state.click(Position::new(0, 2)).unwrap(), ActionOutcome::Ignored);
    }

    // Tests an armed fight clears the monster tile
    // Verified by leaving the monster in place after victory
    #[test]
    fn test_fight_with_weapon() {
        let rows: [&[&str]; 1] = [&["S", "A:sword", "M:goblin", "E"]];
        let mut state = GameGridState::from_level(&level(&rows, Position::new(0, 0))).unwrap();

        state.click(Position::new(0, 1)).unwrap();
        assert!(state.inventory().has_weapon());
        state.click(Position::new(0, 2)).unwrap();

        assert_eq!(state.fight(), Some(BattleResult::Victory));
        assert_eq!(category(&state, 0, 2), TileCategory::Path);
        assert_eq!(state.status(), GameStatus::Playing);

        state.click(Position::new(0, 2)).unwrap();
        state.click(Position::new(0, 3)).unwrap();
        assert_eq!(state.status(), GameStatus::Victory);
        assert_eq!(state.moves(), 3);
    }

    // Tests sprites: hidden and classless tiles get none, others start as estimates
    // Verified by drawing hidden tiles
    #[test]
    fn test_render_sprites() {
        let rows: [&[&str]; 3] = [&["C", "C", "C"], &["C", "C", "C"], &["C", "C", "I:gem"]];
        let mut state = GameGridState::from_level(&level(&rows, Position::new(1, 1))).unwrap();
        let sheet = render_pattern_sheet(&[ConnectivityBitmask(0), ConnectivityBitmask(0b1110_1111)])
            .unwrap();
        let mut matcher = PatternMatcher::new(sheet);

        let sprites = state.render_sprites(&mut matcher);
        assert_eq!(sprites.dim(), (3, 3));
        assert_eq!(sprites[[1, 1]], Some(estimate(ConnectivityBitmask::EMPTY)));
        assert_eq!(sprites[[0, 0]], None);

        state.reveal_all();
        let centre = Position::new(1, 1);
        let placeholder = state.sprite_at(centre, &mut matcher);
        assert_eq!(placeholder, Some(estimate(ConnectivityBitmask(0b1110_1111))));
        assert_eq!(state.sprite_at(Position::new(2, 2), &mut matcher), None);
        assert_eq!(state.sprite_at(Position::new(9, 9), &mut matcher), None);

        matcher.run_pending();
        assert_eq!(
            state.sprite_at(centre, &mut matcher),
            Some(SpriteCoordinate::new(1, 0))
        );
    }

    // Tests score snapshots use the level counters
    // Verified by dropping the move penalty
    #[test]
    fn test_score_at() {
        let mut state = maze();
        state.click(Position::new(0, 1)).unwrap();
        state.click(Position::new(0, 2)).unwrap();

        let entry = state.score_at("ann", 5);
        assert_eq!(entry.pseudo, "ann");
        assert_eq!(entry.level_id, 3);
        assert_eq!(entry.tiles_revealed, 3);
        assert_eq!(entry.moves, 2);
        assert_eq!(entry.time_elapsed, 5);
        assert_eq!(entry.total_score, 30 - 4 - 5);
        assert!(state.elapsed_secs() < 60);
        assert!((chrono::Utc::now() - entry.date).num_seconds() < 60);
    }
}

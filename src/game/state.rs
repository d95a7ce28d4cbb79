//! Level state: grid, player, counters, and the click-driven game loop

use chrono::Utc;
use ndarray::Array2;
use web_time::Instant;

use crate::autotile::bitmask::encode;
use crate::autotile::matcher::{PatternMatcher, SpriteCoordinate};
use crate::autotile::neighbors::{
    has_revealed_four_way_neighbor, is_adjacent_four_way, neighbors_of,
};
use crate::autotile::reference::PatternSource;
use crate::game::combat::{BattleResult, Combat, fight};
use crate::game::grid::GameGrid;
use crate::game::interaction::{Interaction, resolve};
use crate::game::inventory::Inventory;
use crate::game::tile::{Position, TileCategory};
use crate::io::error::{Result, invalid_level};
use crate::io::level::{Level, LevelCatalog};
use crate::io::scores::{ScoreEntry, compute_score};

/// Whether the level is still being played
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameStatus {
    /// Accepting moves
    #[default]
    Playing,
    /// The player reached the exit
    Victory,
    /// The player lost a fight
    Defeat,
}

impl GameStatus {
    /// Whether the level has ended
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}

/// Result of clicking a tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The level is over or a battle is waiting to be resolved
    Ignored,
    /// Hidden tile without a revealed edge-sharing neighbour
    Unreachable,
    /// Hidden tile uncovered away from the player
    Revealed,
    /// Revealed tile that is not next to the player
    NoChange,
    /// Tile next to the player was stepped on
    Interacted {
        /// Whether the click also uncovered the tile
        revealed: bool,
        /// Whether the player moved onto the tile
        moved: bool,
        /// Effect of the tile
        interaction: Interaction,
    },
}

/// Mutable state of one level in play
#[derive(Debug, Clone)]
pub struct GameGridState {
    level_id: u32,
    grid: GameGrid,
    catalog: LevelCatalog,
    player: Position,
    moves: u32,
    started_at: Instant,
    inventory: Inventory,
    combat: Combat,
    battle_position: Option<Position>,
    status: GameStatus,
}

impl GameGridState {
    /// Set up a level with only the start tile revealed
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The grid is empty, ragged, or contains unknown tile codes
    /// - The start position lies outside the grid
    pub fn from_level(level: &Level) -> Result<Self> {
        let mut grid = GameGrid::from_payloads(&level.grid)?;
        let start = level.start;
        let Some(start_tile) = grid.get_mut(start) else {
            return Err(invalid_level(&format!(
                "start ({}, {}) is outside the grid",
                start.row, start.col
            )));
        };
        start_tile.revealed = true;

        log::debug!(
            "Level {} loaded: {}x{} grid, start at ({}, {})",
            level.id,
            grid.rows(),
            grid.cols(),
            start.row,
            start.col
        );

        Ok(Self {
            level_id: level.id,
            grid,
            catalog: level.catalog.clone(),
            player: start,
            moves: 0,
            started_at: Instant::now(),
            inventory: Inventory::new(),
            combat: Combat::new(),
            battle_position: None,
            status: GameStatus::Playing,
        })
    }

    /// Handle a click on a tile
    ///
    /// Hidden tiles are uncovered when an edge-sharing neighbour is already
    /// revealed. A tile next to the player is then stepped on: its interaction
    /// is resolved, the player moves if allowed, consumed tiles become path,
    /// and reaching the exit wins the level.
    ///
    /// # Errors
    ///
    /// Returns an error if the position lies outside the grid
    pub fn click(&mut self, position: Position) -> Result<ActionOutcome> {
        let position = self.grid.validate(position)?;

        if self.status.is_finished() || self.combat.is_active() {
            return Ok(ActionOutcome::Ignored);
        }

        let mut revealed = false;
        if self.grid.get(position).is_some_and(|tile| !tile.revealed) {
            if !has_revealed_four_way_neighbor(&self.grid, position) {
                return Ok(ActionOutcome::Unreachable);
            }
            if let Some(tile) = self.grid.get_mut(position) {
                tile.revealed = true;
                revealed = true;
                log::debug!(
                    "Revealed {:?} at ({}, {})",
                    tile.category,
                    position.row,
                    position.col
                );
            }
        }

        if !is_adjacent_four_way(self.player, position) {
            return Ok(if revealed {
                ActionOutcome::Revealed
            } else {
                ActionOutcome::NoChange
            });
        }

        let Some(tile) = self.grid.get(position) else {
            return Ok(ActionOutcome::NoChange);
        };
        let category = tile.category;
        let interaction = resolve(
            category,
            &tile.payload,
            Some(&self.catalog),
            &mut self.inventory,
            &mut self.combat,
        );

        if let Some(message) = &interaction.message {
            log::info!("{message}");
        }
        if interaction.triggers_battle {
            self.battle_position = Some(position);
        }
        if interaction.should_reset_tile
            && let Some(tile) = self.grid.get_mut(position)
        {
            tile.consume();
        }

        let moved = interaction.can_move;
        if moved {
            self.player = position;
            self.moves += 1;
            if category == TileCategory::End {
                log::info!("Exit reached in {} moves", self.moves);
                self.status = GameStatus::Victory;
            }
        }

        Ok(ActionOutcome::Interacted {
            revealed,
            moved,
            interaction,
        })
    }

    /// Fight the enemy of the pending battle
    ///
    /// Winning clears the monster's tile to path; losing ends the level.
    /// Returns `None` when no battle is pending.
    pub fn fight(&mut self) -> Option<BattleResult> {
        let enemy = self.combat.end_battle()?;
        let position = self.battle_position.take();
        let result = fight(self.inventory.has_weapon());

        match result {
            BattleResult::Victory => {
                log::info!("Defeated {}", enemy.name);
                if let Some(tile) = position.and_then(|p| self.grid.get_mut(p)) {
                    tile.consume();
                }
            }
            BattleResult::Defeat => {
                log::info!("Defeated by {}", enemy.name);
                self.status = GameStatus::Defeat;
            }
        }

        Some(result)
    }

    /// Walk away from the pending battle, leaving the monster in place
    ///
    /// Returns whether a battle was pending.
    pub fn flee(&mut self) -> bool {
        self.battle_position = None;
        self.combat.end_battle().is_some()
    }

    /// Sprite for the tile at `position`
    ///
    /// `None` for hidden tiles, off-grid positions and tiles without a
    /// connectivity class.
    pub fn sprite_at<S: PatternSource>(
        &self,
        position: Position,
        matcher: &mut PatternMatcher<S>,
    ) -> Option<SpriteCoordinate> {
        let tile = self.grid.get(position)?;
        if !tile.revealed {
            return None;
        }
        let class = tile.class()?;
        let mask = encode(&neighbors_of(&self.grid, position));
        Some(matcher.resolve_sprite(class, mask))
    }

    /// Sprites for the whole grid, see [`Self::sprite_at`]
    pub fn render_sprites<S: PatternSource>(
        &self,
        matcher: &mut PatternMatcher<S>,
    ) -> Array2<Option<SpriteCoordinate>> {
        Array2::from_shape_fn(self.grid.dimensions(), |(row, col)| {
            self.sprite_at(Position::new(row, col), matcher)
        })
    }

    /// Uncover every tile, e.g. to preview a level
    pub fn reveal_all(&mut self) {
        self.grid.reveal_all();
    }

    /// Level grid
    pub const fn grid(&self) -> &GameGrid {
        &self.grid
    }

    /// Enemy and item catalogs
    pub const fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    /// Id of the level being played
    pub const fn level_id(&self) -> u32 {
        self.level_id
    }

    /// Player position
    pub const fn player(&self) -> Position {
        self.player
    }

    /// Number of successful moves
    pub const fn moves(&self) -> u32 {
        self.moves
    }

    /// Current status
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// Player inventory
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Battle tracker
    pub const fn combat(&self) -> &Combat {
        &self.combat
    }

    /// Number of revealed tiles
    pub fn tiles_revealed(&self) -> usize {
        self.grid.revealed_count()
    }

    /// Whole seconds since the level started
    pub fn elapsed_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Score snapshot for a given elapsed time
    pub fn score_at(&self, pseudo: &str, elapsed_secs: u64) -> ScoreEntry {
        let tiles_revealed = self.tiles_revealed();
        ScoreEntry {
            pseudo: pseudo.to_string(),
            level_id: self.level_id,
            tiles_revealed,
            moves: self.moves,
            time_elapsed: elapsed_secs,
            total_score: compute_score(tiles_revealed, self.moves, elapsed_secs),
            date: Utc::now(),
        }
    }

    /// Score snapshot using the level clock
    pub fn score(&self, pseudo: &str) -> ScoreEntry {
        self.score_at(pseudo, self.elapsed_secs())
    }
}

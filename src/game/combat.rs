//! Battle bookkeeping; the fight itself is decided by the equipped weapon

use crate::io::level::Enemy;

/// Combat operations available to tile interactions
pub trait CombatOps {
    /// Begin a battle against `enemy`
    fn start_battle(&mut self, enemy: Enemy);
}

/// How a fight ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleResult {
    /// The monster was defeated
    Victory,
    /// The player was defeated
    Defeat,
}

/// Current battle, if one is in progress
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Combat {
    current_enemy: Option<Enemy>,
}

impl Combat {
    /// Create an idle combat tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a battle is in progress
    pub const fn is_active(&self) -> bool {
        self.current_enemy.is_some()
    }

    /// Enemy being fought
    pub const fn current_enemy(&self) -> Option<&Enemy> {
        self.current_enemy.as_ref()
    }

    /// Leave the current battle
    pub fn end_battle(&mut self) -> Option<Enemy> {
        self.current_enemy.take()
    }
}

impl CombatOps for Combat {
    fn start_battle(&mut self, enemy: Enemy) {
        log::info!("Battle started against {}", enemy.name);
        self.current_enemy = Some(enemy);
    }
}

/// Outcome of fighting with or without a weapon
pub const fn fight(has_weapon: bool) -> BattleResult {
    if has_weapon {
        BattleResult::Victory
    } else {
        BattleResult::Defeat
    }
}

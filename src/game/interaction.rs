//! What happens when the player steps onto a tile
//!
//! Resolution never fails: a payload that points at a missing catalog entry
//! lets the player through for collectibles and blocks them for monsters.

use crate::game::combat::CombatOps;
use crate::game::inventory::InventoryOps;
use crate::game::tile::{Payload, TileCategory};
use crate::io::level::{Enemy, LevelCatalog};

/// Effect of stepping onto a tile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interaction {
    /// Whether the player may move onto the tile
    pub can_move: bool,
    /// Whether the tile turns into plain path afterwards
    pub should_reset_tile: bool,
    /// Whether a battle was started
    pub triggers_battle: bool,
    /// Enemy being fought when a battle was started
    pub enemy: Option<Enemy>,
    /// Message for the player
    pub message: Option<String>,
}

impl Interaction {
    const fn pass() -> Self {
        Self {
            can_move: true,
            should_reset_tile: false,
            triggers_battle: false,
            enemy: None,
            message: None,
        }
    }

    const fn blocked() -> Self {
        Self {
            can_move: false,
            should_reset_tile: false,
            triggers_battle: false,
            enemy: None,
            message: None,
        }
    }

    fn consumed(message: String) -> Self {
        Self {
            can_move: true,
            should_reset_tile: true,
            message: Some(message),
            ..Self::pass()
        }
    }

    fn with_message(mut self, message: String) -> Self {
        self.message = Some(message);
        self
    }
}

/// Decide the effect of stepping onto a tile and apply it to the collaborators
///
/// `catalog` is `None` when no level data is available, which makes every
/// catalog lookup miss.
pub fn resolve<I, C>(
    category: TileCategory,
    payload: &str,
    catalog: Option<&LevelCatalog>,
    inventory: &mut I,
    combat: &mut C,
) -> Interaction
where
    I: InventoryOps + ?Sized,
    C: CombatOps + ?Sized,
{
    let subcode = Payload::parse(payload).subcode;

    match category {
        TileCategory::Wall => Interaction::blocked(),

        TileCategory::Key => {
            if let Some(color) = subcode {
                inventory.add_key(color);
            }
            Interaction::consumed(format!("Picked up {} key!", subcode.unwrap_or("a")))
        }

        TileCategory::Door => match subcode {
            Some(color) if inventory.has_key(color) => {
                inventory.remove_key(color);
                Interaction::consumed(format!("Opened {color} door"))
            }
            Some(color) => {
                Interaction::blocked().with_message(format!("Need {color} key to open this door"))
            }
            None => Interaction::blocked().with_message("Door is locked".to_string()),
        },

        TileCategory::Weapon => {
            match subcode.and_then(|id| catalog.and_then(|c| c.find_item(id))) {
                Some(item) => {
                    let message = format!("Picked up {}!", item.name);
                    inventory.set_weapon(item.clone());
                    Interaction::consumed(message)
                }
                None => Interaction::pass(),
            }
        }

        TileCategory::Item => match subcode.and_then(|id| catalog.and_then(|c| c.find_item(id))) {
            Some(item) => {
                let message = format!("Picked up {}!", item.name);
                inventory.add_item(item.clone());
                Interaction::consumed(message)
            }
            None => Interaction::pass(),
        },

        TileCategory::Monster => {
            match subcode.and_then(|kind| catalog.and_then(|c| c.find_enemy(kind))) {
                Some(enemy) => {
                    combat.start_battle(enemy.clone());
                    Interaction {
                        triggers_battle: true,
                        enemy: Some(enemy.clone()),
                        ..Interaction::blocked()
                    }
                }
                None => Interaction::blocked(),
            }
        }

        TileCategory::Start | TileCategory::End | TileCategory::Path | TileCategory::Obstacle => {
            Interaction::pass()
        }
    }
}

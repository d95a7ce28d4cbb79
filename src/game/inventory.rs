//! Player inventory and the operations tile interactions may perform on it

use std::collections::BTreeSet;

use crate::io::level::Item;

/// Inventory operations available to tile interactions
pub trait InventoryOps {
    /// Whether a key of this colour is held
    fn has_key(&self, color: &str) -> bool;
    /// Pick up a key; holding the same colour twice is a no-op
    fn add_key(&mut self, color: &str);
    /// Use up a key
    fn remove_key(&mut self, color: &str);
    /// Equip a weapon, replacing the current one
    fn set_weapon(&mut self, item: Item);
    /// Append a collected item
    fn add_item(&mut self, item: Item);
}

/// Keys, equipped weapon and collected items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    keys: BTreeSet<String>,
    weapon: Option<Item>,
    items: Vec<Item>,
}

impl Inventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// Held key colours
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Equipped weapon, if any
    pub const fn weapon(&self) -> Option<&Item> {
        self.weapon.as_ref()
    }

    /// Whether a weapon is equipped
    pub const fn has_weapon(&self) -> bool {
        self.weapon.is_some()
    }

    /// Collected items in pickup order
    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

impl InventoryOps for Inventory {
    fn has_key(&self, color: &str) -> bool {
        self.keys.contains(color)
    }

    fn add_key(&mut self, color: &str) {
        if !self.keys.contains(color) {
            self.keys.insert(color.to_string());
        }
    }

    fn remove_key(&mut self, color: &str) {
        self.keys.remove(color);
    }

    fn set_weapon(&mut self, item: Item) {
        self.weapon = Some(item);
    }

    fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }
}

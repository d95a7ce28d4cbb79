//! Level files: grid payloads, start position and enemy/item catalogs

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::game::tile::Position;
use crate::io::error::{GameError, Result};

/// Enemy that a monster tile can reference by type code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    /// Type code used in `M:<type>` payloads
    #[serde(rename = "type")]
    pub kind: String,
    /// Display name
    pub name: String,
    /// Hit points
    pub hp: u32,
    /// Attack strength
    pub attack: u32,
}

/// Collectible that weapon and item tiles reference by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Id used in `A:<id>` and `I:<id>` payloads
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-form kind, e.g. `"weapon"` or `"potion"`
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Enemies and items available in a level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCatalog {
    /// Enemies by type code
    #[serde(default)]
    pub enemies: Vec<Enemy>,
    /// Items by id
    #[serde(default)]
    pub items: Vec<Item>,
}

impl LevelCatalog {
    /// Enemy with the given type code
    pub fn find_enemy(&self, kind: &str) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.kind == kind)
    }

    /// Item with the given id
    pub fn find_item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// Everything needed to start a level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Numeric level id
    #[serde(default)]
    pub id: u32,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Player spawn position
    pub start: Position,
    /// Rows of tile payloads
    pub grid: Vec<Vec<String>>,
    /// Enemy and item catalogs
    #[serde(flatten)]
    pub catalog: LevelCatalog,
}

impl Level {
    /// Parse a level from JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid level JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| GameError::LevelParse {
            path: "<inline>".into(),
            source: e,
        })
    }

    /// Read and parse a level file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file is not valid level JSON
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| GameError::LevelRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&text).map_err(|e| GameError::LevelParse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

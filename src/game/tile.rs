//! Tile categories, payload parsing and per-cell records

use serde::{Deserialize, Serialize};

use crate::io::configuration::PLAIN_PATH_PAYLOAD;

/// Grid position, row-major with (0, 0) at the top-left
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Row index
    pub row: usize,
    /// Column index
    pub col: usize,
}

impl Position {
    /// Create a position from row and column
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Position shifted by a signed offset, if it stays non-negative
    pub const fn offset(self, delta: (isize, isize)) -> Option<Self> {
        let Some(row) = self.row.checked_add_signed(delta.0) else {
            return None;
        };
        let Some(col) = self.col.checked_add_signed(delta.1) else {
            return None;
        };
        Some(Self { row, col })
    }

    /// Index into an `ndarray` grid
    pub const fn index(self) -> [usize; 2] {
        [self.row, self.col]
    }
}

/// Connectivity grouping used for autotiling
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoryClass {
    /// Anything the player can stand on or interact with in place
    Walkable,
    /// Solid wall
    Wall,
}

/// What a tile is, derived from the code before the `:` in its payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileCategory {
    /// Player spawn (`S`)
    Start,
    /// Level exit (`E`)
    End,
    /// Plain walkable path (`C`)
    Path,
    /// Solid wall (`W`)
    Wall,
    /// Monster guarding the tile (`M:<type>`)
    Monster,
    /// Coloured key (`K:<color>`)
    Key,
    /// Locked door (`D:<color>`)
    Door,
    /// Weapon or armour (`A:<item id>`)
    Weapon,
    /// Generic collectible (`I:<item id>`)
    Item,
    /// Decorative obstacle (`O`)
    Obstacle,
}

impl TileCategory {
    /// Parse a category from its single-letter code
    pub fn from_code(code: &str) -> Option<Self> {
        let category = match code {
            "S" => Self::Start,
            "E" => Self::End,
            "C" => Self::Path,
            "W" => Self::Wall,
            "M" => Self::Monster,
            "K" => Self::Key,
            "D" => Self::Door,
            "A" => Self::Weapon,
            "I" => Self::Item,
            "O" => Self::Obstacle,
            _ => return None,
        };
        Some(category)
    }

    /// Single-letter code of this category
    pub const fn code(self) -> char {
        match self {
            Self::Start => 'S',
            Self::End => 'E',
            Self::Path => 'C',
            Self::Wall => 'W',
            Self::Monster => 'M',
            Self::Key => 'K',
            Self::Door => 'D',
            Self::Weapon => 'A',
            Self::Item => 'I',
            Self::Obstacle => 'O',
        }
    }

    /// Connectivity class, `None` for tiles that connect to nothing
    pub const fn class(self) -> Option<CategoryClass> {
        match self {
            Self::Start
            | Self::End
            | Self::Path
            | Self::Monster
            | Self::Key
            | Self::Door
            | Self::Weapon
            | Self::Obstacle => Some(CategoryClass::Walkable),
            Self::Wall => Some(CategoryClass::Wall),
            Self::Item => None,
        }
    }

    /// Whether stepping on this tile consumes it
    pub const fn is_consumable(self) -> bool {
        matches!(self, Self::Key | Self::Door | Self::Weapon | Self::Item)
    }
}

/// Raw tile payload split into code and optional sub-data
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payload<'a> {
    /// Category code before the first `:`
    pub code: &'a str,
    /// Sub-data after the first `:`, absent when missing or empty
    pub subcode: Option<&'a str>,
}

impl<'a> Payload<'a> {
    /// Split a payload string like `"K:red"`
    pub fn parse(raw: &'a str) -> Self {
        match raw.split_once(':') {
            Some((code, subcode)) => Self {
                code,
                subcode: (!subcode.is_empty()).then_some(subcode),
            },
            None => Self {
                code: raw,
                subcode: None,
            },
        }
    }
}

/// One cell of the level grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileRecord {
    /// Where the tile sits in the grid
    pub position: Position,
    /// Category derived from the payload at load time
    pub category: TileCategory,
    /// Raw payload, e.g. `"M:goblin"`
    pub payload: String,
    /// Whether the player has uncovered the tile
    pub revealed: bool,
}

impl TileRecord {
    /// Build a hidden tile from its payload
    ///
    /// Returns `None` when the payload code is not a known category.
    pub fn from_payload(position: Position, payload: &str) -> Option<Self> {
        let category = TileCategory::from_code(Payload::parse(payload).code)?;
        Some(Self {
            position,
            category,
            payload: payload.to_string(),
            revealed: false,
        })
    }

    /// Parsed view of the payload
    pub fn parsed_payload(&self) -> Payload<'_> {
        Payload::parse(&self.payload)
    }

    /// Connectivity class of the tile's category
    pub const fn class(&self) -> Option<CategoryClass> {
        self.category.class()
    }

    /// Turn the tile into plain path after its effect fired
    pub fn consume(&mut self) {
        self.category = TileCategory::Path;
        PLAIN_PATH_PAYLOAD.clone_into(&mut self.payload);
    }
}

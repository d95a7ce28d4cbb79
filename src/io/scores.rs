//! Score calculation and the capped local high-score list

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::io::configuration::{
    MAX_SCORES, MOVES_PENALTY, TILES_REVEALED_MULTIPLIER, TIME_PENALTY,
};
use crate::io::error::{GameError, Result};

/// One finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Player name
    pub pseudo: String,
    /// Level the run was played on
    pub level_id: u32,
    /// Tiles uncovered during the run
    pub tiles_revealed: usize,
    /// Successful moves
    pub moves: u32,
    /// Whole seconds played
    pub time_elapsed: u64,
    /// Final score
    pub total_score: u64,
    /// When the run finished, stored as an RFC 3339 timestamp
    #[serde(default)]
    pub date: DateTime<Utc>,
}

/// Score for a run, floored at zero
pub fn compute_score(tiles_revealed: usize, moves: u32, elapsed_secs: u64) -> u64 {
    let earned = (tiles_revealed as u64).saturating_mul(u64::from(TILES_REVEALED_MULTIPLIER));
    let penalty = u64::from(moves)
        .saturating_mul(u64::from(MOVES_PENALTY))
        .saturating_add(elapsed_secs.saturating_mul(u64::from(TIME_PENALTY)));
    earned.saturating_sub(penalty)
}

/// Best scores, highest first, capped at [`MAX_SCORES`] entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    entries: Vec<ScoreEntry>,
}

impl HighScores {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the list from a JSON file
    ///
    /// A missing file yields an empty list, and so does a corrupt one (with a
    /// warning).
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => {
                return Err(GameError::FileSystem {
                    path: path.to_path_buf(),
                    operation: "read scores",
                    source: e,
                });
            }
        };

        match serde_json::from_str::<Self>(&text) {
            Ok(mut scores) => {
                scores.normalize();
                Ok(scores)
            }
            Err(e) => {
                log::warn!("Ignoring corrupt score file '{}': {e}", path.display());
                Ok(Self::new())
            }
        }
    }

    /// Write the list to a JSON file, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| GameError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| GameError::FileSystem {
            path: path.to_path_buf(),
            operation: "serialize scores",
            source: e.into(),
        })?;
        std::fs::write(path, json).map_err(|e| GameError::FileSystem {
            path: path.to_path_buf(),
            operation: "write scores",
            source: e,
        })
    }

    /// Insert a run, keeping the list sorted and capped
    ///
    /// Returns the entry's rank (0-based), or `None` if it did not make the cut.
    pub fn record(&mut self, entry: ScoreEntry) -> Option<usize> {
        let rank = self
            .entries
            .iter()
            .position(|existing| existing.total_score < entry.total_score)
            .unwrap_or(self.entries.len());
        if rank >= MAX_SCORES {
            return None;
        }
        self.entries.insert(rank, entry);
        self.entries.truncate(MAX_SCORES);
        Some(rank)
    }

    /// Entries, highest score first
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn normalize(&mut self) {
        self.entries
            .sort_by(|a, b| b.total_score.cmp(&a.total_score));
        self.entries.truncate(MAX_SCORES);
    }
}

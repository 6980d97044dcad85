//! Single-file JSON store for the player collection.
//!
//! The file holds one JSON array of player records. Loading is defensive:
//! each element is deserialized on its own, and elements that fail basic
//! type checks (non-string name, negative counters, unknown format) are
//! dropped with a warning rather than failing the load. There is no schema
//! version field; missing `id` and `created_at` are backfilled.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{StorageConfig, StorageError};
use crate::models::{MatchFormat, Player, PlayerId};

/// Reads and rewrites the persisted player array.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

/// A stored element as it may appear on disk, with backfillable fields
/// optional. Type-level checks (string name, non-negative counters, known
/// format) happen here via serde.
#[derive(Debug, Deserialize)]
struct StoredPlayer {
    #[serde(default)]
    id: Option<PlayerId>,
    name: String,
    team: String,
    format: MatchFormat,
    runs: u32,
    balls: u32,
    fours: u32,
    sixes: u32,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl JsonStore {
    /// Create a store over the configured players file.
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            path: config.players_file(),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the collection, dropping type-invalid elements.
    ///
    /// A missing file is an empty collection, not an error. Semantically
    /// invalid but well-typed records (e.g. zero balls, nonzero runs) are
    /// kept; only type checks are enforced here.
    pub fn load(&self) -> Result<Vec<Player>, StorageError> {
        if !self.path.exists() {
            debug!("No store at {:?}, starting empty", self.path);
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        let raw: Vec<serde_json::Value> = serde_json::from_str(&contents)?;

        let mut players = Vec::with_capacity(raw.len());
        for (i, value) in raw.into_iter().enumerate() {
            match serde_json::from_value::<StoredPlayer>(value) {
                Ok(stored) => players.push(stored.into_player()),
                Err(e) => {
                    warn!("Dropping invalid stored record at index {}: {}", i, e);
                }
            }
        }

        debug!("Loaded {} players from {:?}", players.len(), self.path);
        Ok(players)
    }

    /// Rewrite the whole file with the current collection.
    pub fn save(&self, players: &[Player]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(players)?;
        fs::write(&self.path, json)?;
        debug!("Saved {} players to {:?}", players.len(), self.path);
        Ok(())
    }
}

impl StoredPlayer {
    fn into_player(self) -> Player {
        let id = self.id.unwrap_or_else(|| {
            Player::id_for(
                self.name.trim(),
                self.team.trim(),
                self.format,
                self.runs,
                self.balls,
                self.fours,
                self.sixes,
            )
        });
        let created_at = self.created_at.unwrap_or_else(Utc::now);

        Player {
            id,
            name: self.name.trim().to_string(),
            team: self.team.trim().to_string(),
            format: self.format,
            runs: self.runs,
            balls: self.balls,
            fours: self.fours,
            sixes: self.sixes,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> JsonStore {
        let config = StorageConfig::new(dir.path().to_path_buf());
        JsonStore::new(&config)
    }

    fn sample() -> Player {
        Player::new(
            "Rohit Sharma".to_string(),
            "India".to_string(),
            MatchFormat::T20,
            50,
            30,
            4,
            2,
        )
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let players = vec![sample()];
        store.save(&players).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, players[0].id);
        assert_eq!(loaded[0].runs, 50);
    }

    #[test]
    fn test_save_creates_data_dir() {
        let dir = tempdir().unwrap();
        let config = StorageConfig::new(dir.path().join("nested"));
        let store = JsonStore::new(&config);
        store.save(&[sample()]).unwrap();
        assert!(config.players_file().exists());
    }

    #[test]
    fn test_loader_drops_type_invalid_elements() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let contents = r#"[
            {"name": "Good Player", "team": "India", "format": "T20",
             "runs": 10, "balls": 10, "fours": 1, "sixes": 0},
            {"name": 42, "team": "India", "format": "T20",
             "runs": 10, "balls": 10, "fours": 1, "sixes": 0},
            {"name": "Negative", "team": "India", "format": "T20",
             "runs": -5, "balls": 10, "fours": 0, "sixes": 0},
            {"name": "Bad Format", "team": "India", "format": "T5",
             "runs": 10, "balls": 10, "fours": 0, "sixes": 0}
        ]"#;
        std::fs::create_dir_all(dir.path()).unwrap();
        std::fs::write(store.path(), contents).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Good Player");
    }

    #[test]
    fn test_loader_keeps_semantically_invalid_records() {
        // Zero balls with nonzero runs fails the validator but the loader
        // enforces type checks only
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let contents = r#"[{"name": "Ghost Entry", "team": "Nowhere", "format": "ODI",
             "runs": 10, "balls": 0, "fours": 0, "sixes": 0}]"#;
        std::fs::write(store.path(), contents).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].runs, 10);
        assert_eq!(loaded[0].balls, 0);
    }

    #[test]
    fn test_loader_backfills_id_and_created_at() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let contents = r#"[{"name": "Rohit Sharma", "team": "India", "format": "T20",
             "runs": 50, "balls": 30, "fours": 4, "sixes": 2}]"#;
        std::fs::write(store.path(), contents).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        // Regenerated ID matches the deterministic tuple hash
        assert_eq!(loaded[0].id, sample().id);
    }
}

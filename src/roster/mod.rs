//! The player collection and its storage mirror.
//!
//! `Roster` owns the ordered in-memory list. Every mutation runs through
//! the validator first, then mirrors the collection to disk. A failed
//! mirror write is a warning, not a rollback: memory stays authoritative
//! and `last_save_error` records the drift until the next successful save.

use std::io::Read;

use thiserror::Error;
use tracing::{info, warn};

use crate::csv::{self, CsvError, ImportReport};
use crate::models::{MatchFormat, Player, PlayerDraft};
use crate::storage::JsonStore;
use crate::validate::{self, ValidationError};

/// Errors from roster mutations.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("no player with id {0}")]
    UnknownId(String),
}

/// The ordered player collection, owned by the application root.
#[derive(Debug)]
pub struct Roster {
    players: Vec<Player>,
    store: JsonStore,
    last_save_error: Option<String>,
}

impl Roster {
    /// Load the persisted collection through the defensive loader.
    pub fn load(store: JsonStore) -> Self {
        let players = match store.load() {
            Ok(players) => players,
            Err(e) => {
                warn!("Failed to load player store, starting empty: {}", e);
                Vec::new()
            }
        };
        info!("Roster loaded with {} players", players.len());

        Self {
            players,
            store,
            last_save_error: None,
        }
    }

    /// The full collection in insertion order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// The error from the most recent failed save, if the mirror is stale.
    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    /// Whether the last mutation reached disk.
    pub fn is_durable(&self) -> bool {
        self.last_save_error.is_none()
    }

    /// Validate and append a new record. Applies the duplicate layer.
    pub fn add(&mut self, draft: &PlayerDraft) -> Result<Player, RosterError> {
        let player = validate::validate_draft(draft)?;
        validate::validate_unique(&player, &self.players)?;

        self.players.push(player.clone());
        self.save();
        Ok(player)
    }

    /// Replace a record in place, keeping its position in the order.
    ///
    /// The ID is regenerated from the new tuple; the duplicate layer is
    /// skipped because re-submitting an unchanged record is a no-op edit,
    /// not a conflict.
    pub fn replace(&mut self, id: &str, draft: &PlayerDraft) -> Result<Player, RosterError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id.as_str() == id)
            .ok_or_else(|| RosterError::UnknownId(id.to_string()))?;

        let player = validate::validate_draft(draft)?;
        self.players[idx] = player.clone();
        self.save();
        Ok(player)
    }

    /// Remove a record by ID.
    pub fn remove(&mut self, id: &str) -> Result<Player, RosterError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id.as_str() == id)
            .ok_or_else(|| RosterError::UnknownId(id.to_string()))?;

        let removed = self.players.remove(idx);
        self.save();
        Ok(removed)
    }

    /// Remove every record. Returns how many were cleared.
    pub fn clear(&mut self) -> usize {
        let cleared = self.players.len();
        self.players.clear();
        self.save();
        cleared
    }

    /// Filtered view: case-insensitive name substring search, exact format,
    /// case-insensitive team. Filters compose; insertion order is kept.
    pub fn filter(
        &self,
        search: Option<&str>,
        format: Option<MatchFormat>,
        team: Option<&str>,
    ) -> Vec<&Player> {
        let search = search.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty());
        let team = team.map(|t| t.trim().to_lowercase()).filter(|t| !t.is_empty());

        self.players
            .iter()
            .filter(|p| {
                search
                    .as_deref()
                    .map_or(true, |s| p.name.to_lowercase().contains(s))
            })
            .filter(|p| format.map_or(true, |f| p.format == f))
            .filter(|p| team.as_deref().map_or(true, |t| p.team.to_lowercase() == t))
            .collect()
    }

    /// Import CSV rows, validating each independently.
    ///
    /// The duplicate layer sees the collection as it grows, so a duplicate
    /// later in the same file is caught. Not atomic: rows that validated
    /// before a bad row stay committed.
    pub fn import_csv<R: Read>(&mut self, input: R) -> Result<ImportReport, CsvError> {
        let rows = csv::parse(input)?;
        let mut report = ImportReport::default();

        for row in rows {
            match row.draft {
                Ok(draft) => match self.add(&draft) {
                    Ok(_) => report.imported += 1,
                    Err(e) => report.record_error(row.line, e.to_string()),
                },
                Err(reason) => report.record_error(row.line, reason),
            }
        }

        info!(
            "CSV import: {} imported, {} skipped",
            report.imported, report.skipped
        );
        Ok(report)
    }

    /// Export the full collection as CSV.
    pub fn export_csv(&self) -> Result<String, CsvError> {
        csv::export(&self.players)
    }

    fn save(&mut self) {
        match self.store.save(&self.players) {
            Ok(()) => self.last_save_error = None,
            Err(e) => {
                warn!("Failed to mirror roster to disk: {}", e);
                self.last_save_error = Some(e.to_string());
            }
        }
    }
}

//! Player record model and raw submission draft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::PlayerId;
use crate::calculate;

/// Match format a set of stats was recorded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchFormat {
    #[serde(rename = "T20")]
    T20,
    #[serde(rename = "ODI")]
    Odi,
    #[serde(rename = "Test")]
    Test,
}

impl MatchFormat {
    /// Canonical display spelling, also used in persisted JSON and CSV.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchFormat::T20 => "T20",
            MatchFormat::Odi => "ODI",
            MatchFormat::Test => "Test",
        }
    }

    /// All formats, in display order.
    pub fn all() -> [MatchFormat; 3] {
        [MatchFormat::T20, MatchFormat::Odi, MatchFormat::Test]
    }
}

impl fmt::Display for MatchFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MatchFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "t20" => Ok(MatchFormat::T20),
            "odi" => Ok(MatchFormat::Odi),
            "test" => Ok(MatchFormat::Test),
            other => Err(format!("unknown format: {}", other)),
        }
    }
}

/// A validated per-player stat line for one match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier (derived from the raw stat tuple)
    pub id: PlayerId,

    /// Player name, trimmed
    pub name: String,

    /// Team name, trimmed
    pub team: String,

    /// Match format
    pub format: MatchFormat,

    /// Runs scored
    pub runs: u32,

    /// Balls faced
    pub balls: u32,

    /// Fours hit
    pub fours: u32,

    /// Sixes hit
    pub sixes: u32,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl Player {
    /// Create a new Player with auto-generated ID.
    ///
    /// Callers are expected to have validated the fields first; this
    /// constructor only normalizes and hashes.
    pub fn new(
        name: String,
        team: String,
        format: MatchFormat,
        runs: u32,
        balls: u32,
        fours: u32,
        sixes: u32,
    ) -> Self {
        let name = name.trim().to_string();
        let team = team.trim().to_string();
        let id = Self::id_for(&name, &team, format, runs, balls, fours, sixes);

        Self {
            id,
            name,
            team,
            format,
            runs,
            balls,
            fours,
            sixes,
            created_at: Utc::now(),
        }
    }

    /// The deterministic ID for a raw stat tuple.
    pub fn id_for(
        name: &str,
        team: &str,
        format: MatchFormat,
        runs: u32,
        balls: u32,
        fours: u32,
        sixes: u32,
    ) -> PlayerId {
        PlayerId::generate(&[
            name,
            team,
            format.as_str(),
            &runs.to_string(),
            &balls.to_string(),
            &fours.to_string(),
            &sixes.to_string(),
        ])
    }

    /// Builder method to pin the creation timestamp (used by the loader).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Strike rate: runs per 100 balls, rounded to 2 decimals. 0.00 at zero balls.
    pub fn strike_rate(&self) -> f64 {
        calculate::strike_rate(self.runs, self.balls)
    }

    /// Total boundaries hit (fours + sixes).
    pub fn boundaries(&self) -> u32 {
        self.fours + self.sixes
    }

    /// Runs accounted for by boundaries.
    pub fn boundary_runs(&self) -> u32 {
        self.fours * 4 + self.sixes * 6
    }

    /// Share of runs scored in boundaries, as a percentage (1 decimal).
    pub fn boundary_percent(&self) -> f64 {
        calculate::boundary_percent(self.fours, self.sixes, self.runs)
    }

    /// Weighted best-performer score.
    pub fn composite_score(&self) -> f64 {
        calculate::composite_score(self)
    }
}

/// Raw candidate fields as submitted, before validation.
///
/// Every field is a string: this is what arrives from a form, a CSV row,
/// or CLI arguments. The validator turns a draft into a [`Player`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerDraft {
    pub name: String,
    pub team: String,
    pub format: String,
    pub runs: String,
    pub balls: String,
    pub fours: String,
    pub sixes: String,
}

impl PlayerDraft {
    /// Convenience constructor, mostly for tests and the CLI.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        team: &str,
        format: &str,
        runs: &str,
        balls: &str,
        fours: &str,
        sixes: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            team: team.to_string(),
            format: format.to_string(),
            runs: runs.to_string(),
            balls: balls.to_string(),
            fours: fours.to_string(),
            sixes: sixes.to_string(),
        }
    }
}

//! Player stat validation.
//!
//! Turns a raw [`PlayerDraft`] into an accepted [`Player`] or a rejection
//! with a human-readable reason. Checks run in a fixed order and the first
//! failure wins, so a draft that breaks several rules reports the earliest
//! one. Pure: no side effects, no I/O.

use std::str::FromStr;
use thiserror::Error;

use crate::models::{MatchFormat, Player, PlayerDraft};

/// Name/team length bounds after trimming.
const MIN_TEXT_LEN: usize = 2;
const MAX_TEXT_LEN: usize = 100;

/// Reasons a draft can be rejected.
///
/// The `Display` text is the message surfaced to the user, so it is written
/// in plain language rather than field-dump form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} must be a whole number")]
    NotWholeNumber(&'static str),

    #[error("{0} must be non-negative")]
    Negative(&'static str),

    #[error("{0} is unreasonably large")]
    OutOfRange(&'static str),

    #[error("unknown format: {0} (expected T20, ODI, or Test)")]
    UnknownFormat(String),

    #[error("{0} must be between 2 and 100 characters")]
    BadTextLength(&'static str),

    #[error("name must not contain digits")]
    DigitsInName,

    #[error("boundaries cannot exceed balls faced ({fours} fours + {sixes} sixes > {balls} balls)")]
    TooManyBoundaries { fours: u32, sixes: u32, balls: u32 },

    #[error("runs cannot be less than boundary runs ({runs} < {boundary_runs})")]
    RunsBelowBoundaries { runs: u32, boundary_runs: u64 },

    #[error("cannot score runs without facing any balls")]
    RunsWithoutBalls,

    #[error("runs exceed the maximum possible from {balls} balls ({runs} > {max_runs})")]
    RunsAboveMaximum {
        runs: u32,
        balls: u32,
        max_runs: u64,
    },

    #[error("identical record already exists for {name}")]
    Duplicate { name: String },
}

/// Validate a raw draft and build the normalized record.
///
/// Applies every check except the duplicate layer, which needs the existing
/// collection and lives in [`validate_unique`].
pub fn validate_draft(draft: &PlayerDraft) -> Result<Player, ValidationError> {
    let runs = parse_counter("runs", &draft.runs)?;
    let balls = parse_counter("balls", &draft.balls)?;
    let fours = parse_counter("fours", &draft.fours)?;
    let sixes = parse_counter("sixes", &draft.sixes)?;

    let format = MatchFormat::from_str(&draft.format)
        .map_err(|_| ValidationError::UnknownFormat(draft.format.trim().to_string()))?;

    let name = validate_text("name", &draft.name)?;
    if name.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::DigitsInName);
    }
    let team = validate_text("team", &draft.team)?;

    // Bound checks run in u64: counters up to u32::MAX are parseable and
    // must not overflow the arithmetic here.
    if fours as u64 + sixes as u64 > balls as u64 {
        return Err(ValidationError::TooManyBoundaries {
            fours,
            sixes,
            balls,
        });
    }

    let boundary_runs = fours as u64 * 4 + sixes as u64 * 6;
    if (runs as u64) < boundary_runs {
        return Err(ValidationError::RunsBelowBoundaries {
            runs,
            boundary_runs,
        });
    }

    if balls == 0 && runs > 0 {
        return Err(ValidationError::RunsWithoutBalls);
    }

    // Boundary-aware cap: non-boundary balls can score at most 6 each.
    // Tighter than the flat balls*6 cap for any innings with a four.
    let max_runs = boundary_runs + (balls as u64 - fours as u64 - sixes as u64) * 6;
    if runs as u64 > max_runs {
        return Err(ValidationError::RunsAboveMaximum {
            runs,
            balls,
            max_runs,
        });
    }

    Ok(Player::new(name, team, format, runs, balls, fours, sixes))
}

/// Duplicate layer: reject a candidate whose raw tuple is already recorded.
///
/// Used by add and import; edits skip it because replacing a record with
/// itself is a no-op, not a conflict.
pub fn validate_unique(candidate: &Player, existing: &[Player]) -> Result<(), ValidationError> {
    if existing.iter().any(|p| p.id == candidate.id) {
        return Err(ValidationError::Duplicate {
            name: candidate.name.clone(),
        });
    }
    Ok(())
}

fn parse_counter(field: &'static str, raw: &str) -> Result<u32, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::NotWholeNumber(field));
    }
    match trimmed.parse::<i64>() {
        Ok(n) if n < 0 => Err(ValidationError::Negative(field)),
        Ok(n) => u32::try_from(n).map_err(|_| ValidationError::OutOfRange(field)),
        Err(_) => Err(ValidationError::NotWholeNumber(field)),
    }
}

fn validate_text(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if !(MIN_TEXT_LEN..=MAX_TEXT_LEN).contains(&len) {
        return Err(ValidationError::BadTextLength(field));
    }
    Ok(trimmed.to_string())
}

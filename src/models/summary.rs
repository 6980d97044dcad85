//! Dashboard summary aggregates.

use serde::{Deserialize, Serialize};

/// Roster-wide aggregates shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterSummary {
    /// Number of recorded players
    pub total_players: u32,

    /// Sum of runs across all players
    pub total_runs: u64,

    /// Mean strike rate, rounded to 2 decimals (0.00 for an empty roster)
    pub average_strike_rate: f64,

    /// Sum of fours and sixes across all players
    pub total_boundaries: u32,
}

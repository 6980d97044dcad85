//! Derived metrics and ranking.
//!
//! Computes everything the UI shows that is not a raw counter:
//! - Strike rate, boundary percentage, composite best-performer score
//! - Leaderboard ranking with podium split
//! - Dashboard summary aggregates

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::{Player, RosterSummary};

/// Strike rate: runs per 100 balls, rounded to 2 decimals.
/// Zero balls yields the 0.00 sentinel for every runs value.
pub fn strike_rate(runs: u32, balls: u32) -> f64 {
    if balls == 0 {
        0.0
    } else {
        round2(runs as f64 / balls as f64 * 100.0)
    }
}

/// Format a strike rate for display with exactly 2 decimals.
pub fn format_strike_rate(rate: f64) -> String {
    format!("{:.2}", rate)
}

/// Share of runs scored in boundaries, as a percentage rounded to 1 decimal.
/// Zero runs yields 0.0.
pub fn boundary_percent(fours: u32, sixes: u32, runs: u32) -> f64 {
    if runs == 0 {
        0.0
    } else {
        let boundary_runs = fours as f64 * 4.0 + sixes as f64 * 6.0;
        round1(boundary_runs / runs as f64 * 100.0)
    }
}

/// Weighted score used to pick the default Player of the Match.
pub fn composite_score(player: &Player) -> f64 {
    player.runs as f64
        + player.strike_rate() * 0.5
        + player.fours as f64 * 0.5
        + player.sixes as f64
}

/// Pick the best performer by composite score.
///
/// A reduce-style scan where only a strictly greater score takes over, so
/// ties go to the first player in insertion order.
pub fn best_performer(players: &[Player]) -> Option<&Player> {
    let mut best: Option<(&Player, f64)> = None;
    for player in players {
        let score = composite_score(player);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((player, score)),
        }
    }
    best.map(|(p, _)| p)
}

/// Metric a leaderboard can be ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeaderboardMetric {
    Runs,
    StrikeRate,
    Boundaries,
    BoundaryPercent,
}

impl LeaderboardMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaderboardMetric::Runs => "runs",
            LeaderboardMetric::StrikeRate => "strike-rate",
            LeaderboardMetric::Boundaries => "boundaries",
            LeaderboardMetric::BoundaryPercent => "boundary-percent",
        }
    }
}

impl fmt::Display for LeaderboardMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LeaderboardMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "runs" => Ok(LeaderboardMetric::Runs),
            "strike-rate" | "strike_rate" => Ok(LeaderboardMetric::StrikeRate),
            "boundaries" => Ok(LeaderboardMetric::Boundaries),
            "boundary-percent" | "boundary_percent" => Ok(LeaderboardMetric::BoundaryPercent),
            other => Err(format!("unknown leaderboard metric: {}", other)),
        }
    }
}

/// One row of a ranked leaderboard.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub id: String,
    pub name: String,
    pub team: String,
    pub value: f64,
    pub display: String,
}

/// A ranked view of the collection: top 3 podium plus the remainder.
#[derive(Debug, Serialize)]
pub struct Leaderboard {
    pub metric: LeaderboardMetric,
    pub podium: Vec<LeaderboardEntry>,
    pub ranked: Vec<LeaderboardEntry>,
}

/// Rank the full collection descending by a metric.
///
/// The sort is stable, so players with equal metric values keep insertion
/// order. A zero-ball record with nonzero runs (invalid on entry, but
/// tolerated when it arrives via hand-edited storage) ranks ahead of every
/// finite strike rate; its displayed value stays the finite sentinel.
pub fn rank(players: &[Player], metric: LeaderboardMetric) -> Leaderboard {
    let mut order: Vec<(usize, f64)> = players
        .iter()
        .enumerate()
        .map(|(i, p)| (i, ranking_key(p, metric)))
        .collect();
    order.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let mut podium = Vec::new();
    let mut ranked = Vec::new();
    for (pos, (idx, _)) in order.into_iter().enumerate() {
        let entry = make_entry(pos as u32 + 1, &players[idx], metric);
        if pos < 3 {
            podium.push(entry);
        } else {
            ranked.push(entry);
        }
    }

    Leaderboard {
        metric,
        podium,
        ranked,
    }
}

/// Dashboard aggregates over the whole collection.
pub fn summarize(players: &[Player]) -> RosterSummary {
    let total_players = players.len() as u32;
    let total_runs: u64 = players.iter().map(|p| p.runs as u64).sum();
    let total_boundaries: u32 = players.iter().map(|p| p.boundaries()).sum();
    let average_strike_rate = if players.is_empty() {
        0.0
    } else {
        let sum: f64 = players.iter().map(|p| p.strike_rate()).sum();
        round2(sum / players.len() as f64)
    };

    RosterSummary {
        total_players,
        total_runs,
        average_strike_rate,
        total_boundaries,
    }
}

fn ranking_key(player: &Player, metric: LeaderboardMetric) -> f64 {
    match metric {
        LeaderboardMetric::Runs => player.runs as f64,
        LeaderboardMetric::StrikeRate => {
            if player.balls == 0 && player.runs > 0 {
                f64::INFINITY
            } else {
                player.strike_rate()
            }
        }
        LeaderboardMetric::Boundaries => player.boundaries() as f64,
        LeaderboardMetric::BoundaryPercent => player.boundary_percent(),
    }
}

fn make_entry(rank: u32, player: &Player, metric: LeaderboardMetric) -> LeaderboardEntry {
    let (value, display) = match metric {
        LeaderboardMetric::Runs => (player.runs as f64, format!("{} runs", player.runs)),
        LeaderboardMetric::StrikeRate => {
            let sr = player.strike_rate();
            (sr, format!("{} SR", format_strike_rate(sr)))
        }
        LeaderboardMetric::Boundaries => (
            player.boundaries() as f64,
            format!("{} boundaries", player.boundaries()),
        ),
        LeaderboardMetric::BoundaryPercent => {
            let pct = player.boundary_percent();
            (pct, format!("{:.1}% in boundaries", pct))
        }
    };

    LeaderboardEntry {
        rank,
        id: player.id.to_string(),
        name: player.name.clone(),
        team: player.team.clone(),
        value,
        display,
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchFormat;

    fn player(name: &str, runs: u32, balls: u32, fours: u32, sixes: u32) -> Player {
        Player::new(
            name.to_string(),
            "India".to_string(),
            MatchFormat::T20,
            runs,
            balls,
            fours,
            sixes,
        )
    }

    #[test]
    fn test_strike_rate() {
        assert_eq!(strike_rate(100, 50), 200.0);
        assert_eq!(strike_rate(0, 10), 0.0);
        assert!((strike_rate(50, 30) - 166.67).abs() < 1e-9);
    }

    #[test]
    fn test_strike_rate_zero_balls_sentinel() {
        assert_eq!(strike_rate(0, 0), 0.0);
        assert_eq!(strike_rate(10, 0), 0.0);
        assert_eq!(strike_rate(u32::MAX, 0), 0.0);
    }

    #[test]
    fn test_format_strike_rate() {
        assert_eq!(format_strike_rate(strike_rate(100, 50)), "200.00");
        assert_eq!(format_strike_rate(strike_rate(0, 10)), "0.00");
        assert_eq!(format_strike_rate(strike_rate(50, 30)), "166.67");
    }

    #[test]
    fn test_boundary_percent() {
        assert_eq!(boundary_percent(0, 0, 0), 0.0);
        assert_eq!(boundary_percent(4, 2, 50), 56.0);
        assert_eq!(boundary_percent(0, 0, 10), 0.0);
        // Over 100% is possible only on tolerated hand-edited records
        assert_eq!(boundary_percent(1, 0, 3), 133.3);
    }

    #[test]
    fn test_composite_score() {
        let p = player("A B", 50, 30, 4, 2);
        // 50 + 166.67*0.5 + 4*0.5 + 2 = 137.335
        assert!((composite_score(&p) - 137.335).abs() < 1e-9);
    }

    #[test]
    fn test_best_performer_first_wins_on_tie() {
        let a = player("First", 50, 30, 4, 2);
        let b = player("Second", 50, 30, 4, 2);
        let players = vec![a, b];
        assert_eq!(best_performer(&players).unwrap().name, "First");
    }

    #[test]
    fn test_best_performer_empty() {
        assert!(best_performer(&[]).is_none());
    }

    #[test]
    fn test_metric_parse() {
        assert_eq!(
            "strike-rate".parse::<LeaderboardMetric>().unwrap(),
            LeaderboardMetric::StrikeRate
        );
        assert_eq!(
            "BOUNDARY-PERCENT".parse::<LeaderboardMetric>().unwrap(),
            LeaderboardMetric::BoundaryPercent
        );
        assert!("wickets".parse::<LeaderboardMetric>().is_err());
    }

    #[test]
    fn test_rank_by_runs_stable() {
        let players = vec![
            player("A B", 40, 30, 2, 1),
            player("C D", 60, 40, 3, 2),
            player("E F", 40, 35, 4, 0),
            player("G H", 10, 10, 0, 0),
        ];
        let board = rank(&players, LeaderboardMetric::Runs);

        assert_eq!(board.podium.len(), 3);
        assert_eq!(board.ranked.len(), 1);
        assert_eq!(board.podium[0].name, "C D");
        // Equal runs keep insertion order: A B before E F
        assert_eq!(board.podium[1].name, "A B");
        assert_eq!(board.podium[2].name, "E F");
        assert_eq!(board.ranked[0].name, "G H");
        assert_eq!(board.ranked[0].rank, 4);
    }

    #[test]
    fn test_rank_small_roster_fills_podium_only() {
        let players = vec![player("A B", 40, 30, 2, 1)];
        let board = rank(&players, LeaderboardMetric::Runs);
        assert_eq!(board.podium.len(), 1);
        assert!(board.ranked.is_empty());
    }

    #[test]
    fn test_rank_strike_rate_infinite_first() {
        // Zero balls, nonzero runs: rejected by the validator but tolerated
        // when loaded from hand-edited storage. Must outrank every finite SR.
        let ghost = player("Ghost Entry", 10, 0, 0, 0);
        let fast = player("Fast Scorer", 100, 40, 10, 6);
        let players = vec![fast, ghost];

        let board = rank(&players, LeaderboardMetric::StrikeRate);
        assert_eq!(board.podium[0].name, "Ghost Entry");
        // Displayed value stays the finite sentinel
        assert_eq!(board.podium[0].display, "0.00 SR");
        assert_eq!(board.podium[1].name, "Fast Scorer");
    }

    #[test]
    fn test_summarize() {
        let players = vec![player("A B", 50, 30, 4, 2), player("C D", 30, 30, 2, 0)];
        let s = summarize(&players);
        assert_eq!(s.total_players, 2);
        assert_eq!(s.total_runs, 80);
        assert_eq!(s.total_boundaries, 8);
        // (166.67 + 100.00) / 2 = 133.34 (rounded strike rates averaged)
        assert!((s.average_strike_rate - 133.34).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_empty() {
        let s = summarize(&[]);
        assert_eq!(s.total_players, 0);
        assert_eq!(s.average_strike_rate, 0.0);
    }
}

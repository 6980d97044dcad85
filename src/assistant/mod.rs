//! Rule-based query assistant.
//!
//! Answers canned questions over the in-memory collection. Keyword intents
//! are matched in a fixed precedence order; the first match wins.
//! Deterministic, no I/O: answers are plain multi-line strings.

use regex::Regex;

use crate::calculate::{self, format_strike_rate};
use crate::models::Player;

/// Default list length when the query names no count.
const DEFAULT_TOP_N: usize = 5;

const CAPABILITIES: &str = "I can help with:\n\
    • Top scorers\n\
    • Strike rate leaders\n\
    • Boundary stats\n\
    • Player of the Match picks";

/// Answer a free-text query over the collection.
pub fn respond(players: &[Player], query: &str) -> String {
    let query = query.to_lowercase();

    if players.is_empty() {
        return "No player data available yet. Add some players first!".to_string();
    }

    let n = top_n(&query);

    if query.contains("top") && (query.contains("run") || query.contains("scorer")) {
        let mut sorted: Vec<&Player> = players.iter().collect();
        sorted.sort_by(|a, b| b.runs.cmp(&a.runs));
        return listing("Top Run Scorers", &sorted, n, |p| format!("{} runs", p.runs));
    }

    if query.contains("strike") {
        let mut sorted: Vec<&Player> = players.iter().collect();
        sorted.sort_by(|a, b| {
            b.strike_rate()
                .partial_cmp(&a.strike_rate())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        return listing("Top Strike Rates", &sorted, n, |p| {
            format!("{} SR", format_strike_rate(p.strike_rate()))
        });
    }

    if query.contains("boundar") {
        let mut sorted: Vec<&Player> = players.iter().collect();
        sorted.sort_by(|a, b| b.boundaries().cmp(&a.boundaries()));
        return listing("Top Boundary Hitters", &sorted, n, |p| {
            format!("{} boundaries", p.boundaries())
        });
    }

    if query.contains("best") || query.contains("player of the match") || query.contains("potm") {
        if let Some(best) = calculate::best_performer(players) {
            return format!(
                "Player of the Match: {} ({}) — {} runs at {} SR, composite score {:.1}",
                best.name,
                best.team,
                best.runs,
                format_strike_rate(best.strike_rate()),
                best.composite_score()
            );
        }
    }

    if query.contains("compare") {
        return "To compare players, check the leaderboard views for each metric!".to_string();
    }

    if query.contains("help") || query.contains("what can you do") {
        return format!(
            "{}\n\nTry asking: 'Show top 5 scorers' or 'Who has the best strike rate?'",
            CAPABILITIES
        );
    }

    format!("{}\n\nAsk me something specific!", CAPABILITIES)
}

/// Extract N from "top N", defaulting when absent.
fn top_n(query: &str) -> usize {
    let re = Regex::new(r"top\s+(\d+)").unwrap();
    re.captures(query)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_TOP_N)
}

fn listing<F>(title: &str, sorted: &[&Player], n: usize, value: F) -> String
where
    F: Fn(&Player) -> String,
{
    let body = sorted
        .iter()
        .take(n)
        .enumerate()
        .map(|(i, p)| format!("{}. {} - {}", i + 1, p.name, value(p)))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{}:\n{}", title, body)
}

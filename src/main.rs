use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crease::api::{build_router, state::AppState};
use crease::assistant;
use crease::calculate::{self, LeaderboardMetric};
use crease::config::AppConfig;
use crease::models::PlayerDraft;
use crease::roster::{Roster, RosterError};
use crease::storage::{JsonStore, StorageConfig};

#[derive(Parser)]
#[command(name = "crease")]
#[command(about = "Local cricket performance tracker with validated stats")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error; overrides the config file)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a player's match stats
    Add {
        name: String,
        team: String,
        /// Match format: T20, ODI, or Test
        format: String,
        runs: String,
        balls: String,
        #[arg(default_value = "0")]
        fours: String,
        #[arg(default_value = "0")]
        sixes: String,
    },

    /// List recorded players
    List {
        /// Case-insensitive name substring
        #[arg(long)]
        search: Option<String>,

        /// Exact format filter (T20, ODI, Test)
        #[arg(long)]
        format: Option<String>,

        /// Case-insensitive team filter
        #[arg(long)]
        team: Option<String>,
    },

    /// Remove a player record by ID
    Remove { id: String },

    /// Remove every player record
    Clear {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },

    /// Import player records from a CSV file
    Import { path: PathBuf },

    /// Export all player records to a CSV file
    Export { path: PathBuf },

    /// Show the leaderboard for a metric
    Leaderboard {
        /// runs, strike-rate, boundaries, or boundary-percent
        #[arg(long, default_value = "runs")]
        metric: String,

        /// Limit the list below the podium
        #[arg(long)]
        top: Option<usize>,
    },

    /// Pick the best performer by composite score
    Best,

    /// Show roster-wide aggregates
    Summary,

    /// Ask the assistant a question
    Ask { query: String },

    /// Start the API server
    Serve {
        /// Bind address (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = Path::new(&cli.config);
    let mut config = if config_path.exists() {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::default()
    };
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone();
    }

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let storage = StorageConfig::new(config.data_dir.clone());
    let mut roster = Roster::load(JsonStore::new(&storage));

    match cli.command {
        Commands::Add {
            name,
            team,
            format,
            runs,
            balls,
            fours,
            sixes,
        } => {
            let draft = PlayerDraft {
                name,
                team,
                format,
                runs,
                balls,
                fours,
                sixes,
            };
            match roster.add(&draft) {
                Ok(player) => {
                    println!(
                        "Added {} ({}) — {} runs off {} balls, SR {}",
                        player.name,
                        player.id,
                        player.runs,
                        player.balls,
                        calculate::format_strike_rate(player.strike_rate())
                    );
                    warn_if_not_durable(&roster);
                }
                Err(e) => report_rejection(e),
            }
        }

        Commands::List {
            search,
            format,
            team,
        } => {
            let format = match format.as_deref() {
                Some(raw) => Some(raw.parse().map_err(anyhow::Error::msg)?),
                None => None,
            };
            let players = roster.filter(search.as_deref(), format, team.as_deref());
            if players.is_empty() {
                println!("No players match.");
            } else {
                println!(
                    "{:<16}  {:<22}  {:<14}  {:<6}  {:>5}  {:>5}  {:>5}  {:>5}  {:>8}",
                    "ID", "NAME", "TEAM", "FMT", "RUNS", "BALLS", "4s", "6s", "SR"
                );
                for p in players {
                    println!(
                        "{:<16}  {:<22}  {:<14}  {:<6}  {:>5}  {:>5}  {:>5}  {:>5}  {:>8}",
                        p.id,
                        p.name,
                        p.team,
                        p.format.as_str(),
                        p.runs,
                        p.balls,
                        p.fours,
                        p.sixes,
                        calculate::format_strike_rate(p.strike_rate())
                    );
                }
            }
        }

        Commands::Remove { id } => match roster.remove(&id) {
            Ok(removed) => {
                println!("Removed {} ({})", removed.name, removed.id);
                warn_if_not_durable(&roster);
            }
            Err(e) => report_rejection(e),
        },

        Commands::Clear { yes } => {
            if !yes {
                println!("Refusing to clear {} players without --yes", roster.len());
            } else {
                let cleared = roster.clear();
                println!("Cleared {} players", cleared);
                warn_if_not_durable(&roster);
            }
        }

        Commands::Import { path } => {
            let file = std::fs::File::open(&path)?;
            let report = roster.import_csv(file)?;
            println!(
                "Imported {} players, skipped {} rows",
                report.imported, report.skipped
            );
            for error in &report.errors {
                println!("  line {}: {}", error.line, error.reason);
            }
            warn_if_not_durable(&roster);
        }

        Commands::Export { path } => {
            let csv = roster.export_csv()?;
            std::fs::write(&path, csv)?;
            println!("Exported {} players to {}", roster.len(), path.display());
        }

        Commands::Leaderboard { metric, top } => {
            let metric: LeaderboardMetric = metric.parse().map_err(anyhow::Error::msg)?;
            let board = calculate::rank(roster.players(), metric);
            if board.podium.is_empty() {
                println!("No players recorded yet.");
            } else {
                println!("Leaderboard by {}", metric);
                println!("Podium:");
                for entry in &board.podium {
                    println!(
                        "  {}. {} ({}) — {}",
                        entry.rank, entry.name, entry.team, entry.display
                    );
                }
                let limit = top.unwrap_or(board.ranked.len());
                if limit > 0 && !board.ranked.is_empty() {
                    println!("Field:");
                    for entry in board.ranked.iter().take(limit) {
                        println!(
                            "  {}. {} ({}) — {}",
                            entry.rank, entry.name, entry.team, entry.display
                        );
                    }
                }
            }
        }

        Commands::Best => match calculate::best_performer(roster.players()) {
            Some(best) => {
                println!(
                    "Player of the Match: {} ({}) — {} runs at {} SR, composite score {:.1}",
                    best.name,
                    best.team,
                    best.runs,
                    calculate::format_strike_rate(best.strike_rate()),
                    best.composite_score()
                );
            }
            None => println!("No players recorded yet."),
        },

        Commands::Summary => {
            let summary = calculate::summarize(roster.players());
            println!("Players:             {}", summary.total_players);
            println!("Total runs:          {}", summary.total_runs);
            println!("Average strike rate: {:.2}", summary.average_strike_rate);
            println!("Total boundaries:    {}", summary.total_boundaries);
        }

        Commands::Ask { query } => {
            println!("{}", assistant::respond(roster.players(), &query));
        }

        Commands::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);

            let state = AppState::new(roster);
            let app = build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Serving on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

/// Domain rejections are user feedback, not process failures: print the
/// reason and exit 0.
fn report_rejection(e: RosterError) {
    println!("Rejected: {}", e);
}

fn warn_if_not_durable(roster: &Roster) {
    if let Some(err) = roster.last_save_error() {
        eprintln!(
            "Warning: change applied in memory but not saved to disk: {}",
            err
        );
    }
}

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::assistant;
use crate::calculate::{self, Leaderboard, LeaderboardMetric};
use crate::models::RosterSummary;

use super::players::PlayerView;

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub metric: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct AssistantResponse {
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct BestResponse {
    pub player: PlayerView,
    pub composite_score: f64,
}

pub async fn leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<Leaderboard>, ApiError> {
    let metric = match params.metric.as_deref() {
        Some(raw) => LeaderboardMetric::from_str(raw).map_err(ApiError::BadRequest)?,
        None => LeaderboardMetric::Runs,
    };

    let roster = state.roster.read().await;
    Ok(Json(calculate::rank(roster.players(), metric)))
}

pub async fn summary(State(state): State<AppState>) -> Json<RosterSummary> {
    let roster = state.roster.read().await;
    Json(calculate::summarize(roster.players()))
}

pub async fn best(State(state): State<AppState>) -> Result<Json<BestResponse>, ApiError> {
    let roster = state.roster.read().await;
    let player = calculate::best_performer(roster.players())
        .ok_or_else(|| ApiError::NotFound("No players recorded yet".to_string()))?;

    Ok(Json(BestResponse {
        player: PlayerView::from_player(player),
        composite_score: player.composite_score(),
    }))
}

pub async fn assistant(
    State(state): State<AppState>,
    Json(request): Json<AssistantRequest>,
) -> Json<AssistantResponse> {
    let roster = state.roster.read().await;
    Json(AssistantResponse {
        reply: assistant::respond(roster.players(), &request.query),
    })
}

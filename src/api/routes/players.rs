use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::api::state::AppState;
use crate::api::{ApiError, Pagination, PaginationMeta};
use crate::calculate::format_strike_rate;
use crate::models::{MatchFormat, Player, PlayerDraft};
use crate::roster::RosterError;
use crate::validate::ValidationError;

#[derive(Debug, Deserialize)]
pub struct ListPlayersParams {
    pub search: Option<String>,
    pub format: Option<String>,
    pub team: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// A player record as rendered to API clients, raw counters plus the
/// derived metrics the table shows.
#[derive(Debug, Serialize)]
pub struct PlayerView {
    pub id: String,
    pub name: String,
    pub team: String,
    pub format: String,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub strike_rate: String,
    pub boundaries: u32,
    pub boundary_percent: f64,
    pub created_at: String,
}

impl PlayerView {
    pub fn from_player(p: &Player) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            team: p.team.clone(),
            format: p.format.as_str().to_string(),
            runs: p.runs,
            balls: p.balls,
            fours: p.fours,
            sixes: p.sixes,
            strike_rate: format_strike_rate(p.strike_rate()),
            boundaries: p.boundaries(),
            boundary_percent: p.boundary_percent(),
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlayerListResponse {
    pub players: Vec<PlayerView>,
    pub pagination: PaginationMeta,
}

/// Response to a mutating call. `durable` is false when the in-memory
/// mutation succeeded but the mirror write failed.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub player: PlayerView,
    pub durable: bool,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub cleared: usize,
    pub durable: bool,
}

pub async fn list_players(
    State(state): State<AppState>,
    Query(params): Query<ListPlayersParams>,
) -> Result<Json<PlayerListResponse>, ApiError> {
    let format = match params.format.as_deref() {
        Some(raw) => Some(
            MatchFormat::from_str(raw).map_err(ApiError::BadRequest)?,
        ),
        None => None,
    };

    let roster = state.roster.read().await;
    let filtered = roster.filter(params.search.as_deref(), format, params.team.as_deref());

    let pagination = Pagination::new(params.page, params.page_size);
    let total_items = filtered.len() as u32;
    let meta = PaginationMeta::new(&pagination, total_items);

    let start = pagination.offset() as usize;
    let end = (start + pagination.page_size as usize).min(filtered.len());
    let page = if start < filtered.len() {
        &filtered[start..end]
    } else {
        &[]
    };

    let players = page.iter().map(|p| PlayerView::from_player(p)).collect();

    Ok(Json(PlayerListResponse {
        players,
        pagination: meta,
    }))
}

pub async fn create_player(
    State(state): State<AppState>,
    Json(draft): Json<PlayerDraft>,
) -> Result<(StatusCode, Json<MutationResponse>), ApiError> {
    let mut roster = state.roster.write().await;
    let player = roster.add(&draft).map_err(map_roster_error)?;
    let durable = roster.is_durable();

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            player: PlayerView::from_player(&player),
            durable,
        }),
    ))
}

pub async fn replace_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<PlayerDraft>,
) -> Result<Json<MutationResponse>, ApiError> {
    let mut roster = state.roster.write().await;
    let player = roster.replace(&id, &draft).map_err(map_roster_error)?;
    let durable = roster.is_durable();

    Ok(Json(MutationResponse {
        player: PlayerView::from_player(&player),
        durable,
    }))
}

pub async fn delete_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MutationResponse>, ApiError> {
    let mut roster = state.roster.write().await;
    let removed = roster.remove(&id).map_err(map_roster_error)?;
    let durable = roster.is_durable();

    Ok(Json(MutationResponse {
        player: PlayerView::from_player(&removed),
        durable,
    }))
}

pub async fn clear_players(
    State(state): State<AppState>,
) -> Result<Json<ClearResponse>, ApiError> {
    let mut roster = state.roster.write().await;
    let cleared = roster.clear();
    let durable = roster.is_durable();

    Ok(Json(ClearResponse { cleared, durable }))
}

fn map_roster_error(e: RosterError) -> ApiError {
    match e {
        RosterError::Invalid(ValidationError::Duplicate { .. }) => ApiError::Conflict(e.to_string()),
        RosterError::Invalid(_) => ApiError::BadRequest(e.to_string()),
        RosterError::UnknownId(_) => ApiError::NotFound(e.to_string()),
    }
}

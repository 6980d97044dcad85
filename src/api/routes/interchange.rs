use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::csv::ImportReport;

/// Import outcome plus whether the final state reached disk.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    #[serde(flatten)]
    pub report: ImportReport,
    pub durable: bool,
}

pub async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let roster = state.roster.read().await;
    let body = roster
        .export_csv()
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"players.csv\"",
            ),
        ],
        body,
    ))
}

pub async fn import_csv(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportResponse>, ApiError> {
    let mut roster = state.roster.write().await;
    let report = roster
        .import_csv(body.as_bytes())
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let durable = roster.is_durable();

    Ok(Json(ImportResponse { report, durable }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::build_router;
    use crate::models::PlayerDraft;
    use crate::roster::Roster;
    use crate::storage::{JsonStore, StorageConfig};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::util::ServiceExt;

    fn test_state() -> (AppState, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig::new(dir.path().to_path_buf());
        (AppState::new(Roster::load(JsonStore::new(&config))), dir)
    }

    #[tokio::test]
    async fn test_export_content_type_and_body() {
        let (state, _dir) = test_state();
        state
            .roster
            .write()
            .await
            .add(&PlayerDraft::new(
                "Rohit Sharma",
                "India",
                "T20",
                "50",
                "30",
                "4",
                "2",
            ))
            .unwrap();

        let resp = build_router(state)
            .oneshot(
                Request::builder()
                    .uri("/api/export")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/csv"));

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.starts_with("name,team,runs,balls,fours,sixes,format,strike_rate"));
        assert!(text.contains("Rohit Sharma,India,50,30,4,2,T20,166.67"));
    }

    #[tokio::test]
    async fn test_import_reports_row_errors() {
        let (state, _dir) = test_state();
        let csv = "\
name,team,runs,balls,fours,sixes,format
Rohit Sharma,India,50,30,4,2,T20
Bad Row,India,5,2,1,1,T20
";

        let resp = build_router(state.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/import")
                    .header("content-type", "text/csv")
                    .body(Body::from(csv))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["imported"], 1);
        assert_eq!(json["skipped"], 1);
        assert_eq!(json["errors"][0]["line"], 3);
        assert_eq!(json["durable"], true);

        assert_eq!(state.roster.read().await.len(), 1);
    }
}

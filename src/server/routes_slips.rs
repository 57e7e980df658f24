//! # Voter Slip Endpoint
//!
//! `GET /voters/{id}/slip` — per-voter registration slip. The PDF renderer is
//! not implemented; the endpoint looks up the voter and returns a placeholder
//! payload carrying the record, so clients can already wire up the flow.

use super::AppState;
use axum::extract::{Path as AxumPath, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;
use tracing::error;

/// `GET /voters/{id}/slip` — 404 for an unknown id, otherwise the placeholder
/// payload with the voter record.
pub(super) async fn handler_voter_slip(
    State(state): State<Arc<AppState>>,
    AxumPath(id): AxumPath<i64>,
) -> impl IntoResponse {
    match state.db.get_voter(id).await {
        Ok(Some(voter)) => Json(serde_json::json!({
            "message": "PDF slip generation not implemented yet",
            "voter": voter,
        }))
        .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Voter not found"})),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "voter lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Failed to load voter"})),
            )
                .into_response()
        }
    }
}

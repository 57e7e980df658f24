//! # Voter REST API
//!
//! | Endpoint | Purpose |
//! |----------|---------|
//! | `GET /voters?query=<term>` | List all voters, or search by substring |
//! | `POST /voters` | Register a new voter |
//!
//! The search matches `query` case-insensitively against name, voter number
//! and address; an absent or empty `query` lists the whole roll.

use super::AppState;
use crate::db::{NewVoter, VoterStoreError};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Deserialize)]
pub(super) struct VotersQuery {
    query: Option<String>,
}

/// `GET /voters?query=jane` — voter listing with optional substring search.
pub(super) async fn handler_voters_list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VotersQuery>,
) -> impl IntoResponse {
    let result = match params.query.as_deref() {
        Some(term) if !term.is_empty() => state.db.search_voters(term).await,
        _ => state.db.list_voters().await,
    };
    match result {
        Ok(voters) => Json(voters).into_response(),
        Err(e) => {
            error!(error = %e, "voter listing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Failed to list voters"})),
            )
                .into_response()
        }
    }
}

/// Registration payload. Fields are optional at the serde level so that a
/// missing field reaches the presence check and produces the 400 message,
/// rather than a deserialization rejection.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateVoterPayload {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    voter_no: Option<String>,
    #[serde(default)]
    address: Option<String>,
}

/// `POST /voters` — register a voter.
///
/// 201 with the persisted record on success. 400 when any of the three
/// required fields is missing or empty, 409 when the voter number is already
/// registered, 500 for anything else (without leaking internals).
pub(super) async fn handler_voters_create(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateVoterPayload>,
) -> impl IntoResponse {
    let new = NewVoter {
        name: payload.name.unwrap_or_default(),
        voter_no: payload.voter_no.unwrap_or_default(),
        address: payload.address.unwrap_or_default(),
    };
    match state.db.create_voter(&new).await {
        Ok(voter) => {
            info!(id = voter.id, "voter registered");
            state.prom_metrics.voters_registered.inc();
            (StatusCode::CREATED, Json(voter)).into_response()
        }
        Err(e @ VoterStoreError::Validation) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
        Err(e @ VoterStoreError::Conflict) => (
            StatusCode::CONFLICT,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "voter insert failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Failed to create voter"})),
            )
                .into_response()
        }
    }
}

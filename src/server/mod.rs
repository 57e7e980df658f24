//! # Server — Voter Registry HTTP API
//!
//! Runs an Axum HTTP server exposing the registry REST API: health and
//! readiness probes, voter search and registration, the slip placeholder, and
//! Prometheus metrics. Handlers stay thin; the storage layer does the real
//! work.

mod routes_health;
mod routes_slips;
mod routes_voters;

use crate::{db, prom_metrics};
use anyhow::Result;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Instrument};

pub struct AppState {
    pub db: db::Database,
    pub prom_metrics: prom_metrics::Metrics,
}

impl AppState {
    pub fn with_db(db: db::Database) -> Arc<Self> {
        Arc::new(AppState {
            db,
            prom_metrics: prom_metrics::Metrics::new(),
        })
    }
}

/// Middleware that records HTTP request duration into the Prometheus
/// histogram, generates (or propagates) a request ID for correlation, and
/// wraps the request in a tracing span using `.instrument()` for proper async
/// propagation.
async fn metrics_middleware(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> axum::response::Response {
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let method = req.method().to_string();
    let raw_path = req.uri().path().to_string();
    let norm_path = normalize_path(&raw_path);
    let start = std::time::Instant::now();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %raw_path,
    );
    let response = next.run(req).instrument(span).await;

    let duration = start.elapsed().as_secs_f64();
    state
        .prom_metrics
        .http_request_duration
        .get_or_create(&prom_metrics::HttpLabel {
            method,
            path: norm_path,
        })
        .observe(duration);

    let mut response = response;
    response
        .headers_mut()
        .insert("x-request-id", request_id.parse().unwrap());
    response
}

/// Normalize URL path to collapse high-cardinality segments (numeric voter
/// ids) into placeholders, preventing histogram label explosion.
fn normalize_path(path: &str) -> String {
    path.split('/')
        .map(|seg| {
            if !seg.is_empty() && seg.chars().all(|c| c.is_ascii_digit()) {
                ":id".to_string()
            } else {
                seg.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes_health::handler_health))
        .route("/readyz", get(routes_health::handler_readyz))
        .route("/metrics", get(routes_health::handler_metrics))
        .route(
            "/voters",
            get(routes_voters::handler_voters_list).post(routes_voters::handler_voters_create),
        )
        .route("/voters/{id}/slip", get(routes_slips::handler_voter_slip))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CatchPanicLayer::new())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            metrics_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(1024 * 1024))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .with_state(state)
}

pub async fn run(port: u16, database_url: &str) -> Result<()> {
    let database = db::Database::connect(database_url).await?;
    let state = AppState::with_db(database);
    let app = build_router(state.clone());

    // Background task: refresh the registry-size gauge for /metrics.
    let gauge_state = Arc::clone(&state);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30));
        loop {
            interval.tick().await;
            match gauge_state.db.count_voters().await {
                Ok(total) => {
                    gauge_state.prom_metrics.voters_total.set(total);
                }
                Err(e) => warn!(error = %e, "failed to refresh voter count"),
            }
        }
    });

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!(port, "voter registry API listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::normalize_path;

    #[test]
    fn normalize_path_collapses_numeric_segments() {
        assert_eq!(normalize_path("/voters/123/slip"), "/voters/:id/slip");
        assert_eq!(normalize_path("/voters/9999/slip"), "/voters/:id/slip");
    }

    #[test]
    fn normalize_path_keeps_static_segments() {
        assert_eq!(normalize_path("/voters"), "/voters");
        assert_eq!(normalize_path("/health"), "/health");
        // Mixed segments are not ids
        assert_eq!(normalize_path("/voters/V001/slip"), "/voters/V001/slip");
    }
}

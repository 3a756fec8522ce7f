//! Public status endpoint.
//!
//! Safe to expose without authentication: uptime and aggregate delivery
//! counters only. The webhook URL, the secret, and anything else that could
//! reveal internal configuration never appear here.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::state::AppState;

/// `GET /status` — liveness plus lifetime counters.
///
/// Example response:
/// ```json
/// {
///   "status": "ok",
///   "uptime_secs": 3600,
///   "since": "2026-08-06T09:00:00+00:00",
///   "reports": { "relayed": 12, "failed": 1, "rejected": 4 }
/// }
/// ```
pub async fn status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "uptime_secs": state.started_at.elapsed().as_secs(),
        "since": state.started_at_utc.to_rfc3339(),
        "reports": state.stats.snapshot(),
    }))
}

//! Liveness probe endpoint.

use axum::{response::IntoResponse, Json};
use serde_json::json;

/// `GET /healthz` — always 200 with `{"status": "ok"}`.
///
/// No dependencies, never blocks; safe as a container liveness probe and as
/// the target of the `--healthcheck` CLI mode.
pub async fn healthz() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

//! HTTP surface: route registration and request middleware.
//!
//! Handlers translate HTTP concerns (status codes, headers, JSON bodies)
//! into calls to [`crate::notify`] and back; none of them hold state beyond
//! the shared [`AppState`].

pub mod health;
pub mod pages;
pub mod request_id;
pub mod status;
pub mod track;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::state::AppState;

/// Build the complete application router.
///
/// Unmatched paths fall through to the static page, and the catch-panic
/// layer sits outermost so even a broken handler answers with the page
/// instead of a dropped connection.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/track", post(track::track))
        .route("/healthz", get(health::healthz))
        .route("/status", get(status::status))
        .fallback(pages::fallback)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CatchPanicLayer::custom(pages::recover_panic))
        .with_state(state)
}

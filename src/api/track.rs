//! `POST /track` — receive a location payload and relay it to the webhook.
//!
//! This is intentionally a thin layer: formatting and delivery live in
//! [`crate::notify`]. The handler owns the error taxonomy: every outcome,
//! including delivery failure, is answered with HTTP 200 and a JSON body so
//! the client script never has to distinguish transport-level failures.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{ConnectInfo, State},
    http::{header, HeaderMap},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::{notify::RequestMeta, report::LocationReport, state::AppState};

/// Rejection reason for an absent or empty payload.
const NO_DATA: &str = "No data received";

/// Response body for every `/track` outcome.
///
/// `success` is true only when the webhook accepted the notification.
/// `error` is set only for payloads rejected before a delivery attempt;
/// delivery failure detail stays in the server log.
#[derive(Debug, Serialize)]
pub struct TrackResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TrackResponse {
    fn relayed() -> Self {
        Self { success: true, error: None }
    }

    fn failed() -> Self {
        Self { success: false, error: None }
    }

    fn rejected(reason: impl Into<String>) -> Self {
        Self { success: false, error: Some(reason.into()) }
    }
}

/// `POST /track`.
///
/// The body is read as raw bytes rather than through the `Json` extractor so
/// a missing or malformed payload still gets the structured
/// `{"success": false}` answer instead of an extractor rejection.
pub async fn track(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<TrackResponse> {
    let meta = RequestMeta {
        visitor_ip: visitor_ip(&headers, peer),
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("Unknown")
            .to_string(),
    };

    let report = match parse_report(&body) {
        Ok(report) => report,
        Err(reason) => {
            state.stats.record_rejected();
            warn!(visitor_ip = %meta.visitor_ip, %reason, "rejected track request");
            return Json(TrackResponse::rejected(reason));
        }
    };

    match state.notifier.deliver(&report, &meta).await {
        Ok(()) => {
            state.stats.record_relayed();
            info!(visitor_ip = %meta.visitor_ip, "location report relayed");
            Json(TrackResponse::relayed())
        }
        Err(e) => {
            state.stats.record_failed();
            error!(visitor_ip = %meta.visitor_ip, error = %e, "webhook delivery failed");
            Json(TrackResponse::failed())
        }
    }
}

/// Parse the raw body into a [`LocationReport`], or explain why not.
///
/// An empty body, JSON `null`, and a report with no known fields all count
/// as "no data"; anything unparseable is reported with the parser's own
/// message. No delivery is attempted for any rejection.
fn parse_report(body: &[u8]) -> Result<LocationReport, String> {
    if body.is_empty() {
        return Err(NO_DATA.into());
    }

    let value: Value = serde_json::from_slice(body).map_err(|e| e.to_string())?;
    if value.is_null() {
        return Err(NO_DATA.into());
    }

    let report: LocationReport = serde_json::from_value(value).map_err(|e| e.to_string())?;
    if report.is_empty() {
        return Err(NO_DATA.into());
    }

    Ok(report)
}

/// First `X-Forwarded-For` entry, or the socket peer address when the header
/// is absent or unreadable.
fn visitor_ip(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| peer.ip().to_string())
}

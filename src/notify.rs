//! Webhook notifier: formats a location report and delivers it.
//!
//! One [`Notifier`] is built at startup from [`WebhookConfig`] and shared
//! through application state. Delivery is a single POST with the configured
//! timeout baked into the client; the webhook counts a notification as
//! accepted only when it answers `204 No Content`. There is no retry and no
//! queue. Whether a failure matters is the caller's decision.

use std::{borrow::Cow, time::Duration};

use anyhow::Context;
use chrono::{SecondsFormat, Utc};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{config::WebhookConfig, report::LocationReport};

/// Longest user-agent excerpt embedded in a notification, in characters.
const USER_AGENT_LIMIT: usize = 100;

/// Placeholder rendered for absent report fields.
const MISSING: &str = "N/A";

/// Why a delivery attempt failed.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The webhook answered, but not with `204 No Content`.
    #[error("webhook returned HTTP {status}: {body}")]
    Status {
        status: StatusCode,
        body: String,
    },

    /// The request never completed: connection failure or timeout.
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Request metadata captured by the track handler and embedded alongside the
/// report. Lives for one request, like [`LocationReport`] itself.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    /// First `X-Forwarded-For` entry, or the socket peer address.
    pub visitor_ip: String,
    /// Raw `User-Agent` header, `"Unknown"` when absent.
    pub user_agent: String,
}

/// Sends formatted location notifications to a single webhook URL.
pub struct Notifier {
    client: Client,
    url: String,
}

impl Notifier {
    /// Build a notifier for the configured webhook.
    ///
    /// The timeout covers the whole outbound call, connect included.
    pub fn new(cfg: &WebhookConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .context("building webhook HTTP client")?;
        Ok(Self {
            client,
            url: cfg.url.clone(),
        })
    }

    /// Deliver one report. Exactly one attempt per call.
    ///
    /// # Errors
    /// [`NotifyError::Status`] when the webhook answers anything other than
    /// 204, [`NotifyError::Transport`] on connection failure or timeout.
    pub async fn deliver(
        &self,
        report: &LocationReport,
        meta: &RequestMeta,
    ) -> Result<(), NotifyError> {
        let payload = json!({ "embeds": [build_embed(report, meta)] });

        let response = self.client.post(&self.url).json(&payload).send().await?;
        let status = response.status();
        if status != StatusCode::NO_CONTENT {
            // Body text is best-effort; it only feeds the server-side log.
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Status { status, body });
        }
        Ok(())
    }
}

/// Render the notification embed for one report.
///
/// Field order is fixed and every report field appears whether or not it was
/// supplied; absent values render as [`MISSING`] so the receiving channel
/// always shows the same card shape.
fn build_embed(report: &LocationReport, meta: &RequestMeta) -> Value {
    let field = |value: &Option<crate::report::Scalar>| {
        value
            .as_ref()
            .map_or_else(|| MISSING.to_string(), ToString::to_string)
    };

    json!({
        "title": "🎯 New Location Tracked",
        "color": 16_753_920,
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "fields": [
            { "name": "🌐 IP Address", "value": format!("`{}`", field(&report.ip)), "inline": true },
            { "name": "🏳️ Country", "value": field(&report.country_name), "inline": true },
            { "name": "🗺️ Region", "value": field(&report.region), "inline": true },
            { "name": "🏙️ City", "value": field(&report.city), "inline": true },
            { "name": "📍 Coordinates", "value": format!("{}, {}", field(&report.latitude), field(&report.longitude)), "inline": true },
            { "name": "📮 Postal Code", "value": field(&report.postal), "inline": true },
            { "name": "🕐 Timezone", "value": field(&report.timezone), "inline": true },
            { "name": "🌐 ISP", "value": field(&report.org), "inline": true },
            { "name": "🛰️ Request IP", "value": format!("`{}`", meta.visitor_ip), "inline": true },
            { "name": "💻 User Agent", "value": format!("```{}```", truncate_chars(&meta.user_agent, USER_AGENT_LIMIT)), "inline": false },
        ],
        "footer": { "text": "Location Tracker • Powered by ipapi.co" },
    })
}

/// Cap `s` at `limit` characters, appending `...` when anything was cut.
///
/// Counts characters rather than bytes so a multi-byte user agent can never
/// be split inside a UTF-8 sequence.
fn truncate_chars(s: &str, limit: usize) -> Cow<'_, str> {
    match s.char_indices().nth(limit) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &s[..cut])),
        None => Cow::Borrowed(s),
    }
}

//! Shared application state injected into request handlers via
//! [`axum::extract::State`].

use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::{config::Config, notify::Notifier, stats::DeliveryStats};

/// Everything a request handler can reach, shared as `Arc<AppState>`.
///
/// All fields are immutable after startup except the counters, which are
/// internally atomic. Requests never coordinate with each other. The webhook
/// URL and the secret arrive here through [`Config`] instead of module-level
/// globals.
pub struct AppState {
    /// Outbound webhook client, timeout baked in.
    pub notifier: Notifier,

    /// Lifetime request counters.
    pub stats: DeliveryStats,

    /// Start instant, for `/status` uptime.
    pub started_at: Instant,

    /// Start wall-clock time, echoed by `/status`.
    pub started_at_utc: DateTime<Utc>,

    /// Session-signing secret resolved from the environment at startup.
    /// Reserved for cookie signing; no handler issues a session.
    pub session_secret: String,
}

impl AppState {
    /// Build the state from a validated config.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let notifier = Notifier::new(&config.webhook)?;

        let (session_secret, used_fallback) = config.server.session_secret();
        if used_fallback {
            tracing::warn!("no session secret configured; using the development fallback");
        }

        Ok(Self {
            notifier,
            stats: DeliveryStats::default(),
            started_at: Instant::now(),
            started_at_utc: Utc::now(),
            session_secret,
        })
    }
}

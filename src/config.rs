//! Configuration types for geobeacon.
//!
//! Config is loaded once at startup from a TOML file and validated before the
//! server opens its port. Invalid configs are rejected with a clear error
//! rather than silently falling back to defaults.
//!
//! # Example
//! ```toml
//! [server]
//! port = 5000
//!
//! [webhook]
//! url        = "https://discord.com/api/webhooks/123/abc"
//! timeout_ms = 10000
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Fallback session-signing secret used when no environment secret is
/// configured. Fine for local development, useless in production.
pub const DEV_SESSION_SECRET: &str = "default_secret_key_for_development";

/// Top-level service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Listener and process-level settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Outbound notification settings. Required: there is no useful mode of
    /// operation without a webhook to deliver to.
    pub webhook: WebhookConfig,
}

impl Config {
    /// Read and validate the config file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config: Self = toml::from_str(&content).context("parsing config TOML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.webhook.url.is_empty(), "`webhook.url` must not be empty");
        anyhow::ensure!(
            self.webhook.url.starts_with("http://") || self.webhook.url.starts_with("https://"),
            "`webhook.url` must be an http(s) URL, got `{}`",
            self.webhook.url
        );
        anyhow::ensure!(
            self.webhook.timeout_ms > 0,
            "`webhook.timeout_ms` must be greater than zero"
        );
        Ok(())
    }
}

/// Core server settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Port the HTTP listener binds on (default: 5000).
    #[serde(default = "defaults::port")]
    pub port: u16,

    /// Log filter applied when the `RUST_LOG` env var is not set.
    #[serde(default)]
    pub log_level: Option<String>,

    /// Environment variable whose value is the session-signing secret.
    ///
    /// Keeps the secret itself out of the config file. Leave unset to use
    /// [`DEV_SESSION_SECRET`]; a warning is logged in that case.
    #[serde(default)]
    pub session_secret_env: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: defaults::port(),
            log_level: None,
            session_secret_env: None,
        }
    }
}

impl ServerConfig {
    /// Resolve the session-signing secret from the configured environment
    /// variable.
    ///
    /// Returns the secret plus a flag that is true when the development
    /// fallback was used (variable not configured, unset, or empty).
    pub fn session_secret(&self) -> (String, bool) {
        self.session_secret_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|secret| !secret.is_empty())
            .map_or_else(|| (DEV_SESSION_SECRET.to_string(), true), |secret| (secret, false))
    }
}

/// Outbound webhook settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebhookConfig {
    /// Destination for location notifications. A Discord-compatible webhook:
    /// accepts POSTed JSON and answers `204 No Content`.
    pub url: String,

    /// Outbound request timeout in milliseconds (default: 10 000).
    #[serde(default = "defaults::timeout_ms")]
    pub timeout_ms: u64,
}

mod defaults {
    pub fn port() -> u16 {
        5000
    }
    pub fn timeout_ms() -> u64 {
        10_000
    }
}

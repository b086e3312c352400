use std::time::Duration;

use anyhow::Context;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;

/// Runtime settings derived from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash.
    pub base_url: String,
    pub poll_interval: Duration,
    /// `None` leaves the transport default in place.
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(
        base_url: &str,
        poll_interval_ms: u64,
        request_timeout_secs: Option<u64>,
    ) -> anyhow::Result<Self> {
        let parsed = reqwest::Url::parse(base_url)
            .with_context(|| format!("invalid server url '{}'", base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("server url must be http or https, got '{}'", parsed.scheme());
        }
        if poll_interval_ms == 0 {
            anyhow::bail!("poll interval must be greater than zero");
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            poll_interval: Duration::from_millis(poll_interval_ms),
            request_timeout: request_timeout_secs.map(Duration::from_secs),
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVER_URL.to_string(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            request_timeout: None,
        }
    }
}

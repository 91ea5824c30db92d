use std::time::Duration;

pub const DEFAULT_REVEAL_DELAY_MS: u64 = 400;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration, read from environment variables.
///
/// `RAINBOW_API_BASE` is not validated here; a bad origin surfaces as a request
/// error on first use, not a startup failure. Leaving it unset selects local
/// canned playback instead of live backend calls.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Backend base URL, e.g. `http://localhost:8000`.
    pub api_base: Option<String>,
    /// Delay between simulated log reveals in local playback.
    pub reveal_delay: Duration,
    /// Whole-request timeout for backend calls, streaming reads included.
    pub request_timeout: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            reveal_delay: Duration::from_millis(DEFAULT_REVEAL_DELAY_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        let api_base = std::env::var("RAINBOW_API_BASE")
            .ok()
            .filter(|s| !s.is_empty());
        let reveal_delay = std::env::var("RAINBOW_REVEAL_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or_else(|| Duration::from_millis(DEFAULT_REVEAL_DELAY_MS));
        let request_timeout = std::env::var("RAINBOW_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));

        Self {
            api_base,
            reveal_delay,
            request_timeout,
        }
    }
}

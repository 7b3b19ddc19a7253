//! Service location and request limits

use std::time::Duration;

/// Used when neither an explicit base URL nor the environment provides one
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable consulted for the base URL
pub const BASE_URL_ENV: &str = "API_BASE_URL";

/// Transport configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service base address, e.g. `http://localhost:8000`
    pub base_url: String,

    /// Per-request timeout. None waits for the transport to finish or fail.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::resolve(None)
    }
}

impl ClientConfig {
    /// Resolve the base URL: explicit value, then `API_BASE_URL`, then the
    /// local default. Blank values count as unset.
    pub fn resolve(base_url: Option<String>) -> Self {
        Self::resolve_with(base_url, std::env::var(BASE_URL_ENV).ok())
    }

    fn resolve_with(explicit: Option<String>, from_env: Option<String>) -> Self {
        let base_url = [explicit, from_env]
            .into_iter()
            .flatten()
            .map(|url| url.trim().to_string())
            .find(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            base_url,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Absolute URL for a service path such as `/health`
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

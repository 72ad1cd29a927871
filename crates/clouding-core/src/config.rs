//! Client and polling configuration.
//!
//! Everything the API client and the bulk action driver need is passed in
//! explicitly, so tests can point them at a mock server and shrink the waits.

use std::fmt;
use std::time::Duration;

use crate::error::CoreError;

/// Base URL of the Clouding public API.
pub const DEFAULT_BASE_URL: &str = "https://api.clouding.io/v1";

/// Seconds to wait between archive/unarchive rounds.
pub const DEFAULT_WAIT_SECS: u64 = 30;

/// Maximum total seconds to wait for every target to converge.
pub const DEFAULT_MAX_TOTAL_WAIT_SECS: u64 = 300;

/// Per-request HTTP timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`crate::api::ApiClient`].
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Override the base URL. A trailing `/` is dropped so paths can be appended.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.api_key.trim().is_empty() {
            return Err(CoreError::Config("API key cannot be empty".to_string()));
        }

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(CoreError::Config(format!(
                "Base URL '{}' must start with http:// or https://",
                self.base_url
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(CoreError::Config(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Wait budget bounding the archive/unarchive retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollBudget {
    wait: Duration,
    max_total_wait: Duration,
}

impl PollBudget {
    /// Build a budget. The inter-attempt wait must be non-zero, otherwise the
    /// elapsed counter would never advance.
    pub fn new(wait: Duration, max_total_wait: Duration) -> Result<Self, CoreError> {
        if wait.is_zero() {
            return Err(CoreError::Config(
                "Wait between attempts must be at least one second".to_string(),
            ));
        }

        Ok(Self {
            wait,
            max_total_wait,
        })
    }

    pub fn from_secs(wait_secs: u64, max_total_wait_secs: u64) -> Result<Self, CoreError> {
        Self::new(
            Duration::from_secs(wait_secs),
            Duration::from_secs(max_total_wait_secs),
        )
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    pub fn max_total_wait(&self) -> Duration {
        self.max_total_wait
    }
}

impl Default for PollBudget {
    fn default() -> Self {
        Self {
            wait: Duration::from_secs(DEFAULT_WAIT_SECS),
            max_total_wait: Duration::from_secs(DEFAULT_MAX_TOTAL_WAIT_SECS),
        }
    }
}

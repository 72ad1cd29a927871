//! Error types for the Clouding core library.

use serde_json::Value;
use thiserror::Error;

/// Core error type for API operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The request never produced an HTTP response (connection refused, DNS, timeout).
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-2xx status that is not an "already in state" signal.
    #[error("API error from {url}: HTTP {status}: {message}")]
    Api {
        url: String,
        status: u16,
        message: String,
        body: Option<Value>,
    },

    /// A successful response carried a body that is not valid JSON (or not the expected shape).
    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("No targets given")]
    NoTargets,
}

impl CoreError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            CoreError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, CoreError::Transport { .. })
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_error_display_includes_status_and_message() {
        let err = CoreError::Api {
            url: "https://api.clouding.io/v1/servers/abc/archive".to_string(),
            status: 409,
            message: "Server is busy".to_string(),
            body: Some(json!({"title": "Server is busy"})),
        };
        let text = err.to_string();
        assert!(text.contains("HTTP 409"));
        assert!(text.contains("Server is busy"));
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn test_decode_error_has_no_status() {
        let err = CoreError::Decode {
            url: "http://localhost/servers".to_string(),
            message: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(err.status(), None);
        assert!(!err.is_transport());
        assert!(err.to_string().starts_with("Failed to decode response"));
    }
}

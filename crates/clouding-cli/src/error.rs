//! Error types for the Clouding CLI.
//!
//! CliError wraps CoreError from the shared library and adds CLI-specific variants.

use clouding_core::error::CoreError;
use thiserror::Error;

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NETWORK_ERROR: i32 = 2;
    pub const API_ERROR: i32 = 3;
    pub const INVALID_ARGS: i32 = 4;
    pub const INCOMPLETE: i32 = 5;
}

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("No API key provided. Pass --api-key or set the CLOUDING_API_KEY environment variable.")]
    MissingCredential,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(
        "Gave up after waiting {elapsed_secs}s; {} server(s) still pending: {}",
        .remaining.len(),
        .remaining.join(", ")
    )]
    Incomplete {
        remaining: Vec<String>,
        elapsed_secs: u64,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(e) => match e {
                CoreError::Transport { .. } => exit_codes::NETWORK_ERROR,
                CoreError::Api { .. } | CoreError::Decode { .. } => exit_codes::API_ERROR,
                CoreError::Config(_) | CoreError::NoTargets => exit_codes::INVALID_ARGS,
            },
            CliError::MissingCredential => exit_codes::INVALID_ARGS,
            CliError::InvalidArgument(_) => exit_codes::INVALID_ARGS,
            CliError::Incomplete { .. } => exit_codes::INCOMPLETE,
            CliError::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_non_zero_for_failures() {
        let api = CliError::from(CoreError::Api {
            url: "http://localhost/servers".to_string(),
            status: 500,
            message: "boom".to_string(),
            body: None,
        });
        assert_eq!(api.exit_code(), exit_codes::API_ERROR);
        assert_eq!(CliError::MissingCredential.exit_code(), exit_codes::INVALID_ARGS);
        assert_ne!(CliError::MissingCredential.exit_code(), exit_codes::SUCCESS);
    }

    #[test]
    fn test_incomplete_message_lists_remaining() {
        let err = CliError::Incomplete {
            remaining: vec!["srv-1".to_string(), "srv-2".to_string()],
            elapsed_secs: 300,
        };
        assert_eq!(err.exit_code(), exit_codes::INCOMPLETE);
        assert_eq!(
            err.to_string(),
            "Gave up after waiting 300s; 2 server(s) still pending: srv-1, srv-2"
        );
    }
}

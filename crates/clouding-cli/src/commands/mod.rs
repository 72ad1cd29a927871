//! Command implementations.

pub mod list;
pub mod transition;

pub use list::run_list;
pub use transition::run_transition;

use std::time::Duration;

use clouding_core::{ApiClient, ClientConfig};

use crate::cli::Cli;
use crate::error::CliError;

/// Take the API key from the flag/environment value, rejecting blanks.
pub fn require_api_key(api_key: Option<&str>) -> Result<String, CliError> {
    match api_key.map(str::trim) {
        Some(key) if !key.is_empty() => Ok(key.to_string()),
        _ => Err(CliError::MissingCredential),
    }
}

/// Build the API client from the global options.
///
/// Fails before any network call when no API key is available.
pub fn build_client(cli: &Cli) -> Result<ApiClient, CliError> {
    let api_key = require_api_key(cli.api_key.as_deref())?;

    let config = ClientConfig::new(api_key)
        .with_base_url(cli.base_url.as_str())
        .with_request_timeout(Duration::from_secs(cli.timeout));

    Ok(ApiClient::new(config)?)
}

fn validate_targets(targets: &[String]) -> Result<(), CliError> {
    if targets.iter().any(|t| t.trim().is_empty()) {
        return Err(CliError::InvalidArgument(
            "Target server ids cannot be empty".to_string(),
        ));
    }
    Ok(())
}

//! Shared core library for Clouding server management.
//!
//! Provides the API client, target resolution for `all`, and the bulk driver
//! that polls archive/unarchive requests until every server converges.

pub mod api;
pub mod config;
pub mod driver;
pub mod error;
pub mod models;
pub mod targets;

#[cfg(test)]
mod testing;

pub use api::{ApiClient, ServerApi};
pub use config::{ClientConfig, PollBudget};
pub use driver::{BulkActionDriver, ConvergencePolicy, DriveOutcome, DriveProgress, NoopProgress};
pub use error::CoreError;
pub use models::{ActionRecord, Server, ServerAction};

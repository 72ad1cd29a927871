//! API layer.
//!
//! The HTTP client and the parsing and classification of the responses it
//! returns.

pub mod client;
pub mod response;

pub use client::{ApiClient, ServerApi, API_KEY_HEADER};
pub use response::{classify_action, ActionReply, ActionStatus, ApiResponse};

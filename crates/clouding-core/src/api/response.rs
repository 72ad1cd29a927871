//! Response parsing and classification for API calls.

use serde_json::Value;

use crate::error::CoreError;
use crate::models::ServerAction;

/// Outcome of a single HTTP call that reached the server.
///
/// Transport failures never produce an `ApiResponse`; they surface as
/// [`CoreError::Transport`] from the client instead.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub url: String,
    pub status_code: u16,
    pub body: Option<Value>,
    pub error_message: Option<String>,
}

impl ApiResponse {
    /// Build a response from the raw status and body text.
    ///
    /// An empty body yields `body: None`. A body that is not JSON is a decode
    /// error on a 2xx response; on an error response the text is kept as the
    /// error message instead.
    pub fn from_parts(url: &str, status_code: u16, text: &str) -> Result<Self, CoreError> {
        let ok = (200..300).contains(&status_code);
        let trimmed = text.trim();

        let body = if trimmed.is_empty() {
            None
        } else {
            match serde_json::from_str::<Value>(trimmed) {
                Ok(value) => Some(value),
                Err(e) if ok => {
                    return Err(CoreError::Decode {
                        url: url.to_string(),
                        message: e.to_string(),
                    })
                }
                Err(_) => None,
            }
        };

        let error_message = if ok {
            None
        } else {
            body.as_ref()
                .and_then(extract_error_message)
                .or_else(|| (!trimmed.is_empty()).then(|| trimmed.to_string()))
        };

        Ok(Self {
            url: url.to_string(),
            status_code,
            body,
            error_message,
        })
    }

    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Convert into the JSON body, turning a non-2xx status into [`CoreError::Api`].
    pub fn into_body(self) -> Result<Option<Value>, CoreError> {
        if self.is_ok() {
            Ok(self.body)
        } else {
            Err(self.into_error())
        }
    }

    pub fn into_error(self) -> CoreError {
        let message = match (&self.error_message, &self.body) {
            (Some(message), Some(body)) => format!("{} ({})", message, body),
            (Some(message), None) => message.clone(),
            (None, Some(body)) => body.to_string(),
            (None, None) => "empty response body".to_string(),
        };

        CoreError::Api {
            url: self.url,
            status: self.status_code,
            message,
            body: self.body,
        }
    }
}

/// How an archive/unarchive response moves its target towards convergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    /// The provider reports the transition as finished.
    Completed,
    /// Accepted but not finished yet.
    InProgress,
    /// The server was already in the requested state.
    AlreadyInState,
}

/// A classified archive/unarchive response.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionReply {
    pub status: ActionStatus,
    pub body: Value,
}

/// Classify an archive/unarchive response.
///
/// Any other non-2xx response is returned as an error.
pub fn classify_action(action: ServerAction, response: ApiResponse) -> Result<ActionReply, CoreError> {
    if response.is_ok() {
        let body = response.body.unwrap_or(Value::Null);
        let status = if is_completed(&body) {
            ActionStatus::Completed
        } else {
            ActionStatus::InProgress
        };
        return Ok(ActionReply { status, body });
    }

    if (400..500).contains(&response.status_code) && is_already_in_state(action, &response) {
        return Ok(ActionReply {
            status: ActionStatus::AlreadyInState,
            body: response.body.unwrap_or(Value::Null),
        });
    }

    Err(response.into_error())
}

/// Whether an action object reports `"status": "completed"`.
pub fn is_completed(body: &Value) -> bool {
    body.get("status")
        .and_then(Value::as_str)
        .map(|s| s.eq_ignore_ascii_case("completed"))
        .unwrap_or(false)
}

fn is_already_in_state(action: ServerAction, response: &ApiResponse) -> bool {
    let mut texts = Vec::new();
    if let Some(body) = &response.body {
        collect_strings(body, &mut texts);
    }
    if let Some(message) = &response.error_message {
        texts.push(message.clone());
    }

    texts.iter().any(|text| {
        let lower = text.to_lowercase();
        action
            .already_in_state_phrases()
            .iter()
            .any(|phrase| lower.contains(phrase))
    })
}

fn collect_strings(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.push(s.clone()),
        Value::Array(items) => items.iter().for_each(|item| collect_strings(item, out)),
        Value::Object(map) => map.values().for_each(|item| collect_strings(item, out)),
        _ => {}
    }
}

/// Pull a human-readable message out of an error payload.
///
/// Understands problem-details style bodies (`detail`/`title`), plain
/// `message`/`error` fields and validation maps under `errors`.
pub fn extract_error_message(body: &Value) -> Option<String> {
    for key in ["detail", "message", "error", "title"] {
        if let Some(text) = body.get(key).and_then(Value::as_str) {
            if !text.trim().is_empty() {
                return Some(text.trim().to_string());
            }
        }
    }

    if let Some(errors) = body.get("errors") {
        let mut texts = Vec::new();
        collect_strings(errors, &mut texts);
        if !texts.is_empty() {
            return Some(texts.join("; "));
        }
    }

    None
}

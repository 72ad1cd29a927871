//! Server records and action types exchanged with the API.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Server lifecycle transitions driven to completion by the bulk driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerAction {
    Archive,
    Unarchive,
}

impl ServerAction {
    /// Path segment appended to `/servers/{id}/`.
    pub fn path_segment(&self) -> &'static str {
        match self {
            ServerAction::Archive => "archive",
            ServerAction::Unarchive => "unarchive",
        }
    }

    /// Phrases the API uses in an error payload when the server is already
    /// where this action would take it.
    pub fn already_in_state_phrases(&self) -> &'static [&'static str] {
        match self {
            ServerAction::Archive => &["already archived", "is archived"],
            ServerAction::Unarchive => &["already unarchived", "already active", "not archived"],
        }
    }

    /// Upper-case tag used in progress messages.
    pub fn progress_tag(&self) -> &'static str {
        match self {
            ServerAction::Archive => "ARCHIVE SERVERS",
            ServerAction::Unarchive => "UNARCHIVE SERVERS",
        }
    }

    pub fn past_participle(&self) -> &'static str {
        match self {
            ServerAction::Archive => "archived",
            ServerAction::Unarchive => "unarchived",
        }
    }
}

impl fmt::Display for ServerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// A server as returned by `GET /servers` or `GET /servers/{id}`.
///
/// Only the id is modelled; every other provider attribute (name, status,
/// IPs, flavor...) is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub id: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Server {
    /// Provider-reported state (`Active`, `Archived`, `Archiving`...).
    pub fn status(&self) -> Option<&str> {
        self.attributes.get("status").and_then(Value::as_str)
    }

    /// Look up a single field, `id` included.
    pub fn field(&self, name: &str) -> Option<Value> {
        if name == "id" {
            return Some(Value::String(self.id.clone()));
        }
        self.attributes.get(name).cloned()
    }

    /// The full record as a JSON object.
    pub fn to_record(&self) -> Value {
        let mut map = self.attributes.clone();
        map.insert("id".to_string(), Value::String(self.id.clone()));
        Value::Object(map)
    }
}

/// Body of `GET /servers`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerList {
    pub servers: Vec<Server>,
}

/// The response body recorded for one archive/unarchive target.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRecord {
    pub target: String,
    pub body: Value,
}

impl ActionRecord {
    pub fn new(target: impl Into<String>, body: Value) -> Self {
        Self {
            target: target.into(),
            body,
        }
    }

    /// The `status` field of the provider's action object, if any.
    pub fn status(&self) -> Option<&str> {
        self.body.get("status").and_then(Value::as_str)
    }
}

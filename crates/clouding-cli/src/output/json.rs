//! JSON-formatted output for CLI.
//!
//! Every record is printed on its own as an indented, key-sorted object.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};

use super::OutputFormatter;
use clouding_core::ActionRecord;

const INDENT: &[u8] = b"    ";

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }

    fn join<'a>(values: impl Iterator<Item = &'a Value>) -> String {
        values.map(to_sorted_json).collect::<Vec<_>>().join("\n")
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn format_servers(&self, records: &[Value]) -> String {
        Self::join(records.iter())
    }

    fn format_action_results(&self, records: &[ActionRecord]) -> String {
        Self::join(records.iter().map(|r| &r.body))
    }
}

/// Pretty-print a value with sorted object keys at every depth.
pub fn to_sorted_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));

    match sort_keys(value).serialize(&mut serializer) {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(_) => "{}".to_string(),
    }
}

/// Rebuild objects with their keys inserted in sorted order.
///
/// `serde_json::Map` only sorts on its own when `preserve_order` is off, and
/// any crate in the build can turn that feature on.
pub fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            let mut sorted = Map::new();
            for (key, item) in entries {
                sorted.insert(key.clone(), sort_keys(item));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

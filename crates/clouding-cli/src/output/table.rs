//! Table-formatted output for CLI.

use std::collections::BTreeSet;

use clouding_core::ActionRecord;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use serde_json::Value;

use super::OutputFormatter;

pub struct TableOutput;

impl TableOutput {
    pub fn new() -> Self {
        Self
    }

    fn cell_text(value: Option<&Value>) -> String {
        match value {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

impl Default for TableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableOutput {
    fn format_servers(&self, records: &[Value]) -> String {
        if records.is_empty() {
            return "No servers found.".to_string();
        }

        // Columns are the union of keys, sorted, with id first.
        let mut columns: BTreeSet<&str> = BTreeSet::new();
        for record in records {
            if let Value::Object(map) = record {
                columns.extend(map.keys().map(String::as_str));
            }
        }
        let mut header: Vec<&str> = Vec::with_capacity(columns.len());
        if columns.remove("id") {
            header.push("id");
        }
        header.extend(columns);

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(header.clone());

        for record in records {
            table.add_row(
                header
                    .iter()
                    .map(|column| Cell::new(Self::cell_text(record.get(*column))))
                    .collect::<Vec<_>>(),
            );
        }

        format!("{}\n\n{} server(s)", table, records.len())
    }

    fn format_action_results(&self, records: &[ActionRecord]) -> String {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Server", "Status", "Action ID"]);

        for record in records {
            let status = record.status().unwrap_or("unknown");
            let status_cell = if status.eq_ignore_ascii_case("completed") {
                Cell::new(status).fg(Color::Green)
            } else {
                Cell::new(status).fg(Color::Yellow)
            };

            table.add_row(vec![
                Cell::new(&record.target),
                status_cell,
                Cell::new(Self::cell_text(record.body.get("id"))),
            ]);
        }

        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_table_has_union_of_columns() {
        let records = vec![
            json!({"id": "srv-1", "name": "web"}),
            json!({"id": "srv-2", "status": "Archived"}),
        ];

        let text = TableOutput::new().format_servers(&records);

        assert!(text.contains("srv-1"));
        assert!(text.contains("Archived"));
        assert!(text.contains("status"));
        assert!(text.ends_with("2 server(s)"));
    }

    #[test]
    fn test_empty_server_table() {
        assert_eq!(TableOutput::new().format_servers(&[]), "No servers found.");
    }

    #[test]
    fn test_action_table_lists_targets() {
        let records = vec![ActionRecord::new(
            "srv-9",
            json!({"id": "act-9", "status": "completed"}),
        )];

        let text = TableOutput::new().format_action_results(&records);

        assert!(text.contains("srv-9"));
        assert!(text.contains("act-9"));
    }
}

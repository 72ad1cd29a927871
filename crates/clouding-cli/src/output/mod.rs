//! Output formatting for CLI results.

pub mod json;
pub mod table;

pub use json::JsonOutput;
pub use table::TableOutput;

use std::io::Write;

use clouding_core::ActionRecord;
use colored::Colorize;
use serde_json::Value;

use crate::cli::OutputFormat;

/// Output formatter trait
pub trait OutputFormatter {
    /// Format server records (full or field-projected)
    fn format_servers(&self, records: &[Value]) -> String;

    /// Format the completed archive/unarchive action records
    fn format_action_results(&self, records: &[ActionRecord]) -> String;
}

/// Get the appropriate formatter for the selected output format
pub fn get_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonOutput::new()),
        OutputFormat::Table => Box::new(TableOutput::new()),
    }
}

/// Print a `[TAG] message` progress line on stderr, keeping stdout for results.
pub fn status_line(tag: &str, message: &str) {
    eprintln!("{}", format!("[{}] {}", tag, message).blue());
}

/// Write formatted results to stdout. Empty output prints nothing.
pub fn print_output(text: &str) -> std::io::Result<()> {
    if text.is_empty() {
        return Ok(());
    }

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", text)
}

//! List command implementation.

use serde_json::{Map, Value};

use clouding_core::targets::fetch_servers;
use clouding_core::{Server, ServerApi};

use super::validate_targets;
use crate::cli::{ListArgs, OutputFormat};
use crate::error::CliError;
use crate::output::{get_formatter, print_output, status_line};

const TAG: &str = "LIST SERVERS";

/// Run the list command
pub async fn run_list<A>(api: &A, args: ListArgs, format: OutputFormat) -> Result<(), CliError>
where
    A: ServerApi + ?Sized,
{
    status_line(TAG, "Listing servers...");

    let records = list_records(api, &args.targets, &args.fields).await?;

    let formatter = get_formatter(format);
    print_output(&formatter.format_servers(&records))?;

    Ok(())
}

/// Fetch the targeted servers and optionally project them onto `fields`.
pub async fn list_records<A>(
    api: &A,
    targets: &[String],
    fields: &[String],
) -> Result<Vec<Value>, CliError>
where
    A: ServerApi + ?Sized,
{
    validate_targets(targets)?;

    let servers = fetch_servers(api, targets).await?;

    if fields.is_empty() {
        return Ok(servers.iter().map(Server::to_record).collect());
    }

    status_line(TAG, "Filtering fields...");
    Ok(servers
        .iter()
        .map(|server| project_fields(server, fields))
        .collect())
}

/// Keep only `fields`; a field the server lacks maps to an empty string.
pub fn project_fields(server: &Server, fields: &[String]) -> Value {
    let mut projected = Map::new();
    for field in fields {
        let value = server
            .field(field)
            .unwrap_or_else(|| Value::String(String::new()));
        projected.insert(field.clone(), value);
    }
    Value::Object(projected)
}

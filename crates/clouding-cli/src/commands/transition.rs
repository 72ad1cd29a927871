//! Archive and unarchive command implementation.

use std::time::Duration;

use tracing::info;

use clouding_core::api::ActionStatus;
use clouding_core::targets::resolve_targets;
use clouding_core::{
    BulkActionDriver, DriveOutcome, DriveProgress, PollBudget, ServerAction, ServerApi,
};

use super::validate_targets;
use crate::cli::{OutputFormat, TransitionArgs};
use crate::error::CliError;
use crate::output::{get_formatter, print_output, status_line};

/// Run the archive or unarchive command
pub async fn run_transition<A>(
    api: &A,
    action: ServerAction,
    args: TransitionArgs,
    format: OutputFormat,
) -> Result<(), CliError>
where
    A: ServerApi + ?Sized,
{
    let outcome = drive(api, action, &args).await?;

    let formatter = get_formatter(format);
    if !outcome.completed.is_empty() {
        print_output(&formatter.format_action_results(&outcome.completed))?;
    }

    ensure_complete(&outcome)
}

/// Resolve the targets and drive them to the requested state.
pub async fn drive<A>(
    api: &A,
    action: ServerAction,
    args: &TransitionArgs,
) -> Result<DriveOutcome, CliError>
where
    A: ServerApi + ?Sized,
{
    validate_targets(&args.targets)?;
    let budget = PollBudget::from_secs(args.wait, args.max_wait)?;
    let tag = action.progress_tag();

    status_line(tag, &format!("{} servers...", heading(action)));

    let targets = resolve_targets(api, &args.targets).await?;
    info!(%action, count = targets.len(), "resolved targets");

    let outcome = BulkActionDriver::new(api, budget)
        .with_policy(args.policy.into())
        .run_with_progress(action, targets, &ConsoleProgress)
        .await?;

    if outcome.is_complete() {
        status_line(
            tag,
            &format!("All servers have been {}!", action.past_participle()),
        );
    }

    Ok(outcome)
}

fn ensure_complete(outcome: &DriveOutcome) -> Result<(), CliError> {
    if outcome.is_complete() {
        return Ok(());
    }

    Err(CliError::Incomplete {
        remaining: outcome.remaining.clone(),
        elapsed_secs: outcome.elapsed.as_secs(),
    })
}

fn heading(action: ServerAction) -> &'static str {
    match action {
        ServerAction::Archive => "Archiving",
        ServerAction::Unarchive => "Unarchiving",
    }
}

/// Prints driver progress as coloured status lines on stderr.
struct ConsoleProgress;

impl DriveProgress for ConsoleProgress {
    fn on_round(&self, action: ServerAction, round: u32, remaining: &[String]) {
        if round > 1 {
            status_line(
                action.progress_tag(),
                &format!("Checking {} server(s) again (attempt {})...", remaining.len(), round),
            );
        }
    }

    fn on_converged(&self, action: ServerAction, target: &str, status: ActionStatus) {
        let message = match status {
            ActionStatus::AlreadyInState => {
                format!("Server {} is already {}", target, action.past_participle())
            }
            ActionStatus::Completed => format!("Server {} {}", target, action.past_participle()),
            ActionStatus::InProgress => format!("Server {} accepted the request", target),
        };
        status_line(action.progress_tag(), &message);
    }

    fn on_waiting(&self, action: ServerAction, wait: Duration, _remaining: &[String]) {
        let tag = action.progress_tag();
        status_line(
            tag,
            &format!("Some servers are still being {}...", action.past_participle()),
        );
        status_line(
            tag,
            &format!("Waiting {} seconds before checking again...", wait.as_secs()),
        );
    }
}

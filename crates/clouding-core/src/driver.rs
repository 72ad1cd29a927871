//! Bulk archive/unarchive driver.
//!
//! Archive and unarchive are asynchronous on the provider side: a request
//! starts a transition and later requests report whether it finished. The
//! driver re-issues the action for every unfinished target, round after
//! round, until all of them converge or the wait budget runs out.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::api::{classify_action, ActionStatus, ServerApi};
use crate::config::PollBudget;
use crate::error::CoreError;
use crate::models::{ActionRecord, ServerAction};

/// What a successful response without a `completed` marker means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvergencePolicy {
    /// Keep polling the target until the API reports `completed`.
    #[default]
    Strict,
    /// Treat any successful response as done.
    Optimistic,
}

/// Trait for receiving driver progress updates.
///
/// The CLI prints status lines from these callbacks; library callers can pass
/// [`NoopProgress`].
pub trait DriveProgress {
    fn on_round(&self, action: ServerAction, round: u32, remaining: &[String]);
    fn on_converged(&self, action: ServerAction, target: &str, status: ActionStatus);
    fn on_waiting(&self, action: ServerAction, wait: Duration, remaining: &[String]);
}

/// No-op progress handler for when progress reporting isn't needed.
pub struct NoopProgress;

impl DriveProgress for NoopProgress {
    fn on_round(&self, _action: ServerAction, _round: u32, _remaining: &[String]) {}
    fn on_converged(&self, _action: ServerAction, _target: &str, _status: ActionStatus) {}
    fn on_waiting(&self, _action: ServerAction, _wait: Duration, _remaining: &[String]) {}
}

/// Result of one driver run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriveOutcome {
    /// Response bodies of targets that finished, in the order they finished.
    pub completed: Vec<ActionRecord>,
    /// Targets the API reported as already in the requested state.
    pub converged: Vec<String>,
    /// Latest in-progress response for each target still in `remaining`.
    pub pending: Vec<ActionRecord>,
    /// Targets that had not converged when the budget ran out.
    pub remaining: Vec<String>,
    /// Total time slept between rounds.
    pub elapsed: Duration,
    pub rounds: u32,
}

impl DriveOutcome {
    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty()
    }
}

/// Drives a batch of archive/unarchive calls to convergence.
///
/// Calls are issued strictly one after another, in target order.
pub struct BulkActionDriver<'a, A: ServerApi + ?Sized> {
    api: &'a A,
    budget: PollBudget,
    policy: ConvergencePolicy,
}

impl<'a, A: ServerApi + ?Sized> BulkActionDriver<'a, A> {
    pub fn new(api: &'a A, budget: PollBudget) -> Self {
        Self {
            api,
            budget,
            policy: ConvergencePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ConvergencePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub async fn run(
        &self,
        action: ServerAction,
        targets: Vec<String>,
    ) -> Result<DriveOutcome, CoreError> {
        self.run_with_progress(action, targets, &NoopProgress).await
    }

    /// Run the retry loop.
    ///
    /// A target leaves the remaining set only when a response shows it
    /// converged. Any error other than "already in state" aborts the whole
    /// run immediately.
    pub async fn run_with_progress<P: DriveProgress + ?Sized>(
        &self,
        action: ServerAction,
        targets: Vec<String>,
        progress: &P,
    ) -> Result<DriveOutcome, CoreError> {
        let mut outcome = DriveOutcome {
            remaining: targets,
            ..DriveOutcome::default()
        };

        while !outcome.remaining.is_empty() && outcome.elapsed < self.budget.max_total_wait() {
            outcome.rounds += 1;
            progress.on_round(action, outcome.rounds, &outcome.remaining);
            info!(
                %action,
                round = outcome.rounds,
                remaining = outcome.remaining.len(),
                "starting round"
            );

            let batch = std::mem::take(&mut outcome.remaining);
            outcome.pending.clear();

            for target in batch {
                let response = self.api.request_action(&target, action).await?;
                let reply = classify_action(action, response)?;
                debug!(%action, target = %target, status = ?reply.status, "action response");

                match (reply.status, self.policy) {
                    (ActionStatus::Completed, _)
                    | (ActionStatus::InProgress, ConvergencePolicy::Optimistic) => {
                        progress.on_converged(action, &target, reply.status);
                        outcome.completed.push(ActionRecord::new(target, reply.body));
                    }
                    (ActionStatus::AlreadyInState, _) => {
                        progress.on_converged(action, &target, reply.status);
                        outcome.converged.push(target);
                    }
                    (ActionStatus::InProgress, ConvergencePolicy::Strict) => {
                        outcome.pending.push(ActionRecord::new(target.clone(), reply.body));
                        outcome.remaining.push(target);
                    }
                }
            }

            if !outcome.remaining.is_empty() {
                let wait = self.budget.wait();
                progress.on_waiting(action, wait, &outcome.remaining);
                tokio::time::sleep(wait).await;
                outcome.elapsed += wait;
            }
        }

        if !outcome.is_complete() {
            warn!(
                %action,
                remaining = outcome.remaining.len(),
                elapsed_secs = outcome.elapsed.as_secs(),
                "wait budget exhausted before all targets converged"
            );
        }

        Ok(outcome)
    }
}

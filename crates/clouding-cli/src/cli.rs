//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};

use clouding_core::config::{
    DEFAULT_BASE_URL, DEFAULT_MAX_TOTAL_WAIT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_WAIT_SECS,
};
use clouding_core::ConvergencePolicy;

/// Clouding Server Manager - list, archive and unarchive Clouding servers
#[derive(Parser, Debug)]
#[command(name = "clouding-server-manager")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The API key to use. Falls back to the CLOUDING_API_KEY environment variable (or .env file)
    #[arg(
        short = 'k',
        long,
        global = true,
        env = "CLOUDING_API_KEY",
        hide_env_values = true
    )]
    pub api_key: Option<String>,

    /// Base URL of the Clouding API
    #[arg(long, global = true, env = "CLOUDING_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "CLOUDING_TIMEOUT", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all servers or some of them by id
    List(ListArgs),

    /// Archive all servers or some of them by id
    Archive(TransitionArgs),

    /// Unarchive all servers or some of them by id
    Unarchive(TransitionArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

// ==================== List ====================

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Server id to list (repeatable: -t x -t y), or "all" for every server
    #[arg(short, long = "targets", required = true)]
    pub targets: Vec<String>,

    /// Field to show (repeatable: -f x -f y). All fields are shown if omitted
    #[arg(short, long = "fields")]
    pub fields: Vec<String>,
}

// ==================== Archive / Unarchive ====================

#[derive(Args, Debug)]
pub struct TransitionArgs {
    /// Server id to act on (repeatable: -t x -t y), or "all" for every server
    #[arg(short, long = "targets", required = true)]
    pub targets: Vec<String>,

    /// Seconds to wait between attempts
    #[arg(long, default_value_t = DEFAULT_WAIT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub wait: u64,

    /// Maximum total seconds to wait for every server to finish
    #[arg(long = "max-wait", default_value_t = DEFAULT_MAX_TOTAL_WAIT_SECS)]
    pub max_wait: u64,

    /// How to treat a successful response that is not yet "completed"
    #[arg(long, value_enum, default_value = "strict")]
    pub policy: PolicyArg,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyArg {
    /// Keep polling until the API reports the action completed
    Strict,
    /// Accept any successful response as done
    Optimistic,
}

impl From<PolicyArg> for ConvergencePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Strict => ConvergencePolicy::Strict,
            PolicyArg::Optimistic => ConvergencePolicy::Optimistic,
        }
    }
}

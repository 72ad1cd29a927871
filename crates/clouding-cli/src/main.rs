//! Clouding Server Manager - command-line client for the Clouding API.
//!
//! Lists servers and drives archive/unarchive requests to completion, either
//! for individual server ids or for every server on the account.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;

use clouding_core::ServerAction;
use cli::{Cli, Commands};
use error::{exit_codes, CliError};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // A missing .env file is fine; the key may come from the flag or the environment.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let client = commands::build_client(&cli)?;
    let format = cli.format;

    match cli.command {
        Commands::List(args) => commands::run_list(&client, args, format).await,
        Commands::Archive(args) => {
            commands::run_transition(&client, ServerAction::Archive, args, format).await
        }
        Commands::Unarchive(args) => {
            commands::run_transition(&client, ServerAction::Unarchive, args, format).await
        }
    }
}

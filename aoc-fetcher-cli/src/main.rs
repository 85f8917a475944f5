//! AOC Fetcher CLI - download Advent of Code puzzle inputs

mod cli;
mod config;
mod error;
mod logging;
mod output;
mod pipeline;

use aoc_fetcher::{AocClient, release_now};
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match cli::argument_error(&e) {
            Some(err) => exit_with(err),
            None => e.exit(),
        },
    };

    let config = Config::from_args(args);

    if let Err(e) = logging::init_logging(config.verbosity) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    if let Err(e) = run(&config) {
        exit_with(e);
    }
}

fn run(config: &Config) -> Result<(), CliError> {
    let client = AocClient::builder()
        .status_policy(config.status_policy)
        .build()?;

    pipeline::run(config, &client, &release_now())?;
    Ok(())
}

/// Print a single error line and exit with the error's code
fn exit_with(err: CliError) -> ! {
    tracing::debug!(error = ?err, "exiting");
    eprintln!("Error: {}", err);
    std::process::exit(err.exit_code());
}

//! CLI argument parsing using clap

use crate::error::CliError;
use clap::error::ErrorKind;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Credential source used when `--session` is not given
pub const DEFAULT_SESSION_SOURCE: &str = "./session";

/// Output file used when `--output` is not given
pub const DEFAULT_OUTPUT_FILE: &str = "inputs.txt";

/// Advent of Code puzzle input downloader
#[derive(Parser, Debug)]
#[command(name = "aoc-fetcher", about = "Download Advent of Code puzzle inputs", version)]
pub struct Args {
    /// Session token, or a path to a file holding it (paths start with `.` or `/`)
    #[arg(long, global = true, default_value = DEFAULT_SESSION_SOURCE)]
    pub session: String,

    /// File to write the input to; it must not exist yet
    #[arg(short, long, global = true, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Write the response even when the server answers with status >= 400
    #[arg(long, global = true)]
    pub allow_error_status: bool,

    /// Increase log verbosity (-v, -vv, -vvv); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Download the input of a puzzle
    Fetch {
        /// Puzzle URL, e.g. https://adventofcode.com/2022/day/1
        url: String,
    },
}

/// Translate a clap failure into an argument error
///
/// Returns `None` for `--help` and `--version`, which clap should print itself.
pub fn argument_error(err: &clap::Error) -> Option<CliError> {
    let message = match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => return None,
        ErrorKind::MissingSubcommand
        | ErrorKind::InvalidSubcommand
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            "did you want to call \"fetch\"?".to_string()
        }
        ErrorKind::MissingRequiredArgument => "please enter a url".to_string(),
        _ => {
            let rendered = err.render().to_string();
            let first_line = rendered.lines().next().unwrap_or_default();
            first_line.trim_start_matches("error: ").to_string()
        }
    };
    Some(CliError::Argument(message))
}

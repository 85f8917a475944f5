//! Configuration resolution from CLI args

use crate::cli::{Args, Command};
use aoc_fetcher::{SESSION_ENV_VAR, StatusPolicy};
use std::path::PathBuf;
use zeroize::Zeroizing;

/// Resolved runtime configuration
pub struct Config {
    /// Puzzle URL to fetch
    pub url: String,
    /// Session token or path to a session file
    pub session_source: String,
    /// Value of `AOC_SESSION`, used when the session file is missing
    pub env_session: Option<Zeroizing<String>>,
    /// Where the input is written
    pub output_path: PathBuf,
    /// How error statuses are treated
    pub status_policy: StatusPolicy,
    /// Number of `-v` flags
    pub verbosity: u8,
}

impl Config {
    /// Build config from CLI args and the process environment
    pub fn from_args(args: Args) -> Self {
        let env_session = std::env::var(SESSION_ENV_VAR).ok();
        Self::from_args_with_env(args, env_session)
    }

    /// Build config from CLI args with an explicit `AOC_SESSION` value
    pub fn from_args_with_env(args: Args, env_session: Option<String>) -> Self {
        let Command::Fetch { url } = args.command;

        let status_policy = if args.allow_error_status {
            StatusPolicy::Accept
        } else {
            StatusPolicy::Reject
        };

        Config {
            url,
            session_source: expand_tilde(&args.session),
            env_session: env_session.map(Zeroizing::new),
            output_path: args.output,
            status_policy,
            verbosity: args.verbose,
        }
    }

    /// The `AOC_SESSION` fallback as a plain string slice
    pub fn env_fallback(&self) -> Option<&str> {
        self.env_session.as_ref().map(|s| s.as_str())
    }
}

/// Expand a leading `~/` to the home directory
fn expand_tilde(source: &str) -> String {
    if let Some(rest) = source.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest).to_string_lossy().into_owned();
    }
    source.to_string()
}

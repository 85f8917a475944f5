//! Error types for the CLI

use aoc_fetcher::{CredentialError, FetchError};
use std::path::PathBuf;
use thiserror::Error;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Bad or missing command-line arguments
    #[error("{0}")]
    Argument(String),

    /// Session could not be resolved
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// Validation, transport or remote failure
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Output file could not be written
    #[error(transparent)]
    Output(#[from] OutputError),
}

impl CliError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Argument(_) => 2,
            CliError::Credential(_) | CliError::Fetch(FetchError::Credential(_)) => 1,
            CliError::Fetch(_) | CliError::Output(_) => 18,
        }
    }
}

/// Output-file errors
#[derive(Error, Debug)]
pub enum OutputError {
    /// Refusing to overwrite an existing file
    #[error("{} already exists", path.display())]
    AlreadyExists { path: PathBuf },

    /// Creating or writing the file failed
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

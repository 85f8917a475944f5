//! Error types for the AOC fetcher

use std::path::PathBuf;
use thiserror::Error;

/// Boxed error returned by [`Transport`](crate::Transport) implementations
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Reasons a puzzle URL is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The string could not be parsed as an absolute URL
    #[error("{url} is not a valid url: {reason}")]
    MalformedUrl { url: String, reason: String },

    /// The URL points somewhere other than adventofcode.com
    #[error("{0} is not a valid advent of code url")]
    WrongHost(String),

    /// The path is too short to contain `{year}/day/{day}`
    #[error("url did not include a day")]
    MissingDay,

    /// The year segment is not a number, or the event has not happened yet
    #[error("invalid year {year}: {reason}")]
    InvalidYear { year: String, reason: &'static str },

    /// The second path segment is not the literal `day`
    #[error("url does not include day")]
    MissingDayToken,

    /// The day segment is not a number in 1..=25
    #[error("{0} is not a valid day")]
    InvalidDay(String),

    /// The puzzle for this day has not been released yet
    #[error("day {0} is not yet open")]
    DayNotYetOpen(u8),
}

/// Reasons a session credential cannot be resolved or used
#[derive(Error, Debug)]
pub enum CredentialError {
    /// Cookie has the wrong name or no value
    #[error("no session cookie")]
    MissingCredential,

    /// Cookie value contains characters other than ASCII letters and digits
    #[error("not a valid session cookie")]
    MalformedCredential,

    /// Cookie expiry lies in the past
    #[error("expired session cookie")]
    ExpiredCredential,

    /// The session file could not be read
    #[error("could not read session from {}: {source}", path.display())]
    CredentialSourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The resolved session token is empty
    #[error("no session id found")]
    EmptyCredential,
}

/// Errors that can occur when fetching a puzzle input
#[derive(Error, Debug)]
pub enum FetchError {
    /// Requested URL failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Session cookie failed validation
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// The transport failed before a response was received
    #[error("HTTP request failed: {0}")]
    Transport(#[source] BoxError),

    /// The server answered with a status >= 400
    #[error("request rejected with HTTP {status}: {reason}")]
    RemoteRejected {
        /// The status code that was received
        status: reqwest::StatusCode,
        /// Canonical reason phrase for the status
        reason: String,
    },

    /// Client initialization failed
    #[error("Client initialization failed: {0}")]
    ClientInit(String),
}

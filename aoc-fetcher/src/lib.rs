//! AOC Fetcher Library
//!
//! Downloads personalized Advent of Code puzzle inputs. Nothing is sent
//! unless the puzzle URL names a released puzzle on adventofcode.com and the
//! session cookie is well formed.
//!
//! # Features
//!
//! - Puzzle URL validation against the December release schedule
//! - Session cookie validation and resolution from a file, literal or
//!   environment fallback
//! - Injectable HTTP transport, with a blocking rustls reqwest default
//! - Well-typed errors using thiserror
//!
//! # Example
//!
//! ```no_run
//! use aoc_fetcher::{AocClient, SESSION_ENV_VAR, SessionCookie, release_now, resolve_session};
//! use std::io::Read;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let env = std::env::var(SESSION_ENV_VAR).ok();
//! let session = resolve_session("./session", env.as_deref())?;
//! let cookie = SessionCookie::new(session.as_str())?;
//!
//! let client = AocClient::new()?;
//! let response = client.fetch_input("https://adventofcode.com/2022/day/1", &cookie, &release_now())?;
//!
//! let mut input = String::new();
//! response.into_body().read_to_string(&mut input)?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod puzzle_url;
mod session;
mod transport;

pub use client::{AocClient, AocClientBuilder, DEFAULT_USER_AGENT, StatusPolicy};
pub use error::{BoxError, CredentialError, FetchError, ValidationError};
pub use puzzle_url::{AOC_HOST, FIRST_YEAR, LAST_DAY, PuzzleUrl, release_now, validate_url};
pub use session::{
    SESSION_COOKIE_NAME, SESSION_ENV_VAR, SessionCookie, is_path, resolve_session,
};
pub use transport::{FetchResponse, ReqwestTransport, Transport};

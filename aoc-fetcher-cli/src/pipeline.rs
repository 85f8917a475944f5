//! The fetch pipeline: session, cookie, request, output file

use crate::config::Config;
use crate::error::CliError;
use crate::output::OutputFile;
use aoc_fetcher::{AocClient, SessionCookie, Transport, resolve_session};
use chrono::Datelike;

/// Fetch the configured puzzle input and write it to the output file
///
/// Stages run in order and the first failure aborts the rest. The output
/// file is only created once a response has been received, and is never
/// created over an existing file.
///
/// Returns the number of bytes written.
pub fn run<T: Transport, D: Datelike>(
    config: &Config,
    client: &AocClient<T>,
    now: &D,
) -> Result<u64, CliError> {
    let session = resolve_session(&config.session_source, config.env_fallback())?;
    let cookie = SessionCookie::new(session.as_str())?;

    let response = client.fetch_input(&config.url, &cookie, now)?;

    let output = OutputFile::create(&config.output_path)?;
    let written = output.write_from(&mut response.into_body())?;

    tracing::info!(
        bytes = written,
        path = %config.output_path.display(),
        "puzzle input saved"
    );
    Ok(written)
}

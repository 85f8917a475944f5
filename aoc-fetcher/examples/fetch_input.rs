//! Fetch a single puzzle input and print a short summary
//!
//! Usage: `cargo run --example fetch_input -- https://adventofcode.com/2022/day/1`
//!
//! The session is read from `./session`, falling back to the `AOC_SESSION`
//! environment variable. You can get your session cookie from your browser's
//! cookies after logging in to adventofcode.com.

use aoc_fetcher::{AocClient, SESSION_ENV_VAR, SessionCookie, release_now, resolve_session};
use std::io::Read;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://adventofcode.com/2022/day/1".to_string());

    let env_session = std::env::var(SESSION_ENV_VAR).ok();
    let session = resolve_session("./session", env_session.as_deref())?;
    let cookie = SessionCookie::new(session.as_str())?;

    let client = AocClient::builder()
        .client_builder(
            reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(30))
                .use_rustls_tls(),
        )
        .build()?;

    println!("Fetching {}...", url);
    let response = client.fetch_input(&url, &cookie, &release_now())?;
    println!("Status: {}", response.status());

    let mut input = String::new();
    response.into_body().read_to_string(&mut input)?;
    println!("Input length: {} bytes", input.len());
    println!("First line: {}", input.lines().next().unwrap_or_default());

    Ok(())
}

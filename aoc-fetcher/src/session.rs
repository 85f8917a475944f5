//! Session cookie resolution and validation

use crate::error::CredentialError;
use chrono::{DateTime, Utc};
use regex::Regex;
use reqwest::header::HeaderValue;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::LazyLock;
use zeroize::{Zeroize, Zeroizing};

/// Name of the cookie adventofcode.com authenticates with
pub const SESSION_COOKIE_NAME: &str = "session";

/// Environment variable consulted when the session file does not exist
pub const SESSION_ENV_VAR: &str = "AOC_SESSION";

static SESSION_VALUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]*$").unwrap());

/// An adventofcode.com session cookie
///
/// The value is zeroized on drop and redacted from `Debug` output.
#[derive(Clone)]
pub struct SessionCookie {
    name: String,
    value: Zeroizing<String>,
    expiry: Option<DateTime<Utc>>,
}

impl SessionCookie {
    /// Create a `session` cookie from a token
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::EmptyCredential` if `value` is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, CredentialError> {
        let value = Zeroizing::new(value.into());
        if value.is_empty() {
            return Err(CredentialError::EmptyCredential);
        }

        Ok(Self {
            name: SESSION_COOKIE_NAME.to_string(),
            value,
            expiry: None,
        })
    }

    /// Build a cookie without any checks, e.g. from a browser export
    pub fn from_parts(
        name: impl Into<String>,
        value: impl Into<String>,
        expiry: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            name: name.into(),
            value: Zeroizing::new(value.into()),
            expiry,
        }
    }

    /// Attach an expiry timestamp
    pub fn with_expiry(mut self, expiry: DateTime<Utc>) -> Self {
        self.expiry = Some(expiry);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        self.expiry
    }

    /// Validate the cookie against the current time
    pub fn validate(&self) -> Result<(), CredentialError> {
        self.validate_at(Utc::now())
    }

    /// Validate the cookie against `now`
    ///
    /// Fails with `MissingCredential` for a wrong name or empty value,
    /// `MalformedCredential` for non-alphanumeric values and
    /// `ExpiredCredential` if the expiry is strictly before `now`.
    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<(), CredentialError> {
        if self.name != SESSION_COOKIE_NAME || self.value.is_empty() {
            return Err(CredentialError::MissingCredential);
        }

        if !SESSION_VALUE_REGEX.is_match(&self.value) {
            return Err(CredentialError::MalformedCredential);
        }

        if self.expiry.is_some_and(|expiry| expiry < now) {
            return Err(CredentialError::ExpiredCredential);
        }

        Ok(())
    }

    /// Render the cookie as a `Cookie` header value
    ///
    /// The header is marked sensitive and the temporary string is zeroized.
    pub fn header_value(&self) -> Result<HeaderValue, CredentialError> {
        let mut cookie_string = format!("{}={}", self.name, self.value.as_str());
        let header_value = HeaderValue::from_bytes(cookie_string.as_bytes())
            .map_err(|_| CredentialError::MalformedCredential);
        cookie_string.zeroize();

        let mut sensitive_header = header_value?;
        sensitive_header.set_sensitive(true);
        Ok(sensitive_header)
    }
}

impl fmt::Debug for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCookie")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .field("expiry", &self.expiry)
            .finish()
    }
}

/// Whether a credential source names a file rather than a literal token
pub fn is_path(source: &str) -> bool {
    source.starts_with('.') || source.starts_with('/')
}

/// Resolve a session token from a credential source
///
/// A path-like `source` (see [`is_path`]) is read and its first
/// whitespace-delimited token is used. When that file does not exist,
/// `env_fallback` is used instead if present. Any other source is taken
/// literally.
///
/// # Errors
///
/// * `CredentialError::CredentialSourceUnavailable` - the file could not be read
///   and no fallback applies
/// * `CredentialError::EmptyCredential` - the resolved token is empty
pub fn resolve_session(
    source: &str,
    env_fallback: Option<&str>,
) -> Result<Zeroizing<String>, CredentialError> {
    let session = if is_path(source) {
        match std::fs::read_to_string(source) {
            Ok(content) => first_token(&Zeroizing::new(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound && env_fallback.is_some() => {
                tracing::debug!(path = source, "session file not found, using {}", SESSION_ENV_VAR);
                first_token(env_fallback.unwrap_or_default())
            }
            Err(err) => {
                return Err(CredentialError::CredentialSourceUnavailable {
                    path: PathBuf::from(source),
                    source: err,
                });
            }
        }
    } else {
        Zeroizing::new(source.to_string())
    };

    if session.is_empty() {
        return Err(CredentialError::EmptyCredential);
    }

    Ok(session)
}

fn first_token(content: &str) -> Zeroizing<String> {
    Zeroizing::new(
        content
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string(),
    )
}

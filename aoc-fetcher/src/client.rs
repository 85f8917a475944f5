//! AOC input fetching client

use crate::error::FetchError;
use crate::puzzle_url::PuzzleUrl;
use crate::session::SessionCookie;
use crate::transport::{FetchResponse, ReqwestTransport, Transport};
use chrono::Datelike;
use reqwest::Method;
use reqwest::blocking::Request;
use reqwest::header::COOKIE;

/// User agent sent by the default HTTP client
pub const DEFAULT_USER_AGENT: &str = concat!("aoc-fetcher/", env!("CARGO_PKG_VERSION"));

const DEFAULT_BASE_URL: &str = "https://adventofcode.com";

/// How responses with an HTTP status >= 400 are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Fail with `FetchError::RemoteRejected`
    #[default]
    Reject,
    /// Return the response like any other
    Accept,
}

/// Client that downloads personalized puzzle inputs
///
/// Every fetch validates the puzzle URL and the session cookie before any
/// request is sent.
///
/// # Example
///
/// ```no_run
/// use aoc_fetcher::{AocClient, SessionCookie, release_now};
/// use std::io::Read;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AocClient::new()?;
/// let cookie = SessionCookie::new("your_session_cookie")?;
///
/// let response = client.fetch_input("https://adventofcode.com/2022/day/1", &cookie, &release_now())?;
/// let mut input = String::new();
/// response.into_body().read_to_string(&mut input)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct AocClient<T = ReqwestTransport> {
    transport: T,
    base_url: reqwest::Url,
    status_policy: StatusPolicy,
}

impl AocClient {
    /// Create a client with rustls-tls and default settings
    ///
    /// # Errors
    ///
    /// Returns `FetchError::ClientInit` if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, FetchError> {
        Self::builder().build()
    }

    /// Create a builder for configuring the client
    ///
    /// # Example
    ///
    /// ```no_run
    /// use aoc_fetcher::{AocClient, StatusPolicy};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = AocClient::builder()
    ///     .base_url("http://localhost:1234")?
    ///     .status_policy(StatusPolicy::Accept)
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> AocClientBuilder {
        AocClientBuilder::new()
    }
}

impl<T: Transport> AocClient<T> {
    /// Create a client around an existing transport with default settings
    pub fn with_transport(transport: T) -> Result<Self, FetchError> {
        AocClientBuilder::new().build_with(transport)
    }

    pub fn status_policy(&self) -> StatusPolicy {
        self.status_policy
    }

    /// URL of the input endpoint for a validated puzzle
    pub fn input_url(&self, puzzle: &PuzzleUrl) -> Result<reqwest::Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::ClientInit("Cannot modify base URL path".to_string()))?
            .clear()
            .extend(puzzle.input_path_segments());
        Ok(url)
    }

    /// Fetch the puzzle input behind a puzzle URL
    ///
    /// Validates `url` against `now`, validates `cookie`, then sends
    /// `GET {year}/day/{day}/input` with the session cookie attached.
    ///
    /// # Errors
    ///
    /// * `FetchError::Validation` - `url` is not a released puzzle
    /// * `FetchError::Credential` - `cookie` is missing, malformed or expired
    /// * `FetchError::Transport` - no response was received
    /// * `FetchError::RemoteRejected` - status >= 400 under `StatusPolicy::Reject`
    pub fn fetch_input<D: Datelike>(
        &self,
        url: &str,
        cookie: &SessionCookie,
        now: &D,
    ) -> Result<FetchResponse, FetchError> {
        let puzzle = PuzzleUrl::parse(url, now)?;
        cookie.validate()?;

        let mut request = Request::new(Method::GET, self.input_url(&puzzle)?);
        request.headers_mut().insert(COOKIE, cookie.header_value()?);

        tracing::debug!(url = %request.url(), "requesting puzzle input");
        let response = self
            .transport
            .send(request)
            .map_err(FetchError::Transport)?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "received response");

        if status.as_u16() >= 400 {
            match self.status_policy {
                StatusPolicy::Reject => {
                    return Err(FetchError::RemoteRejected {
                        status,
                        reason: status.canonical_reason().unwrap_or("unknown").to_string(),
                    });
                }
                StatusPolicy::Accept => {
                    tracing::warn!(status = status.as_u16(), "accepting error response");
                }
            }
        }

        Ok(response)
    }
}

/// Builder for configuring an [`AocClient`]
///
/// # Example
///
/// ```no_run
/// use aoc_fetcher::AocClient;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Custom base URL for testing
/// let client = AocClient::builder()
///     .base_url("http://localhost:1234")?
///     .build()?;
///
/// // Custom timeout
/// let client = AocClient::builder()
///     .client_builder(
///         reqwest::blocking::Client::builder()
///             .timeout(Duration::from_secs(30))
///     )
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct AocClientBuilder {
    base_url: Option<reqwest::Url>,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
    status_policy: StatusPolicy,
    user_agent: Option<String>,
}

impl AocClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom base URL for input requests
    ///
    /// Puzzle URLs are still validated against adventofcode.com; only the
    /// request is redirected. Useful for mock servers.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, FetchError> {
        let url = url
            .into_url()
            .map_err(|e| FetchError::ClientInit(format!("Invalid base URL: {}", e)))?;
        self.base_url = Some(url);
        Ok(self)
    }

    /// Set a custom HTTP client builder (timeouts, proxies, etc.)
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    /// Set how responses with status >= 400 are treated
    pub fn status_policy(mut self, policy: StatusPolicy) -> Self {
        self.status_policy = policy;
        self
    }

    /// Override the `User-Agent` header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a client backed by reqwest
    ///
    /// # Errors
    ///
    /// Returns `FetchError::ClientInit` if the HTTP client cannot be initialized.
    pub fn build(mut self) -> Result<AocClient<ReqwestTransport>, FetchError> {
        let builder = self
            .client_builder
            .take()
            .unwrap_or_else(|| reqwest::blocking::Client::builder().use_rustls_tls());
        let user_agent = self
            .user_agent
            .take()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let client = builder
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::ClientInit(e.to_string()))?;

        self.build_with(ReqwestTransport::new(client))
    }

    /// Build a client around a custom transport
    pub fn build_with<T: Transport>(self, transport: T) -> Result<AocClient<T>, FetchError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => reqwest::Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| FetchError::ClientInit(e.to_string()))?,
        };

        Ok(AocClient {
            transport,
            base_url,
            status_policy: self.status_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BoxError, CredentialError, ValidationError};
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use reqwest::StatusCode;
    use std::cell::RefCell;
    use std::io::Read;

    /// Records requests and answers with a canned response
    struct StubTransport {
        status: StatusCode,
        body: &'static str,
        requests: RefCell<Vec<(String, Option<String>)>>,
    }

    impl StubTransport {
        fn new(status: u16, body: &'static str) -> Self {
            Self {
                status: StatusCode::from_u16(status).unwrap(),
                body,
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for StubTransport {
        fn send(&self, request: Request) -> Result<FetchResponse, BoxError> {
            let cookie = request
                .headers()
                .get(COOKIE)
                .map(|v| v.to_str().unwrap().to_string());
            self.requests
                .borrow_mut()
                .push((request.url().to_string(), cookie));
            Ok(FetchResponse::new(self.status, self.body.as_bytes()))
        }
    }

    struct FailingTransport;

    impl Transport for FailingTransport {
        fn send(&self, _request: Request) -> Result<FetchResponse, BoxError> {
            Err("connection refused".into())
        }
    }

    fn december(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 12, day).unwrap()
    }

    fn cookie() -> SessionCookie {
        SessionCookie::new("abc123").unwrap()
    }

    fn read_body(response: FetchResponse) -> String {
        let mut body = String::new();
        response.into_body().read_to_string(&mut body).unwrap();
        body
    }

    #[test]
    fn test_fetch_sends_cookie_to_input_endpoint() {
        let transport = StubTransport::new(200, "1\n2\n3\n");
        let client = AocClient::with_transport(&transport).unwrap();

        let response = client
            .fetch_input("https://adventofcode.com/2022/day/1", &cookie(), &december(1))
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_body(response), "1\n2\n3\n");
        assert_eq!(
            transport.requests.borrow().as_slice(),
            &[(
                "https://adventofcode.com/2022/day/1/input".to_string(),
                Some("session=abc123".to_string())
            )]
        );
    }

    #[test]
    fn test_invalid_url_is_not_sent() {
        let transport = StubTransport::new(200, "");
        let client = AocClient::with_transport(&transport).unwrap();

        let result = client.fetch_input("https://adventofcode.com/2021/day/26", &cookie(), &december(1));

        assert!(matches!(
            result,
            Err(FetchError::Validation(ValidationError::InvalidDay(_)))
        ));
        assert!(transport.requests.borrow().is_empty());
    }

    #[test]
    fn test_url_is_validated_before_cookie() {
        let transport = StubTransport::new(200, "");
        let client = AocClient::with_transport(&transport).unwrap();
        let bad_cookie = SessionCookie::from_parts("session", "not valid!", None);

        let result = client.fetch_input("https://example.com/2022/day/1", &bad_cookie, &december(1));
        assert!(matches!(
            result,
            Err(FetchError::Validation(ValidationError::WrongHost(_)))
        ));

        let result = client.fetch_input("https://adventofcode.com/2022/day/1", &bad_cookie, &december(1));
        assert!(matches!(
            result,
            Err(FetchError::Credential(CredentialError::MalformedCredential))
        ));
        assert!(transport.requests.borrow().is_empty());
    }

    #[test]
    fn test_transport_failure() {
        let client = AocClient::with_transport(FailingTransport).unwrap();

        let result = client.fetch_input("https://adventofcode.com/2022/day/1", &cookie(), &december(1));

        match result {
            Err(FetchError::Transport(e)) => assert_eq!(e.to_string(), "connection refused"),
            other => panic!("Expected Transport error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_status_rejected_by_default() {
        let client = AocClient::with_transport(StubTransport::new(400, "Please log in")).unwrap();

        let result = client.fetch_input("https://adventofcode.com/2022/day/1", &cookie(), &december(1));

        match result {
            Err(FetchError::RemoteRejected { status, reason }) => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(reason, "Bad Request");
            }
            other => panic!("Expected RemoteRejected, got {:?}", other),
        }
    }

    #[test]
    fn test_error_status_accepted_when_configured() {
        let client = AocClient::builder()
            .status_policy(StatusPolicy::Accept)
            .build_with(StubTransport::new(404, "not found"))
            .unwrap();

        let response = client
            .fetch_input("https://adventofcode.com/2022/day/1", &cookie(), &december(1))
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_body(response), "not found");
    }

    #[test]
    fn test_default_base_url() {
        let client = AocClient::builder().build().unwrap();
        assert_eq!(client.base_url.as_str(), "https://adventofcode.com/");
        assert_eq!(client.status_policy(), StatusPolicy::Reject);
    }

    #[test]
    fn test_invalid_base_url() {
        let result = AocClient::builder().base_url("not a valid url");

        assert!(result.is_err());
    }

    #[test]
    fn test_reqwest_transport_against_mock_server() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/2022/day/3/input")
            .match_header("cookie", "session=abc123")
            .match_header("user-agent", DEFAULT_USER_AGENT)
            .with_status(200)
            .with_body("vJrwpWtwJgWrhcsFMMfFFhFp\n")
            .expect(1)
            .create();

        let client = AocClient::builder()
            .base_url(server.url())
            .unwrap()
            .build()
            .unwrap();

        let response = client
            .fetch_input("https://adventofcode.com/2022/day/3", &cookie(), &december(3))
            .unwrap();

        assert_eq!(read_body(response), "vJrwpWtwJgWrhcsFMMfFFhFp\n");
        mock.assert();
    }

    // Input URL construction mirrors the validated puzzle
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn prop_input_url_construction(
            year in 2015u16..2022u16,
            day in 1u8..=25u8,
            session in "[a-f0-9]{32,128}",
        ) {
            let mut server = mockito::Server::new();

            let expected_path = format!("/{}/day/{}/input", year, day);
            let mock = server.mock("GET", expected_path.as_str())
                .match_header("cookie", format!("session={}", session).as_str())
                .with_status(200)
                .with_body("test input data")
                .expect(1)
                .create();

            let client = AocClient::builder()
                .base_url(server.url())
                .unwrap()
                .build()
                .unwrap();

            let url = format!("https://adventofcode.com/{}/day/{}", year, day);
            let result = client.fetch_input(&url, &SessionCookie::new(session).unwrap(), &december(1));

            prop_assert!(result.is_ok(), "fetch_input should succeed for {}", url);
            mock.assert();
            prop_assert_eq!(read_body(result.unwrap()), "test input data");
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn prop_error_status_is_rejected(
            status_code in prop::sample::select(vec![400, 401, 403, 404, 429, 500, 502, 503, 504]),
        ) {
            let mut server = mockito::Server::new();
            let mock = server.mock("GET", "/2021/day/5/input")
                .with_status(status_code)
                .with_body("Error response")
                .expect(1)
                .create();

            let client = AocClient::builder()
                .base_url(server.url())
                .unwrap()
                .build()
                .unwrap();

            let result = client.fetch_input("https://adventofcode.com/2021/day/5", &cookie(), &december(1));

            match result {
                Err(FetchError::RemoteRejected { status, .. }) => {
                    prop_assert_eq!(status.as_u16(), status_code as u16);
                }
                other => prop_assert!(false, "Expected RemoteRejected, got {:?}", other),
            }
            mock.assert();
        }
    }
}

//! HTTP transport used by [`AocClient`](crate::AocClient)

use crate::error::BoxError;
use reqwest::StatusCode;
use reqwest::blocking::Request;
use std::fmt;
use std::io::Read;

/// Status and body stream of a puzzle input response
///
/// The body is read lazily; the caller owns draining it.
pub struct FetchResponse {
    status: StatusCode,
    body: Box<dyn Read + Send>,
}

impl FetchResponse {
    pub fn new(status: StatusCode, body: impl Read + Send + 'static) -> Self {
        Self {
            status,
            body: Box::new(body),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Take ownership of the body stream
    pub fn into_body(self) -> Box<dyn Read + Send> {
        self.body
    }
}

impl fmt::Debug for FetchResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Something that can execute a single HTTP request
///
/// Implemented by [`ReqwestTransport`] for real traffic; tests substitute
/// their own implementation.
pub trait Transport {
    fn send(&self, request: Request) -> Result<FetchResponse, BoxError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: Request) -> Result<FetchResponse, BoxError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: Request) -> Result<FetchResponse, BoxError> {
        (**self).send(request)
    }
}

/// [`Transport`] backed by a blocking reqwest client
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: Request) -> Result<FetchResponse, BoxError> {
        let response = self.client.execute(request)?;
        Ok(FetchResponse::new(response.status(), response))
    }
}

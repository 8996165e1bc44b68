//! Transport trait and implementations for sending API requests.
//!
//! The primary implementation is [`http::HttpTransport`], a blocking
//! ureq agent. [`MockTransport`] answers from a scripted queue and records
//! every request, for testing without network access:
//!
//! ```
//! use sentrykit::transport::{ApiRequest, ApiResponse, MockTransport, Transport};
//! use sentrykit::Method;
//!
//! let mock = MockTransport::new();
//! mock.push_json(200, serde_json::json!({"slug": "sentry"}));
//!
//! let request = ApiRequest::new(Method::Get, "http://localhost:9000/api/0/organizations/sentry/");
//! let response = mock.send(&request).unwrap();
//! assert_eq!(response.status, 200);
//! assert_eq!(mock.requests().len(), 1);
//! ```

pub mod http;

use crate::endpoint::Method;
use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A fully built request: target, headers and optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// JSON payload for create and update calls.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Create a request with no headers and no body.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Set the headers.
    #[must_use]
    pub fn headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    /// Set the JSON body.
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Look up a header value (case-insensitive name).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw HTTP response: status code and undecoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl ApiResponse {
    /// Create a response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends one request and returns the response, whatever its status.
///
/// Implementations must return `Ok` for every HTTP status and reserve
/// `Err` for failures where no response was obtained.
pub trait Transport: Send + Sync {
    /// Send a request.
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

/// Scripted transport for tests.
///
/// Responses are returned in the order they were pushed. Clones share the
/// same queue and request log, so a test can keep a handle after moving
/// the mock into a client.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<Result<ApiResponse>>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockTransport {
    /// Create a mock with an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    pub fn push(&self, response: ApiResponse) {
        lock(&self.responses).push_back(Ok(response));
    }

    /// Queue a response with a JSON body.
    pub fn push_json(&self, status: u16, body: Value) {
        self.push(ApiResponse::new(status, body.to_string()));
    }

    /// Queue a transport failure.
    pub fn push_error(&self, error: Error) {
        lock(&self.responses).push_back(Err(error));
    }

    /// All requests sent so far.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }

    /// Number of queued responses not yet consumed.
    #[must_use]
    pub fn pending(&self) -> usize {
        lock(&self.responses).len()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        lock(&self.requests).push(request.clone());
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(Error::transport(&request.url, "no mock response queued")))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

//! HTTP responses described as plain data.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::Error;

/// Outcome of executing a [`Request`](crate::Request).
///
/// A call that reached the server carries its status, headers and body. A call
/// that could not complete carries status 0, an empty body and the failure in
/// [`transport_error`](Response::transport_error); the failure is recorded on
/// the response rather than raised so the caller decides how to surface it.
#[derive(Debug)]
pub struct Response {
    status: u16,
    headers: HashMap<String, String>,
    body: String,
    transport_error: Option<Error>,
}

impl Response {
    /// A response that reached the server.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
            transport_error: None,
        }
    }

    /// A call that failed below the HTTP level.
    pub fn failed(error: Error) -> Self {
        Self {
            status: 0,
            headers: HashMap::new(),
            body: String::new(),
            transport_error: Some(error),
        }
    }

    /// Add a response header. Names are stored lowercased.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Get the HTTP status code (0 when the call never completed).
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get a header value (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// The raw response body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The transport failure, if the call could not complete.
    pub fn transport_error(&self) -> Option<&Error> {
        self.transport_error.as_ref()
    }

    /// Take ownership of the transport failure, leaving `None` behind.
    pub fn take_transport_error(&mut self) -> Option<Error> {
        self.transport_error.take()
    }

    /// Get the Retry-After header as a Duration (seconds form only).
    pub fn retry_after(&self) -> Option<Duration> {
        self.header("retry-after")?
            .trim()
            .parse::<u64>()
            .ok()
            .map(Duration::from_secs)
    }
}

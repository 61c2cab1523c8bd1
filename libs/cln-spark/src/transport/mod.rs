pub mod http;
pub mod in_flight;
#[cfg(test)]
pub(crate) mod scripted;

use anyhow::Result;
use async_trait::async_trait;

pub use http::HttpTransport;
pub use in_flight::{InFlightCalls, PendingCall, Registration};

pub const ACCESS_HEADER: &str = "X-Access";
pub const RANGE_HEADER: &str = "Range";
pub const CONTENT_TYPE: &str = "application/json";

/// A POST-request to the Spark server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// Reject invalid TLS-certificates
    pub verify_tls: bool,
}

impl HttpRequest {
    /// Looks up a header. Names are case-insensitive
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends requests to the Spark server.
///
/// An `Err` means that no response was received at all.
/// Responses with an error status are returned as `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse>;
}

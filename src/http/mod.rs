//! HTTP transport seam.
//!
//! The discovery engine only needs `GET` and `POST` with redirects left to
//! the caller, so the transport is a two-method trait. [`HttpClient`] (feature
//! `with-http`) implements it on top of a blocking `reqwest` client with
//! automatic redirect following disabled.

#[cfg(feature = "with-http")]
mod client;
mod error;

#[cfg(feature = "with-http")]
pub use client::HttpClient;
pub use error::TransportError;

pub trait HttpTransport {
    fn get(&self, uri: &str) -> Result<HttpResponse, TransportError>;

    fn post(&self, uri: &str, body: &[u8], content_type: &str)
    -> Result<HttpResponse, TransportError>;
}

/// A fully read HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn location(&self) -> Option<&str> {
        self.header("location")
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Resolves a `Location` (or in-document redirect) target against the URI it
/// was received from. Absolute targets are returned normalized.
pub(crate) fn resolve_location(base: &str, location: &str) -> Result<String, url::ParseError> {
    let target = match url::Url::parse(base) {
        Ok(base) => base.join(location)?,
        Err(_) => url::Url::parse(location)?,
    };
    Ok(target.to_string())
}

#[cfg(test)]
pub(crate) mod tests;

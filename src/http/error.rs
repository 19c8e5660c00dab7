use thiserror::Error;

/// Connection-level failure: refused, timed out, TLS, unreadable body.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {uri} failed: {message}")]
    Request { uri: String, message: String },
    #[error("request to {uri} timed out")]
    Timeout { uri: String },
    #[cfg(feature = "with-http")]
    #[error("request to {uri} failed: {source}")]
    Http {
        uri: String,
        #[source]
        source: reqwest::Error,
    },
    #[cfg(feature = "with-http")]
    #[error("HTTP client initialization failed: {source}")]
    ClientInit {
        #[source]
        source: reqwest::Error,
    },
}

impl TransportError {
    pub fn request(uri: &str, message: impl Into<String>) -> Self {
        Self::Request {
            uri: uri.to_string(),
            message: message.into(),
        }
    }

    pub fn timeout(uri: &str) -> Self {
        Self::Timeout {
            uri: uri.to_string(),
        }
    }

    #[cfg(feature = "with-http")]
    pub(crate) fn http(uri: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            return Self::timeout(uri);
        }
        Self::Http {
            uri: uri.to_string(),
            source,
        }
    }

    #[cfg(feature = "with-http")]
    pub(crate) fn client_init(source: reqwest::Error) -> Self {
        Self::ClientInit { source }
    }
}

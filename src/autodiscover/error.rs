use thiserror::Error;

use crate::address::AddressError;

/// Reasons an autodiscover response body cannot be interpreted.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed XML at byte {position}: {source}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },
    #[error("document has no root element")]
    NoRoot,
    #[error("unexpected root element <{name}>")]
    UnexpectedRoot { name: String },
    #[error("document ends inside <{name}>")]
    Truncated { name: String },
    #[error("content outside the root element")]
    StrayContent,
    #[error("{action} without a target")]
    MissingRedirectTarget { action: &'static str },
    #[error("redirect address rejected: {source}")]
    RedirectAddress {
        #[source]
        source: AddressError,
    },
}

impl ParseError {
    pub(crate) fn xml(position: usize, source: quick_xml::Error) -> Self {
        Self::Xml { position, source }
    }
}

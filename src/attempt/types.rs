use std::fmt;

use crate::candidate::Candidate;

/// Raw configuration document and the location that finally served it.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub uri: String,
    pub body: Vec<u8>,
    pub trail: Vec<Transition>,
}

impl Document {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Why a single candidate produced no document.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(tag = "kind", rename_all = "snake_case"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    Transport { message: String },
    /// HTTP status (or autodiscover `ErrorCode`) that ended the exchange.
    Protocol { code: i32, message: String },
    RedirectLoop { hops: usize },
    InvalidDocument { message: String },
}

impl FailureReason {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn protocol(code: i32, message: impl Into<String>) -> Self {
        Self::Protocol {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { message } => write!(f, "transport failure: {message}"),
            Self::Protocol { code, message } if message.is_empty() => {
                write!(f, "protocol failure ({code})")
            }
            Self::Protocol { code, message } => write!(f, "protocol failure ({code}): {message}"),
            Self::RedirectLoop { hops } => write!(f, "redirect loop after {hops} redirects"),
            Self::InvalidDocument { message } => write!(f, "invalid document: {message}"),
        }
    }
}

/// One processed response in a redirect exchange.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(tag = "kind", rename_all = "snake_case"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    HttpRedirect { from: String, to: String, status: u16 },
    RedirectAddress { uri: String, from: String, to: String },
    RedirectUrl { from: String, to: String },
    Delivered { uri: String },
    Failed { uri: String, reason: FailureReason },
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpRedirect { from, to, status } => write!(f, "HTTP {status} {from} -> {to}"),
            Self::RedirectAddress { uri, from, to } => {
                write!(f, "redirectAddr at {uri}: {from} -> {to}")
            }
            Self::RedirectUrl { from, to } => write!(f, "redirectUrl {from} -> {to}"),
            Self::Delivered { uri } => write!(f, "delivered by {uri}"),
            Self::Failed { uri, reason } => write!(f, "{uri}: {reason}"),
        }
    }
}

/// A candidate's failure together with the exchange that led to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub reason: FailureReason,
    pub trail: Vec<Transition>,
}

impl From<FailureReason> for Failure {
    fn from(reason: FailureReason) -> Self {
        Self {
            reason,
            trail: Vec::new(),
        }
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAttempt {
    pub candidate: Candidate,
    pub reason: FailureReason,
    pub trail: Vec<Transition>,
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovered {
    pub candidate: Candidate,
    pub document: Document,
    /// Candidates that failed before this one, in order.
    pub skipped: Vec<FailedAttempt>,
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(tag = "outcome", rename_all = "snake_case"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryOutcome {
    Success(Discovered),
    Exhausted { attempts: Vec<FailedAttempt> },
}

impl DiscoveryOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn document(&self) -> Option<&Document> {
        match self {
            Self::Success(found) => Some(&found.document),
            Self::Exhausted { .. } => None,
        }
    }

    pub fn attempts(&self) -> &[FailedAttempt] {
        match self {
            Self::Success(found) => &found.skipped,
            Self::Exhausted { attempts } => attempts,
        }
    }
}

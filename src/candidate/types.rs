use std::fmt;

/// Mozilla ISPDB base URL; the email domain is appended as a path segment.
pub const DEFAULT_ISPDB_BASE: &str = "https://autoconfig.thunderbird.net/v1.1";

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "UPPERCASE"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Autoconfig,
    Autodiscover,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Autoconfig => f.write_str("autoconfig"),
            Self::Autodiscover => f.write_str("autodiscover"),
        }
    }
}

/// One location to probe, in priority order within its list.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub uri: String,
    pub method: Method,
}

impl Candidate {
    pub fn get(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            method: Method::Get,
        }
    }

    pub fn post(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            method: Method::Post,
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.uri)
    }
}

/// Domains derived from the best MX host: `full` drops the first label,
/// `main` is the registrable domain.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxDomains {
    pub full: String,
    pub main: String,
}

/// Which `_autodiscover._tcp` SRV targets become candidates.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SrvTargets {
    /// Every target, ranked by priority then weight.
    #[default]
    All,
    /// Only the single preferred target.
    Best,
}

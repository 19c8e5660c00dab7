use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::http::TransportError;

/// Errors raised while loading the suffix table or extracting a registrable
/// domain from it.
#[derive(Debug, Error)]
pub enum SuffixError {
    #[error("cannot open suffix list {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("suffix list unreadable at line {line}: {source}")]
    Load {
        line: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("suffix list contains no entries")]
    EmptyList,
    #[cfg(feature = "with-serde")]
    #[error("suffix list JSON snapshot invalid: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },
    #[error("suffix list download from {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },
    #[error("suffix list download from {url} returned HTTP {status}")]
    Download { url: String, status: u16 },
    #[error("cannot write suffix list: {source}")]
    Write {
        #[source]
        source: std::io::Error,
    },
    #[error("{hostname} is itself a public suffix")]
    NoRegistrableDomain { hostname: String },
    #[error("no public suffix found for {hostname}")]
    NoPublicSuffixFound { hostname: String },
}

impl SuffixError {
    /// True for every failure that prevents a usable table from existing.
    pub fn is_load_error(&self) -> bool {
        !matches!(
            self,
            Self::NoRegistrableDomain { .. } | Self::NoPublicSuffixFound { .. }
        )
    }

    pub(crate) fn open(path: &Path, source: std::io::Error) -> Self {
        Self::Open {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn load(line: usize, source: std::io::Error) -> Self {
        Self::Load { line, source }
    }

    pub(crate) fn transport(url: &str, source: TransportError) -> Self {
        Self::Transport {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn write(source: std::io::Error) -> Self {
        Self::Write { source }
    }

    #[cfg(feature = "with-serde")]
    pub(crate) fn json(source: serde_json::Error) -> Self {
        Self::Json { source }
    }
}

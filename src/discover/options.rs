use std::path::PathBuf;
use std::time::Duration;

use crate::autodiscover::DEFAULT_MAX_REDIRECTS;
use crate::candidate::{DEFAULT_ISPDB_BASE, SrvTargets};

/// Tunables for [`discover`](crate::discover::discover) and
/// [`discover_with`](crate::discover::discover_with).
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    pub ispdb_base: String,
    pub max_redirects: usize,
    /// Per HTTP request. Zero disables the timeout.
    pub timeout: Duration,
    pub user_agent: String,
    /// Drop repeated `(uri, method)` candidates before probing.
    pub dedupe: bool,
    pub srv_targets: SrvTargets,
    /// Public suffix list (`.dat`, or `.json` snapshot). Without one the
    /// MX-derived autoconfig candidates are skipped.
    pub suffix_list: Option<PathBuf>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            ispdb_base: DEFAULT_ISPDB_BASE.to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            timeout: Duration::from_secs(10),
            user_agent: concat!("mailconf/", env!("CARGO_PKG_VERSION")).to_string(),
            dedupe: true,
            srv_targets: SrvTargets::All,
            suffix_list: None,
        }
    }
}

impl DiscoveryOptions {
    /// Provider database base URL, falling back to the Thunderbird ISPDB when
    /// left blank.
    pub fn ispdb_base(&self) -> &str {
        let base = self.ispdb_base.trim();
        if base.is_empty() {
            DEFAULT_ISPDB_BASE
        } else {
            base
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        (!self.timeout.is_zero()).then_some(self.timeout)
    }
}

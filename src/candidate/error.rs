use thiserror::Error;

use crate::dns::DnsError;
use crate::suffix::SuffixError;

/// Why MX-derived autoconfig candidates could not be produced. Never fatal to
/// a discovery; the affected candidates are simply left out.
#[derive(Debug, Error)]
pub enum MxDomainsError {
    #[error("no public suffix table loaded")]
    NoSuffixTable,
    #[error(transparent)]
    Dns(#[from] DnsError),
    #[error("MX exchange {host} has no parent domain")]
    SingleLabel { host: String },
    #[error(transparent)]
    Suffix(#[from] SuffixError),
}

//! Discovery pipeline: parse the address, build the candidate list, walk it.
//!
//! [`discover_with`] takes every collaborator as an argument and is what the
//! tests drive. [`discover`] (features `with-dns` + `with-http`) wires in the
//! system resolver, the `reqwest` client and the suffix list named in
//! [`DiscoveryOptions::suffix_list`].

mod error;
mod options;

pub use error::DiscoverError;
pub use options::DiscoveryOptions;

use tracing::{debug, warn};

use crate::address::EmailAddress;
use crate::attempt::{Discovered, DiscoveryOutcome, run_attempts};
use crate::autoconfig;
use crate::autodiscover::AutodiscoverClient;
use crate::candidate::{Candidate, Protocol, build_candidates, dedupe};
use crate::dns::{LookupMx, LookupSrv};
use crate::http::HttpTransport;
use crate::suffix::SuffixTable;

/// The candidates `discover_with` would probe, in order.
pub fn discovery_candidates<R>(
    address: &EmailAddress,
    protocol: Protocol,
    options: &DiscoveryOptions,
    resolver: &R,
    suffixes: Option<&SuffixTable>,
) -> Vec<Candidate>
where
    R: LookupMx + LookupSrv,
{
    let candidates = build_candidates(resolver, address, protocol, options, suffixes);
    if !options.dedupe {
        return candidates;
    }
    let before = candidates.len();
    let unique = dedupe(candidates);
    if unique.len() != before {
        debug!(removed = before - unique.len(), "duplicate candidates dropped");
    }
    unique
}

pub fn discover_with<R, H>(
    email: &str,
    protocol: Protocol,
    options: &DiscoveryOptions,
    resolver: &R,
    http: &H,
    suffixes: Option<&SuffixTable>,
) -> Result<DiscoveryOutcome, DiscoverError>
where
    R: LookupMx + LookupSrv,
    H: HttpTransport,
{
    let address = EmailAddress::parse(email)?;
    let candidates = discovery_candidates(&address, protocol, options, resolver, suffixes);
    debug!(%address, %protocol, candidates = candidates.len(), "starting discovery");

    let outcome = match protocol {
        Protocol::Autoconfig => run_attempts(&candidates, |candidate| {
            autoconfig::fetch(http, candidate, options.max_redirects)
        }),
        Protocol::Autodiscover => {
            let client = AutodiscoverClient::new(http, options.max_redirects);
            run_attempts(&candidates, |candidate| client.run(candidate, &address))
        }
    };
    Ok(outcome)
}

/// Reads the suffix list named in `options`. A missing or unreadable list is
/// logged and yields `None`.
pub fn load_suffixes(options: &DiscoveryOptions) -> Option<SuffixTable> {
    let path = options.suffix_list.as_ref()?;
    match SuffixTable::from_path(path) {
        Ok(table) => {
            debug!(path = %path.display(), entries = table.len(), "suffix list loaded");
            Some(table)
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "suffix list unusable, MX candidates disabled"
            );
            None
        }
    }
}

#[cfg(all(feature = "with-dns", feature = "with-http"))]
pub fn discover(
    email: &str,
    protocol: Protocol,
    options: &DiscoveryOptions,
) -> Result<DiscoveryOutcome, DiscoverError> {
    EmailAddress::parse(email)?;
    let resolver = crate::dns::system_resolver()?;
    let http = crate::http::HttpClient::from_options(options)?;
    let suffixes = load_suffixes(options);
    discover_with(email, protocol, options, &resolver, &http, suffixes.as_ref())
}

impl DiscoveryOutcome {
    pub fn into_result(self) -> Result<Discovered, DiscoverError> {
        match self {
            Self::Success(found) => Ok(found),
            Self::Exhausted { attempts } => Err(DiscoverError::Exhausted { attempts }),
        }
    }
}

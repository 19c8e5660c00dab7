//! Ordered candidate locations for both discovery protocols.

mod error;
mod types;

pub use error::MxDomainsError;
pub use types::{Candidate, DEFAULT_ISPDB_BASE, Method, MxDomains, Protocol, SrvTargets};

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::address::EmailAddress;
use crate::discover::DiscoveryOptions;
use crate::dns::{LookupMx, LookupSrv};
use crate::records::{SrvRecord, rank_srv, select_best_mx, select_srv};
use crate::suffix::SuffixTable;

const AUTOCONFIG_PATH: &str = "/mail/config-v1.1.xml";
const WELL_KNOWN_AUTOCONFIG_PATH: &str = "/.well-known/autoconfig/mail/config-v1.1.xml";
const AUTODISCOVER_PATH: &str = "/Autodiscover/Autodiscover.xml";

/// The address is form-encoded (`application/x-www-form-urlencoded`) into the query.
fn autoconfig_url(host_domain: &str, address: &EmailAddress) -> String {
    let email: String =
        url::form_urlencoded::byte_serialize(address.to_string().as_bytes()).collect();
    format!("https://autoconfig.{host_domain}{AUTOCONFIG_PATH}?emailaddress={email}")
}

fn ispdb_url(base: &str, domain: &str) -> String {
    format!("{}/{domain}", base.trim_end_matches('/'))
}

/// Autoconfig candidates, all `GET`. The four MX-derived entries are appended
/// only when `mx` is present.
pub fn autoconfig_candidates(
    address: &EmailAddress,
    ispdb_base: &str,
    mx: Option<&MxDomains>,
) -> Vec<Candidate> {
    let domain = address.domain();
    let mut candidates = vec![
        Candidate::get(autoconfig_url(domain, address)),
        Candidate::get(format!("https://{domain}{WELL_KNOWN_AUTOCONFIG_PATH}")),
        Candidate::get(format!("http://autoconfig.{domain}{AUTOCONFIG_PATH}")),
        Candidate::get(ispdb_url(ispdb_base, domain)),
    ];

    if let Some(mx) = mx {
        candidates.extend([
            Candidate::get(autoconfig_url(&mx.full, address)),
            Candidate::get(autoconfig_url(&mx.main, address)),
            Candidate::get(ispdb_url(ispdb_base, &mx.full)),
            Candidate::get(ispdb_url(ispdb_base, &mx.main)),
        ]);
    }
    candidates
}

/// Autodiscover candidates: two well-known `POST` locations, one `POST` per
/// usable SRV target, then the plain-HTTP `GET` fallback.
pub fn autodiscover_candidates(
    address: &EmailAddress,
    srv: &[SrvRecord],
    targets: SrvTargets,
) -> Vec<Candidate> {
    let domain = address.domain();
    let mut candidates = vec![
        Candidate::post(format!("http://{domain}{AUTODISCOVER_PATH}")),
        Candidate::post(format!("https://Autodiscover.{domain}{AUTODISCOVER_PATH}")),
    ];

    let chosen: Vec<&SrvRecord> = match targets {
        SrvTargets::All => rank_srv(srv),
        SrvTargets::Best => select_srv(srv).into_iter().collect(),
    };
    candidates.extend(
        chosen
            .into_iter()
            .filter(|record| !record.is_unavailable())
            .map(|record| Candidate::post(format!("https://{}{AUTODISCOVER_PATH}", record.host()))),
    );

    candidates.push(Candidate::get(format!(
        "http://Autodiscover.{domain}{AUTODISCOVER_PATH}"
    )));
    candidates
}

/// Splits an MX exchange into its parent domain and registrable domain.
pub fn mx_domains_from_host(
    host: &str,
    suffixes: &SuffixTable,
) -> Result<MxDomains, MxDomainsError> {
    let host = crate::suffix::normalize_host(host);
    let full = match host.split_once('.') {
        Some((_, rest)) if !rest.is_empty() => rest.to_string(),
        _ => return Err(MxDomainsError::SingleLabel { host }),
    };
    let main = suffixes.extract_sld(&host)?;
    Ok(MxDomains { full, main })
}

/// Looks up MX records for `domain` and derives [`MxDomains`] from the best one.
pub fn resolve_mx_domains<R: LookupMx>(
    resolver: &R,
    domain: &str,
    suffixes: Option<&SuffixTable>,
) -> Result<MxDomains, MxDomainsError> {
    let suffixes = suffixes.ok_or(MxDomainsError::NoSuffixTable)?;
    let records = resolver.lookup_mx(domain)?;
    let best = select_best_mx(&records)
        .ok_or_else(|| crate::dns::DnsError::no_records("MX", domain))?;
    mx_domains_from_host(best.host(), suffixes)
}

/// Builds the raw, undeduplicated candidate list for `protocol`.
///
/// DNS failures never fail the build: MX problems drop the MX-derived
/// autoconfig entries and SRV problems drop the SRV-derived autodiscover ones.
pub fn build_candidates<R>(
    resolver: &R,
    address: &EmailAddress,
    protocol: Protocol,
    options: &DiscoveryOptions,
    suffixes: Option<&SuffixTable>,
) -> Vec<Candidate>
where
    R: LookupMx + LookupSrv,
{
    let domain = address.domain();
    match protocol {
        Protocol::Autoconfig => {
            let mx = match resolve_mx_domains(resolver, domain, suffixes) {
                Ok(mx) => {
                    debug!(domain, full = %mx.full, main = %mx.main, "MX-derived domains");
                    Some(mx)
                }
                Err(MxDomainsError::Dns(err)) => {
                    debug!(domain, error = %err, "no MX-derived candidates");
                    None
                }
                Err(err) => {
                    warn!(domain, error = %err, "MX-derived candidates dropped");
                    None
                }
            };
            autoconfig_candidates(address, options.ispdb_base(), mx.as_ref())
        }
        Protocol::Autodiscover => {
            let srv = resolver
                .lookup_srv("autodiscover", "tcp", domain)
                .unwrap_or_else(|err| {
                    debug!(domain, error = %err, "no SRV-derived candidates");
                    Vec::new()
                });
            autodiscover_candidates(address, &srv, options.srv_targets)
        }
    }
}

/// Removes repeated `(uri, method)` pairs, keeping the first occurrence.
pub fn dedupe(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| seen.insert((candidate.uri.clone(), candidate.method)))
        .collect()
}

#![forbid(unsafe_code)]
//! mailconf_lib: mail client configuration discovery (autoconfig + autodiscover)

pub mod address;
pub mod attempt;
pub mod autoconfig;
pub mod autodiscover;
pub mod candidate;
pub mod discover;
pub mod dns;
pub mod http;
pub mod records;
pub mod services;
pub mod suffix;

pub use address::{AddressError, EmailAddress};
pub use attempt::{
    Discovered, DiscoveryOutcome, Document, FailedAttempt, FailureReason, Transition,
    run_attempts,
};
pub use autoconfig::ClientConfigSummary;
pub use autodiscover::{AutodiscoverClient, AutodiscoverResponse, RedirectAction};
pub use candidate::{Candidate, Method, MxDomains, Protocol, SrvTargets, build_candidates};
pub use discover::{
    DiscoverError, DiscoveryOptions, discover_with, discovery_candidates, load_suffixes,
};
pub use dns::{DnsError, LookupMx, LookupSrv};
pub use http::{HttpResponse, HttpTransport, TransportError};
pub use records::{MxRecord, SrvRecord, rank_srv, select_best_mx, select_srv};
pub use services::{MailService, ServiceLookup, ServiceStatus, lookup_mail_services};
pub use suffix::{PUBLIC_SUFFIX_LIST_URL, SuffixError, SuffixTable};

#[cfg(all(feature = "with-dns", feature = "with-http"))]
pub use discover::discover;
#[cfg(feature = "with-dns")]
pub use dns::system_resolver;
#[cfg(feature = "with-http")]
pub use http::HttpClient;

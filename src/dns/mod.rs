//! DNS lookups consumed by candidate construction.
//!
//! The engine only sees the [`LookupMx`] and [`LookupSrv`] traits. With the
//! `with-dns` feature both are implemented for the blocking
//! `trust_dns_resolver::Resolver`; see [`system_resolver`].

mod error;
#[cfg(feature = "with-dns")]
mod resolver;

pub use error::DnsError;
#[cfg(feature = "with-dns")]
pub use resolver::system_resolver;

use crate::records::{MxRecord, SrvRecord};

pub trait LookupMx {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError>;
}

pub trait LookupSrv {
    /// Looks up `_<service>._<proto>.<domain>`.
    fn lookup_srv(&self, service: &str, proto: &str, domain: &str)
    -> Result<Vec<SrvRecord>, DnsError>;
}

pub fn srv_name(service: &str, proto: &str, domain: &str) -> String {
    format!("_{service}._{proto}.{domain}")
}

use thiserror::Error;

use crate::address::AddressError;
use crate::attempt::FailedAttempt;
use crate::dns::DnsError;
use crate::http::TransportError;

#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error(transparent)]
    InvalidAddress(#[from] AddressError),
    #[error("DNS resolver unavailable: {0}")]
    Dns(#[from] DnsError),
    #[error("HTTP client unavailable: {0}")]
    Transport(#[from] TransportError),
    #[error("no configuration found ({} candidates failed)", .attempts.len())]
    Exhausted { attempts: Vec<FailedAttempt> },
}

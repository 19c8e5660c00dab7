use thiserror::Error;

#[derive(Debug, Error)]
pub enum DnsError {
    #[error("resolver initialization failed: {source}")]
    ResolverInit {
        #[source]
        source: std::io::Error,
    },
    #[error("no {kind} records for {name}")]
    NoRecords { kind: &'static str, name: String },
    #[cfg(feature = "with-dns")]
    #[error("{kind} lookup for {name} failed: {source}")]
    Lookup {
        kind: &'static str,
        name: String,
        #[source]
        source: trust_dns_resolver::error::ResolveError,
    },
    #[error("{kind} lookup for {name} failed: {message}")]
    Failed {
        kind: &'static str,
        name: String,
        message: String,
    },
}

impl DnsError {
    pub fn no_records(kind: &'static str, name: &str) -> Self {
        Self::NoRecords {
            kind,
            name: name.to_string(),
        }
    }

    pub fn failed(kind: &'static str, name: &str, message: impl Into<String>) -> Self {
        Self::Failed {
            kind,
            name: name.to_string(),
            message: message.into(),
        }
    }

    pub fn is_no_records(&self) -> bool {
        matches!(self, Self::NoRecords { .. })
    }

    #[cfg(feature = "with-dns")]
    pub(crate) fn resolver_init(source: std::io::Error) -> Self {
        Self::ResolverInit { source }
    }

    #[cfg(feature = "with-dns")]
    pub(crate) fn lookup(
        kind: &'static str,
        name: &str,
        source: trust_dns_resolver::error::ResolveError,
    ) -> Self {
        use trust_dns_resolver::error::ResolveErrorKind;

        if matches!(source.kind(), ResolveErrorKind::NoRecordsFound { .. }) {
            return Self::no_records(kind, name);
        }
        Self::Lookup {
            kind,
            name: name.to_string(),
            source,
        }
    }
}

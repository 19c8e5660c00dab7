//! RFC 6186 mail service records (`_submission._tcp`, `_imap._tcp`, ...).

use std::fmt;

use tracing::debug;

use crate::dns::{LookupSrv, srv_name};
use crate::records::{SrvRecord, select_srv};

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MailService {
    Submission,
    Imap,
    Imaps,
    Pop3,
    Pop3s,
}

impl MailService {
    pub const ALL: [Self; 5] = [
        Self::Submission,
        Self::Imap,
        Self::Imaps,
        Self::Pop3,
        Self::Pop3s,
    ];

    /// Service label without the leading underscore.
    pub fn label(self) -> &'static str {
        match self {
            Self::Submission => "submission",
            Self::Imap => "imap",
            Self::Imaps => "imaps",
            Self::Pop3 => "pop3",
            Self::Pop3s => "pop3s",
        }
    }
}

impl fmt::Display for MailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(tag = "status", rename_all = "snake_case"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceStatus {
    Available { selected: SrvRecord },
    /// The preferred record's target is `.`.
    Unavailable,
    /// No records published.
    Absent,
    /// The lookup itself failed.
    Failed { message: String },
}

impl ServiceStatus {
    pub fn selected(&self) -> Option<&SrvRecord> {
        match self {
            Self::Available { selected } => Some(selected),
            _ => None,
        }
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceLookup {
    pub service: MailService,
    pub name: String,
    pub records: Vec<SrvRecord>,
    pub status: ServiceStatus,
}

/// Queries every [`MailService`] for `domain`, in [`MailService::ALL`] order.
pub fn lookup_mail_services<R: LookupSrv>(resolver: &R, domain: &str) -> Vec<ServiceLookup> {
    MailService::ALL
        .into_iter()
        .map(|service| lookup_service(resolver, service, domain))
        .collect()
}

pub fn lookup_service<R: LookupSrv>(
    resolver: &R,
    service: MailService,
    domain: &str,
) -> ServiceLookup {
    let name = srv_name(service.label(), "tcp", domain);
    let (records, status) = match resolver.lookup_srv(service.label(), "tcp", domain) {
        Ok(records) => {
            let status = match select_srv(&records) {
                None => ServiceStatus::Absent,
                Some(best) if best.is_unavailable() => ServiceStatus::Unavailable,
                Some(best) => ServiceStatus::Available {
                    selected: best.clone(),
                },
            };
            (records, status)
        }
        Err(err) if err.is_no_records() => (Vec::new(), ServiceStatus::Absent),
        Err(err) => (
            Vec::new(),
            ServiceStatus::Failed {
                message: err.to_string(),
            },
        ),
    };
    debug!(%name, ?status, "mail service lookup");
    ServiceLookup {
        service,
        name,
        records,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::DnsError;
    use crate::dns::tests::StubResolver;

    #[test]
    fn queries_every_service_in_order() {
        let resolver = StubResolver::empty();
        let lookups = lookup_mail_services(&resolver, "example.com");
        assert_eq!(
            resolver.queries(),
            [
                "_submission._tcp.example.com",
                "_imap._tcp.example.com",
                "_imaps._tcp.example.com",
                "_pop3._tcp.example.com",
                "_pop3s._tcp.example.com",
            ]
        );
        assert!(lookups.iter().all(|l| l.status == ServiceStatus::Absent));
    }

    #[test]
    fn reports_selected_record_per_service() {
        let resolver = StubResolver::empty().with_srv(|name| match name {
            "_imaps._tcp.example.com" => Ok(vec![
                SrvRecord::new(10, 0, 993, "imap2.example.com."),
                SrvRecord::new(0, 1, 993, "imap1.example.com."),
            ]),
            "_pop3._tcp.example.com" => Ok(vec![SrvRecord::new(0, 0, 0, ".")]),
            "_submission._tcp.example.com" => Err(DnsError::failed("SRV", name, "SERVFAIL")),
            _ => Err(DnsError::no_records("SRV", name)),
        });
        let lookups = lookup_mail_services(&resolver, "example.com");

        let imaps = &lookups[2];
        assert_eq!(imaps.service, MailService::Imaps);
        assert_eq!(imaps.records.len(), 2);
        assert_eq!(imaps.status.selected().unwrap().host(), "imap1.example.com");

        assert_eq!(lookups[3].status, ServiceStatus::Unavailable);
        assert!(matches!(lookups[0].status, ServiceStatus::Failed { .. }));
        assert_eq!(lookups[1].status, ServiceStatus::Absent);
    }
}

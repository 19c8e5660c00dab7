use trust_dns_resolver::Resolver;

use super::{DnsError, LookupMx, LookupSrv, srv_name};
use crate::records::{MxRecord, SrvRecord};

/// Builds a blocking resolver from the system configuration.
pub fn system_resolver() -> Result<Resolver, DnsError> {
    Resolver::from_system_conf().map_err(DnsError::resolver_init)
}

fn normalize_name(name: String) -> String {
    let trimmed = name.trim_end_matches('.');
    if trimmed.is_empty() {
        return ".".to_string();
    }
    trimmed.to_ascii_lowercase()
}

impl LookupMx for Resolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError> {
        let lookup =
            Resolver::mx_lookup(self, domain).map_err(|e| DnsError::lookup("MX", domain, e))?;
        let records: Vec<MxRecord> = lookup
            .iter()
            .map(|mx| MxRecord::new(mx.preference(), normalize_name(mx.exchange().to_utf8())))
            .collect();
        if records.is_empty() {
            return Err(DnsError::no_records("MX", domain));
        }
        Ok(records)
    }
}

impl LookupSrv for Resolver {
    fn lookup_srv(
        &self,
        service: &str,
        proto: &str,
        domain: &str,
    ) -> Result<Vec<SrvRecord>, DnsError> {
        let name = srv_name(service, proto, domain);
        let lookup = Resolver::srv_lookup(self, name.as_str())
            .map_err(|e| DnsError::lookup("SRV", &name, e))?;
        let records: Vec<SrvRecord> = lookup
            .iter()
            .map(|srv| {
                SrvRecord::new(
                    srv.priority(),
                    srv.weight(),
                    srv.port(),
                    normalize_name(srv.target().to_utf8()),
                )
            })
            .collect();
        if records.is_empty() {
            return Err(DnsError::no_records("SRV", &name));
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_target_survives_normalization() {
        assert_eq!(normalize_name(".".to_string()), ".");
        assert_eq!(normalize_name("MX1.Example.COM.".to_string()), "mx1.example.com");
    }

    #[test]
    #[ignore = "requires network DNS access"]
    fn resolves_public_mx() {
        let resolver = system_resolver().expect("system resolver");
        let records = resolver.lookup_mx("gmail.com").expect("gmail has MX");
        assert!(!records.is_empty());
    }
}

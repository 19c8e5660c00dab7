//! Email address parsing at the discovery boundary.
//!
//! [`EmailAddress::parse`] splits on the single `@`, rejects empty parts and
//! converts the domain to its lowercase IDNA ASCII form, which is what every
//! candidate URL and DNS query is built from.

mod error;

pub use error::AddressError;

use std::fmt;
use std::str::FromStr;

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress {
    local: String,
    domain: String,
}

impl EmailAddress {
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let input = input.trim();

        let parts: Vec<&str> = input.split('@').collect();
        if parts.len() != 2 {
            return Err(AddressError::invalid(input, "must contain exactly one '@'"));
        }
        let (local, domain) = (parts[0], parts[1]);

        if local.is_empty() {
            return Err(AddressError::invalid(input, "local part is empty"));
        }

        let trimmed = domain.trim_end_matches('.');
        if trimmed.is_empty() {
            return Err(AddressError::invalid(input, "domain is empty"));
        }
        let domain =
            idna::domain_to_ascii(trimmed).map_err(|source| AddressError::idna(input, source))?;
        if domain.is_empty() {
            return Err(AddressError::invalid(input, "domain is empty"));
        }

        Ok(Self {
            local: local.to_string(),
            domain,
        })
    }

    pub fn local(&self) -> &str {
        &self.local
    }

    /// Lowercase ASCII (punycode) form of the domain.
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.local, self.domain)
    }
}

impl FromStr for EmailAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn splits_local_and_domain() {
        let addr = EmailAddress::parse("alice@example.com").unwrap();
        assert_eq!(addr.local(), "alice");
        assert_eq!(addr.domain(), "example.com");
        assert_eq!(addr.to_string(), "alice@example.com");
    }

    #[test]
    fn domain_is_lowercased_and_punycoded() {
        let addr = EmailAddress::parse("bob@Exämple.COM.").unwrap();
        assert!(addr.domain().starts_with("xn--"), "{}", addr.domain());
        assert!(addr.domain().ends_with(".com"));
        assert_eq!(addr.local(), "bob");
    }

    #[test]
    fn rejects_double_at() {
        let err = EmailAddress::parse("a@@b").expect_err("two separators");
        assert!(matches!(err, AddressError::InvalidAddress { .. }));
    }

    #[test]
    fn rejects_empty_parts() {
        assert!(EmailAddress::parse("@example.com").is_err());
        assert!(EmailAddress::parse("alice@").is_err());
        assert!(EmailAddress::parse("alice@.").is_err());
    }

    proptest! {
        #[test]
        fn valid_addresses_round_trip(
            local in "[a-z0-9._+-]{1,20}",
            domain in "[a-z0-9]{1,12}\\.[a-z]{2,6}",
        ) {
            let addr = EmailAddress::parse(&format!("{local}@{domain}")).unwrap();
            prop_assert_eq!(addr.local(), local.as_str());
            prop_assert_eq!(addr.domain(), domain.as_str());
        }

        #[test]
        fn missing_separator_is_invalid(input in "[a-z0-9.]{0,30}") {
            let rejected = matches!(
                EmailAddress::parse(&input),
                Err(AddressError::InvalidAddress { .. })
            );
            prop_assert!(rejected);
        }

        #[test]
        fn extra_separator_is_invalid(
            a in "[a-z]{1,8}",
            b in "[a-z]{1,8}",
            c in "[a-z]{1,8}\\.[a-z]{2,4}",
        ) {
            let input = format!("{a}@{b}@{c}");
            prop_assert!(EmailAddress::parse(&input).is_err());
        }
    }
}

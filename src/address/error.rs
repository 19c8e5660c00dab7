use thiserror::Error;

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("invalid email address '{input}': {reason}")]
    InvalidAddress { input: String, reason: &'static str },
    #[error("invalid email address '{input}': domain IDNA conversion failed")]
    IdnaConversion {
        input: String,
        #[source]
        source: idna::Errors,
    },
}

impl AddressError {
    pub(crate) fn invalid(input: &str, reason: &'static str) -> Self {
        Self::InvalidAddress {
            input: input.to_string(),
            reason,
        }
    }

    pub(crate) fn idna(input: &str, source: idna::Errors) -> Self {
        Self::IdnaConversion {
            input: input.to_string(),
            source,
        }
    }
}

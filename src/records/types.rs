#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MxRecord {
    pub preference: u16,
    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }

    /// Exchange hostname without the trailing root dot.
    pub fn host(&self) -> &str {
        self.exchange.trim_end_matches('.')
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SrvRecord {
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: String,
}

impl SrvRecord {
    pub fn new(priority: u16, weight: u16, port: u16, target: impl Into<String>) -> Self {
        Self {
            priority,
            weight,
            port,
            target: target.into(),
        }
    }

    pub fn host(&self) -> &str {
        self.target.trim_end_matches('.')
    }

    /// A target of `.` means the service is decidedly not available (RFC 2782).
    pub fn is_unavailable(&self) -> bool {
        self.host().is_empty()
    }

    /// True when `self` ranks strictly ahead of `other`.
    pub(crate) fn outranks(&self, other: &Self) -> bool {
        self.priority < other.priority
            || (self.priority == other.priority && self.weight > other.weight)
    }
}

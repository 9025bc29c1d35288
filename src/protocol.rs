//! Transport protocol classes.

use std::fmt;

use crate::Error;

/// Protocol class a rule or packet belongs to.
///
/// Only TCP gets its own class; every other transport shares the `Other`
/// class, which rule files spell `udp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// TCP
    Tcp,
    /// UDP and any other non-TCP transport
    Other,
}

impl Protocol {
    /// Parse a rule-file protocol.
    ///
    /// Accepts the exact literals `tcp` and `udp` only.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "tcp" => Some(Protocol::Tcp),
            "udp" => Some(Protocol::Other),
            _ => None,
        }
    }

    /// Parse a query-side protocol.
    ///
    /// Anything that is not exactly `tcp` falls into the `Other` class.
    pub fn from_str_lossy(s: &str) -> Self {
        if s == "tcp" {
            Protocol::Tcp
        } else {
            Protocol::Other
        }
    }

    /// Get the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Other => "udp",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Protocol::parse(s).ok_or_else(|| Error::InvalidProtocol(s.to_string()))
    }
}

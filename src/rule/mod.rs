//! Rule records and their port/address specifications.

mod address;
mod port;

pub use address::{parse_addr, AddressSpec};
pub use port::{PortInterval, PortSpec};

use std::fmt;

use crate::{Direction, Protocol, Result};

/// A single permit rule: traffic matching all four fields is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleRecord {
    pub direction: Direction,
    pub protocol: Protocol,
    pub port: PortSpec,
    pub address: AddressSpec,
}

impl RuleRecord {
    /// Create a new rule record.
    pub fn new(
        direction: Direction,
        protocol: Protocol,
        port: impl Into<PortSpec>,
        address: impl Into<AddressSpec>,
    ) -> Self {
        Self {
            direction,
            protocol,
            port: port.into(),
            address: address.into(),
        }
    }

    /// Build a record from its four textual fields.
    ///
    /// # Examples
    /// ```
    /// use portgate::rule::RuleRecord;
    ///
    /// let record = RuleRecord::parse_fields("inbound", "tcp", "80", "10.0.0.0-10.0.0.2").unwrap();
    /// assert_eq!(record.to_string(), "inbound,tcp,80,10.0.0.0-10.0.0.2");
    /// ```
    pub fn parse_fields(
        direction: &str,
        protocol: &str,
        port: &str,
        address: &str,
    ) -> Result<Self> {
        Ok(Self {
            direction: direction.parse()?,
            protocol: protocol.parse()?,
            port: port.parse()?,
            address: address.parse()?,
        })
    }
}

impl fmt::Display for RuleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let port = match self.port {
            PortSpec::Single(p) => p.to_string(),
            PortSpec::Range(low, high) => format!("{}-{}", low, high),
        };
        write!(
            f,
            "{},{},{},{}",
            self.direction, self.protocol, port, self.address
        )
    }
}

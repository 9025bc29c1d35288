//! Address specifications and range expansion.

use ipnet::Ipv4AddrRange;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::{Error, Result};

/// Address part of a rule: one IPv4 address or an inclusive `low-high` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressSpec {
    Single(Ipv4Addr),
    Range(Ipv4Addr, Ipv4Addr),
}

impl AddressSpec {
    /// Lowest and highest address, checking that the range is not reversed.
    pub fn bounds(&self) -> Result<(Ipv4Addr, Ipv4Addr)> {
        match *self {
            AddressSpec::Single(addr) => Ok((addr, addr)),
            AddressSpec::Range(low, high) => {
                if u32::from(low) > u32::from(high) {
                    return Err(Error::InvalidAddressRange { low, high });
                }
                Ok((low, high))
            }
        }
    }

    /// Number of addresses this spec expands to.
    pub fn address_count(&self) -> Result<u64> {
        let (low, high) = self.bounds()?;
        Ok(u64::from(u32::from(high)) - u64::from(u32::from(low)) + 1)
    }

    /// Every address covered, in ascending order.
    pub fn addresses(&self) -> Result<Ipv4AddrRange> {
        let (low, high) = self.bounds()?;
        Ok(Ipv4AddrRange::new(low, high))
    }
}

impl From<Ipv4Addr> for AddressSpec {
    fn from(addr: Ipv4Addr) -> Self {
        AddressSpec::Single(addr)
    }
}

impl From<(Ipv4Addr, Ipv4Addr)> for AddressSpec {
    fn from((low, high): (Ipv4Addr, Ipv4Addr)) -> Self {
        AddressSpec::Range(low, high)
    }
}

impl fmt::Display for AddressSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressSpec::Single(addr) => write!(f, "{}", addr),
            AddressSpec::Range(low, high) => write!(f, "{}-{}", low, high),
        }
    }
}

impl FromStr for AddressSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.split_once('-') {
            Some((low, high)) => {
                let spec = AddressSpec::Range(parse_addr(low)?, parse_addr(high)?);
                spec.bounds()?;
                Ok(spec)
            }
            None => Ok(AddressSpec::Single(parse_addr(s)?)),
        }
    }
}

/// Parse a dotted-quad IPv4 address.
pub fn parse_addr(s: &str) -> Result<Ipv4Addr> {
    let s = s.trim();
    s.parse::<Ipv4Addr>()
        .map_err(|_| Error::InvalidAddress(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_address() {
        let spec: AddressSpec = "192.168.1.2".parse().unwrap();
        assert_eq!(spec, AddressSpec::Single(Ipv4Addr::new(192, 168, 1, 2)));
        assert_eq!(spec.address_count().unwrap(), 1);
    }

    #[test]
    fn test_parse_address_range() {
        let spec: AddressSpec = "10.0.0.0-10.0.0.2".parse().unwrap();
        assert_eq!(
            spec,
            AddressSpec::Range(Ipv4Addr::new(10, 0, 0, 0), Ipv4Addr::new(10, 0, 0, 2))
        );
        let addrs: Vec<Ipv4Addr> = spec.addresses().unwrap().collect();
        assert_eq!(
            addrs,
            vec![
                Ipv4Addr::new(10, 0, 0, 0),
                Ipv4Addr::new(10, 0, 0, 1),
                Ipv4Addr::new(10, 0, 0, 2),
            ]
        );
    }

    #[test]
    fn test_range_crosses_octet_boundary() {
        let spec: AddressSpec = "0.0.0.254-0.0.1.1".parse().unwrap();
        assert_eq!(spec.address_count().unwrap(), 4);
        let last = spec.addresses().unwrap().last();
        assert_eq!(last, Some(Ipv4Addr::new(0, 0, 1, 1)));
    }

    #[test]
    fn test_full_range_count() {
        let spec = AddressSpec::Range(Ipv4Addr::new(0, 0, 0, 0), Ipv4Addr::BROADCAST);
        assert_eq!(spec.address_count().unwrap(), 1u64 << 32);
    }

    #[test]
    fn test_invalid_addresses() {
        assert!(matches!(
            "256.0.0.1".parse::<AddressSpec>(),
            Err(Error::InvalidAddress(_))
        ));
        assert!(matches!(
            "10.0.0".parse::<AddressSpec>(),
            Err(Error::InvalidAddress(_))
        ));
        assert!(matches!(
            "10.0.0.5-10.0.0.1".parse::<AddressSpec>(),
            Err(Error::InvalidAddressRange { .. })
        ));
    }
}

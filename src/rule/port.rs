//! Port specifications and intervals.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// A closed port range `[start, end]` with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortInterval {
    start: u16,
    end: u16,
}

impl PortInterval {
    /// Create an interval, rejecting reversed bounds.
    pub fn new(start: u16, end: u16) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidPortRange {
                low: start,
                high: end,
            });
        }
        Ok(Self { start, end })
    }

    /// Interval covering exactly one port.
    pub fn single(port: u16) -> Self {
        Self {
            start: port,
            end: port,
        }
    }

    /// Interval covering every port.
    pub fn full() -> Self {
        Self {
            start: u16::MIN,
            end: u16::MAX,
        }
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    /// Check whether `port` lies inside this interval.
    pub fn contains(&self, port: u16) -> bool {
        self.start <= port && port <= self.end
    }

    /// Number of ports covered.
    pub fn len(&self) -> u32 {
        u32::from(self.end) - u32::from(self.start) + 1
    }

    /// Intervals always cover at least one port.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Smallest interval covering both.
    pub(crate) fn hull(&self, other: &PortInterval) -> PortInterval {
        PortInterval {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for PortInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Port part of a rule: one port or an inclusive `low-high` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSpec {
    Single(u16),
    Range(u16, u16),
}

impl PortSpec {
    /// Normalize to a single interval.
    pub fn interval(&self) -> Result<PortInterval> {
        match *self {
            PortSpec::Single(port) => Ok(PortInterval::single(port)),
            PortSpec::Range(low, high) => PortInterval::new(low, high),
        }
    }
}

impl From<u16> for PortSpec {
    fn from(port: u16) -> Self {
        PortSpec::Single(port)
    }
}

impl From<(u16, u16)> for PortSpec {
    fn from((low, high): (u16, u16)) -> Self {
        PortSpec::Range(low, high)
    }
}

impl FromStr for PortSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.split_once('-') {
            Some((low, high)) => {
                let low = parse_port(low)?;
                let high = parse_port(high)?;
                // Validate bounds up front so a bad range never reaches the store.
                PortInterval::new(low, high)?;
                Ok(PortSpec::Range(low, high))
            }
            None => Ok(PortSpec::Single(parse_port(s)?)),
        }
    }
}

fn parse_port(s: &str) -> Result<u16> {
    let s = s.trim();
    s.parse::<u16>()
        .map_err(|_| Error::InvalidPort(s.to_string()))
}

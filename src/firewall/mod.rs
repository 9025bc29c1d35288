//! Built firewalls and packet acceptance queries.

mod builder;
mod config;

pub use builder::FirewallBuilder;
pub use config::FirewallConfig;

use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::net::Ipv4Addr;
use std::path::Path;
use std::sync::Arc;

use crate::converter::CsvParser;
use crate::portset::PortSet;
use crate::rule::RuleRecord;
use crate::store::{Bucket, BucketStats, RuleStore};
use crate::{Direction, Protocol, Result};

/// Read-only packet matcher.
///
/// A `Firewall` is produced once by [`FirewallBuilder::build`] and cannot be
/// modified afterwards. Cloning is cheap and clones share the same rules, so
/// a single instance can serve any number of threads.
///
/// # Examples
/// ```
/// use portgate::{Firewall, FirewallConfig};
///
/// let rules = "inbound,tcp,80,10.0.0.0-10.0.0.2\n";
/// let firewall = Firewall::from_reader(rules.as_bytes(), FirewallConfig::default()).unwrap();
///
/// assert!(firewall.accept_packet("inbound", "tcp", 80, "10.0.0.1"));
/// assert!(!firewall.accept_packet("inbound", "tcp", 80, "10.0.0.3"));
/// ```
#[derive(Clone)]
pub struct Firewall {
    inner: Arc<Inner>,
}

struct Inner {
    store: RuleStore,
    config: FirewallConfig,
    records: usize,
}

impl Firewall {
    /// Start building a firewall.
    pub fn builder(config: FirewallConfig) -> FirewallBuilder {
        FirewallBuilder::new(config)
    }

    /// Build a firewall from already parsed rules.
    pub fn from_records<'a, I>(records: I, config: FirewallConfig) -> Result<Self>
    where
        I: IntoIterator<Item = &'a RuleRecord>,
    {
        let mut builder = FirewallBuilder::new(config);
        builder.ingest_all(records)?;
        Ok(builder.build())
    }

    /// Build a firewall from a rule file read from `reader`.
    pub fn from_reader<R: Read>(reader: R, config: FirewallConfig) -> Result<Self> {
        let records = CsvParser::new()
            .skip_header(config.skip_header)
            .parse(reader)?;
        Self::from_records(&records, config)
    }

    /// Build a firewall from a rule file on disk.
    pub fn from_path(path: impl AsRef<Path>, config: FirewallConfig) -> Result<Self> {
        let path = path.as_ref();
        log::info!("[{}] loading rules from {:?}", config.name, path);
        let file = File::open(path)?;
        Self::from_reader(file, config)
    }

    /// Check whether any rule permits the packet.
    pub fn accept(
        &self,
        direction: Direction,
        protocol: Protocol,
        port: u16,
        addr: Ipv4Addr,
    ) -> bool {
        self.inner
            .store
            .lookup(Bucket::new(direction, protocol), u32::from(addr))
            .is_some_and(|node| node.permits(port))
    }

    /// Check a packet described by raw strings.
    ///
    /// Never fails: an unknown direction, an unparsable address or a port
    /// outside 0..=65535 all answer `false`. Any protocol other than `tcp`
    /// is matched against the non-TCP rules.
    pub fn accept_packet(&self, direction: &str, protocol: &str, port: u32, address: &str) -> bool {
        let Some(direction) = Direction::parse(direction) else {
            return false;
        };
        let Ok(port) = u16::try_from(port) else {
            return false;
        };
        let Ok(addr) = address.trim().parse::<Ipv4Addr>() else {
            return false;
        };
        self.accept(direction, Protocol::from_str_lossy(protocol), port, addr)
    }

    /// Ports permitted for `addr`, if any rule names it.
    pub fn allowed_ports(
        &self,
        direction: Direction,
        protocol: Protocol,
        addr: Ipv4Addr,
    ) -> Option<&PortSet> {
        self.inner
            .store
            .lookup(Bucket::new(direction, protocol), u32::from(addr))
            .and_then(|node| node.ports())
    }

    /// Get the configuration this firewall was built with.
    pub fn config(&self) -> &FirewallConfig {
        &self.inner.config
    }

    /// Size figures for the built rule store.
    pub fn stats(&self) -> FirewallStats {
        FirewallStats {
            name: self.inner.config.name.clone(),
            records: self.inner.records,
            buckets: self.inner.store.stats(),
        }
    }
}

impl std::fmt::Debug for Firewall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Firewall")
            .field("name", &self.inner.config.name)
            .field("records", &self.inner.records)
            .finish_non_exhaustive()
    }
}

/// Build statistics for a [`Firewall`].
#[derive(Debug, Clone, Serialize)]
pub struct FirewallStats {
    pub name: String,
    pub records: usize,
    pub buckets: Vec<BucketStats>,
}

impl FirewallStats {
    pub fn total_addresses(&self) -> usize {
        self.buckets.iter().map(|b| b.addresses).sum()
    }

    pub fn total_nodes(&self) -> usize {
        self.buckets.iter().map(|b| b.nodes).sum()
    }

    pub fn total_intervals(&self) -> usize {
        self.buckets.iter().map(|b| b.intervals).sum()
    }
}

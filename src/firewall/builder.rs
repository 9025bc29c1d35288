//! Rule ingestion.

use std::sync::Arc;

use super::{Firewall, FirewallConfig, Inner};
use crate::rule::RuleRecord;
use crate::store::{Bucket, RuleStore};
use crate::{Error, Result};

/// Write-phase handle that expands rules into the store.
///
/// Any error leaves the builder half-populated; callers are expected to drop
/// it rather than build from it. [`Firewall::from_records`] does exactly that.
pub struct FirewallBuilder {
    store: RuleStore,
    config: FirewallConfig,
    records: usize,
}

impl FirewallBuilder {
    /// Create a builder with an empty store.
    pub fn new(config: FirewallConfig) -> Self {
        Self {
            store: RuleStore::new(),
            config,
            records: 0,
        }
    }

    /// Expand one rule into per-address insertions.
    ///
    /// An address range is enumerated in ascending order and every address
    /// receives the same port interval.
    pub fn ingest(&mut self, record: &RuleRecord) -> Result<()> {
        let bucket = Bucket::new(record.direction, record.protocol);
        let interval = record.port.interval()?;
        let (low, high) = record.address.bounds()?;
        let count = record.address.address_count()?;

        if let Some(limit) = self.config.max_range_addresses {
            if count > limit {
                return Err(Error::RangeTooLarge {
                    low,
                    high,
                    count,
                    limit,
                });
            }
        }

        if count > 1 {
            log::debug!(
                "[{}] expanding {}-{} ({} addresses) for {} port {}",
                self.config.name,
                low,
                high,
                count,
                bucket,
                interval
            );
        }

        for addr in record.address.addresses()? {
            self.store.insert(bucket, u32::from(addr), interval);
        }

        self.records += 1;
        Ok(())
    }

    /// Parse four textual fields and ingest the resulting rule.
    pub fn ingest_fields(
        &mut self,
        direction: &str,
        protocol: &str,
        port: &str,
        address: &str,
    ) -> Result<()> {
        let record = RuleRecord::parse_fields(direction, protocol, port, address)?;
        self.ingest(&record)
    }

    /// Ingest every record, stopping at the first error.
    pub fn ingest_all<'a, I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a RuleRecord>,
    {
        for record in records {
            self.ingest(record)?;
        }
        Ok(())
    }

    /// Number of rules ingested so far.
    pub fn record_count(&self) -> usize {
        self.records
    }

    /// Freeze the store into a shareable, read-only firewall.
    pub fn build(self) -> Firewall {
        let firewall = Firewall {
            inner: Arc::new(Inner {
                store: self.store,
                config: self.config,
                records: self.records,
            }),
        };

        let stats = firewall.stats();
        log::info!(
            "[{}] built firewall: {} rules, {} addresses, {} trie nodes",
            stats.name,
            stats.records,
            stats.total_addresses(),
            stats.total_nodes()
        );
        for bucket in &stats.buckets {
            log::debug!(
                "[{}] {}: {} addresses, {} intervals",
                stats.name,
                bucket.bucket,
                bucket.addresses,
                bucket.intervals
            );
        }

        firewall
    }
}

impl Default for FirewallBuilder {
    fn default() -> Self {
        Self::new(FirewallConfig::default())
    }
}

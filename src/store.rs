//! Rule storage: one address trie per direction and protocol class.

use serde::Serialize;
use std::fmt;

use crate::rule::PortInterval;
use crate::trie::{AddressTrie, TrieNode};
use crate::{Direction, Protocol};

/// The four (direction, protocol class) combinations rules are filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    InboundTcp,
    InboundOther,
    OutboundTcp,
    OutboundOther,
}

impl Bucket {
    /// All buckets in storage order.
    pub const ALL: [Bucket; 4] = [
        Bucket::InboundTcp,
        Bucket::InboundOther,
        Bucket::OutboundTcp,
        Bucket::OutboundOther,
    ];

    /// Select the bucket for a direction and protocol class.
    pub fn new(direction: Direction, protocol: Protocol) -> Self {
        match (direction, protocol) {
            (Direction::Inbound, Protocol::Tcp) => Bucket::InboundTcp,
            (Direction::Inbound, Protocol::Other) => Bucket::InboundOther,
            (Direction::Outbound, Protocol::Tcp) => Bucket::OutboundTcp,
            (Direction::Outbound, Protocol::Other) => Bucket::OutboundOther,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Bucket::InboundTcp | Bucket::InboundOther => Direction::Inbound,
            Bucket::OutboundTcp | Bucket::OutboundOther => Direction::Outbound,
        }
    }

    pub fn protocol(self) -> Protocol {
        match self {
            Bucket::InboundTcp | Bucket::OutboundTcp => Protocol::Tcp,
            Bucket::InboundOther | Bucket::OutboundOther => Protocol::Other,
        }
    }

    fn index(self) -> usize {
        match self {
            Bucket::InboundTcp => 0,
            Bucket::InboundOther => 1,
            Bucket::OutboundTcp => 2,
            Bucket::OutboundOther => 3,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.direction(), self.protocol())
    }
}

/// Size figures for one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BucketStats {
    pub bucket: Bucket,
    pub addresses: usize,
    pub nodes: usize,
    pub intervals: usize,
}

/// Four independent address tries, one per [`Bucket`].
#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    tries: [AddressTrie; 4],
}

impl RuleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `interval` is permitted for `key` in `bucket`.
    pub fn insert(&mut self, bucket: Bucket, key: u32, interval: PortInterval) {
        self.tries[bucket.index()].insert(key, interval);
    }

    /// Terminal node for `key` in `bucket`, if any rule covers it.
    pub fn lookup(&self, bucket: Bucket, key: u32) -> Option<&TrieNode> {
        self.tries[bucket.index()].lookup(key)
    }

    pub fn trie(&self, bucket: Bucket) -> &AddressTrie {
        &self.tries[bucket.index()]
    }

    /// Per-bucket size figures, in [`Bucket::ALL`] order.
    pub fn stats(&self) -> Vec<BucketStats> {
        Bucket::ALL
            .iter()
            .map(|&bucket| {
                let trie = self.trie(bucket);
                BucketStats {
                    bucket,
                    addresses: trie.address_count(),
                    nodes: trie.node_count(),
                    intervals: trie.interval_count(),
                }
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tries.iter().all(AddressTrie::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_selection_is_exhaustive() {
        for bucket in Bucket::ALL {
            assert_eq!(Bucket::new(bucket.direction(), bucket.protocol()), bucket);
        }
        let indices: Vec<usize> = Bucket::ALL.iter().map(|b| b.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_buckets_are_isolated() {
        let mut store = RuleStore::new();
        store.insert(Bucket::InboundTcp, 42, PortInterval::single(80));

        assert!(store.lookup(Bucket::InboundTcp, 42).is_some());
        assert!(store.lookup(Bucket::InboundOther, 42).is_none());
        assert!(store.lookup(Bucket::OutboundTcp, 42).is_none());
        assert!(store.lookup(Bucket::OutboundOther, 42).is_none());
    }

    #[test]
    fn test_stats() {
        let mut store = RuleStore::new();
        assert!(store.is_empty());

        store.insert(Bucket::OutboundOther, 7, PortInterval::single(53));
        store.insert(Bucket::OutboundOther, 7, PortInterval::single(123));

        let stats = store.stats();
        assert_eq!(stats.len(), 4);
        assert_eq!(stats[3].bucket, Bucket::OutboundOther);
        assert_eq!(stats[3].addresses, 1);
        assert_eq!(stats[3].intervals, 2);
        assert_eq!(stats[3].nodes, 33);
        assert_eq!(stats[0].addresses, 0);
        assert_eq!(stats[0].nodes, 1);
    }

    #[test]
    fn test_bucket_display() {
        assert_eq!(Bucket::InboundTcp.to_string(), "inbound/tcp");
        assert_eq!(Bucket::OutboundOther.to_string(), "outbound/udp");
    }
}

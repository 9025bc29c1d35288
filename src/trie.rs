//! Fixed-depth binary trie over IPv4 address bits.
//!
//! Each level consumes one address bit, most significant first. A node at
//! depth 32 stands for one complete address and is terminal once an address
//! has been inserted there; only terminal nodes carry a [`PortSet`].
//! Nodes live in an arena and refer to their children by index.

use std::net::Ipv4Addr;

use crate::portset::PortSet;
use crate::rule::PortInterval;

/// Number of levels below the root.
pub const ADDRESS_BITS: u32 = 32;

const ROOT: usize = 0;

/// One bit position on a path from the root.
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    children: [Option<usize>; 2],
    /// Present iff the node is terminal.
    ports: Option<PortSet>,
}

impl TrieNode {
    /// True iff this node stands for an explicitly inserted address.
    pub fn is_terminal(&self) -> bool {
        self.ports.is_some()
    }

    /// Permitted ports, `None` for internal prefix nodes.
    pub fn ports(&self) -> Option<&PortSet> {
        self.ports.as_ref()
    }

    /// Check whether this node permits `port`.
    pub fn permits(&self, port: u16) -> bool {
        self.ports.as_ref().is_some_and(|ports| ports.contains(port))
    }
}

/// Binary trie keyed on 32-bit addresses.
#[derive(Debug, Clone)]
pub struct AddressTrie {
    nodes: Vec<TrieNode>,
    terminals: usize,
}

impl AddressTrie {
    /// Create a trie holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            terminals: 0,
        }
    }

    /// Insert `interval` for the address `key`, creating the path as needed.
    pub fn insert(&mut self, key: u32, interval: PortInterval) {
        let mut current = ROOT;
        for depth in 0..ADDRESS_BITS {
            let bit = bit_at(key, depth);
            current = match self.nodes[current].children[bit] {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[current].children[bit] = Some(child);
                    child
                }
            };
        }

        let node = &mut self.nodes[current];
        if node.ports.is_none() {
            self.terminals += 1;
        }
        node.ports
            .get_or_insert_with(PortSet::new)
            .merge_insert(interval);
    }

    /// Insert `interval` for `addr`.
    pub fn insert_addr(&mut self, addr: Ipv4Addr, interval: PortInterval) {
        self.insert(u32::from(addr), interval);
    }

    /// Find the terminal node for `key`.
    ///
    /// Returns `None` as soon as a child along the path is missing, and also
    /// when the full path exists but only as a prefix of other addresses.
    pub fn lookup(&self, key: u32) -> Option<&TrieNode> {
        let mut current = ROOT;
        for depth in 0..ADDRESS_BITS {
            current = self.nodes[current].children[bit_at(key, depth)]?;
        }
        let node = &self.nodes[current];
        node.is_terminal().then_some(node)
    }

    /// Find the terminal node for `addr`.
    pub fn lookup_addr(&self, addr: Ipv4Addr) -> Option<&TrieNode> {
        self.lookup(u32::from(addr))
    }

    /// Number of distinct addresses inserted.
    pub fn address_count(&self) -> usize {
        self.terminals
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of port intervals across all addresses.
    pub fn interval_count(&self) -> usize {
        self.nodes
            .iter()
            .filter_map(TrieNode::ports)
            .map(PortSet::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.terminals == 0
    }
}

impl Default for AddressTrie {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn bit_at(key: u32, depth: u32) -> usize {
    ((key >> (ADDRESS_BITS - 1 - depth)) & 1) as usize
}

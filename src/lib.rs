//! portgate - packet acceptance matching over static permit rules.
//!
//! Rules say which `(direction, protocol, port, address)` combinations are
//! permitted. They are loaded once into four binary tries, one per direction
//! and protocol class, keyed on the 32-bit IPv4 address. Each address that any
//! rule names owns a canonical set of permitted port intervals. After loading,
//! a query walks at most 32 trie levels and checks one interval set, no matter
//! how many rules were loaded.
//!
//! # Quick Start
//!
//! ```
//! use portgate::{Firewall, FirewallConfig};
//!
//! let rules = "\
//! inbound,tcp,80,192.168.1.2
//! outbound,tcp,10000-20000,192.168.10.11
//! inbound,udp,53,192.168.1.1-192.168.2.5
//! ";
//! let firewall = Firewall::from_reader(rules.as_bytes(), FirewallConfig::default()).unwrap();
//!
//! assert!(firewall.accept_packet("inbound", "tcp", 80, "192.168.1.2"));
//! assert!(firewall.accept_packet("inbound", "udp", 53, "192.168.2.1"));
//! assert!(!firewall.accept_packet("outbound", "tcp", 80, "192.168.1.2"));
//! ```
//!
//! # Lifecycle
//!
//! 1. Ingestion: a [`FirewallBuilder`] expands every rule into per-address
//!    insertions. Address ranges are enumerated one address at a time; port
//!    ranges are merged into each address's [`PortSet`]. Bad input is an error
//!    and the half-built store is thrown away.
//! 2. Querying: [`FirewallBuilder::build`] freezes the store into a
//!    [`Firewall`], a cheap-to-clone read-only handle. Queries never fail;
//!    anything that does not match a rule answers `false`.
//!
//! # Rule File Format
//!
//! ```text
//! direction,protocol,port,ip_address
//! inbound,tcp,80,192.168.1.2
//! outbound,udp,1000-2000,52.12.48.92
//! inbound,tcp,8080,255.255.255.0-255.255.255.255
//! ```
//!
//! `direction` is `inbound` or `outbound`, `protocol` is `tcp` or `udp`,
//! `port` is a port or an inclusive range, `ip_address` is a dotted-quad IPv4
//! address or an inclusive range of two addresses.

mod direction;
mod error;
mod global;
mod protocol;

pub mod converter;
pub mod firewall;
pub mod portset;
pub mod rule;
pub mod store;
pub mod trie;

// Re-export core types
pub use direction::Direction;
pub use error::{Error, Result};
pub use protocol::Protocol;

pub use firewall::{Firewall, FirewallBuilder, FirewallConfig, FirewallStats};
pub use portset::PortSet;
pub use rule::{AddressSpec, PortInterval, PortSpec, RuleRecord};
pub use store::{Bucket, BucketStats, RuleStore};
pub use trie::AddressTrie;

// Re-export process-wide API functions
pub use global::{accept_packet, current, install, install_from_path, is_installed};

//! Firewall configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::Result;

/// Configuration for building a [`Firewall`](super::Firewall).
///
/// Loaded from YAML; every field is optional:
///
/// ```yaml
/// name: edge
/// max_range_addresses: 65536
/// skip_header: true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FirewallConfig {
    /// Name used in log output
    pub name: String,
    /// Largest address range a single rule may expand to (unlimited if unset)
    pub max_range_addresses: Option<u64>,
    /// Skip a leading `direction,protocol,port,ip_address` line in rule files
    pub skip_header: bool,
}

impl FirewallConfig {
    /// Create a config with the given name and defaults for everything else.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the address range expansion limit.
    pub fn with_max_range_addresses(mut self, limit: u64) -> Self {
        self.max_range_addresses = Some(limit);
        self
    }

    /// Parse a config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a config from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}

impl Default for FirewallConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            max_range_addresses: None,
            skip_header: true,
        }
    }
}

//! Process-wide firewall and public API.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::path::Path;

use crate::error::Result;
use crate::firewall::{Firewall, FirewallConfig};

/// Global firewall
static GLOBAL_FIREWALL: Lazy<RwLock<Option<Firewall>>> = Lazy::new(|| RwLock::new(None));

/// Install `firewall` as the process-wide firewall, replacing any previous one.
///
/// Queries already running keep the firewall they started with.
pub fn install(firewall: Firewall) {
    let stats = firewall.stats();
    let mut guard = GLOBAL_FIREWALL.write();
    *guard = Some(firewall);
    log::debug!(
        "Installed firewall {} ({} rules)",
        stats.name,
        stats.records
    );
}

/// Build a firewall from a rule file and install it.
///
/// On error the previously installed firewall, if any, stays in place.
pub fn install_from_path(path: impl AsRef<Path>, config: FirewallConfig) -> Result<()> {
    let firewall = Firewall::from_path(path, config)?;
    install(firewall);
    Ok(())
}

/// Check if a process-wide firewall is installed.
pub fn is_installed() -> bool {
    GLOBAL_FIREWALL.read().is_some()
}

/// Get a handle to the installed firewall.
pub fn current() -> Option<Firewall> {
    GLOBAL_FIREWALL.read().clone()
}

/// Check a packet against the process-wide firewall.
///
/// Answers `false` when nothing is installed.
///
/// # Examples
/// ```ignore
/// use portgate::accept_packet;
///
/// if accept_packet("inbound", "tcp", 443, "203.0.113.7") {
///     println!("allowed");
/// }
/// ```
pub fn accept_packet(direction: &str, protocol: &str, port: u32, address: &str) -> bool {
    match current() {
        Some(firewall) => firewall.accept_packet(direction, protocol, port, address),
        None => false,
    }
}

//! Error types for portgate.

use thiserror::Error;

/// Error type for portgate operations.
///
/// Every variant is an ingestion-time failure. The query path never
/// produces an `Error`; unmatched or malformed queries simply answer `false`.
#[derive(Error, Debug)]
pub enum Error {
    /// Direction other than `inbound` / `outbound`
    #[error("invalid direction: {0}")]
    InvalidDirection(String),

    /// Protocol other than `tcp` / `udp`
    #[error("invalid protocol: {0}")]
    InvalidProtocol(String),

    /// Port that is not an integer in 0..=65535
    #[error("invalid port: {0}")]
    InvalidPort(String),

    /// Port range whose low bound exceeds its high bound
    #[error("invalid port range: {low}-{high}")]
    InvalidPortRange { low: u16, high: u16 },

    /// Malformed dotted-quad IPv4 address
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    /// Address range whose low bound exceeds its high bound
    #[error("invalid address range: {low}-{high}")]
    InvalidAddressRange {
        low: std::net::Ipv4Addr,
        high: std::net::Ipv4Addr,
    },

    /// Address range larger than the configured expansion limit
    #[error("address range {low}-{high} spans {count} addresses, limit is {limit}")]
    RangeTooLarge {
        low: std::net::Ipv4Addr,
        high: std::net::Ipv4Addr,
        count: u64,
        limit: u64,
    },

    /// Rule file line that could not be turned into a record
    #[error("line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for portgate operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for toctoc.
//!
//! Uses `thiserror` for ergonomic error definitions. Per-attempt failures
//! (`KnockError`) are reported and skipped; everything else stops the run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::types::AddressFamily;

/// Failure of a single knock attempt. Never fatal to the run.
#[derive(Error, Debug)]
pub enum KnockError {
    #[error("unable to allocate socket: {0}")]
    SocketAllocation(#[source] io::Error),

    #[error("unable to connect: {0}")]
    Connect(#[source] io::Error),

    #[error("unable to sendto: {0}")]
    Send(#[source] io::Error),
}

/// Host name resolution errors.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("unable to get address info for '{host}': {source}")]
    Lookup {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("no {family} addresses found for '{host}'")]
    NoAddresses { host: String, family: AddressFamily },
}

/// Settings file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config from {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid config format: {0}")]
    InvalidFormat(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidFormat(e.to_string())
    }
}

/// Errors that keep the knock sequence from starting.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Missing hostname and/or port(s)")]
    MissingArguments,

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CliError {
    /// Whether the usage line should follow the diagnostic.
    pub fn wants_usage(&self) -> bool {
        matches!(self, Self::MissingArguments)
    }
}

/// Result type alias for knock attempts.
pub type KnockResult<T> = Result<T, KnockError>;

/// Result type alias for settings handling.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knock_error_messages() {
        let err = KnockError::Connect(io::Error::from(io::ErrorKind::ConnectionRefused));
        assert!(err.to_string().starts_with("unable to connect: "));

        let err = KnockError::Send(io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(err.to_string().starts_with("unable to sendto: "));
    }

    #[test]
    fn test_usage_hint() {
        assert!(CliError::MissingArguments.wants_usage());

        let err = CliError::from(ResolveError::NoAddresses {
            host: "example.test".into(),
            family: AddressFamily::Ipv6,
        });
        assert!(!err.wants_usage());
        assert_eq!(err.to_string(), "no IPv6 addresses found for 'example.test'");
    }
}

//! # toctoc - Port Knocking
//!
//! Resolves a host name and touches each given port in order on every
//! resolved address: a non-blocking TCP connect bounded by a timeout, or a
//! single zero-length UDP datagram. A fixed delay separates consecutive
//! ports. Nothing is reported about reachability; the tool only knocks.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use toctoc::config::KnockConfig;
//! use toctoc::knocker::run_knocks;
//! use toctoc::types::{resolve, PortList};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let config = KnockConfig::default();
//!     let ports: PortList = ["7000", "8000", "9000"].into_iter().collect();
//!     let targets = resolve("example.com", config.family).await.unwrap();
//!
//!     run_knocks(&config, "example.com", &ports, &targets).await;
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Ports and resolved targets
//! - [`knocker`] - The `Knocker` trait, TCP/UDP knockers and the sequence
//! - [`config`] - Per-run configuration and the settings file
//! - [`cli`] - Argument parsing and the `execute` entry point
//! - [`error`] - Error types
//! - [`output`] - Console output

pub mod cli;
pub mod config;
pub mod error;
pub mod knocker;
pub mod output;
pub mod types;

// Re-export commonly used types
pub use config::KnockConfig;
pub use error::{CliError, ConfigError, KnockError, ResolveError};
pub use knocker::{KnockSequence, KnockSummary, Knocker, Transport};
pub use types::{AddressFamily, KnockPort, KnockTarget, PortList};

//! Knocker module - runs the knock sequence over TCP or UDP.
//!
//! The sequence is strictly sequential: one socket at a time, closed before
//! the next attempt starts.

pub mod sequence;
pub mod tcp;
pub mod traits;
pub mod udp;

use crate::config::KnockConfig;
use crate::types::{KnockTarget, PortList};

pub use sequence::{KnockSequence, KnockSummary};
pub use tcp::TcpKnocker;
pub use traits::{Knocker, Transport};
pub use udp::UdpKnocker;

/// Knock on every port of every target with the configured transport.
pub async fn run_knocks(
    config: &KnockConfig,
    hostname: &str,
    ports: &PortList,
    targets: &[KnockTarget],
) -> KnockSummary {
    let sequence = KnockSequence::new(hostname, ports.as_slice(), config.delay);

    match config.transport {
        Transport::Tcp => {
            sequence
                .run(&TcpKnocker::new(config.timeout), targets)
                .await
        }
        Transport::Udp => sequence.run(&UdpKnocker::new(), targets).await,
    }
}

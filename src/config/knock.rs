//! Per-run knock configuration.

use crate::knocker::Transport;
use crate::types::AddressFamily;
use std::time::Duration;

/// Default per-attempt TCP wait in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 200;

/// Default pause between ports in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 200;

/// Immutable configuration for one knock run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnockConfig {
    /// Address family restriction for resolution.
    pub family: AddressFamily,
    /// TCP connect or UDP datagram.
    pub transport: Transport,
    /// Upper bound on the wait for a TCP connect.
    pub timeout: Duration,
    /// Pause between consecutive ports of one address.
    pub delay: Duration,
}

impl Default for KnockConfig {
    fn default() -> Self {
        Self {
            family: AddressFamily::Any,
            transport: Transport::Tcp,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
        }
    }
}

impl KnockConfig {
    pub fn with_family(mut self, family: AddressFamily) -> Self {
        self.family = family;
        self
    }

    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Timeout in whole milliseconds, as echoed to the operator.
    pub fn timeout_ms(&self) -> u128 {
        self.timeout.as_millis()
    }

    /// Delay in whole milliseconds, as echoed to the operator.
    pub fn delay_ms(&self) -> u128 {
        self.delay.as_millis()
    }
}

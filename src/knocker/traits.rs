//! Knocker trait abstraction.
//!
//! A knock is split in two steps so the sequence can tell a socket that
//! could not be created (the attempt is skipped) from a knock that failed
//! after the port notice was printed.

use crate::error::KnockResult;
use crate::types::KnockTarget;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use socket2::{Protocol, Type};
use std::fmt;
use std::net::SocketAddr;

/// How a port is knocked on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Non-blocking TCP connect with a bounded wait.
    #[default]
    Tcp,
    /// A single zero-length UDP datagram.
    Udp,
}

impl Transport {
    /// Marker appended to the port in the knock transcript.
    pub const fn suffix(self) -> char {
        match self {
            Self::Tcp => 'T',
            Self::Udp => 'U',
        }
    }

    pub fn socket_type(self) -> Type {
        match self {
            Self::Tcp => Type::STREAM,
            Self::Udp => Type::DGRAM,
        }
    }

    pub fn protocol(self) -> Protocol {
        match self {
            Self::Tcp => Protocol::TCP,
            Self::Udp => Protocol::UDP,
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp => write!(f, "tcp"),
            Self::Udp => write!(f, "udp"),
        }
    }
}

/// Trait for knock implementations.
///
/// `allocate` hands out a fresh socket per attempt and `knock` consumes it,
/// so the socket is closed when `knock` returns, whatever the outcome.
#[async_trait]
pub trait Knocker: Send + Sync {
    /// Per-attempt socket owned by a single knock.
    type Socket: Send;

    /// Get the transport this knocker uses.
    fn transport(&self) -> Transport;

    /// Create the socket for one attempt against `target`.
    fn allocate(&self, target: &KnockTarget) -> KnockResult<Self::Socket>;

    /// Knock on `dst` with a socket from [`Knocker::allocate`].
    async fn knock(&self, socket: Self::Socket, dst: SocketAddr) -> KnockResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_display() {
        assert_eq!(Transport::Tcp.to_string(), "tcp");
        assert_eq!(Transport::Udp.to_string(), "udp");
        assert_eq!(Transport::Tcp.suffix(), 'T');
        assert_eq!(Transport::Udp.suffix(), 'U');
    }

    #[test]
    fn test_transport_socket_type() {
        assert_eq!(Transport::Tcp.socket_type(), Type::STREAM);
        assert_eq!(Transport::Udp.socket_type(), Type::DGRAM);
        assert_eq!(Transport::default(), Transport::Tcp);
    }
}

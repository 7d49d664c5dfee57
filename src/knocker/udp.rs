//! UDP knocker.
//!
//! Sends one zero-length datagram per port and never waits for an answer.

use crate::error::{KnockError, KnockResult};
use crate::knocker::traits::{Knocker, Transport};
use crate::types::KnockTarget;
use async_trait::async_trait;
use socket2::{SockAddr, Socket};
use std::net::SocketAddr;

/// Empty payload: the datagram itself is the knock.
const KNOCK_PAYLOAD: &[u8] = &[];

/// UDP datagram knocker.
#[derive(Debug, Default)]
pub struct UdpKnocker;

impl UdpKnocker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Knocker for UdpKnocker {
    type Socket = Socket;

    fn transport(&self) -> Transport {
        Transport::Udp
    }

    fn allocate(&self, target: &KnockTarget) -> KnockResult<Socket> {
        let transport = self.transport();
        Socket::new(
            target.domain(),
            transport.socket_type(),
            Some(transport.protocol()),
        )
        .map_err(KnockError::SocketAllocation)
    }

    async fn knock(&self, socket: Socket, dst: SocketAddr) -> KnockResult<()> {
        let sent = socket
            .send_to(KNOCK_PAYLOAD, &SockAddr::from(dst))
            .map_err(KnockError::Send)?;
        tracing::trace!(%dst, sent, "udp knock sent");
        Ok(())
    }
}

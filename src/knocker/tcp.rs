//! TCP knocker.
//!
//! Starts a non-blocking connect and waits, at most for the configured
//! timeout, for the socket to turn writable. The knock is the SYN itself:
//! whether the handshake completed, was refused or timed out is not looked
//! at.

use crate::error::{KnockError, KnockResult};
use crate::knocker::traits::{Knocker, Transport};
use crate::types::KnockTarget;
use async_trait::async_trait;
use socket2::{SockAddr, Socket};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// TCP connect knocker.
pub struct TcpKnocker {
    timeout: Duration,
}

impl TcpKnocker {
    /// Create a TCP knocker waiting at most `timeout` per attempt.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// A non-blocking connect that has been started but not finished.
fn in_progress(e: &io::Error) -> bool {
    e.raw_os_error() == Some(libc::EINPROGRESS) || e.kind() == io::ErrorKind::WouldBlock
}

#[async_trait]
impl Knocker for TcpKnocker {
    type Socket = Socket;

    fn transport(&self) -> Transport {
        Transport::Tcp
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
        socket.set_nonblocking(true).map_err(KnockError::Connect)?;

        match socket.connect(&SockAddr::from(dst)) {
            Ok(()) => {}
            Err(e) if in_progress(&e) => {}
            Err(e) => return Err(KnockError::Connect(e)),
        }

        let stream =
            TcpStream::from_std(std::net::TcpStream::from(socket)).map_err(KnockError::Connect)?;

        // Readiness, a late connect error and the timeout all end the attempt alike.
        let _ = timeout(self.timeout, stream.writable()).await;
        tracing::trace!(%dst, "tcp knock finished");

        Ok(())
    }
}

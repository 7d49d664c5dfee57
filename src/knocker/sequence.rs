//! The knock sequence: every resolved address, every port, in order.

use crate::knocker::traits::Knocker;
use crate::output;
use crate::types::{KnockPort, KnockTarget};
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// What happened during one sequence run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KnockSummary {
    /// Knocks that got a socket and were sent.
    pub attempted: usize,
    /// Attempted knocks that reported an error.
    pub failed: usize,
    /// Attempts dropped because no socket could be allocated.
    pub skipped: usize,
    /// Inter-attempt delays taken.
    pub pauses: usize,
}

/// Knocks on a fixed port list, one resolved address after another.
pub struct KnockSequence<'a> {
    hostname: &'a str,
    ports: &'a [KnockPort],
    delay: Duration,
}

impl<'a> KnockSequence<'a> {
    pub fn new(hostname: &'a str, ports: &'a [KnockPort], delay: Duration) -> Self {
        Self {
            hostname,
            ports,
            delay,
        }
    }

    /// Run the sequence against `targets` in resolver order.
    ///
    /// Per-attempt failures are reported and the sequence moves on. The
    /// delay separates consecutive ports of one address; there is none after
    /// an address's last port, nor after an attempt whose socket could not
    /// be allocated.
    pub async fn run<K: Knocker>(&self, knocker: &K, targets: &[KnockTarget]) -> KnockSummary {
        let mut summary = KnockSummary::default();
        let transport = knocker.transport();

        for target in targets {
            output::print_target(self.hostname, target);

            for (idx, port) in self.ports.iter().enumerate() {
                let socket = match knocker.allocate(target) {
                    Ok(socket) => socket,
                    Err(e) => {
                        debug!(address = %target, port = port.as_u16(), error = %e, "knock skipped");
                        output::print_error(&e.to_string());
                        summary.skipped += 1;
                        continue;
                    }
                };

                if port.is_truncated() {
                    debug!(raw = port.raw(), port = port.as_u16(), "port truncated to 16 bits");
                }

                output::print_knock(port, transport);
                let dst = target.with_port(port.as_u16());
                summary.attempted += 1;

                if let Err(e) = knocker.knock(socket, dst).await {
                    debug!(%dst, error = %e, "knock failed");
                    output::print_error(&e.to_string());
                    summary.failed += 1;
                }

                if idx + 1 != self.ports.len() {
                    sleep(self.delay).await;
                    summary.pauses += 1;
                }
            }
        }

        debug!(
            attempted = summary.attempted,
            failed = summary.failed,
            skipped = summary.skipped,
            "knock sequence finished"
        );
        summary
    }
}

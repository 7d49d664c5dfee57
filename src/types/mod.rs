//! Core knock types.
//!
//! Ports keep the operator's spelling alongside the value sent on the wire;
//! targets carry resolved addresses in resolver order.

mod port;
mod target;

pub use port::{atoi, KnockPort, PortList};
pub use target::{resolve, AddressFamily, KnockTarget};

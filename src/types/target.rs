//! Knock targets and host name resolution.
//!
//! Resolution goes through the operating system resolver so `/etc/hosts`
//! and the usual resolver configuration apply. Addresses come back in
//! resolver order and are then filtered by the requested family.

use crate::error::ResolveError;
use serde::{Deserialize, Serialize};
use socket2::Domain;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use tokio::net::lookup_host;

/// Address family restriction for resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    /// Use whatever the resolver returns.
    #[default]
    Any,
    /// IPv4 only (`-4`).
    #[serde(alias = "inet", alias = "4")]
    Ipv4,
    /// IPv6 only (`-6`).
    #[serde(alias = "inet6", alias = "6")]
    Ipv6,
}

impl AddressFamily {
    /// Check whether an address belongs to this family.
    pub fn admits(self, ip: &IpAddr) -> bool {
        match self {
            Self::Any => true,
            Self::Ipv4 => ip.is_ipv4(),
            Self::Ipv6 => ip.is_ipv6(),
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "IP"),
            Self::Ipv4 => write!(f, "IPv4"),
            Self::Ipv6 => write!(f, "IPv6"),
        }
    }
}

/// A resolved endpoint. The port is filled in per knock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KnockTarget {
    addr: SocketAddr,
}

impl KnockTarget {
    /// Create a target from a resolved socket address.
    pub fn new(addr: SocketAddr) -> Self {
        Self { addr }
    }

    pub fn ip(&self) -> IpAddr {
        self.addr.ip()
    }

    pub fn is_ipv6(&self) -> bool {
        self.addr.is_ipv6()
    }

    /// Socket domain matching this target's family.
    pub fn domain(&self) -> Domain {
        Domain::for_address(self.addr)
    }

    /// Destination for one knock: the resolved address with its port replaced.
    ///
    /// IPv6 flow info and scope id are kept.
    pub fn with_port(&self, port: u16) -> SocketAddr {
        let mut dst = self.addr;
        dst.set_port(port);
        dst
    }

    /// Numeric host form, `addr%scope` for scoped IPv6 addresses.
    pub fn numeric_host(&self) -> String {
        match self.addr {
            SocketAddr::V6(v6) if v6.scope_id() != 0 => {
                format!("{}%{}", v6.ip(), v6.scope_id())
            }
            _ => self.addr.ip().to_string(),
        }
    }
}

impl From<SocketAddr> for KnockTarget {
    fn from(addr: SocketAddr) -> Self {
        Self::new(addr)
    }
}

impl From<IpAddr> for KnockTarget {
    fn from(ip: IpAddr) -> Self {
        Self::new(SocketAddr::new(ip, 0))
    }
}

impl fmt::Display for KnockTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.numeric_host())
    }
}

/// Resolve `host` into knock targets, keeping resolver order.
pub async fn resolve(host: &str, family: AddressFamily) -> Result<Vec<KnockTarget>, ResolveError> {
    let addrs = lookup_host((host, 0))
        .await
        .map_err(|source| ResolveError::Lookup {
            host: host.to_string(),
            source,
        })?;

    let targets = select(addrs, family);
    if targets.is_empty() {
        return Err(ResolveError::NoAddresses {
            host: host.to_string(),
            family,
        });
    }

    tracing::debug!(host, %family, count = targets.len(), "resolved knock targets");
    Ok(targets)
}

/// Keep the addresses of `family`, in the order given.
fn select(addrs: impl IntoIterator<Item = SocketAddr>, family: AddressFamily) -> Vec<KnockTarget> {
    addrs
        .into_iter()
        .filter(|addr| family.admits(&addr.ip()))
        .map(KnockTarget::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr, SocketAddrV6};

    fn mixed() -> Vec<SocketAddr> {
        vec![
            "[2001:db8::1]:0".parse().unwrap(),
            "192.0.2.1:0".parse().unwrap(),
            "[2001:db8::2]:0".parse().unwrap(),
            "192.0.2.2:0".parse().unwrap(),
        ]
    }

    #[test]
    fn test_select_any_keeps_order() {
        let targets = select(mixed(), AddressFamily::Any);
        let hosts: Vec<String> = targets.iter().map(KnockTarget::numeric_host).collect();
        assert_eq!(hosts, vec!["2001:db8::1", "192.0.2.1", "2001:db8::2", "192.0.2.2"]);
    }

    #[test]
    fn test_select_by_family() {
        let v4 = select(mixed(), AddressFamily::Ipv4);
        assert_eq!(v4.len(), 2);
        assert!(v4.iter().all(|t| !t.is_ipv6()));

        let v6 = select(mixed(), AddressFamily::Ipv6);
        assert_eq!(v6.len(), 2);
        assert!(v6.iter().all(KnockTarget::is_ipv6));
    }

    #[test]
    fn test_with_port() {
        let target = KnockTarget::from(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 7)));
        assert_eq!(target.with_port(7000), "192.0.2.7:7000".parse().unwrap());
        assert_eq!(target.with_port(8000).port(), 8000);
        assert_eq!(target.domain(), Domain::IPV4);
    }

    #[test]
    fn test_scoped_numeric_host() {
        let addr = SocketAddrV6::new(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1), 0, 0, 3);
        let target = KnockTarget::new(SocketAddr::V6(addr));
        assert_eq!(target.numeric_host(), "fe80::1%3");

        let dst = target.with_port(22);
        match dst {
            SocketAddr::V6(v6) => assert_eq!(v6.scope_id(), 3),
            SocketAddr::V4(_) => panic!("expected IPv6 destination"),
        }
    }

    #[tokio::test]
    async fn test_resolve_literal() {
        let targets = resolve("127.0.0.1", AddressFamily::Any).await.unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].ip(), IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[tokio::test]
    async fn test_resolve_family_mismatch() {
        let result = resolve("127.0.0.1", AddressFamily::Ipv6).await;
        assert!(matches!(result, Err(ResolveError::NoAddresses { .. })));
    }
}

//! Port types for the knock sequence.
//!
//! A `KnockPort` keeps the text the operator typed next to the number that
//! goes on the wire. Parsing never fails: it follows C `atoi` and then keeps
//! the low 16 bits, so `"70000"` knocks on 4464 and `"abc"` on 0.

use std::fmt;

/// Parse the leading integer of `s` the way C `atoi` does.
///
/// Leading whitespace and one sign are accepted, parsing stops at the first
/// non-digit and an input without digits yields 0. Overflow wraps.
pub fn atoi(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| {
            acc.wrapping_mul(10).wrapping_add(i64::from(d - b'0'))
        });

    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}

/// A single port to knock on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KnockPort {
    raw: String,
    number: u16,
}

impl KnockPort {
    /// Build a port from operator input. Out-of-range values are truncated.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let number = atoi(&raw) as u16;
        Self { raw, number }
    }

    /// The text as given on the command line.
    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The port number placed in the destination address.
    #[inline]
    pub const fn as_u16(&self) -> u16 {
        self.number
    }

    /// Whether the number differs from what the operator wrote.
    pub fn is_truncated(&self) -> bool {
        i64::from(self.number) != atoi(&self.raw)
    }
}

impl fmt::Display for KnockPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Ordered list of ports. Order and duplicates are kept exactly as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortList {
    ports: Vec<KnockPort>,
}

impl PortList {
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KnockPort> {
        self.ports.iter()
    }

    pub fn as_slice(&self) -> &[KnockPort] {
        &self.ports
    }
}

impl<S: Into<String>> FromIterator<S> for PortList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ports: iter.into_iter().map(KnockPort::parse).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PortList {
    type Item = &'a KnockPort;
    type IntoIter = std::slice::Iter<'a, KnockPort>;

    fn into_iter(self) -> Self::IntoIter {
        self.ports.iter()
    }
}

impl fmt::Display for PortList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.ports.iter().map(KnockPort::raw).collect();
        write!(f, "{}", parts.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atoi() {
        assert_eq!(atoi("80"), 80);
        assert_eq!(atoi("  443"), 443);
        assert_eq!(atoi("+22"), 22);
        assert_eq!(atoi("-5"), -5);
        assert_eq!(atoi("8080abc"), 8080);
        assert_eq!(atoi("abc"), 0);
        assert_eq!(atoi(""), 0);
        assert_eq!(atoi("-"), 0);
    }

    #[test]
    fn test_port_parsing() {
        let port = KnockPort::parse("22");
        assert_eq!(port.as_u16(), 22);
        assert_eq!(port.raw(), "22");
        assert!(!port.is_truncated());
    }

    #[test]
    fn test_port_truncation() {
        let port = KnockPort::parse("70000");
        assert_eq!(port.as_u16(), 4464);
        assert_eq!(port.to_string(), "70000");
        assert!(port.is_truncated());

        assert_eq!(KnockPort::parse("65536").as_u16(), 0);
        assert_eq!(KnockPort::parse("-1").as_u16(), 65535);
        assert_eq!(KnockPort::parse("http").as_u16(), 0);
    }

    #[test]
    fn test_port_list_keeps_order_and_duplicates() {
        let list: PortList = ["7000", "8000", "7000", "9000"].into_iter().collect();
        let numbers: Vec<u16> = list.iter().map(KnockPort::as_u16).collect();
        assert_eq!(numbers, vec![7000, 8000, 7000, 9000]);
        assert_eq!(list.len(), 4);
        assert_eq!(list.to_string(), "7000,8000,7000,9000");
    }
}

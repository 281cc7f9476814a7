//! Address Codec Module
//!
//! Converts between textual host/port pairs and native socket addresses.
//! Two resolution modes exist and are never mixed: numeric-only construction
//! for the I/O paths (rejects host names, so it can never block on DNS) and
//! an explicitly blocking bulk lookup for callers that accept the stall.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use libc::c_int;

use crate::consts::{AF_INET, AF_INET6, SOCK_STREAM};
use crate::errors::ResolveError;

#[cfg(unix)]
const AI_NUMERICHOST: i32 = libc::AI_NUMERICHOST;
#[cfg(windows)]
const AI_NUMERICHOST: i32 = windows_sys::Win32::Networking::WinSock::AI_NUMERICHOST as i32;

#[cfg(unix)]
const AF_UNSPEC: i32 = libc::AF_UNSPEC;
#[cfg(windows)]
const AF_UNSPEC: i32 = windows_sys::Win32::Networking::WinSock::AF_UNSPEC as i32;

#[cfg(unix)]
const NO_ADDRESS: i32 = libc::EAI_NONAME;
#[cfg(windows)]
const NO_ADDRESS: i32 = windows_sys::Win32::Networking::WinSock::WSAHOST_NOT_FOUND;

/// One usable result of a bulk lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddr {
    /// Address family of the result (`AF_INET` or `AF_INET6`).
    pub family: c_int,
    /// Numeric IP text.
    pub addr: String,
}

/// Build a native socket address from numeric host/port text.
///
/// The lookup runs with the numeric-host flag set, so host names are
/// rejected with a resolution-domain error instead of triggering a blocking
/// DNS query. The caller's creation triple narrows the candidate set the
/// same way the eventual socket call will.
///
/// # Arguments
///
/// * `host` - Numeric IP literal
/// * `port` - Port number
/// * `family` - Address family of the socket the address is for
/// * `socktype` - Socket type hint
/// * `protocol` - Protocol hint
///
/// # Returns
///
/// * `Ok(SocketAddr)` - First matching native address
/// * `Err(ResolveError)` - Resolution-domain failure
pub fn numeric_sockaddr(
    host: &str,
    port: u16,
    family: c_int,
    socktype: c_int,
    protocol: c_int,
) -> Result<SocketAddr, ResolveError> {
    let hints = dns_lookup::AddrInfoHints {
        socktype,
        protocol,
        address: family,
        flags: AI_NUMERICHOST,
    };
    let service = port.to_string();
    let addrs = dns_lookup::getaddrinfo(Some(host), Some(&service), Some(hints))
        .map_err(ResolveError::from)?;

    addrs
        .filter_map(Result::ok)
        .map(|info| info.sockaddr)
        .next()
        .ok_or(ResolveError(NO_ADDRESS))
}

/// Decode a native address into numeric `(ip, port)` text form.
pub fn endpoint(addr: &SocketAddr) -> (String, u16) {
    (addr.ip().to_string(), addr.port())
}

/// Resolve a host name to every usable address, blocking until done.
///
/// Runs a full `getaddrinfo` query with stream-socket hints and keeps only
/// IPv4/IPv6 stream results; other families are skipped, not errors.
///
/// # Deprecation
///
/// This call blocks the calling thread for the full duration of the DNS
/// query and is unsuitable for latency-sensitive or cooperatively scheduled
/// paths. Prefer an external asynchronous resolver and feed the numeric
/// result to the I/O operations.
pub fn resolve(host: &str) -> Result<Vec<ResolvedAddr>, ResolveError> {
    let hints = dns_lookup::AddrInfoHints {
        socktype: SOCK_STREAM,
        protocol: 0,
        address: AF_UNSPEC,
        flags: 0,
    };
    let addrs =
        dns_lookup::getaddrinfo(Some(host), None, Some(hints)).map_err(ResolveError::from)?;

    let mut out = Vec::new();
    for info in addrs.filter_map(Result::ok) {
        match info.sockaddr {
            SocketAddr::V4(v4) => out.push(ResolvedAddr {
                family: AF_INET,
                addr: v4.ip().to_string(),
            }),
            SocketAddr::V6(v6) => out.push(ResolvedAddr {
                family: AF_INET6,
                addr: v6.ip().to_string(),
            }),
        }
    }
    Ok(out)
}

/// Canonicalize an IP literal by parsing and re-rendering it.
///
/// IPv4 accepts the classic shorthand forms in addition to dotted quads:
/// a trailing part fills the remaining bytes, so `"127.1"` renders as
/// `"127.0.0.1"`. Malformed input yields `None`, never a hard failure.
pub fn normalize_ip(host: &str, want_ipv6: bool) -> Option<String> {
    if want_ipv6 {
        host.parse::<Ipv6Addr>().ok().map(|addr| addr.to_string())
    } else {
        parse_ipv4_lenient(host).map(|addr| addr.to_string())
    }
}

/// Parse an IPv4 literal with 1..=4 dot-separated decimal parts; the last
/// part spans the remaining bytes of the address.
fn parse_ipv4_lenient(text: &str) -> Option<Ipv4Addr> {
    let parts: Vec<&str> = text.split('.').collect();
    if parts.is_empty() || parts.len() > 4 {
        return None;
    }

    let mut nums = Vec::with_capacity(parts.len());
    for part in &parts {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        nums.push(part.parse::<u32>().ok()?);
    }

    let value = match nums[..] {
        [a] => a,
        [a, b] => {
            if a > 0xff || b > 0x00ff_ffff {
                return None;
            }
            (a << 24) | b
        }
        [a, b, c] => {
            if a > 0xff || b > 0xff || c > 0xffff {
                return None;
            }
            (a << 24) | (b << 16) | c
        }
        [a, b, c, d] => {
            if a > 0xff || b > 0xff || c > 0xff || d > 0xff {
                return None;
            }
            (a << 24) | (b << 16) | (c << 8) | d
        }
        _ => return None,
    };
    Some(Ipv4Addr::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{IPPROTO_TCP, IPPROTO_UDP, SOCK_DGRAM};

    #[test]
    fn test_numeric_sockaddr_v4() {
        let addr = numeric_sockaddr("127.0.0.1", 8080, AF_INET, SOCK_STREAM, IPPROTO_TCP).unwrap();
        assert_eq!(addr, SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)));
    }

    #[test]
    fn test_numeric_sockaddr_v6() {
        let addr = numeric_sockaddr("::1", 53, AF_INET6, SOCK_DGRAM, IPPROTO_UDP).unwrap();
        assert_eq!(addr, SocketAddr::from((Ipv6Addr::LOCALHOST, 53)));
    }

    #[test]
    fn test_numeric_sockaddr_rejects_hostname() {
        // Numeric-only mode must fail on names rather than query DNS.
        let result = numeric_sockaddr("localhost", 80, AF_INET, SOCK_STREAM, IPPROTO_TCP);
        assert!(result.is_err());
    }

    #[test]
    fn test_numeric_sockaddr_family_mismatch() {
        let result = numeric_sockaddr("::1", 80, AF_INET, SOCK_STREAM, IPPROTO_TCP);
        assert!(result.is_err());
    }

    #[test]
    fn test_endpoint_decode() {
        let addr = SocketAddr::from((Ipv4Addr::new(10, 0, 0, 7), 9000));
        assert_eq!(endpoint(&addr), ("10.0.0.7".to_string(), 9000));
    }

    #[test]
    fn test_resolve_loopback_name() {
        let results = resolve("localhost").unwrap();
        assert!(!results.is_empty());
        for entry in &results {
            assert!(entry.family == AF_INET || entry.family == AF_INET6);
        }
        assert!(results
            .iter()
            .any(|e| e.addr == "127.0.0.1" || e.addr == "::1"));
    }

    #[test]
    fn test_resolve_numeric_literal() {
        let results = resolve("127.0.0.1").unwrap();
        assert_eq!(results[0].family, AF_INET);
        assert_eq!(results[0].addr, "127.0.0.1");
    }

    #[test]
    fn test_normalize_shorthand() {
        assert_eq!(normalize_ip("127.1", false), Some("127.0.0.1".to_string()));
        assert_eq!(normalize_ip("10.1.2", false), Some("10.1.0.2".to_string()));
        assert_eq!(normalize_ip("1", false), Some("0.0.0.1".to_string()));
    }

    #[test]
    fn test_normalize_full_quad() {
        assert_eq!(
            normalize_ip("192.168.0.1", false),
            Some("192.168.0.1".to_string())
        );
    }

    #[test]
    fn test_normalize_ipv6() {
        assert_eq!(normalize_ip("::1", true), Some("::1".to_string()));
        assert_eq!(
            normalize_ip("0:0:0:0:0:0:0:1", true),
            Some("::1".to_string())
        );
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert_eq!(normalize_ip("not-an-ip", false), None);
        assert_eq!(normalize_ip("", false), None);
        assert_eq!(normalize_ip("256.1.1.1", false), None);
        assert_eq!(normalize_ip("1.2.3.4.5", false), None);
        assert_eq!(normalize_ip("127.0.0.1", true), None);
    }
}

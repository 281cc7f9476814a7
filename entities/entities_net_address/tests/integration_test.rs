//! Integration tests for entities_net_address crate
//!
//! These tests verify the address codec and error domains through the
//! public crate surface.

use entities_net_address::*;

#[test]
fn test_numeric_and_decode_roundtrip() {
    let addr = numeric_sockaddr(
        "127.0.0.1",
        4242,
        consts::AF_INET,
        consts::SOCK_STREAM,
        consts::IPPROTO_TCP,
    )
    .unwrap();
    assert_eq!(endpoint(&addr), ("127.0.0.1".to_string(), 4242));
}

#[test]
fn test_error_domains_are_distinct_types() {
    let io_domain = Errno(consts::ECONNREFUSED);
    let resolve_domain = numeric_sockaddr(
        "no-such-host.invalid",
        80,
        consts::AF_INET,
        consts::SOCK_STREAM,
        consts::IPPROTO_TCP,
    )
    .unwrap_err();

    // Each domain renders through its own lookup.
    assert!(!io_domain.strerror().is_empty());
    assert!(!resolve_domain.strerror().is_empty());
}

#[test]
fn test_normalize_ip_examples() {
    assert_eq!(normalize_ip("127.1", false).as_deref(), Some("127.0.0.1"));
    assert_eq!(normalize_ip("::1", true).as_deref(), Some("::1"));
    assert_eq!(normalize_ip("not-an-ip", false), None);
}

#[test]
fn test_resolved_addr_fields() {
    let results = resolve("127.0.0.1").unwrap();
    assert!(results
        .iter()
        .all(|r| r.family == consts::AF_INET && r.addr == "127.0.0.1"));
}

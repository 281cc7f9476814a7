//! Integration tests for frameworks_platform_init crate
//!
//! Verifies that socket operations work after bootstrap, and that repeated
//! bootstrap calls stay harmless around live sockets.

use adapters_socket::Socket;
use entities_net_address::consts::*;
use frameworks_platform_init::startup;

#[test]
fn test_sockets_usable_after_startup() {
    startup();

    let sock = Socket::open(AF_INET, SOCK_DGRAM, IPPROTO_UDP).unwrap();
    sock.bind("127.0.0.1", 0).unwrap();
    let (ip, port) = sock.getsockname().unwrap();
    assert_eq!(ip, "127.0.0.1");
    assert!(port > 0);
}

#[test]
fn test_repeated_startup_around_live_sockets() {
    startup();
    let sock = Socket::open(AF_INET, SOCK_STREAM, IPPROTO_TCP).unwrap();
    startup();
    sock.bind("127.0.0.1", 0).unwrap();
    assert!(sock.getsockname().is_ok());
}

//! Integration tests for entities_stream_cipher crate
//!
//! Exercises the cipher contract through the public surface: creation,
//! symmetric transform, and in-place rekeying.

use entities_stream_cipher::Rc4;

#[test]
fn test_contract_roundtrip() {
    let mut sender = Rc4::new(b"session key");
    let mut receiver = Rc4::new(b"session key");

    let wire = sender.crypt(b"datagram payload");
    assert_ne!(wire, b"datagram payload");
    assert_eq!(receiver.crypt(&wire), b"datagram payload");
}

#[test]
fn test_reset_reuses_state_allocation() {
    let mut cipher = Rc4::new(b"first");
    let before = cipher.crypt(b"probe");

    cipher.reset(b"first");
    let after = cipher.crypt(b"probe");
    assert_eq!(before, after);
}

#[test]
fn test_large_buffer_same_length() {
    let mut cipher = Rc4::new(b"bulk");
    let data = vec![0x5au8; 1 << 16];
    assert_eq!(cipher.crypt(&data).len(), data.len());
}

//! Entities Layer: RC4 Stream Cipher
//!
//! Provides the symmetric stream-cipher state used by script-host transports
//! for lightweight payload obfuscation. The transform is its own inverse, so
//! one operation covers both encryption and decryption.
//!
//! This crate has no coupling to the socket layer; it is a pure-computation
//! leaf in the layered architecture.

pub mod rc4;

pub use rc4::Rc4;

//! Adapters Layer: Socket and TCP/UDP Networking
//!
//! Provides the socket object model the script host binds to: descriptor
//! lifecycle, stream and datagram I/O over IPv4/IPv6, option access, and
//! non-blocking connect monitoring, with one platform-neutral surface over
//! the POSIX and WinSock socket APIs.
//!
//! ## Overview
//!
//! The `adapters_socket` crate provides:
//! - **Socket handles**: one native descriptor per [`Socket`], with the
//!   creation triple retained for introspection and inherited by `accept`
//! - **Stream and datagram I/O**: send/recv and sendto/recvfrom with the
//!   host's uniform raw-error return convention
//! - **Option access**: integer and byte-blob socket options through
//!   [`OptionValue`]
//! - **Connect monitoring**: a zero-timeout readiness check for pending
//!   non-blocking connects
//!
//! ## Architecture
//!
//! This crate is part of the adapters layer in the layered architecture.
//! It depends on:
//! - `entities_net_address`: address codec, error domains, and constants
//!
//! Platform differences are confined to the private `sys` module, selected
//! at build time. The crate performs no multiplexing and no internal
//! locking; one handle belongs to one thread of control at a time.

pub mod options;
pub mod socket;
mod sys;

pub use options::{OptionValue, MAX_OPT_LEN};
pub use socket::{SockError, Socket, DEFAULT_BACKLOG, DEFAULT_RECV_BUFSIZE};
pub use sys::{RawSock, INVALID_SOCK};

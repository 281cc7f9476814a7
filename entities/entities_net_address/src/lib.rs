//! Entities Layer: Network Addresses and Error Domains
//!
//! Provides the address and error value types shared by the socket layer.
//! This crate implements numeric address resolution, blocking bulk name
//! lookup, IP literal normalization, and the two numeric error domains the
//! socket layer reports in (raw OS error numbers and resolution errors).
//!
//! ## Overview
//!
//! The `entities_net_address` crate provides:
//! - **Constants**: address families, socket types, protocols, option
//!   levels/names, and the errno subset the script host dispatches on
//! - **Address codec**: numeric-only sockaddr construction (never blocks on
//!   DNS), native address decoding, and IP literal normalization
//! - **Bulk resolution**: an explicitly blocking `getaddrinfo` lookup
//! - **Error domains**: [`Errno`] (raw OS error passthrough) and
//!   [`ResolveError`] (the disjoint resolution error space)
//!
//! ## Architecture
//!
//! This crate is a leaf in the layered architecture; dependencies flow
//! inward, so it depends on no other workspace crate.

pub mod address;
pub mod consts;
pub mod errors;

pub use address::{endpoint, normalize_ip, numeric_sockaddr, resolve, ResolvedAddr};
pub use errors::{Errno, ResolveError};

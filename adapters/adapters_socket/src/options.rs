//! Socket Option Module
//!
//! Marshaling for the generic option surface. Option values are either a
//! native integer or an opaque byte blob; the tagged variant keeps dispatch
//! explicit, and the blob length is bounded so a get can never allocate an
//! unbounded buffer on behalf of script code.

use libc::c_int;

/// Upper bound on an opaque option blob, in bytes.
pub const MAX_OPT_LEN: usize = 1024;

/// A socket option value.
///
/// Integer options cover the common flag/size cases (`SO_REUSEADDR`,
/// `SO_SNDBUF`, ...); byte blobs cover structured options such as
/// `SO_LINGER`, laid out exactly as the platform expects them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Fixed-size native integer option.
    Int(c_int),
    /// Opaque option buffer, passed through verbatim.
    Bytes(Vec<u8>),
}

impl OptionValue {
    /// Native byte layout of the value, as handed to the OS.
    pub fn to_native(&self) -> Vec<u8> {
        match self {
            OptionValue::Int(v) => v.to_ne_bytes().to_vec(),
            OptionValue::Bytes(b) => b.clone(),
        }
    }

    /// The integer payload, if this is an integer option.
    pub fn as_int(&self) -> Option<c_int> {
        match self {
            OptionValue::Int(v) => Some(*v),
            OptionValue::Bytes(_) => None,
        }
    }

    /// The blob payload, if this is a byte option.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            OptionValue::Int(_) => None,
            OptionValue::Bytes(b) => Some(b),
        }
    }
}

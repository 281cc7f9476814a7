//! Error Domain Module
//!
//! The two numeric error domains of the socket layer. [`Errno`] carries the
//! platform's raw error number for socket calls, unmodified; [`ResolveError`]
//! carries `getaddrinfo`-style resolution codes. The domains are disjoint and
//! each has its own string rendering.

use std::fmt;
use std::io;

/// Raw platform error number from a socket operation.
///
/// The number is passed through exactly as the OS reported it (errno on
/// POSIX, `WSAGetLastError` on Windows); no translation into a portable
/// taxonomy is performed. Host code compares against the constants in
/// [`crate::consts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Errno(pub i32);

impl Errno {
    /// Read the error number of the last failed OS call on this thread.
    pub fn last() -> Self {
        Errno(io::Error::last_os_error().raw_os_error().unwrap_or(0))
    }

    /// Extract the raw OS error from an `io::Error`.
    ///
    /// Synthetic errors without an OS number collapse to `EIO`.
    pub fn from_io(err: &io::Error) -> Self {
        Errno(err.raw_os_error().unwrap_or(libc::EIO))
    }

    /// Platform message text for this error number.
    pub fn strerror(&self) -> String {
        io::Error::from_raw_os_error(self.0).to_string()
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.strerror(), self.0)
    }
}

impl std::error::Error for Errno {}

/// Resolution failure code, in the `getaddrinfo` error domain.
///
/// Distinct numeric space from [`Errno`]; the two are never conflated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveError(pub i32);

impl ResolveError {
    /// Resolver message text for this code.
    #[cfg(unix)]
    pub fn strerror(&self) -> String {
        // gai_strerror returns a pointer to a static message table entry.
        let msg = unsafe { std::ffi::CStr::from_ptr(libc::gai_strerror(self.0)) };
        msg.to_string_lossy().into_owned()
    }

    /// Resolver message text for this code.
    ///
    /// On Windows the resolution codes share the WSA error space, so the
    /// system message lookup applies.
    #[cfg(windows)]
    pub fn strerror(&self) -> String {
        io::Error::from_raw_os_error(self.0).to_string()
    }
}

impl From<dns_lookup::LookupError> for ResolveError {
    fn from(err: dns_lookup::LookupError) -> Self {
        ResolveError(err.error_num())
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.strerror(), self.0)
    }
}

impl std::error::Error for ResolveError {}

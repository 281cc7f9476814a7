//! Socket Constants Module
//!
//! The numeric constant surface exposed to the script host: address
//! families, socket types, protocols, option levels/names, and the errno
//! subset host code dispatches on. Values are the platform's native numbers
//! passed through as `c_int`; on Windows the errno names map to the
//! corresponding `WSAE*` codes so host code can stay platform-agnostic.

#[cfg(windows)]
use libc::c_int;

// Address families
#[cfg(unix)]
pub use libc::{AF_INET, AF_INET6};
#[cfg(windows)]
pub const AF_INET: c_int = windows_sys::Win32::Networking::WinSock::AF_INET as c_int;
#[cfg(windows)]
pub const AF_INET6: c_int = windows_sys::Win32::Networking::WinSock::AF_INET6 as c_int;

// Socket types
#[cfg(unix)]
pub use libc::{SOCK_DGRAM, SOCK_STREAM};
#[cfg(windows)]
pub const SOCK_STREAM: c_int = windows_sys::Win32::Networking::WinSock::SOCK_STREAM as c_int;
#[cfg(windows)]
pub const SOCK_DGRAM: c_int = windows_sys::Win32::Networking::WinSock::SOCK_DGRAM as c_int;

// Protocols
#[cfg(unix)]
pub use libc::{IPPROTO_TCP, IPPROTO_UDP};
#[cfg(windows)]
pub const IPPROTO_TCP: c_int = windows_sys::Win32::Networking::WinSock::IPPROTO_TCP as c_int;
#[cfg(windows)]
pub const IPPROTO_UDP: c_int = windows_sys::Win32::Networking::WinSock::IPPROTO_UDP as c_int;

// Option level and names
#[cfg(unix)]
pub use libc::{SOL_SOCKET, SO_KEEPALIVE, SO_LINGER, SO_RCVBUF, SO_REUSEADDR, SO_SNDBUF};
#[cfg(windows)]
pub const SOL_SOCKET: c_int = windows_sys::Win32::Networking::WinSock::SOL_SOCKET as c_int;
#[cfg(windows)]
pub const SO_REUSEADDR: c_int = windows_sys::Win32::Networking::WinSock::SO_REUSEADDR as c_int;
#[cfg(windows)]
pub const SO_LINGER: c_int = windows_sys::Win32::Networking::WinSock::SO_LINGER as c_int;
#[cfg(windows)]
pub const SO_KEEPALIVE: c_int = windows_sys::Win32::Networking::WinSock::SO_KEEPALIVE as c_int;
#[cfg(windows)]
pub const SO_SNDBUF: c_int = windows_sys::Win32::Networking::WinSock::SO_SNDBUF as c_int;
#[cfg(windows)]
pub const SO_RCVBUF: c_int = windows_sys::Win32::Networking::WinSock::SO_RCVBUF as c_int;

// Platform-conditional option names
#[cfg(any(target_os = "linux", target_os = "android", target_vendor = "apple"))]
pub use libc::SO_REUSEPORT;
#[cfg(target_vendor = "apple")]
pub use libc::{SO_LINGER_SEC, SO_NOSIGPIPE, SO_NREAD, SO_NWRITE};

// Errno subset dispatched on by host code. On Windows these are the WSAE*
// values reported by `WSAGetLastError`, exposed under the POSIX names.
#[cfg(unix)]
pub use libc::{EAGAIN, ECONNREFUSED, EINPROGRESS, EINTR, EISCONN};
#[cfg(windows)]
pub const EINTR: c_int = windows_sys::Win32::Networking::WinSock::WSAEINTR;
#[cfg(windows)]
pub const EAGAIN: c_int = windows_sys::Win32::Networking::WinSock::WSAEWOULDBLOCK;
#[cfg(windows)]
pub const EINPROGRESS: c_int = windows_sys::Win32::Networking::WinSock::WSAEINPROGRESS;
#[cfg(windows)]
pub const ECONNREFUSED: c_int = windows_sys::Win32::Networking::WinSock::WSAECONNREFUSED;
#[cfg(windows)]
pub const EISCONN: c_int = windows_sys::Win32::Networking::WinSock::WSAEISCONN;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_constants_distinct() {
        assert_ne!(AF_INET, AF_INET6);
        assert_ne!(SOCK_STREAM, SOCK_DGRAM);
        assert_ne!(IPPROTO_TCP, IPPROTO_UDP);
    }

    #[test]
    fn test_errno_constants_nonzero() {
        for code in [EINTR, EAGAIN, EINPROGRESS, ECONNREFUSED, EISCONN] {
            assert_ne!(code, 0);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_constants_match_platform() {
        assert_eq!(AF_INET, libc::AF_INET);
        assert_eq!(SOCK_STREAM, libc::SOCK_STREAM);
        assert_eq!(SOL_SOCKET, libc::SOL_SOCKET);
    }
}

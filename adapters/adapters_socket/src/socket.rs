//! Socket Module
//!
//! The socket object model exposed to the script host. Each [`Socket`] owns
//! exactly one native descriptor plus the family/type/protocol triple it was
//! created with; the full operation surface (connect, bind, listen, accept,
//! stream and datagram I/O, option access, introspection, close) lives here.
//!
//! Error numbers are the platform's own, passed through untranslated; host
//! code dispatches on the constants re-exported by `entities_net_address`.
//! Blocking behavior is purely a function of the descriptor's blocking flag:
//! this layer never multiplexes, times out, or retries on its own. The one
//! readiness primitive offered is [`Socket::check_async_connect`], a
//! zero-timeout poll of a single descriptor; readiness across many sockets
//! belongs to an external event loop fed by [`Socket::fileno`].

use std::fmt;

use entities_net_address::{endpoint, numeric_sockaddr, Errno, ResolveError};
use libc::c_int;
use socket2::SockAddr;

use crate::options::{OptionValue, MAX_OPT_LEN};
use crate::sys;

/// Default read size for `recv` when the caller gives no length.
///
/// Tunable: 4096 minus the host-side string framing overhead. Deployments
/// without that overhead can pass an explicit 4096 instead.
pub const DEFAULT_RECV_BUFSIZE: usize = 4079;

/// Default backlog for `listen` when the caller gives none.
pub const DEFAULT_BACKLOG: c_int = 256;

/// Socket operation failure.
///
/// `Os` and `Resolve` carry the two pass-through numeric domains and are
/// never conflated. `Argument` is caller misuse detected before any OS call
/// is made; `InvalidHandle` is any operation (other than close) on a handle
/// whose descriptor was already released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SockError {
    /// Caller misuse, rejected before any syscall.
    Argument(&'static str),
    /// Operation on a closed handle.
    InvalidHandle,
    /// Raw OS error from a socket call.
    Os(Errno),
    /// Resolution-domain failure while building an address.
    Resolve(ResolveError),
}

impl fmt::Display for SockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SockError::Argument(msg) => write!(f, "invalid argument: {}", msg),
            SockError::InvalidHandle => write!(f, "socket is closed"),
            SockError::Os(errno) => write!(f, "{}", errno),
            SockError::Resolve(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SockError {}

/// A native socket descriptor with its creation triple.
///
/// The descriptor is owned exclusively; `accept` produces an independent
/// new owner. `close` is idempotent and also runs on drop, so explicit
/// release and the host's finalizer path can both invoke it without
/// double-closing the OS resource. A `Socket` is not synchronized; callers
/// that share one across threads of control must serialize access
/// themselves.
pub struct Socket {
    fd: sys::RawSock,
    family: c_int,
    socktype: c_int,
    protocol: c_int,
}

impl Socket {
    /// Create a socket from a family/type/protocol triple.
    ///
    /// # Arguments
    ///
    /// * `family` - `AF_INET` or `AF_INET6`
    /// * `socktype` - `SOCK_STREAM` or `SOCK_DGRAM`
    /// * `protocol` - `IPPROTO_TCP`, `IPPROTO_UDP`, or `0` for the default
    ///
    /// # Returns
    ///
    /// * `Ok(Socket)` - Created socket, blocking mode
    /// * `Err(Errno)` - OS rejected the triple
    pub fn open(family: c_int, socktype: c_int, protocol: c_int) -> Result<Self, Errno> {
        let fd = sys::open(family, socktype, protocol)?;
        sys::apply_creation_defaults(fd);
        Ok(Socket {
            fd,
            family,
            socktype,
            protocol,
        })
    }

    /// Toggle the descriptor's blocking flag.
    ///
    /// Side effect only; no error is surfaced, and a closed handle is left
    /// untouched.
    pub fn set_blocking(&self, blocking: bool) {
        if self.fd == sys::INVALID_SOCK {
            return;
        }
        sys::set_nonblocking(self.fd, !blocking);
    }

    /// Connect to a numeric host/port.
    ///
    /// The destination is built in numeric-only mode, so this call cannot
    /// block on DNS. In blocking mode it returns once the connection is
    /// established; in non-blocking mode a pending attempt surfaces as
    /// `Os(EINPROGRESS)` and completion is observed through
    /// [`Socket::check_async_connect`].
    pub fn connect(&self, host: &str, port: u16) -> Result<(), SockError> {
        let fd = self.descriptor()?;
        let addr = self.sockaddr_for(host, port)?;
        sys::connect(fd, &addr).map_err(SockError::Os)
    }

    /// Check the outcome of a pending non-blocking connect.
    ///
    /// Performs a zero-timeout writability poll on this one descriptor and,
    /// once the poll reports readiness, reads the pending error state.
    ///
    /// # Returns
    ///
    /// * `Ok(false)` - Still pending
    /// * `Ok(true)` - Connected
    /// * `Err(SockError::Os(_))` - The poll failed, or the attempt finished
    ///   with the carried error code
    pub fn check_async_connect(&self) -> Result<bool, SockError> {
        let fd = self.descriptor()?;
        if !sys::poll_writable(fd).map_err(SockError::Os)? {
            return Ok(false);
        }
        let pending = sys::pending_error(fd).map_err(SockError::Os)?;
        if pending != 0 {
            return Err(SockError::Os(Errno(pending)));
        }
        Ok(true)
    }

    /// Read at most `maxlen` bytes (default [`DEFAULT_RECV_BUFSIZE`]).
    ///
    /// An empty result is an orderly peer shutdown, not an error.
    pub fn recv(&self, maxlen: Option<usize>) -> Result<Vec<u8>, SockError> {
        let fd = self.descriptor()?;
        let mut buf = vec![0u8; maxlen.unwrap_or(DEFAULT_RECV_BUFSIZE)];
        let n = sys::recv(fd, &mut buf).map_err(SockError::Os)?;
        buf.truncate(n);
        Ok(buf)
    }

    /// Write `data[offset..]`, returning the OS-reported count.
    ///
    /// The count may be short; callers loop for full delivery. `offset`
    /// must be strictly less than `data.len()` — violating that is caller
    /// misuse and is rejected before any syscall.
    pub fn send(&self, data: &[u8], offset: usize) -> Result<usize, SockError> {
        if offset >= data.len() {
            return Err(SockError::Argument(
                "offset must be less than the data length",
            ));
        }
        let fd = self.descriptor()?;
        sys::send(fd, &data[offset..]).map_err(SockError::Os)
    }

    /// Connectionless read of at most `maxlen` bytes.
    ///
    /// # Returns
    ///
    /// * `Ok((data, ip, port))` - Payload plus the numeric origin address
    /// * `Err(SockError)` - Failure in the OS error domain
    pub fn recvfrom(&self, maxlen: usize) -> Result<(Vec<u8>, String, u16), SockError> {
        let fd = self.descriptor()?;
        let mut buf = vec![0u8; maxlen];
        let (n, origin) = sys::recv_from(fd, &mut buf).map_err(SockError::Os)?;
        buf.truncate(n);

        // Inet descriptors only produce inet origins.
        let origin = origin.ok_or(SockError::Os(Errno(libc::EINVAL)))?;
        let (ip, port) = endpoint(&origin);
        Ok((buf, ip, port))
    }

    /// Connectionless write of `data[offset..]` to a numeric host/port.
    ///
    /// The destination is re-resolved on every call (numeric-only, never
    /// cached); the offset contract matches [`Socket::send`].
    pub fn sendto(
        &self,
        host: &str,
        port: u16,
        data: &[u8],
        offset: usize,
    ) -> Result<usize, SockError> {
        if offset >= data.len() {
            return Err(SockError::Argument(
                "offset must be less than the data length",
            ));
        }
        let fd = self.descriptor()?;
        let addr = self.sockaddr_for(host, port)?;
        sys::send_to(fd, &data[offset..], &addr).map_err(SockError::Os)
    }

    /// Bind to a numeric host/port.
    pub fn bind(&self, host: &str, port: u16) -> Result<(), SockError> {
        let fd = self.descriptor()?;
        let addr = self.sockaddr_for(host, port)?;
        sys::bind(fd, &addr).map_err(SockError::Os)
    }

    /// Start listening; `None` uses [`DEFAULT_BACKLOG`].
    pub fn listen(&self, backlog: Option<c_int>) -> Result<(), SockError> {
        let fd = self.descriptor()?;
        sys::listen(fd, backlog.unwrap_or(DEFAULT_BACKLOG)).map_err(SockError::Os)
    }

    /// Accept one pending connection.
    ///
    /// The new socket is an independent descriptor owner and inherits this
    /// socket's family/type/protocol triple.
    pub fn accept(&self) -> Result<Socket, SockError> {
        let fd = self.descriptor()?;
        let new_fd = sys::accept(fd).map_err(SockError::Os)?;
        sys::apply_creation_defaults(new_fd);
        Ok(Socket {
            fd: new_fd,
            family: self.family,
            socktype: self.socktype,
            protocol: self.protocol,
        })
    }

    /// The raw descriptor, for an external event loop.
    ///
    /// After close this returns the sentinel value.
    pub fn fileno(&self) -> sys::RawSock {
        self.fd
    }

    /// Numeric address of the connected peer.
    pub fn getpeername(&self) -> Result<(String, u16), SockError> {
        let fd = self.descriptor()?;
        let addr = sys::peer_addr(fd).map_err(SockError::Os)?;
        let addr = addr.ok_or(SockError::Os(Errno(libc::EINVAL)))?;
        Ok(endpoint(&addr))
    }

    /// Numeric address this socket is bound to.
    pub fn getsockname(&self) -> Result<(String, u16), SockError> {
        let fd = self.descriptor()?;
        let addr = sys::local_addr(fd).map_err(SockError::Os)?;
        let addr = addr.ok_or(SockError::Os(Errno(libc::EINVAL)))?;
        Ok(endpoint(&addr))
    }

    /// Read a socket option.
    ///
    /// With `len` omitted this probes a native integer option. With a
    /// length it returns an opaque blob of exactly that many bytes
    /// (zero-filled past what the OS wrote); lengths over [`MAX_OPT_LEN`]
    /// are rejected before any syscall.
    pub fn getsockopt(
        &self,
        level: c_int,
        name: c_int,
        len: Option<usize>,
    ) -> Result<OptionValue, SockError> {
        if let Some(n) = len {
            if n > MAX_OPT_LEN {
                return Err(SockError::Argument("option length must not exceed 1024"));
            }
        }
        let fd = self.descriptor()?;
        match len {
            None => sys::getsockopt_int(fd, level, name)
                .map(OptionValue::Int)
                .map_err(SockError::Os),
            Some(n) => {
                let mut buf = vec![0u8; n];
                sys::getsockopt_buf(fd, level, name, &mut buf).map_err(SockError::Os)?;
                Ok(OptionValue::Bytes(buf))
            }
        }
    }

    /// Write a socket option from its tagged value.
    pub fn setsockopt(
        &self,
        level: c_int,
        name: c_int,
        value: OptionValue,
    ) -> Result<(), SockError> {
        let fd = self.descriptor()?;
        sys::setsockopt_buf(fd, level, name, &value.to_native()).map_err(SockError::Os)
    }

    /// Release the descriptor.
    ///
    /// Idempotent: the first call hands the descriptor back to the OS and
    /// installs the sentinel; later calls (including the drop path) are
    /// no-ops.
    pub fn close(&mut self) {
        if self.fd != sys::INVALID_SOCK {
            let fd = std::mem::replace(&mut self.fd, sys::INVALID_SOCK);
            sys::close(fd);
        }
    }

    /// Address family this socket was created with.
    pub fn family(&self) -> c_int {
        self.family
    }

    /// Socket type this socket was created with.
    pub fn socktype(&self) -> c_int {
        self.socktype
    }

    /// Protocol this socket was created with.
    pub fn protocol(&self) -> c_int {
        self.protocol
    }

    fn descriptor(&self) -> Result<sys::RawSock, SockError> {
        if self.fd == sys::INVALID_SOCK {
            return Err(SockError::InvalidHandle);
        }
        Ok(self.fd)
    }

    fn sockaddr_for(&self, host: &str, port: u16) -> Result<SockAddr, SockError> {
        numeric_sockaddr(host, port, self.family, self.socktype, self.protocol)
            .map(SockAddr::from)
            .map_err(SockError::Resolve)
    }
}

impl Drop for Socket {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for Socket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Socket")
            .field("fd", &self.fd)
            .field("family", &self.family)
            .field("socktype", &self.socktype)
            .field("protocol", &self.protocol)
            .finish()
    }
}

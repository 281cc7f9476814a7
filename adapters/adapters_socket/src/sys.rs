//! Platform Syscall Module
//!
//! The one place in the crate that talks to the OS socket API. A single
//! call surface with two build-time implementations: POSIX descriptors via
//! `libc`, WinSock handles via `windows-sys`. Everything above this module
//! is platform-agnostic; error numbers cross this boundary untranslated.
//!
//! Outbound addresses arrive as `socket2::SockAddr`, which owns the native
//! layout for both families; inbound `sockaddr_storage` buffers are decoded
//! back into `std::net::SocketAddr` before leaving this module.

#[cfg(unix)]
mod posix {
    use std::mem;
    use std::net::SocketAddr;

    use entities_net_address::Errno;
    use libc::c_int;
    use socket2::SockAddr;

    /// Native descriptor type.
    pub type RawSock = c_int;

    /// Sentinel value of a closed handle.
    pub const INVALID_SOCK: RawSock = -1;

    #[cfg(any(target_os = "linux", target_os = "android"))]
    const SEND_FLAGS: c_int = libc::MSG_NOSIGNAL;
    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    const SEND_FLAGS: c_int = 0;

    fn last_errno() -> Errno {
        Errno::last()
    }

    pub fn open(family: c_int, socktype: c_int, protocol: c_int) -> Result<RawSock, Errno> {
        let fd = unsafe { libc::socket(family, socktype, protocol) };
        if fd < 0 {
            return Err(last_errno());
        }
        Ok(fd)
    }

    pub fn close(fd: RawSock) {
        unsafe {
            libc::close(fd);
        }
    }

    /// Descriptor-creation defaults: suppress SIGPIPE at the socket level
    /// where the platform offers it.
    #[cfg(target_vendor = "apple")]
    pub fn apply_creation_defaults(fd: RawSock) {
        let on: c_int = 1;
        unsafe {
            libc::setsockopt(
                fd,
                libc::SOL_SOCKET,
                libc::SO_NOSIGPIPE,
                &on as *const c_int as *const libc::c_void,
                mem::size_of::<c_int>() as libc::socklen_t,
            );
        }
    }

    #[cfg(not(target_vendor = "apple"))]
    pub fn apply_creation_defaults(_fd: RawSock) {}

    pub fn set_nonblocking(fd: RawSock, nonblocking: bool) {
        unsafe {
            let mut flags = libc::fcntl(fd, libc::F_GETFL, 0);
            if flags == -1 {
                flags = 0;
            }
            if nonblocking {
                flags |= libc::O_NONBLOCK;
            } else {
                flags &= !libc::O_NONBLOCK;
            }
            libc::fcntl(fd, libc::F_SETFL, flags);
        }
    }

    pub fn connect(fd: RawSock, addr: &SockAddr) -> Result<(), Errno> {
        let rc = unsafe { libc::connect(fd, addr.as_ptr(), addr.len()) };
        if rc != 0 {
            return Err(last_errno());
        }
        Ok(())
    }

    pub fn bind(fd: RawSock, addr: &SockAddr) -> Result<(), Errno> {
        let rc = unsafe { libc::bind(fd, addr.as_ptr(), addr.len()) };
        if rc != 0 {
            return Err(last_errno());
        }
        Ok(())
    }

    pub fn listen(fd: RawSock, backlog: c_int) -> Result<(), Errno> {
        let rc = unsafe { libc::listen(fd, backlog) };
        if rc != 0 {
            return Err(last_errno());
        }
        Ok(())
    }

    pub fn accept(fd: RawSock) -> Result<RawSock, Errno> {
        let new_fd = unsafe { libc::accept(fd, std::ptr::null_mut(), std::ptr::null_mut()) };
        if new_fd < 0 {
            return Err(last_errno());
        }
        Ok(new_fd)
    }

    pub fn send(fd: RawSock, buf: &[u8]) -> Result<usize, Errno> {
        let n = unsafe {
            libc::send(
                fd,
                buf.as_ptr() as *const libc::c_void,
                buf.len(),
                SEND_FLAGS,
            )
        };
        if n < 0 {
            return Err(last_errno());
        }
        Ok(n as usize)
    }

    pub fn recv(fd: RawSock, buf: &mut [u8]) -> Result<usize, Errno> {
        let n = unsafe { libc::recv(fd, buf.as_mut_ptr() as *mut libc::c_void, buf.len(), 0) };
        if n < 0 {
            return Err(last_errno());
        }
        Ok(n as usize)
    }

    pub fn send_to(fd: RawSock, buf: &[u8], addr: &SockAddr) -> Result<usize, Errno> {
        let n = unsafe {
            libc::sendto(
                fd,
                buf.as_ptr() as *const libc::c_void,
                buf.len(),
                SEND_FLAGS,
                addr.as_ptr(),
                addr.len(),
            )
        };
        if n < 0 {
            return Err(last_errno());
        }
        Ok(n as usize)
    }

    pub fn recv_from(fd: RawSock, buf: &mut [u8]) -> Result<(usize, Option<SocketAddr>), Errno> {
        let mut storage: libc::sockaddr_storage = unsafe { mem::zeroed() };
        let mut len = mem::size_of::<libc::sockaddr_storage>() as libc::socklen_t;
        let n = unsafe {
            libc::recvfrom(
                fd,
                buf.as_mut_ptr() as *mut libc::c_void,
                buf.len(),
                0,
                &mut storage as *mut _ as *mut libc::sockaddr,
                &mut len,
            )
        };
        if n < 0 {
            return Err(last_errno());
        }
        let addr = unsafe { SockAddr::new(storage, len) };
        Ok((n as usize, addr.as_socket()))
    }

    pub fn local_addr(fd: RawSock) -> Result<Option<SocketAddr>, Errno> {
        name_of(fd, libc::getsockname)
    }

    pub fn peer_addr(fd: RawSock) -> Result<Option<SocketAddr>, Errno> {
        name_of(fd, libc::getpeername)
    }

    fn name_of(
        fd: RawSock,
        query: unsafe extern "C" fn(c_int, *mut libc::sockaddr, *mut libc::socklen_t) -> c_int,
    ) -> Result<Option<SocketAddr>, Errno> {
        let mut storage: libc::sockaddr_storage = unsafe { mem::zeroed() };
        let mut len = mem::size_of::<libc::sockaddr_storage>() as libc::socklen_t;
        let rc = unsafe { query(fd, &mut storage as *mut _ as *mut libc::sockaddr, &mut len) };
        if rc < 0 {
            return Err(last_errno());
        }
        let addr = unsafe { SockAddr::new(storage, len) };
        Ok(addr.as_socket())
    }

    pub fn getsockopt_int(fd: RawSock, level: c_int, name: c_int) -> Result<c_int, Errno> {
        let mut value: c_int = 0;
        let mut len = mem::size_of::<c_int>() as libc::socklen_t;
        let rc = unsafe {
            libc::getsockopt(
                fd,
                level,
                name,
                &mut value as *mut c_int as *mut libc::c_void,
                &mut len,
            )
        };
        if rc < 0 {
            return Err(last_errno());
        }
        Ok(value)
    }

    pub fn getsockopt_buf(
        fd: RawSock,
        level: c_int,
        name: c_int,
        buf: &mut [u8],
    ) -> Result<(), Errno> {
        let mut len = buf.len() as libc::socklen_t;
        let rc = unsafe {
            libc::getsockopt(
                fd,
                level,
                name,
                buf.as_mut_ptr() as *mut libc::c_void,
                &mut len,
            )
        };
        if rc < 0 {
            return Err(last_errno());
        }
        Ok(())
    }

    pub fn setsockopt_buf(
        fd: RawSock,
        level: c_int,
        name: c_int,
        value: &[u8],
    ) -> Result<(), Errno> {
        let rc = unsafe {
            libc::setsockopt(
                fd,
                level,
                name,
                value.as_ptr() as *const libc::c_void,
                value.len() as libc::socklen_t,
            )
        };
        if rc < 0 {
            return Err(last_errno());
        }
        Ok(())
    }

    /// Zero-timeout writability poll on one descriptor.
    pub fn poll_writable(fd: RawSock) -> Result<bool, Errno> {
        let mut pfd = libc::pollfd {
            fd,
            events: libc::POLLOUT,
            revents: 0,
        };
        let rc = unsafe { libc::poll(&mut pfd, 1, 0) };
        if rc < 0 {
            return Err(last_errno());
        }
        Ok(rc > 0)
    }

    /// Read and clear the socket's pending error state (`SO_ERROR`).
    pub fn pending_error(fd: RawSock) -> Result<c_int, Errno> {
        getsockopt_int(fd, libc::SOL_SOCKET, libc::SO_ERROR)
    }
}

#[cfg(unix)]
pub use posix::*;

#[cfg(windows)]
mod win32 {
    use std::mem;
    use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

    use entities_net_address::Errno;
    use libc::c_int;
    use socket2::SockAddr;
    use windows_sys::Win32::Networking::WinSock as ws;

    /// Native descriptor type.
    pub type RawSock = ws::SOCKET;

    /// Sentinel value of a closed handle.
    pub const INVALID_SOCK: RawSock = ws::INVALID_SOCKET;

    fn last_errno() -> Errno {
        Errno(unsafe { ws::WSAGetLastError() })
    }

    pub fn open(family: c_int, socktype: c_int, protocol: c_int) -> Result<RawSock, Errno> {
        let sock = unsafe { ws::socket(family as _, socktype as _, protocol as _) };
        if sock == ws::INVALID_SOCKET {
            return Err(last_errno());
        }
        Ok(sock)
    }

    pub fn close(sock: RawSock) {
        unsafe {
            ws::closesocket(sock);
        }
    }

    pub fn apply_creation_defaults(_sock: RawSock) {}

    pub fn set_nonblocking(sock: RawSock, nonblocking: bool) {
        let mut mode: u32 = if nonblocking { 1 } else { 0 };
        unsafe {
            ws::ioctlsocket(sock, ws::FIONBIO as _, &mut mode);
        }
    }

    pub fn connect(sock: RawSock, addr: &SockAddr) -> Result<(), Errno> {
        let rc = unsafe { ws::connect(sock, addr.as_ptr() as _, addr.len() as _) };
        if rc != 0 {
            return Err(last_errno());
        }
        Ok(())
    }

    pub fn bind(sock: RawSock, addr: &SockAddr) -> Result<(), Errno> {
        let rc = unsafe { ws::bind(sock, addr.as_ptr() as _, addr.len() as _) };
        if rc != 0 {
            return Err(last_errno());
        }
        Ok(())
    }

    pub fn listen(sock: RawSock, backlog: c_int) -> Result<(), Errno> {
        let rc = unsafe { ws::listen(sock, backlog) };
        if rc != 0 {
            return Err(last_errno());
        }
        Ok(())
    }

    pub fn accept(sock: RawSock) -> Result<RawSock, Errno> {
        let new_sock = unsafe { ws::accept(sock, std::ptr::null_mut(), std::ptr::null_mut()) };
        if new_sock == ws::INVALID_SOCKET {
            return Err(last_errno());
        }
        Ok(new_sock)
    }

    pub fn send(sock: RawSock, buf: &[u8]) -> Result<usize, Errno> {
        let n = unsafe { ws::send(sock, buf.as_ptr(), buf.len() as _, 0) };
        if n < 0 {
            return Err(last_errno());
        }
        Ok(n as usize)
    }

    pub fn recv(sock: RawSock, buf: &mut [u8]) -> Result<usize, Errno> {
        let n = unsafe { ws::recv(sock, buf.as_mut_ptr(), buf.len() as _, 0) };
        if n < 0 {
            return Err(last_errno());
        }
        Ok(n as usize)
    }

    pub fn send_to(sock: RawSock, buf: &[u8], addr: &SockAddr) -> Result<usize, Errno> {
        let n = unsafe {
            ws::sendto(
                sock,
                buf.as_ptr(),
                buf.len() as _,
                0,
                addr.as_ptr() as _,
                addr.len() as _,
            )
        };
        if n < 0 {
            return Err(last_errno());
        }
        Ok(n as usize)
    }

    /// Decode a filled `SOCKADDR_STORAGE` into a native address.
    fn decode_storage(storage: &ws::SOCKADDR_STORAGE) -> Option<SocketAddr> {
        match storage.ss_family as c_int {
            f if f == ws::AF_INET as c_int => {
                let v4 = unsafe { &*(storage as *const _ as *const ws::SOCKADDR_IN) };
                let ip = Ipv4Addr::from(u32::from_be(unsafe { v4.sin_addr.S_un.S_addr }));
                Some(SocketAddr::from((ip, u16::from_be(v4.sin_port))))
            }
            f if f == ws::AF_INET6 as c_int => {
                let v6 = unsafe { &*(storage as *const _ as *const ws::SOCKADDR_IN6) };
                let ip = Ipv6Addr::from(unsafe { v6.sin6_addr.u.Byte });
                Some(SocketAddr::from((ip, u16::from_be(v6.sin6_port))))
            }
            _ => None,
        }
    }

    pub fn recv_from(sock: RawSock, buf: &mut [u8]) -> Result<(usize, Option<SocketAddr>), Errno> {
        let mut storage: ws::SOCKADDR_STORAGE = unsafe { mem::zeroed() };
        let mut len = mem::size_of::<ws::SOCKADDR_STORAGE>() as i32;
        let n = unsafe {
            ws::recvfrom(
                sock,
                buf.as_mut_ptr(),
                buf.len() as _,
                0,
                &mut storage as *mut _ as *mut ws::SOCKADDR,
                &mut len,
            )
        };
        if n < 0 {
            return Err(last_errno());
        }
        Ok((n as usize, decode_storage(&storage)))
    }

    pub fn local_addr(sock: RawSock) -> Result<Option<SocketAddr>, Errno> {
        let mut storage: ws::SOCKADDR_STORAGE = unsafe { mem::zeroed() };
        let mut len = mem::size_of::<ws::SOCKADDR_STORAGE>() as i32;
        let rc =
            unsafe { ws::getsockname(sock, &mut storage as *mut _ as *mut ws::SOCKADDR, &mut len) };
        if rc != 0 {
            return Err(last_errno());
        }
        Ok(decode_storage(&storage))
    }

    pub fn peer_addr(sock: RawSock) -> Result<Option<SocketAddr>, Errno> {
        let mut storage: ws::SOCKADDR_STORAGE = unsafe { mem::zeroed() };
        let mut len = mem::size_of::<ws::SOCKADDR_STORAGE>() as i32;
        let rc =
            unsafe { ws::getpeername(sock, &mut storage as *mut _ as *mut ws::SOCKADDR, &mut len) };
        if rc != 0 {
            return Err(last_errno());
        }
        Ok(decode_storage(&storage))
    }

    pub fn getsockopt_int(sock: RawSock, level: c_int, name: c_int) -> Result<c_int, Errno> {
        let mut value: c_int = 0;
        let mut len = mem::size_of::<c_int>() as i32;
        let rc = unsafe {
            ws::getsockopt(
                sock,
                level,
                name,
                &mut value as *mut c_int as *mut u8,
                &mut len,
            )
        };
        if rc != 0 {
            return Err(last_errno());
        }
        Ok(value)
    }

    pub fn getsockopt_buf(
        sock: RawSock,
        level: c_int,
        name: c_int,
        buf: &mut [u8],
    ) -> Result<(), Errno> {
        let mut len = buf.len() as i32;
        let rc = unsafe { ws::getsockopt(sock, level, name, buf.as_mut_ptr(), &mut len) };
        if rc != 0 {
            return Err(last_errno());
        }
        Ok(())
    }

    pub fn setsockopt_buf(
        sock: RawSock,
        level: c_int,
        name: c_int,
        value: &[u8],
    ) -> Result<(), Errno> {
        let rc = unsafe { ws::setsockopt(sock, level, name, value.as_ptr(), value.len() as _) };
        if rc != 0 {
            return Err(last_errno());
        }
        Ok(())
    }

    /// Zero-timeout writability poll on one descriptor.
    pub fn poll_writable(sock: RawSock) -> Result<bool, Errno> {
        let mut pfd = ws::WSAPOLLFD {
            fd: sock,
            events: ws::POLLWRNORM as _,
            revents: 0,
        };
        let rc = unsafe { ws::WSAPoll(&mut pfd, 1, 0) };
        if rc < 0 {
            return Err(last_errno());
        }
        Ok(rc > 0)
    }

    /// Read and clear the socket's pending error state (`SO_ERROR`).
    pub fn pending_error(sock: RawSock) -> Result<c_int, Errno> {
        getsockopt_int(sock, ws::SOL_SOCKET as _, ws::SO_ERROR as _)
    }
}

#[cfg(windows)]
pub use win32::*;

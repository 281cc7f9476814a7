//! Bootstrap Module
//!
//! Guarded one-time startup of the platform socket subsystem. On Windows
//! this runs `WSAStartup` and registers `WSACleanup` as an exit hook; a
//! startup failure is fatal, because no socket call can ever succeed after
//! one. POSIX platforms need no initialization and get a no-op.

use std::sync::Once;

static STARTUP: Once = Once::new();

/// Initialize the platform socket subsystem, once per process.
///
/// Call before the first socket operation; later calls are no-ops. There is
/// no recovery path from a startup failure: the process logs and exits.
pub fn startup() {
    STARTUP.call_once(|| {
        platform_startup();
        log::debug!("socket subsystem initialized");
    });
}

#[cfg(not(windows))]
fn platform_startup() {}

#[cfg(windows)]
fn platform_startup() {
    use windows_sys::Win32::Networking::WinSock::{WSAStartup, WSADATA};

    let mut data: WSADATA = unsafe { std::mem::zeroed() };
    // WinSock 2.2
    let rc = unsafe { WSAStartup(0x0202, &mut data) };
    if rc != 0 {
        log::error!("socket subsystem startup failed: {}", rc);
        std::process::exit(1);
    }
    unsafe {
        libc::atexit(platform_teardown);
    }
}

#[cfg(windows)]
extern "C" fn platform_teardown() {
    unsafe {
        windows_sys::Win32::Networking::WinSock::WSACleanup();
    }
}

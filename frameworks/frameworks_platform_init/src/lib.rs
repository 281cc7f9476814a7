//! Frameworks Layer: Socket Subsystem Bootstrap
//!
//! Process-wide one-time initialization of the platform socket subsystem.
//! Some platforms require a startup call before any socket operation is
//! valid and a matching teardown at process exit; this crate owns that
//! lifecycle so the rest of the stack can assume sockets simply work.

pub mod bootstrap;

pub use bootstrap::startup;

//! Host I/O readiness capability
//!
//! The monitor never polls; it hands the host one descriptor and one
//! callback and relies on the host's own loop for wake-ups. Modeling
//! the loop as a trait keeps the monitor testable against a fake
//! readiness source that delivers synthetic wake-ups.

use std::os::unix::io::RawFd;

/// Descriptor interest requested from the host loop
///
/// The monitor only ever asks for readability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interest {
    /// Wake up when the descriptor has data to read
    Readable,
}

/// Opaque handle for one registration, used to unregister
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationToken(pub u64);

/// Callback invoked by the host loop when the descriptor is ready
pub type ReadinessHandler = Box<dyn FnMut()>;

/// The host's I/O readiness mechanism
///
/// The monitor holds exactly one registration at a time and always
/// unregisters it before closing the descriptor it covers.
pub trait ReadinessSource {
    /// Register interest in a descriptor
    fn register(
        &mut self,
        fd: RawFd,
        interest: Interest,
        handler: ReadinessHandler,
    ) -> RegistrationToken;

    /// Remove a previous registration
    fn unregister(&mut self, token: RegistrationToken);
}

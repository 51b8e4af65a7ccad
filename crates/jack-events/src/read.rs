//! The lossy-batch read protocol
//!
//! A kernel event queue can overflow. When it does, the device offers a
//! full state snapshot instead of the lost deltas, and the reader has
//! to switch into a resynchronization mode to consume it. The drain
//! loop that drives `next_event` must therefore distinguish three
//! outcomes besides "got an event":
//!
//! - [`ReadError::WouldBlock`]: nothing buffered. In [`ReadMode::Normal`]
//!   the drain is done for this wake-up; in [`ReadMode::Resync`] the
//!   snapshot is fully consumed and reading continues in normal mode.
//! - [`ReadError::ResyncRequired`]: events were dropped and a snapshot
//!   is on offer. A normal-mode reader switches to resync mode; a
//!   reader already resyncing just keeps consuming.
//! - [`ReadError::Io`]: unexpected failure (device removed, etc.); the
//!   drain stops for this wake-up.
//!
//! Ignoring `ResyncRequired` would silently miss switch transitions
//! after any event loss, which is why the mode is threaded through the
//! trait rather than hidden inside an implementation.

use std::io;
use std::os::unix::io::RawFd;

use thiserror::Error;

use crate::event::{SourceEvent, SwitchKind};

/// Read mode for [`SwitchSource::next_event`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Consume live events from the kernel buffer
    Normal,
    /// Consume a state snapshot after the kernel dropped events
    Resync,
}

/// Non-event outcomes of a read attempt
#[derive(Debug, Error)]
pub enum ReadError {
    /// No more events are currently buffered
    #[error("no events buffered")]
    WouldBlock,

    /// The kernel dropped events and offers a state snapshot
    #[error("events dropped, state snapshot offered")]
    ResyncRequired,

    /// Unexpected read failure (device removed, permissions revoked)
    #[error("event read failed: {0}")]
    Io(#[from] io::Error),
}

/// A decoding context over one open input-event device
///
/// Implementations own the underlying descriptor for their whole
/// lifetime and release it exactly once, on drop. The descriptor must
/// be non-blocking so a drain loop cannot stall the host's loop.
pub trait SwitchSource {
    /// Does the device report this switch at all?
    fn has_switch(&self, kind: SwitchKind) -> bool;

    /// Current cached value of a switch line
    ///
    /// Returns `None` when the device does not support the switch.
    fn switch_value(&self, kind: SwitchKind) -> Option<bool>;

    /// Decode the next structured event under the given mode
    fn next_event(&mut self, mode: ReadMode) -> Result<SourceEvent, ReadError>;

    /// The descriptor to register with the host's readiness mechanism
    fn raw_fd(&self) -> RawFd;
}

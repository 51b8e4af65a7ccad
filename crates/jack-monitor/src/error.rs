//! Error types for the monitor lifecycle

use thiserror::Error;

/// Errors that can occur while creating a monitor
#[derive(Debug, Error)]
pub enum MonitorError {
    /// No input device on this machine reports the headphone switch
    ///
    /// Expected on hardware without a wired jack; the caller decides
    /// whether that is acceptable.
    #[error("no switch-capable input device found")]
    NoSwitchDevice,
}

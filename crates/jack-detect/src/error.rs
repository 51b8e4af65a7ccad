//! Error types for device discovery

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while locating a switch-capable device
#[derive(Debug, Error)]
pub enum DetectError {
    /// The device directory could not be enumerated
    #[error("failed to enumerate {dir}: {source}")]
    EnumerationFailed {
        /// Directory that was being scanned
        dir: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// A candidate device node could not be opened
    #[error("failed to open {path}: {source}")]
    OpenFailed {
        /// Path of the candidate
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// The device opened fine but does not report the headphone switch
    #[error("{path} does not report the headphone insertion switch")]
    NotSwitchCapable {
        /// Path of the candidate
        path: PathBuf,
    },
}

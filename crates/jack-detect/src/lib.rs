//! Switch Device Discovery Library
//!
//! This crate finds the input-event device that reports the headphone
//! insertion switch and wraps it in a non-blocking, resync-aware
//! [`SwitchSource`](jack_events::SwitchSource) implementation.
//!
//! # Example
//!
//! ```rust,no_run
//! use jack_detect::find_switch_source;
//!
//! match find_switch_source() {
//!     Some(source) => println!("Watching {}", source.path().display()),
//!     None => println!("No switch-capable device on this machine"),
//! }
//! ```

pub mod error;
pub mod probe;
pub mod scanner;
pub mod source;

pub use error::DetectError;
pub use probe::{find_switch_source, find_switch_source_in};
pub use scanner::{CandidateDevice, NodeScanner, ScannerConfig};
pub use source::EvdevSwitchSource;

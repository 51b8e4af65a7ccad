//! Jack Monitoring Simulation Library
//!
//! This crate provides the pieces needed to exercise the monitor
//! without physical hardware:
//!
//! - **VirtualSwitchDevice**: a scripted switch source that replays a
//!   fixed sequence of read outcomes, including resync offers and hard
//!   errors, and records the read mode of every call
//! - **VirtualMainloop**: an I/O readiness source that delivers
//!   synthetic wake-ups synchronously
//! - **VirtualRegistry**: a port registry that records every
//!   availability write in order
//!
//! # Example
//!
//! ```rust
//! use jack_events::{ReadMode, SwitchKind, SwitchSource};
//! use jack_sim::{ScriptStep, VirtualSwitchDevice};
//!
//! let mut device = VirtualSwitchDevice::new([
//!     ScriptStep::switch(SwitchKind::HeadphoneInsert, true),
//!     ScriptStep::WouldBlock,
//! ])
//! .with_switch(SwitchKind::HeadphoneInsert, false);
//!
//! assert!(device.has_switch(SwitchKind::HeadphoneInsert));
//! assert!(device.next_event(ReadMode::Normal).is_ok());
//! ```

pub mod device;
pub mod host;

pub use device::{ScriptStep, VirtualSwitchDevice};
pub use host::{VirtualMainloop, VirtualRegistry};

//! Wired-Jack Presence Monitor
//!
//! This crate owns the monitor lifecycle: it selects the switch-capable
//! input device, registers a readable-descriptor callback with the
//! host's I/O readiness mechanism, drains the event stream on every
//! wake-up, and pushes derived port availability into the host's port
//! registry by name.
//!
//! # Architecture
//!
//! The monitor is single-threaded and callback-driven. All decoding and
//! state mutation happen synchronously inside the readiness callback,
//! on the host loop's thread; the core itself never spawns a thread and
//! never blocks (the device descriptor is non-blocking). The host is
//! reached only through two capability traits:
//!
//! - [`ReadinessSource`]: "notify me when this descriptor is readable"
//! - [`PortRegistry`]: name-keyed availability writes
//!
//! # Example
//!
//! ```rust,no_run
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use jack_monitor::Monitor;
//! use jack_sim::{VirtualMainloop, VirtualRegistry};
//!
//! let mut mainloop = VirtualMainloop::new();
//! let registry = Rc::new(RefCell::new(VirtualRegistry::with_ports(&[
//!     "output-wired_headphone",
//!     "output-wired_headset",
//!     "input-wired_headset",
//! ])));
//!
//! let monitor = Monitor::create(&mut mainloop, registry.clone())
//!     .expect("no switch-capable device");
//!
//! // The host loop now drives the monitor; tear down symmetrically.
//! monitor.shutdown(&mut mainloop);
//! ```

pub mod error;
pub mod monitor;
pub mod ports;
pub mod readiness;

pub use error::MonitorError;
pub use monitor::{Monitor, MonitorConfig};
pub use ports::{notify_ports, PortId, PortRegistry, PortTables};
pub use readiness::{Interest, ReadinessHandler, ReadinessSource, RegistrationToken};

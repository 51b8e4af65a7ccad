//! Switch-Event Vocabulary for Wired Jack Detection
//!
//! This crate provides the shared vocabulary for monitoring insertion
//! switches on Linux input-event devices:
//!
//! - **Events**: the insertion switch codes and the structured events a
//!   switch source decodes from the kernel stream
//! - **Read protocol**: the NORMAL/RESYNC read modes and the three
//!   non-event outcomes (would-block, resync-required, hard error)
//! - **State & policy**: the tri-state switch record and the pure
//!   mapping from switch state to port availability
//!
//! # Example
//!
//! ```rust
//! use jack_events::{port_availability, Availability, SwitchKind, SwitchState};
//!
//! let mut state = SwitchState::default();
//! state.apply(SwitchKind::HeadphoneInsert, true);
//! state.apply(SwitchKind::MicrophoneInsert, true);
//!
//! // A microphone line alongside the headphone line means a headset
//! let decision = port_availability(&state);
//! assert_eq!(decision.headset, Availability::Available);
//! assert_eq!(decision.headphone, Availability::Unavailable);
//! ```

pub mod event;
pub mod read;
pub mod state;

pub use event::{SourceEvent, SwitchKind};
pub use read::{ReadError, ReadMode, SwitchSource};
pub use state::{port_availability, Availability, PortDecision, SwitchState};

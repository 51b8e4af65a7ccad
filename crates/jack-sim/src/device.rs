//! Scripted switch source
//!
//! Replays a fixed sequence of read outcomes, which is the only way to
//! test the lossy-batch recovery protocol deterministically: real
//! kernel drops cannot be provoked on demand.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::os::unix::io::RawFd;
use std::rc::Rc;

use jack_events::{ReadError, ReadMode, SourceEvent, SwitchKind, SwitchSource};

/// One scripted outcome of a `next_event` call
#[derive(Debug, Clone)]
pub enum ScriptStep {
    /// Deliver a structured event
    Event(SourceEvent),
    /// Report an empty kernel buffer
    WouldBlock,
    /// Report dropped events and offer a snapshot
    ResyncOffer,
    /// Fail the read with an I/O error
    Fail(io::ErrorKind),
}

impl ScriptStep {
    /// Convenience constructor for a tracked switch transition
    pub fn switch(kind: SwitchKind, value: bool) -> Self {
        ScriptStep::Event(SourceEvent::switch(kind, value))
    }

    /// Convenience constructor for a report boundary
    pub fn boundary() -> Self {
        ScriptStep::Event(SourceEvent::ReportBoundary)
    }
}

/// A scripted switch-capable device
///
/// The script is consumed front to back regardless of read mode; the
/// mode passed to every call is recorded so tests can assert the
/// NORMAL/RESYNC protocol was followed. An exhausted script reports
/// would-block forever.
pub struct VirtualSwitchDevice {
    script: VecDeque<ScriptStep>,
    switches: Vec<(SwitchKind, bool)>,
    modes: Rc<RefCell<Vec<ReadMode>>>,
    fd: RawFd,
}

impl VirtualSwitchDevice {
    /// Create a device that will replay the given script
    pub fn new(script: impl IntoIterator<Item = ScriptStep>) -> Self {
        Self {
            script: script.into_iter().collect(),
            switches: Vec::new(),
            modes: Rc::new(RefCell::new(Vec::new())),
            fd: -1,
        }
    }

    /// Create a device with an empty script
    pub fn idle() -> Self {
        Self::new([])
    }

    /// Declare a supported switch and its cached value
    pub fn with_switch(mut self, kind: SwitchKind, value: bool) -> Self {
        self.switches.retain(|(k, _)| *k != kind);
        self.switches.push((kind, value));
        self
    }

    /// Set the descriptor reported to the readiness source
    pub fn with_fd(mut self, fd: RawFd) -> Self {
        self.fd = fd;
        self
    }

    /// Read mode of every `next_event` call made so far
    pub fn modes_seen(&self) -> Vec<ReadMode> {
        self.modes.borrow().clone()
    }

    /// Shared handle to the mode log
    ///
    /// Take a clone before boxing the device into a monitor; the log
    /// stays observable while the monitor owns the device.
    pub fn mode_log(&self) -> Rc<RefCell<Vec<ReadMode>>> {
        Rc::clone(&self.modes)
    }

    /// Number of script steps not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl SwitchSource for VirtualSwitchDevice {
    fn has_switch(&self, kind: SwitchKind) -> bool {
        self.switches.iter().any(|(k, _)| *k == kind)
    }

    fn switch_value(&self, kind: SwitchKind) -> Option<bool> {
        self.switches
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, v)| *v)
    }

    fn next_event(&mut self, mode: ReadMode) -> Result<SourceEvent, ReadError> {
        self.modes.borrow_mut().push(mode);
        match self.script.pop_front() {
            None | Some(ScriptStep::WouldBlock) => Err(ReadError::WouldBlock),
            Some(ScriptStep::Event(event)) => Ok(event),
            Some(ScriptStep::ResyncOffer) => Err(ReadError::ResyncRequired),
            Some(ScriptStep::Fail(kind)) => Err(ReadError::Io(io::Error::from(kind))),
        }
    }

    fn raw_fd(&self) -> RawFd {
        self.fd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_is_consumed_in_order() {
        let mut device = VirtualSwitchDevice::new([
            ScriptStep::switch(SwitchKind::HeadphoneInsert, true),
            ScriptStep::boundary(),
            ScriptStep::ResyncOffer,
        ]);

        assert_eq!(
            device.next_event(ReadMode::Normal).unwrap(),
            SourceEvent::switch(SwitchKind::HeadphoneInsert, true)
        );
        assert_eq!(
            device.next_event(ReadMode::Normal).unwrap(),
            SourceEvent::ReportBoundary
        );
        assert!(matches!(
            device.next_event(ReadMode::Normal),
            Err(ReadError::ResyncRequired)
        ));
    }

    #[test]
    fn exhausted_script_reports_would_block_forever() {
        let mut device = VirtualSwitchDevice::idle();
        for _ in 0..3 {
            assert!(matches!(
                device.next_event(ReadMode::Normal),
                Err(ReadError::WouldBlock)
            ));
        }
    }

    #[test]
    fn modes_are_recorded_per_call() {
        let mut device = VirtualSwitchDevice::idle();
        let _ = device.next_event(ReadMode::Normal);
        let _ = device.next_event(ReadMode::Resync);
        assert_eq!(device.modes_seen(), [ReadMode::Normal, ReadMode::Resync]);
    }

    #[test]
    fn undeclared_switches_are_unsupported() {
        let device = VirtualSwitchDevice::idle().with_switch(SwitchKind::MicrophoneInsert, true);
        assert!(device.has_switch(SwitchKind::MicrophoneInsert));
        assert_eq!(device.switch_value(SwitchKind::MicrophoneInsert), Some(true));
        assert!(!device.has_switch(SwitchKind::HeadphoneInsert));
        assert_eq!(device.switch_value(SwitchKind::HeadphoneInsert), None);
    }
}

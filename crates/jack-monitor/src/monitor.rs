//! Monitor lifecycle and drain loop
//!
//! Creation runs the device selector, registers the readiness callback,
//! and synchronizes switch state from the device's cached values so the
//! registry reflects hardware state at startup instead of waiting for
//! the first transition. Teardown removes the registration before the
//! descriptor is closed.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use jack_detect::{find_switch_source_in, ScannerConfig};
use jack_events::{
    port_availability, ReadError, ReadMode, SourceEvent, SwitchKind, SwitchSource, SwitchState,
};

use crate::error::MonitorError;
use crate::ports::{notify_ports, PortRegistry, PortTables};
use crate::readiness::{Interest, ReadinessSource, RegistrationToken};

/// Monitor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Where to look for candidate devices
    pub scanner: ScannerConfig,
    /// Which port names to drive per accessory class
    pub ports: PortTables,
}

/// The wired-jack presence monitor
///
/// Holds the selected event source, the tri-state switch record, and
/// the one readiness registration covering the source's descriptor.
/// A failed [`Monitor::create`] registers nothing and owns nothing, so
/// there is no partially-initialized monitor to tear down.
pub struct Monitor {
    shared: Rc<RefCell<Shared>>,
    token: Option<RegistrationToken>,
}

struct Shared {
    source: Box<dyn SwitchSource>,
    state: SwitchState,
    ports: PortTables,
    registry: Rc<RefCell<dyn PortRegistry>>,
}

impl Monitor {
    /// Create a monitor with default configuration
    ///
    /// Runs the device selector; [`MonitorError::NoSwitchDevice`] means
    /// this machine has no wired-jack switch to watch.
    pub fn create(
        readiness: &mut dyn ReadinessSource,
        registry: Rc<RefCell<dyn PortRegistry>>,
    ) -> Result<Self, MonitorError> {
        Self::create_with(readiness, registry, MonitorConfig::default())
    }

    /// Create a monitor with custom configuration
    pub fn create_with(
        readiness: &mut dyn ReadinessSource,
        registry: Rc<RefCell<dyn PortRegistry>>,
        config: MonitorConfig,
    ) -> Result<Self, MonitorError> {
        let source =
            find_switch_source_in(&config.scanner).ok_or(MonitorError::NoSwitchDevice)?;
        Ok(Self::with_source(
            Box::new(source),
            readiness,
            registry,
            config.ports,
        ))
    }

    /// Create a monitor over an already-selected switch source
    ///
    /// Registers the readiness callback, then synchronizes switch state
    /// from the source's cached values and publishes availability once,
    /// before any wake-up is delivered.
    pub fn with_source(
        source: Box<dyn SwitchSource>,
        readiness: &mut dyn ReadinessSource,
        registry: Rc<RefCell<dyn PortRegistry>>,
        ports: PortTables,
    ) -> Self {
        let fd = source.raw_fd();
        let shared = Rc::new(RefCell::new(Shared {
            source,
            state: SwitchState::default(),
            ports,
            registry,
        }));

        let handler = {
            let shared = Rc::clone(&shared);
            Box::new(move || shared.borrow_mut().drain())
        };
        let token = readiness.register(fd, Interest::Readable, handler);

        shared.borrow_mut().sync_initial_state();

        Self {
            shared,
            token: Some(token),
        }
    }

    /// Current switch state, as last synchronized or decoded
    pub fn switch_state(&self) -> SwitchState {
        self.shared.borrow().state
    }

    /// Tear the monitor down
    ///
    /// The readiness registration is removed first; the event source,
    /// and with it the descriptor, is released when the last callback
    /// reference drops.
    pub fn shutdown(mut self, readiness: &mut dyn ReadinessSource) {
        if let Some(token) = self.token.take() {
            readiness.unregister(token);
        }
    }
}

impl Shared {
    /// Startup synchronization: switches the device does not support
    /// default to not-present.
    fn sync_initial_state(&mut self) {
        for kind in SwitchKind::ALL {
            let value = self.source.switch_value(kind).unwrap_or(false);
            self.state.apply(kind, value);
        }
        debug!("Initial switch state: {:?}", self.state);
        self.notify();
    }

    /// One full drain of the event stream, run per readiness wake-up
    ///
    /// Loops until would-block in normal mode. A resync offer switches
    /// the mode; a would-block under resync means the snapshot is fully
    /// consumed and live reading resumes.
    fn drain(&mut self) {
        let mut mode = ReadMode::Normal;

        loop {
            match self.source.next_event(mode) {
                Ok(event) => self.handle_event(event),
                Err(ReadError::WouldBlock) => match mode {
                    ReadMode::Resync => mode = ReadMode::Normal,
                    ReadMode::Normal => break,
                },
                Err(ReadError::ResyncRequired) => {
                    if mode == ReadMode::Normal {
                        debug!("Kernel dropped events, replaying switch snapshot");
                        mode = ReadMode::Resync;
                    }
                    // Already resyncing: keep consuming the snapshot.
                }
                Err(ReadError::Io(err)) => {
                    // The registration stays in place; the next wake-up
                    // retries. A persistently dead descriptor is not
                    // detected here.
                    error!("Reading switch events failed: {}", err);
                    break;
                }
            }
        }
    }

    fn handle_event(&mut self, event: SourceEvent) {
        match event {
            SourceEvent::Switch { code, value } => {
                if let Some(kind) = SwitchKind::from_code(code) {
                    trace!("Switch {:?} -> {}", kind, value);
                    self.state.apply(kind, value);
                }
                // Untracked switches are ignored, not an error.
            }
            SourceEvent::ReportBoundary => self.notify(),
            SourceEvent::Ignored => {}
        }
    }

    /// Recompute availability and push it to the registry
    fn notify(&mut self) {
        let decision = port_availability(&self.state);
        trace!("Publishing availability: {:?}", decision);
        let mut registry = self.registry.borrow_mut();
        notify_ports(&mut *registry, &self.ports, decision);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_through_serde() {
        let config = MonitorConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: MonitorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.scanner.name_prefix, config.scanner.name_prefix);
        assert_eq!(back.ports.headset, config.ports.headset);
    }

    #[test]
    fn default_config_scans_dev_input() {
        let config = MonitorConfig::default();
        assert_eq!(config.scanner.device_dir.to_str(), Some("/dev/input"));
        assert_eq!(config.scanner.name_prefix, "event");
    }
}

//! Host fakes: readiness source and port registry
//!
//! Both run synchronously on the caller's thread, matching the
//! single-threaded execution model the monitor assumes of its host.

use std::os::unix::io::RawFd;

use tracing::trace;

use jack_events::Availability;
use jack_monitor::{Interest, PortId, PortRegistry, ReadinessHandler, ReadinessSource, RegistrationToken};

/// A readiness source that delivers wake-ups on demand
#[derive(Default)]
pub struct VirtualMainloop {
    handlers: Vec<(RegistrationToken, RawFd, Interest, ReadinessHandler)>,
    next_token: u64,
    register_calls: usize,
    unregister_calls: usize,
}

impl VirtualMainloop {
    /// Create an empty loop with no registrations
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one synthetic readable notification to every handler
    pub fn fire_readable(&mut self) {
        for (token, _, _, handler) in &mut self.handlers {
            trace!("Firing readiness for {:?}", token);
            handler();
        }
    }

    /// Number of live registrations
    pub fn registration_count(&self) -> usize {
        self.handlers.len()
    }

    /// Total `register` calls observed
    pub fn register_calls(&self) -> usize {
        self.register_calls
    }

    /// Total `unregister` calls observed
    pub fn unregister_calls(&self) -> usize {
        self.unregister_calls
    }
}

impl ReadinessSource for VirtualMainloop {
    fn register(
        &mut self,
        fd: RawFd,
        interest: Interest,
        handler: ReadinessHandler,
    ) -> RegistrationToken {
        let token = RegistrationToken(self.next_token);
        self.next_token += 1;
        self.register_calls += 1;
        self.handlers.push((token, fd, interest, handler));
        token
    }

    fn unregister(&mut self, token: RegistrationToken) {
        self.unregister_calls += 1;
        self.handlers.retain(|(t, ..)| *t != token);
    }
}

/// A port registry that records every availability write
pub struct VirtualRegistry {
    ports: Vec<String>,
    writes: Vec<(String, Availability)>,
}

impl VirtualRegistry {
    /// Create a registry exposing the given port names
    pub fn with_ports(names: &[&str]) -> Self {
        Self {
            ports: names.iter().map(|n| n.to_string()).collect(),
            writes: Vec::new(),
        }
    }

    /// Every write so far, in order
    pub fn writes(&self) -> &[(String, Availability)] {
        &self.writes
    }

    /// Forget recorded writes (ports stay registered)
    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    /// Most recent value written to a port
    pub fn last_write(&self, name: &str) -> Option<Availability> {
        self.writes
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, a)| *a)
    }
}

impl PortRegistry for VirtualRegistry {
    fn lookup(&self, name: &str) -> Option<PortId> {
        self.ports
            .iter()
            .position(|p| p == name)
            .map(|i| PortId(i as u32))
    }

    fn set_available(&mut self, port: PortId, availability: Availability) {
        let name = self.ports[port.0 as usize].clone();
        trace!("Registry write {} = {:?}", name, availability);
        self.writes.push((name, availability));
    }
}

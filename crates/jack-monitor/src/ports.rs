//! Port registry capability and port-name policy tables

use serde::{Deserialize, Serialize};
use tracing::trace;

use jack_events::{Availability, PortDecision};

/// Opaque handle to one port in the external registry
///
/// Produced by [`PortRegistry::lookup`]; the monitor holds no ownership
/// over ports and never invents handles itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortId(pub u32);

/// The external audio router's port registry
///
/// The registry is assumed safe to mutate synchronously from the
/// readiness callback's execution context; that is the host's
/// responsibility.
pub trait PortRegistry {
    /// Look up a port by name
    fn lookup(&self, name: &str) -> Option<PortId>;

    /// Write an availability value into a port
    fn set_available(&mut self, port: PortId, availability: Availability);
}

/// Ordered port-name tables per accessory class
///
/// Within a class, the router's own switch-on-available logic keeps the
/// last port to become available active, so the preferred port goes
/// last in its list. These tables are read-only policy data; the
/// defaults match the droid card profile naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortTables {
    /// Headphone-class port names, least preferred first
    pub headphone: Vec<String>,
    /// Headset-class port names, least preferred first
    pub headset: Vec<String>,
}

impl Default for PortTables {
    fn default() -> Self {
        Self {
            headphone: vec!["output-wired_headphone".to_string()],
            headset: vec![
                "output-wired_headset".to_string(),
                "input-wired_headset".to_string(),
            ],
        }
    }
}

/// Push one availability decision into the registry
///
/// Names missing from the registry are silently skipped; not every
/// configuration exposes every port.
pub fn notify_ports<R: PortRegistry + ?Sized>(
    registry: &mut R,
    tables: &PortTables,
    decision: PortDecision,
) {
    for name in &tables.headphone {
        if let Some(port) = registry.lookup(name) {
            trace!("Port {} -> {:?}", name, decision.headphone);
            registry.set_available(port, decision.headphone);
        }
    }
    for name in &tables.headset {
        if let Some(port) = registry.lookup(name) {
            trace!("Port {} -> {:?}", name, decision.headset);
            registry.set_available(port, decision.headset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_prefer_the_input_port_last() {
        let tables = PortTables::default();
        assert_eq!(tables.headphone, ["output-wired_headphone"]);
        assert_eq!(
            tables.headset,
            ["output-wired_headset", "input-wired_headset"]
        );
    }

    #[test]
    fn tables_round_trip_through_serde() {
        let tables = PortTables::default();
        let json = serde_json::to_string(&tables).unwrap();
        let back: PortTables = serde_json::from_str(&json).unwrap();
        assert_eq!(back.headphone, tables.headphone);
        assert_eq!(back.headset, tables.headset);
    }
}

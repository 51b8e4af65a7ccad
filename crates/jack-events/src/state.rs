//! Switch state tracking and the availability policy

use crate::event::SwitchKind;

/// Current value of the three insertion switch lines
///
/// Owned exclusively by the monitor; mutated only by decoded switch
/// events or by the initial synchronization read.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwitchState {
    /// A headphone plug is inserted
    pub headphone_insert: bool,
    /// The inserted plug carries a microphone line
    pub microphone_insert: bool,
    /// A line-out plug is inserted
    pub lineout_insert: bool,
}

impl SwitchState {
    /// Record a switch transition
    pub fn apply(&mut self, kind: SwitchKind, value: bool) {
        match kind {
            SwitchKind::HeadphoneInsert => self.headphone_insert = value,
            SwitchKind::MicrophoneInsert => self.microphone_insert = value,
            SwitchKind::LineoutInsert => self.lineout_insert = value,
        }
    }

    /// Read one switch line
    pub fn value(&self, kind: SwitchKind) -> bool {
        match kind {
            SwitchKind::HeadphoneInsert => self.headphone_insert,
            SwitchKind::MicrophoneInsert => self.microphone_insert,
            SwitchKind::LineoutInsert => self.lineout_insert,
        }
    }
}

/// Availability value written into the external port registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Availability {
    /// The port's accessory is physically present
    Available,
    /// The port's accessory is absent
    Unavailable,
}

impl From<bool> for Availability {
    fn from(present: bool) -> Self {
        if present {
            Availability::Available
        } else {
            Availability::Unavailable
        }
    }
}

/// Derived availability per accessory class
///
/// Not stored anywhere; recomputed from [`SwitchState`] at every report
/// boundary and pushed out immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortDecision {
    /// Headphone-class ports (headphone or line-out, no microphone)
    pub headphone: Availability,
    /// Headset-class ports (headphone or line-out plus microphone)
    pub headset: Availability,
}

/// Map switch state to port availability
///
/// A microphone line alongside an output line indicates a combined
/// headset rather than a headphone-only accessory; line-out is treated
/// as acoustically equivalent to headphone. The two classes are
/// mutually exclusive by construction.
pub fn port_availability(state: &SwitchState) -> PortDecision {
    let output_present = state.headphone_insert || state.lineout_insert;
    PortDecision {
        headphone: Availability::from(output_present && !state.microphone_insert),
        headset: Availability::from(output_present && state.microphone_insert),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(headphone: bool, microphone: bool, lineout: bool) -> SwitchState {
        SwitchState {
            headphone_insert: headphone,
            microphone_insert: microphone,
            lineout_insert: lineout,
        }
    }

    #[test]
    fn headphone_alone_is_headphone_class() {
        let decision = port_availability(&state(true, false, false));
        assert_eq!(decision.headphone, Availability::Available);
        assert_eq!(decision.headset, Availability::Unavailable);
    }

    #[test]
    fn headphone_with_microphone_is_headset_class() {
        let decision = port_availability(&state(true, true, false));
        assert_eq!(decision.headphone, Availability::Unavailable);
        assert_eq!(decision.headset, Availability::Available);
    }

    #[test]
    fn microphone_alone_implies_nothing() {
        let decision = port_availability(&state(false, true, false));
        assert_eq!(decision.headphone, Availability::Unavailable);
        assert_eq!(decision.headset, Availability::Unavailable);
    }

    #[test]
    fn lineout_counts_as_an_output_line() {
        let decision = port_availability(&state(false, false, true));
        assert_eq!(decision.headphone, Availability::Available);

        let decision = port_availability(&state(false, true, true));
        assert_eq!(decision.headset, Availability::Available);
    }

    #[test]
    fn classes_are_mutually_exclusive_for_all_states() {
        for bits in 0u8..8 {
            let s = state(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0);
            let decision = port_availability(&s);
            assert!(
                decision.headphone == Availability::Unavailable
                    || decision.headset == Availability::Unavailable,
                "both classes available for {:?}",
                s
            );
        }
    }

    #[test]
    fn apply_mutates_exactly_one_line() {
        let mut s = SwitchState::default();
        s.apply(SwitchKind::MicrophoneInsert, true);
        assert_eq!(s, state(false, true, false));

        s.apply(SwitchKind::MicrophoneInsert, false);
        assert_eq!(s, SwitchState::default());
    }

    #[test]
    fn value_reads_back_applied_lines() {
        let mut s = SwitchState::default();
        for kind in SwitchKind::ALL {
            assert!(!s.value(kind));
            s.apply(kind, true);
            assert!(s.value(kind));
        }
    }
}

//! Structured events decoded from a kernel input-event stream
//!
//! The raw stream carries `struct input_event` records; only two shapes
//! matter here: insertion-switch transitions (`EV_SW`) and the report
//! boundary (`EV_SYN`/`SYN_REPORT`) that marks one atomic state update.
//! Everything else is decoded but ignored.

/// Synchronization event type (`EV_SYN`)
pub const EV_SYN: u16 = 0x00;
/// Switch event type (`EV_SW`)
pub const EV_SW: u16 = 0x05;

/// End of one atomic batch of events (`SYN_REPORT`)
pub const SYN_REPORT: u16 = 0x00;
/// Kernel dropped events; a state snapshot follows (`SYN_DROPPED`)
pub const SYN_DROPPED: u16 = 0x03;

/// Headphone insertion switch (`SW_HEADPHONE_INSERT`)
pub const SW_HEADPHONE_INSERT: u16 = 0x02;
/// Microphone insertion switch (`SW_MICROPHONE_INSERT`)
pub const SW_MICROPHONE_INSERT: u16 = 0x04;
/// Line-out insertion switch (`SW_LINEOUT_INSERT`)
pub const SW_LINEOUT_INSERT: u16 = 0x06;

/// The insertion switches this crate tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwitchKind {
    /// A headphone plug is in the jack
    HeadphoneInsert,
    /// The inserted plug carries a microphone line
    MicrophoneInsert,
    /// A line-out plug is in the jack
    LineoutInsert,
}

impl SwitchKind {
    /// All tracked switches, in `SW_*` code order
    pub const ALL: [SwitchKind; 3] = [
        SwitchKind::HeadphoneInsert,
        SwitchKind::MicrophoneInsert,
        SwitchKind::LineoutInsert,
    ];

    /// Map a raw `SW_*` code to a tracked switch
    ///
    /// Returns `None` for switch codes this crate does not track
    /// (lid switches, tablet mode, and so on).
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            SW_HEADPHONE_INSERT => Some(SwitchKind::HeadphoneInsert),
            SW_MICROPHONE_INSERT => Some(SwitchKind::MicrophoneInsert),
            SW_LINEOUT_INSERT => Some(SwitchKind::LineoutInsert),
            _ => None,
        }
    }

    /// The raw `SW_*` code for this switch
    pub fn code(self) -> u16 {
        match self {
            SwitchKind::HeadphoneInsert => SW_HEADPHONE_INSERT,
            SwitchKind::MicrophoneInsert => SW_MICROPHONE_INSERT,
            SwitchKind::LineoutInsert => SW_LINEOUT_INSERT,
        }
    }
}

/// One decoded event from a switch source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEvent {
    /// A switch changed state (or a resync snapshot restated it)
    Switch {
        /// Raw `SW_*` code of the switch
        code: u16,
        /// Whether the switch line is asserted
        value: bool,
    },
    /// All events up to here form one atomic state update
    ReportBoundary,
    /// An event type this crate does not interpret
    Ignored,
}

impl SourceEvent {
    /// Convenience constructor for a tracked switch transition
    pub fn switch(kind: SwitchKind, value: bool) -> Self {
        SourceEvent::Switch {
            code: kind.code(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_codes_match_linux_numbering() {
        // Values from linux/input-event-codes.h
        assert_eq!(SwitchKind::HeadphoneInsert.code(), 0x02);
        assert_eq!(SwitchKind::MicrophoneInsert.code(), 0x04);
        assert_eq!(SwitchKind::LineoutInsert.code(), 0x06);
    }

    #[test]
    fn code_round_trips_for_tracked_switches() {
        for kind in SwitchKind::ALL {
            assert_eq!(SwitchKind::from_code(kind.code()), Some(kind));
        }
    }

    #[test]
    fn untracked_switch_codes_map_to_none() {
        assert_eq!(SwitchKind::from_code(0x00), None); // SW_LID
        assert_eq!(SwitchKind::from_code(0x0e), None); // SW_JACK_PHYSICAL_INSERT
        assert_eq!(SwitchKind::from_code(0xff), None);
    }

    #[test]
    fn switch_constructor_carries_the_raw_code() {
        let event = SourceEvent::switch(SwitchKind::LineoutInsert, true);
        assert_eq!(
            event,
            SourceEvent::Switch {
                code: SW_LINEOUT_INSERT,
                value: true
            }
        );
    }
}

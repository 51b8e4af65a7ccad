//! Real switch source backed by an evdev device
//!
//! Capability bits, device identity, and the EVIOCGSW state snapshot go
//! through the `evdev` crate. The event stream itself is read raw from
//! the descriptor, because resynchronization after a kernel-side drop
//! (`SYN_DROPPED`) has to stay visible to the drain loop instead of
//! being compensated behind its back.

use std::collections::VecDeque;
use std::io;
use std::mem;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::{Path, PathBuf};

use evdev::{Device, EventType, SwitchCode};
use tracing::error;

use jack_events::event::{EV_SW, EV_SYN, SYN_DROPPED, SYN_REPORT};
use jack_events::{ReadError, ReadMode, SourceEvent, SwitchKind, SwitchSource};

use crate::error::DetectError;

const READ_BATCH: usize = 64;

fn switch_code(kind: SwitchKind) -> SwitchCode {
    match kind {
        SwitchKind::HeadphoneInsert => SwitchCode::SW_HEADPHONE_INSERT,
        SwitchKind::MicrophoneInsert => SwitchCode::SW_MICROPHONE_INSERT,
        SwitchKind::LineoutInsert => SwitchCode::SW_LINEOUT_INSERT,
    }
}

/// An open, exclusively-owned handle to one switch-capable event device
///
/// The descriptor is owned by the wrapped [`Device`] and closed exactly
/// once, when the source is dropped.
pub struct EvdevSwitchSource {
    device: Device,
    path: PathBuf,
    buffered: VecDeque<libc::input_event>,
    resync: Option<VecDeque<SourceEvent>>,
}

impl EvdevSwitchSource {
    /// Open a device node and verify it reports the headphone switch
    ///
    /// The descriptor is switched to non-blocking so a drain loop can
    /// never stall the host's loop.
    pub fn open(path: &Path) -> Result<Self, DetectError> {
        let device = Device::open(path).map_err(|source| DetectError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;

        set_nonblocking(device.as_raw_fd()).map_err(|source| DetectError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;

        let capable = device.supported_events().contains(EventType::SWITCH)
            && device
                .supported_switches()
                .map_or(false, |sw| sw.contains(SwitchCode::SW_HEADPHONE_INSERT));
        if !capable {
            return Err(DetectError::NotSwitchCapable {
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            device,
            path: path.to_path_buf(),
            buffered: VecDeque::new(),
            resync: None,
        })
    }

    /// Path of the underlying device node
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Device identity string, if the kernel provides one
    pub fn device_name(&self) -> Option<&str> {
        self.device.name()
    }

    fn next_normal(&mut self) -> Result<SourceEvent, ReadError> {
        self.resync = None;

        loop {
            if let Some(raw) = self.buffered.pop_front() {
                if raw.type_ == EV_SYN && raw.code == SYN_DROPPED {
                    // Anything still buffered predates the drop and no
                    // longer describes reality.
                    self.buffered.clear();
                    return Err(ReadError::ResyncRequired);
                }
                return Ok(translate(&raw));
            }
            self.fill_buffer()?;
        }
    }

    fn fill_buffer(&mut self) -> Result<(), ReadError> {
        let record = mem::size_of::<libc::input_event>();
        let mut records: [libc::input_event; READ_BATCH] = unsafe { mem::zeroed() };

        // SAFETY: the buffer outlives the call and the length matches
        // its allocation; evdev reads always return whole records.
        let n = unsafe {
            libc::read(
                self.device.as_raw_fd(),
                records.as_mut_ptr() as *mut libc::c_void,
                record * READ_BATCH,
            )
        };

        if n < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::WouldBlock {
                return Err(ReadError::WouldBlock);
            }
            return Err(ReadError::Io(err));
        }
        if n == 0 {
            return Err(ReadError::Io(io::Error::from(io::ErrorKind::UnexpectedEof)));
        }

        let count = n as usize / record;
        self.buffered.extend(records[..count].iter().copied());
        Ok(())
    }

    fn next_resync(&mut self) -> Result<SourceEvent, ReadError> {
        if self.resync.is_none() {
            self.resync = Some(self.snapshot());
        }
        if let Some(queue) = self.resync.as_mut() {
            if let Some(event) = queue.pop_front() {
                return Ok(event);
            }
        }

        // Snapshot fully served: the next normal-mode read resumes the
        // live stream.
        self.resync = None;
        Err(ReadError::WouldBlock)
    }

    /// Build the resync snapshot: one event per supported insertion
    /// switch restating its current value, closed by a report boundary.
    fn snapshot(&self) -> VecDeque<SourceEvent> {
        let current = match self.device.get_switch_state() {
            Ok(state) => state,
            Err(err) => {
                error!("Switch snapshot failed on {}: {}", self.path.display(), err);
                return VecDeque::new();
            }
        };

        let mut queue = VecDeque::new();
        for kind in SwitchKind::ALL {
            if self.has_switch(kind) {
                queue.push_back(SourceEvent::switch(kind, current.contains(switch_code(kind))));
            }
        }
        queue.push_back(SourceEvent::ReportBoundary);
        queue
    }
}

impl SwitchSource for EvdevSwitchSource {
    fn has_switch(&self, kind: SwitchKind) -> bool {
        self.device
            .supported_switches()
            .map_or(false, |sw| sw.contains(switch_code(kind)))
    }

    fn switch_value(&self, kind: SwitchKind) -> Option<bool> {
        if !self.has_switch(kind) {
            return None;
        }
        match self.device.get_switch_state() {
            Ok(state) => Some(state.contains(switch_code(kind))),
            Err(err) => {
                error!("Switch value query failed on {}: {}", self.path.display(), err);
                None
            }
        }
    }

    fn next_event(&mut self, mode: ReadMode) -> Result<SourceEvent, ReadError> {
        match mode {
            ReadMode::Normal => self.next_normal(),
            ReadMode::Resync => self.next_resync(),
        }
    }

    fn raw_fd(&self) -> RawFd {
        self.device.as_raw_fd()
    }
}

fn translate(raw: &libc::input_event) -> SourceEvent {
    match raw.type_ {
        EV_SW => SourceEvent::Switch {
            code: raw.code,
            value: raw.value != 0,
        },
        EV_SYN if raw.code == SYN_REPORT => SourceEvent::ReportBoundary,
        _ => SourceEvent::Ignored,
    }
}

fn set_nonblocking(fd: RawFd) -> io::Result<()> {
    // SAFETY: fd stays open for the lifetime of the owning Device.
    let flags = unsafe { libc::fcntl(fd, libc::F_GETFL) };
    if flags < 0 {
        return Err(io::Error::last_os_error());
    }
    if unsafe { libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) } < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_event(type_: u16, code: u16, value: i32) -> libc::input_event {
        let mut event: libc::input_event = unsafe { mem::zeroed() };
        event.type_ = type_;
        event.code = code;
        event.value = value;
        event
    }

    #[test]
    fn switch_records_translate_to_switch_events() {
        let event = translate(&raw_event(EV_SW, 0x02, 1));
        assert_eq!(
            event,
            SourceEvent::Switch {
                code: 0x02,
                value: true
            }
        );
    }

    #[test]
    fn report_markers_translate_to_boundaries() {
        assert_eq!(
            translate(&raw_event(EV_SYN, SYN_REPORT, 0)),
            SourceEvent::ReportBoundary
        );
    }

    #[test]
    fn unknown_types_are_ignored() {
        // EV_KEY and EV_MSC traffic shares the stream on many devices
        assert_eq!(translate(&raw_event(0x01, 30, 1)), SourceEvent::Ignored);
        assert_eq!(translate(&raw_event(0x04, 4, 458792)), SourceEvent::Ignored);
    }

    #[test]
    fn opening_a_missing_node_fails_with_open_error() {
        let result = EvdevSwitchSource::open(Path::new("/nonexistent/jacksense-event0"));
        assert!(matches!(result, Err(DetectError::OpenFailed { .. })));
    }
}

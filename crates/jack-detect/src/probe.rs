//! Capability probing of candidate device nodes
//!
//! Candidates are tried in scan order; the first one that opens and
//! reports the headphone insertion switch wins and is returned with its
//! descriptor open. Every loser is closed before the next candidate is
//! tried, and every per-candidate failure is logged and skipped rather
//! than propagated.

use tracing::{debug, info, warn};

use crate::error::DetectError;
use crate::scanner::{CandidateDevice, NodeScanner, ScannerConfig};
use crate::source::EvdevSwitchSource;

/// Find the switch-capable event device, scanning `/dev/input`
///
/// Returns `None` when no candidate qualifies or the directory cannot
/// be enumerated. Absence of a switch-capable device is expected on
/// hardware without a wired jack and is not an error.
pub fn find_switch_source() -> Option<EvdevSwitchSource> {
    find_switch_source_in(&ScannerConfig::default())
}

/// Find the switch-capable event device under a configured directory
pub fn find_switch_source_in(config: &ScannerConfig) -> Option<EvdevSwitchSource> {
    let candidates = match NodeScanner::with_config(config.clone()).scan() {
        Ok(candidates) => candidates,
        Err(err) => {
            warn!("Device enumeration failed: {}", err);
            return None;
        }
    };

    let source = first_qualifying(candidates, |candidate| {
        EvdevSwitchSource::open(&candidate.path)
    })?;
    info!(
        "Using {} ({})",
        source.path().display(),
        source.device_name().unwrap_or("unnamed device")
    );
    Some(source)
}

/// Probe candidates in order; the first that opens and qualifies wins
///
/// Per-candidate failures are logged and skipped; they never abort the
/// search.
fn first_qualifying<S>(
    candidates: Vec<CandidateDevice>,
    mut open: impl FnMut(&CandidateDevice) -> Result<S, DetectError>,
) -> Option<S> {
    for candidate in candidates {
        debug!("Checking {} for headphone switch", candidate.path.display());

        match open(&candidate) {
            Ok(source) => return Some(source),
            Err(err) => warn!("Skipping candidate: {}", err),
        }
    }

    debug!("No switch-capable device found");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn candidate(name: &str) -> CandidateDevice {
        CandidateDevice {
            path: PathBuf::from(format!("/dev/input/{}", name)),
            name: name.to_string(),
        }
    }

    #[test]
    fn first_qualifying_candidate_wins() {
        let winner = first_qualifying(
            vec![candidate("event1"), candidate("event2")],
            |c| Ok::<_, DetectError>(c.name.clone()),
        );
        assert_eq!(winner.as_deref(), Some("event1"));
    }

    #[test]
    fn failed_probes_fall_through_to_later_candidates() {
        let winner = first_qualifying(
            vec![candidate("event1"), candidate("event2")],
            |c| {
                if c.name == "event1" {
                    Err(DetectError::NotSwitchCapable {
                        path: c.path.clone(),
                    })
                } else {
                    Ok(c.name.clone())
                }
            },
        );
        assert_eq!(winner.as_deref(), Some("event2"));
    }

    #[test]
    fn no_qualifying_candidate_yields_none() {
        let winner = first_qualifying(vec![candidate("event1")], |c| {
            Err::<String, _>(DetectError::NotSwitchCapable {
                path: c.path.clone(),
            })
        });
        assert!(winner.is_none());
    }

    #[test]
    fn empty_directory_yields_no_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScannerConfig {
            device_dir: dir.path().to_path_buf(),
            name_prefix: "event".to_string(),
        };
        assert!(find_switch_source_in(&config).is_none());
    }

    #[test]
    fn unreadable_directory_yields_no_source() {
        let config = ScannerConfig {
            device_dir: PathBuf::from("/nonexistent/jacksense-test"),
            name_prefix: "event".to_string(),
        };
        assert!(find_switch_source_in(&config).is_none());
    }

    #[test]
    fn non_event_files_are_skipped_not_fatal() {
        // Plain files match the prefix but fail the evdev open; the
        // probe must skip them and fall through to None.
        let dir = tempfile::tempdir().unwrap();
        std::fs::File::create(dir.path().join("event0")).unwrap();

        let config = ScannerConfig {
            device_dir: dir.path().to_path_buf(),
            name_prefix: "event".to_string(),
        };
        assert!(find_switch_source_in(&config).is_none());
    }
}

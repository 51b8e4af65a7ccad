//! Input device node scanner
//!
//! This module enumerates candidate event nodes under the device
//! directory, in a deterministic version-aware order.

use std::cmp::Ordering;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DetectError;

/// A candidate input-event device node
///
/// Ephemeral: produced by enumeration and consumed immediately by the
/// capability probe.
#[derive(Debug, Clone)]
pub struct CandidateDevice {
    /// Full path of the node (e.g. /dev/input/event3)
    pub path: PathBuf,
    /// File name of the node (e.g. event3)
    pub name: String,
}

/// Node scanner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Directory holding the event nodes
    pub device_dir: PathBuf,
    /// File-name prefix identifying event nodes
    pub name_prefix: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            device_dir: PathBuf::from("/dev/input"),
            name_prefix: "event".to_string(),
        }
    }
}

/// Input device node scanner
pub struct NodeScanner {
    config: ScannerConfig,
}

impl NodeScanner {
    /// Create a new scanner with default configuration
    pub fn new() -> Self {
        Self {
            config: ScannerConfig::default(),
        }
    }

    /// Create a scanner with custom configuration
    pub fn with_config(config: ScannerConfig) -> Self {
        Self { config }
    }

    /// Enumerate matching device nodes, sorted version-aware
    ///
    /// "event9" sorts before "event10", so selection among multiple
    /// qualifying devices is deterministic.
    pub fn scan(&self) -> Result<Vec<CandidateDevice>, DetectError> {
        debug!(
            "Scanning {} for {}* nodes",
            self.config.device_dir.display(),
            self.config.name_prefix
        );

        let entries = fs::read_dir(&self.config.device_dir).map_err(|source| {
            DetectError::EnumerationFailed {
                dir: self.config.device_dir.clone(),
                source,
            }
        })?;

        let mut found: Vec<CandidateDevice> = entries
            .flatten()
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !name.starts_with(&self.config.name_prefix) {
                    return None;
                }
                Some(CandidateDevice {
                    path: entry.path(),
                    name,
                })
            })
            .collect();

        found.sort_by(|a, b| version_cmp(&a.name, &b.name));

        debug!("Found {} candidate node(s)", found.len());
        Ok(found)
    }
}

impl Default for NodeScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Version-aware name ordering
///
/// Runs of ASCII digits compare numerically, everything else compares
/// byte-wise.
fn version_cmp(a: &str, b: &str) -> Ordering {
    let ab = a.as_bytes();
    let bb = b.as_bytes();
    let (mut i, mut j) = (0, 0);

    while i < ab.len() && j < bb.len() {
        if ab[i].is_ascii_digit() && bb[j].is_ascii_digit() {
            let si = i;
            while i < ab.len() && ab[i].is_ascii_digit() {
                i += 1;
            }
            let sj = j;
            while j < bb.len() && bb[j].is_ascii_digit() {
                j += 1;
            }
            let da = a[si..i].trim_start_matches('0');
            let db = b[sj..j].trim_start_matches('0');
            let ord = da.len().cmp(&db.len()).then_with(|| da.cmp(db));
            if ord != Ordering::Equal {
                return ord;
            }
        } else {
            if ab[i] != bb[j] {
                return ab[i].cmp(&bb[j]);
            }
            i += 1;
            j += 1;
        }
    }

    (ab.len() - i).cmp(&(bb.len() - j))
}

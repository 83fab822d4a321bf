//! Live dumps through `/proc/<pid>/livedump`
//!
//! Newer kernels expose a write-only control file per process. Writing a
//! command line to it triggers the dump:
//!
//! ```text
//! /proc/
//! ├── self/livedump          ← probed once to select this interface
//! ├── 1234/livedump          ← " io_prio=2 sched_prio=5\n"
//! └── 5678/livedump          ← same payload, written independently
//! ```
//!
//! The payload is built once per batch and written to every target in a
//! single `write(2)`. A target that fails does not stop the others.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::report::{DeliveryError, DumpReport};
use super::LiveDumper;
use crate::params::{LiveDumpCommand, LiveDumpParams};

/// Default procfs mount point
pub const PROC_ROOT: &str = "/proc";

/// Name of the per-process control file
pub const LIVEDUMP_FILE: &str = "livedump";

/// Requests dumps by writing to each target's control file
#[derive(Debug, Clone)]
pub struct ProcfsRequester {
    /// Base path: /proc
    proc_root: PathBuf,
}

impl ProcfsRequester {
    pub fn new() -> Self {
        Self::with_root(PROC_ROOT)
    }

    /// Use a different procfs root (tests point this at a temp dir)
    pub fn with_root(proc_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
        }
    }

    /// Get the path to a process's control file
    pub fn control_path(&self, pid: i32) -> PathBuf {
        self.proc_root.join(pid.to_string()).join(LIVEDUMP_FILE)
    }

    /// Deliver one payload to one control file
    ///
    /// The file is opened write-only without `O_CREAT`, so a missing process
    /// surfaces as an open error. The handle is dropped on every path.
    fn deliver(&self, path: &Path, payload: &[u8]) -> Result<(), DeliveryError> {
        let mut file = OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(|error| DeliveryError::Open {
                path: path.to_path_buf(),
                error,
            })?;

        // One write call; a partial write is a failure, not something to resume
        let written = file.write(payload).map_err(|error| DeliveryError::Write {
            path: path.to_path_buf(),
            error,
        })?;

        if written != payload.len() {
            return Err(DeliveryError::ShortWrite {
                path: path.to_path_buf(),
                written,
                expected: payload.len(),
            });
        }

        Ok(())
    }
}

impl Default for ProcfsRequester {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveDumper for ProcfsRequester {
    fn name(&self) -> &'static str {
        "procfs"
    }

    fn dump(&self, params: &LiveDumpParams, targets: &[i32]) -> DumpReport {
        let payload = LiveDumpCommand::from_params(params).render();
        tracing::debug!(payload = ?payload, targets = targets.len(), "procfs livedump command");

        let mut report = DumpReport::new();
        for &pid in targets {
            let path = self.control_path(pid);
            report.record(pid, self.deliver(&path, payload.as_bytes()));
        }
        report
    }
}

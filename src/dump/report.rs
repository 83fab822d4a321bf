//! Per-target outcome of one dump batch

use std::io;
use std::path::PathBuf;

use nix::errno::Errno;
use thiserror::Error;

/// A single target could not be dumped
///
/// These never abort the batch; the remaining targets are still attempted.
/// The OS error is part of the message and not chained as a source.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Unable to open {}: {error}", .path.display())]
    Open { path: PathBuf, error: io::Error },

    #[error("Error writing to {}: {error}", .path.display())]
    Write { path: PathBuf, error: io::Error },

    #[error("Error writing to {}: short write ({written} of {expected} bytes)", .path.display())]
    ShortWrite {
        path: PathBuf,
        written: usize,
        expected: usize,
    },

    #[error("failed to dump core of {pid}: {error}")]
    Trace { pid: i32, error: Errno },
}

/// Ordered results, one per requested target (duplicates included)
#[derive(Debug, Default)]
pub struct DumpReport {
    outcomes: Vec<(i32, Result<(), DeliveryError>)>,
}

impl DumpReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, pid: i32, outcome: Result<(), DeliveryError>) {
        if let Err(ref e) = outcome {
            tracing::error!(pid, "{}", e);
        } else {
            tracing::info!(pid, "live dump requested");
        }
        self.outcomes.push((pid, outcome));
    }

    pub fn outcomes(&self) -> &[(i32, Result<(), DeliveryError>)] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn succeeded(&self) -> impl Iterator<Item = i32> + '_ {
        self.outcomes
            .iter()
            .filter(|(_, r)| r.is_ok())
            .map(|(pid, _)| *pid)
    }

    pub fn failed(&self) -> impl Iterator<Item = (i32, &DeliveryError)> + '_ {
        self.outcomes
            .iter()
            .filter_map(|(pid, r)| r.as_ref().err().map(|e| (*pid, e)))
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|(_, r)| r.is_ok())
    }

    /// 0 if every target succeeded, 1 otherwise
    pub fn exit_code(&self) -> u8 {
        if self.all_succeeded() {
            0
        } else {
            1
        }
    }
}

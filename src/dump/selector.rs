//! Interface selection
//!
//! The procfs and ptrace interfaces belong to different kernel generations
//! and are never mixed. The caller probes once for its own control file
//! and every target in the batch goes through whichever interface won.

use std::path::PathBuf;

use nix::unistd::{access, AccessFlags};

use super::procfs::ProcfsRequester;
use super::report::DumpReport;
use super::trace::{KernelTrace, TraceCall, TraceRequester};
use super::LiveDumper;
use crate::params::LiveDumpParams;

/// Control file of the calling process
pub const SELF_LIVEDUMP: &str = "/proc/self/livedump";

/// Answers "does this kernel have the procfs interface?"
pub trait Probe {
    fn procfs_available(&self) -> bool;
}

/// Checks `/proc/self/livedump` with `access(F_OK)`
#[derive(Debug, Clone)]
pub struct ProcSelfProbe {
    path: PathBuf,
}

impl ProcSelfProbe {
    pub fn new() -> Self {
        Self::at(SELF_LIVEDUMP)
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for ProcSelfProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for ProcSelfProbe {
    fn procfs_available(&self) -> bool {
        access(&self.path, AccessFlags::F_OK).is_ok()
    }
}

/// A probe with a fixed answer (`--interface=procfs|ptrace`, tests)
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe(pub bool);

impl Probe for FixedProbe {
    fn procfs_available(&self) -> bool {
        self.0
    }
}

/// The one interface chosen for this invocation
#[derive(Debug, Clone)]
pub enum Requester<T: TraceCall = KernelTrace> {
    FileBased(ProcfsRequester),
    TraceBased(TraceRequester<T>),
}

impl<T: TraceCall> Requester<T> {
    /// Probe once and keep the matching requester
    pub fn select(probe: &dyn Probe, procfs: ProcfsRequester, trace: TraceRequester<T>) -> Self {
        if probe.procfs_available() {
            Requester::FileBased(procfs)
        } else {
            Requester::TraceBased(trace)
        }
    }

    pub fn is_file_based(&self) -> bool {
        matches!(self, Requester::FileBased(_))
    }
}

impl Requester<KernelTrace> {
    pub fn detect(probe: &dyn Probe) -> Self {
        Self::select(probe, ProcfsRequester::new(), TraceRequester::new())
    }
}

impl<T: TraceCall> LiveDumper for Requester<T> {
    fn name(&self) -> &'static str {
        match self {
            Requester::FileBased(r) => r.name(),
            Requester::TraceBased(r) => r.name(),
        }
    }

    fn dump(&self, params: &LiveDumpParams, targets: &[i32]) -> DumpReport {
        match self {
            Requester::FileBased(r) => r.dump(params, targets),
            Requester::TraceBased(r) => r.dump(params, targets),
        }
    }
}

//! Live dump dispatch
//!
//! # Flow
//!
//! ```text
//! DumpConfig ──► Probe ──► /proc/self/livedump exists?
//!                              │
//!                 yes ─────────┴───────── no
//!                  │                       │
//!                  ▼                       ▼
//!          ProcfsRequester          TraceRequester
//!          write(/proc/N/livedump)  ptrace(PTRACE_LIVEDUMP, N)
//!                  │                       │
//!                  └──────► DumpReport ◄───┘
//! ```
//!
//! Exactly one requester handles the whole batch. Targets are processed
//! sequentially in the order given.

pub mod procfs;
pub mod report;
pub mod selector;
pub mod trace;

pub use procfs::ProcfsRequester;
pub use report::{DeliveryError, DumpReport};
pub use selector::{FixedProbe, ProcSelfProbe, Probe, Requester};
pub use trace::{KernelTrace, TraceCall, TraceRequester};

use crate::config::{DumpConfig, InterfaceChoice};
use crate::params::LiveDumpParams;
use crate::privileges;

/// A way of asking the kernel for live dumps
pub trait LiveDumper {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Attempt every target once, in order, and report each outcome
    fn dump(&self, params: &LiveDumpParams, targets: &[i32]) -> DumpReport;
}

/// Select an interface for `config` and dump every target through it
pub fn dispatch(config: &DumpConfig) -> DumpReport {
    let requester = match config.interface {
        InterfaceChoice::Auto => Requester::detect(&ProcSelfProbe::new()),
        InterfaceChoice::Procfs => Requester::detect(&FixedProbe(true)),
        InterfaceChoice::Ptrace => Requester::detect(&FixedProbe(false)),
    };
    run(&requester, config)
}

/// Dump through an already selected requester
pub fn run<T: TraceCall>(requester: &Requester<T>, config: &DumpConfig) -> DumpReport {
    tracing::info!(
        interface = requester.name(),
        targets = config.targets.len(),
        "requesting live dumps"
    );

    if !requester.is_file_based() {
        privileges::warn_if_unprivileged();
    }

    requester.dump(&config.params, &config.targets)
}

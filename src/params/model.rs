//! Live dump tuning parameters
//!
//! The kernel accepts four optional knobs that govern how a live dump is
//! produced. Each interface reads them differently:
//!
//! ```text
//! ┌──────────────────┬─────────────────────────────┬──────────────────────────────┐
//! │ Field            │ /proc/<pid>/livedump        │ ptrace(PTRACE_LIVEDUMP)      │
//! ├──────────────────┼─────────────────────────────┼──────────────────────────────┤
//! │ core limit       │ core_limit=<N|unlimited>    │ core_limit_set + core_limit  │
//! │ I/O priority     │ io_prio=<N>                 │ io_prio                      │
//! │ OOM adjustment   │ oom_adj=<N>                 │ oom_adj                      │
//! │ sched niceness   │ sched_prio=<N>              │ sched_nice                   │
//! └──────────────────┴─────────────────────────────┴──────────────────────────────┘
//! ```
//!
//! The procfs interface only receives fields that were explicitly supplied.
//! The ptrace interface receives the whole struct or nothing at all.

use std::os::raw::{c_int, c_ulong};

/// `RLIM_INFINITY`: the sentinel size limit meaning "no limit"
///
/// Truncates to the 32-bit `RLIM_INFINITY` when lowered to `c_ulong` on
/// 32-bit targets.
pub const RLIM_INFINITY: u64 = u64::MAX;

/// Lowest OOM adjustment; disables the OOM killer for the process
pub const OOM_DISABLE: i32 = -17;

/// Highest OOM adjustment
pub const OOM_ADJUST_MAX: i32 = 15;

/// Niceness bounds accepted by the scheduler
pub const NICE_MIN: i32 = -20;
pub const NICE_MAX: i32 = 19;

/// I/O priority levels within a class
pub const IO_PRIO_MIN: i32 = 0;
pub const IO_PRIO_MAX: i32 = 7;

/// Maximum size of the produced core artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreLimit {
    /// Explicit byte count (0 is a legal, concrete limit)
    Bytes(u64),
    /// `unlimited` on the command line; maps to `RLIM_INFINITY`
    Unlimited,
}

impl CoreLimit {
    /// Value handed to the kernel
    pub fn as_raw(&self) -> u64 {
        match self {
            CoreLimit::Bytes(n) => *n,
            CoreLimit::Unlimited => RLIM_INFINITY,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, CoreLimit::Unlimited)
    }
}

/// Tuning values for one invocation
///
/// `None` means "not supplied on the command line". A supplied `Some(0)` is
/// kept distinct from `None` so the procfs payload can carry explicit zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiveDumpParams {
    pub core_limit: Option<CoreLimit>,
    pub io_prio: Option<i32>,
    pub oom_adj: Option<i32>,
    pub sched_nice: Option<i32>,
}

impl LiveDumpParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_core_limit(mut self, limit: CoreLimit) -> Self {
        self.core_limit = Some(limit);
        self
    }

    pub fn with_io_prio(mut self, prio: i32) -> Self {
        self.io_prio = Some(prio);
        self
    }

    pub fn with_oom_adj(mut self, adj: i32) -> Self {
        self.oom_adj = Some(adj);
        self
    }

    pub fn with_sched_nice(mut self, nice: i32) -> Self {
        self.sched_nice = Some(nice);
        self
    }

    /// True if any field was supplied at all (procfs semantics)
    pub fn any_supplied(&self) -> bool {
        self.core_limit.is_some()
            || self.io_prio.is_some()
            || self.oom_adj.is_some()
            || self.sched_nice.is_some()
    }

    /// Whether the ptrace path should pass the parameter block
    ///
    /// A supplied limit always counts, but the integer knobs only count when
    /// non-zero: an explicit `--sched-nice=0` alone still sends a null
    /// parameter and the kernel uses its defaults. Known quirk.
    pub fn trace_changed(&self) -> bool {
        self.core_limit.is_some()
            || self.io_prio.is_some_and(|v| v != 0)
            || self.oom_adj.is_some_and(|v| v != 0)
            || self.sched_nice.is_some_and(|v| v != 0)
    }

    /// Lower into the C layout expected by `PTRACE_LIVEDUMP`
    ///
    /// Unset fields become zero.
    pub fn to_raw(&self) -> RawLiveDumpParam {
        RawLiveDumpParam {
            sched_nice: self.sched_nice.unwrap_or(0),
            io_prio: self.io_prio.unwrap_or(0),
            oom_adj: self.oom_adj.unwrap_or(0),
            core_limit_set: self.core_limit.is_some(),
            core_limit: self.core_limit.map_or(0, |l| l.as_raw()) as c_ulong,
        }
    }
}

/// `struct livedump_param` from `<linux/livedump.h>`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawLiveDumpParam {
    pub sched_nice: c_int,
    pub io_prio: c_int,
    pub oom_adj: c_int,
    pub core_limit_set: bool,
    pub core_limit: c_ulong,
}

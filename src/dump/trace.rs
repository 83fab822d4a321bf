//! Live dumps through `ptrace(PTRACE_LIVEDUMP)`
//!
//! Older live-dump kernels have no procfs control file and take the request
//! as a ptrace operation instead. The parameter block is all-or-nothing:
//!
//! ```text
//! trace_changed() == false   →  ptrace(LIVEDUMP, pid, NULL, NULL)
//! trace_changed() == true    →  ptrace(LIVEDUMP, pid, NULL, &livedump_param)
//! ```
//!
//! One call per target, no batching and no retries.

use std::os::raw::c_void;
use std::ptr;

use nix::errno::Errno;

use super::report::{DeliveryError, DumpReport};
use super::LiveDumper;
use crate::params::{LiveDumpParams, RawLiveDumpParam};

/// ptrace request code for a live dump
pub const PTRACE_LIVEDUMP: u32 = 0x4221;

/// The raw kernel call, split out so tests can record it
pub trait TraceCall {
    fn livedump(&self, pid: i32, param: Option<&RawLiveDumpParam>) -> Result<(), Errno>;
}

/// Issues the real syscall
#[derive(Debug, Clone, Copy, Default)]
pub struct KernelTrace;

impl TraceCall for KernelTrace {
    fn livedump(&self, pid: i32, param: Option<&RawLiveDumpParam>) -> Result<(), Errno> {
        let data = param.map_or(ptr::null_mut(), |p| {
            p as *const RawLiveDumpParam as *mut c_void
        });

        // SAFETY: addr is null and data is either null or points at a live
        // #[repr(C)] livedump_param that outlives the call. The kernel only
        // reads through it.
        let ret = unsafe {
            libc::ptrace(
                PTRACE_LIVEDUMP as _,
                pid as libc::pid_t,
                ptr::null_mut::<c_void>(),
                data,
            )
        };

        Errno::result(ret).map(drop)
    }
}

/// Requests dumps one ptrace call at a time
#[derive(Debug, Clone, Default)]
pub struct TraceRequester<T: TraceCall = KernelTrace> {
    call: T,
}

impl TraceRequester<KernelTrace> {
    pub fn new() -> Self {
        Self { call: KernelTrace }
    }
}

impl<T: TraceCall> TraceRequester<T> {
    pub fn with_call(call: T) -> Self {
        Self { call }
    }
}

impl<T: TraceCall> LiveDumper for TraceRequester<T> {
    fn name(&self) -> &'static str {
        "ptrace"
    }

    fn dump(&self, params: &LiveDumpParams, targets: &[i32]) -> DumpReport {
        let raw = params.to_raw();
        let param = params.trace_changed().then_some(&raw);
        tracing::debug!(?param, targets = targets.len(), "ptrace livedump parameters");

        let mut report = DumpReport::new();
        for &pid in targets {
            let outcome = self
                .call
                .livedump(pid, param)
                .map_err(|error| DeliveryError::Trace { pid, error });
            report.record(pid, outcome);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(i32, Option<RawLiveDumpParam>)>>,
        fail: Vec<i32>,
    }

    impl TraceCall for &Recorder {
        fn livedump(&self, pid: i32, param: Option<&RawLiveDumpParam>) -> Result<(), Errno> {
            self.calls.borrow_mut().push((pid, param.copied()));
            if self.fail.contains(&pid) {
                Err(Errno::ESRCH)
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_null_param_when_nothing_changed() {
        let recorder = Recorder::default();
        let requester = TraceRequester::with_call(&recorder);

        let report = requester.dump(&LiveDumpParams::new(), &[1, 2]);
        assert_eq!(report.exit_code(), 0);
        assert_eq!(*recorder.calls.borrow(), vec![(1, None), (2, None)]);
    }

    #[test]
    fn test_explicit_zero_nice_still_sends_null() {
        let recorder = Recorder::default();
        let requester = TraceRequester::with_call(&recorder);

        requester.dump(&LiveDumpParams::new().with_sched_nice(0), &[1]);
        assert_eq!(*recorder.calls.borrow(), vec![(1, None)]);
    }

    #[test]
    fn test_full_struct_when_changed() {
        let recorder = Recorder::default();
        let requester = TraceRequester::with_call(&recorder);
        let params = LiveDumpParams::new().with_io_prio(3);

        requester.dump(&params, &[5, 5]);

        let expected = RawLiveDumpParam {
            io_prio: 3,
            ..Default::default()
        };
        assert_eq!(
            *recorder.calls.borrow(),
            vec![(5, Some(expected)), (5, Some(expected))]
        );
    }

    #[test]
    fn test_failure_continues_to_next_target() {
        let recorder = Recorder {
            fail: vec![2],
            ..Default::default()
        };
        let requester = TraceRequester::with_call(&recorder);

        let report = requester.dump(&LiveDumpParams::new(), &[1, 2, 3]);
        assert_eq!(recorder.calls.borrow().len(), 3);
        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.succeeded().collect::<Vec<_>>(), vec![1, 3]);
    }
}

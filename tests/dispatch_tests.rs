//! Integration tests for live dump dispatch
//!
//! The procfs path runs against a fake proc root in a temp dir and the
//! ptrace path against a recording `TraceCall`, so nothing here needs
//! a live-dump kernel or privileges.

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use nix::errno::Errno;

use pcoredump::dump::{
    self, FixedProbe, ProcfsRequester, Requester, TraceCall, TraceRequester,
};
use pcoredump::params::{validate, RawLiveDumpParam};
use pcoredump::{CoreLimit, DeliveryError, DumpConfig, LiveDumpParams};

#[derive(Default)]
struct RecordingTrace {
    calls: RefCell<Vec<(i32, Option<RawLiveDumpParam>)>>,
}

impl TraceCall for &RecordingTrace {
    fn livedump(&self, pid: i32, param: Option<&RawLiveDumpParam>) -> Result<(), Errno> {
        self.calls.borrow_mut().push((pid, param.copied()));
        Ok(())
    }
}

fn fake_process(root: &Path, pid: i32) {
    let dir = root.join(pid.to_string());
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("livedump"), "").unwrap();
}

/// Build params the way the CLI would, from raw flag values
fn params_from_flags(nice: &str, io: &str) -> LiveDumpParams {
    LiveDumpParams::new()
        .with_sched_nice(validate::sched_nice(nice).unwrap())
        .with_io_prio(validate::io_priority(io).unwrap())
}

#[test]
fn test_procfs_partial_failure_reports_each_target() {
    let root = tempfile::tempdir().unwrap();
    fake_process(root.path(), 41);

    let recorder = RecordingTrace::default();
    let requester = Requester::select(
        &FixedProbe(true),
        ProcfsRequester::with_root(root.path()),
        TraceRequester::with_call(&recorder),
    );
    let config = DumpConfig::new(params_from_flags("5", "2"), vec![41, 42]);

    let report = dump::run(&requester, &config);

    assert_eq!(report.succeeded().collect::<Vec<_>>(), vec![41]);
    let failed: Vec<_> = report.failed().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].0, 42);
    assert!(matches!(failed[0].1, DeliveryError::Open { .. }));
    assert_eq!(report.exit_code(), 1);

    assert_eq!(
        fs::read_to_string(root.path().join("41/livedump")).unwrap(),
        " io_prio=2 sched_prio=5\n"
    );
    // The ptrace interface is never touched once procfs is selected
    assert!(recorder.calls.borrow().is_empty());
}

#[test]
fn test_ptrace_without_flags_passes_null_for_every_target() {
    let root = tempfile::tempdir().unwrap();
    let recorder = RecordingTrace::default();
    let requester = Requester::select(
        &FixedProbe(false),
        ProcfsRequester::with_root(root.path()),
        TraceRequester::with_call(&recorder),
    );
    let config = DumpConfig::new(LiveDumpParams::new(), vec![7, 8, 7]);

    let report = dump::run(&requester, &config);

    assert_eq!(report.exit_code(), 0);
    assert_eq!(*recorder.calls.borrow(), vec![(7, None), (8, None), (7, None)]);
    // No control files were created
    assert_eq!(fs::read_dir(root.path()).unwrap().count(), 0);
}

#[test]
fn test_ptrace_with_any_flag_passes_full_struct() {
    let recorder = RecordingTrace::default();
    let requester = Requester::select(
        &FixedProbe(false),
        ProcfsRequester::new(),
        TraceRequester::with_call(&recorder),
    );
    let params = LiveDumpParams::new().with_core_limit(validate::core_limit("unlimited").unwrap());
    let config = DumpConfig::new(params, vec![3, 4]);

    dump::run(&requester, &config);

    let expected = RawLiveDumpParam {
        sched_nice: 0,
        io_prio: 0,
        oom_adj: 0,
        core_limit_set: true,
        core_limit: u64::MAX as _,
    };
    assert_eq!(
        *recorder.calls.borrow(),
        vec![(3, Some(expected)), (4, Some(expected))]
    );
}

#[test]
fn test_zero_limit_is_distinct_from_unset() {
    let set = LiveDumpParams::new().with_core_limit(validate::core_limit("0").unwrap());
    assert_eq!(set.core_limit, Some(CoreLimit::Bytes(0)));
    assert!(set.trace_changed());
    assert!(set.to_raw().core_limit_set);

    let unset = LiveDumpParams::new();
    assert!(!unset.trace_changed());
    assert!(!unset.to_raw().core_limit_set);
}

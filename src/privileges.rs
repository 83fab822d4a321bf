//! Capability preflight for the ptrace interface
//!
//! `PTRACE_LIVEDUMP` goes through the same access checks as any other
//! ptrace request. Dumping a process owned by another user needs
//! `CAP_SYS_PTRACE`:
//!
//! ```text
//! ┌────────────────────┬──────────────────────────────────────────────┐
//! │ Caller             │ Can dump                                     │
//! ├────────────────────┼──────────────────────────────────────────────┤
//! │ same uid           │ own processes (subject to yama ptrace_scope) │
//! │ CAP_SYS_PTRACE     │ any process                                  │
//! └────────────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! The check is advisory: it only logs. The kernel has the final word.

use caps::{CapSet, Capability};

/// Whether the calling process holds `CAP_SYS_PTRACE` in its effective set
///
/// Returns `None` if the capability sets cannot be read.
pub fn has_ptrace_capability() -> Option<bool> {
    caps::has_cap(None, CapSet::Effective, Capability::CAP_SYS_PTRACE).ok()
}

/// Warn when a ptrace dispatch is likely to be refused
pub fn warn_if_unprivileged() {
    match has_ptrace_capability() {
        Some(true) => tracing::debug!("CAP_SYS_PTRACE is effective"),
        Some(false) => tracing::warn!(
            "CAP_SYS_PTRACE is not effective; dumps of processes owned by other users will likely fail"
        ),
        None => tracing::debug!("unable to read capability sets"),
    }
}

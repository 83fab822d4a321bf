//! pcoredump - live core dumps of running processes
//!
//! Asks the kernel to snapshot one or more processes without stopping or
//! killing them, optionally tuning how the dump is produced (core size
//! limit, I/O priority, OOM adjustment, niceness).
//!
//! # Modules
//!
//! - `params` - tuning parameters, validation and the procfs payload
//! - `dump` - interface selection and the two requesters
//! - `config` - the immutable per-invocation configuration
//! - `cli` - command-line parsing
//! - `logging` - stderr diagnostics via `tracing`
//! - `privileges` - CAP_SYS_PTRACE preflight
//!
//! # Quick Start
//!
//! ```ignore
//! use pcoredump::{dump, DumpConfig, LiveDumpParams};
//!
//! let params = LiveDumpParams::new().with_io_prio(7);
//! let report = dump::dispatch(&DumpConfig::new(params, vec![1234]));
//! std::process::exit(report.exit_code() as i32);
//! ```

pub mod cli;
pub mod config;
pub mod dump;
pub mod logging;
pub mod params;
pub mod privileges;

// Re-export commonly used types at crate root for convenience
pub use config::{DumpConfig, InterfaceChoice};
pub use dump::{DeliveryError, DumpReport, LiveDumper};
pub use params::{CoreLimit, LiveDumpParams, ValidationError};

//! Live dump tuning parameters
//!
//! - `model` - the parameter set and its C layout for ptrace
//! - `validate` - string-to-value parsing with range checks
//! - `command` - the procfs `key=value` payload
//!
//! # Example Usage
//!
//! ```ignore
//! use pcoredump::params::{validate, LiveDumpCommand, LiveDumpParams};
//!
//! let params = LiveDumpParams::new()
//!     .with_io_prio(validate::io_priority("2")?)
//!     .with_sched_nice(validate::sched_nice("5")?);
//!
//! assert_eq!(LiveDumpCommand::from_params(&params).render(), " io_prio=2 sched_prio=5\n");
//! ```

pub mod command;
pub mod model;
pub mod validate;

pub use command::{LiveDumpCommand, Setting};
pub use model::{CoreLimit, LiveDumpParams, RawLiveDumpParam, RLIM_INFINITY};
pub use validate::ValidationError;

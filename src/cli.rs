//! Command-line surface
//!
//! ```text
//! pcoredump [options] pid [pid..]
//! ```
//!
//! Values are range-checked while they are parsed, so the first bad flag
//! stops the program before any dump is attempted.

use clap::{ArgAction, Parser};

use crate::config::{DumpConfig, InterfaceChoice};
use crate::params::{validate, CoreLimit, LiveDumpParams};

#[derive(Parser, Debug)]
#[command(
    name = "pcoredump",
    version,
    about = "Request a live core dump of running processes without stopping them",
    long_about = None,
    arg_required_else_help = true,
    args_override_self = true
)]
pub struct Cli {
    /// Force maximum core file size to NR bytes or unlimited
    #[arg(
        short = 'f',
        long = "force-limit",
        value_name = "NR|unlimited",
        allow_negative_numbers = true,
        value_parser = validate::core_limit
    )]
    pub force_limit: Option<CoreLimit>,

    /// Set I/O priority [0:7]
    #[arg(
        short = 'i',
        long = "io-priority",
        value_name = "PRIO",
        allow_negative_numbers = true,
        value_parser = validate::io_priority
    )]
    pub io_priority: Option<i32>,

    /// Set OOM killer adjustment [-17:15]
    #[arg(
        short = 'o',
        long = "oom-adjustment",
        value_name = "ADJ",
        allow_negative_numbers = true,
        value_parser = validate::oom_adjustment
    )]
    pub oom_adjustment: Option<i32>,

    /// Set scheduling niceness [-20:19]
    #[arg(
        short = 's',
        long = "sched-nice",
        value_name = "NICE",
        allow_negative_numbers = true,
        value_parser = validate::sched_nice
    )]
    pub sched_nice: Option<i32>,

    /// Kernel interface to use (auto probes /proc/self/livedump)
    #[arg(long, value_enum, default_value_t = InterfaceChoice::Auto)]
    pub interface: InterfaceChoice,

    /// More diagnostics (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Processes to dump
    #[arg(
        value_name = "PID",
        required = true,
        allow_negative_numbers = true,
        value_parser = validate::pid
    )]
    pub pids: Vec<i32>,
}

impl Cli {
    pub fn params(&self) -> LiveDumpParams {
        LiveDumpParams {
            core_limit: self.force_limit,
            io_prio: self.io_priority,
            oom_adj: self.oom_adjustment,
            sched_nice: self.sched_nice,
        }
    }

    pub fn into_config(self) -> DumpConfig {
        DumpConfig::new(self.params(), self.pids).with_interface(self.interface)
    }
}

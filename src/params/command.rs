//! `/proc/<pid>/livedump` command payload
//!
//! The payload is a single line of space-prefixed `key=value` tokens:
//!
//! ```text
//!  core_limit=unlimited io_prio=2 oom_adj=-17 sched_prio=5\n
//! ```
//!
//! Only fields that were supplied are emitted. The order is fixed:
//! limit, I/O priority, OOM adjustment, niceness. With nothing supplied
//! the payload is a lone newline.

use std::fmt;

use super::model::{CoreLimit, LiveDumpParams};

/// One `key=value` token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    pub key: &'static str,
    pub value: String,
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Ordered settings for the procfs interface
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LiveDumpCommand {
    settings: Vec<Setting>,
}

impl LiveDumpCommand {
    pub fn from_params(params: &LiveDumpParams) -> Self {
        let mut settings = Vec::with_capacity(4);

        if let Some(limit) = params.core_limit {
            let value = match limit {
                CoreLimit::Unlimited => "unlimited".to_string(),
                CoreLimit::Bytes(n) => n.to_string(),
            };
            settings.push(Setting { key: "core_limit", value });
        }
        if let Some(prio) = params.io_prio {
            settings.push(Setting { key: "io_prio", value: prio.to_string() });
        }
        if let Some(adj) = params.oom_adj {
            settings.push(Setting { key: "oom_adj", value: adj.to_string() });
        }
        if let Some(nice) = params.sched_nice {
            settings.push(Setting { key: "sched_prio", value: nice.to_string() });
        }

        Self { settings }
    }

    pub fn settings(&self) -> &[Setting] {
        &self.settings
    }

    /// Exact bytes written to the control file
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LiveDumpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for setting in &self.settings {
            write!(f, " {}", setting)?;
        }
        writeln!(f)
    }
}

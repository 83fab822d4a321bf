//! Invocation configuration
//!
//! Built once from the command line and never mutated afterwards.

use std::fmt;

use clap::ValueEnum;

use crate::params::LiveDumpParams;

/// Which kernel interface to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InterfaceChoice {
    /// Probe `/proc/self/livedump`
    #[default]
    Auto,
    /// Skip the probe and write procfs control files
    Procfs,
    /// Skip the probe and issue `PTRACE_LIVEDUMP`
    Ptrace,
}

impl fmt::Display for InterfaceChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InterfaceChoice::Auto => "auto",
            InterfaceChoice::Procfs => "procfs",
            InterfaceChoice::Ptrace => "ptrace",
        };
        f.write_str(name)
    }
}

/// Everything one invocation needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpConfig {
    pub params: LiveDumpParams,
    /// Target pids in command-line order; duplicates are dumped twice
    pub targets: Vec<i32>,
    pub interface: InterfaceChoice,
}

impl DumpConfig {
    pub fn new(params: LiveDumpParams, targets: Vec<i32>) -> Self {
        Self {
            params,
            targets,
            interface: InterfaceChoice::Auto,
        }
    }

    pub fn with_interface(mut self, interface: InterfaceChoice) -> Self {
        self.interface = interface;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_auto() {
        let config = DumpConfig::new(LiveDumpParams::new(), vec![1]);
        assert_eq!(config.interface, InterfaceChoice::Auto);
        assert_eq!(config.interface.to_string(), "auto");
    }
}

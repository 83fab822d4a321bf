//! Diagnostics on standard error
//!
//! Everything the tool reports goes through `tracing` and lands on stderr
//! in compact form without timestamps:
//!
//! ```text
//! ERROR Unable to open /proc/4242/livedump: No such file or directory (os error 2) pid=4242
//! ```
//!
//! The level comes from `-v`/`-q` only. `RUST_LOG` is not consulted.
//! Colour is only used when stderr is a terminal.

use std::io::IsTerminal;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map `-q` / `-v` counts to a filter directive
///
/// | flags | level |
/// |-------|-------|
/// | `-q`  | error |
/// | none  | warn  |
/// | `-v`  | info  |
/// | `-vv` | debug |
pub fn level_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialize the stderr subscriber
pub fn init_logging(verbose: u8, quiet: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .with_target(verbose > 1)
        .with_file(false)
        .with_line_number(false)
        .compact();

    let filter = EnvFilter::try_new(level_directive(verbose, quiet))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "logging initialized");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_directive() {
        assert_eq!(level_directive(0, false), "warn");
        assert_eq!(level_directive(1, false), "info");
        assert_eq!(level_directive(2, false), "debug");
        assert_eq!(level_directive(5, false), "debug");
        assert_eq!(level_directive(3, true), "error");
    }
}

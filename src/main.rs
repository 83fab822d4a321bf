use std::process::ExitCode;

use clap::Parser;

use pcoredump::cli::Cli;
use pcoredump::{dump, logging};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help / --version go to stdout and succeed; everything else is fatal
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    if let Err(e) = logging::init_logging(cli.verbose, cli.quiet) {
        eprintln!("pcoredump: failed to initialize logging: {}", e);
    }

    let config = cli.into_config();
    let report = dump::dispatch(&config);

    ExitCode::from(report.exit_code())
}

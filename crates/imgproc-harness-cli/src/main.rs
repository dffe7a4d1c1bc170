//! run_test: check one image transformation against its expected output
//!
//! ## Usage
//!
//! ```bash
//! run_test c lenna grayscale                       # ./c_imgproc grayscale ...
//! run_test asm kitten composite input/overlay.png  # fixture kitten_composite_overlay.png
//! run_test -vv c lenna fade 0.5                    # log commands and paths
//! ```
//!
//! Exit status is 0 when the output matches, 1 otherwise.

use clap::Parser;
use imgproc_harness_cli::{logging, run, Cli, CliConfig, CliError, Reporter};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => {
            // --help / --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(CliError::from(e).exit_code());
        }
    };

    let config = CliConfig::from_cli(&cli);
    logging::init(&config);

    let reporter = Reporter::new(
        config.color.should_color(),
        config.verbosity.is_quiet(),
        config.verbosity.is_verbose(),
    );

    match run(&config, &cli.test) {
        Ok(report) => {
            reporter.passed(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            reporter.failed(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

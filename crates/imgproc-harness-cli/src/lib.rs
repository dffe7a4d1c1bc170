//! run_test CLI library
//!
//! Argument surface, configuration, logging and reporting for the
//! `imgproc-harness` conformance driver.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod config;
mod error;
pub mod logging;
mod output;

pub use commands::{Cli, ColorArg};
pub use config::{CliConfig, ColorChoice, HarnessSettings, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{Reporter, PASSED_MESSAGE};

use imgproc_harness::{ProcessRunner, SystemRunner, TestDriver, TestReport};

/// Run one test with real child processes
pub fn run(config: &CliConfig, args: &[String]) -> CliResult<TestReport> {
    run_with(config, args, SystemRunner::new())
}

/// Run one test through `runner`
pub fn run_with<R: ProcessRunner>(
    config: &CliConfig,
    args: &[String],
    runner: R,
) -> CliResult<TestReport> {
    let driver = TestDriver::new(runner)
        .with_layout(config.layout())
        .with_comparison(config.comparison_tool());
    driver.run_args(args).map_err(CliError::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use imgproc_harness::mock::ScriptedRunner;
    use imgproc_harness::{HarnessError, ProcessOutcome};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_usage_error() {
        let err = run_with(&CliConfig::new(), &args(&["c"]), ScriptedRunner::new()).unwrap_err();
        assert!(matches!(
            err.harness_error(),
            Some(HarnessError::Usage { given: 1 })
        ));
    }

    #[test]
    fn test_missing_executable_in_working_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = CliConfig::new().with_actual_dir(dir.path().join("actual"));
        let runner = ScriptedRunner::new().then(ProcessOutcome::exited(0));
        // No `./zz_imgproc` in the working directory.
        let err = run_with(&config, &args(&["zz", "lenna", "rgb"]), runner).unwrap_err();
        assert!(err.to_string().starts_with("./zz_imgproc doesn't exist"));
    }
}

//! Test driver: one transformation, one comparison, pass or fail.
//!
//! The driver walks
//! `ParsingArgs → ValidatingExecutable → RunningTransformation → RunningComparison → Passed`
//! and stops at the first error. It never exits the process; the binary maps
//! the returned error to an exit code.

use crate::compare::ComparisonTool;
use crate::identity::TestIdentity;
use crate::paths::{DerivedPaths, HarnessLayout};
use crate::process::{check_outcome, CommandSpec, ProcessRunner, SystemRunner};
use crate::result::{HarnessError, HarnessResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span};

/// Where a test invocation is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Reading the positional arguments
    ParsingArgs,
    /// Checking the executable under test
    ValidatingExecutable,
    /// Running the executable under test
    RunningTransformation,
    /// Running the comparison tool
    RunningComparison,
    /// Output matched
    Passed,
    /// Any stage failed
    Failed,
}

impl Stage {
    /// Lowercase name used in logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ParsingArgs => "parsing-args",
            Self::ValidatingExecutable => "validating-executable",
            Self::RunningTransformation => "running-transformation",
            Self::RunningComparison => "running-comparison",
            Self::Passed => "passed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a passing run produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestReport {
    /// The test that ran
    pub identity: TestIdentity,
    /// Executable that was exercised
    pub executable: PathBuf,
    /// Paths used by the run
    pub paths: DerivedPaths,
    /// Whatever the comparison tool printed on stderr (the metric value)
    pub comparison_output: String,
}

/// True if `path` is a regular file the current user may execute.
///
/// Only existence is checked on platforms without permission bits.
#[must_use]
pub fn is_executable(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| meta.is_file() && has_exec_bit(&meta))
}

#[cfg(unix)]
fn has_exec_bit(meta: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn has_exec_bit(_meta: &fs::Metadata) -> bool {
    true
}

/// Runs conformance tests against `<variant>_imgproc`.
#[derive(Debug)]
pub struct TestDriver<R = SystemRunner> {
    layout: HarnessLayout,
    comparison: ComparisonTool,
    runner: R,
}

impl Default for TestDriver<SystemRunner> {
    fn default() -> Self {
        Self::new(SystemRunner::new())
    }
}

impl<R: ProcessRunner> TestDriver<R> {
    /// Create a driver with the default layout and `compare -metric mse`
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self {
            layout: HarnessLayout::default(),
            comparison: ComparisonTool::default(),
            runner,
        }
    }

    /// Use a different directory layout
    #[must_use]
    pub fn with_layout(mut self, layout: HarnessLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Use a different comparison tool
    #[must_use]
    pub fn with_comparison(mut self, comparison: ComparisonTool) -> Self {
        self.comparison = comparison;
        self
    }

    /// Directory layout in use
    #[must_use]
    pub const fn layout(&self) -> &HarnessLayout {
        &self.layout
    }

    /// Underlying process runner
    #[must_use]
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Parse raw positional arguments, then [`Self::run`].
    ///
    /// # Errors
    ///
    /// [`HarnessError::Usage`] for fewer than three arguments, otherwise
    /// whatever [`Self::run`] reports.
    pub fn run_args<S: AsRef<str>>(&self, args: &[S]) -> HarnessResult<TestReport> {
        debug!(stage = %Stage::ParsingArgs, given = args.len());
        let identity = TestIdentity::from_args(args).map_err(|e| failed(Stage::ParsingArgs, e))?;
        self.run(&identity)
    }

    /// Run one test to completion.
    ///
    /// # Errors
    ///
    /// The first failure of any stage; nothing is retried.
    pub fn run(&self, identity: &TestIdentity) -> HarnessResult<TestReport> {
        let span = info_span!("test", identity = %identity);
        let _guard = span.enter();

        debug!(stage = %Stage::ValidatingExecutable);
        let executable = self
            .validate_executable(identity)
            .map_err(|e| failed(Stage::ValidatingExecutable, e))?;

        let paths = self.layout.derive(identity);
        debug!(
            input = %paths.input.display(),
            expected = %paths.expected.display(),
            actual = %paths.actual.display(),
            diff = %paths.diff.display(),
            "derived paths"
        );

        debug!(stage = %Stage::RunningTransformation);
        self.run_transformation(&executable, identity, &paths)
            .map_err(|e| failed(Stage::RunningTransformation, e))?;

        debug!(stage = %Stage::RunningComparison);
        let comparison_output = self
            .run_comparison(&paths)
            .map_err(|e| failed(Stage::RunningComparison, e))?;

        info!(stage = %Stage::Passed, metric = %comparison_output.trim(), "test passed");
        Ok(TestReport {
            identity: identity.clone(),
            executable,
            paths,
            comparison_output,
        })
    }

    fn validate_executable(&self, identity: &TestIdentity) -> HarnessResult<PathBuf> {
        let executable = self.layout.executable(identity);
        if is_executable(&executable) {
            Ok(executable)
        } else {
            Err(HarnessError::missing_executable(executable))
        }
    }

    fn run_transformation(
        &self,
        executable: &Path,
        identity: &TestIdentity,
        paths: &DerivedPaths,
    ) -> HarnessResult<()> {
        fs::create_dir_all(&self.layout.actual_dir)?;

        let command = CommandSpec::new(executable.to_string_lossy())
            .arg(identity.transformation_name())
            .path_arg(&paths.input)
            .path_arg(&paths.actual)
            .args(identity.transformation_args().iter().cloned());

        check_outcome(&command, self.runner.run(&command))?;
        Ok(())
    }

    fn run_comparison(&self, paths: &DerivedPaths) -> HarnessResult<String> {
        let command = self.comparison.command(paths);

        match check_outcome(&command, self.runner.run(&command)) {
            Ok(outcome) => Ok(outcome.stderr),
            Err(HarnessError::NonZeroExit {
                command,
                code,
                stderr,
            }) => Err(HarnessError::ComparisonMismatch {
                command,
                code,
                stderr,
            }),
            Err(e) => Err(e),
        }
    }
}

fn failed(stage: Stage, error: HarnessError) -> HarnessError {
    debug!(stage = %stage, next = %Stage::Failed, error = ?error);
    error
}

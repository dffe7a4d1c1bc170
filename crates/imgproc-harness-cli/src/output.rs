//! Output formatting for test results
//!
//! stdout carries exactly one line, `Test passed!`, and only on success.
//! Everything else goes to stderr.

use crate::error::CliError;
use console::{style, Term};
use imgproc_harness::TestReport;

/// Success line
pub const PASSED_MESSAGE: &str = "Test passed!";

/// Reporter for a single test run
#[derive(Debug)]
pub struct Reporter {
    out: Term,
    err: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
    /// Print run details on success
    pub verbose: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(false, false, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool, verbose: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            use_color,
            quiet,
            verbose,
        }
    }

    /// Report a passing test
    pub fn passed(&self, report: &TestReport) {
        if self.verbose {
            let _ = self.err.write_line(&self.details(report));
        }

        if self.quiet {
            return;
        }

        let line = if self.use_color {
            style(PASSED_MESSAGE).green().bold().to_string()
        } else {
            PASSED_MESSAGE.to_string()
        };
        let _ = self.out.write_line(&line);
    }

    /// Report a failure. Always printed, even in quiet mode.
    pub fn failed(&self, error: &CliError) {
        let _ = self.err.write_str(&self.diagnostic(error));
    }

    /// Diagnostic text for `error`: headline styled, captured output verbatim
    #[must_use]
    pub fn diagnostic(&self, error: &CliError) -> String {
        let text = error.to_string();
        let (headline, rest) = text.split_once('\n').unwrap_or((text.as_str(), ""));

        let mut out = if self.use_color {
            style(headline).red().bold().to_string()
        } else {
            headline.to_string()
        };
        out.push('\n');
        out.push_str(rest);
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }

    /// One-line summary of a passing run
    #[must_use]
    pub fn details(&self, report: &TestReport) -> String {
        let prefix = if self.use_color {
            style("PASS").green().bold().to_string()
        } else {
            "PASS".to_string()
        };
        let metric = report.comparison_output.trim();
        let metric = if metric.is_empty() { "-" } else { metric };
        format!(
            "{prefix} {} ({} vs {}, metric {metric})",
            report.identity,
            report.paths.actual.display(),
            report.paths.expected.display()
        )
    }
}

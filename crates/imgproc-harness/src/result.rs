//! Result and error types for the harness.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Usage text printed when the invocation is malformed
pub const USAGE: &str = "Usage: run_test <exe version> <image stem> <transformation> [<transformation arg> ...]\n   <exe version> is 'c' or 'asm'";

/// Errors that end a test invocation.
///
/// Every variant is terminal: nothing here is retried.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Too few positional arguments
    #[error("{}", USAGE)]
    Usage {
        /// Number of positional arguments actually supplied
        given: usize,
    },

    /// Executable under test is absent or lacks an execute bit
    #[error("{} doesn't exist or is not executable (maybe you need to run make?)", .path.display())]
    MissingExecutable {
        /// Path that was checked
        path: PathBuf,
    },

    /// Child could not be started, or was killed before reporting a status
    #[error("Error: {command} did not exit normally\nError output was:\n{stderr}")]
    AbnormalTermination {
        /// Name of the program that was run
        command: String,
        /// Captured standard error
        stderr: String,
    },

    /// Child exited with a non-zero status
    #[error("Error: {command} exited with a non-zero exit code ({code})\nError output was:\n{stderr}")]
    NonZeroExit {
        /// Name of the program that was run
        command: String,
        /// Exit status
        code: i32,
        /// Captured standard error
        stderr: String,
    },

    /// Comparison tool exited non-zero: the images differ
    #[error("Error: {command} exited with a non-zero exit code ({code})\nError output was:\n{stderr}")]
    ComparisonMismatch {
        /// Name of the comparison program
        command: String,
        /// Exit status
        code: i32,
        /// Captured standard error (the metric value for ImageMagick)
        stderr: String,
    },

    /// I/O error while preparing the output directory
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarnessError {
    /// Create a missing executable error
    #[must_use]
    pub fn missing_executable(path: impl Into<PathBuf>) -> Self {
        Self::MissingExecutable { path: path.into() }
    }

    /// Captured standard error of the failing child, if any
    #[must_use]
    pub fn captured_stderr(&self) -> Option<&str> {
        match self {
            Self::AbnormalTermination { stderr, .. }
            | Self::NonZeroExit { stderr, .. }
            | Self::ComparisonMismatch { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_message() {
        let err = HarnessError::Usage { given: 1 };
        let msg = err.to_string();
        assert!(msg.starts_with("Usage:"));
        assert!(msg.contains("<exe version> is 'c' or 'asm'"));
    }

    #[test]
    fn test_missing_executable_mentions_make() {
        let err = HarnessError::missing_executable("./asm_imgproc");
        let msg = err.to_string();
        assert!(msg.contains("./asm_imgproc"));
        assert!(msg.contains("maybe you need to run make?"));
    }

    #[test]
    fn test_non_zero_exit_message() {
        let err = HarnessError::NonZeroExit {
            command: "./c_imgproc".to_string(),
            code: 2,
            stderr: "bad transform\n".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("./c_imgproc exited with a non-zero exit code (2)"));
        assert!(msg.ends_with("Error output was:\nbad transform\n"));
    }

    #[test]
    fn test_abnormal_termination_message() {
        let err = HarnessError::AbnormalTermination {
            command: "compare".to_string(),
            stderr: String::new(),
        };
        assert!(err.to_string().contains("compare did not exit normally"));
    }

    #[test]
    fn test_mismatch_reads_like_non_zero_exit() {
        let mismatch = HarnessError::ComparisonMismatch {
            command: "compare".to_string(),
            code: 1,
            stderr: "412.5 (0.0063)".to_string(),
        };
        let non_zero = HarnessError::NonZeroExit {
            command: "compare".to_string(),
            code: 1,
            stderr: "412.5 (0.0063)".to_string(),
        };
        assert_eq!(mismatch.to_string(), non_zero.to_string());
        assert_eq!(mismatch.captured_stderr(), Some("412.5 (0.0063)"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: HarnessError = io_err.into();
        assert!(err.to_string().contains("I/O"));
        assert!(err.captured_stderr().is_none());
    }
}

//! Error types for the CLI

use imgproc_harness::HarnessError;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Test failed; the harness message is printed verbatim
    #[error(transparent)]
    Harness(#[from] HarnessError),

    /// Flags clap could not make sense of
    #[error(transparent)]
    InvalidArgument(#[from] clap::Error),
}

impl CliError {
    /// Process exit code. Every failure, a usage error included, is 1.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        1
    }

    /// Harness error behind this failure, if any
    #[must_use]
    pub const fn harness_error(&self) -> Option<&HarnessError> {
        match self {
            Self::Harness(err) => Some(err),
            Self::InvalidArgument(_) => None,
        }
    }
}

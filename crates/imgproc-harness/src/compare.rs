//! Image comparison through an external tool (ImageMagick `compare`).
//!
//! The tool decides equivalence; the harness only reads its exit code.
//! The metric value it prints and the diff image it writes are artifacts
//! for the operator and are never parsed here.

use crate::paths::DerivedPaths;
use crate::process::CommandSpec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default comparison program
pub const DEFAULT_COMPARE_PROGRAM: &str = "compare";

/// Metric handed to `-metric`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Mean squared error
    #[default]
    Mse,
    /// Absolute error count
    Ae,
    /// Mean absolute error
    Mae,
    /// Root mean squared error
    Rmse,
    /// Peak signal to noise ratio
    Psnr,
}

impl Metric {
    /// All supported metrics
    pub const ALL: [Self; 5] = [Self::Mse, Self::Ae, Self::Mae, Self::Rmse, Self::Psnr];

    /// Spelling used on the tool's command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mse => "mse",
            Self::Ae => "ae",
            Self::Mae => "mae",
            Self::Rmse => "rmse",
            Self::Psnr => "psnr",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown metric name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown metric '{0}' (expected one of: mse, ae, mae, rmse, psnr)")]
pub struct UnknownMetric(pub String);

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}

/// The comparison program and the metric it is asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonTool {
    /// Program name or path
    pub program: String,
    /// Metric selection
    pub metric: Metric,
}

impl Default for ComparisonTool {
    fn default() -> Self {
        Self {
            program: DEFAULT_COMPARE_PROGRAM.to_string(),
            metric: Metric::Mse,
        }
    }
}

impl ComparisonTool {
    /// `compare -metric mse`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different program
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Use a different metric
    #[must_use]
    pub const fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// `<program> -metric <metric> <expected> <actual> <diff>`
    #[must_use]
    pub fn command(&self, paths: &DerivedPaths) -> CommandSpec {
        CommandSpec::new(self.program.as_str())
            .args(["-metric", self.metric.as_str()])
            .path_arg(&paths.expected)
            .path_arg(&paths.actual)
            .path_arg(&paths.diff)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::identity::TestIdentity;
    use crate::paths::HarnessLayout;

    fn lenna_paths() -> DerivedPaths {
        HarnessLayout::default().derive(&TestIdentity::new("c", "lenna", "grayscale", Vec::new()))
    }

    #[test]
    fn test_default_command_shape() {
        let cmd = ComparisonTool::default().command(&lenna_paths());
        assert_eq!(cmd.program, "compare");
        assert_eq!(
            cmd.args,
            [
                "-metric",
                "mse",
                "expected/lenna_grayscale.png",
                "actual/c_lenna_grayscale.png",
                "actual/c_lenna_grayscale_diff.png",
            ]
        );
    }

    #[test]
    fn test_custom_program_and_metric() {
        let tool = ComparisonTool::new()
            .with_program("/usr/bin/magick-compare")
            .with_metric(Metric::Rmse);
        let cmd = tool.command(&lenna_paths());
        assert_eq!(cmd.name(), "/usr/bin/magick-compare");
        assert_eq!(cmd.args[1], "rmse");
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("mse".parse::<Metric>().unwrap(), Metric::Mse);
        assert_eq!("PSNR".parse::<Metric>().unwrap(), Metric::Psnr);
        let err = "ssim".parse::<Metric>().unwrap_err();
        assert!(err.to_string().contains("ssim"));
    }

    #[test]
    fn test_metric_round_trips_through_display() {
        for metric in Metric::ALL {
            assert_eq!(metric.to_string().parse::<Metric>().unwrap(), metric);
        }
    }

    #[test]
    fn test_metric_serialize() {
        let json = serde_json::to_string(&Metric::Mae).unwrap();
        assert_eq!(json, "\"mae\"");
    }
}

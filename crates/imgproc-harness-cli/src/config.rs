//! CLI configuration

use crate::commands::Cli;
use imgproc_harness::{ComparisonTool, HarnessLayout, Metric, DEFAULT_COMPARE_PROGRAM};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - failures only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - stage progress
    Verbose,
    /// Debug - commands and derived paths
    Debug,
    /// Trace - captured child output as well
    Trace,
}

impl Verbosity {
    /// Map a `-v` count
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug | Self::Trace)
    }

    /// Default `tracing` filter for this level
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when stderr is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => stderr_is_terminal(),
        }
    }
}

/// Diagnostics go to stderr, so that is the stream that decides
fn stderr_is_terminal() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}

/// Comparison tool and directory settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessSettings {
    /// Comparison program
    pub compare_program: String,
    /// Comparison metric
    pub metric: Metric,
    /// Source-image directory
    pub input_dir: PathBuf,
    /// Expected-image directory
    pub expected_dir: PathBuf,
    /// Output directory
    pub actual_dir: PathBuf,
}

impl Default for HarnessSettings {
    fn default() -> Self {
        let layout = HarnessLayout::default();
        Self {
            compare_program: DEFAULT_COMPARE_PROGRAM.to_string(),
            metric: Metric::default(),
            input_dir: layout.input_dir,
            expected_dir: layout.expected_dir,
            actual_dir: layout.actual_dir,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Harness settings
    pub harness: HarnessSettings,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build configuration from parsed arguments
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self::new()
            .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
            .with_color(cli.color.into())
            .with_compare_program(cli.compare.as_str())
            .with_metric(cli.metric)
            .with_input_dir(&cli.input_dir)
            .with_expected_dir(&cli.expected_dir)
            .with_actual_dir(&cli.actual_dir)
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set comparison program
    #[must_use]
    pub fn with_compare_program(mut self, program: impl Into<String>) -> Self {
        self.harness.compare_program = program.into();
        self
    }

    /// Set comparison metric
    #[must_use]
    pub const fn with_metric(mut self, metric: Metric) -> Self {
        self.harness.metric = metric;
        self
    }

    /// Set source-image directory
    #[must_use]
    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.harness.input_dir = dir.into();
        self
    }

    /// Set expected-image directory
    #[must_use]
    pub fn with_expected_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.harness.expected_dir = dir.into();
        self
    }

    /// Set output directory
    #[must_use]
    pub fn with_actual_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.harness.actual_dir = dir.into();
        self
    }

    /// Directory layout for the driver
    #[must_use]
    pub fn layout(&self) -> HarnessLayout {
        HarnessLayout::new()
            .with_input_dir(&self.harness.input_dir)
            .with_expected_dir(&self.harness.expected_dir)
            .with_actual_dir(&self.harness.actual_dir)
    }

    /// Comparison tool for the driver
    #[must_use]
    pub fn comparison_tool(&self) -> ComparisonTool {
        ComparisonTool::new()
            .with_program(self.harness.compare_program.as_str())
            .with_metric(self.harness.metric)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;

    mod verbosity_tests {
        use super::*;

        #[test]
        fn test_default_verbosity() {
            assert_eq!(Verbosity::default(), Verbosity::Normal);
        }

        #[test]
        fn test_from_flags() {
            assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
            assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Verbose);
            assert_eq!(Verbosity::from_flags(false, 2), Verbosity::Debug);
            assert_eq!(Verbosity::from_flags(false, 7), Verbosity::Trace);
            assert_eq!(Verbosity::from_flags(true, 3), Verbosity::Quiet);
        }

        #[test]
        fn test_is_verbose() {
            assert!(!Verbosity::Quiet.is_verbose());
            assert!(!Verbosity::Normal.is_verbose());
            assert!(Verbosity::Verbose.is_verbose());
            assert!(Verbosity::Trace.is_verbose());
        }

        #[test]
        fn test_filter_directive() {
            assert_eq!(Verbosity::Normal.filter_directive(), "warn");
            assert_eq!(Verbosity::Debug.filter_directive(), "debug");
        }

        #[test]
        fn test_deserialize() {
            let v: Verbosity = serde_json::from_str("\"Quiet\"").unwrap();
            assert!(v.is_quiet());
        }
    }

    mod color_choice_tests {
        use super::*;

        #[test]
        fn test_default_color() {
            assert_eq!(ColorChoice::default(), ColorChoice::Auto);
        }

        #[test]
        fn test_should_color_explicit() {
            assert!(ColorChoice::Always.should_color());
            assert!(!ColorChoice::Never.should_color());
        }
    }

    mod cli_config_tests {
        use super::*;

        #[test]
        fn test_default_config() {
            let config = CliConfig::default();
            assert_eq!(config.verbosity, Verbosity::Normal);
            assert_eq!(config.harness.compare_program, "compare");
            assert_eq!(config.harness.metric, Metric::Mse);
            assert_eq!(config.layout(), HarnessLayout::default());
            assert_eq!(config.comparison_tool(), ComparisonTool::default());
        }

        #[test]
        fn test_from_cli() {
            let cli = Cli::try_parse_from([
                "run_test",
                "-v",
                "--compare",
                "/opt/im/compare",
                "--metric",
                "ae",
                "--actual-dir",
                "out",
                "--input-dir",
                "sources",
                "c",
                "lenna",
                "rgb",
            ])
            .unwrap();
            let config = CliConfig::from_cli(&cli);
            assert_eq!(config.verbosity, Verbosity::Verbose);
            assert_eq!(config.comparison_tool().program, "/opt/im/compare");
            assert_eq!(config.comparison_tool().metric, Metric::Ae);
            assert_eq!(config.layout().actual_dir, Path::new("out"));
            assert_eq!(config.layout().input_dir, Path::new("sources"));
            assert_eq!(config.layout().expected_dir, Path::new("expected"));
        }

        #[test]
        fn test_chained_builders() {
            let config = CliConfig::new()
                .with_verbosity(Verbosity::Quiet)
                .with_color(ColorChoice::Never)
                .with_expected_dir("golden");
            assert!(config.verbosity.is_quiet());
            assert_eq!(config.color, ColorChoice::Never);
            assert_eq!(config.layout().expected_dir, Path::new("golden"));
        }

        #[test]
        fn test_serialize() {
            let config = CliConfig::new().with_metric(Metric::Psnr);
            let json = serde_json::to_string(&config).unwrap();
            assert!(json.contains("\"metric\":\"psnr\""));
        }
    }
}

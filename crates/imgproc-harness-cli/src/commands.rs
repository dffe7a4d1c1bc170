//! CLI argument definitions using clap

use clap::{Parser, ValueEnum};
use imgproc_harness::{Metric, DEFAULT_COMPARE_PROGRAM};
use std::path::PathBuf;

/// run_test: check one image transformation against its expected output
#[derive(Parser, Debug)]
#[command(name = "run_test")]
#[command(author, version, about, long_about = None)]
#[command(
    override_usage = "run_test [OPTIONS] <exe version> <image stem> <transformation> [<transformation arg> ...]"
)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress the success line)
    #[arg(short, long)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorArg,

    /// Image comparison program
    #[arg(long, env = "RUN_TEST_COMPARE", default_value = DEFAULT_COMPARE_PROGRAM)]
    pub compare: String,

    /// Metric passed to the comparison program
    #[arg(long, env = "RUN_TEST_METRIC", default_value = "mse")]
    pub metric: Metric,

    /// Directory holding the source images
    #[arg(long, env = "RUN_TEST_INPUT_DIR", default_value = "input")]
    pub input_dir: PathBuf,

    /// Directory holding the expected images
    #[arg(long, env = "RUN_TEST_EXPECTED_DIR", default_value = "expected")]
    pub expected_dir: PathBuf,

    /// Directory receiving output and diff images
    #[arg(long, env = "RUN_TEST_ACTUAL_DIR", default_value = "actual")]
    pub actual_dir: PathBuf,

    /// <exe version> <image stem> <transformation> [<transformation arg> ...]
    ///
    /// <exe version> is 'c' or 'asm'. Everything after the first value is
    /// passed through, including values starting with '-'.
    #[arg(value_name = "TEST", trailing_var_arg = true)]
    pub test: Vec<String>,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Auto-detect terminal support
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::ColorChoice;
    use clap::CommandFactory;

    #[test]
    fn test_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positionals() {
        let cli = Cli::try_parse_from(["run_test", "c", "lenna", "grayscale"]).unwrap();
        assert_eq!(cli.test, ["c", "lenna", "grayscale"]);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_hyphenated_transformation_args_pass_through() {
        let cli =
            Cli::try_parse_from(["run_test", "c", "lenna", "fade", "-3", "--quiet"]).unwrap();
        assert_eq!(cli.test, ["c", "lenna", "fade", "-3", "--quiet"]);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_flags_before_positionals() {
        let cli = Cli::try_parse_from([
            "run_test",
            "-vv",
            "--color",
            "never",
            "--metric",
            "rmse",
            "asm",
            "lenna",
            "rgb",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.color, ColorArg::Never);
        assert_eq!(cli.metric, Metric::Rmse);
        assert_eq!(cli.test, ["asm", "lenna", "rgb"]);
    }

    #[test]
    fn test_no_positionals_parses() {
        // Too few positionals is reported by the harness, not by clap.
        let cli = Cli::try_parse_from(["run_test"]).unwrap();
        assert!(cli.test.is_empty());
    }

    #[test]
    fn test_unknown_metric_rejected() {
        assert!(Cli::try_parse_from(["run_test", "--metric", "ssim", "c", "lenna", "rgb"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["run_test", "c", "lenna", "rgb"]).unwrap();
        assert_eq!(cli.metric, Metric::Mse);
        assert_eq!(cli.input_dir, PathBuf::from("input"));
        assert_eq!(cli.expected_dir, PathBuf::from("expected"));
        assert_eq!(cli.actual_dir, PathBuf::from("actual"));
    }

    #[test]
    fn test_color_arg_conversion() {
        assert_eq!(ColorChoice::from(ColorArg::Auto), ColorChoice::Auto);
        assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
        assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
    }
}

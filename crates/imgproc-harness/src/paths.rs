//! Canonical fixture paths for a test identity.
//!
//! Everything here is pure string work: no filesystem access.
//!
//! | path | shape |
//! |------|-------|
//! | input | `input/<stem>.png` |
//! | expected | `expected/<stem>_<transformation><suffix>.png` |
//! | actual | `actual/<variant>_<stem>_<transformation><suffix>.png` |
//! | diff | `actual/<variant>_<stem>_<transformation><suffix>_diff.png` |

use crate::identity::TestIdentity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Extension of every image the harness touches
pub const IMAGE_EXTENSION: &str = "png";

/// Suffix appended to the variant tag to name the executable under test
pub const EXECUTABLE_SUFFIX: &str = "_imgproc";

/// One rewrite applied to the joined transformation arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationStep {
    /// Replace every path separator with `_`
    FlattenSeparators,
    /// Remove every occurrence of a literal substring
    Strip(&'static str),
}

/// Order matters: the strips assume separators were already flattened,
/// so `input/overlay.png` becomes `_input_overlay.png`, then `_input_overlay`,
/// then `_overlay`.
pub const NORMALIZATION: [NormalizationStep; 3] = [
    NormalizationStep::FlattenSeparators,
    NormalizationStep::Strip(".png"),
    NormalizationStep::Strip("_input"),
];

impl NormalizationStep {
    /// Apply this step to the whole string
    #[must_use]
    pub fn apply(self, raw: &str) -> String {
        match self {
            Self::FlattenSeparators => raw
                .chars()
                .map(|c| if std::path::is_separator(c) { '_' } else { c })
                .collect(),
            Self::Strip(needle) => raw.replace(needle, ""),
        }
    }
}

/// Filename component that keeps argument-taking transformations apart.
///
/// Empty when the transformation has no arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArgumentSuffix(String);

impl ArgumentSuffix {
    /// Build the suffix for a list of transformation arguments
    #[must_use]
    pub fn from_args(args: &[String]) -> Self {
        if args.is_empty() {
            return Self::default();
        }
        Self(Self::normalize(&format!("_{}", args.join("_"))))
    }

    /// Run the [`NORMALIZATION`] pipeline over a raw suffix
    #[must_use]
    pub fn normalize(raw: &str) -> String {
        NORMALIZATION
            .iter()
            .fold(raw.to_string(), |acc, step| step.apply(&acc))
    }

    /// The suffix text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no arguments were given
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ArgumentSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Directory layout the harness works in, relative to the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessLayout {
    /// Where `<variant>_imgproc` lives
    pub executable_dir: PathBuf,
    /// Source images
    pub input_dir: PathBuf,
    /// Checked-in fixtures
    pub expected_dir: PathBuf,
    /// Output and diff images, created on demand
    pub actual_dir: PathBuf,
}

impl Default for HarnessLayout {
    fn default() -> Self {
        Self {
            executable_dir: PathBuf::from("."),
            input_dir: PathBuf::from("input"),
            expected_dir: PathBuf::from("expected"),
            actual_dir: PathBuf::from("actual"),
        }
    }
}

impl HarnessLayout {
    /// Create the default layout
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the executable directory
    #[must_use]
    pub fn with_executable_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.executable_dir = dir.into();
        self
    }

    /// Set the input directory
    #[must_use]
    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    /// Set the expected-fixture directory
    #[must_use]
    pub fn with_expected_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.expected_dir = dir.into();
        self
    }

    /// Set the output directory
    #[must_use]
    pub fn with_actual_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.actual_dir = dir.into();
        self
    }

    /// `./<variant>_imgproc` with the default layout
    #[must_use]
    pub fn executable(&self, identity: &TestIdentity) -> PathBuf {
        self.executable_dir.join(format!(
            "{}{EXECUTABLE_SUFFIX}",
            identity.executable_variant()
        ))
    }

    /// Derive the four image paths for `identity`
    #[must_use]
    pub fn derive(&self, identity: &TestIdentity) -> DerivedPaths {
        let suffix = ArgumentSuffix::from_args(identity.transformation_args());
        let fixture_stem = format!(
            "{}_{}{suffix}",
            identity.image_stem(),
            identity.transformation_name()
        );
        let output_stem = format!("{}_{fixture_stem}", identity.executable_variant());

        DerivedPaths {
            input: image_path(&self.input_dir, identity.image_stem()),
            expected: image_path(&self.expected_dir, &fixture_stem),
            actual: image_path(&self.actual_dir, &output_stem),
            diff: image_path(&self.actual_dir, &format!("{output_stem}_diff")),
            suffix,
        }
    }
}

fn image_path(dir: &Path, stem: &str) -> PathBuf {
    dir.join(format!("{stem}.{IMAGE_EXTENSION}"))
}

/// Paths for one test run. Computed fresh each run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedPaths {
    /// Image fed to the transformation
    pub input: PathBuf,
    /// Fixture the output is compared against
    pub expected: PathBuf,
    /// Where the transformation writes its output
    pub actual: PathBuf,
    /// Where the comparison tool writes its diff artifact
    pub diff: PathBuf,
    /// Normalized argument suffix shared by the three derived names
    pub suffix: ArgumentSuffix,
}

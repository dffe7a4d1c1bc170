//! Test identity parsed from the invocation's positional arguments.

use crate::result::{HarnessError, HarnessResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which build, which image, which transformation, with which arguments.
///
/// Built once per invocation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestIdentity {
    executable_variant: String,
    image_stem: String,
    transformation_name: String,
    transformation_args: Vec<String>,
}

impl TestIdentity {
    /// Create an identity from its parts
    #[must_use]
    pub fn new(
        executable_variant: impl Into<String>,
        image_stem: impl Into<String>,
        transformation_name: impl Into<String>,
        transformation_args: Vec<String>,
    ) -> Self {
        Self {
            executable_variant: executable_variant.into(),
            image_stem: image_stem.into(),
            transformation_name: transformation_name.into(),
            transformation_args,
        }
    }

    /// Parse `<variant> <stem> <transformation> [args...]`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Usage`] when fewer than three arguments are given.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> HarnessResult<Self> {
        let [variant, stem, transformation, rest @ ..] = args else {
            return Err(HarnessError::Usage { given: args.len() });
        };

        Ok(Self::new(
            variant.as_ref(),
            stem.as_ref(),
            transformation.as_ref(),
            rest.iter().map(|arg| arg.as_ref().to_string()).collect(),
        ))
    }

    /// Tag of the executable build, e.g. `c` or `asm`
    #[must_use]
    pub fn executable_variant(&self) -> &str {
        &self.executable_variant
    }

    /// Input image base name without directory or extension
    #[must_use]
    pub fn image_stem(&self) -> &str {
        &self.image_stem
    }

    /// Transformation to apply
    #[must_use]
    pub fn transformation_name(&self) -> &str {
        &self.transformation_name
    }

    /// Extra arguments handed to the transformation, in order
    #[must_use]
    pub fn transformation_args(&self) -> &[String] {
        &self.transformation_args
    }
}

impl fmt::Display for TestIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.executable_variant, self.image_stem, self.transformation_name
        )?;
        for arg in &self.transformation_args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

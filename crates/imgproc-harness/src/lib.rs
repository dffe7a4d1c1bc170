//! Conformance harness for `<variant>_imgproc` image-transformation builds.
//!
//! A test is one transformation of one input image. The harness derives the
//! fixture paths, runs the executable under test, then asks an external
//! comparison tool whether the output matches the checked-in fixture.
//!
//! ```no_run
//! use imgproc_harness::{TestDriver, TestIdentity};
//!
//! let identity = TestIdentity::new("c", "lenna", "grayscale", Vec::new());
//! match TestDriver::default().run(&identity) {
//!     Ok(_) => println!("Test passed!"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod compare;
pub mod driver;
pub mod identity;
pub mod mock;
pub mod paths;
pub mod process;
mod result;

pub use compare::{ComparisonTool, Metric, UnknownMetric, DEFAULT_COMPARE_PROGRAM};
pub use driver::{is_executable, Stage, TestDriver, TestReport};
pub use identity::TestIdentity;
pub use paths::{ArgumentSuffix, DerivedPaths, HarnessLayout, NormalizationStep, NORMALIZATION};
pub use process::{
    check_outcome, CommandSpec, ExitDisposition, ProcessOutcome, ProcessRunner, SystemRunner,
};
pub use result::{HarnessError, HarnessResult, USAGE};

//! Scripted [`ProcessRunner`] for exercising the driver without spawning
//! processes.
//!
//! ```
//! use imgproc_harness::mock::ScriptedRunner;
//! use imgproc_harness::{CommandSpec, ProcessOutcome, ProcessRunner};
//!
//! let runner = ScriptedRunner::new()
//!     .then(ProcessOutcome::exited(0))
//!     .then(ProcessOutcome::exited(1).with_stderr("1234 (0.02)"));
//!
//! assert!(runner.run(&CommandSpec::new("./c_imgproc")).succeeded());
//! assert_eq!(runner.run(&CommandSpec::new("compare")).exit_code(), Some(1));
//! assert_eq!(runner.calls().len(), 2);
//! ```

use crate::process::{CommandSpec, ProcessOutcome, ProcessRunner};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Replays queued outcomes in order and records every command it receives.
///
/// Once the queue is empty every further call reports a launch failure.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    outcomes: RefCell<VecDeque<ProcessOutcome>>,
    calls: RefCell<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    /// Create a runner with nothing queued
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome of the next call
    #[must_use]
    pub fn then(self, outcome: ProcessOutcome) -> Self {
        self.outcomes.borrow_mut().push_back(outcome);
        self
    }

    /// Commands received so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    /// Outcomes not yet consumed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.outcomes.borrow().len()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, command: &CommandSpec) -> ProcessOutcome {
        self.calls.borrow_mut().push(command.clone());
        self.outcomes.borrow_mut().pop_front().unwrap_or_else(|| {
            ProcessOutcome::failed_to_start(format!("{}: no scripted outcome", command.name()))
        })
    }
}

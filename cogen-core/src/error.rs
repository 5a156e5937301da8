//! Error and outcome types.

use crate::data::Seed;
use std::fmt;
use thiserror::Error;

/// Main error type for generator construction and property runs.
///
/// The dual rules themselves are total; only the pieces around them fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CogenError {
    /// Property failed with a counterexample.
    #[error("Property failed after {tests_run} tests with {seed}: {counterexample}")]
    PropertyFailed {
        counterexample: String,
        tests_run: usize,
        seed: Seed,
    },

    /// A range generator was asked for an empty range.
    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Result type for cogen operations.
pub type Result<T> = std::result::Result<T, CogenError>;

/// Outcome of a property run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    /// Every test case passed.
    Pass {
        tests_run: usize,
        property_name: Option<String>,
    },

    /// A test case failed.
    Fail {
        counterexample: String,
        tests_run: usize,
        property_name: Option<String>,
        /// Seed of the failing case; generating from it reproduces the input.
        seed: Seed,
    },
}

impl TestResult {
    /// Whether the run passed.
    pub fn is_pass(&self) -> bool {
        matches!(self, TestResult::Pass { .. })
    }

    /// Convert into a `Result`, turning failures into [`CogenError::PropertyFailed`].
    pub fn into_result(self) -> Result<usize> {
        match self {
            TestResult::Pass { tests_run, .. } => Ok(tests_run),
            TestResult::Fail {
                counterexample,
                tests_run,
                seed,
                ..
            } => Err(CogenError::PropertyFailed {
                counterexample,
                tests_run,
                seed,
            }),
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestResult::Pass {
                tests_run,
                property_name,
            } => {
                let prop_name = property_name.as_deref().unwrap_or("property");
                write!(f, "  ✓ {} passed {} tests.", prop_name, tests_run)
            }
            TestResult::Fail {
                counterexample,
                tests_run,
                property_name,
                seed,
            } => {
                let prop_name = property_name.as_deref().unwrap_or("property");
                writeln!(f, "  ✗ {} failed after {} tests.", prop_name, tests_run)?;
                writeln!(f, "    Replay with: {}", seed)?;
                write!(f, "    Counterexample: {}", counterexample)
            }
        }
    }
}

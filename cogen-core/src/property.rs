//! Property definitions and a small runner.
//!
//! Failures are reported with the seed of the failing case; there is no
//! shrinking.

use crate::{data::*, error::*, gen::*};
use std::fmt::Debug;

/// A property that can be tested with generated inputs.
pub struct Property<T> {
    generator: Gen<T>,
    condition: Box<dyn Fn(&T) -> bool>,
    name: Option<String>,
}

impl<T> Property<T>
where
    T: Debug + 'static,
{
    /// Create a property that checks a boolean condition.
    pub fn for_all<F>(generator: Gen<T>, condition: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        Property {
            generator,
            condition: Box::new(condition),
            name: None,
        }
    }

    /// Name the property in reports.
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Run this property with the given configuration.
    ///
    /// An invalid configuration is reported as a failure without running
    /// any test case.
    pub fn run(&self, config: &Config) -> TestResult {
        match self.check(config) {
            Ok(tests_run) => TestResult::Pass {
                tests_run,
                property_name: self.name.clone(),
            },
            Err(CogenError::PropertyFailed {
                counterexample,
                tests_run,
                seed,
            }) => TestResult::Fail {
                counterexample,
                tests_run,
                property_name: self.name.clone(),
                seed,
            },
            Err(error) => TestResult::Fail {
                counterexample: error.to_string(),
                tests_run: 0,
                property_name: self.name.clone(),
                seed: Seed::from_u64(0),
            },
        }
    }

    /// Run this property, returning the number of passing tests.
    pub fn check(&self, config: &Config) -> Result<usize> {
        config.validate()?;
        let mut seed = config.initial_seed();
        let name = self.name.as_deref().unwrap_or("property");
        tracing::debug!(
            property = name,
            tests = config.test_limit,
            %seed,
            "running property"
        );

        for test_num in 0..config.test_limit {
            let ramp = test_num as u128 * config.size_limit as u128 / config.test_limit as u128;
            let size = Size::new(ramp as usize);
            let (test_seed, next_seed) = seed.split();
            seed = next_seed;

            let value = self.generator.generate(size, test_seed);
            tracing::trace!(property = name, test = test_num, ?value, "generated input");

            if !(self.condition)(&value) {
                tracing::debug!(
                    property = name,
                    tests_run = test_num + 1,
                    seed = %test_seed,
                    "property failed"
                );
                return Err(CogenError::PropertyFailed {
                    counterexample: format!("{value:?}"),
                    tests_run: test_num + 1,
                    seed: test_seed,
                });
            }
        }

        tracing::debug!(property = name, tests = config.test_limit, "property passed");
        Ok(config.test_limit)
    }
}

/// Create a property that checks a boolean condition.
pub fn for_all<T, F>(generator: Gen<T>, condition: F) -> Property<T>
where
    T: Debug + 'static,
    F: Fn(&T) -> bool + 'static,
{
    Property::for_all(generator, condition)
}

//! Core data types: sizes, splittable seeds and runner configuration.

use crate::error::{CogenError, Result};
use std::fmt;

/// Integer key selecting a sub-stream of a seed.
///
/// Held as a sign and an unsigned magnitude, so every integral width,
/// `u128` and `i128` included, widens into it without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Discriminant {
    negative: bool,
    magnitude: u128,
}

impl Discriminant {
    /// Build a discriminant from a sign and a magnitude.
    ///
    /// A zero magnitude is never negative.
    pub fn new(negative: bool, magnitude: u128) -> Self {
        Discriminant {
            negative: negative && magnitude != 0,
            magnitude,
        }
    }

    /// Whether the discriminant is below zero.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// The absolute value.
    pub fn magnitude(&self) -> u128 {
        self.magnitude
    }
}

impl fmt::Display for Discriminant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}", self.magnitude)
    }
}

macro_rules! discriminant_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Discriminant {
                fn from(value: $t) -> Self {
                    Discriminant::new(false, value as u128)
                }
            }
        )*
    };
}

macro_rules! discriminant_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Discriminant {
                fn from(value: $t) -> Self {
                    Discriminant::new(value < 0, value.unsigned_abs() as u128)
                }
            }
        )*
    };
}

discriminant_from_unsigned!(u8, u16, u32, u64, u128, usize);
discriminant_from_signed!(i8, i16, i32, i64, i128, isize);

/// Size parameter for controlling test data generation.
///
/// Size typically ranges from 0 to 100, where larger values
/// generate more complex test data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Size(pub usize);

impl Size {
    /// Create a new size value.
    pub fn new(value: usize) -> Self {
        Size(value)
    }

    /// Get the inner size value.
    pub fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Size({})", self.0)
    }
}

/// Splittable random seed for deterministic test generation.
///
/// Seeds can be split to create independent random streams, and
/// partitioned by an integer discriminant with [`Seed::variant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed(pub u64, pub u64);

impl Seed {
    /// Create a new seed from a single value.
    pub fn from_u64(value: u64) -> Self {
        let state = splitmix64_mix(value);
        let gamma = mix_gamma(state);
        Seed(state, gamma)
    }

    /// Split a seed into two independent seeds.
    /// Uses SplitMix64 splitting strategy for independence.
    pub fn split(self) -> (Self, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        let output = splitmix64_mix(new_state);
        let new_gamma = mix_gamma(output);

        (Seed(new_state, gamma), Seed(output, new_gamma))
    }

    /// Select the sub-stream keyed by `discriminant`.
    ///
    /// Walks the split tree along a self-delimiting code for the
    /// discriminant: a sign step, then a "more" step and a bit step per
    /// magnitude bit (least significant first), then an "end" step. The
    /// code is prefix-free, so chains of variants over different
    /// discriminant sequences walk different paths.
    pub fn variant(self, discriminant: impl Into<Discriminant>) -> Self {
        let discriminant = discriminant.into();
        let mut seed = self.branch(discriminant.is_negative());
        let mut magnitude = discriminant.magnitude();
        while magnitude != 0 {
            seed = seed.branch(true).branch(magnitude & 1 == 1);
            magnitude >>= 1;
        }
        seed.branch(false)
    }

    fn branch(self, right: bool) -> Self {
        let (left_seed, right_seed) = self.split();
        if right {
            right_seed
        } else {
            left_seed
        }
    }

    /// Generate the next random value and advance the seed.
    /// Uses SplitMix64 algorithm for high-quality randomness.
    pub fn next_u64(self) -> (u64, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        let output = splitmix64_mix(new_state);
        (output, Seed(new_state, gamma))
    }

    /// Generate a bounded random value [0, bound).
    pub fn next_bounded(self, bound: u64) -> (u64, Self) {
        let (value, new_seed) = self.next_u64();
        (((value as u128 * bound as u128) >> 64) as u64, new_seed)
    }

    /// Generate a random bool.
    pub fn next_bool(self) -> (bool, Self) {
        let (value, new_seed) = self.next_u64();
        (value & 1 == 1, new_seed)
    }

    /// Generate a random seed.
    pub fn random() -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        Seed::from_u64(rng.gen())
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({}, {})", self.0, self.1)
    }
}

/// Configuration for property runs.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of test cases to run.
    pub test_limit: usize,

    /// Maximum size parameter to use.
    pub size_limit: usize,

    /// Fixed starting seed; a fresh random one is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            test_limit: 100,
            size_limit: 100,
            seed: None,
        }
    }
}

impl Config {
    /// Create a new config with the given number of tests.
    pub fn with_tests(mut self, tests: usize) -> Self {
        self.test_limit = tests;
        self
    }

    /// Create a new config with the given size limit.
    pub fn with_size_limit(mut self, size: usize) -> Self {
        self.size_limit = size;
        self
    }

    /// Pin the starting seed so a run can be replayed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that the configuration describes a runnable property.
    pub fn validate(&self) -> Result<()> {
        if self.test_limit == 0 {
            return Err(CogenError::InvalidConfig {
                message: "test_limit must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// The seed a run starts from.
    pub fn initial_seed(&self) -> Seed {
        self.seed.map(Seed::from_u64).unwrap_or_else(Seed::random)
    }
}

/// SplitMix64 mixing function for high-quality output.
fn splitmix64_mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Generate a good gamma value for SplitMix64 splitting.
fn mix_gamma(mut z: u64) -> u64 {
    z = splitmix64_mix(z);
    // Ensure gamma is odd for maximal period
    (z | 1).wrapping_mul(0x9e3779b97f4a7c15)
}

//! Generator combinators.

use crate::data::*;
use crate::error::{CogenError, Result};
use std::rc::Rc;

/// A generator for test data of type `T`.
///
/// Generators are explicit, first-class values that can be composed
/// using combinator functions. Cloning shares the underlying function.
pub struct Gen<T> {
    generator: Rc<dyn Fn(Size, Seed) -> T>,
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Gen {
            generator: Rc::clone(&self.generator),
        }
    }
}

impl<T> Gen<T> {
    /// Create a new generator from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Size, Seed) -> T + 'static,
    {
        Gen {
            generator: Rc::new(f),
        }
    }

    /// Generate a value using the given size and seed.
    pub fn generate(&self, size: Size, seed: Seed) -> T {
        (self.generator)(size, seed)
    }
}

impl<T> Gen<T>
where
    T: 'static,
{
    /// Partition this generator by `discriminant`.
    ///
    /// The result samples from the sub-stream [`Seed::variant`] selects,
    /// so equal discriminants reproduce the same values and different
    /// ones almost surely do not.
    pub fn variant(self, discriminant: impl Into<Discriminant>) -> Gen<T> {
        let discriminant = discriminant.into();
        Gen::new(move |size, seed| self.generate(size, seed.variant(discriminant)))
    }

    /// Map a function over the generated values.
    pub fn map<U, F>(self, f: F) -> Gen<U>
    where
        F: Fn(T) -> U + 'static,
        U: 'static,
    {
        Gen::new(move |size, seed| f(self.generate(size, seed)))
    }

    /// Pair this generator with another, drawing each from its own split.
    pub fn zip<U>(self, other: Gen<U>) -> Gen<(T, U)>
    where
        U: 'static,
    {
        Gen::new(move |size, seed| {
            let (seed1, seed2) = seed.split();
            (self.generate(size, seed1), other.generate(size, seed2))
        })
    }
}

/// Primitive generators.
impl Gen<bool> {
    /// Generate a random boolean.
    pub fn bool() -> Self {
        Gen::new(|_size, seed| seed.next_bool().0)
    }
}

impl Gen<u64> {
    /// Generate any `u64`, ignoring size.
    pub fn any() -> Self {
        Gen::new(|_size, seed| seed.next_u64().0)
    }
}

impl Gen<i64> {
    /// Generate an integer in the inclusive range `[min, max]`.
    pub fn int_range(min: i64, max: i64) -> Result<Self> {
        if min > max {
            return Err(CogenError::InvalidRange { min, max });
        }
        let span = (max as i128 - min as i128 + 1) as u128;
        Ok(Gen::new(move |_size, seed| {
            let offset = if span > u64::MAX as u128 {
                seed.next_u64().0
            } else {
                seed.next_bounded(span as u64).0
            };
            (min as i128 + offset as i128) as i64
        }))
    }

    /// Generate an integer in `[-size, size]`.
    pub fn sized() -> Self {
        Gen::new(|size, seed| {
            let bound = size.get() as i128;
            let (offset, _) = seed.next_bounded((2 * bound + 1) as u64);
            (offset as i128 - bound) as i64
        })
    }
}

impl Gen<char> {
    /// Generate an ASCII letter.
    pub fn ascii_alpha() -> Self {
        const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
        Gen::new(|_size, seed| {
            let (index, _) = seed.next_bounded(LETTERS.len() as u64);
            LETTERS[index as usize] as char
        })
    }
}

impl<T> Gen<Vec<T>>
where
    T: 'static,
{
    /// Generate a vector whose length is bounded by the size parameter.
    pub fn vec_of(element: Gen<T>) -> Self {
        Gen::new(move |size, seed| {
            let (length_seed, mut current_seed) = seed.split();
            let (length, _) = length_seed.next_bounded((size.get() as u64).saturating_add(1));
            (0..length)
                .map(|_| {
                    let (element_seed, next_seed) = current_seed.split();
                    current_seed = next_seed;
                    element.generate(size, element_seed)
                })
                .collect()
        })
    }
}

impl Gen<String> {
    /// Generate a string from a character generator.
    pub fn string_of(chars: Gen<char>) -> Self {
        Gen::<Vec<char>>::vec_of(chars).map(|chars| chars.into_iter().collect())
    }

    /// Generate a string of ASCII letters.
    pub fn ascii_alpha() -> Self {
        Self::string_of(Gen::<char>::ascii_alpha())
    }
}

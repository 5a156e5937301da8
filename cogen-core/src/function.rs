//! Random functions as test inputs.
//!
//! A generated [`Function`] remembers the codomain generator together with
//! the size and seed it was generated at. Each application perturbs the
//! codomain generator with the argument's [`CoGen`] rule and samples it, so
//! the output depends on the input and equal inputs give equal outputs.

use crate::data::{Seed, Size};
use crate::dual::{dual, CoGen};
use crate::gen::Gen;
use std::fmt;
use std::marker::PhantomData;

/// A randomly generated function from `A` to `B`.
pub struct Function<A: ?Sized, B> {
    codomain: Gen<B>,
    size: Size,
    seed: Seed,
    domain: PhantomData<fn(&A)>,
}

impl<A: ?Sized, B> Clone for Function<A, B> {
    fn clone(&self) -> Self {
        Function {
            codomain: self.codomain.clone(),
            size: self.size,
            seed: self.seed,
            domain: PhantomData,
        }
    }
}

impl<A, B> Function<A, B>
where
    A: CoGen + ?Sized,
    B: 'static,
{
    /// Build a function sampling `codomain` at a fixed size and seed.
    pub fn new(codomain: Gen<B>, size: Size, seed: Seed) -> Self {
        Function {
            codomain,
            size,
            seed,
            domain: PhantomData,
        }
    }

    /// Apply the function.
    ///
    /// Same as `dual(input).apply(codomain).generate(size, seed)`, without
    /// wrapping the generator.
    pub fn call(&self, input: &A) -> B {
        let seed = dual(input).apply_seed(self.seed);
        self.codomain.generate(self.size, seed)
    }

    /// The seed this function was generated with.
    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// The size this function samples its outputs at.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Turn the function into a plain closure.
    pub fn into_fn(self) -> impl Fn(&A) -> B {
        move |input: &A| self.call(input)
    }
}

impl<A: ?Sized, B> fmt::Debug for Function<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {} {}>", self.seed, self.size)
    }
}

impl<A, B> Gen<Function<A, B>>
where
    A: CoGen + ?Sized + 'static,
    B: 'static,
{
    /// Generate functions whose outputs are drawn from `codomain`.
    pub fn function_of(codomain: Gen<B>) -> Self {
        Gen::new(move |size, seed| {
            tracing::trace!(%seed, size = size.get(), "generated function");
            Function::new(codomain.clone(), size, seed)
        })
    }
}

//! Perturbations: value-driven transforms of generators, and how they compose.

use crate::data::{Discriminant, Seed};
use crate::gen::Gen;

/// A pure transform of a generator into another generator.
///
/// A perturbation never inspects the generated type, so the only thing it
/// can do to a generator is select sub-streams with `variant`. It is stored
/// as the ordered list of discriminants it selects, first applied first,
/// which makes it usable at any element type and comparable structurally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Perturbation {
    discriminants: Vec<Discriminant>,
}

impl Perturbation {
    /// The perturbation that leaves a generator unchanged.
    pub fn identity() -> Self {
        Perturbation::default()
    }

    /// Select the sub-stream keyed by `discriminant`.
    pub fn variant(discriminant: impl Into<Discriminant>) -> Self {
        Perturbation {
            discriminants: vec![discriminant.into()],
        }
    }

    /// The discriminants in the order they are applied to a generator.
    pub fn discriminants(&self) -> &[Discriminant] {
        &self.discriminants
    }

    /// Whether this perturbation leaves generators unchanged.
    pub fn is_identity(&self) -> bool {
        self.discriminants.is_empty()
    }

    /// Apply `outer` after `self`, in place.
    ///
    /// Equivalent to `*self = compose(outer, self)` without copying the
    /// accumulated discriminants.
    pub fn then(&mut self, outer: &Perturbation) {
        self.discriminants.extend_from_slice(&outer.discriminants);
    }

    /// The seed a perturbed generator hands to the original one.
    ///
    /// `gen.variant(a).variant(b)` samples `gen` at
    /// `seed.variant(b).variant(a)`: the variant applied to the generator
    /// last is the first one taken on the seed. The walk therefore runs
    /// over the discriminants from last to first.
    pub fn apply_seed(&self, seed: Seed) -> Seed {
        self.discriminants
            .iter()
            .rev()
            .fold(seed, |seed, &discriminant| seed.variant(discriminant))
    }

    /// Transform a generator of any element type.
    pub fn apply<C: 'static>(&self, gen: Gen<C>) -> Gen<C> {
        if self.is_identity() {
            return gen;
        }
        let perturbation = self.clone();
        Gen::new(move |size, seed| gen.generate(size, perturbation.apply_seed(seed)))
    }
}

/// Chain two perturbations into one: `compose(f, g)(gen) == f(g(gen))`.
///
/// `g` (the tail or remaining structure) is applied to the generator first,
/// then `f` (the head). The order is fixed; swapping the operands gives a
/// different perturbation.
pub fn compose(f: Perturbation, g: Perturbation) -> Perturbation {
    let mut combined = g;
    combined.then(&f);
    combined
}

/// Fold perturbations given head first onto `tail`.
///
/// Yields `p0 ∘ p1 ∘ .. ∘ pn ∘ tail`. Walks from the last position back to
/// the first, so no intermediate composition is copied.
pub fn fold_onto<I>(tail: Perturbation, positions: I) -> Perturbation
where
    I: IntoIterator<Item = Perturbation>,
    I::IntoIter: DoubleEndedIterator,
{
    let mut acc = tail;
    for position in positions.into_iter().rev() {
        acc.then(&position);
    }
    acc
}

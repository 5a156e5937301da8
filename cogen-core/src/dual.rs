//! Observational duals: turning values into generator perturbations.
//!
//! A random function `A -> B` is built by perturbing a `Gen<B>` with the
//! argument before sampling. [`CoGen`] is the per-type rule that says how a
//! value of `A` perturbs a generator. Rules only ever select sub-streams with
//! `variant`, so the same rule works for a generator of any type.
//!
//! | Type | Perturbation |
//! |---|---|
//! | integers | `variant(x)` |
//! | `bool` | `variant(1)` for `true`, `variant(0)` for `false` |
//! | `f32`, `f64` | the integer rule on the truncated value |
//! | `char` | the integer rule on the code point |
//! | strings, slices, `Vec`, arrays, `VecDeque` | `variant(0)` when empty, else `head ∘ tail` |
//! | maps and sets | `variant(0)` when empty, else `variant(1)` |
//! | `Option` | `variant(0)` for `Some`, `variant(1)` for `None` |
//!
//! Floats lose their fractional part, and maps, sets and options do not look
//! at their contents. Both are accepted approximations, not errors.

use crate::perturb::{compose, fold_onto, Perturbation};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::Display;
use std::rc::Rc;
use std::sync::Arc;

/// Types whose values can perturb a generator.
///
/// Implementations must be total and pure: equal values give equal
/// perturbations, on every run and every thread.
pub trait CoGen {
    /// The perturbation this value applies to a generator.
    fn cogen(&self) -> Perturbation;
}

/// The observational dual of `value`.
pub fn dual<T: CoGen + ?Sized>(value: &T) -> Perturbation {
    value.cogen()
}

/// Fold an ordered sequence into one perturbation.
///
/// Empty sequences give `variant(0)`; otherwise the head's perturbation is
/// composed over the tail's. Walks from the last element to the first, so
/// the tail is always applied to the generator before its head.
pub fn fold_sequence<'a, T, I>(items: I) -> Perturbation
where
    T: CoGen + ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
    I::IntoIter: DoubleEndedIterator,
{
    fold_onto(
        Perturbation::variant(0),
        items.into_iter().map(|item| item.cogen()),
    )
}

/// Perturbation for containers that only distinguish empty from non-empty.
fn emptiness(is_empty: bool) -> Perturbation {
    Perturbation::variant(if is_empty { 0 } else { 1 })
}

macro_rules! impl_cogen_integral {
    ($($t:ty),* $(,)?) => {
        $(
            impl CoGen for $t {
                fn cogen(&self) -> Perturbation {
                    Perturbation::variant(*self)
                }
            }
        )*
    };
}

impl_cogen_integral!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl CoGen for bool {
    fn cogen(&self) -> Perturbation {
        Perturbation::variant(if *self { 1 } else { 0 })
    }
}

// Truncation toward zero; NaN becomes 0 and infinities saturate.
impl CoGen for f64 {
    fn cogen(&self) -> Perturbation {
        dual(&(self.trunc() as i128))
    }
}

impl CoGen for f32 {
    fn cogen(&self) -> Perturbation {
        dual(&(self.trunc() as i128))
    }
}

impl CoGen for char {
    fn cogen(&self) -> Perturbation {
        dual(&(*self as u32))
    }
}

/// A single user-perceived character, held as its text.
///
/// Only the first unicode scalar is observed, so graphemes built from
/// several scalars (a letter plus combining marks, flag sequences) collide
/// with their first scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grapheme<'a>(pub &'a str);

impl CoGen for Grapheme<'_> {
    fn cogen(&self) -> Perturbation {
        match self.0.chars().next() {
            Some(first) => dual(&first),
            None => Perturbation::variant(0),
        }
    }
}

/// Observe a value through its `Display` rendering.
///
/// A last resort for types without a dedicated rule: it allocates the
/// rendered string and then folds every character of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rendered<T>(pub T);

impl<T: Display> CoGen for Rendered<T> {
    fn cogen(&self) -> Perturbation {
        dual(self.0.to_string().as_str())
    }
}

impl CoGen for str {
    fn cogen(&self) -> Perturbation {
        fold_onto(Perturbation::variant(0), self.chars().map(|c| c.cogen()))
    }
}

impl CoGen for String {
    fn cogen(&self) -> Perturbation {
        self.as_str().cogen()
    }
}

impl<T: CoGen> CoGen for [T] {
    fn cogen(&self) -> Perturbation {
        fold_sequence(self)
    }
}

impl<T: CoGen> CoGen for Vec<T> {
    fn cogen(&self) -> Perturbation {
        fold_sequence(self)
    }
}

impl<T: CoGen, const N: usize> CoGen for [T; N] {
    fn cogen(&self) -> Perturbation {
        fold_sequence(self)
    }
}

impl<T: CoGen> CoGen for VecDeque<T> {
    fn cogen(&self) -> Perturbation {
        fold_sequence(self)
    }
}

impl<K, V, S> CoGen for HashMap<K, V, S> {
    fn cogen(&self) -> Perturbation {
        emptiness(self.is_empty())
    }
}

impl<K, V> CoGen for BTreeMap<K, V> {
    fn cogen(&self) -> Perturbation {
        emptiness(self.is_empty())
    }
}

impl<T, S> CoGen for HashSet<T, S> {
    fn cogen(&self) -> Perturbation {
        emptiness(self.is_empty())
    }
}

impl<T> CoGen for BTreeSet<T> {
    fn cogen(&self) -> Perturbation {
        emptiness(self.is_empty())
    }
}

// Presence is 0 and absence is 1, the reverse of the emptiness rule.
impl<T> CoGen for Option<T> {
    fn cogen(&self) -> Perturbation {
        match self {
            Some(_) => Perturbation::variant(0),
            None => Perturbation::variant(1),
        }
    }
}

impl<T: CoGen, E: CoGen> CoGen for Result<T, E> {
    fn cogen(&self) -> Perturbation {
        match self {
            Ok(value) => compose(value.cogen(), Perturbation::variant(0)),
            Err(error) => compose(error.cogen(), Perturbation::variant(1)),
        }
    }
}

/// Content-sensitive view of an ordered map or set.
///
/// The plain container rules only distinguish empty from non-empty.
/// `Entries` folds the entries in key order with the sequence rule
/// instead; the order is canonical, so the result stays reproducible.
#[derive(Debug)]
pub struct Entries<'a, C: ?Sized>(pub &'a C);

impl<K: CoGen, V: CoGen> CoGen for Entries<'_, BTreeMap<K, V>> {
    fn cogen(&self) -> Perturbation {
        let entries: Vec<(&K, &V)> = self.0.iter().collect();
        fold_sequence(&entries)
    }
}

impl<T: CoGen> CoGen for Entries<'_, BTreeSet<T>> {
    fn cogen(&self) -> Perturbation {
        let elements: Vec<&T> = self.0.iter().collect();
        fold_sequence(&elements)
    }
}

impl CoGen for () {
    fn cogen(&self) -> Perturbation {
        Perturbation::variant(0)
    }
}

macro_rules! impl_cogen_tuple {
    ($($name:ident . $idx:tt),+) => {
        impl<$($name: CoGen),+> CoGen for ($($name,)+) {
            fn cogen(&self) -> Perturbation {
                fold_onto(Perturbation::variant(0), [$(self.$idx.cogen()),+])
            }
        }
    };
}

impl_cogen_tuple!(A.0);
impl_cogen_tuple!(A.0, B.1);
impl_cogen_tuple!(A.0, B.1, C.2);
impl_cogen_tuple!(A.0, B.1, C.2, D.3);
impl_cogen_tuple!(A.0, B.1, C.2, D.3, E.4);
impl_cogen_tuple!(A.0, B.1, C.2, D.3, E.4, F.5);
impl_cogen_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6);
impl_cogen_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7);

impl<T: CoGen + ?Sized> CoGen for &T {
    fn cogen(&self) -> Perturbation {
        (**self).cogen()
    }
}

impl<T: CoGen + ?Sized> CoGen for &mut T {
    fn cogen(&self) -> Perturbation {
        (**self).cogen()
    }
}

impl<T: CoGen + ?Sized> CoGen for Box<T> {
    fn cogen(&self) -> Perturbation {
        (**self).cogen()
    }
}

impl<T: CoGen + ?Sized> CoGen for Rc<T> {
    fn cogen(&self) -> Perturbation {
        (**self).cogen()
    }
}

impl<T: CoGen + ?Sized> CoGen for Arc<T> {
    fn cogen(&self) -> Perturbation {
        (**self).cogen()
    }
}

impl<T> CoGen for Cow<'_, T>
where
    T: CoGen + ToOwned + ?Sized,
{
    fn cogen(&self) -> Perturbation {
        (**self).cogen()
    }
}

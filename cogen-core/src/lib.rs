//! Core functionality for observational duals.
//!
//! This crate provides seeds and generators, the [`CoGen`] rules that let a
//! value perturb a generator, and the function generator built on them.

pub mod data;
pub mod dual;
pub mod error;
pub mod function;
pub mod gen;
pub mod perturb;
pub mod property;

// Re-export the main types
pub use data::*;
pub use dual::*;
pub use error::*;
pub use function::*;
pub use gen::*;
pub use perturb::*;
pub use property::*;

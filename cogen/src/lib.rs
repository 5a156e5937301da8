//! Observational duals for property-based testing.
//!
//! This is the main entry point, re-exporting the core types and, with the
//! `derive` feature, `#[derive(CoGen)]` for your own types.

pub use cogen_core::*;

// Re-export derive macros when available
#[cfg(feature = "derive")]
pub use cogen_derive::*;

//! Modifier management and `rand`-style generation.
//!
//! The generator owns one entropy pool. Before each call it collects the
//! persistent modifier and the next queued one, in that order, and passes
//! them through to the pool as output adjustments.

mod modifier;
mod rand;

pub use self::rand::{ModifiedGenerator, Request, Sample};
pub use modifier::{Modifier, ModifierSet};

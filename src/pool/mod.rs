//! The entropy pool: state mixing and extraction.
//!
//! This module owns the byte-array state and every algorithm that reads
//! from or writes to it. It has no notion of modifiers; callers pass
//! adjustment byte strings straight into each read.

mod digest;
mod entropy;
mod integer;

pub use digest::{Block, Digest512, BLOCK_LEN, DIGEST_LEN};
pub use entropy::{EntropyPool, PoolError, MAX_POOL_BLOCKS, MIN_POOL_BLOCKS, NO_ADJUSTMENTS};

pub(crate) use digest::sha512;

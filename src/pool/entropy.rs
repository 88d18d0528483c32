//! The SHA-512 entropy pool.
//!
//! The pool is a byte buffer of `size` 64-byte blocks plus a cursor naming
//! the next block to overwrite. Mixing hashes the whole buffer together
//! with caller data and writes the digest over the cursor block. Every
//! extraction hashes the buffer, mixes that digest back in, and only then
//! chains any adjustments into the output, so adjustments never reach the
//! retained state.

use num::{BigInt, Zero};
use rand_core::{OsRng, RngCore};
use thiserror::Error;

use super::digest::{
    block_to_float, block_to_hex, block_to_u128, fold_digest, sha512, Block, BLOCK_LEN,
    DIGEST_LEN,
};
use super::integer::refine_integer;

/// Smallest allowed pool, in 64-byte blocks.
pub const MIN_POOL_BLOCKS: usize = 1;

/// Largest allowed pool, in 64-byte blocks (16 KiB of state).
pub const MAX_POOL_BLOCKS: usize = 256;

/// An empty adjustment list, for unmodified reads.
pub const NO_ADJUSTMENTS: &[&[u8]] = &[];

/// Errors raised by pool construction and integer generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("size of pool must be in range 1..=256, got {0}")]
    InvalidSize(usize),
    #[error("initial state bad size: expected {expected} bytes, got {got} bytes")]
    StateLength { expected: usize, got: usize },
    #[error("upper bound for integer generation must be positive")]
    NonPositiveTop,
    #[error("secure random source failed: {0}")]
    SeedSource(String),
}

/// A hash-mixed entropy pool.
///
/// `Clone` produces a fully independent pool: the state buffer is owned,
/// so mutating either copy never affects the other.
///
/// The pool has no internal locking. Sharing one instance between threads
/// requires external synchronisation; independent generators should each
/// own a pool (constructed separately or cloned).
#[derive(Clone, PartialEq, Eq)]
pub struct EntropyPool {
    /// `size * 64` bytes, fixed after construction.
    state: Vec<u8>,
    /// Number of 64-byte blocks.
    size: usize,
    /// Next block to overwrite, in `0..size`.
    cursor: usize,
}

impl EntropyPool {
    /// Creates a pool of `size` blocks filled from the OS secure random source.
    pub fn new(size: usize) -> Result<Self, PoolError> {
        Self::from_os_entropy(size)
    }

    /// Creates a pool of `size` blocks filled from the OS secure random source.
    pub fn from_os_entropy(size: usize) -> Result<Self, PoolError> {
        check_size(size)?;
        let mut state = vec![0u8; size * DIGEST_LEN];
        OsRng
            .try_fill_bytes(&mut state)
            .map_err(|e| PoolError::SeedSource(e.to_string()))?;

        tracing::debug!(size, "Created entropy pool from OS entropy");
        Ok(Self {
            state,
            size,
            cursor: 0,
        })
    }

    /// Creates a pool of `size` blocks with all-zero state.
    ///
    /// Output from a blank pool is fully predictable until data is mixed in.
    pub fn blank(size: usize) -> Result<Self, PoolError> {
        check_size(size)?;
        tracing::debug!(size, "Created blank entropy pool");
        Ok(Self {
            state: vec![0u8; size * DIGEST_LEN],
            size,
            cursor: 0,
        })
    }

    /// Creates a pool from explicit state bytes.
    ///
    /// `state` must be exactly `size * 64` bytes. `cursor` is taken
    /// modulo `size`.
    pub fn with_state(
        size: usize,
        state: impl Into<Vec<u8>>,
        cursor: usize,
    ) -> Result<Self, PoolError> {
        check_size(size)?;
        let state = state.into();
        let expected = size * DIGEST_LEN;
        if state.len() != expected {
            return Err(PoolError::StateLength {
                expected,
                got: state.len(),
            });
        }

        Ok(Self {
            state,
            size,
            cursor: cursor % size,
        })
    }

    /// Number of 64-byte blocks in the pool.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Index of the next block that will be overwritten.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The full pool state.
    ///
    /// Anyone holding this together with [`cursor`](Self::cursor) can
    /// predict every future output.
    #[inline]
    pub fn state(&self) -> &[u8] {
        &self.state
    }

    /// Mixes `data` into the pool.
    ///
    /// Overwrites the cursor block with `SHA-512(state ++ data)` and advances
    /// the cursor. Empty data still changes the state.
    pub fn mix(&mut self, data: &[u8]) {
        let digest = sha512(&[&self.state, data]);
        let start = self.cursor * DIGEST_LEN;
        self.state[start..start + DIGEST_LEN].copy_from_slice(&digest);

        tracing::trace!(
            block = self.cursor,
            data_len = data.len(),
            "Mixed data into pool"
        );

        self.cursor = (self.cursor + 1) % self.size;
    }

    /// Extracts 128 bits, chaining `adjustments` into the output only.
    ///
    /// The unadjusted digest of the state is mixed back into the pool, so
    /// the retained state is the same whatever adjustments are supplied.
    /// Every adjustment is applied in order, an empty one included.
    pub fn extract_128<A: AsRef<[u8]>>(&mut self, adjustments: &[A]) -> Block {
        let mut raw = sha512(&[&self.state]);
        self.mix(&raw);

        for adjustment in adjustments {
            raw = sha512(&[&raw, adjustment.as_ref()]);
        }

        fold_digest(&raw)
    }

    /// 16 uniformly distributed bytes.
    #[inline]
    pub fn read_bytes<A: AsRef<[u8]>>(&mut self, adjustments: &[A]) -> Block {
        self.extract_128(adjustments)
    }

    /// 32 lowercase hex digits.
    pub fn read_hex<A: AsRef<[u8]>>(&mut self, adjustments: &[A]) -> String {
        block_to_hex(&self.extract_128(adjustments))
    }

    /// An integer uniform over `0..2^128`.
    pub fn read_bignum<A: AsRef<[u8]>>(&mut self, adjustments: &[A]) -> u128 {
        block_to_u128(&self.extract_128(adjustments))
    }

    /// A float uniform over `[0.0, 1.0)` to 53-bit precision.
    pub fn read_float<A: AsRef<[u8]>>(&mut self, adjustments: &[A]) -> f64 {
        block_to_float(&self.extract_128(adjustments))
    }

    /// An integer uniform over `0..top`, free of modulo bias.
    ///
    /// Draws as many blocks as needed, each with the same adjustments, so
    /// `top` may be far larger than 2^128. Fails without touching the pool
    /// if `top` is not positive.
    pub fn generate_integer<A: AsRef<[u8]>>(
        &mut self,
        top: &BigInt,
        adjustments: &[A],
    ) -> Result<BigInt, PoolError> {
        if top <= &BigInt::zero() {
            return Err(PoolError::NonPositiveTop);
        }
        Ok(refine_integer(top, || self.extract_128(adjustments)))
    }
}

fn check_size(size: usize) -> Result<(), PoolError> {
    if !(MIN_POOL_BLOCKS..=MAX_POOL_BLOCKS).contains(&size) {
        return Err(PoolError::InvalidSize(size));
    }
    Ok(())
}

impl std::fmt::Debug for EntropyPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntropyPool")
            .field("size", &self.size)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl RngCore for EntropyPool {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_be_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_be_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(BLOCK_LEN) {
            let block = self.extract_128(NO_ADJUSTMENTS);
            chunk.copy_from_slice(&block[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

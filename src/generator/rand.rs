//! The modifier-aware generator.
//!
//! Wraps an [`EntropyPool`] with a persistent modifier and a queue of
//! one-shot modifiers, and exposes `rand`-style generation of floats,
//! bounded integers and inclusive ranges.

use num::{BigInt, One, Zero};

use super::modifier::ModifierSet;
use crate::config::{ConfigError, PoolOptions};
use crate::pool::{Block, EntropyPool, PoolError};

/// What to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// A float in `[0.0, 1.0)`.
    Float,
    /// An integer in `0..max`. A non-positive `max` asks for a float.
    Below(BigInt),
    /// An integer in the inclusive range `lo..=hi`.
    Range(BigInt, BigInt),
}

/// A generated value.
#[derive(Debug, Clone, PartialEq)]
pub enum Sample {
    /// A float in `[0.0, 1.0)`.
    Float(f64),
    /// A bounded integer.
    Integer(BigInt),
}

impl Sample {
    /// The integer value, if this is an integer sample.
    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Sample::Integer(n) => Some(n),
            Sample::Float(_) => None,
        }
    }

    /// The float value, if this is a float sample.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Sample::Float(f) => Some(*f),
            Sample::Integer(_) => None,
        }
    }
}

/// A random number generator that mixes user input into its output.
///
/// Data added with [`add_to_pool`](Self::add_to_pool) permanently changes
/// the pool. Modifiers set with [`modify_next`](Self::modify_next) and
/// [`modify_all`](Self::modify_all) only change the values returned; the
/// pool evolves identically whatever modifiers are in effect.
///
/// Like the pool, a generator is meant for use from one thread at a time.
#[derive(Debug, Clone)]
pub struct ModifiedGenerator {
    pool: EntropyPool,
    modifiers: ModifierSet,
}

impl ModifiedGenerator {
    /// Wraps `pool` with no modifiers in effect.
    pub fn new(pool: EntropyPool) -> Self {
        Self {
            pool,
            modifiers: ModifierSet::new(),
        }
    }

    /// Builds the pool described by `options` and wraps it.
    pub fn from_options(options: &PoolOptions) -> Result<Self, ConfigError> {
        Ok(Self::new(options.build_pool()?))
    }

    /// Generates the requested kind of value.
    ///
    /// Returns `None` only for an empty range (`hi < lo`), which consumes
    /// no modifier and does not touch the pool.
    pub fn generate(&mut self, request: Request) -> Option<Sample> {
        match request {
            Request::Float => Some(Sample::Float(self.rand_float())),
            Request::Below(max) if max <= BigInt::zero() => Some(Sample::Float(self.rand_float())),
            Request::Below(max) => self.rand_integer(&max).ok().map(Sample::Integer),
            Request::Range(lo, hi) => self.rand_range(&lo, &hi).map(Sample::Integer),
        }
    }

    /// A float in `[0.0, 1.0)`.
    pub fn rand_float(&mut self) -> f64 {
        let adjustments = self.modifiers.take_for_call();
        self.pool.read_float(&adjustments)
    }

    /// 16 raw bytes from one extraction.
    pub fn rand_block(&mut self) -> Block {
        let adjustments = self.modifiers.take_for_call();
        self.pool.read_bytes(&adjustments)
    }

    /// 32 lowercase hex digits from one extraction.
    pub fn rand_hex(&mut self) -> String {
        let adjustments = self.modifiers.take_for_call();
        self.pool.read_hex(&adjustments)
    }

    /// An integer in `0..2^128` from one extraction.
    pub fn rand_bignum(&mut self) -> u128 {
        let adjustments = self.modifiers.take_for_call();
        self.pool.read_bignum(&adjustments)
    }

    /// An integer in `0..top`.
    ///
    /// Fails if `top` is not positive; no modifier is consumed in that case.
    pub fn rand_integer(&mut self, top: &BigInt) -> Result<BigInt, PoolError> {
        if top <= &BigInt::zero() {
            return Err(PoolError::NonPositiveTop);
        }
        let adjustments = self.modifiers.take_for_call();
        self.pool.generate_integer(top, &adjustments)
    }

    /// An integer in `lo..=hi`, or `None` if the range is empty.
    pub fn rand_range(&mut self, lo: &BigInt, hi: &BigInt) -> Option<BigInt> {
        if hi < lo {
            return None;
        }
        let span = hi - lo + BigInt::one();
        self.rand_integer(&span).ok().map(|n| lo + n)
    }

    /// Queues one-shot modifiers, one per future generation call.
    ///
    /// `None` entries hold a place in the queue without adjusting their call.
    pub fn modify_next<I, S>(&mut self, modifiers: I) -> &mut Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<[u8]>,
    {
        self.modifiers.push_next(modifiers);
        tracing::debug!(
            pending = self.modifiers.pending_len(),
            "Queued next modifiers"
        );
        self
    }

    /// Sets a modifier applied to every call until changed, or clears it.
    pub fn modify_all<S: AsRef<[u8]>>(&mut self, modifier: Option<S>) -> &mut Self {
        self.modifiers.set_persistent(modifier);
        tracing::debug!(
            active = self.modifiers.has_persistent(),
            "Updated persistent modifier"
        );
        self
    }

    /// Empties the modifier queue and clears the persistent modifier.
    pub fn clear_all_modifiers(&mut self) -> &mut Self {
        self.modifiers.clear();
        tracing::debug!("Cleared all modifiers");
        self
    }

    /// Mixes `data` into the pool. Cannot be undone.
    pub fn add_to_pool(&mut self, data: impl AsRef<[u8]>) -> &mut Self {
        self.pool.mix(data.as_ref());
        self
    }

    /// The wrapped pool.
    pub fn pool(&self) -> &EntropyPool {
        &self.pool
    }

    /// Number of queued one-shot modifiers, placeholders included.
    pub fn pending_modifiers(&self) -> usize {
        self.modifiers.pending_len()
    }

    /// Whether a persistent modifier is set.
    pub fn has_persistent_modifier(&self) -> bool {
        self.modifiers.has_persistent()
    }
}

//! Output modifiers.
//!
//! A modifier is the SHA-512 hash of a caller string. It is chained into
//! the output digest of a read but never into the pool state, so it
//! changes results without letting a caller steer future values.

use std::collections::VecDeque;

use crate::pool::{sha512, Digest512};

/// A hashed modifier value.
///
/// The string is hashed once, when the modifier is created. An empty
/// string is a real modifier: it hashes to a fixed digest and changes
/// output like any other value.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Modifier {
    digest: Digest512,
}

impl Modifier {
    /// Hashes `value` into a modifier.
    pub fn new(value: impl AsRef<[u8]>) -> Self {
        Self {
            digest: sha512(&[value.as_ref()]),
        }
    }

    /// The hashed bytes.
    #[inline]
    pub fn as_bytes(&self) -> &Digest512 {
        &self.digest
    }
}

impl AsRef<[u8]> for Modifier {
    fn as_ref(&self) -> &[u8] {
        &self.digest
    }
}

impl std::fmt::Debug for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modifier").finish_non_exhaustive()
    }
}

/// The persistent modifier plus the queue of one-shot modifiers.
///
/// Queue entries are `Option<Modifier>`: `None` is an explicit
/// placeholder that consumes one call without adjusting it, so a queue of
/// `[A, None, B]` adjusts the next three calls with `A`, nothing, `B`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierSet {
    persistent: Option<Modifier>,
    pending: VecDeque<Option<Modifier>>,
}

impl ModifierSet {
    /// An empty set: no persistent modifier, nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one queue entry per element, in order.
    pub fn push_next<I, S>(&mut self, modifiers: I)
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<[u8]>,
    {
        self.pending
            .extend(modifiers.into_iter().map(|m| m.map(Modifier::new)));
    }

    /// Sets the persistent modifier, or clears it with `None`.
    pub fn set_persistent<S: AsRef<[u8]>>(&mut self, modifier: Option<S>) {
        self.persistent = modifier.map(Modifier::new);
    }

    /// Drops the queue and the persistent modifier.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.persistent = None;
    }

    /// Adjustments for one generation call.
    ///
    /// The persistent modifier comes first, then the head of the queue.
    /// Exactly one queue entry is consumed if the queue is non-empty,
    /// whether or not it is a placeholder.
    pub fn take_for_call(&mut self) -> Vec<Modifier> {
        let next = self.pending.pop_front().flatten();
        self.persistent.into_iter().chain(next).collect()
    }

    /// Number of queued entries, placeholders included.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Whether a persistent modifier is set.
    pub fn has_persistent(&self) -> bool {
        self.persistent.is_some()
    }
}

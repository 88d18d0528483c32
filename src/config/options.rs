//! Pool construction options.

use serde::{Deserialize, Serialize};

use crate::pool::{EntropyPool, PoolError, DIGEST_LEN, MAX_POOL_BLOCKS, MIN_POOL_BLOCKS};

/// How to construct an entropy pool.
///
/// The initial state is taken from `initial_state` if given, otherwise it
/// is all zero when `blank` is set, otherwise it comes from the OS secure
/// random source. Seeds are mixed in afterwards, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolOptions {
    /// Number of 64-byte blocks, 1 to 256.
    pub size: usize,
    /// Start from an all-zero state (predictable until seeded).
    pub blank: bool,
    /// Exact initial state, `size * 64` bytes.
    pub initial_state: Option<Vec<u8>>,
    /// First block to overwrite; taken modulo `size`.
    pub cursor: usize,
    /// Byte strings mixed into the pool after construction.
    ///
    /// In TOML each seed is either a string (its UTF-8 bytes) or an array
    /// of byte values, so binary seeds such as `[255, 254]` can be given.
    #[serde(with = "seed_bytes")]
    pub seeds: Vec<Vec<u8>>,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            size: 1,
            blank: false,
            initial_state: None,
            cursor: 0,
            seeds: Vec::new(),
        }
    }
}

impl PoolOptions {
    /// Options for a pool of `size` blocks, otherwise default.
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Appends a seed, mixed in after any seeds already present.
    pub fn with_seed(mut self, seed: impl AsRef<[u8]>) -> Self {
        self.seeds.push(seed.as_ref().to_vec());
        self
    }

    /// Validates the options without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_POOL_BLOCKS..=MAX_POOL_BLOCKS).contains(&self.size) {
            return Err(PoolError::InvalidSize(self.size).into());
        }
        if let Some(state) = &self.initial_state {
            if self.blank {
                return Err(ConfigError::BlankWithState);
            }
            let expected = self.size * DIGEST_LEN;
            if state.len() != expected {
                return Err(PoolError::StateLength {
                    expected,
                    got: state.len(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Builds the pool and mixes in every seed.
    pub fn build_pool(&self) -> Result<EntropyPool, ConfigError> {
        self.validate()?;

        let state = match &self.initial_state {
            Some(state) => state.clone(),
            None if self.blank => vec![0u8; self.size * DIGEST_LEN],
            None => EntropyPool::from_os_entropy(self.size)?.state().to_vec(),
        };
        let mut pool = EntropyPool::with_state(self.size, state, self.cursor)?;

        for seed in &self.seeds {
            pool.mix(seed);
        }

        tracing::debug!(
            size = self.size,
            blank = self.blank,
            seeds = self.seeds.len(),
            "Built entropy pool from options"
        );

        Ok(pool)
    }
}

/// Seeds are written as strings when they are valid UTF-8 and as byte
/// arrays otherwise; both forms are accepted on input.
mod seed_bytes {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Seed<'a> {
        Text(std::borrow::Cow<'a, str>),
        Bytes(std::borrow::Cow<'a, [u8]>),
    }

    pub fn serialize<S>(seeds: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(seeds.iter().map(|seed| match std::str::from_utf8(seed) {
            Ok(text) => Seed::Text(text.into()),
            Err(_) => Seed::Bytes(seed.as_slice().into()),
        }))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seeds = Vec::<Seed<'static>>::deserialize(deserializer)?;
        Ok(seeds
            .into_iter()
            .map(|seed| match seed {
                Seed::Text(text) => text.into_owned().into_bytes(),
                Seed::Bytes(bytes) => bytes.into_owned(),
            })
            .collect())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error("blank pool cannot also be given an initial state")]
    BlankWithState,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::NO_ADJUSTMENTS;

    #[test]
    fn test_default_options_valid() {
        let options = PoolOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.build_pool().unwrap().size(), 1);
    }

    #[test]
    fn test_invalid_size_rejected() {
        for size in [0usize, 257] {
            assert_eq!(
                PoolOptions::with_size(size).validate(),
                Err(ConfigError::Pool(PoolError::InvalidSize(size)))
            );
        }
    }

    #[test]
    fn test_state_length_checked() {
        let options = PoolOptions {
            size: 2,
            initial_state: Some(vec![0u8; 64]),
            ..Default::default()
        };
        assert_eq!(
            options.validate(),
            Err(ConfigError::Pool(PoolError::StateLength {
                expected: 128,
                got: 64
            }))
        );
    }

    #[test]
    fn test_blank_with_state_rejected() {
        let options = PoolOptions {
            blank: true,
            initial_state: Some(vec![0u8; 64]),
            ..Default::default()
        };
        assert_eq!(options.validate(), Err(ConfigError::BlankWithState));
    }

    #[test]
    fn test_blank_matches_explicit_zero_state() {
        let blank = PoolOptions {
            blank: true,
            seeds: vec![b"foo".to_vec()],
            ..Default::default()
        };
        let explicit = PoolOptions {
            initial_state: Some(vec![0u8; 64]),
            seeds: vec![b"foo".to_vec()],
            ..Default::default()
        };
        assert_eq!(blank.build_pool().unwrap(), explicit.build_pool().unwrap());
    }

    #[test]
    fn test_seeds_mixed_in_order() {
        let options = PoolOptions {
            size: 2,
            blank: true,
            seeds: vec![b"foo".to_vec(), b"bar".to_vec()],
            ..Default::default()
        };
        let pool = options.build_pool().unwrap();

        let mut expected = EntropyPool::blank(2).unwrap();
        expected.mix(b"foo");
        expected.mix(b"bar");
        assert_eq!(pool, expected);
        assert_eq!(pool.cursor(), 0);
    }

    #[test]
    fn test_binary_seed_mixed_as_bytes() {
        let options = PoolOptions {
            blank: true,
            seeds: vec![vec![0xff, 0xfe]],
            ..Default::default()
        };

        let mut expected = EntropyPool::blank(1).unwrap();
        expected.mix(&[0xff, 0xfe]);
        assert_eq!(options.build_pool().unwrap(), expected);
    }

    #[test]
    fn test_with_seed_appends_in_order() {
        let options = PoolOptions {
            blank: true,
            ..PoolOptions::with_size(2)
        }
        .with_seed("foo")
        .with_seed([0xffu8, 0x00]);
        assert_eq!(options.seeds, vec![b"foo".to_vec(), vec![0xff, 0x00]]);

        let mut expected = EntropyPool::blank(2).unwrap();
        expected.mix(b"foo");
        expected.mix(&[0xff, 0x00]);
        assert_eq!(options.build_pool().unwrap(), expected);
    }

    #[test]
    fn test_cursor_applies_to_blank_pool() {
        let options = PoolOptions {
            size: 3,
            blank: true,
            cursor: 4,
            ..Default::default()
        };
        let mut pool = options.build_pool().unwrap();
        assert_eq!(pool.cursor(), 1);

        pool.read_bytes(NO_ADJUSTMENTS);
        assert_eq!(&pool.state()[..64], &[0u8; 64][..]);
        assert_ne!(&pool.state()[64..128], &[0u8; 64][..]);
    }
}

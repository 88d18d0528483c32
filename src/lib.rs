//! Pool of Entropy
//!
//! A pseudo-random number generator built around a mutable entropy pool:
//! a byte buffer repeatedly re-mixed with SHA-512. Callers can mix extra
//! data into the pool at any time, permanently changing all future output,
//! and can apply transient modifiers that change individual results without
//! touching the pool.
//!
//! # Architecture
//!
//! ```text
//! ModifiedGenerator ── persistent + next modifier ──▶ adjustments
//!         │                                               │
//!         └──────────────▶ EntropyPool ◀──────────────────┘
//!                     mix / extract_128 / generate_integer
//! ```
//!
//! Every read hashes the pool, mixes that digest back into the pool, then
//! chains the adjustments into the output digest only. Identical pools with
//! identical adjustments give identical output; the pool evolves the same
//! way whatever adjustments are used.
//!
//! # Design Principles
//!
//! - **Deterministic given state**: a blank or explicitly seeded pool
//!   reproduces the same sequence every time
//! - **Modifiers cannot steer the future**: they never reach pool state
//! - **Unbiased integers**: bounded integers are refined digit by digit,
//!   with no modulo bias and no upper limit on the bound
//! - **No cryptographic claims**: SHA-512 mixing is not presented as a
//!   vetted CSPRNG construction
//! - **Single-threaded**: no internal locking; clone or construct one
//!   generator per thread
//!
//! # Example
//!
//! ```
//! use num::BigInt;
//! use pool_of_entropy::{ModifiedGenerator, PoolOptions};
//!
//! let options = PoolOptions {
//!     blank: true,
//!     ..Default::default()
//! }
//! .with_seed("foo");
//! let mut generator = ModifiedGenerator::from_options(&options).unwrap();
//!
//! // Same seed, same sequence.
//! let roll = generator.rand_integer(&BigInt::from(10)).unwrap();
//! assert_eq!(roll, BigInt::from(9));
//!
//! // Adjust just the next result.
//! generator.modify_next([Some("lucky")]);
//! let adjusted = generator.rand_range(&BigInt::from(1), &BigInt::from(20));
//! assert!(adjusted.is_some());
//!
//! // Mix in user data for good.
//! generator.add_to_pool("webcam frame bytes");
//! let f = generator.rand_float();
//! assert!((0.0..1.0).contains(&f));
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;
pub mod generator;
pub mod pool;

// Re-export commonly used types at crate root
pub use config::{ConfigError, FileConfig, ModifierConfig, PoolOptions};
pub use generator::{ModifiedGenerator, Modifier, ModifierSet, Request, Sample};
pub use pool::{Block, EntropyPool, PoolError, NO_ADJUSTMENTS};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

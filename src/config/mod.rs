//! Construction parameters and file configuration.
//!
//! [`PoolOptions`] describes how to build a pool: its size, where its
//! initial state comes from, and any seed strings to mix in. [`FileConfig`]
//! wraps those options with preset modifiers and loads them from TOML.

mod file;
mod options;

pub use file::{FileConfig, ModifierConfig};
pub use options::{ConfigError, PoolOptions};

//! TOML configuration files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::options::{ConfigError, PoolOptions};
use crate::generator::ModifiedGenerator;

/// Full configuration file format.
///
/// ```toml
/// [pool]
/// size = 4
/// blank = true
/// seeds = ["My Name"]
///
/// [modifiers]
/// all = "campaign"
/// next = ["first roll", {}, "third roll"]
/// ```
///
/// An empty table `{}` in `next` is a placeholder: it uses up one call
/// without adjusting it.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FileConfig {
    #[serde(default)]
    pub pool: PoolOptions,
    #[serde(default)]
    pub modifiers: ModifierConfig,
}

/// Modifiers preset on a generator built from a file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ModifierConfig {
    /// Persistent modifier.
    pub all: Option<String>,
    /// One-shot modifiers, queued in order. `None` skips one call.
    #[serde(with = "queued_modifiers")]
    pub next: Vec<Option<String>>,
}

/// Queue entries are strings, or `{}` for a placeholder since TOML has
/// no null.
mod queued_modifiers {
    use std::borrow::Cow;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Placeholder {}

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Entry<'a> {
        Modifier(Cow<'a, str>),
        Placeholder(Placeholder),
    }

    pub fn serialize<S>(next: &[Option<String>], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(next.iter().map(|entry| match entry {
            Some(text) => Entry::Modifier(text.as_str().into()),
            None => Entry::Placeholder(Placeholder {}),
        }))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<Entry<'static>>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .map(|entry| match entry {
                Entry::Modifier(text) => Some(text.into_owned()),
                Entry::Placeholder(_) => None,
            })
            .collect())
    }
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.pool.validate()?;
        Ok(config)
    }

    /// Builds a generator with the configured pool and modifiers.
    pub fn build_generator(&self) -> Result<ModifiedGenerator, ConfigError> {
        let mut generator = ModifiedGenerator::from_options(&self.pool)?;
        generator
            .modify_all(self.modifiers.all.as_deref())
            .modify_next(self.modifiers.next.iter().map(Option::as_deref));
        Ok(generator)
    }
}

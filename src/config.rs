//! Configuration management
//!
//! Settings live in `bizpulse.toml` (see [`crate::paths`] for lookup order).
//! Every section is optional; a missing file yields the built-in defaults.
//!
//! ```toml
//! [conversation]
//! response_delay_ms = 1500
//! greeting = "Hi! ..."
//!
//! [aggregator]
//! granularity = "day"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//!
//! [[classifier.rules]]
//! topic = "permits"
//! triggers = ["permit", "license"]
//!
//! [catalog]
//! support = [{ name = "Front Desk", description = "Walk in", link = "#" }]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::models::{ParseLabelError, ResourceEntry, TopicLabel};
use crate::core::services::{
    CatalogError, ConversationSettings, DEFAULT_ACKNOWLEDGMENT, DEFAULT_GREETING, Granularity,
    ResourceCatalog, ResponsePolicy, TopicClassifier, TopicRule, default_rules,
};
use crate::paths;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// File that was parsed
        path: PathBuf,
        /// Underlying TOML error
        #[source]
        source: Box<toml::de::Error>,
    },

    /// A `[catalog]` key is not a topic
    #[error("invalid catalog section: {0}")]
    UnknownTopic(#[from] ParseLabelError),

    /// The catalog would leave a topic without resources
    #[error("invalid catalog section: {0}")]
    Catalog(#[from] CatalogError),
}

/// Root of `bizpulse.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Chat wording and timing
    #[serde(default)]
    pub conversation: ConversationConfig,

    /// Statistics defaults
    #[serde(default)]
    pub aggregator: AggregatorConfig,

    /// HTTP listener
    #[serde(default)]
    pub server: ServerConfig,

    /// Custom rule table; the built-in rules apply when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<ClassifierConfig>,

    /// Per-topic resource lists replacing the built-in ones
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub catalog: BTreeMap<String, Vec<ResourceEntry>>,
}

/// `[conversation]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationConfig {
    /// Delay before the assistant answers
    pub response_delay_ms: u64,
    /// Opening message; empty disables it
    pub greeting: String,
    /// Message preceding each recommendation list
    pub acknowledgment: String,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            response_delay_ms: 1500,
            greeting: DEFAULT_GREETING.to_string(),
            acknowledgment: DEFAULT_ACKNOWLEDGMENT.to_string(),
        }
    }
}

/// `[aggregator]` section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Trend bucket width used when none is requested
    pub granularity: Granularity,
}

/// `[server]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// `[classifier]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Label used when no rule matches
    #[serde(default)]
    pub fallback: TopicLabel,
    /// Rules in priority order
    #[serde(default)]
    pub rules: Vec<TopicRule>,
}

impl Config {
    /// Load from the resolved config path, or defaults when there is none
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match paths::resolve_config(explicit) {
            Some(path) => Self::load_from(&path),
            None => {
                log::debug!("no config file found, using defaults");
                Ok(Self::default())
            },
        }
    }

    /// Load and validate a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })?;
        config.catalog()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// The file `init` writes: defaults plus the built-in rule table
    #[must_use]
    pub fn template() -> Self {
        Self {
            classifier: Some(ClassifierConfig {
                fallback: TopicLabel::Support,
                rules: default_rules(),
            }),
            ..Self::default()
        }
    }

    /// Serialize as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Topic classifier described by this config
    #[must_use]
    pub fn classifier(&self) -> TopicClassifier {
        self.classifier.as_ref().map_or_else(TopicClassifier::default, |c| {
            TopicClassifier::new(c.rules.clone(), c.fallback)
        })
    }

    /// Built-in catalog with this config's overrides applied
    pub fn catalog(&self) -> Result<ResourceCatalog, ConfigError> {
        if self.catalog.is_empty() {
            return Ok(ResourceCatalog::default());
        }
        let overrides = self
            .catalog
            .iter()
            .map(|(key, entries)| Ok((key.parse::<TopicLabel>()?, entries.clone())))
            .collect::<Result<BTreeMap<_, _>, ParseLabelError>>()?;
        Ok(ResourceCatalog::default().with_overrides(overrides)?)
    }

    /// Engine settings from the `[conversation]` section
    #[must_use]
    pub fn conversation_settings(&self) -> ConversationSettings {
        let section = &self.conversation;
        ConversationSettings {
            policy: ResponsePolicy::with_delay(Duration::from_millis(section.response_delay_ms)),
            greeting: Some(section.greeting.clone()).filter(|g| !g.trim().is_empty()),
            acknowledgment: section.acknowledgment.clone(),
        }
    }
}

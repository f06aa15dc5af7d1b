//! Options for the cachebust transform

use cachebust_foundation::{BustError, BustResult};
use figment::{
    providers::{Format, Json, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Longest usable prefix of a hex-encoded SHA-256 digest
pub const MAX_HASH_LENGTH: usize = 64;

/// Transform options
///
/// Every field has a default, so an empty options object yields the classic
/// behavior: `.js` specifiers get `?v=<8 hex chars>` appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BustConfig {
    /// Extensions (with leading dot) that mark a specifier as a script module
    pub extensions: Vec<String>,
    /// Number of hex characters kept from the content digest
    pub hash_length: usize,
    /// Query parameter name carrying the hash
    pub query_key: String,
    /// Logging configuration.
    ///
    /// Only validated by the transform. Hosts apply it by calling
    /// [`crate::logging::initialize`] once at startup.
    pub logging: LoggingConfig,
}

impl Default for BustConfig {
    fn default() -> Self {
        Self {
            extensions: vec![".js".to_string()],
            hash_length: 8,
            query_key: "v".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format for development
    #[default]
    Pretty,
    /// Structured JSON format for build servers
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl BustConfig {
    /// Parse options from a JSON string, the form host pipelines hand to plugins.
    ///
    /// Missing keys fall back to defaults. The result is validated.
    pub fn from_json_str(options: &str) -> BustResult<Self> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Json::string(options))
            .extract()
            .map_err(|e| BustError::config(format!("Invalid options: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load options from a `.toml` or `.json` file merged over the defaults.
    pub fn load_from(path: &Path) -> BustResult<Self> {
        if !path.is_file() {
            return Err(BustError::config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let base = Figment::from(Serialized::defaults(Self::default()));
        let figment = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => base.merge(Toml::file(path)),
            Some("json") => base.merge(Json::file(path)),
            _ => {
                return Err(BustError::config(format!(
                    "Unsupported config format for {} (expected .toml or .json)",
                    path.display()
                )))
            }
        };

        debug!(path = %path.display(), "Loading cachebust configuration");

        let config: Self = figment
            .extract()
            .map_err(|e| BustError::config(format!("{}: {}", path.display(), e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate option values
    pub fn validate(&self) -> BustResult<()> {
        if self.extensions.is_empty() {
            return Err(BustError::config(
                "At least one module extension must be configured",
            ));
        }
        for ext in &self.extensions {
            if !ext.starts_with('.') || ext.len() < 2 {
                return Err(BustError::config(format!(
                    "Invalid extension '{}', expected a leading dot such as '.js'",
                    ext
                )));
            }
        }

        if self.hash_length == 0 || self.hash_length > MAX_HASH_LENGTH {
            return Err(BustError::config(format!(
                "Invalid hashLength {}, must be between 1 and {}",
                self.hash_length, MAX_HASH_LENGTH
            )));
        }

        if self.query_key.is_empty()
            || !self
                .query_key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(BustError::config(format!(
                "Invalid queryKey '{}', use letters, digits, '_' or '-'",
                self.query_key
            )));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(BustError::config(format!(
                "Invalid log level '{}', must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            )));
        }

        Ok(())
    }
}

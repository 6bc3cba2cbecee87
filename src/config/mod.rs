//! Allocator configuration
//!
//! Settings are layered with increasing precedence:
//!
//! 1. Hardcoded defaults
//! 2. A TOML file (`--config <path>`, else `config.toml` in the user config directory)
//! 3. Environment variables (`RECIPE_ALLOCATOR_*`)
//!
//! Command-line flags override the result where they overlap.
//!
//! ```toml
//! log_level = "debug"
//! log_file = "recipeallocator.log"
//! output_format = "json"
//!
//! [labels]
//! six = 6
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{AllocatorError, ErrorCode, Result};
use crate::labels::LabelVocabulary;

pub mod loader;

pub use loader::{default_config_path, load_config, ConfigLoader};

/// Valid log levels for configuration validation.
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

pub const ENV_LOG_LEVEL: &str = "RECIPE_ALLOCATOR_LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "RECIPE_ALLOCATOR_LOG_FILE";
pub const ENV_FORMAT: &str = "RECIPE_ALLOCATOR_FORMAT";

/// How `check` prints its report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = AllocatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(AllocatorError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                format!("unknown output format '{other}' (expected 'human' or 'json')"),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AllocatorConfig {
    /// Logging level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Append log lines to this file instead of stderr.
    pub log_file: Option<PathBuf>,

    pub output_format: OutputFormat,

    /// Extra label words, e.g. `six = 6`.
    pub labels: BTreeMap<String, u32>,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
            output_format: OutputFormat::default(),
            labels: BTreeMap::new(),
        }
    }
}

impl AllocatorConfig {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn merge_env_vars(&mut self) -> Result<()> {
        self.merge_env_with(|key| std::env::var(key).ok())
    }

    /// Overlay values from an environment lookup
    pub fn merge_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(log_level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = log_level;
        }

        if let Some(log_file) = lookup(ENV_LOG_FILE) {
            self.log_file = if log_file.is_empty() {
                None
            } else {
                Some(PathBuf::from(log_file))
            };
        }

        if let Some(format) = lookup(ENV_FORMAT) {
            self.output_format = format
                .parse()
                .map_err(|e: AllocatorError| e.with_context(ENV_FORMAT))?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(AllocatorError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                format!(
                    "invalid log level '{}' (expected one of: {})",
                    self.log_level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }
        self.vocabulary().map(|_| ())
    }

    /// Default words plus any configured under `[labels]`
    pub fn vocabulary(&self) -> Result<LabelVocabulary> {
        let mut vocabulary = LabelVocabulary::default();
        vocabulary
            .extend(&self.labels)
            .map_err(|e| e.with_context("in [labels]"))?;
        Ok(vocabulary)
    }
}

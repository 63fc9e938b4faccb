//! kumir-syntax configuration
//!
//! Settings are read from a TOML file; every field has a default so a
//! partial (or empty) file is valid.
//!
//! ```toml
//! [parser]
//! max_depth = 128
//! recover = true
//!
//! [log]
//! level = "debug"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::util::logger::{self, LogLevel};

/// Parser behaviour settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum syntactic nesting depth before the parse is aborted
    pub max_depth: usize,
    /// Resynchronise after an error instead of aborting the unit
    pub recover: bool,
    /// Keep informational notes (resolved ambiguities) in the outcome
    pub record_notes: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: 256,
            recover: true,
            record_notes: true,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LogConfig {
    /// Minimum level that is printed
    pub level: LogLevel,
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SyntaxConfig {
    /// Parser settings
    pub parser: ParserConfig,
    /// Logging settings
    pub log: LogConfig,
}

impl SyntaxConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Install the global logger at `log.level`; an installed logger is kept
    pub fn init_logging(&self) {
        logger::init_with_level(self.log.level);
    }

    /// Render configuration as TOML text
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }
}

/// Load configuration from a file.
/// Returns the default config if the file doesn't exist
pub fn load_config(path: &Path) -> Result<SyntaxConfig, ConfigError> {
    if !path.exists() {
        return Ok(SyntaxConfig::default());
    }

    let content = fs::read_to_string(path)?;
    SyntaxConfig::from_toml_str(&content)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Parse(toml::de::Error),
    #[error("Config serialize error: {0}")]
    Serialize(toml::ser::Error),
}

//! Configuration management for tagsense
//!
//! Configuration is read from a TOML file; every field has a default, so a
//! missing file or a partial one is fine. Command-line flags override what
//! the file says.
//!
//! ```toml
//! [schemas]
//! default = "html5"
//! directory = "/usr/share/tagsense/schemas"
//!
//! [[schemas.catalog]]
//! name = "docbook"
//! fpi = "-//OASIS//DTD DocBook XML V4.5//EN"
//! path = "/usr/share/tagsense/docbook.toml"
//!
//! [parser]
//! checkpoint_interval = 4096
//!
//! [completion]
//! misc_begin_tags = true
//! suggest_doctype = true
//!
//! [logging]
//! level = "warn"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::parser::{DEFAULT_CHECKPOINT_INTERVAL, DEFAULT_VOID_ELEMENTS, StateMachine};
use crate::schema::DEFAULT_SCHEMA_NAME;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Schema registry configuration
    #[serde(default)]
    pub schemas: SchemasConfig,

    /// Parser configuration
    #[serde(default)]
    pub parser: ParserConfig,

    /// Completion configuration
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where schemas come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemasConfig {
    /// Schema used when the doctype is missing or unknown
    #[serde(default = "default_schema")]
    pub default: String,

    /// Register the built-in HTML schemas
    #[serde(default = "default_builtin")]
    pub builtin: bool,

    /// Directory scanned for `*.toml` schema files
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Read every catalog file at startup instead of on first use
    #[serde(default)]
    pub preload: bool,

    /// Schema files registered up front and read on first use
    #[serde(default)]
    pub catalog: Vec<SchemaFileEntry>,
}

/// A catalog entry: what a schema file answers to and where it lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaFileEntry {
    /// Unique schema name
    pub name: String,

    /// Doctype public identifier
    #[serde(default)]
    pub fpi: Option<String>,

    /// Declaration offered in doctype completions
    #[serde(default)]
    pub doctype: Option<String>,

    /// Path to the TOML schema file
    pub path: PathBuf,
}

/// Parser tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Bytes between parse checkpoints
    #[serde(default = "default_checkpoint_interval")]
    pub checkpoint_interval: usize,

    /// Elements that never take content
    #[serde(default = "default_void_elements")]
    pub void_elements: Vec<String>,
}

/// Extra candidates offered next to schema data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Offer `!--` and `![CDATA[` with element completions
    #[serde(default = "default_true")]
    pub misc_begin_tags: bool,

    /// Offer `!DOCTYPE` while the document has no doctype
    #[serde(default = "default_true")]
    pub suggest_doctype: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn default_schema() -> String {
    DEFAULT_SCHEMA_NAME.to_string()
}

fn default_builtin() -> bool {
    true
}

fn default_checkpoint_interval() -> usize {
    DEFAULT_CHECKPOINT_INTERVAL
}

fn default_void_elements() -> Vec<String> {
    DEFAULT_VOID_ELEMENTS.iter().map(|e| e.to_string()).collect()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    false
}

impl Default for SchemasConfig {
    fn default() -> Self {
        Self {
            default: default_schema(),
            builtin: default_builtin(),
            directory: None,
            preload: false,
            catalog: Vec::new(),
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            checkpoint_interval: default_checkpoint_interval(),
            void_elements: default_void_elements(),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            misc_begin_tags: default_true(),
            suggest_doctype: default_true(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_log_timestamps(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file (TOML format)
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration file at the default path, or defaults if
    /// there is none
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Get the default configuration file path
    ///
    /// # Returns
    /// * `PathBuf` - `<config dir>/tagsense/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tagsense")
            .join("config.toml")
    }

    /// Save configuration to a file
    ///
    /// # Arguments
    /// * `path` - Path where to save the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, error otherwise
    pub fn validate(&self) -> Result<()> {
        if self.schemas.default.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "schemas.default".to_string(),
                value: self.schemas.default.clone(),
            }
            .into());
        }

        if self.parser.checkpoint_interval == 0 {
            return Err(ConfigError::InvalidValue {
                field: "parser.checkpoint_interval".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        if let Some(entry) = self.schemas.catalog.iter().find(|e| e.name.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "schemas.catalog.name".to_string(),
                value: entry.path.display().to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl ParserConfig {
    /// State machine honouring the configured void elements
    pub fn state_machine(&self) -> StateMachine {
        StateMachine::with_void_elements(&self.void_elements)
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TagsenseError;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("tagsense-config-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.schemas.default, "html5");
        assert!(config.schemas.builtin);
        assert_eq!(config.parser.checkpoint_interval, 4096);
        assert!(config.parser.void_elements.contains(&"br".to_string()));
        assert!(config.completion.misc_begin_tags);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [parser]
            checkpoint_interval = 128

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.parser.checkpoint_interval, 128);
        assert_eq!(config.parser.void_elements.len(), DEFAULT_VOID_ELEMENTS.len());
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.schemas, SchemasConfig::default());
    }

    #[test]
    fn test_catalog_entries() {
        let config: Config = toml::from_str(
            r#"
            [schemas]
            default = "docbook"
            builtin = false

            [[schemas.catalog]]
            name = "docbook"
            fpi = "-//OASIS//DTD DocBook XML V4.5//EN"
            path = "docbook.toml"
            "#,
        )
        .unwrap();
        assert!(!config.schemas.builtin);
        assert_eq!(config.schemas.catalog[0].path, PathBuf::from("docbook.toml"));
        assert_eq!(config.schemas.catalog[0].doctype, None);
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut config = Config::default();
        config.parser.checkpoint_interval = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            TagsenseError::Config(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let path = temp_file("saved.toml");
        let mut config = Config::default();
        config.completion.suggest_doctype = false;
        config.schemas.directory = Some(PathBuf::from("/tmp/schemas"));
        config.save(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(temp_file("missing.toml")).unwrap_err();
        assert!(matches!(err, TagsenseError::Config(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_invalid_file() {
        let path = temp_file("invalid.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[parser]\ncheckpoint_interval = \"big\"").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, TagsenseError::Config(ConfigError::InvalidFormat(_))));
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Debug.to_tracing_level(), tracing::Level::DEBUG);
        assert_eq!(LogLevel::Error.to_tracing_level(), tracing::Level::ERROR);
    }
}

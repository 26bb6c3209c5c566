use std::{fmt, io};

/// Crate-wide `Result` type using [`TagsenseError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, TagsenseError>;

/// Top-level error type for tagsense operations.
#[derive(Debug)]
pub enum TagsenseError {
    /// Configuration errors.
    Config(ConfigError),

    /// Schema loading errors.
    Schema(SchemaError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/// Schema-specific errors.
#[derive(Debug)]
pub enum SchemaError {
    /// Schema file not found.
    FileNotFound(String),

    /// Schema file could not be parsed.
    InvalidFormat { path: String, message: String },

    /// Two schemas claim the same name or public identifier.
    Duplicate(String),

    /// The configured default schema is not registered.
    UnknownDefault(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for TagsenseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagsenseError::Config(e) => write!(f, "Configuration error: {e}"),
            TagsenseError::Schema(e) => write!(f, "Schema error: {e}"),
            TagsenseError::Io(e) => write!(f, "I/O error: {e}"),
            TagsenseError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::FileNotFound(path) => write!(f, "Schema file not found: {path}"),
            SchemaError::InvalidFormat { path, message } => {
                write!(f, "Invalid schema file {path}: {message}")
            }
            SchemaError::Duplicate(key) => write!(f, "Schema registered twice: {key}"),
            SchemaError::UnknownDefault(name) => {
                write!(f, "Default schema '{name}' is not registered")
            }
        }
    }
}

impl std::error::Error for TagsenseError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for SchemaError {}

/* ========================= Conversions to TagsenseError ========================= */

impl From<io::Error> for TagsenseError {
    fn from(err: io::Error) -> Self {
        TagsenseError::Io(err)
    }
}

impl From<ConfigError> for TagsenseError {
    fn from(err: ConfigError) -> Self {
        TagsenseError::Config(err)
    }
}

impl From<SchemaError> for TagsenseError {
    fn from(err: SchemaError) -> Self {
        TagsenseError::Schema(err)
    }
}

impl From<String> for TagsenseError {
    fn from(msg: String) -> Self {
        TagsenseError::Generic(msg)
    }
}

impl From<&str> for TagsenseError {
    fn from(msg: &str) -> Self {
        TagsenseError::Generic(msg.to_owned())
    }
}

//! Error handling for tagsense.
//!
//! The completion core never surfaces errors to its host: malformed markup,
//! schema misses, cancellation and a misconfigured registry all degrade to
//! empty results. The types here cover the edges that can genuinely fail:
//! - Loading and parsing configuration files
//! - Loading and parsing schema files
//! - Plain I/O from the command-line host
//!
//! # Example
//!
//! ```rust,no_run
//! use tagsense::error::{Result, TagsenseError};
//! use tagsense::config::Config;
//!
//! fn load() -> Result<Config> {
//!     let config = Config::from_file("tagsense.toml")?;
//!     config.validate()?;
//!     Ok(config)
//! }
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{ConfigError, Result, SchemaError, TagsenseError};

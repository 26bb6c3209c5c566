//! tagsense library
//!
//! Incremental markup parsing and schema-driven completion for editors.
//! The parser keeps a live picture of the document as it is typed; the
//! completion side turns that picture into the elements, attributes and
//! values that are valid at the cursor.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `parser`: Incremental tag/attribute state machine
//! - `schema`: Schemas, schema files and the shared registry
//! - `completion`: Doctype resolution and completion queries
//! - `session`: Per-document state tying the above together
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tagsense::{Config, EditorSession, SchemaRegistry};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = Arc::new(SchemaRegistry::builtin());
//!     let mut session = EditorSession::new(registry, &Config::default());
//!
//!     let text = "<html><body><p cl";
//!     session.on_edit(text, text.len());
//!
//!     let token = CancellationToken::new();
//!     if let Some(candidates) = session.complete(&token).await {
//!         for candidate in &candidates {
//!             println!("{} ({})", candidate.display_text, candidate.category);
//!         }
//!     }
//! }
//! ```

pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod parser;
pub mod schema;
pub mod session;

// Re-export commonly used types
pub use completion::{Candidate, CandidateCategory, CandidateList, CompletionEngine};
pub use config::Config;
pub use error::{Result, TagsenseError};
pub use parser::{CursorContext, DocType, ParseContext, StateMachine};
pub use schema::{Schema, SchemaRegistry};
pub use session::EditorSession;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}

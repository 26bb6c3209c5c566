//! Markup schemas and the registry that holds them
//!
//! - **provider**: the completion-data capability every schema owns
//! - **table**: table-driven definitions and their provider
//! - **builtin**: the HTML schemas shipped with the crate
//! - **file**: TOML schema files, read lazily
//! - **registry**: shared, atomically reloadable lookup by name or public identifier

use std::fmt;
use std::sync::Arc;

pub mod builtin;
pub mod file;
pub mod provider;
pub mod registry;
pub mod table;

pub use builtin::{DEFAULT_SCHEMA_NAME, builtin_definitions};
pub use file::FileProvider;
pub use provider::CompletionProvider;
pub use registry::{RegistryBuilder, RegistrySnapshot, SchemaRegistry};
pub use table::{AttributeDefinition, ElementDefinition, SchemaDefinition, TableProvider};

/// A named markup schema. Immutable once registered.
#[derive(Clone)]
pub struct Schema {
    name: String,
    fpi: Option<String>,
    doctype: Option<String>,
    provider: Arc<dyn CompletionProvider>,
}

impl Schema {
    /// Create a schema around a provider
    pub fn new(
        name: impl Into<String>,
        fpi: Option<String>,
        doctype: Option<String>,
        provider: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            name: name.into(),
            fpi: fpi.filter(|f| !f.is_empty()),
            doctype,
            provider,
        }
    }

    /// Create a table-backed schema from a definition
    pub fn from_definition(definition: SchemaDefinition) -> Self {
        let name = definition.name.clone();
        let fpi = definition.fpi.clone();
        let doctype = definition.doctype.clone();
        Self::new(name, fpi, doctype, Arc::new(TableProvider::new(definition)))
    }

    /// Unique schema name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Doctype public identifier this schema answers to
    pub fn fpi(&self) -> Option<&str> {
        self.fpi.as_deref()
    }

    /// Full doctype declaration for doctype completions
    pub fn doctype(&self) -> Option<&str> {
        self.doctype.as_deref()
    }

    /// Completion data for this schema
    pub fn provider(&self) -> &Arc<dyn CompletionProvider> {
        &self.provider
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("fpi", &self.fpi)
            .field("doctype", &self.doctype)
            .finish_non_exhaustive()
    }
}

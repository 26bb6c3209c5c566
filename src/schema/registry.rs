//! Schema registry
//!
//! The registry is built once, shared as `Arc<SchemaRegistry>` by every
//! editor session, and only changes through [`SchemaRegistry::reload`].
//! Readers take the whole current [`RegistrySnapshot`], so a reload is never
//! observed half applied.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use futures::future::join_all;
use tracing::{debug, info, warn};

use super::builtin::{DEFAULT_SCHEMA_NAME, builtin_definitions};
use super::file::{FileProvider, load_definition, scan_directory};
use super::Schema;
use crate::completion::{Candidate, CandidateCategory};
use crate::config::SchemasConfig;
use crate::error::{Result, SchemaError};

/// An immutable set of schemas indexed by name and public identifier
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    schemas: Vec<Arc<Schema>>,
    by_name: HashMap<String, usize>,
    by_fpi: HashMap<String, usize>,
    default: Option<usize>,
}

impl RegistrySnapshot {
    /// Schema registered for a public identifier (exact, case-sensitive)
    pub fn get(&self, fpi: &str) -> Option<Arc<Schema>> {
        self.by_fpi.get(fpi).map(|&i| self.schemas[i].clone())
    }

    /// Schema registered under `name`
    pub fn by_name(&self, name: &str) -> Option<Arc<Schema>> {
        self.by_name.get(name).map(|&i| self.schemas[i].clone())
    }

    /// The fallback schema, if one is configured
    pub fn default_schema(&self) -> Option<Arc<Schema>> {
        self.default.map(|i| self.schemas[i].clone())
    }

    /// All schemas in registration order
    pub fn schemas(&self) -> &[Arc<Schema>] {
        &self.schemas
    }

    /// Number of schemas
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether no schema is registered
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Collects schemas and validates them into a [`RegistrySnapshot`]
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    schemas: Vec<Schema>,
    default: Option<String>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema
    pub fn add(mut self, schema: Schema) -> Self {
        self.schemas.push(schema);
        self
    }

    /// Name the schema used when no doctype matches
    pub fn default_schema(mut self, name: impl Into<String>) -> Self {
        self.default = Some(name.into());
        self
    }

    /// Index the schemas.
    ///
    /// # Returns
    /// * `Err(SchemaError::Duplicate)` - A name or public identifier is taken twice
    /// * `Err(SchemaError::UnknownDefault)` - The default names no registered schema
    pub fn build(self) -> Result<RegistrySnapshot> {
        let mut snapshot = RegistrySnapshot::default();

        for schema in self.schemas {
            let index = snapshot.schemas.len();
            if snapshot
                .by_name
                .insert(schema.name().to_string(), index)
                .is_some()
            {
                return Err(SchemaError::Duplicate(schema.name().to_string()).into());
            }
            if let Some(fpi) = schema.fpi() {
                if snapshot.by_fpi.insert(fpi.to_string(), index).is_some() {
                    return Err(SchemaError::Duplicate(fpi.to_string()).into());
                }
            }
            snapshot.schemas.push(Arc::new(schema));
        }

        if let Some(name) = self.default {
            match snapshot.by_name.get(&name) {
                Some(&index) => snapshot.default = Some(index),
                None => return Err(SchemaError::UnknownDefault(name).into()),
            }
        }

        Ok(snapshot)
    }
}

/// Process-wide schema lookup, safe to share across sessions and threads
#[derive(Debug)]
pub struct SchemaRegistry {
    snapshot: ArcSwap<RegistrySnapshot>,
}

impl SchemaRegistry {
    /// Create a registry serving `snapshot`
    pub fn new(snapshot: RegistrySnapshot) -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(snapshot),
        }
    }

    /// A registry with no schemas and no default
    pub fn empty() -> Self {
        Self::new(RegistrySnapshot::default())
    }

    /// The built-in HTML schemas with HTML5 as default
    pub fn builtin() -> Self {
        let builder = builtin_definitions()
            .into_iter()
            .fold(RegistryBuilder::new(), |b, d| b.add(Schema::from_definition(d)));

        match builder.default_schema(DEFAULT_SCHEMA_NAME).build() {
            Ok(snapshot) => Self::new(snapshot),
            Err(e) => {
                warn!("Built-in schemas failed to register: {}", e);
                Self::empty()
            }
        }
    }

    /// Build a registry from configuration.
    ///
    /// Built-in schemas come first (unless disabled), then every `.toml` file
    /// of the schema directory, then catalog entries. Directory files are read
    /// now because their public identifier lives inside them; a file that
    /// fails to load is skipped with a warning. Catalog entries are read on
    /// first query.
    ///
    /// # Arguments
    /// * `config` - The `[schemas]` configuration section
    ///
    /// # Returns
    /// * `Result<Self>` - The registry, or an error if names clash or the
    ///   default is unknown
    pub async fn from_config(config: &SchemasConfig) -> Result<Self> {
        let mut builder = RegistryBuilder::new();

        if config.builtin {
            for definition in builtin_definitions() {
                builder = builder.add(Schema::from_definition(definition));
            }
        }

        if let Some(dir) = &config.directory {
            for path in scan_directory(dir).await? {
                match load_definition(&path).await {
                    Ok(definition) => {
                        let name = definition.name.clone();
                        let fpi = definition.fpi.clone();
                        let doctype = definition.doctype.clone();
                        let provider = FileProvider::loaded(&path, definition);
                        builder = builder.add(Schema::new(name, fpi, doctype, Arc::new(provider)));
                    }
                    Err(e) => warn!("Skipping schema file {}: {}", path.display(), e),
                }
            }
        }

        for entry in &config.catalog {
            let provider = FileProvider::new(&entry.path);
            builder = builder.add(Schema::new(
                entry.name.clone(),
                entry.fpi.clone(),
                entry.doctype.clone(),
                Arc::new(provider),
            ));
        }

        let snapshot = builder.default_schema(config.default.clone()).build()?;
        info!("Registered {} schemas", snapshot.len());

        let registry = Self::new(snapshot);
        if config.preload {
            registry.preload().await;
        }
        Ok(registry)
    }

    /// The current snapshot. Holding it keeps every schema in it alive.
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.snapshot.load_full()
    }

    /// Schema registered for a public identifier
    pub fn get(&self, fpi: &str) -> Option<Arc<Schema>> {
        self.snapshot.load().get(fpi)
    }

    /// Schema registered under `name`
    pub fn by_name(&self, name: &str) -> Option<Arc<Schema>> {
        self.snapshot.load().by_name(name)
    }

    /// The fallback schema
    pub fn default_schema(&self) -> Option<Arc<Schema>> {
        self.snapshot.load().default_schema()
    }

    /// All schemas in registration order
    pub fn schemas(&self) -> Vec<Arc<Schema>> {
        self.snapshot.load().schemas().to_vec()
    }

    /// Replace every schema at once. Readers holding the previous snapshot
    /// keep using it.
    pub fn reload(&self, snapshot: RegistrySnapshot) {
        info!("Reloading schema registry ({} schemas)", snapshot.len());
        self.snapshot.store(Arc::new(snapshot));
    }

    /// Load every lazily held schema now. Failures are logged and the
    /// affected schemas retry on their next query.
    pub async fn preload(&self) {
        let snapshot = self.snapshot();
        let results = join_all(snapshot.schemas().iter().map(|schema| async move {
            (schema.name(), schema.provider().preload().await)
        }))
        .await;

        for (name, result) in results {
            if let Err(e) = result {
                debug!("Could not preload schema '{}': {}", name, e);
            }
        }
    }

    /// A doctype candidate for every schema that declares one
    pub fn doctype_completion_data(&self) -> Vec<Candidate> {
        self.snapshot
            .load()
            .schemas()
            .iter()
            .filter_map(|schema| {
                schema
                    .doctype()
                    .map(|dt| Candidate::new(dt, CandidateCategory::DocType, schema.name()))
            })
            .collect()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchemaFileEntry;
    use crate::schema::file::tests::{TINY_SCHEMA, temp_dir};
    use crate::schema::{SchemaDefinition, TableProvider};

    fn named(name: &str, fpi: Option<&str>) -> Schema {
        Schema::from_definition(SchemaDefinition {
            name: name.to_string(),
            fpi: fpi.map(str::to_string),
            doctype: Some(format!("<!DOCTYPE {name}>")),
            ..SchemaDefinition::default()
        })
    }

    #[test]
    fn test_builtin_lookup() {
        let registry = SchemaRegistry::builtin();
        assert_eq!(registry.default_schema().unwrap().name(), "html5");
        assert_eq!(
            registry
                .get("-//W3C//DTD XHTML 1.0 Strict//EN")
                .unwrap()
                .name(),
            "xhtml1-strict"
        );
        assert!(registry.get("-//w3c//dtd xhtml 1.0 strict//en").is_none());
        assert!(registry.by_name("html401-transitional").is_some());
    }

    #[test]
    fn test_builder_rejects_duplicates() {
        let err = RegistryBuilder::new()
            .add(named("a", Some("X")))
            .add(named("a", Some("Y")))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("registered twice: a"));

        let err = RegistryBuilder::new()
            .add(named("a", Some("X")))
            .add(named("b", Some("X")))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("registered twice: X"));
    }

    #[test]
    fn test_builder_rejects_unknown_default() {
        let err = RegistryBuilder::new()
            .add(named("a", None))
            .default_schema("b")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::TagsenseError::Schema(SchemaError::UnknownDefault(_))
        ));
    }

    #[test]
    fn test_empty_registry_has_no_default() {
        let registry = SchemaRegistry::empty();
        assert!(registry.default_schema().is_none());
        assert!(registry.doctype_completion_data().is_empty());
    }

    #[test]
    fn test_reload_is_atomic_for_readers() {
        let registry = SchemaRegistry::new(
            RegistryBuilder::new()
                .add(named("old", Some("OLD")))
                .default_schema("old")
                .build()
                .unwrap(),
        );
        let before = registry.snapshot();

        registry.reload(
            RegistryBuilder::new()
                .add(named("new", Some("NEW")))
                .default_schema("new")
                .build()
                .unwrap(),
        );

        assert_eq!(before.default_schema().unwrap().name(), "old");
        assert!(before.get("OLD").is_some());
        assert!(before.get("NEW").is_none());

        assert_eq!(registry.default_schema().unwrap().name(), "new");
        assert!(registry.get("OLD").is_none());
    }

    #[test]
    fn test_doctype_completion_data() {
        let candidates = SchemaRegistry::builtin().doctype_completion_data();
        assert_eq!(candidates.len(), 5);
        assert_eq!(candidates[0].display_text, "<!DOCTYPE html>");
        assert_eq!(candidates[0].category, CandidateCategory::DocType);
        assert_eq!(candidates[0].description, "html5");
    }

    #[tokio::test]
    async fn test_from_config_directory_and_catalog() {
        let dir = temp_dir("registry");
        std::fs::write(dir.join("tiny.toml"), TINY_SCHEMA).unwrap();
        std::fs::write(dir.join("broken.toml"), "elements = 3").unwrap();

        let catalog_path = temp_dir("catalog").join("late.toml");
        let config = SchemasConfig {
            default: "html5".to_string(),
            builtin: true,
            directory: Some(dir),
            catalog: vec![SchemaFileEntry {
                name: "late".to_string(),
                fpi: Some("-//LATE//EN".to_string()),
                doctype: None,
                path: catalog_path.clone(),
            }],
            preload: false,
        };

        let registry = SchemaRegistry::from_config(&config).await.unwrap();
        assert_eq!(registry.schemas().len(), 7);
        assert_eq!(registry.get("-//TINY//EN").unwrap().name(), "tiny");

        let late = registry.get("-//LATE//EN").unwrap();
        assert!(late.provider().element_completion_data().await.is_err());

        std::fs::write(&catalog_path, TINY_SCHEMA.replace("tiny", "late")).unwrap();
        let elements = late.provider().element_completion_data().await.unwrap();
        assert_eq!(elements[0].display_text, "doc");
    }

    #[tokio::test]
    async fn test_from_config_without_builtins_needs_default() {
        let config = SchemasConfig {
            builtin: false,
            ..SchemasConfig::default()
        };
        assert!(SchemaRegistry::from_config(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_preload_tolerates_failures() {
        let missing = Schema::new(
            "missing",
            None,
            None,
            Arc::new(FileProvider::new(temp_dir("preload").join("none.toml"))),
        );
        let table = Schema::new(
            "table",
            None,
            None,
            Arc::new(TableProvider::new(SchemaDefinition::default())),
        );
        let registry = SchemaRegistry::new(
            RegistryBuilder::new().add(missing).add(table).build().unwrap(),
        );
        registry.preload().await;
        assert_eq!(registry.schemas().len(), 2);
    }
}

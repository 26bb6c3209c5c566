//! Document type resolution
//!
//! Maps the document's doctype declaration to a registered schema. The
//! answer is cached until the session reports a doctype change.

use std::sync::Arc;

use tracing::debug;

use crate::parser::DocType;
use crate::schema::{Schema, SchemaRegistry};

/// Resolves and caches the active schema of one document
#[derive(Debug)]
pub struct DocTypeResolver {
    registry: Arc<SchemaRegistry>,
    cached: Option<Option<Arc<Schema>>>,
}

impl DocTypeResolver {
    /// Create a resolver with nothing cached
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self {
            registry,
            cached: None,
        }
    }

    /// The registry lookups go to
    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    /// Schema for `doctype`, looked up at most once between invalidations.
    ///
    /// Without a doctype, or with an empty public identifier, the registry
    /// default is used. An unknown identifier also falls back to the default.
    /// `None` means the registry has no default to fall back on.
    pub fn resolve_schema(&mut self, doctype: Option<&DocType>) -> Option<Arc<Schema>> {
        if let Some(cached) = &self.cached {
            return cached.clone();
        }

        let resolved = self.lookup(doctype);
        self.cached = Some(resolved.clone());
        resolved
    }

    /// Forget the cached schema; the next resolution looks it up again
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Whether a resolution is cached
    pub fn is_resolved(&self) -> bool {
        self.cached.is_some()
    }

    fn lookup(&self, doctype: Option<&DocType>) -> Option<Arc<Schema>> {
        let Some(fpi) = doctype.and_then(DocType::fpi) else {
            debug!("no doctype, using default schema");
            return self.registry.default_schema();
        };

        match self.registry.get(fpi) {
            Some(schema) => {
                debug!("using doctype {} ({})", fpi, schema.name());
                Some(schema)
            }
            None => {
                debug!(
                    "could not find schema for doctype '{}', falling back to default",
                    fpi
                );
                self.registry.default_schema()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{RegistryBuilder, SchemaDefinition};

    const STRICT: &str = "-//W3C//DTD XHTML 1.0 Strict//EN";

    fn resolver() -> DocTypeResolver {
        DocTypeResolver::new(Arc::new(SchemaRegistry::builtin()))
    }

    fn doctype(fpi: &str) -> DocType {
        DocType {
            root_element: "html".to_string(),
            public_fpi: Some(fpi.to_string()),
            system_id: None,
        }
    }

    #[test]
    fn test_no_doctype_uses_default() {
        let mut resolver = resolver();
        assert_eq!(resolver.resolve_schema(None).unwrap().name(), "html5");
    }

    #[test]
    fn test_empty_fpi_uses_default() {
        let mut resolver = resolver();
        let schema = resolver.resolve_schema(Some(&doctype(""))).unwrap();
        assert_eq!(schema.name(), "html5");
    }

    #[test]
    fn test_known_fpi() {
        let mut resolver = resolver();
        let schema = resolver.resolve_schema(Some(&doctype(STRICT))).unwrap();
        assert_eq!(schema.name(), "xhtml1-strict");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut resolver = resolver();
        let schema = resolver
            .resolve_schema(Some(&doctype(&STRICT.to_lowercase())))
            .unwrap();
        assert_eq!(schema.name(), "html5");
    }

    #[test]
    fn test_result_is_memoized() {
        let mut resolver = resolver();
        let first = resolver.resolve_schema(Some(&doctype(STRICT))).unwrap();
        assert!(resolver.is_resolved());

        // The doctype argument is ignored until invalidation.
        let second = resolver.resolve_schema(None).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_invalidate_forces_fresh_lookup() {
        let registry = Arc::new(SchemaRegistry::builtin());
        let mut resolver = DocTypeResolver::new(registry.clone());
        let before = resolver.resolve_schema(None).unwrap();

        registry.reload(
            RegistryBuilder::new()
                .add(Schema::from_definition(SchemaDefinition {
                    name: "html5".to_string(),
                    ..SchemaDefinition::default()
                }))
                .default_schema("html5")
                .build()
                .unwrap(),
        );
        let cached = resolver.resolve_schema(None).unwrap();
        assert!(Arc::ptr_eq(&before, &cached));

        resolver.invalidate();
        assert!(!resolver.is_resolved());
        let after = resolver.resolve_schema(None).unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_empty_registry_resolves_to_none() {
        let mut resolver = DocTypeResolver::new(Arc::new(SchemaRegistry::empty()));
        assert!(resolver.resolve_schema(None).is_none());
        assert!(resolver.is_resolved());
    }
}

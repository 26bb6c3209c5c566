//! Schemas stored as TOML files
//!
//! [`FileProvider`] defers reading its file until the first completion query
//! (or an explicit preload) and keeps the parsed table for the rest of the
//! registry's lifetime.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use super::provider::CompletionProvider;
use super::table::{SchemaDefinition, TableProvider};
use crate::completion::Candidate;
use crate::error::{Result, SchemaError, TagsenseError};

/// File extension recognised when scanning a schema directory
pub const SCHEMA_FILE_EXTENSION: &str = "toml";

/// Read and parse a schema definition file
///
/// # Arguments
/// * `path` - Path to a TOML schema file
///
/// # Returns
/// * `Result<SchemaDefinition>` - Parsed definition or a `SchemaError`
pub async fn load_definition(path: &Path) -> Result<SchemaDefinition> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SchemaError::FileNotFound(path.display().to_string()).into(),
            _ => TagsenseError::Io(e),
        })?;

    let definition: SchemaDefinition =
        toml::from_str(&content).map_err(|e| SchemaError::InvalidFormat {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    debug!(
        "Loaded schema '{}' ({} elements) from {}",
        definition.name,
        definition.elements.len(),
        path.display()
    );
    Ok(definition)
}

/// Every schema file directly inside `dir`, sorted by path
pub async fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => SchemaError::FileNotFound(dir.display().to_string()).into(),
        _ => TagsenseError::Io(e),
    })?;

    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path
            .extension()
            .is_some_and(|ext| ext == SCHEMA_FILE_EXTENSION)
        {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Completion provider that loads its table from disk on first use
#[derive(Debug)]
pub struct FileProvider {
    path: PathBuf,
    table: OnceCell<TableProvider>,
}

impl FileProvider {
    /// Create a provider for `path`; nothing is read yet
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: OnceCell::new(),
        }
    }

    /// Create a provider around an already parsed definition
    pub fn loaded(path: impl Into<PathBuf>, definition: SchemaDefinition) -> Self {
        Self {
            path: path.into(),
            table: OnceCell::new_with(Some(TableProvider::new(definition))),
        }
    }

    /// Path of the schema file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file has been read
    pub fn is_loaded(&self) -> bool {
        self.table.initialized()
    }

    /// The parsed table, loading it if needed. A failed load is retried on
    /// the next call.
    async fn table(&self) -> Result<&TableProvider> {
        self.table
            .get_or_try_init(|| async {
                let definition = load_definition(&self.path).await?;
                Ok(TableProvider::new(definition))
            })
            .await
    }
}

#[async_trait]
impl CompletionProvider for FileProvider {
    async fn element_completion_data(&self) -> Result<Vec<Candidate>> {
        Ok(self.table().await?.elements())
    }

    async fn child_element_completion_data(&self, parent: &str) -> Result<Vec<Candidate>> {
        Ok(self.table().await?.child_elements(parent))
    }

    async fn attribute_completion_data(&self, element: &str) -> Result<Vec<Candidate>> {
        Ok(self.table().await?.attributes(element))
    }

    async fn attribute_value_completion_data(
        &self,
        element: &str,
        attribute: &str,
    ) -> Result<Vec<Candidate>> {
        Ok(self.table().await?.attribute_values(element, attribute))
    }

    async fn preload(&self) -> Result<()> {
        self.table().await.map(|_| ())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

    /// A fresh, empty directory under the system temp dir
    pub(crate) fn temp_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "tagsense-{}-{}-{}",
            label,
            std::process::id(),
            NEXT_DIR.fetch_add(1, Ordering::SeqCst)
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    pub(crate) const TINY_SCHEMA: &str = r#"
name = "tiny"
fpi = "-//TINY//EN"
doctype = "<!DOCTYPE doc PUBLIC \"-//TINY//EN\">"
top_level = ["doc"]

[[elements]]
name = "doc"
children = ["para"]

[[elements]]
name = "para"
description = "Paragraph"

[[elements.attributes]]
name = "align"
values = ["left", "right"]
"#;

    #[tokio::test]
    async fn test_lazy_load() {
        let dir = temp_dir("lazy");
        let path = dir.join("tiny.toml");
        std::fs::write(&path, TINY_SCHEMA).unwrap();

        let provider = FileProvider::new(&path);
        assert!(!provider.is_loaded());

        let elements = provider.element_completion_data().await.unwrap();
        assert!(provider.is_loaded());
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].display_text, "doc");

        let values = provider
            .attribute_value_completion_data("para", "align")
            .await
            .unwrap();
        assert_eq!(values.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let provider = FileProvider::new(temp_dir("missing").join("nope.toml"));
        let err = provider.element_completion_data().await.unwrap_err();
        assert!(matches!(err, TagsenseError::Schema(SchemaError::FileNotFound(_))));
        assert!(!provider.is_loaded());
    }

    #[tokio::test]
    async fn test_invalid_file() {
        let dir = temp_dir("invalid");
        let path = dir.join("broken.toml");
        std::fs::write(&path, "name = [").unwrap();

        let err = FileProvider::new(&path).preload().await.unwrap_err();
        assert!(matches!(
            err,
            TagsenseError::Schema(SchemaError::InvalidFormat { .. })
        ));
    }

    #[tokio::test]
    async fn test_failed_load_is_retried() {
        let dir = temp_dir("retry");
        let path = dir.join("late.toml");
        let provider = FileProvider::new(&path);
        tokio_test::assert_err!(provider.preload().await);

        std::fs::write(&path, TINY_SCHEMA).unwrap();
        tokio_test::assert_ok!(provider.preload().await);
        assert!(provider.is_loaded());
    }

    #[tokio::test]
    async fn test_scan_directory() {
        let dir = temp_dir("scan");
        std::fs::write(dir.join("b.toml"), TINY_SCHEMA).unwrap();
        std::fs::write(dir.join("a.toml"), TINY_SCHEMA).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let paths = scan_directory(&dir).await.unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.toml", "b.toml"]);
    }
}

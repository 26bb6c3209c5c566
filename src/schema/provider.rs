//! Completion data provider trait
//!
//! Each schema owns one provider. Queries may suspend (a file-backed provider
//! reads its data on first use) and may fail; the completion engine turns
//! failures into empty lists.

use async_trait::async_trait;

use crate::completion::Candidate;
use crate::error::Result;

/// Source of element, attribute and value completions for one schema
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Elements valid at the document root
    async fn element_completion_data(&self) -> Result<Vec<Candidate>>;

    /// Elements valid as children of `parent` (lowercase)
    async fn child_element_completion_data(&self, parent: &str) -> Result<Vec<Candidate>>;

    /// Attributes valid on `element` (lowercase)
    async fn attribute_completion_data(&self, element: &str) -> Result<Vec<Candidate>>;

    /// Enumerated values of `attribute` on `element`
    async fn attribute_value_completion_data(
        &self,
        element: &str,
        attribute: &str,
    ) -> Result<Vec<Candidate>>;

    /// Load any lazily held data ahead of the first query
    async fn preload(&self) -> Result<()> {
        Ok(())
    }
}

//! Completion engine - turns parse context into candidates
//!
//! Every entry point takes a [`CancellationToken`]. A cancelled request
//! yields `None`, never a partial list. Anything else that goes wrong (no
//! schema, a provider error) yields no schema candidates.

use std::collections::{HashMap, HashSet};
use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::candidate::{Candidate, CandidateCategory, CandidateList};
use crate::config::CompletionConfig;
use crate::error::Result;
use crate::schema::{Schema, SchemaRegistry};

/// Literal offered where a doctype may still be declared
pub const DOCTYPE_LITERAL: &str = "!DOCTYPE";

/// Begin tags offered alongside elements
const MISC_BEGIN_TAGS: &[(&str, &str)] = &[("!--", "Comment"), ("![CDATA[", "Character data")];

/// Schema-driven completion queries
#[derive(Debug, Clone, Default)]
pub struct CompletionEngine {
    config: CompletionConfig,
}

impl CompletionEngine {
    /// Create a completion engine
    ///
    /// # Arguments
    /// * `config` - Which extra literals to offer
    pub fn new(config: CompletionConfig) -> Self {
        Self { config }
    }

    /// Elements valid at the cursor.
    ///
    /// # Arguments
    /// * `schema` - The active schema, if any
    /// * `parent` - Nearest enclosing element; `None` at the root
    /// * `has_doctype` - Whether the document already declares a doctype
    /// * `token` - Cancels the request
    ///
    /// # Returns
    /// * `Option<CandidateList>` - Child elements of `parent` (or top-level
    ///   elements), then begin-tag literals; `None` if cancelled. The literals
    ///   are offered even when the schema query fails.
    pub async fn element_completions(
        &self,
        schema: Option<&Schema>,
        parent: Option<&str>,
        has_doctype: bool,
        token: &CancellationToken,
    ) -> Option<CandidateList> {
        let Some(schema) = schema else {
            return cancellable_empty(token);
        };

        let provider = schema.provider();
        let result = match parent {
            Some(parent) => {
                let parent = parent.to_lowercase();
                query(token, schema, provider.child_element_completion_data(&parent)).await?
            }
            None => query(token, schema, provider.element_completion_data()).await?,
        };
        // A failed schema query still leaves the literals
        let mut list = CandidateList::from(result.unwrap_or_default());
        if self.config.misc_begin_tags {
            list.extend(
                MISC_BEGIN_TAGS
                    .iter()
                    .map(|(text, description)| Candidate::literal(*text, *description)),
            );
        }
        if self.config.suggest_doctype && !has_doctype {
            list.push(Candidate::literal(DOCTYPE_LITERAL, "Document type"));
        }
        Some(list)
    }

    /// Attributes valid on `element` that the tag does not carry yet.
    ///
    /// Elements with a namespace prefix get no attribute completions.
    pub async fn attribute_completions(
        &self,
        schema: Option<&Schema>,
        element: &str,
        existing: &HashMap<String, String>,
        token: &CancellationToken,
    ) -> Option<CandidateList> {
        let Some(schema) = schema.filter(|_| !has_prefix(element)) else {
            return cancellable_empty(token);
        };

        let element = element.to_lowercase();
        let Ok(attributes) = query(
            token,
            schema,
            schema.provider().attribute_completion_data(&element),
        )
        .await?
        else {
            return Some(CandidateList::empty());
        };

        Some(
            attributes
                .into_iter()
                .filter(|a| !existing.contains_key(&a.display_text))
                .collect::<Vec<_>>()
                .into(),
        )
    }

    /// Enumerated values of `attribute` on `element`
    pub async fn attribute_value_completions(
        &self,
        schema: Option<&Schema>,
        element: &str,
        attribute: &str,
        token: &CancellationToken,
    ) -> Option<CandidateList> {
        let Some(schema) = schema.filter(|_| !has_prefix(element)) else {
            return cancellable_empty(token);
        };

        let values = query(
            token,
            schema,
            schema
                .provider()
                .attribute_value_completion_data(element, attribute),
        )
        .await?;
        Some(values.unwrap_or_default().into())
    }

    /// The doctype declarations of every registered schema
    pub async fn doctype_completions(
        &self,
        registry: &SchemaRegistry,
        token: &CancellationToken,
    ) -> Option<CandidateList> {
        if token.is_cancelled() {
            return None;
        }
        Some(registry.doctype_completion_data().into())
    }

    /// Names of the open elements, innermost first
    pub async fn closing_tag_completions(
        &self,
        stack: &[String],
        token: &CancellationToken,
    ) -> Option<CandidateList> {
        if token.is_cancelled() {
            return None;
        }

        let mut seen = HashSet::new();
        Some(
            stack
                .iter()
                .rev()
                .filter(|name| seen.insert(name.to_ascii_lowercase()))
                .map(|name| Candidate::new(name.as_str(), CandidateCategory::ClosingTag, ""))
                .collect::<Vec<_>>()
                .into(),
        )
    }
}

fn has_prefix(element: &str) -> bool {
    element.contains(':')
}

fn cancellable_empty(token: &CancellationToken) -> Option<CandidateList> {
    if token.is_cancelled() {
        None
    } else {
        Some(CandidateList::empty())
    }
}

/// Race a provider query against cancellation.
///
/// Returns `None` if the token fires first. A provider error is logged
/// here; callers drop the schema candidates.
async fn query<F>(
    token: &CancellationToken,
    schema: &Schema,
    fut: F,
) -> Option<Result<Vec<Candidate>>>
where
    F: Future<Output = Result<Vec<Candidate>>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => None,
        result = fut => {
            if let Err(e) = &result {
                debug!("Completion query on schema '{}' failed: {}", schema.name(), e);
            }
            Some(result)
        }
    }
}

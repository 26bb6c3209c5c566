//! Editor sessions
//!
//! One [`EditorSession`] per open document. It owns the document's parse
//! state and resolved schema and borrows the process-wide registry. Edits
//! and completion requests come from the same task, so nothing here locks.

use std::collections::HashMap;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::completion::{CandidateList, CompletionEngine, DocTypeResolver};
use crate::config::Config;
use crate::parser::{CursorContext, DocumentTracker, ParseContext, TrackerUpdate};
use crate::schema::{Schema, SchemaRegistry};

/// Parse state and completion for one open document
#[derive(Debug)]
pub struct EditorSession {
    tracker: DocumentTracker,
    resolver: DocTypeResolver,
    engine: CompletionEngine,
}

impl EditorSession {
    /// Create a session for an empty document
    ///
    /// # Arguments
    /// * `registry` - Shared schema registry
    /// * `config` - Parser and completion settings
    pub fn new(registry: Arc<SchemaRegistry>, config: &Config) -> Self {
        Self {
            tracker: DocumentTracker::new(
                config.parser.state_machine(),
                config.parser.checkpoint_interval,
            ),
            resolver: DocTypeResolver::new(registry),
            engine: CompletionEngine::new(config.completion.clone()),
        }
    }

    /// Bring the parse state up to date with `text` up to byte `cursor`.
    ///
    /// Drops the resolved schema if the doctype declaration changed.
    pub fn on_edit(&mut self, text: &str, cursor: usize) -> TrackerUpdate {
        let update = self.tracker.update(text, cursor);
        self.after_update(update)
    }

    /// Feed characters typed at the end of the document
    pub fn append(&mut self, chunk: &str) -> TrackerUpdate {
        let update = self.tracker.append(chunk);
        self.after_update(update)
    }

    fn after_update(&mut self, update: TrackerUpdate) -> TrackerUpdate {
        if update.doctype_changed && self.resolver.is_resolved() {
            debug!("Doctype changed, dropping resolved schema");
            self.resolver.invalidate();
        }
        update
    }

    /// The live parse context
    pub fn context(&self) -> &ParseContext {
        self.tracker.context()
    }

    /// What kind of position the cursor is at
    pub fn cursor_context(&self) -> CursorContext {
        self.tracker.context().cursor_context()
    }

    /// The active schema, resolved on first use after a doctype change
    pub fn schema(&mut self) -> Option<Arc<Schema>> {
        let doctype = self.tracker.context().doctype();
        self.resolver.resolve_schema(doctype)
    }

    /// Elements valid under the nearest open element
    pub async fn element_completions(&mut self, token: &CancellationToken) -> Option<CandidateList> {
        let schema = self.schema();
        let ctx = self.tracker.context();
        self.engine
            .element_completions(
                schema.as_deref(),
                ctx.parent_element(),
                ctx.doctype().is_some(),
                token,
            )
            .await
    }

    /// Attributes of `element` not already in `existing`.
    ///
    /// Empty unless the cursor is inside an opening tag.
    pub async fn attribute_completions(
        &mut self,
        element: &str,
        existing: &HashMap<String, String>,
        token: &CancellationToken,
    ) -> Option<CandidateList> {
        if !self.in_opening_tag() {
            return (!token.is_cancelled()).then(CandidateList::empty);
        }
        let schema = self.schema();
        self.engine
            .attribute_completions(schema.as_deref(), element, existing, token)
            .await
    }

    /// Enumerated values of `attribute` on `element`.
    ///
    /// Empty unless the cursor is inside an opening tag.
    pub async fn attribute_value_completions(
        &mut self,
        element: &str,
        attribute: &str,
        token: &CancellationToken,
    ) -> Option<CandidateList> {
        if !self.in_opening_tag() {
            return (!token.is_cancelled()).then(CandidateList::empty);
        }
        let schema = self.schema();
        self.engine
            .attribute_value_completions(schema.as_deref(), element, attribute, token)
            .await
    }

    fn in_opening_tag(&self) -> bool {
        self.tracker.context().state().is_in_opening_tag()
    }

    /// Doctype declarations of every registered schema
    pub async fn doctype_completions(&self, token: &CancellationToken) -> Option<CandidateList> {
        self.engine
            .doctype_completions(self.resolver.registry(), token)
            .await
    }

    /// Open elements, innermost first
    pub async fn closing_tag_completions(
        &self,
        token: &CancellationToken,
    ) -> Option<CandidateList> {
        self.engine
            .closing_tag_completions(self.tracker.context().stack(), token)
            .await
    }

    /// Completions for whatever the cursor is at.
    ///
    /// Returns `None` if `token` is cancelled first.
    pub async fn complete(&mut self, token: &CancellationToken) -> Option<CandidateList> {
        match self.cursor_context() {
            CursorContext::Text { .. } | CursorContext::TagOpen { .. } => {
                self.element_completions(token).await
            }
            CursorContext::Attribute {
                element, existing, ..
            } => self.attribute_completions(&element, &existing, token).await,
            CursorContext::AttributeValue {
                element, attribute, ..
            } => {
                self.attribute_value_completions(&element, &attribute, token)
                    .await
            }
            CursorContext::ClosingTag { .. } => self.closing_tag_completions(token).await,
            CursorContext::DocType => self.doctype_completions(token).await,
            CursorContext::Comment | CursorContext::CData => {
                (!token.is_cancelled()).then(CandidateList::empty)
            }
        }
    }

    /// Mark the end of the document, closing every open element
    pub fn finish(&mut self) {
        self.tracker.finish();
    }

    /// Tear the parse state down, as when the editor closes
    pub fn close(&mut self) {
        self.tracker.reset();
        self.resolver.invalidate();
    }
}

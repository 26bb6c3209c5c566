//! Document tracker with parse checkpoints
//!
//! Appending text only feeds the new characters. Any other edit rolls back to
//! the newest checkpoint at or before the first changed byte and feeds from
//! there, so the cost of an edit is bounded by the checkpoint interval plus
//! the distance to the cursor.

use tracing::trace;

use super::context::ParseContext;
use super::machine::StateMachine;

/// Default distance, in bytes, between parse checkpoints
pub const DEFAULT_CHECKPOINT_INTERVAL: usize = 4096;

/// Result of bringing the tracker up to date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackerUpdate {
    /// Byte offset parsing resumed from
    pub resumed_at: usize,
    /// Bytes fed to the state machine
    pub fed: usize,
    /// Whether the doctype declaration differs from the one before the update
    pub doctype_changed: bool,
}

/// Keeps a [`ParseContext`] in sync with an edited document
#[derive(Debug, Clone)]
pub struct DocumentTracker {
    machine: StateMachine,
    context: ParseContext,
    consumed_text: String,
    checkpoints: Vec<ParseContext>,
    interval: usize,
}

impl DocumentTracker {
    /// Create a tracker for an empty document
    ///
    /// # Arguments
    /// * `machine` - State machine used for feeding
    /// * `interval` - Bytes between checkpoints; zero is treated as one
    pub fn new(machine: StateMachine, interval: usize) -> Self {
        Self {
            machine,
            context: ParseContext::new(),
            consumed_text: String::new(),
            checkpoints: Vec::new(),
            interval: interval.max(1),
        }
    }

    /// The live parse context
    pub fn context(&self) -> &ParseContext {
        &self.context
    }

    /// The text consumed so far
    pub fn consumed_text(&self) -> &str {
        &self.consumed_text
    }

    /// Number of checkpoints currently held
    pub fn checkpoint_count(&self) -> usize {
        self.checkpoints.len()
    }

    /// Append characters at the end of the consumed text
    pub fn append(&mut self, chunk: &str) -> TrackerUpdate {
        let resumed_at = self.context.consumed();
        let before = self.context.doctype().cloned();
        self.feed(chunk);
        let doctype_changed = self.context.doctype() != before.as_ref();
        TrackerUpdate {
            resumed_at,
            fed: chunk.len(),
            doctype_changed,
        }
    }

    /// Bring the context up to date with `text`, parsed up to `cursor`.
    ///
    /// `cursor` is a byte offset; it is clamped to the text length and moved
    /// back to the nearest character boundary.
    pub fn update(&mut self, text: &str, cursor: usize) -> TrackerUpdate {
        let target = &text[..floor_char_boundary(text, cursor)];
        let common = common_prefix_len(&self.consumed_text, target);
        let before = self.context.doctype().cloned();

        if common < self.consumed_text.len() {
            self.rollback(common);
        }

        let resumed_at = self.context.consumed();
        let pending = &target[resumed_at..];
        self.feed(pending);
        let doctype_changed = self.context.doctype() != before.as_ref();

        TrackerUpdate {
            resumed_at,
            fed: pending.len(),
            doctype_changed,
        }
    }

    /// Mark the end of the document, closing every open element
    pub fn finish(&mut self) {
        self.machine.finish(&mut self.context);
    }

    /// Drop all state, as when the editor closes
    pub fn reset(&mut self) {
        self.context = ParseContext::new();
        self.consumed_text.clear();
        self.checkpoints.clear();
    }

    /// Restore the newest checkpoint at or before `offset`
    fn rollback(&mut self, offset: usize) {
        while self
            .checkpoints
            .last()
            .is_some_and(|cp| cp.consumed() > offset)
        {
            self.checkpoints.pop();
        }

        let restored = self.checkpoints.last().cloned().unwrap_or_default();
        trace!(
            "Rolling back parse from {} to {} (edit at {})",
            self.context.consumed(),
            restored.consumed(),
            offset
        );

        self.consumed_text.truncate(restored.consumed());
        self.context = restored;
    }

    fn feed(&mut self, chunk: &str) {
        let mut last_checkpoint = self.checkpoints.last().map_or(0, ParseContext::consumed);

        for c in chunk.chars() {
            self.machine.step(&mut self.context, c);
            self.consumed_text.push(c);

            if self.context.consumed() - last_checkpoint >= self.interval {
                last_checkpoint = self.context.consumed();
                self.checkpoints.push(self.context.clone());
            }
        }
    }
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    floor_char_boundary(b, len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParserState;

    fn fresh_parse(text: &str) -> ParseContext {
        let mut ctx = ParseContext::new();
        StateMachine::new().feed(&mut ctx, text);
        ctx
    }

    #[test]
    fn test_append_feeds_only_new_text() {
        let mut tracker = DocumentTracker::new(StateMachine::new(), 8);
        tracker.update("<html>", 6);
        let update = tracker.update("<html><body>", 12);

        assert_eq!(update.resumed_at, 6);
        assert_eq!(update.fed, 6);
        assert_eq!(tracker.context().stack(), ["html", "body"]);
    }

    #[test]
    fn test_cursor_limits_parse() {
        let mut tracker = DocumentTracker::new(StateMachine::new(), 8);
        let text = "<html><body><p class=\"x\">";
        tracker.update(text, 14);

        assert_eq!(tracker.consumed_text(), "<html><body><p");
        assert_eq!(tracker.context().state(), ParserState::TagOpenName);
    }

    #[test]
    fn test_edit_in_middle_matches_fresh_parse() {
        let mut tracker = DocumentTracker::new(StateMachine::new(), 4);
        let before = "<html><body><div><span>text</span></div>";
        tracker.update(before, before.len());

        let after = "<html><body><section><span>text</span></div>";
        let update = tracker.update(after, after.len());

        assert!(update.resumed_at <= 13);
        assert_eq!(tracker.context(), &fresh_parse(after));
    }

    #[test]
    fn test_moving_cursor_back_matches_fresh_parse() {
        let mut tracker = DocumentTracker::new(StateMachine::new(), 5);
        let text = "<html><body><p class=\"a\" id=\"b\"></p></body></html>";
        tracker.update(text, text.len());
        for cursor in (0..text.len()).rev() {
            tracker.update(text, cursor);
            assert_eq!(tracker.context(), &fresh_parse(&text[..cursor]));
        }
    }

    #[test]
    fn test_checkpoints_are_spaced() {
        let mut tracker = DocumentTracker::new(StateMachine::new(), 10);
        let text = "x".repeat(95);
        tracker.update(&text, text.len());
        assert_eq!(tracker.checkpoint_count(), 9);

        tracker.update(&text[..42], 42);
        assert_eq!(tracker.checkpoint_count(), 4);
        assert_eq!(tracker.context().consumed(), 42);
    }

    #[test]
    fn test_cursor_clamped_to_char_boundary() {
        let mut tracker = DocumentTracker::new(StateMachine::new(), 4);
        let text = "<p>é";
        tracker.update(text, 4);
        assert_eq!(tracker.consumed_text(), "<p>");
        tracker.update(text, 100);
        assert_eq!(tracker.consumed_text(), text);
    }

    #[test]
    fn test_doctype_edit_detected() {
        let mut tracker = DocumentTracker::new(StateMachine::new(), 4);
        let first = "<!DOCTYPE html PUBLIC \"A\"><html>";
        assert!(tracker.update(first, first.len()).doctype_changed);
        assert!(!tracker.update(first, first.len()).doctype_changed);

        let second = "<!DOCTYPE html PUBLIC \"B\"><html>";
        assert!(tracker.update(second, second.len()).doctype_changed);
        assert_eq!(tracker.context().doctype().unwrap().fpi(), Some("B"));
    }

    #[test]
    fn test_body_edit_keeps_doctype() {
        let mut tracker = DocumentTracker::new(StateMachine::new(), 64);
        let first = "<!DOCTYPE html PUBLIC \"A\"><html><body><div>";
        tracker.update(first, first.len());

        let second = "<!DOCTYPE html PUBLIC \"A\"><html><body><span>";
        let update = tracker.update(second, second.len());
        assert_eq!(update.resumed_at, 0);
        assert!(!update.doctype_changed);
        assert!(!tracker.append("</span>").doctype_changed);
    }

    #[test]
    fn test_removing_doctype_detected() {
        let mut tracker = DocumentTracker::new(StateMachine::new(), 64);
        let text = "<!DOCTYPE html><html>";
        tracker.update(text, text.len());
        let update = tracker.update("<html>", 6);
        assert!(update.doctype_changed);
        assert!(tracker.context().doctype().is_none());
    }

    #[test]
    fn test_finish_and_reset() {
        let mut tracker = DocumentTracker::new(StateMachine::new(), 4);
        tracker.append("<html><body>");
        tracker.finish();
        assert!(tracker.context().stack().is_empty());

        tracker.reset();
        assert_eq!(tracker.context(), &ParseContext::new());
        assert!(tracker.consumed_text().is_empty());
        assert_eq!(tracker.checkpoint_count(), 0);
    }
}

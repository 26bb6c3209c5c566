//! Incremental markup parsing
//!
//! This module turns a stream of characters into live parse context:
//!
//! - **state**: tokenizer states
//! - **machine**: the character-driven state machine
//! - **context**: the parse context it maintains and the cursor view of it
//! - **doctype**: parsing of `<!DOCTYPE ...>` declarations
//! - **tracker**: checkpointing so edits do not force a full reparse
//!
//! # Examples
//!
//! ```
//! use tagsense::parser::{CursorContext, ParseContext, StateMachine};
//!
//! let machine = StateMachine::new();
//! let mut ctx = ParseContext::new();
//! machine.feed(&mut ctx, "<html><body><p cl");
//!
//! assert_eq!(ctx.stack(), ["html", "body"]);
//! assert!(matches!(ctx.cursor_context(), CursorContext::Attribute { .. }));
//! ```

mod context;
mod doctype;
mod machine;
mod state;
mod tracker;

pub use context::{CursorContext, ParseContext, TagInProgress};
pub use doctype::DocType;
pub use machine::{DEFAULT_VOID_ELEMENTS, FeedOutcome, StateMachine};
pub use state::ParserState;
pub use tracker::{DEFAULT_CHECKPOINT_INTERVAL, DocumentTracker, TrackerUpdate};

//! Completion at the cursor
//!
//! - **candidate**: candidate triples and the list returned to callers
//! - **resolver**: doctype to schema resolution, cached per document
//! - **engine**: cancellable schema queries for each cursor context

pub mod candidate;
pub mod engine;
pub mod resolver;

pub use candidate::{Candidate, CandidateCategory, CandidateList};
pub use engine::{CompletionEngine, DOCTYPE_LITERAL};
pub use resolver::DocTypeResolver;

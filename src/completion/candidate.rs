//! Completion candidates
//!
//! A [`Candidate`] is one proposed completion; a [`CandidateList`] is the
//! ordered, read-only answer to one completion request.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category tag attached to every candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateCategory {
    /// An element name
    Element,
    /// An attribute name
    Attribute,
    /// An enumerated attribute value
    AttributeValue,
    /// Literal markup such as `!DOCTYPE` or `!--`
    Literal,
    /// A full doctype declaration
    DocType,
    /// The name of an open element, for `</`
    ClosingTag,
}

impl CandidateCategory {
    /// Stable string form of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Element => "element",
            Self::Attribute => "attribute",
            Self::AttributeValue => "attribute-value",
            Self::Literal => "literal",
            Self::DocType => "doctype",
            Self::ClosingTag => "closing-tag",
        }
    }
}

impl fmt::Display for CandidateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single completion proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Text shown to the user and inserted on accept
    pub display_text: String,
    /// What kind of token this is
    pub category: CandidateCategory,
    /// Human-readable description, possibly empty
    pub description: String,
}

impl Candidate {
    /// Create a candidate
    pub fn new(
        display_text: impl Into<String>,
        category: CandidateCategory,
        description: impl Into<String>,
    ) -> Self {
        Self {
            display_text: display_text.into(),
            category,
            description: description.into(),
        }
    }

    /// Create an element candidate
    pub fn element(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, CandidateCategory::Element, description)
    }

    /// Create an attribute candidate
    pub fn attribute(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, CandidateCategory::Attribute, description)
    }

    /// Create an attribute value candidate
    pub fn value(value: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(value, CandidateCategory::AttributeValue, description)
    }

    /// Create a literal candidate
    pub fn literal(text: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(text, CandidateCategory::Literal, description)
    }
}

/// Ordered candidates answering one completion request.
///
/// Built by the completion engine and handed out read-only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct CandidateList {
    items: Vec<Candidate>,
}

impl CandidateList {
    /// An empty list
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, candidate: Candidate) {
        self.items.push(candidate);
    }

    pub(crate) fn extend<I: IntoIterator<Item = Candidate>>(&mut self, candidates: I) {
        self.items.extend(candidates);
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no candidates
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate candidates in order
    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.items.iter()
    }

    /// Whether a candidate with this display text is present
    pub fn contains(&self, display_text: &str) -> bool {
        self.items.iter().any(|c| c.display_text == display_text)
    }

    /// Display texts in order
    pub fn display_texts(&self) -> Vec<&str> {
        self.items.iter().map(|c| c.display_text.as_str()).collect()
    }

    /// Borrow the candidates as a slice
    pub fn as_slice(&self) -> &[Candidate] {
        &self.items
    }

    /// Take ownership of the candidates
    pub fn into_vec(self) -> Vec<Candidate> {
        self.items
    }
}

impl From<Vec<Candidate>> for CandidateList {
    fn from(items: Vec<Candidate>) -> Self {
        Self { items }
    }
}

impl<'a> IntoIterator for &'a CandidateList {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for CandidateList {
    type Item = Candidate;
    type IntoIter = std::vec::IntoIter<Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

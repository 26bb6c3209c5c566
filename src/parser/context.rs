//! Parse context definitions
//!
//! [`ParseContext`] is the live, incrementally maintained result of feeding a
//! document to the [`StateMachine`](super::StateMachine). [`CursorContext`] is
//! the view of it that completion cares about: what kind of position the
//! cursor is at and which names surround it.

use std::collections::HashMap;

use super::doctype::DocType;
use super::state::ParserState;

/// A tag whose closing `>` has not been seen yet
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagInProgress {
    /// Element name as written
    pub name: String,
    /// Whether this is a `</name>` tag
    pub closing: bool,
    /// Attributes already completed on this tag
    pub attributes: HashMap<String, String>,
    /// Attribute currently being read, if any
    pub attribute_name: String,
    /// Value of the attribute currently being read
    pub attribute_value: String,
    /// Set once whitespace ended the name of a closing tag
    pub(crate) name_done: bool,
}

impl TagInProgress {
    pub(crate) fn opening(first: char) -> Self {
        Self {
            name: first.to_string(),
            ..Self::default()
        }
    }

    pub(crate) fn closing() -> Self {
        Self {
            closing: true,
            ..Self::default()
        }
    }

    /// Move the attribute being read into the attribute map.
    ///
    /// Keys stay unique: a repeated attribute keeps its first value.
    pub(crate) fn commit_attribute(&mut self) {
        if self.attribute_name.is_empty() {
            self.attribute_value.clear();
            return;
        }
        let name = std::mem::take(&mut self.attribute_name);
        let value = std::mem::take(&mut self.attribute_value);
        self.attributes.entry(name).or_insert(value);
    }

    /// Whether the element name carries a namespace prefix (`svg:rect`)
    pub fn has_prefix(&self) -> bool {
        self.name.contains(':')
    }
}

/// Live parse state for one document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseContext {
    pub(crate) state: ParserState,
    pub(crate) stack: Vec<String>,
    pub(crate) tag: Option<TagInProgress>,
    pub(crate) buffer: String,
    pub(crate) doctype: Option<DocType>,
    pub(crate) doctype_generation: u64,
    pub(crate) consumed: usize,
}

impl ParseContext {
    /// Create a context positioned at the start of a document
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tokenizer state
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Names of the confirmed-open elements, outermost first
    pub fn stack(&self) -> &[String] {
        &self.stack
    }

    /// Nearest enclosing element, `None` at the document root
    pub fn parent_element(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }

    /// The tag currently being read
    pub fn current_tag(&self) -> Option<&TagInProgress> {
        self.tag.as_ref()
    }

    /// The last completed doctype declaration
    pub fn doctype(&self) -> Option<&DocType> {
        self.doctype.as_ref()
    }

    /// Number of doctype declarations completed so far
    pub fn doctype_generation(&self) -> u64 {
        self.doctype_generation
    }

    /// Bytes of input consumed so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Classify the position right after the last consumed character
    pub fn cursor_context(&self) -> CursorContext {
        use ParserState::*;

        let tag_name = || {
            self.tag
                .as_ref()
                .map(|t| t.name.clone())
                .unwrap_or_default()
        };

        match self.state {
            Text => CursorContext::Text {
                parent: self.parent_element().map(str::to_string),
            },
            TagOpen | TagOpenName => CursorContext::TagOpen { name: tag_name() },
            MarkupDeclaration => CursorContext::TagOpen {
                name: format!("!{}", self.buffer),
            },
            InsideTag | AttributeName | AfterAttributeName | SelfClosing => {
                let (name, existing) = self
                    .tag
                    .as_ref()
                    .map(|t| (t.attribute_name.clone(), t.attributes.clone()))
                    .unwrap_or_default();
                CursorContext::Attribute {
                    element: tag_name(),
                    name,
                    existing,
                }
            }
            BeforeAttributeValue | AttributeValue { .. } => {
                let (attribute, value) = self
                    .tag
                    .as_ref()
                    .map(|t| (t.attribute_name.clone(), t.attribute_value.clone()))
                    .unwrap_or_default();
                CursorContext::AttributeValue {
                    element: tag_name(),
                    attribute,
                    value,
                }
            }
            ClosingTag => CursorContext::ClosingTag { name: tag_name() },
            DocTypeDeclaration { .. } => CursorContext::DocType,
            Comment => CursorContext::Comment,
            CData => CursorContext::CData,
        }
    }
}

/// What kind of position the cursor is at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorContext {
    /// Character data; element completions apply
    Text {
        /// Nearest enclosing element
        parent: Option<String>,
    },

    /// Typing an element name after `<`
    TagOpen {
        /// The partial name typed so far
        name: String,
    },

    /// Between attributes or typing an attribute name
    Attribute {
        /// Element whose tag is being defined
        element: String,
        /// Partial attribute name, empty between attributes
        name: String,
        /// Attributes already present on the tag
        existing: HashMap<String, String>,
    },

    /// Typing an attribute value
    AttributeValue {
        /// Element whose tag is being defined
        element: String,
        /// Attribute the value belongs to
        attribute: String,
        /// Partial value typed so far
        value: String,
    },

    /// Typing the name in `</name`
    ClosingTag {
        /// The partial name typed so far
        name: String,
    },

    /// Inside a doctype declaration
    DocType,

    /// Inside a comment; nothing to complete
    Comment,

    /// Inside a CDATA section; nothing to complete
    CData,
}

impl CursorContext {
    /// Stable name of the variant
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::TagOpen { .. } => "tag-open",
            Self::Attribute { .. } => "attribute",
            Self::AttributeValue { .. } => "attribute-value",
            Self::ClosingTag { .. } => "closing-tag",
            Self::DocType => "doctype",
            Self::Comment => "comment",
            Self::CData => "cdata",
        }
    }

    /// The partial text a completion would replace
    pub fn prefix(&self) -> &str {
        match self {
            Self::TagOpen { name } => name,
            Self::Attribute { name, .. } => name,
            Self::AttributeValue { value, .. } => value,
            Self::ClosingTag { name } => name,
            Self::Text { .. } | Self::DocType | Self::Comment | Self::CData => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_is_root_text() {
        let ctx = ParseContext::new();
        assert_eq!(ctx.state(), ParserState::Text);
        assert!(ctx.stack().is_empty());
        assert_eq!(ctx.parent_element(), None);
        assert_eq!(ctx.cursor_context(), CursorContext::Text { parent: None });
    }

    #[test]
    fn test_commit_attribute_keeps_first_value() {
        let mut tag = TagInProgress::opening('p');
        tag.attribute_name = "class".to_string();
        tag.attribute_value = "a".to_string();
        tag.commit_attribute();
        tag.attribute_name = "class".to_string();
        tag.attribute_value = "b".to_string();
        tag.commit_attribute();

        assert_eq!(tag.attributes.len(), 1);
        assert_eq!(tag.attributes["class"], "a");
        assert!(tag.attribute_name.is_empty());
        assert!(tag.attribute_value.is_empty());
    }

    #[test]
    fn test_commit_without_name_is_noop() {
        let mut tag = TagInProgress::opening('p');
        tag.attribute_value = "stray".to_string();
        tag.commit_attribute();
        assert!(tag.attributes.is_empty());
        assert!(tag.attribute_value.is_empty());
    }

    #[test]
    fn test_prefix_detection() {
        let mut tag = TagInProgress::opening('s');
        tag.name.push_str("vg:rect");
        assert!(tag.has_prefix());
        assert!(!TagInProgress::opening('p').has_prefix());
    }

    #[test]
    fn test_cursor_context_prefix() {
        let ctx = CursorContext::TagOpen {
            name: "di".to_string(),
        };
        assert_eq!(ctx.prefix(), "di");
        assert_eq!(CursorContext::DocType.prefix(), "");
    }
}

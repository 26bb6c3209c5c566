//! Tokenizer states
//!
//! The state machine is character driven: each state decides what the next
//! character means. There is no terminal state; the machine returns to
//! [`ParserState::Text`] whenever a tag or declaration completes or when input
//! is too malformed to keep interpreting as markup.

/// Tokenizer states representing a position within markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserState {
    /// Character data between tags
    #[default]
    Text,
    /// Just read `<`
    TagOpen,
    /// Reading an element name after `<`
    TagOpenName,
    /// After the element name, between attributes
    InsideTag,
    /// Reading an attribute name
    AttributeName,
    /// Whitespace after an attribute name, before `=` or the next attribute
    AfterAttributeName,
    /// After `=`, before the value starts
    BeforeAttributeValue,
    /// Reading an attribute value, quoted or unquoted
    AttributeValue {
        /// The opening quote, `None` for unquoted values
        quote: Option<char>,
    },
    /// Read `/` inside an opening tag; `>` next makes it self-closing
    SelfClosing,
    /// Reading a closing tag after `</`
    ClosingTag,
    /// Read `<!`, deciding between doctype, comment and CDATA
    MarkupDeclaration,
    /// Inside `<!DOCTYPE ...>`
    DocTypeDeclaration {
        /// The quote currently open inside the declaration, if any
        quote: Option<char>,
    },
    /// Inside `<!-- ... -->`
    Comment,
    /// Inside `<![CDATA[ ... ]]>`
    CData,
}

impl ParserState {
    /// Whether the state is within an opening tag being defined
    pub fn is_in_opening_tag(&self) -> bool {
        use ParserState::*;

        matches!(
            self,
            TagOpenName
                | InsideTag
                | AttributeName
                | AfterAttributeName
                | BeforeAttributeValue
                | AttributeValue { .. }
                | SelfClosing
        )
    }
}

/// Characters that terminate an element or attribute name.
pub(crate) fn ends_name(c: char) -> bool {
    c.is_whitespace() || matches!(c, '>' | '/' | '=' | '<' | '"' | '\'')
}

/// Characters that may start an element name.
pub(crate) fn starts_element_name(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':'
}

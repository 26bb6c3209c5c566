//! Character-driven state machine for nested markup
//!
//! The machine itself holds only policy (which elements are void); all
//! progress lives in the [`ParseContext`] it is fed with. This keeps the
//! context cheap to snapshot and makes incremental feeding trivially
//! equivalent to batch feeding: both run the same per-character step.
//!
//! Recovery rules for malformed input:
//! - `<` followed by something that cannot start a name is text
//! - a new `<` inside a tag abandons the unfinished tag
//! - `<` inside a quoted attribute value ends the value and abandons the tag
//! - closing tags always pop, even when the name does not match

use std::collections::HashSet;
use std::sync::Arc;

use tracing::trace;

use super::context::{ParseContext, TagInProgress};
use super::doctype::DocType;
use super::state::{ParserState, ends_name, starts_element_name};

/// HTML elements that never have content and are never pushed on the stack
pub const DEFAULT_VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// What happened while feeding a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeedOutcome {
    /// Number of doctype declarations completed during the feed
    pub doctypes_completed: u32,
}

impl FeedOutcome {
    /// Whether the active schema needs to be resolved again
    pub fn doctype_changed(&self) -> bool {
        self.doctypes_completed > 0
    }
}

/// Tag/attribute tokenizer
#[derive(Debug, Clone)]
pub struct StateMachine {
    void_elements: Arc<HashSet<String>>,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::with_void_elements(DEFAULT_VOID_ELEMENTS.iter().copied())
    }
}

impl StateMachine {
    /// Create a state machine with the HTML void element set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state machine with a custom set of void elements
    pub fn with_void_elements<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            void_elements: Arc::new(
                elements
                    .into_iter()
                    .map(|e| e.as_ref().to_ascii_lowercase())
                    .collect(),
            ),
        }
    }

    /// Whether `name` is a void element (case-insensitive)
    pub fn is_void(&self, name: &str) -> bool {
        self.void_elements.contains(&name.to_ascii_lowercase())
    }

    /// Feed a chunk of characters
    pub fn feed(&self, ctx: &mut ParseContext, input: &str) -> FeedOutcome {
        let mut outcome = FeedOutcome::default();
        for c in input.chars() {
            if self.step(ctx, c) {
                outcome.doctypes_completed += 1;
            }
        }
        outcome
    }

    /// Mark the end of the document.
    ///
    /// Any unfinished tag is dropped and every open element is closed.
    pub fn finish(&self, ctx: &mut ParseContext) {
        ctx.tag = None;
        ctx.buffer.clear();
        ctx.stack.clear();
        ctx.state = ParserState::Text;
    }

    /// Process one character. Returns `true` when it completed a doctype.
    pub fn step(&self, ctx: &mut ParseContext, c: char) -> bool {
        ctx.consumed += c.len_utf8();
        self.transition(ctx, c)
    }

    fn transition(&self, ctx: &mut ParseContext, c: char) -> bool {
        use ParserState::*;

        let state = ctx.state;
        match state {
            Text => {
                if c == '<' {
                    self.begin_tag(ctx);
                }
            }

            TagOpen => match c {
                '/' => {
                    ctx.tag = Some(TagInProgress::closing());
                    ctx.state = ClosingTag;
                }
                '!' => {
                    ctx.buffer.clear();
                    ctx.state = MarkupDeclaration;
                }
                '<' => self.begin_tag(ctx),
                c if starts_element_name(c) => {
                    ctx.tag = Some(TagInProgress::opening(c));
                    ctx.state = TagOpenName;
                }
                // A lone `<` is just text
                _ => ctx.state = Text,
            },

            TagOpenName => match c {
                '>' => self.complete_open_tag(ctx, false),
                '/' => ctx.state = SelfClosing,
                '<' => self.begin_tag(ctx),
                c if ends_name(c) => ctx.state = InsideTag,
                c => {
                    if let Some(tag) = ctx.tag.as_mut() {
                        tag.name.push(c);
                    }
                }
            },

            InsideTag => match c {
                '>' => self.complete_open_tag(ctx, false),
                '/' => ctx.state = SelfClosing,
                '<' => self.begin_tag(ctx),
                c if ends_name(c) => {}
                c => self.begin_attribute(ctx, c),
            },

            AttributeName => match c {
                '=' => ctx.state = BeforeAttributeValue,
                '>' => {
                    self.commit_attribute(ctx);
                    self.complete_open_tag(ctx, false);
                }
                '/' => {
                    self.commit_attribute(ctx);
                    ctx.state = SelfClosing;
                }
                '<' => self.begin_tag(ctx),
                c if c.is_whitespace() => ctx.state = AfterAttributeName,
                '"' | '\'' => {}
                c => {
                    if let Some(tag) = ctx.tag.as_mut() {
                        tag.attribute_name.push(c);
                    }
                }
            },

            AfterAttributeName => match c {
                '=' => ctx.state = BeforeAttributeValue,
                '>' => {
                    self.commit_attribute(ctx);
                    self.complete_open_tag(ctx, false);
                }
                '/' => {
                    self.commit_attribute(ctx);
                    ctx.state = SelfClosing;
                }
                '<' => self.begin_tag(ctx),
                c if ends_name(c) => {}
                c => {
                    self.commit_attribute(ctx);
                    self.begin_attribute(ctx, c);
                }
            },

            BeforeAttributeValue => match c {
                '"' | '\'' => ctx.state = AttributeValue { quote: Some(c) },
                '>' => {
                    self.commit_attribute(ctx);
                    self.complete_open_tag(ctx, false);
                }
                '<' => self.begin_tag(ctx),
                c if c.is_whitespace() => {}
                c => {
                    if let Some(tag) = ctx.tag.as_mut() {
                        tag.attribute_value.push(c);
                    }
                    ctx.state = AttributeValue { quote: None };
                }
            },

            AttributeValue { quote: Some(q) } => match c {
                c if c == q => {
                    self.commit_attribute(ctx);
                    ctx.state = InsideTag;
                }
                // Most likely a missing closing quote
                '<' => self.begin_tag(ctx),
                c => {
                    if let Some(tag) = ctx.tag.as_mut() {
                        tag.attribute_value.push(c);
                    }
                }
            },

            AttributeValue { quote: None } => match c {
                '>' => {
                    self.commit_attribute(ctx);
                    self.complete_open_tag(ctx, false);
                }
                '<' => self.begin_tag(ctx),
                c if c.is_whitespace() => {
                    self.commit_attribute(ctx);
                    ctx.state = InsideTag;
                }
                c => {
                    if let Some(tag) = ctx.tag.as_mut() {
                        tag.attribute_value.push(c);
                    }
                }
            },

            SelfClosing => match c {
                '>' => self.complete_open_tag(ctx, true),
                '<' => self.begin_tag(ctx),
                c if c.is_whitespace() => ctx.state = InsideTag,
                c => {
                    ctx.state = InsideTag;
                    return self.transition(ctx, c);
                }
            },

            ClosingTag => match c {
                '>' => self.complete_closing_tag(ctx),
                '<' => self.begin_tag(ctx),
                c => {
                    if let Some(tag) = ctx.tag.as_mut() {
                        if c.is_whitespace() {
                            tag.name_done = !tag.name.is_empty();
                        } else if !tag.name_done {
                            tag.name.push(c);
                        }
                    }
                }
            },

            MarkupDeclaration => return self.markup_declaration(ctx, c),

            DocTypeDeclaration { quote: Some(q) } => {
                if c == q {
                    ctx.state = DocTypeDeclaration { quote: None };
                }
                ctx.buffer.push(c);
            }

            DocTypeDeclaration { quote: None } => match c {
                '>' => {
                    self.complete_doctype(ctx);
                    return true;
                }
                '<' => {
                    ctx.buffer.clear();
                    self.begin_tag(ctx);
                }
                '"' | '\'' => {
                    ctx.state = DocTypeDeclaration { quote: Some(c) };
                    ctx.buffer.push(c);
                }
                c => ctx.buffer.push(c),
            },

            Comment => self.skip_until(ctx, c, "--"),

            CData => self.skip_until(ctx, c, "]]"),
        }

        false
    }

    fn begin_tag(&self, ctx: &mut ParseContext) {
        if let Some(tag) = ctx.tag.take() {
            trace!("Abandoning unfinished tag <{}>", tag.name);
        }
        ctx.state = ParserState::TagOpen;
    }

    fn begin_attribute(&self, ctx: &mut ParseContext, c: char) {
        if let Some(tag) = ctx.tag.as_mut() {
            tag.attribute_name.clear();
            tag.attribute_value.clear();
            tag.attribute_name.push(c);
        }
        ctx.state = ParserState::AttributeName;
    }

    fn commit_attribute(&self, ctx: &mut ParseContext) {
        if let Some(tag) = ctx.tag.as_mut() {
            tag.commit_attribute();
        }
    }

    fn complete_open_tag(&self, ctx: &mut ParseContext, self_closing: bool) {
        if let Some(tag) = ctx.tag.take() {
            if !self_closing && !self.is_void(&tag.name) {
                ctx.stack.push(tag.name);
            }
        }
        ctx.state = ParserState::Text;
    }

    fn complete_closing_tag(&self, ctx: &mut ParseContext) {
        ctx.state = ParserState::Text;
        let Some(tag) = ctx.tag.take() else {
            return;
        };
        if tag.name.is_empty() || ctx.stack.is_empty() {
            return;
        }
        // `</br>` and friends close nothing
        if self.is_void(&tag.name) {
            trace!("Ignoring end tag for void element </{}>", tag.name);
            return;
        }

        // Close through the nearest matching element; with no match anywhere
        // the innermost element is popped anyway
        let depth = ctx
            .stack
            .iter()
            .rposition(|open| open.eq_ignore_ascii_case(&tag.name))
            .unwrap_or(ctx.stack.len() - 1);
        if depth + 1 != ctx.stack.len() || !ctx.stack[depth].eq_ignore_ascii_case(&tag.name) {
            trace!(
                "Closing tag </{}> does not match <{}>",
                tag.name,
                ctx.stack[ctx.stack.len() - 1]
            );
        }
        ctx.stack.truncate(depth);
    }

    fn markup_declaration(&self, ctx: &mut ParseContext, c: char) -> bool {
        let is_doctype_keyword = ctx.buffer.eq_ignore_ascii_case("DOCTYPE");
        match c {
            '>' => {
                if is_doctype_keyword {
                    ctx.buffer.clear();
                    self.complete_doctype(ctx);
                    return true;
                }
                // Bogus declaration such as `<!foo>`
                ctx.buffer.clear();
                ctx.state = ParserState::Text;
            }
            '<' => {
                ctx.buffer.clear();
                self.begin_tag(ctx);
            }
            c if c.is_whitespace() && is_doctype_keyword => {
                ctx.buffer.clear();
                ctx.state = ParserState::DocTypeDeclaration { quote: None };
            }
            c => {
                ctx.buffer.push(c);
                if ctx.buffer == "--" {
                    ctx.buffer.clear();
                    ctx.state = ParserState::Comment;
                } else if ctx.buffer == "[CDATA[" {
                    ctx.buffer.clear();
                    ctx.state = ParserState::CData;
                }
            }
        }
        false
    }

    fn complete_doctype(&self, ctx: &mut ParseContext) {
        let body = std::mem::take(&mut ctx.buffer);
        ctx.doctype = Some(DocType::parse(&body));
        ctx.doctype_generation += 1;
        ctx.state = ParserState::Text;
    }

    /// Skip characters until `terminator` followed by `>`.
    ///
    /// Only the trailing characters needed to recognise the terminator are
    /// kept in the buffer.
    fn skip_until(&self, ctx: &mut ParseContext, c: char, terminator: &str) {
        if c == '>' && ctx.buffer.ends_with(terminator) {
            ctx.buffer.clear();
            ctx.state = ParserState::Text;
            return;
        }
        ctx.buffer.push(c);
        let keep = terminator.len();
        if ctx.buffer.len() > keep {
            let mut cut = ctx.buffer.len() - keep;
            while !ctx.buffer.is_char_boundary(cut) {
                cut += 1;
            }
            ctx.buffer.drain(..cut);
        }
    }
}

//! Doctype declaration parsing
//!
//! Turns the body of a `<!DOCTYPE ...>` declaration (everything after the
//! keyword, up to but excluding the closing `>`) into a [`DocType`].

use std::fmt;

/// A parsed document type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocType {
    /// Root element name (`html` in `<!DOCTYPE html>`)
    pub root_element: String,
    /// Formal public identifier, present for `PUBLIC` declarations
    pub public_fpi: Option<String>,
    /// System identifier (usually a DTD URL)
    pub system_id: Option<String>,
}

impl DocType {
    /// Parse a declaration body.
    ///
    /// Parsing is lenient: unknown keywords are skipped, unterminated quoted
    /// strings run to the end of the body, and missing pieces stay `None`.
    pub fn parse(body: &str) -> Self {
        let mut words = DeclarationWords::new(body);
        let root_element = match words.next() {
            Some(Word::Bare(name)) => name.to_string(),
            _ => String::new(),
        };

        let mut doctype = DocType {
            root_element,
            public_fpi: None,
            system_id: None,
        };

        while let Some(word) = words.next() {
            match word {
                Word::Bare(kw) if kw.eq_ignore_ascii_case("PUBLIC") => {
                    if let Some(Word::Quoted(fpi)) = words.next() {
                        doctype.public_fpi = Some(fpi.to_string());
                    }
                    if let Some(Word::Quoted(system)) = words.next() {
                        doctype.system_id = Some(system.to_string());
                    }
                }
                Word::Bare(kw) if kw.eq_ignore_ascii_case("SYSTEM") => {
                    if let Some(Word::Quoted(system)) = words.next() {
                        doctype.system_id = Some(system.to_string());
                    }
                }
                _ => {}
            }
        }

        doctype
    }

    /// The public identifier, treating an empty one as absent.
    pub fn fpi(&self) -> Option<&str> {
        self.public_fpi.as_deref().filter(|fpi| !fpi.is_empty())
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<!DOCTYPE {}", self.root_element)?;
        match (&self.public_fpi, &self.system_id) {
            (Some(fpi), Some(system)) => write!(f, " PUBLIC \"{fpi}\" \"{system}\"")?,
            (Some(fpi), None) => write!(f, " PUBLIC \"{fpi}\"")?,
            (None, Some(system)) => write!(f, " SYSTEM \"{system}\"")?,
            (None, None) => {}
        }
        write!(f, ">")
    }
}

enum Word<'a> {
    Bare(&'a str),
    Quoted(&'a str),
}

/// Splits a declaration body into bare words and quoted strings.
struct DeclarationWords<'a> {
    rest: &'a str,
}

impl<'a> DeclarationWords<'a> {
    fn new(body: &'a str) -> Self {
        Self { rest: body }
    }
}

impl<'a> Iterator for DeclarationWords<'a> {
    type Item = Word<'a>;

    fn next(&mut self) -> Option<Word<'a>> {
        self.rest = self.rest.trim_start();
        let first = self.rest.chars().next()?;

        if first == '"' || first == '\'' {
            let body = &self.rest[1..];
            let end = body.find(first).unwrap_or(body.len());
            let quoted = &body[..end];
            self.rest = body.get(end + 1..).unwrap_or("");
            return Some(Word::Quoted(quoted));
        }

        let end = self
            .rest
            .find(|c: char| c.is_whitespace() || c == '"' || c == '\'')
            .unwrap_or(self.rest.len());
        let bare = &self.rest[..end];
        self.rest = &self.rest[end..];
        Some(Word::Bare(bare))
    }
}

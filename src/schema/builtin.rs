//! Built-in HTML schemas
//!
//! One element table covers HTML 4.01, XHTML 1.0 and HTML5; each flavor
//! filters and extends it. The tables favour the elements and attributes
//! people actually type over completeness.

use super::table::{AttributeDefinition, ElementDefinition, SchemaDefinition};

/// Name of the schema used when a document has no recognised doctype
pub const DEFAULT_SCHEMA_NAME: &str = "html5";

/// Which HTML vocabulary a built-in schema describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlFlavor {
    /// HTML5 (`<!DOCTYPE html>`)
    Html5,
    /// HTML 4.01 / XHTML 1.0 strict
    Strict,
    /// HTML 4.01 / XHTML 1.0 transitional, with presentational markup
    Transitional,
}

/// A built-in schema: name, public identifier, declaration and flavor
struct BuiltinDocType {
    name: &'static str,
    fpi: Option<&'static str>,
    doctype: &'static str,
    flavor: HtmlFlavor,
}

const BUILTIN_DOCTYPES: &[BuiltinDocType] = &[
    BuiltinDocType {
        name: "html5",
        fpi: None,
        doctype: "<!DOCTYPE html>",
        flavor: HtmlFlavor::Html5,
    },
    BuiltinDocType {
        name: "xhtml1-strict",
        fpi: Some("-//W3C//DTD XHTML 1.0 Strict//EN"),
        doctype: "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\" \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd\">",
        flavor: HtmlFlavor::Strict,
    },
    BuiltinDocType {
        name: "xhtml1-transitional",
        fpi: Some("-//W3C//DTD XHTML 1.0 Transitional//EN"),
        doctype: "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Transitional//EN\" \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd\">",
        flavor: HtmlFlavor::Transitional,
    },
    BuiltinDocType {
        name: "html401-strict",
        fpi: Some("-//W3C//DTD HTML 4.01//EN"),
        doctype: "<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.01//EN\" \"http://www.w3.org/TR/html4/strict.dtd\">",
        flavor: HtmlFlavor::Strict,
    },
    BuiltinDocType {
        name: "html401-transitional",
        fpi: Some("-//W3C//DTD HTML 4.01 Transitional//EN"),
        doctype: "<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.01 Transitional//EN\" \"http://www.w3.org/TR/html4/loose.dtd\">",
        flavor: HtmlFlavor::Transitional,
    },
];

/// Content model of an element
#[derive(Clone, Copy)]
enum Content {
    /// Block and inline content
    Flow,
    /// Inline content only
    Phrasing,
    /// A fixed list of children
    Only(&'static [&'static str]),
    /// Text only, no elements
    Text,
    /// Void element
    Empty,
}

type AttrRow = (&'static str, &'static str, &'static [&'static str]);

struct ElementRow {
    name: &'static str,
    description: &'static str,
    content: Content,
    attributes: &'static [AttrRow],
    /// Flavors the element exists in; empty means all
    only_in: &'static [HtmlFlavor],
}

const HTML5_ONLY: &[HtmlFlavor] = &[HtmlFlavor::Html5];
const TRANSITIONAL_ONLY: &[HtmlFlavor] = &[HtmlFlavor::Transitional];
const ALL: &[HtmlFlavor] = &[];

const PHRASING: &[&str] = &[
    "a", "abbr", "b", "br", "button", "code", "em", "font", "i", "img", "input", "label", "s",
    "select", "small", "span", "strike", "strong", "sub", "sup", "textarea", "u",
];

const BLOCK: &[&str] = &[
    "address", "article", "aside", "blockquote", "canvas", "center", "div", "dl", "fieldset",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "main",
    "nav", "ol", "p", "pre", "section", "table", "ul", "audio", "video",
];

const DIR_VALUES: &[&str] = &["ltr", "rtl"];
const ALIGN_VALUES: &[&str] = &["left", "center", "right", "justify"];
const TARGET_VALUES: &[&str] = &["_blank", "_self", "_parent", "_top"];
const INPUT_TYPES: &[&str] = &[
    "text", "password", "checkbox", "radio", "submit", "reset", "button", "hidden", "file",
    "image",
];
const INPUT_TYPES_HTML5: &[&str] = &[
    "email", "number", "date", "range", "search", "url", "color", "tel",
];

const HEADING_ATTRS: &[AttrRow] = &[("align", "Horizontal alignment", ALIGN_VALUES)];

const ELEMENTS: &[ElementRow] = &[
    ElementRow {
        name: "html",
        description: "Document root",
        content: Content::Only(&["head", "body"]),
        attributes: &[
            ("xmlns", "XML namespace", &["http://www.w3.org/1999/xhtml"]),
            ("manifest", "Application cache manifest", &[]),
        ],
        only_in: ALL,
    },
    ElementRow {
        name: "head",
        description: "Document metadata",
        content: Content::Only(&["title", "meta", "link", "style", "script", "base"]),
        attributes: &[("profile", "Metadata profiles", &[])],
        only_in: ALL,
    },
    ElementRow {
        name: "title",
        description: "Document title",
        content: Content::Text,
        attributes: &[],
        only_in: ALL,
    },
    ElementRow {
        name: "base",
        description: "Base URL",
        content: Content::Empty,
        attributes: &[("href", "Base URL", &[]), ("target", "Default target", TARGET_VALUES)],
        only_in: ALL,
    },
    ElementRow {
        name: "meta",
        description: "Metadata",
        content: Content::Empty,
        attributes: &[
            ("name", "Metadata name", &["author", "description", "keywords", "generator", "viewport"]),
            ("content", "Metadata value", &[]),
            ("http-equiv", "HTTP header", &["content-type", "refresh", "default-style"]),
            ("charset", "Character encoding", &["utf-8"]),
        ],
        only_in: ALL,
    },
    ElementRow {
        name: "link",
        description: "Linked resource",
        content: Content::Empty,
        attributes: &[
            ("rel", "Relationship", &["stylesheet", "icon", "alternate", "author", "help", "next", "prev"]),
            ("href", "Resource URL", &[]),
            ("type", "MIME type", &["text/css"]),
            ("media", "Target media", &["all", "screen", "print"]),
        ],
        only_in: ALL,
    },
    ElementRow {
        name: "style",
        description: "Embedded style sheet",
        content: Content::Text,
        attributes: &[("type", "Style language", &["text/css"]), ("media", "Target media", &["all", "screen", "print"])],
        only_in: ALL,
    },
    ElementRow {
        name: "script",
        description: "Script",
        content: Content::Text,
        attributes: &[
            ("src", "Script URL", &[]),
            ("type", "Script language", &["text/javascript", "module"]),
            ("defer", "Defer execution", &["defer"]),
            ("async", "Execute asynchronously", &["async"]),
        ],
        only_in: ALL,
    },
    ElementRow {
        name: "body",
        description: "Document body",
        content: Content::Flow,
        attributes: &[
            ("onload", "Load handler", &[]),
            ("bgcolor", "Background color", &[]),
        ],
        only_in: ALL,
    },
    ElementRow {
        name: "div",
        description: "Generic block container",
        content: Content::Flow,
        attributes: &[("align", "Horizontal alignment", ALIGN_VALUES)],
        only_in: ALL,
    },
    ElementRow {
        name: "p",
        description: "Paragraph",
        content: Content::Phrasing,
        attributes: &[("align", "Horizontal alignment", ALIGN_VALUES)],
        only_in: ALL,
    },
    ElementRow {
        name: "span",
        description: "Generic inline container",
        content: Content::Phrasing,
        attributes: &[],
        only_in: ALL,
    },
    ElementRow { name: "h1", description: "Heading level 1", content: Content::Phrasing, attributes: HEADING_ATTRS, only_in: ALL },
    ElementRow { name: "h2", description: "Heading level 2", content: Content::Phrasing, attributes: HEADING_ATTRS, only_in: ALL },
    ElementRow { name: "h3", description: "Heading level 3", content: Content::Phrasing, attributes: HEADING_ATTRS, only_in: ALL },
    ElementRow { name: "h4", description: "Heading level 4", content: Content::Phrasing, attributes: HEADING_ATTRS, only_in: ALL },
    ElementRow { name: "h5", description: "Heading level 5", content: Content::Phrasing, attributes: HEADING_ATTRS, only_in: ALL },
    ElementRow { name: "h6", description: "Heading level 6", content: Content::Phrasing, attributes: HEADING_ATTRS, only_in: ALL },
    ElementRow {
        name: "a",
        description: "Hyperlink",
        content: Content::Phrasing,
        attributes: &[
            ("href", "Link target", &[]),
            ("target", "Browsing context", TARGET_VALUES),
            ("rel", "Relationship", &["nofollow", "noopener", "noreferrer", "external"]),
            ("name", "Anchor name", &[]),
        ],
        only_in: ALL,
    },
    ElementRow {
        name: "img",
        description: "Image",
        content: Content::Empty,
        attributes: &[
            ("src", "Image URL", &[]),
            ("alt", "Alternative text", &[]),
            ("width", "Width", &[]),
            ("height", "Height", &[]),
        ],
        only_in: ALL,
    },
    ElementRow { name: "br", description: "Line break", content: Content::Empty, attributes: &[], only_in: ALL },
    ElementRow { name: "hr", description: "Thematic break", content: Content::Empty, attributes: &[], only_in: ALL },
    ElementRow { name: "ul", description: "Unordered list", content: Content::Only(&["li"]), attributes: &[], only_in: ALL },
    ElementRow {
        name: "ol",
        description: "Ordered list",
        content: Content::Only(&["li"]),
        attributes: &[("start", "First number", &[]), ("type", "Numbering style", &["1", "a", "A", "i", "I"])],
        only_in: ALL,
    },
    ElementRow { name: "li", description: "List item", content: Content::Flow, attributes: &[], only_in: ALL },
    ElementRow { name: "dl", description: "Description list", content: Content::Only(&["dt", "dd"]), attributes: &[], only_in: ALL },
    ElementRow { name: "dt", description: "Description term", content: Content::Phrasing, attributes: &[], only_in: ALL },
    ElementRow { name: "dd", description: "Description details", content: Content::Flow, attributes: &[], only_in: ALL },
    ElementRow {
        name: "table",
        description: "Table",
        content: Content::Only(&["caption", "thead", "tbody", "tfoot", "tr"]),
        attributes: &[("border", "Border width", &[]), ("summary", "Table summary", &[])],
        only_in: ALL,
    },
    ElementRow { name: "caption", description: "Table caption", content: Content::Phrasing, attributes: &[], only_in: ALL },
    ElementRow { name: "thead", description: "Table header rows", content: Content::Only(&["tr"]), attributes: &[], only_in: ALL },
    ElementRow { name: "tbody", description: "Table body rows", content: Content::Only(&["tr"]), attributes: &[], only_in: ALL },
    ElementRow { name: "tfoot", description: "Table footer rows", content: Content::Only(&["tr"]), attributes: &[], only_in: ALL },
    ElementRow { name: "tr", description: "Table row", content: Content::Only(&["th", "td"]), attributes: &[], only_in: ALL },
    ElementRow {
        name: "th",
        description: "Header cell",
        content: Content::Flow,
        attributes: &[
            ("colspan", "Columns spanned", &[]),
            ("rowspan", "Rows spanned", &[]),
            ("scope", "Cells described", &["row", "col", "rowgroup", "colgroup"]),
        ],
        only_in: ALL,
    },
    ElementRow {
        name: "td",
        description: "Data cell",
        content: Content::Flow,
        attributes: &[("colspan", "Columns spanned", &[]), ("rowspan", "Rows spanned", &[])],
        only_in: ALL,
    },
    ElementRow {
        name: "form",
        description: "Form",
        content: Content::Flow,
        attributes: &[
            ("action", "Submission URL", &[]),
            ("method", "Submission method", &["get", "post"]),
            ("enctype", "Encoding", &["application/x-www-form-urlencoded", "multipart/form-data", "text/plain"]),
        ],
        only_in: ALL,
    },
    ElementRow {
        name: "input",
        description: "Form control",
        content: Content::Empty,
        attributes: &[
            ("type", "Control type", INPUT_TYPES),
            ("name", "Control name", &[]),
            ("value", "Control value", &[]),
            ("checked", "Initially checked", &["checked"]),
            ("disabled", "Disabled", &["disabled"]),
            ("readonly", "Read only", &["readonly"]),
            ("maxlength", "Maximum length", &[]),
            ("size", "Visible width", &[]),
        ],
        only_in: ALL,
    },
    ElementRow {
        name: "label",
        description: "Control caption",
        content: Content::Phrasing,
        attributes: &[("for", "Labelled control", &[])],
        only_in: ALL,
    },
    ElementRow {
        name: "select",
        description: "Option list",
        content: Content::Only(&["option", "optgroup"]),
        attributes: &[
            ("name", "Control name", &[]),
            ("multiple", "Allow multiple", &["multiple"]),
            ("size", "Visible rows", &[]),
            ("disabled", "Disabled", &["disabled"]),
        ],
        only_in: ALL,
    },
    ElementRow {
        name: "optgroup",
        description: "Option group",
        content: Content::Only(&["option"]),
        attributes: &[("label", "Group label", &[])],
        only_in: ALL,
    },
    ElementRow {
        name: "option",
        description: "Option",
        content: Content::Text,
        attributes: &[
            ("value", "Option value", &[]),
            ("selected", "Initially selected", &["selected"]),
            ("disabled", "Disabled", &["disabled"]),
        ],
        only_in: ALL,
    },
    ElementRow {
        name: "textarea",
        description: "Multi-line text control",
        content: Content::Text,
        attributes: &[("name", "Control name", &[]), ("rows", "Visible rows", &[]), ("cols", "Visible columns", &[])],
        only_in: ALL,
    },
    ElementRow {
        name: "button",
        description: "Button",
        content: Content::Phrasing,
        attributes: &[("type", "Button behavior", &["submit", "reset", "button"]), ("name", "Control name", &[])],
        only_in: ALL,
    },
    ElementRow { name: "fieldset", description: "Control group", content: Content::Flow, attributes: &[], only_in: ALL },
    ElementRow { name: "pre", description: "Preformatted text", content: Content::Phrasing, attributes: &[], only_in: ALL },
    ElementRow {
        name: "blockquote",
        description: "Block quotation",
        content: Content::Flow,
        attributes: &[("cite", "Source URL", &[])],
        only_in: ALL,
    },
    ElementRow { name: "address", description: "Contact information", content: Content::Flow, attributes: &[], only_in: ALL },
    ElementRow { name: "strong", description: "Strong importance", content: Content::Phrasing, attributes: &[], only_in: ALL },
    ElementRow { name: "em", description: "Emphasis", content: Content::Phrasing, attributes: &[], only_in: ALL },
    ElementRow { name: "b", description: "Bold text", content: Content::Phrasing, attributes: &[], only_in: ALL },
    ElementRow { name: "i", description: "Italic text", content: Content::Phrasing, attributes: &[], only_in: ALL },
    ElementRow { name: "code", description: "Code fragment", content: Content::Phrasing, attributes: &[], only_in: ALL },
    ElementRow { name: "small", description: "Small print", content: Content::Phrasing, attributes: &[], only_in: ALL },
    ElementRow { name: "sub", description: "Subscript", content: Content::Phrasing, attributes: &[], only_in: ALL },
    ElementRow { name: "sup", description: "Superscript", content: Content::Phrasing, attributes: &[], only_in: ALL },
    ElementRow {
        name: "abbr",
        description: "Abbreviation",
        content: Content::Phrasing,
        attributes: &[],
        only_in: ALL,
    },
    ElementRow { name: "section", description: "Generic section", content: Content::Flow, attributes: &[], only_in: HTML5_ONLY },
    ElementRow { name: "article", description: "Self-contained composition", content: Content::Flow, attributes: &[], only_in: HTML5_ONLY },
    ElementRow { name: "nav", description: "Navigation links", content: Content::Flow, attributes: &[], only_in: HTML5_ONLY },
    ElementRow { name: "header", description: "Introductory content", content: Content::Flow, attributes: &[], only_in: HTML5_ONLY },
    ElementRow { name: "footer", description: "Footer content", content: Content::Flow, attributes: &[], only_in: HTML5_ONLY },
    ElementRow { name: "main", description: "Main content", content: Content::Flow, attributes: &[], only_in: HTML5_ONLY },
    ElementRow { name: "aside", description: "Tangential content", content: Content::Flow, attributes: &[], only_in: HTML5_ONLY },
    ElementRow {
        name: "figure",
        description: "Self-contained figure",
        content: Content::Flow,
        attributes: &[],
        only_in: HTML5_ONLY,
    },
    ElementRow { name: "figcaption", description: "Figure caption", content: Content::Flow, attributes: &[], only_in: HTML5_ONLY },
    ElementRow {
        name: "video",
        description: "Video player",
        content: Content::Only(&["source", "track"]),
        attributes: &[
            ("src", "Video URL", &[]),
            ("controls", "Show controls", &["controls"]),
            ("preload", "Preload hint", &["none", "metadata", "auto"]),
        ],
        only_in: HTML5_ONLY,
    },
    ElementRow {
        name: "audio",
        description: "Audio player",
        content: Content::Only(&["source", "track"]),
        attributes: &[
            ("src", "Audio URL", &[]),
            ("controls", "Show controls", &["controls"]),
            ("preload", "Preload hint", &["none", "metadata", "auto"]),
        ],
        only_in: HTML5_ONLY,
    },
    ElementRow {
        name: "source",
        description: "Media source",
        content: Content::Empty,
        attributes: &[("src", "Media URL", &[]), ("type", "MIME type", &[])],
        only_in: HTML5_ONLY,
    },
    ElementRow {
        name: "track",
        description: "Timed text track",
        content: Content::Empty,
        attributes: &[("kind", "Track kind", &["subtitles", "captions", "descriptions", "chapters", "metadata"])],
        only_in: HTML5_ONLY,
    },
    ElementRow {
        name: "canvas",
        description: "Scriptable bitmap",
        content: Content::Flow,
        attributes: &[("width", "Width", &[]), ("height", "Height", &[])],
        only_in: HTML5_ONLY,
    },
    ElementRow { name: "center", description: "Centered block", content: Content::Flow, attributes: &[], only_in: TRANSITIONAL_ONLY },
    ElementRow {
        name: "font",
        description: "Font change",
        content: Content::Phrasing,
        attributes: &[("size", "Font size", &["1", "2", "3", "4", "5", "6", "7"]), ("color", "Text color", &[]), ("face", "Font face", &[])],
        only_in: TRANSITIONAL_ONLY,
    },
    ElementRow { name: "u", description: "Underlined text", content: Content::Phrasing, attributes: &[], only_in: TRANSITIONAL_ONLY },
    ElementRow { name: "s", description: "Strike-through text", content: Content::Phrasing, attributes: &[], only_in: TRANSITIONAL_ONLY },
    ElementRow { name: "strike", description: "Strike-through text", content: Content::Phrasing, attributes: &[], only_in: TRANSITIONAL_ONLY },
];

/// Attributes only valid in transitional documents
const PRESENTATIONAL_ATTRIBUTES: &[&str] = &["align", "bgcolor", "border"];

/// Attributes only valid in HTML5 documents
const HTML5_ATTRIBUTES: &[&str] = &["async", "charset", "manifest"];

fn global_attributes(flavor: HtmlFlavor) -> Vec<AttributeDefinition> {
    let mut attrs = vec![
        AttributeDefinition::new("id", "Unique identifier", &[]),
        AttributeDefinition::new("class", "Style classes", &[]),
        AttributeDefinition::new("style", "Inline style", &[]),
        AttributeDefinition::new("title", "Advisory title", &[]),
        AttributeDefinition::new("lang", "Language", &[]),
        AttributeDefinition::new("dir", "Text direction", DIR_VALUES),
    ];
    if flavor == HtmlFlavor::Html5 {
        attrs.push(AttributeDefinition::new("hidden", "Not rendered", &["hidden"]));
        attrs.push(AttributeDefinition::new("tabindex", "Tab order", &[]));
        attrs.push(AttributeDefinition::new(
            "contenteditable",
            "Editable content",
            &["true", "false"],
        ));
    }
    attrs
}

fn exists_in(only_in: &[HtmlFlavor], flavor: HtmlFlavor) -> bool {
    only_in.is_empty() || only_in.contains(&flavor)
}

fn attribute_allowed(name: &str, flavor: HtmlFlavor) -> bool {
    if PRESENTATIONAL_ATTRIBUTES.contains(&name) {
        return flavor == HtmlFlavor::Transitional;
    }
    if HTML5_ATTRIBUTES.contains(&name) {
        return flavor == HtmlFlavor::Html5;
    }
    true
}

/// Build the element definitions for one flavor
fn elements(flavor: HtmlFlavor) -> Vec<ElementDefinition> {
    let present: Vec<&str> = ELEMENTS
        .iter()
        .filter(|row| exists_in(row.only_in, flavor))
        .map(|row| row.name)
        .collect();
    let keep = |names: &[&str]| -> Vec<String> {
        names
            .iter()
            .filter(|n| present.contains(*n))
            .map(|n| n.to_string())
            .collect()
    };

    ELEMENTS
        .iter()
        .filter(|row| exists_in(row.only_in, flavor))
        .map(|row| {
            let children = match row.content {
                Content::Flow => {
                    let mut flow = keep(BLOCK);
                    flow.extend(keep(PHRASING));
                    Some(flow)
                }
                Content::Phrasing => Some(keep(PHRASING)),
                Content::Only(names) => Some(keep(names)),
                Content::Text | Content::Empty => Some(Vec::new()),
            };

            let mut attributes: Vec<AttributeDefinition> = row
                .attributes
                .iter()
                .filter(|(name, _, _)| attribute_allowed(name, flavor))
                .map(|(name, description, values)| {
                    AttributeDefinition::new(name, description, values)
                })
                .collect();

            if row.name == "input" && flavor == HtmlFlavor::Html5 {
                if let Some(kind) = attributes.iter_mut().find(|a| a.name == "type") {
                    kind.values
                        .extend(INPUT_TYPES_HTML5.iter().map(|t| t.to_string()));
                }
                attributes.push(AttributeDefinition::new("placeholder", "Hint text", &[]));
                attributes.push(AttributeDefinition::new("required", "Required", &["required"]));
            }

            ElementDefinition {
                name: row.name.to_string(),
                description: row.description.to_string(),
                children,
                attributes,
            }
        })
        .collect()
}

/// Build the definition of a built-in HTML schema
pub fn html_definition(
    name: &str,
    fpi: Option<&str>,
    doctype: &str,
    flavor: HtmlFlavor,
) -> SchemaDefinition {
    SchemaDefinition {
        name: name.to_string(),
        fpi: fpi.map(str::to_string),
        doctype: Some(doctype.to_string()),
        top_level: vec!["html".to_string()],
        global_attributes: global_attributes(flavor),
        elements: elements(flavor),
    }
}

/// Definitions of every built-in schema, default first
pub fn builtin_definitions() -> Vec<SchemaDefinition> {
    BUILTIN_DOCTYPES
        .iter()
        .map(|dt| html_definition(dt.name, dt.fpi, dt.doctype, dt.flavor))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TableProvider;

    fn provider(name: &str) -> TableProvider {
        let definition = builtin_definitions()
            .into_iter()
            .find(|d| d.name == name)
            .unwrap();
        TableProvider::new(definition)
    }

    fn names(candidates: Vec<crate::completion::Candidate>) -> Vec<String> {
        candidates.into_iter().map(|c| c.display_text).collect()
    }

    #[test]
    fn test_default_schema_is_first() {
        let defs = builtin_definitions();
        assert_eq!(defs[0].name, DEFAULT_SCHEMA_NAME);
        assert_eq!(defs[0].fpi, None);
        assert_eq!(defs.len(), 5);
    }

    #[test]
    fn test_public_identifiers_unique() {
        let defs = builtin_definitions();
        let mut fpis: Vec<_> = defs.iter().filter_map(|d| d.fpi.clone()).collect();
        let count = fpis.len();
        fpis.sort();
        fpis.dedup();
        assert_eq!(fpis.len(), count);
    }

    #[test]
    fn test_root_is_html() {
        assert_eq!(names(provider("html5").elements()), ["html"]);
    }

    #[test]
    fn test_html_children() {
        assert_eq!(names(provider("html5").child_elements("html")), ["head", "body"]);
    }

    #[test]
    fn test_flavor_elements() {
        let html5 = names(provider("html5").child_elements("body"));
        assert!(html5.contains(&"section".to_string()));
        assert!(!html5.contains(&"font".to_string()));

        let strict = names(provider("xhtml1-strict").child_elements("body"));
        assert!(!strict.contains(&"section".to_string()));
        assert!(!strict.contains(&"center".to_string()));
        assert!(strict.contains(&"div".to_string()));

        let loose = names(provider("html401-transitional").child_elements("body"));
        assert!(loose.contains(&"center".to_string()));
        assert!(loose.contains(&"font".to_string()));
    }

    #[test]
    fn test_paragraph_allows_only_phrasing() {
        let children = names(provider("html5").child_elements("p"));
        assert!(children.contains(&"span".to_string()));
        assert!(!children.contains(&"div".to_string()));
        assert!(!children.contains(&"font".to_string()));
    }

    #[test]
    fn test_void_elements_have_no_children() {
        assert!(provider("html5").child_elements("br").is_empty());
        assert!(provider("html5").child_elements("img").is_empty());
    }

    #[test]
    fn test_paragraph_attributes() {
        let html5 = names(provider("html5").attributes("p"));
        assert_eq!(html5[0], "id");
        assert!(html5.contains(&"class".to_string()));
        assert!(!html5.contains(&"align".to_string()));

        let loose = names(provider("xhtml1-transitional").attributes("p"));
        assert_eq!(loose[0], "align");
    }

    #[test]
    fn test_input_types_by_flavor() {
        let html5 = names(provider("html5").attribute_values("input", "type"));
        assert!(html5.contains(&"email".to_string()));
        let strict = names(provider("html401-strict").attribute_values("input", "type"));
        assert!(strict.contains(&"checkbox".to_string()));
        assert!(!strict.contains(&"email".to_string()));
    }

    #[test]
    fn test_global_attribute_values() {
        assert_eq!(
            names(provider("html5").attribute_values("span", "dir")),
            ["ltr", "rtl"]
        );
    }
}

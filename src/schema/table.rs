//! Table-driven schemas
//!
//! A [`SchemaDefinition`] lists elements, their permitted children and their
//! attributes. It is what schema files deserialize into and what the
//! built-in HTML schemas are made of. [`TableProvider`] answers completion
//! queries from a definition.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::provider::CompletionProvider;
use crate::completion::Candidate;
use crate::error::Result;

/// A complete schema description
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaDefinition {
    /// Unique schema name
    pub name: String,

    /// Doctype public identifier this schema answers to
    #[serde(default)]
    pub fpi: Option<String>,

    /// Full doctype declaration offered in doctype completions
    #[serde(default)]
    pub doctype: Option<String>,

    /// Elements valid at the root; empty means every element
    #[serde(default)]
    pub top_level: Vec<String>,

    /// Attributes valid on every element
    #[serde(default)]
    pub global_attributes: Vec<AttributeDefinition>,

    /// Element definitions, in completion order
    #[serde(default)]
    pub elements: Vec<ElementDefinition>,
}

/// One element
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementDefinition {
    /// Element name
    pub name: String,

    /// Description shown with the candidate
    #[serde(default)]
    pub description: String,

    /// Permitted children; `None` permits every element
    #[serde(default)]
    pub children: Option<Vec<String>>,

    /// Element-specific attributes
    #[serde(default)]
    pub attributes: Vec<AttributeDefinition>,
}

/// One attribute and its enumerated values
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AttributeDefinition {
    /// Attribute name
    pub name: String,

    /// Description shown with the candidate
    #[serde(default)]
    pub description: String,

    /// Enumerated legal values; empty for free-form attributes
    #[serde(default)]
    pub values: Vec<String>,
}

impl AttributeDefinition {
    /// Create an attribute definition
    pub fn new(name: &str, description: &str, values: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// Completion provider backed by a [`SchemaDefinition`]
#[derive(Debug, Clone)]
pub struct TableProvider {
    definition: SchemaDefinition,
    index: HashMap<String, usize>,
}

impl TableProvider {
    /// Index a definition for lookup. Element lookups are case-insensitive.
    pub fn new(definition: SchemaDefinition) -> Self {
        let mut index = HashMap::new();
        for (i, element) in definition.elements.iter().enumerate() {
            index.entry(element.name.to_ascii_lowercase()).or_insert(i);
        }
        Self { definition, index }
    }

    /// The underlying definition
    pub fn definition(&self) -> &SchemaDefinition {
        &self.definition
    }

    fn element(&self, name: &str) -> Option<&ElementDefinition> {
        self.index
            .get(&name.to_ascii_lowercase())
            .map(|&i| &self.definition.elements[i])
    }

    fn element_candidate(&self, name: &str) -> Candidate {
        let description = self
            .element(name)
            .map(|e| e.description.clone())
            .unwrap_or_default();
        Candidate::element(name, description)
    }

    fn all_elements(&self) -> Vec<Candidate> {
        self.definition
            .elements
            .iter()
            .map(|e| Candidate::element(&e.name, &e.description))
            .collect()
    }

    /// Elements valid at the root
    pub fn elements(&self) -> Vec<Candidate> {
        if self.definition.top_level.is_empty() {
            return self.all_elements();
        }
        self.definition
            .top_level
            .iter()
            .map(|name| self.element_candidate(name))
            .collect()
    }

    /// Elements valid inside `parent`; unknown parents permit everything
    pub fn child_elements(&self, parent: &str) -> Vec<Candidate> {
        match self.element(parent).and_then(|e| e.children.as_ref()) {
            Some(children) => children
                .iter()
                .map(|name| self.element_candidate(name))
                .collect(),
            None => self.all_elements(),
        }
    }

    /// Element-specific attributes followed by global ones, without repeats
    pub fn attributes(&self, element: &str) -> Vec<Candidate> {
        let specific = self
            .element(element)
            .map(|e| e.attributes.as_slice())
            .unwrap_or_default();

        let mut seen = HashSet::new();
        specific
            .iter()
            .chain(self.definition.global_attributes.iter())
            .filter(|a| seen.insert(a.name.to_ascii_lowercase()))
            .map(|a| Candidate::attribute(&a.name, &a.description))
            .collect()
    }

    /// Enumerated values; element-specific definitions shadow global ones
    pub fn attribute_values(&self, element: &str, attribute: &str) -> Vec<Candidate> {
        let find = |attrs: &[AttributeDefinition]| {
            attrs
                .iter()
                .find(|a| a.name.eq_ignore_ascii_case(attribute))
                .cloned()
        };

        let definition = self
            .element(element)
            .and_then(|e| find(e.attributes.as_slice()))
            .or_else(|| find(self.definition.global_attributes.as_slice()));

        definition
            .map(|a| {
                a.values
                    .iter()
                    .map(|v| Candidate::value(v, &a.description))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompletionProvider for TableProvider {
    async fn element_completion_data(&self) -> Result<Vec<Candidate>> {
        Ok(self.elements())
    }

    async fn child_element_completion_data(&self, parent: &str) -> Result<Vec<Candidate>> {
        Ok(self.child_elements(parent))
    }

    async fn attribute_completion_data(&self, element: &str) -> Result<Vec<Candidate>> {
        Ok(self.attributes(element))
    }

    async fn attribute_value_completion_data(
        &self,
        element: &str,
        attribute: &str,
    ) -> Result<Vec<Candidate>> {
        Ok(self.attribute_values(element, attribute))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TableProvider {
        TableProvider::new(SchemaDefinition {
            name: "sample".to_string(),
            top_level: vec!["root".to_string()],
            global_attributes: vec![
                AttributeDefinition::new("id", "Identifier", &[]),
                AttributeDefinition::new("dir", "Direction", &["ltr", "rtl"]),
            ],
            elements: vec![
                ElementDefinition {
                    name: "root".to_string(),
                    description: "Root".to_string(),
                    children: Some(vec!["item".to_string(), "br".to_string()]),
                    attributes: vec![AttributeDefinition::new("version", "", &["1", "2"])],
                },
                ElementDefinition {
                    name: "item".to_string(),
                    description: "Item".to_string(),
                    children: None,
                    attributes: vec![
                        AttributeDefinition::new("dir", "Item direction", &["up", "down"]),
                        AttributeDefinition::new("id", "Item id", &[]),
                    ],
                },
                ElementDefinition {
                    name: "br".to_string(),
                    description: "Break".to_string(),
                    children: Some(Vec::new()),
                    attributes: Vec::new(),
                },
            ],
            ..SchemaDefinition::default()
        })
    }

    fn names(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.display_text.as_str()).collect()
    }

    #[test]
    fn test_top_level() {
        let provider = sample();
        let elements = provider.elements();
        assert_eq!(names(&elements), ["root"]);
        assert_eq!(elements[0].description, "Root");
    }

    #[test]
    fn test_top_level_defaults_to_all() {
        let mut definition = sample().definition().clone();
        definition.top_level.clear();
        let provider = TableProvider::new(definition);
        assert_eq!(names(&provider.elements()), ["root", "item", "br"]);
    }

    #[test]
    fn test_children() {
        let provider = sample();
        assert_eq!(names(&provider.child_elements("ROOT")), ["item", "br"]);
        assert_eq!(names(&provider.child_elements("item")), ["root", "item", "br"]);
        assert!(provider.child_elements("br").is_empty());
        assert_eq!(provider.child_elements("unknown").len(), 3);
    }

    #[test]
    fn test_attributes_specific_then_global_without_repeats() {
        let provider = sample();
        assert_eq!(names(&provider.attributes("item")), ["dir", "id"]);
        assert_eq!(names(&provider.attributes("root")), ["version", "id", "dir"]);
        assert_eq!(names(&provider.attributes("nope")), ["id", "dir"]);
    }

    #[test]
    fn test_attribute_values() {
        let provider = sample();
        assert_eq!(names(&provider.attribute_values("item", "dir")), ["up", "down"]);
        assert_eq!(names(&provider.attribute_values("root", "DIR")), ["ltr", "rtl"]);
        assert!(provider.attribute_values("root", "id").is_empty());
        assert!(provider.attribute_values("root", "missing").is_empty());
    }

    #[test]
    fn test_provider_trait() {
        let provider = sample();
        tokio_test::block_on(async {
            let attrs = provider.attribute_completion_data("root").await.unwrap();
            assert_eq!(attrs.len(), 3);
            tokio_test::assert_ok!(provider.preload().await);
        });
    }

    #[test]
    fn test_deserialize_toml() {
        let definition: SchemaDefinition = toml::from_str(
            r#"
            name = "tiny"
            fpi = "-//TINY//EN"
            top_level = ["doc"]

            [[global_attributes]]
            name = "id"

            [[elements]]
            name = "doc"
            children = ["para"]

            [[elements]]
            name = "para"
            description = "Paragraph"

            [[elements.attributes]]
            name = "align"
            values = ["left", "right"]
            "#,
        )
        .unwrap();

        assert_eq!(definition.name, "tiny");
        assert_eq!(definition.fpi.as_deref(), Some("-//TINY//EN"));
        assert_eq!(definition.elements.len(), 2);
        assert_eq!(definition.elements[1].attributes[0].values, ["left", "right"]);
        assert_eq!(definition.elements[1].children, None);
    }
}

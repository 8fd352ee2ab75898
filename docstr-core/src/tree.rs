//! Core data structures for the parsed document tree.
//!
//! Every node is built once by the parse engine and never mutated afterwards.
//! The tree owns all of its content; there are no back references, so parsed
//! documents can be shared freely across threads.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::keywords;

/// Title of the implicit section holding text before the first header.
pub const SUMMARY: &str = "SUMMARY";

/// A single node of a section body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocNode {
    Item(Item),
    Todo(Todo),
    Paragraph(Paragraph),
    Code(CodeBlock),
}

/// A paragraph is either a run of contiguous text lines or a nested block of
/// deeper-indented nodes, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Paragraph {
    Lines(Vec<String>),
    Nested(Vec<DocNode>),
}

/// One documented entry of an item-bearing section: a parameter, an
/// attribute, a raised condition, a return value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Name token, taken verbatim from the source line.
    pub name: String,
    /// Declared type, if any. May carry punctuation and markup.
    #[serde(rename = "type")]
    pub ty: Option<String>,
    /// First line of free description text.
    pub desc: String,
    /// Indented continuation blocks, in source order.
    pub more: Vec<DocNode>,
}

/// A single actionable note from a todo-bearing section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub todo: String,
    pub more: Vec<DocNode>,
}

/// A verbatim code block. Lines are stored dedented to the block's own base;
/// internal indentation and blank lines are preserved exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub lang: Option<String>,
    pub code: Vec<String>,
}

/// A titled block of the document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub body: Vec<DocNode>,
}

/// A parsed docstring: sections keyed by title, in source order.
///
/// Titles are unique. When the same section keyword appears twice in one
/// docstring, the second body is appended to the existing slot; the slot
/// keeps the position of the first occurrence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    sections: IndexMap<String, Section>,
}

impl Document {
    pub fn new() -> Self {
        Document {
            sections: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Insert a section, appending its body when the title already exists.
    pub fn insert(&mut self, section: Section) {
        match self.sections.get_mut(&section.title) {
            Some(existing) => existing.body.extend(section.body),
            None => {
                self.sections.insert(section.title.clone(), section);
            }
        }
    }

    /// Look up a section by title.
    ///
    /// The exact title wins; otherwise section aliases are consulted, so
    /// `get("Parameters")` finds a section titled `Args`. Alias matches are
    /// resolved in insertion order.
    pub fn get(&self, title: &str) -> Option<&Section> {
        if let Some(section) = self.sections.get(title) {
            return Some(section);
        }
        let wanted = keywords::canonical(title);
        self.sections
            .values()
            .find(|s| keywords::canonical(&s.title) == wanted)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.get(title).is_some()
    }

    /// Sections in source order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    /// Section titles in source order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(|k| k.as_str())
    }
}

impl Index<&str> for Document {
    type Output = Section;

    fn index(&self, title: &str) -> &Section {
        self.get(title)
            .unwrap_or_else(|| panic!("no section titled '{title}'"))
    }
}

impl Paragraph {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Paragraph::Lines(_))
    }

    /// Text lines of a leaf paragraph.
    pub fn lines(&self) -> Option<&[String]> {
        match self {
            Paragraph::Lines(lines) => Some(lines),
            Paragraph::Nested(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(text: &str) -> DocNode {
        DocNode::Paragraph(Paragraph::Lines(vec![text.to_string()]))
    }

    #[test]
    fn test_insert_preserves_order() {
        let mut doc = Document::new();
        doc.insert(Section {
            title: SUMMARY.to_string(),
            body: vec![para("summary")],
        });
        doc.insert(Section {
            title: "Args".to_string(),
            body: vec![],
        });
        doc.insert(Section {
            title: "Returns".to_string(),
            body: vec![],
        });

        let titles: Vec<_> = doc.titles().collect();
        assert_eq!(titles, vec!["SUMMARY", "Args", "Returns"]);
    }

    #[test]
    fn test_insert_duplicate_appends() {
        let mut doc = Document::new();
        doc.insert(Section {
            title: "Args".to_string(),
            body: vec![para("first")],
        });
        doc.insert(Section {
            title: "Returns".to_string(),
            body: vec![para("ret")],
        });
        doc.insert(Section {
            title: "Args".to_string(),
            body: vec![para("second")],
        });

        assert_eq!(doc.len(), 2);
        assert_eq!(doc["Args"].body.len(), 2);
        let titles: Vec<_> = doc.titles().collect();
        assert_eq!(titles, vec!["Args", "Returns"]);
    }

    #[test]
    fn test_get_resolves_aliases() {
        let mut doc = Document::new();
        doc.insert(Section {
            title: "Args".to_string(),
            body: vec![para("x")],
        });

        assert!(doc.get("Args").is_some());
        assert!(doc.get("Parameters").is_some());
        assert!(doc.get("Arguments").is_some());
        assert!(doc.get("Returns").is_none());
    }

    #[test]
    fn test_get_prefers_exact_title() {
        let mut doc = Document::new();
        doc.insert(Section {
            title: "Args".to_string(),
            body: vec![para("a")],
        });
        doc.insert(Section {
            title: "Parameters".to_string(),
            body: vec![para("p")],
        });

        assert_eq!(doc["Parameters"].body, vec![para("p")]);
        assert_eq!(doc["Args"].body, vec![para("a")]);
    }
}

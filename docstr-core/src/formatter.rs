//! Canonical re-rendering of parsed documents.
//!
//! The serializer walks a document and emits canonical text for one style:
//! a fixed indentation unit, one blank line between top-level blocks, items
//! packed tightly, code blocks byte-identical to their captured content.
//! Formatting already-canonical text reproduces it exactly.

use serde::{Deserialize, Serialize};

use crate::style::{BodyIndent, Style};
use crate::tree::{CodeBlock, DocNode, Document, Item, Paragraph, Section, Todo, SUMMARY};

/// Configuration for the canonical renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattingRules {
    /// String to use for one level of indentation (usually 4 spaces)
    pub indent_string: String,

    /// Maximum number of consecutive blank lines allowed
    pub max_blank_lines: usize,

    /// The character to use for todo bullets
    pub todo_marker: char,
}

impl Default for FormattingRules {
    fn default() -> Self {
        Self {
            indent_string: "    ".to_string(),
            max_blank_lines: 1,
            todo_marker: '-',
        }
    }
}

/// Render `doc` as canonical text in `style`.
pub fn serialize_document(doc: &Document, style: &dyn Style, rules: &FormattingRules) -> String {
    let serializer = DocSerializer::new(style, rules.clone());
    serializer.serialize(doc)
}

pub struct DocSerializer<'a> {
    style: &'a dyn Style,
    rules: FormattingRules,
    output: String,
    indent_level: usize,
    consecutive_newlines: usize,
}

impl<'a> DocSerializer<'a> {
    pub fn new(style: &'a dyn Style, rules: FormattingRules) -> Self {
        Self {
            style,
            rules,
            output: String::new(),
            indent_level: 0,
            consecutive_newlines: 2, // Start as if we have blank lines
        }
    }

    pub fn serialize(mut self, doc: &Document) -> String {
        for section in doc.sections() {
            self.write_section(section);
        }
        self.output
    }

    fn indent(&self) -> String {
        self.rules.indent_string.repeat(self.indent_level)
    }

    fn write_line(&mut self, text: &str) {
        self.output.push_str(&self.indent());
        self.output.push_str(text);
        self.output.push('\n');
        self.consecutive_newlines = 1;
    }

    fn ensure_blank_lines(&mut self, count: usize) {
        let count = count.min(self.rules.max_blank_lines.max(1));
        let target_newlines = count + 1;
        while self.consecutive_newlines < target_newlines {
            self.output.push('\n');
            self.consecutive_newlines += 1;
        }
    }

    fn write_section(&mut self, section: &Section) {
        if section.title == SUMMARY {
            self.write_body(&section.body);
            return;
        }
        self.ensure_blank_lines(1);
        for line in self.style.header_lines(&section.title) {
            self.write_line(&line);
        }
        let body_indent = match self.style.body_indent() {
            BodyIndent::Anchored => 1,
            BodyIndent::Relaxed => 0,
        };
        self.indent_level += body_indent;
        self.write_body(&section.body);
        self.indent_level -= body_indent;
    }

    fn write_body(&mut self, nodes: &[DocNode]) {
        let mut prev: Option<&DocNode> = None;
        for node in nodes {
            if blank_before(node, prev) {
                self.ensure_blank_lines(1);
            }
            self.write_node(node, prev);
            prev = Some(node);
        }
    }

    fn write_node(&mut self, node: &DocNode, prev: Option<&DocNode>) {
        match node {
            DocNode::Paragraph(Paragraph::Lines(lines)) => {
                for line in lines {
                    self.write_line(line);
                }
            }
            DocNode::Paragraph(Paragraph::Nested(children)) => {
                self.indent_level += 1;
                self.write_body(children);
                self.indent_level -= 1;
            }
            DocNode::Item(item) => self.write_item(item),
            DocNode::Todo(todo) => self.write_todo(todo),
            DocNode::Code(code) => self.write_code(code, prev),
        }
    }

    fn write_item(&mut self, item: &Item) {
        let head = self.style.item_head(item);
        self.write_line(&head);
        self.indent_level += 1;
        if !self.style.inline_desc() && !item.desc.is_empty() {
            self.write_line(&item.desc);
        }
        self.write_body(&item.more);
        self.indent_level -= 1;
    }

    fn write_todo(&mut self, todo: &Todo) {
        let line = format!("{} {}", self.rules.todo_marker, todo.todo);
        self.write_line(&line);
        self.indent_level += 1;
        self.write_body(&todo.more);
        self.indent_level -= 1;
    }

    fn write_code(&mut self, code: &CodeBlock, prev: Option<&DocNode>) {
        // A paragraph ending in "::" already announced the block; anything
        // else needs its own fence line.
        if !fence_attached(prev) {
            match &code.lang {
                Some(lang) => {
                    let line = format!(".. code:: {lang}");
                    self.write_line(&line);
                }
                None => self.write_line("::"),
            }
        }
        self.indent_level += 1;
        for line in &code.code {
            if line.is_empty() {
                // Verbatim blanks bypass the blank-line collapsing.
                self.output.push('\n');
                self.consecutive_newlines += 1;
            } else {
                self.write_line(line);
            }
        }
        self.indent_level -= 1;
    }
}

fn fence_attached(prev: Option<&DocNode>) -> bool {
    match prev {
        Some(DocNode::Paragraph(Paragraph::Lines(lines))) => {
            lines.last().is_some_and(|l| l.ends_with("::"))
        }
        _ => false,
    }
}

/// Whether `node` gets a separating blank line after `prev`.
fn blank_before(node: &DocNode, prev: Option<&DocNode>) -> bool {
    let Some(prev) = prev else {
        return false;
    };
    match node {
        // A nested block continues the paragraph it follows; a code block
        // attaches to a "::" announcement.
        DocNode::Paragraph(Paragraph::Nested(_)) => {
            !matches!(prev, DocNode::Paragraph(Paragraph::Lines(_)))
        }
        DocNode::Code(_) => !fence_attached(Some(prev)),
        DocNode::Paragraph(Paragraph::Lines(_)) => true,
        // Items and todos always pack tightly against each other.
        DocNode::Item(_) | DocNode::Todo(_) => {
            !matches!(prev, DocNode::Item(_) | DocNode::Todo(_))
        }
    }
}

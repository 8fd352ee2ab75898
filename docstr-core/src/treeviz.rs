//! Treeviz renderer for parsed documents
//!
//! Treeviz is a visual representation of the document tree, meant for
//! debugging and golden tests. It is a pure read-only walk: every node kind
//! renders with its recorded fields, in tree order, and the call never
//! fails.
//!
//! The format is the usual box-drawing tree with one icon per node kind:
//!
//!     ⧉ Document (2 sections)
//!     ├─ § SUMMARY
//!     │  └─ ¶ 1 line
//!     │     └─ ↵ Example docstring.
//!     └─ § Args
//!        └─ ≔ param1 (int): The first parameter.
//!
//! Icons
//!     Document: ⧉
//!     Section: §
//!     Item: ≔
//!     Todo: •
//!     Paragraph: ¶
//!     CodeBlock: 𝒱
//!     Text line: ↵

use crate::tree::{DocNode, Document, Paragraph};

/// Options for the treeviz renderer.
#[derive(Debug, Clone, Copy)]
pub struct TreevizOptions {
    /// Render text lines under paragraphs and code blocks.
    pub show_text: bool,
}

impl Default for TreevizOptions {
    fn default() -> Self {
        Self { show_text: true }
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    to_treeviz_str_with_options(doc, TreevizOptions::default())
}

pub fn to_treeviz_str_with_options(doc: &Document, options: TreevizOptions) -> String {
    let mut output = format!("⧉ Document ({} sections)\n", doc.len());
    let count = doc.len();
    for (i, section) in doc.sections().enumerate() {
        let is_last = i == count - 1;
        let connector = if is_last { "└─" } else { "├─" };
        output.push_str(&format!("{} § {}\n", connector, section.title));
        let prefix = if is_last { "   " } else { "│  " };
        format_children(&section.body, prefix, options, &mut output);
    }
    output
}

fn format_children(nodes: &[DocNode], prefix: &str, options: TreevizOptions, output: &mut String) {
    let count = nodes.len();
    for (i, node) in nodes.iter().enumerate() {
        format_node(node, prefix, i == count - 1, options, output);
    }
}

fn format_node(
    node: &DocNode,
    prefix: &str,
    is_last: bool,
    options: TreevizOptions,
    output: &mut String,
) {
    let connector = if is_last { "└─" } else { "├─" };
    let child_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });

    match node {
        DocNode::Paragraph(Paragraph::Lines(lines)) => {
            let label = if lines.len() == 1 { "1 line".to_string() } else { format!("{} lines", lines.len()) };
            output.push_str(&format!("{prefix}{connector} ¶ {label}\n"));
            if options.show_text {
                format_text_lines(lines, &child_prefix, output);
            }
        }
        DocNode::Paragraph(Paragraph::Nested(children)) => {
            output.push_str(&format!("{prefix}{connector} ¶ nested block\n"));
            format_children(children, &child_prefix, options, output);
        }
        DocNode::Item(item) => {
            let head = match &item.ty {
                Some(ty) => format!("{} ({}): {}", item.name, ty, item.desc),
                None => format!("{}: {}", item.name, item.desc),
            };
            output.push_str(&format!("{prefix}{connector} ≔ {head}\n"));
            format_children(&item.more, &child_prefix, options, output);
        }
        DocNode::Todo(todo) => {
            output.push_str(&format!("{prefix}{connector} • {}\n", todo.todo));
            format_children(&todo.more, &child_prefix, options, output);
        }
        DocNode::Code(code) => {
            let label = match &code.lang {
                Some(lang) => format!("code ({lang})"),
                None => "code".to_string(),
            };
            output.push_str(&format!("{prefix}{connector} 𝒱 {label}\n"));
            if options.show_text {
                format_text_lines(&code.code, &child_prefix, output);
            }
        }
    }
}

fn format_text_lines(lines: &[String], prefix: &str, output: &mut String) {
    let count = lines.len();
    for (i, line) in lines.iter().enumerate() {
        let connector = if i == count - 1 { "└─" } else { "├─" };
        output.push_str(&format!("{prefix}{connector} ↵ {line}\n"));
    }
}

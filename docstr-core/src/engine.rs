//! The shared line-driven tree builder.
//!
//! Both built-in grammars are this one walk parameterized by a style's
//! matchers. The walk owns every node-construction invariant: paragraphs are
//! grouped by contiguous blank-free runs, runs of blank lines collapse to a
//! single separator, deeper continuation blocks become nested composite
//! paragraphs (or verbatim code when a fence announced them), and item and
//! todo continuations are split the same way.
//!
//! Grammar failure is narrow and structural: a recognized header whose
//! section has no body, a body indented past where the style anchors it, or
//! top-level text appearing where only a header may. Everything else folds
//! into prose rather than erroring.

use crate::error::StyleError;
use crate::keywords::{self, SectionKind};
use crate::lines::{classify, Line, LineKind};
use crate::style::{BodyIndent, ItemStart, Style};
use crate::tree::{CodeBlock, DocNode, Document, Item, Paragraph, Section, Todo, SUMMARY};

/// Parse `source` with `style`'s grammar.
pub fn parse_with(style: &dyn Style, source: &str) -> Result<Document, StyleError> {
    let lines = classify(source, style);
    let mut doc = Document::new();

    let (summary, mut i) = parse_block(style, &lines, 0, 0, SectionKind::Prose);
    if !summary.is_empty() {
        doc.insert(Section {
            title: SUMMARY.to_string(),
            body: summary,
        });
    }

    while i < lines.len() {
        let line = &lines[i];
        if line.is_blank() {
            i += 1;
            continue;
        }
        let title = match &line.kind {
            LineKind::Header { title } => title.clone(),
            _ => {
                return Err(mismatch(
                    style,
                    line,
                    "expected a section header at the top level",
                ));
            }
        };
        let header_index = i;
        i += 1;

        let first = lines[i..].iter().find(|l| !l.is_blank());
        let base = match first {
            Some(l) => l.level,
            None => 0,
        };
        if style.body_indent() == BodyIndent::Anchored && base > 1 {
            return Err(mismatch(
                style,
                first.unwrap_or(line),
                "continuation line before any content in the section body",
            ));
        }

        let kind = keywords::kind_of(&title);
        let (body, next) = parse_block(style, &lines, i, base, kind);
        if body.is_empty() {
            return Err(mismatch(
                style,
                &lines[header_index],
                "section has no body",
            ));
        }
        doc.insert(Section { title, body });
        i = next;
    }

    Ok(doc)
}

fn mismatch(style: &dyn Style, line: &Line, reason: &str) -> StyleError {
    StyleError::GrammarMismatch {
        style: style.name().to_string(),
        line: line.number,
        reason: reason.to_string(),
    }
}

/// Build the node sequence of one block at indentation `base`.
///
/// Stops at the first line shallower than `base`, or at a top-level header.
/// Returns the nodes and the index of the first unconsumed line.
fn parse_block(
    style: &dyn Style,
    lines: &[Line],
    start: usize,
    base: usize,
    kind: SectionKind,
) -> (Vec<DocNode>, usize) {
    let mut nodes: Vec<DocNode> = Vec::new();
    let mut run: Vec<String> = Vec::new();
    // Set while the last same-level line announced a literal block.
    let mut pending_fence: Option<usize> = None;
    let mut i = start;

    while i < lines.len() {
        let line = &lines[i];
        if line.is_blank() {
            flush(&mut nodes, &mut run);
            i += 1;
            continue;
        }
        if line.level < base {
            break;
        }
        if line.level == 0 && matches!(line.kind, LineKind::Header { .. }) {
            break;
        }

        if line.level > base {
            flush(&mut nodes, &mut run);
            if let Some(fence_leading) = pending_fence.take() {
                let (code, next) = capture_code(lines, i, fence_leading, None);
                nodes.push(DocNode::Code(code));
                i = next;
            } else {
                let (children, next) = parse_block(style, lines, i, line.level, SectionKind::Prose);
                if !children.is_empty() {
                    nodes.push(DocNode::Paragraph(Paragraph::Nested(children)));
                }
                i = next;
            }
            continue;
        }

        // line.level == base
        pending_fence = None;
        match &line.kind {
            LineKind::Item(item) if kind == SectionKind::Items => {
                flush(&mut nodes, &mut run);
                let (more, next) = parse_block(style, lines, i + 1, base + 1, SectionKind::Prose);
                nodes.push(DocNode::Item(build_item(style, item, more)));
                i = next;
            }
            LineKind::Fence {
                lang,
                standalone: true,
            } => {
                flush(&mut nodes, &mut run);
                let (code, next) = capture_code(lines, i + 1, line.leading(), lang.clone());
                nodes.push(DocNode::Code(code));
                i = next;
            }
            LineKind::Fence {
                standalone: false, ..
            } => {
                run.push(line.content().to_string());
                pending_fence = Some(line.leading());
                i += 1;
            }
            _ => {
                if kind == SectionKind::Todos {
                    if let Some(text) = strip_bullet(line.content()) {
                        flush(&mut nodes, &mut run);
                        let (more, next) =
                            parse_block(style, lines, i + 1, base + 1, SectionKind::Prose);
                        nodes.push(DocNode::Todo(Todo {
                            todo: text.to_string(),
                            more,
                        }));
                        i = next;
                        continue;
                    }
                }
                run.push(line.content().to_string());
                i += 1;
            }
        }
    }

    flush(&mut nodes, &mut run);
    (nodes, i)
}

fn flush(nodes: &mut Vec<DocNode>, run: &mut Vec<String>) {
    if !run.is_empty() {
        nodes.push(DocNode::Paragraph(Paragraph::Lines(std::mem::take(run))));
    }
}

fn strip_bullet(content: &str) -> Option<&str> {
    content
        .strip_prefix("- ")
        .or_else(|| content.strip_prefix("* "))
        .map(str::trim)
}

fn build_item(style: &dyn Style, start: &ItemStart, mut more: Vec<DocNode>) -> Item {
    let mut desc = start.desc.clone();
    if !style.inline_desc() && desc.is_empty() {
        // The description is the first continuation line.
        if let Some(DocNode::Paragraph(Paragraph::Lines(lines))) = more.first_mut() {
            if !lines.is_empty() {
                desc = lines.remove(0);
            }
            if lines.is_empty() {
                more.remove(0);
            }
        }
    }
    Item {
        name: start.name.clone(),
        ty: start.ty.clone(),
        desc,
        more,
    }
}

/// Capture a verbatim block: every following line indented deeper than the
/// fence, blank lines included. Trailing blanks belong to the surrounding
/// layout, and the captured lines are dedented to the block's own base.
fn capture_code(
    lines: &[Line],
    start: usize,
    fence_leading: usize,
    lang: Option<String>,
) -> (CodeBlock, usize) {
    let mut picked: Vec<&Line> = Vec::new();
    let mut i = start;
    while i < lines.len() {
        let line = &lines[i];
        if line.is_blank() {
            picked.push(line);
            i += 1;
            continue;
        }
        if line.leading() <= fence_leading {
            break;
        }
        picked.push(line);
        i += 1;
    }
    while picked.last().is_some_and(|l| l.is_blank()) {
        picked.pop();
    }

    let strip = picked
        .iter()
        .filter(|l| !l.is_blank())
        .map(|l| l.leading())
        .min()
        .unwrap_or(0);
    let code = picked
        .iter()
        .map(|l| {
            if l.is_blank() {
                String::new()
            } else {
                l.text[strip..].to_string()
            }
        })
        .collect();
    (CodeBlock { lang, code }, i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::google::GoogleStyle;
    use crate::styles::numpy::NumpyStyle;

    fn leaf(lines: &[&str]) -> DocNode {
        DocNode::Paragraph(Paragraph::Lines(
            lines.iter().map(|s| s.to_string()).collect(),
        ))
    }

    #[test]
    fn test_summary_only() {
        let doc = parse_with(&GoogleStyle, "Just a line.\n\nAnd another block.\n").unwrap();
        assert_eq!(doc.len(), 1);
        let summary = &doc[SUMMARY];
        assert_eq!(
            summary.body,
            vec![leaf(&["Just a line."]), leaf(&["And another block."])]
        );
    }

    #[test]
    fn test_blank_runs_collapse() {
        let doc = parse_with(&GoogleStyle, "One.\n\n\n\nTwo.\n").unwrap();
        assert_eq!(doc[SUMMARY].body.len(), 2);
    }

    #[test]
    fn test_unindented_section_body() {
        // The classifier dedents a header-led docstring down to its body
        // indentation; the section must still parse.
        let doc = parse_with(&GoogleStyle, "Args:\n    param1 (int): The first parameter.\n")
            .unwrap();
        assert_eq!(doc.len(), 1);
        let args = &doc["Args"];
        match &args.body[0] {
            DocNode::Item(item) => {
                assert_eq!(item.name, "param1");
                assert_eq!(item.ty.as_deref(), Some("int"));
                assert_eq!(item.desc, "The first parameter.");
                assert!(item.more.is_empty());
            }
            other => panic!("expected item, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_section_body_is_a_mismatch() {
        let err = parse_with(&GoogleStyle, "Summary.\n\nReturns:\n").unwrap_err();
        match err {
            StyleError::GrammarMismatch { style, .. } => assert_eq!(style, "google"),
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_over_indented_body_is_a_mismatch() {
        let text = "Summary.\n\nArgs:\n        floating continuation\n    anchor (int): doc\n";
        // The first body line sits two units below the header.
        assert!(parse_with(&GoogleStyle, text).is_err());
    }

    #[test]
    fn test_top_level_text_after_section_is_a_mismatch() {
        let text = "Summary.\n\nArgs:\n    x (int): doc\n\nloose trailer\n";
        let err = parse_with(&GoogleStyle, text).unwrap_err();
        assert!(matches!(err, StyleError::GrammarMismatch { .. }));
    }

    #[test]
    fn test_item_continuation_splits_paragraphs() {
        let text = "Summary.\n\nArgs:\n    x (int): The x.\n        first block\n\n        second block\n";
        let doc = parse_with(&GoogleStyle, text).unwrap();
        let DocNode::Item(item) = &doc["Args"].body[0] else {
            panic!("expected item");
        };
        assert_eq!(
            item.more,
            vec![leaf(&["first block"]), leaf(&["second block"])]
        );
    }

    #[test]
    fn test_non_item_line_in_items_section_becomes_paragraph() {
        let text = "Summary.\n\nArgs:\n    not an item line\n";
        let doc = parse_with(&GoogleStyle, text).unwrap();
        assert_eq!(doc["Args"].body, vec![leaf(&["not an item line"])]);
    }

    #[test]
    fn test_nested_paragraph_block() {
        let text = "Top.\n\nExample:\n    lead line\n        deeper line\n";
        let doc = parse_with(&GoogleStyle, text).unwrap();
        let body = &doc["Example"].body;
        assert_eq!(body[0], leaf(&["lead line"]));
        match &body[1] {
            DocNode::Paragraph(Paragraph::Nested(children)) => {
                assert_eq!(children[0], leaf(&["deeper line"]));
            }
            other => panic!("expected nested paragraph, got {other:?}"),
        }
    }

    #[test]
    fn test_trailing_fence_captures_code() {
        let text = "Top.\n\nExample:\n    literal block::\n\n        {\n            'a': 1,\n        }\n";
        let doc = parse_with(&GoogleStyle, text).unwrap();
        let body = &doc["Example"].body;
        assert_eq!(body[0], leaf(&["literal block::"]));
        match &body[1] {
            DocNode::Code(code) => {
                assert_eq!(code.lang, None);
                assert_eq!(code.code, vec!["{", "    'a': 1,", "}"]);
            }
            other => panic!("expected code block, got {other:?}"),
        }
    }

    #[test]
    fn test_code_directive_with_language() {
        let text = "Top.\n\n.. code:: python\n    def f():\n        return 1\n";
        let doc = parse_with(&GoogleStyle, text).unwrap();
        let body = &doc[SUMMARY].body;
        match &body[1] {
            DocNode::Code(code) => {
                assert_eq!(code.lang.as_deref(), Some("python"));
                assert_eq!(code.code, vec!["def f():", "    return 1"]);
            }
            other => panic!("expected code block, got {other:?}"),
        }
    }

    #[test]
    fn test_code_keeps_internal_blanks() {
        let text = "Top.\n\n::\n    a\n\n    b\n";
        let doc = parse_with(&GoogleStyle, text).unwrap();
        match &doc[SUMMARY].body[1] {
            DocNode::Code(code) => assert_eq!(code.code, vec!["a", "", "b"]),
            other => panic!("expected code block, got {other:?}"),
        }
    }

    #[test]
    fn test_todo_section() {
        let text = "Top.\n\nTodo:\n    - first thing\n        with detail\n    * second thing\n";
        let doc = parse_with(&GoogleStyle, text).unwrap();
        let body = &doc["Todo"].body;
        match (&body[0], &body[1]) {
            (DocNode::Todo(a), DocNode::Todo(b)) => {
                assert_eq!(a.todo, "first thing");
                assert_eq!(a.more, vec![leaf(&["with detail"])]);
                assert_eq!(b.todo, "second thing");
                assert!(b.more.is_empty());
            }
            other => panic!("expected todos, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_section_appends() {
        let text = "Top.\n\nArgs:\n    a (int): first\n\nReturns:\n    bool: done\n\nArgs:\n    b (str): second\n";
        let doc = parse_with(&GoogleStyle, text).unwrap();
        let titles: Vec<_> = doc.titles().collect();
        assert_eq!(titles, vec![SUMMARY, "Args", "Returns"]);
        assert_eq!(doc["Args"].body.len(), 2);
    }

    #[test]
    fn test_numpy_items() {
        let text = "Top.\n\nParameters\n----------\nx : int\n    The x value.\ny : str, optional\n    The y value.\n";
        let doc = parse_with(&NumpyStyle, text).unwrap();
        let body = &doc["Parameters"].body;
        assert_eq!(body.len(), 2);
        let DocNode::Item(x) = &body[0] else {
            panic!("expected item");
        };
        assert_eq!(x.name, "x");
        assert_eq!(x.ty.as_deref(), Some("int"));
        assert_eq!(x.desc, "The x value.");
        assert!(x.more.is_empty());
        let DocNode::Item(y) = &body[1] else {
            panic!("expected item");
        };
        assert_eq!(y.ty.as_deref(), Some("str, optional"));
    }

    #[test]
    fn test_numpy_bare_return_type() {
        let text = "Top.\n\nReturns\n-------\nint\n    The computed sum.\n";
        let doc = parse_with(&NumpyStyle, text).unwrap();
        let DocNode::Item(ret) = &doc["Returns"].body[0] else {
            panic!("expected item");
        };
        assert_eq!(ret.name, "int");
        assert_eq!(ret.ty, None);
        assert_eq!(ret.desc, "The computed sum.");
    }

    #[test]
    fn test_numpy_multi_line_description() {
        let text = "Top.\n\nParameters\n----------\nx : int\n    First line.\n    Second line.\n\n    Second paragraph.\n";
        let doc = parse_with(&NumpyStyle, text).unwrap();
        let DocNode::Item(x) = &doc["Parameters"].body[0] else {
            panic!("expected item");
        };
        assert_eq!(x.desc, "First line.");
        assert_eq!(
            x.more,
            vec![leaf(&["Second line."]), leaf(&["Second paragraph."])]
        );
    }

    #[test]
    fn test_empty_input() {
        let doc = parse_with(&GoogleStyle, "").unwrap();
        assert!(doc.is_empty());
    }
}

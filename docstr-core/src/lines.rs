//! Line classification, the first pass over raw text.
//!
//! The classifier turns raw docstring text into a flat sequence of line
//! records: dedented text, indentation level in units, and a coarse category
//! (blank, header, item candidate, code fence, prose). Header and item
//! recognition delegates to the active style's matchers; confirming a
//! candidate against its context (section kind, indentation level) is the
//! engine's job.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::style::{ItemStart, Style};

/// Indent unit assumed for text that carries no indentation of its own.
const DEFAULT_UNIT: usize = 4;

/// One classified physical line.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Dedented text. Trailing whitespace removed, leading kept.
    pub text: String,
    /// Indentation depth in units.
    pub level: usize,
    /// 1-based physical line number in the original text.
    pub number: usize,
    pub kind: LineKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    Blank,
    /// A recognized section header. For underlined titles the underline is
    /// folded into this record.
    Header { title: String },
    /// An item-start candidate.
    Item(ItemStart),
    /// A code fence. `standalone` is false for a prose line that ends in
    /// `::` and doubles as a fence opener.
    Fence {
        lang: Option<String>,
        standalone: bool,
    },
    Prose,
}

impl Line {
    pub fn is_blank(&self) -> bool {
        matches!(self.kind, LineKind::Blank)
    }

    /// Text without leading indentation.
    pub fn content(&self) -> &str {
        self.text.trim_start()
    }

    /// Leading spaces after dedenting.
    pub fn leading(&self) -> usize {
        leading(&self.text)
    }
}

fn leading(text: &str) -> usize {
    text.len() - text.trim_start_matches(' ').len()
}

static CODE_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\.\. code(?:-block)?::(?:\s+(\S+))?$").unwrap());

fn match_fence(content: &str) -> Option<LineKind> {
    if content == "::" {
        return Some(LineKind::Fence {
            lang: None,
            standalone: true,
        });
    }
    if let Some(caps) = CODE_DIRECTIVE.captures(content) {
        return Some(LineKind::Fence {
            lang: caps.get(1).map(|m| m.as_str().to_string()),
            standalone: true,
        });
    }
    if content.ends_with("::") {
        return Some(LineKind::Fence {
            lang: None,
            standalone: false,
        });
    }
    None
}

/// Classify raw text into line records for `style`.
///
/// The base indentation (the docstring's own, determined from the least
/// indented non-blank line after the first) is stripped before levels are
/// measured; the indent unit is the smallest indentation step left after
/// that. Tabs count as four spaces.
pub fn classify(text: &str, style: &dyn Style) -> Vec<Line> {
    let mut rows: Vec<String> = text
        .lines()
        .map(|l| l.replace('\t', "    ").trim_end().to_string())
        .collect();
    if rows.is_empty() {
        return Vec::new();
    }

    // The first physical line sits against the opening quotes and never
    // carries the docstring's base indentation.
    let base = rows[1..]
        .iter()
        .filter(|l| !l.is_empty())
        .map(|l| leading(l))
        .min()
        .unwrap_or(0);
    for row in rows.iter_mut().skip(1) {
        if row.len() >= base {
            row.drain(..base);
        } else {
            row.clear();
        }
    }

    let unit = rows
        .iter()
        .filter(|l| !l.is_empty())
        .map(|l| leading(l))
        .filter(|n| *n > 0)
        .min()
        .unwrap_or(DEFAULT_UNIT);

    let mut lines = Vec::with_capacity(rows.len());
    let mut i = 0;
    while i < rows.len() {
        let text = std::mem::take(&mut rows[i]);
        let number = i + 1;
        if text.is_empty() {
            lines.push(Line {
                text,
                level: 0,
                number,
                kind: LineKind::Blank,
            });
            i += 1;
            continue;
        }

        let level = leading(&text) / unit;
        let next = rows.get(i + 1).filter(|n| !n.is_empty());

        // Headers are only recognized at the top level.
        if level == 0 {
            let next_content = next
                .filter(|n| leading(n) / unit == 0)
                .map(|n| n.trim_start());
            if let Some(header) = style.match_header(text.trim_start(), next_content) {
                let span = header.span;
                lines.push(Line {
                    text,
                    level,
                    number,
                    kind: LineKind::Header {
                        title: header.title,
                    },
                });
                i += span;
                continue;
            }
        }

        let own_leading = leading(&text);
        let deeper_follows = next.is_some_and(|n| leading(n) > own_leading);
        let kind = if let Some(item) = style.match_item(text.trim_start(), deeper_follows) {
            LineKind::Item(item)
        } else if let Some(fence) = match_fence(text.trim_start()) {
            fence
        } else {
            LineKind::Prose
        };
        lines.push(Line {
            text,
            level,
            number,
            kind,
        });
        i += 1;
    }
    lines
}

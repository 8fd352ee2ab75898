//! Google-style docstrings
//!
//! Section headers are colon-terminated keyword lines (`Args:`), items carry
//! their description inline (`name (type): description`) and section bodies
//! sit one unit deeper than the header.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::keywords;
use crate::style::{BodyIndent, HeaderMatch, ItemStart, Style};
use crate::tree::Item;

static HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9_ ]*):$").unwrap());
static ITEM_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\*{0,2}[A-Za-z_][A-Za-z0-9_.]*)").unwrap());

/// Split `name [(type)]: description`, honoring nesting.
///
/// The separating colon is the first top-level colon: parentheses may nest
/// and colons inside parentheses or backticks do not split.
fn split_item_line(content: &str) -> Option<ItemStart> {
    let name = ITEM_NAME.find(content)?.as_str();
    let mut rest = content[name.len()..].trim_start();

    let mut ty = None;
    if rest.starts_with('(') {
        let (inner, consumed) = balanced_paren(rest)?;
        ty = Some(inner.trim().to_string());
        rest = rest[consumed..].trim_start();
    }

    let desc = rest.strip_prefix(':')?.trim();
    if desc.is_empty() || desc.starts_with(':') {
        return None;
    }
    Some(ItemStart {
        name: name.to_string(),
        ty,
        desc: desc.to_string(),
    })
}

/// Scan a balanced parenthesized group starting at `s[0] == '('`.
///
/// Returns the inner text and the number of bytes consumed. Parentheses
/// inside backticks do not count toward nesting.
fn balanced_paren(s: &str) -> Option<(&str, usize)> {
    let mut depth = 0usize;
    let mut in_tick = false;
    for (idx, ch) in s.char_indices() {
        match ch {
            '`' => in_tick = !in_tick,
            '(' if !in_tick => depth += 1,
            ')' if !in_tick => {
                depth -= 1;
                if depth == 0 {
                    return Some((&s[1..idx], idx + 1));
                }
            }
            _ => {}
        }
    }
    None
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GoogleStyle;

impl Style for GoogleStyle {
    fn name(&self) -> &str {
        "google"
    }

    fn description(&self) -> &str {
        "Google-style docstrings (colon-terminated section headers)"
    }

    fn match_header(&self, content: &str, _next: Option<&str>) -> Option<HeaderMatch> {
        let caps = HEADER.captures(content)?;
        let (title, _) = keywords::lookup(caps.get(1)?.as_str().trim_end())?;
        Some(HeaderMatch {
            title: title.to_string(),
            span: 1,
        })
    }

    fn match_item(&self, content: &str, _deeper_follows: bool) -> Option<ItemStart> {
        split_item_line(content)
    }

    fn body_indent(&self) -> BodyIndent {
        BodyIndent::Anchored
    }

    fn inline_desc(&self) -> bool {
        true
    }

    fn header_lines(&self, title: &str) -> Vec<String> {
        vec![format!("{title}:")]
    }

    fn item_head(&self, item: &Item) -> String {
        match &item.ty {
            Some(ty) => format!("{} ({}): {}", item.name, ty, item.desc),
            None => format!("{}: {}", item.name, item.desc),
        }
    }
}

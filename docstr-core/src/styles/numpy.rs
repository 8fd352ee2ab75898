//! Numpy-style docstrings
//!
//! Section headers are keyword lines underlined with a matching-length run
//! of dashes. Items put `name : type` on one line with the description on
//! the following indented lines; a returns or yields entry may be a bare
//! type line. Section bodies are commonly flush with the header.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::keywords;
use crate::style::{BodyIndent, HeaderMatch, ItemStart, Style};
use crate::tree::Item;

static TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_ ]*$").unwrap());
static ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\*{0,2}[A-Za-z_][A-Za-z0-9_.]*)\s*:\s*(.+)$").unwrap());
// A type standing alone, e.g. "int" or "list of str", for unnamed returns.
static BARE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_ ,\[\]]*$").unwrap());

#[derive(Debug, Default, Clone, Copy)]
pub struct NumpyStyle;

impl Style for NumpyStyle {
    fn name(&self) -> &str {
        "numpy"
    }

    fn description(&self) -> &str {
        "Numpy-style docstrings (dash-underlined section headers)"
    }

    fn match_header(&self, content: &str, next: Option<&str>) -> Option<HeaderMatch> {
        if !TITLE.is_match(content) {
            return None;
        }
        let underline = next?;
        if underline.chars().count() != content.chars().count()
            || !underline.chars().all(|c| c == '-')
        {
            return None;
        }
        let (title, _) = keywords::lookup(content)?;
        Some(HeaderMatch {
            title: title.to_string(),
            span: 2,
        })
    }

    fn match_item(&self, content: &str, deeper_follows: bool) -> Option<ItemStart> {
        // The description lives on the following lines; without them the
        // line is ordinary prose.
        if !deeper_follows {
            return None;
        }
        if let Some(caps) = ITEM.captures(content) {
            let ty = caps.get(2)?.as_str().trim();
            if !ty.starts_with(':') {
                return Some(ItemStart {
                    name: caps.get(1)?.as_str().to_string(),
                    ty: Some(ty.to_string()),
                    desc: String::new(),
                });
            }
        }
        if BARE.is_match(content) {
            return Some(ItemStart {
                name: content.trim().to_string(),
                ty: None,
                desc: String::new(),
            });
        }
        None
    }

    fn body_indent(&self) -> BodyIndent {
        BodyIndent::Relaxed
    }

    fn inline_desc(&self) -> bool {
        false
    }

    fn header_lines(&self, title: &str) -> Vec<String> {
        vec![title.to_string(), "-".repeat(title.chars().count())]
    }

    fn item_head(&self, item: &Item) -> String {
        match &item.ty {
            Some(ty) => format!("{} : {}", item.name, ty),
            None => item.name.clone(),
        }
    }
}

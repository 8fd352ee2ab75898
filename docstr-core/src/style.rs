//! Style trait definition
//!
//! A style is one docstring convention: a header syntax, an item syntax and
//! an indentation discipline. Implementors provide the line-level matchers
//! consumed by the classifier and the render hooks consumed by the
//! serializer; the tree-building walk itself is shared (see `engine`).
//!
//! Adding a style means implementing this trait and registering it; the tree
//! model is untouched.

use crate::tree::Item;

/// A recognized section header.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderMatch {
    /// Canonical-cased section title.
    pub title: String,
    /// Physical lines the header occupies (two for underlined titles).
    pub span: usize,
}

/// A recognized item-start line.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStart {
    pub name: String,
    pub ty: Option<String>,
    /// Description text from the item line itself. Empty for styles that
    /// carry the description on the following indented lines.
    pub desc: String,
}

/// How a section body relates to its header's indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyIndent {
    /// The body sits at the header's level or exactly one unit deeper.
    /// Anything deeper is a structural failure.
    Anchored,
    /// The body adopts whatever level its first line has.
    Relaxed,
}

/// Trait for docstring styles
///
/// # Examples
///
/// ```ignore
/// struct MyStyle;
///
/// impl Style for MyStyle {
///     fn name(&self) -> &str {
///         "my-style"
///     }
///
///     fn match_header(&self, content: &str, next: Option<&str>) -> Option<HeaderMatch> {
///         // Recognize a section header line
///         todo!()
///     }
///
///     // ...
/// }
/// ```
pub trait Style: Send + Sync {
    /// The name of this style (e.g., "google", "numpy")
    fn name(&self) -> &str;

    /// Optional description of this style
    fn description(&self) -> &str {
        ""
    }

    /// Recognize a section header.
    ///
    /// `content` is the trimmed line text; `next` is the trimmed text of the
    /// following line when it sits at the same indentation level. Only
    /// keywords from the fixed table produce a match.
    fn match_header(&self, content: &str, next: Option<&str>) -> Option<HeaderMatch>;

    /// Recognize an item-start line.
    ///
    /// `deeper_follows` reports whether the next physical line is non-blank
    /// and indented deeper than this one.
    fn match_item(&self, content: &str, deeper_follows: bool) -> Option<ItemStart>;

    /// Indentation discipline for section bodies.
    fn body_indent(&self) -> BodyIndent;

    /// Whether item descriptions live on the item line itself.
    fn inline_desc(&self) -> bool;

    /// Render the header for a section title.
    fn header_lines(&self, title: &str) -> Vec<String>;

    /// Render the first line of an item.
    fn item_head(&self, item: &Item) -> String;
}

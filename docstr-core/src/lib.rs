//! Multi-style docstring parsing and canonical re-rendering
//!
//!     This crate turns free-form documentation comments (google-style,
//!     numpy-style) into a navigable, typed document tree, and renders that
//!     tree back into canonical text. It powers the docstr CLI but is shell
//!     agnostic: no code here supposes a shell environment, be it to std
//!     print, env vars etc.
//!
//! Architecture
//!
//!     The work splits into a style-agnostic core and thin per-style tables.
//!     The classifier (./lines.rs) reduces raw text to indentation-aware line
//!     records; the engine (./engine.rs) drives one shared tree-building walk
//!     over those records; each style (./styles/) only contributes the line
//!     matchers and render hooks that differ between conventions. Adding a
//!     style never touches the tree model.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── keywords.rs             # Fixed section keyword table
//!     ├── lines.rs                # Line classifier
//!     ├── engine.rs               # Shared tree-building walk
//!     ├── style.rs                # Style trait definition
//!     ├── styles
//!     │   ├── google.rs
//!     │   └── numpy.rs
//!     ├── registry.rs             # StyleRegistry for discovery and selection
//!     ├── resolver.rs             # Auto-detection with a last-style hint
//!     ├── formatter.rs            # Canonical renderer
//!     ├── treeviz.rs              # Tree dump for inspection
//!     └── tree.rs                 # Document model
//!
//! The Document Tree
//!
//!     A parsed docstring is an insertion-ordered map from section title to
//!     section; leading text lands in the implicit SUMMARY section. Section
//!     bodies are one ordered sequence of tagged nodes (items, todos,
//!     paragraphs, code blocks) so source order survives exactly. Trees are
//!     built once per parse call and never mutated; formatting consumes a
//!     tree and produces a new string.
//!
//! Errors
//!
//!     Parsing fails only on structural impossibility (a header with no
//!     body, a continuation with nothing to continue). Everything merely
//!     unusual folds into prose: unknown header keywords, item-shaped lines
//!     outside item sections, runs of blank lines. The resolver is the only
//!     component that swallows per-style failures, to try the next
//!     candidate.

pub mod engine;
pub mod error;
pub mod formatter;
pub mod keywords;
pub mod lines;
pub mod registry;
pub mod resolver;
pub mod style;
pub mod styles;
pub mod tree;
pub mod treeviz;

pub use error::StyleError;
pub use formatter::FormattingRules;
pub use registry::StyleRegistry;
pub use resolver::StyleResolver;
pub use style::Style;
pub use tree::{CodeBlock, DocNode, Document, Item, Paragraph, Section, Todo, SUMMARY};

/// Parse `source` under the named style's grammar.
pub fn parse(source: &str, style: &str) -> Result<Document, StyleError> {
    StyleRegistry::with_defaults().parse(source, style)
}

/// Auto-detect the style of `source` and parse it.
pub fn parse_auto(source: &str) -> Result<(String, Document), StyleError> {
    StyleResolver::new().resolve(source)
}

/// Render a parsed document as canonical text in the named style.
pub fn format_document(doc: &Document, style: &str) -> Result<String, StyleError> {
    StyleRegistry::with_defaults().format_document(doc, style)
}

/// Parse `source` under the named style and re-render it canonically.
pub fn format_source(source: &str, style: &str) -> Result<String, StyleError> {
    StyleRegistry::with_defaults().format_source(source, style)
}

/// Render the treeviz dump of a parsed document.
pub fn pretty(doc: &Document) -> String {
    treeviz::to_treeviz_str(doc)
}

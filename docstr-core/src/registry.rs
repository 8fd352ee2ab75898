//! Style registry for style discovery and selection
//!
//! This module provides a centralized registry for all available styles.
//! Styles can be registered and retrieved by name. Registration order is
//! meaningful: it is the priority order the auto-detector tries styles in.

use crate::engine;
use crate::error::StyleError;
use crate::formatter::{serialize_document, FormattingRules};
use crate::style::Style;
use crate::tree::Document;

/// Registry of docstring styles
///
/// # Examples
///
/// ```ignore
/// let mut registry = StyleRegistry::new();
/// registry.register(MyStyle);
///
/// let doc = registry.parse("source text", "my-style")?;
/// ```
pub struct StyleRegistry {
    styles: Vec<Box<dyn Style>>,
}

impl StyleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        StyleRegistry { styles: Vec::new() }
    }

    /// Register a style
    ///
    /// If a style with the same name already exists, it is replaced in its
    /// priority slot.
    pub fn register<S: Style + 'static>(&mut self, style: S) {
        match self.styles.iter_mut().find(|s| s.name() == style.name()) {
            Some(slot) => *slot = Box::new(style),
            None => self.styles.push(Box::new(style)),
        }
    }

    /// Get a style by name
    pub fn get(&self, name: &str) -> Result<&dyn Style, StyleError> {
        self.styles
            .iter()
            .find(|s| s.name() == name)
            .map(|s| s.as_ref())
            .ok_or_else(|| StyleError::StyleNotFound(name.to_string()))
    }

    /// Check if a style exists
    pub fn has(&self, name: &str) -> bool {
        self.styles.iter().any(|s| s.name() == name)
    }

    /// List all available style names, in priority order
    pub fn list_styles(&self) -> Vec<String> {
        self.styles.iter().map(|s| s.name().to_string()).collect()
    }

    /// Iterate the registered styles in priority order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Style> {
        self.styles.iter().map(|s| s.as_ref())
    }

    /// Parse source text using the named style
    pub fn parse(&self, source: &str, style: &str) -> Result<Document, StyleError> {
        engine::parse_with(self.get(style)?, source)
    }

    /// Render a document as canonical text in the named style
    pub fn format_document(&self, doc: &Document, style: &str) -> Result<String, StyleError> {
        self.format_document_with_rules(doc, style, &FormattingRules::default())
    }

    pub fn format_document_with_rules(
        &self,
        doc: &Document,
        style: &str,
        rules: &FormattingRules,
    ) -> Result<String, StyleError> {
        let style = self.get(style)?;
        Ok(serialize_document(doc, style, rules))
    }

    /// Parse source text and re-render it canonically in the same style
    pub fn format_source(&self, source: &str, style: &str) -> Result<String, StyleError> {
        self.format_source_with_rules(source, style, &FormattingRules::default())
    }

    pub fn format_source_with_rules(
        &self,
        source: &str,
        style: &str,
        rules: &FormattingRules,
    ) -> Result<String, StyleError> {
        let resolved = self.get(style)?;
        let doc = engine::parse_with(resolved, source)?;
        Ok(serialize_document(&doc, resolved, rules))
    }

    /// Create a registry with the built-in styles
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::styles::google::GoogleStyle);
        registry.register(crate::styles::numpy::NumpyStyle);

        registry
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

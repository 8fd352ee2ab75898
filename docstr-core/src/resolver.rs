//! Style auto-detection.
//!
//! The resolver tries each registered grammar in priority order and returns
//! the first that parses without structural failure. The last successful
//! style is kept as a hint and tried first on the next call. The hint is an
//! optimization, not a contract: each call still builds its own tree, and a
//! text that parses under several grammars may resolve differently once the
//! hint is set.

use std::sync::Mutex;

use crate::engine;
use crate::error::StyleError;
use crate::registry::StyleRegistry;
use crate::tree::Document;

pub struct StyleResolver {
    registry: StyleRegistry,
    priority: Vec<String>,
    /// Last style that parsed successfully. Best effort: lock contention
    /// never blocks resolution and a stale value only costs a retry.
    last_style: Mutex<Option<String>>,
}

impl StyleResolver {
    /// Resolver over the built-in styles.
    pub fn new() -> Self {
        Self::with_registry(StyleRegistry::with_defaults())
    }

    /// Resolver over `registry`, trying styles in registration order.
    pub fn with_registry(registry: StyleRegistry) -> Self {
        let priority = registry.list_styles();
        Self {
            registry,
            priority,
            last_style: Mutex::new(None),
        }
    }

    /// Resolver with an explicit priority order. Names not present in the
    /// registry are skipped at resolution time.
    pub fn with_priority(registry: StyleRegistry, priority: Vec<String>) -> Self {
        Self {
            registry,
            priority,
            last_style: Mutex::new(None),
        }
    }

    /// Detect the style of `source` and parse it.
    ///
    /// Returns the winning style's name together with the document. Fails
    /// with [`StyleError::NoStyleMatched`] when every candidate grammar
    /// rejects the text.
    pub fn resolve(&self, source: &str) -> Result<(String, Document), StyleError> {
        if let Some(name) = self.hint() {
            if let Ok(style) = self.registry.get(&name) {
                if let Ok(doc) = engine::parse_with(style, source) {
                    return Ok((name, doc));
                }
            }
        }

        let mut attempted = Vec::new();
        for name in &self.priority {
            let Ok(style) = self.registry.get(name) else {
                continue;
            };
            attempted.push(name.clone());
            match engine::parse_with(style, source) {
                Ok(doc) => {
                    self.remember(name);
                    return Ok((name.clone(), doc));
                }
                Err(_) => continue,
            }
        }
        Err(StyleError::NoStyleMatched { attempted })
    }

    /// The current last-successful-style hint.
    pub fn hint(&self) -> Option<String> {
        self.last_style.lock().ok().and_then(|g| g.clone())
    }

    /// Clear the hint.
    pub fn reset(&self) {
        if let Ok(mut guard) = self.last_style.lock() {
            *guard = None;
        }
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    fn remember(&self, name: &str) {
        if let Ok(mut guard) = self.last_style.lock() {
            *guard = Some(name.to_string());
        }
    }
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self::new()
    }
}

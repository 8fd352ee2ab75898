//! Shared configuration loader for the docstr toolchain.
//!
//! `defaults/docstr.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`DocstrConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use docstr_core::FormattingRules;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/docstr.default.toml");

/// Top-level configuration consumed by docstr applications.
#[derive(Debug, Clone, Deserialize)]
pub struct DocstrConfig {
    pub formatting: FormattingConfig,
    pub detect: DetectConfig,
    pub inspect: InspectConfig,
}

/// Formatting-related configuration groups.
#[derive(Debug, Clone, Deserialize)]
pub struct FormattingConfig {
    pub rules: FormattingRulesConfig,
}

/// Mirrors the knobs exposed by the canonical renderer.
#[derive(Debug, Clone, Deserialize)]
pub struct FormattingRulesConfig {
    pub indent_string: String,
    pub max_blank_lines: usize,
    pub todo_marker: char,
}

impl From<FormattingRulesConfig> for FormattingRules {
    fn from(config: FormattingRulesConfig) -> Self {
        FormattingRules {
            indent_string: config.indent_string,
            max_blank_lines: config.max_blank_lines,
            todo_marker: config.todo_marker,
        }
    }
}

impl From<&FormattingRulesConfig> for FormattingRules {
    fn from(config: &FormattingRulesConfig) -> Self {
        FormattingRules {
            indent_string: config.indent_string.clone(),
            max_blank_lines: config.max_blank_lines,
            todo_marker: config.todo_marker,
        }
    }
}

/// Style auto-detection order.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectConfig {
    pub priority: Vec<String>,
}

/// Controls the treeviz inspect output.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub show_text: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<DocstrConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<DocstrConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.formatting.rules.indent_string, "    ");
        assert_eq!(config.detect.priority, vec!["google", "numpy"]);
        assert!(config.inspect.show_text);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("formatting.rules.indent_string", "  ")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.formatting.rules.indent_string, "  ");
    }

    #[test]
    fn formatting_rules_config_converts_to_formatting_rules() {
        let config = load_defaults().expect("defaults to deserialize");
        let rules: FormattingRules = config.formatting.rules.into();
        assert_eq!(rules.indent_string, "    ");
        assert_eq!(rules.max_blank_lines, 1);
        assert_eq!(rules.todo_marker, '-');
    }
}

//! Error types for parsing and formatting operations

use std::fmt;

/// Errors that can occur while parsing or re-rendering a docstring
#[derive(Debug, Clone, PartialEq)]
pub enum StyleError {
    /// Style not found in registry
    StyleNotFound(String),
    /// The text does not conform to the named style's grammar
    GrammarMismatch {
        style: String,
        line: usize,
        reason: String,
    },
    /// Every attempted grammar rejected the text during auto-detection
    NoStyleMatched { attempted: Vec<String> },
}

impl fmt::Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleError::StyleNotFound(name) => write!(f, "Style '{name}' not found"),
            StyleError::GrammarMismatch {
                style,
                line,
                reason,
            } => {
                write!(
                    f,
                    "Text does not match style '{style}' (line {line}): {reason}"
                )
            }
            StyleError::NoStyleMatched { attempted } => {
                write!(f, "No style matched; attempted: {}", attempted.join(", "))
            }
        }
    }
}

impl std::error::Error for StyleError {}

//! Error types for theme construction and validation.
//!
//! Theme validation is the only rejecting boundary in the pipeline: a theme
//! either validates fully before first use or is rejected with a [`ThemeError`]
//! describing what was wrong. Tokenizing, matching, and rendering are total
//! and never fail for any input line.

use std::path::PathBuf;

/// Errors raised while building or validating a theme.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// The document could not be parsed at all.
    #[error("failed to parse theme: {0}")]
    Parse(String),

    /// The theme file could not be read.
    #[error("failed to read {path}: {message}")]
    Load { path: PathBuf, message: String },

    /// A color value did not match any supported format.
    #[error("invalid color '{value}' in {context}")]
    InvalidColor { context: String, value: String },

    /// A pattern rule's regular expression failed to compile.
    #[error("invalid pattern '{name}': {message}")]
    InvalidPattern { name: String, message: String },

    /// An unrecognized style flag name.
    #[error("unknown style flag '{0}'")]
    UnknownFlag(String),

    /// An unrecognized theme mode (must be light, dark, or auto).
    #[error("unknown theme mode '{0}'")]
    UnknownMode(String),

    /// A schema field had the wrong structural type.
    #[error("invalid schema: {field} must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

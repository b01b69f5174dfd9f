//! Error types for catalog construction and parsing

use thiserror::Error;

/// Errors that can occur while building or parsing catalog data
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Parameter shape text did not match the compact shape syntax
    #[error("Invalid parameter shape {text:?}: {message}")]
    ShapeSyntax {
        /// The text being parsed
        text: String,
        /// What went wrong
        message: String,
    },

    /// Catalog dump could not be read or written
    #[error("Catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    /// Shape syntax error for `text` with a short explanation
    pub fn shape_syntax(text: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ShapeSyntax {
            text: text.into(),
            message: message.into(),
        }
    }
}

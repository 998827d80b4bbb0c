//! Builder Content
//!
//! The block tree a builder document is made of: a [`Document`] holding an
//! ordered list of [`Element`] nodes, each with attributes, children, and
//! per-breakpoint styles. Also carries the fixed responsive [`size`] table
//! the styles are keyed by.
//!
//! # Example
//!
//! ```
//! use builder_content::Document;
//!
//! let doc = Document::from_json(r#"{"id": "abc", "data": {"blocks": []}}"#).unwrap();
//! assert!(doc.blocks().is_empty());
//! ```

pub mod element;
pub mod size;

pub use element::{ContentData, Document, Element, PropertyMap, ResponsiveStyles, StyleMap};
pub use size::{Breakpoint, Size, DEFAULT_BREAKPOINTS};

/// Content loading error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Content error at line {line}, column {column}: {message}")]
pub struct ContentError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl From<serde_json::Error> for ContentError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

impl Document {
    /// Load a document from its JSON representation.
    pub fn from_json(source: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(source)?)
    }
}

impl Element {
    /// Load a single element (and its subtree) from JSON.
    pub fn from_json(source: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(source)?)
    }
}

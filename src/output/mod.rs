//! Document sinks.
//!
//! The fetch engine hands every document, labeled by resource name, to a
//! sink. The sink renders it for display and optionally persists it; the
//! engine never learns whether persistence happened.

use crate::{AdAccount, Document};

pub mod json;
pub mod path;

pub use json::JsonSink;

/// Output sink errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    SerializationError(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Where a document belongs in the output hierarchy.
#[derive(Debug, Clone, Copy)]
pub enum DocumentScope<'a> {
    /// Run-level document (e.g., the account discovery dump)
    Run,
    /// Document belonging to one account
    Account(&'a AdAccount),
}

/// A destination for fetched documents.
pub trait DocumentSink {
    /// Render and optionally persist one document.
    ///
    /// Display rendering never fails; an error indicates a persistence
    /// problem and counts against the fetch that produced the document.
    fn emit(&self, scope: DocumentScope<'_>, document: &Document) -> OutputResult<()>;
}

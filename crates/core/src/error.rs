//! Error types for loading and saving bookmark trees.

use thiserror::Error;

/// Result type alias for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors raised while projecting a `Bookmarks` document to and from a [`crate::Tree`].
///
/// Malformed *nodes* never surface here; they are skipped during decoding.
/// Only a document whose overall shape cannot be traversed is rejected.
#[derive(Error, Debug)]
pub enum TreeError {
    /// The top-level value is not a JSON object.
    #[error("bookmarks document is not a JSON object")]
    NotAnObject,

    /// The document has no `roots` object.
    #[error("bookmarks document has no 'roots' object")]
    MissingRoots,

    /// A required root folder is missing.
    #[error("missing root folder: {0}")]
    MissingRoot(String),

    /// A root entry exists but is not a folder record.
    #[error("root '{0}' is not a folder")]
    RootNotFolder(String),

    /// Every id up to `i64::MAX` is taken.
    #[error("no identifiers left: the tree already uses id {0}")]
    IdsExhausted(i64),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

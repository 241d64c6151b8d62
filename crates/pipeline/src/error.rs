//! Error types for pipeline runs.

use pbm_core::TreeError;
use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Fatal pipeline errors
///
/// Dirty input never ends up here: malformed nodes are skipped while decoding
/// and bad ids are repaired. These variants mean the run must be aborted and
/// nothing persisted.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Unknown step name, empty step list, or an unusable option value.
    /// Always raised before the tree is touched.
    #[error("configuration error: {0}")]
    Config(String),

    /// A structural mutation did not have the effect it must have.
    #[error("invariant violated: {0}")]
    Invariant(String),

    /// A merge group ended up with no record to stand in for it.
    #[error("no representative for merge group '{0}'")]
    NoRepresentative(String),

    /// Document-level error from the tree model.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl PipelineError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

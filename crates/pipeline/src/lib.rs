//! pbm pipeline - ordered transformation steps over a bookmark tree
//!
//! This crate provides:
//! - The [`Step`] contract (preprocess / process / postprocess hooks)
//! - A [`StepRegistry`] mapping step names to constructors
//! - The three-pass [`Sequence`] driver with final id repair
//! - Shared algorithms: date reorganizer, deduplicator, representative merger
//! - The built-in step catalogue

pub mod context;
pub mod dedupe;
pub mod error;
pub mod merge;
pub mod registry;
pub mod reorganize;
pub mod sequence;
pub mod step;
pub mod steps;

// Re-exports
pub use context::{RunContext, StepOptions};
pub use error::{PipelineError, Result};
pub use merge::{merge, MergeRule, PassthroughRule, StarRule};
pub use registry::{StepRegistry, DEFAULT_SEQUENCE};
pub use reorganize::{reorganize_by_date, reorganize_tree, DateNaming};
pub use sequence::{transform, RunReport, Sequence};
pub use step::{Pass, Step};

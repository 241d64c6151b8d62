//! pbm core - bookmark tree model and traversal primitives
//!
//! This crate provides the foundational layer the pipeline steps build on:
//! - Chromium long-date timestamp codec
//! - Typed Link/Folder node model with lossless JSON projection
//! - Tree wrapper over the `Bookmarks` document (two roots + passthrough)
//! - Lazy, filterable depth-first walker
//! - Identifier allocator seeded from the tree

pub mod alloc;
pub mod error;
pub mod filter;
pub mod node;
pub mod timestamp;
pub mod tree;
pub mod walk;

// Re-export main types for convenience
pub use alloc::IdAllocator;
pub use error::{Result, TreeError};
pub use filter::{ChromeFilter, Filter, FilterConfig, FnFilter, IncludeAll};
pub use node::{Folder, KeyOrder, Link, Node, NodeInfo, NodeKind, NodeRef, Record};
pub use timestamp::LongValue;
pub use tree::Tree;
pub use walk::{walk, walk_both_roots, walk_folder, Visit, Walk};

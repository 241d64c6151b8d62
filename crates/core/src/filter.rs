//! Inclusion predicates for the tree walker
//!
//! A filter decides, per node, whether the walker visits it. Returning
//! `false` for a folder prunes the whole subtree.

use crate::node::NodeRef;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// URL prefixes of pages that are not navigable bookmarks
/// (in-app pages, bookmarklets, inline documents)
pub const SKIPPED_SCHEMES: [&str; 3] = ["chrome:", "javascript:", "data:"];

/// Folder names maintained by pipeline steps; their contents are never
/// re-enumerated as user bookmarks
pub const DEFAULT_SKIP_FOLDERS: [&str; 5] = ["chrome", "bookmarklets", "quicklinks", "starred", "all"];

/// Walker inclusion predicate
pub trait Filter {
    /// `false` skips the node (and prunes it if it is a folder).
    fn include(&self, node: NodeRef<'_>) -> bool;
}

impl<T: Filter + ?Sized> Filter for &T {
    fn include(&self, node: NodeRef<'_>) -> bool {
        (**self).include(node)
    }
}

/// The "no filtering" predicate
#[derive(Debug, Clone, Copy, Default)]
pub struct IncludeAll;

impl Filter for IncludeAll {
    fn include(&self, _node: NodeRef<'_>) -> bool {
        true
    }
}

/// Adapter turning a closure into a [`Filter`]
#[derive(Debug, Clone, Copy)]
pub struct FnFilter<F>(pub F);

impl<F> Filter for FnFilter<F>
where
    F: Fn(NodeRef<'_>) -> bool,
{
    fn include(&self, node: NodeRef<'_>) -> bool {
        (self.0)(node)
    }
}

/// Filter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Folder names excluded from enumeration
    pub skip_folders: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            skip_folders: DEFAULT_SKIP_FOLDERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Default filter used by every step unless it needs the raw view
///
/// Excludes links with a non-navigable scheme and folders on the skip-list.
#[derive(Debug, Clone)]
pub struct ChromeFilter {
    skip_folders: AHashSet<String>,
}

impl ChromeFilter {
    /// Build a filter from configuration
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            skip_folders: config.skip_folders.iter().cloned().collect(),
        }
    }

    /// Extend the skip-list with additional folder names
    pub fn with_additional<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_folders.extend(names.into_iter().map(Into::into));
        self
    }

    /// True if the URL is a regular, navigable bookmark
    pub fn is_navigable(url: &str) -> bool {
        !SKIPPED_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
    }

    /// True if folders with this name are excluded
    pub fn skips_folder(&self, name: &str) -> bool {
        self.skip_folders.contains(name)
    }
}

impl Default for ChromeFilter {
    fn default() -> Self {
        Self::new(&FilterConfig::default())
    }
}

impl Filter for ChromeFilter {
    fn include(&self, node: NodeRef<'_>) -> bool {
        match node {
            NodeRef::Link(link) => Self::is_navigable(&link.url),
            NodeRef::Folder(folder) => !self.skips_folder(&folder.info.name),
        }
    }
}

//! Run context and per-run step options

use crate::error::{PipelineError, Result};
use pbm_core::{timestamp, walk_both_roots, ChromeFilter, FilterConfig, IdAllocator, Link, Tree};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Options for one run, keyed `<step>.<key>`
///
/// A nested form (`{"datefolders": {"mode": "merge"}}`) is accepted as well,
/// which is what an unquoted dotted key in a TOML table produces. Steps read
/// the keys they know and ignore the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepOptions(BTreeMap<String, Value>);

impl StepOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up `step.key`, flat first, then nested
    pub fn get(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.0.get(key) {
            return Some(value);
        }
        let (step, field) = key.split_once('.')?;
        self.0.get(step)?.get(field)
    }

    /// String option; any other JSON type is a configuration error
    pub fn get_str(&self, key: &str) -> Result<Option<&str>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(PipelineError::config(format!(
                "option '{}' must be a string, got {}",
                key, other
            ))),
        }
    }

    /// Boolean option; any other JSON type is a configuration error
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(PipelineError::config(format!(
                "option '{}' must be a boolean, got {}",
                key, other
            ))),
        }
    }
}

impl FromIterator<(String, Value)> for StepOptions {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// State threaded through every hook of every step in a run
///
/// Steps share this by `&mut`; the allocator is the only source of new ids.
#[derive(Debug)]
pub struct RunContext {
    /// The tree being transformed
    pub tree: Tree,
    /// Id source for every node synthesized during the run
    pub alloc: IdAllocator,
    /// Skip-list for the default filter
    pub filter_config: FilterConfig,
    now: i64,
}

impl RunContext {
    /// Wrap a freshly loaded tree, seeding the allocator from it
    pub fn new(tree: Tree) -> Self {
        let alloc = IdAllocator::seed(&tree);
        Self {
            tree,
            alloc,
            filter_config: FilterConfig::default(),
            now: timestamp::now(),
        }
    }

    pub fn with_filter_config(mut self, filter_config: FilterConfig) -> Self {
        self.filter_config = filter_config;
        self
    }

    /// Pin the run's clock (long-date value)
    pub fn with_now(mut self, now: i64) -> Self {
        self.now = now;
        self
    }

    /// Timestamp stamped on nodes synthesized during this run
    pub fn now(&self) -> i64 {
        self.now
    }

    /// The default filter for this run
    pub fn filter(&self) -> ChromeFilter {
        ChromeFilter::new(&self.filter_config)
    }

    /// Owned, path-annotated copies of every link the default filter admits,
    /// in canonical order (primary root, then secondary root)
    pub fn filtered_links(&self) -> Vec<Link> {
        let filter = self.filter();
        walk_both_roots(&self.tree, &filter)
            .filter_map(|visit| visit.annotated_link())
            .collect()
    }

    /// Give the tree back to the caller
    pub fn into_tree(self) -> Tree {
        self.tree
    }
}

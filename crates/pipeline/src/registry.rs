//! Step name resolution
//!
//! The embedding application decides which steps exist by filling a
//! [`StepRegistry`]; nothing is discovered implicitly.

use crate::context::StepOptions;
use crate::error::{PipelineError, Result};
use crate::step::Step;
use crate::steps;
use ahash::AHashMap;

/// The sequence run when none is configured
pub const DEFAULT_SEQUENCE: [&str; 9] = [
    "null",
    "dedupe",
    "datefolders",
    "bookmarkletsfolder",
    "chromefolder",
    "quicklinks",
    "starred",
    "allinone",
    "queuefolder",
];

/// Builds a step from the run's options
///
/// Option values are parsed here, so a bad value fails the sequence build
/// rather than the run.
pub type StepCtor = Box<dyn Fn(&StepOptions) -> Result<Box<dyn Step>>>;

/// Mapping from step name to constructor
#[derive(Default)]
pub struct StepRegistry {
    ctors: AHashMap<String, StepCtor>,
    order: Vec<String>,
}

impl StepRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in step
    pub fn with_builtin_steps() -> Self {
        let mut registry = Self::new();
        steps::register_builtin(&mut registry);
        registry
    }

    /// Register (or replace) a step constructor
    pub fn register<F>(&mut self, name: impl Into<String>, ctor: F)
    where
        F: Fn(&StepOptions) -> Result<Box<dyn Step>> + 'static,
    {
        let name = name.into();
        if self.ctors.insert(name.clone(), Box::new(ctor)).is_none() {
            self.order.push(name);
        }
    }

    /// Registered names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ctors.contains_key(name)
    }

    /// Instantiate a step by name
    pub fn create(&self, name: &str, options: &StepOptions) -> Result<Box<dyn Step>> {
        let ctor = self.ctors.get(name).ok_or_else(|| {
            PipelineError::config(format!(
                "unknown step '{}' (available: {})",
                name,
                self.order.join(", ")
            ))
        })?;
        ctor(options)
    }
}

impl std::fmt::Debug for StepRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepRegistry").field("steps", &self.order).finish()
    }
}

//! Ordered step sequences and the three-pass driver

use crate::context::{RunContext, StepOptions};
use crate::error::{PipelineError, Result};
use crate::registry::StepRegistry;
use crate::step::{Pass, Step};
use pbm_core::{FilterConfig, Tree};
use serde_json::Value;
use tracing::{debug, info};

/// Summary of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Steps in the sequence
    pub steps: usize,
    /// Nodes dropped when the secondary root was cleared
    pub cleared: usize,
    /// Nodes that received a fresh id in the final repair
    pub repaired: usize,
}

/// A resolved, ready-to-run list of steps
pub struct Sequence {
    steps: Vec<Box<dyn Step>>,
}

impl Sequence {
    /// Resolve every name up front
    ///
    /// Fails on an empty list, an unknown name, or a bad option value,
    /// before any tree exists to be mutated.
    pub fn build<S: AsRef<str>>(
        registry: &StepRegistry,
        names: &[S],
        options: &StepOptions,
    ) -> Result<Self> {
        if names.is_empty() {
            return Err(PipelineError::config("step sequence is empty"));
        }
        let steps = names
            .iter()
            .map(|name| registry.create(name.as_ref(), options))
            .collect::<Result<Vec<_>>>()?;
        debug!("Built sequence of {} step(s)", steps.len());
        Ok(Self { steps })
    }

    /// Wrap already-constructed steps
    pub fn from_steps(steps: Vec<Box<dyn Step>>) -> Result<Self> {
        if steps.is_empty() {
            return Err(PipelineError::config("step sequence is empty"));
        }
        Ok(Self { steps })
    }

    pub fn names(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step's preprocess, then every process, then every
    /// postprocess; then clear the secondary root and repair ids
    ///
    /// The first hook error aborts the run. The context's tree is then in an
    /// unspecified state and must not be persisted.
    pub fn run(&mut self, ctx: &mut RunContext) -> Result<RunReport> {
        for pass in Pass::ALL {
            for step in &mut self.steps {
                debug!("{}: {}", pass.as_str(), step.name());
                step.run_pass(pass, ctx)?;
            }
        }

        let cleared = ctx.tree.other.children.len();
        ctx.tree.other.children.clear();
        let repaired = ctx.alloc.repair(&mut ctx.tree)?;

        let report = RunReport {
            steps: self.steps.len(),
            cleared,
            repaired,
        };
        info!(
            "Ran {} step(s); cleared {} secondary node(s), repaired {} id(s)",
            report.steps, report.cleared, report.repaired
        );
        Ok(report)
    }
}

impl std::fmt::Debug for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Load a document, run the named steps over it, and project it back
///
/// The sequence is built before the document is decoded, so configuration
/// errors never reach the tree.
pub fn transform<S: AsRef<str>>(
    document: Value,
    registry: &StepRegistry,
    names: &[S],
    options: &StepOptions,
    filter_config: FilterConfig,
) -> Result<(Value, RunReport)> {
    let mut sequence = Sequence::build(registry, names, options)?;
    let tree = Tree::from_value(document)?;
    let mut ctx = RunContext::new(tree).with_filter_config(filter_config);
    let report = sequence.run(&mut ctx)?;
    Ok((ctx.into_tree().to_value(), report))
}

//! The transformation step contract

use crate::context::RunContext;
use crate::error::Result;

/// Which of the three hooks is being run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Preprocess,
    Process,
    Postprocess,
}

impl Pass {
    /// The passes in run order.
    pub const ALL: [Pass; 3] = [Pass::Preprocess, Pass::Process, Pass::Postprocess];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pass::Preprocess => "preprocess",
            Pass::Process => "process",
            Pass::Postprocess => "postprocess",
        }
    }
}

/// One unit of the pipeline
///
/// Every hook defaults to a no-op, so a step overrides only what it needs.
/// Typical shape: `preprocess` removes the step's stale folder, `process` or
/// `postprocess` builds a fresh one. Hooks must skip malformed data quietly
/// but return an error when one of their own invariants breaks.
pub trait Step {
    /// Registry name of the step
    fn name(&self) -> &str;

    fn preprocess(&mut self, _ctx: &mut RunContext) -> Result<()> {
        Ok(())
    }

    fn process(&mut self, _ctx: &mut RunContext) -> Result<()> {
        Ok(())
    }

    fn postprocess(&mut self, _ctx: &mut RunContext) -> Result<()> {
        Ok(())
    }

    /// Dispatch one pass to the matching hook
    fn run_pass(&mut self, pass: Pass, ctx: &mut RunContext) -> Result<()> {
        match pass {
            Pass::Preprocess => self.preprocess(ctx),
            Pass::Process => self.process(ctx),
            Pass::Postprocess => self.postprocess(ctx),
        }
    }
}

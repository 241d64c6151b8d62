use crate::context::RunContext;
use crate::dedupe::dedupe_tree;
use crate::error::Result;
use crate::step::Step;
use tracing::info;

/// Removes repeated (url, date_added) links from both roots before any
/// other step looks at them
#[derive(Debug, Clone, Copy, Default)]
pub struct DedupeStep;

impl DedupeStep {
    pub const NAME: &'static str = "dedupe";
}

impl Step for DedupeStep {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn preprocess(&mut self, ctx: &mut RunContext) -> Result<()> {
        let removed = dedupe_tree(&mut ctx.tree)?;
        if removed > 0 {
            info!("Removed {} duplicate bookmark(s)", removed);
        }
        Ok(())
    }
}

use crate::context::RunContext;
use crate::error::Result;
use crate::merge::{merge, StarRule};
use crate::step::Step;
use tracing::info;

/// Collects links whose URL ends in one or more `#` into a `starred` folder,
/// one entry per base URL
#[derive(Debug, Clone, Copy, Default)]
pub struct StarredStep;

impl StarredStep {
    pub const NAME: &'static str = "starred";
    pub const FOLDER: &'static str = "starred";
}

impl Step for StarredStep {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn preprocess(&mut self, ctx: &mut RunContext) -> Result<()> {
        ctx.tree.remove_bar_folders(Self::FOLDER);
        Ok(())
    }

    fn postprocess(&mut self, ctx: &mut RunContext) -> Result<()> {
        let links = ctx.filtered_links();
        let now = ctx.now();
        let folder = merge(links, &StarRule, Self::FOLDER, &mut ctx.alloc, now)?;
        info!("Starred folder holds {} link(s)", folder.children.len());
        ctx.tree.push_bar_folder(folder);
        Ok(())
    }
}

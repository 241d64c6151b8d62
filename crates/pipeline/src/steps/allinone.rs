use crate::context::RunContext;
use crate::error::Result;
use crate::merge::{merge, PassthroughRule};
use crate::step::Step;
use pbm_core::Node;
use tracing::info;

/// Adds an `all` folder holding a renumbered copy of every filtered link
///
/// The folder goes into the primary root; the secondary root is emptied at
/// the end of every run.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllInOneStep;

impl AllInOneStep {
    pub const NAME: &'static str = "allinone";
    pub const FOLDER: &'static str = "all";
}

impl Step for AllInOneStep {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn preprocess(&mut self, ctx: &mut RunContext) -> Result<()> {
        ctx.tree.remove_bar_folders(Self::FOLDER);
        ctx.tree
            .other
            .children
            .retain(|node| !matches!(node, Node::Folder(f) if f.info.name == Self::FOLDER));
        Ok(())
    }

    fn postprocess(&mut self, ctx: &mut RunContext) -> Result<()> {
        let links = ctx.filtered_links();
        let now = ctx.now();
        let folder = merge(links, &PassthroughRule, Self::FOLDER, &mut ctx.alloc, now)?;
        info!("'{}' folder holds {} link(s)", Self::FOLDER, folder.children.len());
        ctx.tree.push_bar_folder(folder);
        Ok(())
    }
}

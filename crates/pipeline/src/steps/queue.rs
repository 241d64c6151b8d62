use crate::context::RunContext;
use crate::error::Result;
use crate::step::Step;
use pbm_core::Folder;
use tracing::warn;

/// Resets the `queue` folder to a single empty folder at the end of the
/// primary root
///
/// Anything left in a queue folder at this point was not re-filed by an
/// earlier step and is dropped, with a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueueFolderStep;

impl QueueFolderStep {
    pub const NAME: &'static str = "queuefolder";
    pub const FOLDER: &'static str = "queue";
}

impl Step for QueueFolderStep {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn postprocess(&mut self, ctx: &mut RunContext) -> Result<()> {
        for folder in ctx.tree.remove_bar_folders(Self::FOLDER) {
            if !folder.children.is_empty() {
                warn!(
                    "Dropping {} unprocessed item(s) from '{}' folder {:?}",
                    folder.children.len(),
                    Self::FOLDER,
                    folder.info.id.as_ref().map(|id| id.key())
                );
            }
        }
        let now = ctx.now();
        ctx.tree
            .push_bar_folder(Folder::new(ctx.alloc.next_id()?, Self::FOLDER, now));
        Ok(())
    }
}

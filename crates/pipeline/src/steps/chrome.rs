use crate::context::RunContext;
use crate::error::Result;
use crate::step::Step;
use pbm_core::{Folder, Link};

/// Browser-internal pages collected in the `chrome` folder
pub const CHROME_URLS: [&str; 10] = [
    "chrome://bookmarks",
    "chrome://history",
    "chrome://extensions",
    "chrome://plugins",
    "chrome://settings",
    "chrome://flags",
    "chrome://apps",
    "chrome://downloads",
    "chrome://chrome",
    "chrome://chrome-urls",
];

/// Always replaces the `chrome` folder with a fresh one
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeFolderStep;

impl ChromeFolderStep {
    pub const NAME: &'static str = "chromefolder";
    pub const FOLDER: &'static str = "chrome";
}

impl Step for ChromeFolderStep {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn preprocess(&mut self, ctx: &mut RunContext) -> Result<()> {
        ctx.tree.remove_bar_folders(Self::FOLDER);
        Ok(())
    }

    fn postprocess(&mut self, ctx: &mut RunContext) -> Result<()> {
        let now = ctx.now();
        let mut folder = Folder::new(ctx.alloc.next_id()?, Self::FOLDER, now);
        for url in CHROME_URLS {
            folder.children.push(Link::new(ctx.alloc.next_id()?, url, url, now).into());
        }
        ctx.tree.push_bar_folder(folder);
        Ok(())
    }
}

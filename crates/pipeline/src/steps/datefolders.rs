use crate::context::{RunContext, StepOptions};
use crate::error::{PipelineError, Result};
use crate::reorganize::{reorganize_tree, DateNaming};
use crate::step::Step;
use pbm_core::{Folder, Node};
use tracing::{debug, info};

/// How the date folders are installed into the primary root
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateFolderMode {
    /// The date folders become the whole primary root
    #[default]
    Replace,
    /// Same-named top-level folders are replaced in place, new ones are
    /// inserted after the previous date folder, everything else stays
    Merge,
}

impl DateFolderMode {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "replace" => Ok(Self::Replace),
            "merge" => Ok(Self::Merge),
            other => Err(PipelineError::config(format!(
                "datefolders.mode must be 'replace' or 'merge', got '{}'",
                other
            ))),
        }
    }
}

/// Reorganizes every filtered link of both roots into year / month / day
/// folders
///
/// Options: `datefolders.mode` (`replace` | `merge`), `datefolders.zero_pad`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateFoldersStep {
    mode: DateFolderMode,
    naming: DateNaming,
}

impl DateFoldersStep {
    pub const NAME: &'static str = "datefolders";

    pub fn new(mode: DateFolderMode, naming: DateNaming) -> Self {
        Self { mode, naming }
    }

    pub fn from_options(options: &StepOptions) -> Result<Self> {
        let mode = match options.get_str("datefolders.mode")? {
            Some(value) => DateFolderMode::parse(value)?,
            None => DateFolderMode::default(),
        };
        let zero_pad = options.get_bool("datefolders.zero_pad")?.unwrap_or(false);
        Ok(Self::new(mode, DateNaming { zero_pad }))
    }
}

impl Step for DateFoldersStep {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn process(&mut self, ctx: &mut RunContext) -> Result<()> {
        let filter = ctx.filter();
        let folders = reorganize_tree(&ctx.tree, &filter, &mut ctx.alloc, self.naming)?;
        info!("Built {} date folder(s)", folders.len());

        match self.mode {
            DateFolderMode::Replace => {
                ctx.tree.bookmark_bar.children = folders.into_iter().map(Node::Folder).collect();
            }
            DateFolderMode::Merge => install_merged(&mut ctx.tree.bookmark_bar, folders),
        }

        // every secondary-root link now lives in a date folder
        let moved = ctx.tree.other.children.len();
        ctx.tree.other.children.clear();
        debug!("Took {} node(s) out of the secondary root", moved);
        Ok(())
    }
}

fn install_merged(bar: &mut Folder, folders: Vec<Folder>) {
    let mut previous: Option<usize> = None;
    for folder in folders {
        let existing = bar
            .children
            .iter()
            .position(|node| matches!(node, Node::Folder(f) if f.info.name == folder.info.name));
        let index = match existing {
            Some(index) => {
                bar.children[index] = Node::Folder(folder);
                index
            }
            None => {
                let index = previous.map_or(0, |p| p + 1);
                bar.children.insert(index, Node::Folder(folder));
                index
            }
        };
        previous = Some(index);
    }
}

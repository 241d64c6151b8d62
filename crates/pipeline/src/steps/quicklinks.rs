use crate::context::{RunContext, StepOptions};
use crate::error::{PipelineError, Result};
use crate::step::Step;
use pbm_core::{LongValue, Node};
use tracing::debug;

/// Keeps top-level nodes named `<prefix>...` at the end of the primary root
///
/// They are taken out before any other step reorganizes the root and put
/// back last, renumbered. Option: `quicklinks.prefix`.
#[derive(Debug, Clone)]
pub struct QuicklinksStep {
    prefix: String,
    captured: Vec<Node>,
}

impl QuicklinksStep {
    pub const NAME: &'static str = "quicklinks";
    pub const DEFAULT_PREFIX: &'static str = "quicklinks";

    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            captured: Vec::new(),
        }
    }

    pub fn from_options(options: &StepOptions) -> Result<Self> {
        let prefix = options
            .get_str("quicklinks.prefix")?
            .unwrap_or(Self::DEFAULT_PREFIX);
        if prefix.is_empty() {
            return Err(PipelineError::config("quicklinks.prefix must not be empty"));
        }
        Ok(Self::new(prefix))
    }

    fn matches(&self, node: &Node) -> bool {
        let name = node.name();
        !name.is_empty() && name.starts_with(&self.prefix)
    }
}

impl Default for QuicklinksStep {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PREFIX)
    }
}

impl Step for QuicklinksStep {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn preprocess(&mut self, ctx: &mut RunContext) -> Result<()> {
        let children = std::mem::take(&mut ctx.tree.bookmark_bar.children);
        let (captured, kept): (Vec<Node>, Vec<Node>) = children.into_iter().partition(|node| self.matches(node));
        ctx.tree.bookmark_bar.children = kept;
        debug!("Captured {} quicklink node(s)", captured.len());
        self.captured.extend(captured);
        Ok(())
    }

    fn postprocess(&mut self, ctx: &mut RunContext) -> Result<()> {
        let now = ctx.now();
        for mut node in self.captured.drain(..) {
            let info = node.info_mut();
            info.id = Some(LongValue::from_i64(ctx.alloc.next_id()?));
            let added = info.date_added.get_or_insert_with(|| LongValue::from_i64(now)).clone();
            info.date_modified.get_or_insert(added);
            ctx.tree.bookmark_bar.children.push(node);
        }
        Ok(())
    }
}

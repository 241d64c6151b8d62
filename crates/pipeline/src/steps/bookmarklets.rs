use crate::context::RunContext;
use crate::error::Result;
use crate::step::Step;
use ahash::AHashSet;
use pbm_core::{walk_folder, Folder, IncludeAll, Link, Node};
use tracing::debug;

/// `(name, url)` of the bookmarklets every run installs
pub const DEFAULT_BOOKMARKLETS: [(&str, &str); 4] = [
    (
        "notetab (400px)",
        r#"data:text/html, <html style="font-family:Helvetica; background: #333; width: 400px; margin: 0 auto; color: white;" contenteditable><title>todo</title>==================<br>todo<br>==================<br>."#,
    ),
    (
        "notetab (800px)",
        r#"data:text/html, <html style="font-family:Helvetica; background: #333; width: 800px; margin: 0 auto; color: white;" contenteditable><title>todo</title>==================<br>todo<br>==================<br>."#,
    ),
    (
        "vidcast",
        r#"javascript:function iprl5()%7Bvar d%3Ddocument,z%3Dd.createElement(%27scr%27%2B%27ipt%27),b%3Dd.body,l%3Dd.location%3Btry%7Bif(!b)throw(0)%3Bz.setAttribute(%27src%27,%27https://dabble.me/cast/bookmarklet.js%3F%27%2B(new Date().getTime()))%3Bb.appendChild(z)%3B%7Dcatch(e)%7Balert(%27Please wait until the page has loaded.%27)%3B%7D%7Diprl5()%3Bvoid(0)"#,
    ),
    (
        "iframeify",
        r#"javascript:var i = document.createElement("iframe");i.src = window.location;i.setAttribute("width",window.innerWidth-20);i.setAttribute("height",window.innerHeight-20); i.style.position="fixed"; i.style.top=10; i.style.left=10; document.body.appendChild(i);"#,
    ),
];

/// Rebuilds the `bookmarklets` folder: the defaults first, then any links
/// the user had added to it that are not defaults
#[derive(Debug, Clone, Default)]
pub struct BookmarkletsStep {
    remembered: Vec<Link>,
}

impl BookmarkletsStep {
    pub const NAME: &'static str = "bookmarkletsfolder";
    pub const FOLDER: &'static str = "bookmarklets";
}

impl Step for BookmarkletsStep {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn preprocess(&mut self, ctx: &mut RunContext) -> Result<()> {
        for folder in ctx.tree.remove_bar_folders(Self::FOLDER) {
            self.remembered
                .extend(walk_folder(&folder, IncludeAll).filter_map(|visit| visit.link().cloned()));
        }
        debug!("Remembered {} existing bookmarklet(s)", self.remembered.len());
        Ok(())
    }

    fn process(&mut self, ctx: &mut RunContext) -> Result<()> {
        let now = ctx.now();
        let mut folder = Folder::new(ctx.alloc.next_id()?, Self::FOLDER, now);
        let mut known = AHashSet::new();
        for (name, url) in DEFAULT_BOOKMARKLETS {
            known.insert((name.to_string(), url.to_string()));
            folder
                .children
                .push(Link::new(ctx.alloc.next_id()?, name, url, now).into());
        }
        for link in self.remembered.drain(..) {
            if known.insert((link.info.name.clone(), link.url.clone())) {
                folder.children.push(Node::Link(link));
            }
        }
        ctx.tree.push_bar_folder(folder);
        Ok(())
    }
}

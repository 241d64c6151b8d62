//! In-place duplicate link removal

use crate::error::{PipelineError, Result};
use ahash::AHashSet;
use pbm_core::{Folder, Link, Node, Tree};
use tracing::debug;

/// Identity of a link for deduplication: url plus raw creation time
pub type DedupeKey = (String, Option<String>);

fn dedupe_key(link: &Link) -> DedupeKey {
    (link.url.clone(), link.info.date_added.as_ref().map(|d| d.key()))
}

/// Remove every link whose (url, date_added) was already seen, walking the
/// primary root then the secondary root, unfiltered
///
/// Folders are never merged. Returns the number of links removed; a second
/// call on the result removes nothing.
pub fn dedupe_tree(tree: &mut Tree) -> Result<usize> {
    let mut seen = AHashSet::new();
    let removed = dedupe_folder(&mut tree.bookmark_bar, &mut seen)? + dedupe_folder(&mut tree.other, &mut seen)?;
    if removed > 0 {
        debug!("Removed {} duplicate link(s)", removed);
    }
    Ok(removed)
}

/// Deduplicate one folder's subtree against a shared seen-set
pub fn dedupe_folder(folder: &mut Folder, seen: &mut AHashSet<DedupeKey>) -> Result<usize> {
    let mut removed = 0;
    let mut index = 0;
    while index < folder.children.len() {
        match &mut folder.children[index] {
            Node::Folder(sub) => {
                removed += dedupe_folder(sub, seen)?;
                index += 1;
            }
            Node::Link(link) => {
                if seen.insert(dedupe_key(link)) {
                    index += 1;
                    continue;
                }
                debug!("Duplicate: {} ({})", link.url, link.info.name);
                let before = folder.children.len();
                folder.children.remove(index);
                if folder.children.len() >= before {
                    return Err(PipelineError::Invariant(format!(
                        "removing a duplicate from '{}' did not shrink it ({} children)",
                        folder.info.name, before
                    )));
                }
                removed += 1;
            }
        }
    }
    Ok(removed)
}

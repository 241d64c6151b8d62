//! Collapsing groups of links into representative links
//!
//! A [`MergeRule`] says how links group, which link of a group stands in for
//! it, and how the stand-in is named. [`merge`] applies a rule to a flat list
//! and wraps the results in one new folder.

use crate::error::{PipelineError, Result};
use ahash::AHashMap;
use pbm_core::{Folder, IdAllocator, Link, LongValue, Node, NodeInfo};
use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

/// Trailing character marking a starred URL
pub const STAR_MARKER: char = '#';

/// Grouping and selection policy for [`merge`]
pub trait MergeRule {
    type Key: Eq + Hash + Clone + Debug;

    /// Group key of a link; `None` leaves the link out entirely.
    /// `index` is the link's position in the input.
    fn key(&self, index: usize, link: &Link) -> Option<Self::Key>;

    /// Ordering where the greater link is the better representative
    fn prefer(&self, a: &Link, b: &Link) -> Ordering;

    /// Name of the merged link
    fn name(&self, representative: &Link, _group: &[Link]) -> String {
        representative.info.name.clone()
    }

    /// `(date_added, date_modified)` of the merged link: the earliest
    /// creation and the latest modification in the group
    fn dates(&self, group: &[Link]) -> (Option<i64>, Option<i64>) {
        let added = group.iter().filter_map(|l| known(l.info.added_value())).min();
        let modified = group.iter().filter_map(|l| known(l.info.modified_value())).max();
        (added, modified)
    }
}

fn known(value: Option<i64>) -> Option<i64> {
    value.filter(|v| *v > 0)
}

/// Group `links` by `rule`, keep one representative per group, and wrap the
/// representatives in a new folder named `folder_name`
///
/// Groups keep first-seen order, and within a group the first of several
/// equally preferred links wins. Every output node gets a fresh id; the
/// folder is numbered before its children. The folder's dates span its
/// children, or are `now` when there are none.
pub fn merge<R: MergeRule>(
    links: Vec<Link>,
    rule: &R,
    folder_name: &str,
    alloc: &mut IdAllocator,
    now: i64,
) -> Result<Folder> {
    let mut slots: AHashMap<R::Key, usize> = AHashMap::new();
    let mut groups: Vec<(R::Key, Vec<Link>)> = Vec::new();
    for (index, link) in links.into_iter().enumerate() {
        let Some(key) = rule.key(index, &link) else {
            continue;
        };
        match slots.get(&key) {
            Some(&slot) => groups[slot].1.push(link),
            None => {
                slots.insert(key.clone(), groups.len());
                groups.push((key, vec![link]));
            }
        }
    }

    let mut folder = Folder::new(alloc.next_id()?, folder_name, 0);
    for (key, group) in &groups {
        let representative = group
            .iter()
            .reduce(|best, link| match rule.prefer(link, best) {
                Ordering::Greater => link,
                _ => best,
            })
            .ok_or_else(|| PipelineError::NoRepresentative(format!("{:?}", key)))?;
        let (added, modified) = rule.dates(group);
        let merged = Link {
            info: NodeInfo {
                id: Some(LongValue::from_i64(alloc.next_id()?)),
                name: rule.name(representative, group),
                date_added: added.map(LongValue::from_i64),
                date_modified: modified.map(LongValue::from_i64),
                ..NodeInfo::default()
            },
            url: representative.url.clone(),
        };
        folder.children.push(Node::Link(merged));
    }

    let (added, modified) = span(&folder.children);
    folder.info.date_added = Some(LongValue::from_i64(added.unwrap_or(now)));
    folder.info.date_modified = Some(LongValue::from_i64(modified.unwrap_or(now)));

    debug!("Merged into '{}': {} group(s)", folder_name, groups.len());
    Ok(folder)
}

fn span(children: &[Node]) -> (Option<i64>, Option<i64>) {
    let added = children.iter().filter_map(|n| known(n.info().added_value())).min();
    let modified = children.iter().filter_map(|n| known(n.info().modified_value())).max();
    (added, modified)
}

/// Number of trailing star markers
pub fn count_stars(url: &str) -> usize {
    url.chars().rev().take_while(|c| *c == STAR_MARKER).count()
}

/// Split a URL into its base (markers stripped) and its star count
pub fn split_stars(url: &str) -> (&str, usize) {
    let base = url.trim_end_matches(STAR_MARKER);
    (base, url.len() - base.len())
}

/// Starred links: grouped by base URL, most stars wins
///
/// Ties go to the most recently added link. Only links with at least one
/// marker take part.
#[derive(Debug, Clone, Copy, Default)]
pub struct StarRule;

impl MergeRule for StarRule {
    type Key = String;

    fn key(&self, _index: usize, link: &Link) -> Option<String> {
        match split_stars(&link.url) {
            (_, 0) => None,
            (base, _) => Some(base.to_string()),
        }
    }

    fn prefer(&self, a: &Link, b: &Link) -> Ordering {
        count_stars(&a.url)
            .cmp(&count_stars(&b.url))
            .then_with(|| a.info.added_value().cmp(&b.info.added_value()))
    }

    fn name(&self, representative: &Link, _group: &[Link]) -> String {
        let stars = count_stars(&representative.url);
        format!("[X{}] {}", "O".repeat(stars), representative.info.name)
    }
}

/// Every link is its own group: a renumbered copy of the input
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughRule;

impl MergeRule for PassthroughRule {
    type Key = usize;

    fn key(&self, index: usize, _link: &Link) -> Option<usize> {
        Some(index)
    }

    fn prefer(&self, _a: &Link, _b: &Link) -> Ordering {
        Ordering::Equal
    }
}

//! Date-based folder hierarchy
//!
//! ```text
//! 2014
//!   2014-8
//!     2014-8-22
//!       <links added that day, oldest first>
//! ```

use crate::error::Result;
use chrono::{DateTime, Datelike, Utc};
use pbm_core::{timestamp, walk_both_roots, Filter, Folder, IdAllocator, Link, Node, Tree};
use tracing::debug;

/// Name of the folder collecting links without a creation time
pub const UNDATED_FOLDER: &str = "undated";

/// How date folders are named
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateNaming {
    /// `2014-01-02` instead of `2014-1-2`
    pub zero_pad: bool,
}

impl DateNaming {
    fn year(&self, year: i32) -> String {
        year.to_string()
    }

    fn month(&self, year: i32, month: u32) -> String {
        if self.zero_pad {
            format!("{}-{:02}", year, month)
        } else {
            format!("{}-{}", year, month)
        }
    }

    fn day(&self, year: i32, month: u32, day: u32) -> String {
        if self.zero_pad {
            format!("{}-{:02}-{:02}", year, month, day)
        } else {
            format!("{}-{}-{}", year, month, day)
        }
    }
}

/// Collect the links of both roots that pass `filter` and bucket them
pub fn reorganize_tree<F: Filter + Clone>(
    tree: &Tree,
    filter: F,
    alloc: &mut IdAllocator,
    naming: DateNaming,
) -> Result<Vec<Folder>> {
    let links: Vec<Link> = walk_both_roots(tree, filter)
        .filter_map(|visit| visit.annotated_link())
        .collect();
    reorganize_by_date(links, alloc, naming)
}

/// Bucket links into year / month / day folders
///
/// Links are stably sorted by creation time and grouped consecutively by
/// day, then month, then year. Folder ids come from `alloc` in pre-order.
/// Links without a creation time go to a trailing [`UNDATED_FOLDER`].
/// No links gives no folders.
pub fn reorganize_by_date(links: Vec<Link>, alloc: &mut IdAllocator, naming: DateNaming) -> Result<Vec<Folder>> {
    let (mut dated, undated): (Vec<_>, Vec<_>) = links
        .into_iter()
        .map(|link| (link.info.added_at(), link))
        .partition(|(added, _)| added.is_some());

    dated.sort_by_key(|(added, _)| *added);
    let dated = dated
        .into_iter()
        .filter_map(|(added, link)| added.map(|time| (time, link)));

    let days = group_consecutive(dated, |(time, _)| ymd(time));
    let months = group_consecutive(days, |((y, m, _), _)| (*y, *m));
    let years = group_consecutive(months, |((y, _), _)| *y);

    let mut folders = Vec::with_capacity(years.len() + 1);
    for (year, months) in years {
        let mut year_folder = Folder::new(alloc.next_id()?, naming.year(year), midnight(year, 1, 1));
        for ((_, month), days) in months {
            let mut month_folder = Folder::new(
                alloc.next_id()?,
                naming.month(year, month),
                midnight(year, month, 1),
            );
            for ((_, _, day), links) in days {
                let day_folder = Folder::new(
                    alloc.next_id()?,
                    naming.day(year, month, day),
                    midnight(year, month, day),
                )
                .with_children(links.into_iter().map(|(_, link)| Node::Link(link)).collect());
                month_folder.children.push(day_folder.into());
            }
            year_folder.children.push(month_folder.into());
        }
        folders.push(year_folder);
    }

    if !undated.is_empty() {
        debug!("{} link(s) have no creation time", undated.len());
        let children = undated.into_iter().map(|(_, link)| Node::Link(link)).collect();
        folders.push(Folder::new(alloc.next_id()?, UNDATED_FOLDER, 0).with_children(children));
    }
    Ok(folders)
}

fn ymd(time: &DateTime<Utc>) -> (i32, u32, u32) {
    (time.year(), time.month(), time.day())
}

fn midnight(year: i32, month: u32, day: u32) -> i64 {
    timestamp::encode_date(year, month, day).unwrap_or_default()
}

/// Group runs of equal keys, preserving order
fn group_consecutive<T, K, I, F>(items: I, key: F) -> Vec<(K, Vec<T>)>
where
    I: IntoIterator<Item = T>,
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();
    for item in items {
        let k = key(&item);
        match groups.last_mut() {
            Some((last, members)) if *last == k => members.push(item),
            _ => groups.push((k, vec![item])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbm_core::IncludeAll;

    fn link(id: i64, name: &str, date: i64) -> Link {
        Link::new(id, name, format!("https://{}/", name), date)
    }

    fn day(y: i32, m: u32, d: u32) -> i64 {
        timestamp::encode_date(y, m, d).unwrap()
    }

    fn names(folders: &[Folder]) -> Vec<&str> {
        folders.iter().map(|f| f.info.name.as_str()).collect()
    }

    fn child_names(folder: &Folder) -> Vec<&str> {
        folder.children.iter().map(Node::name).collect()
    }

    fn sub(folder: &Folder, index: usize) -> &Folder {
        folder.children[index].as_folder().unwrap()
    }

    #[test]
    fn test_empty_input_yields_no_folders() {
        let mut alloc = IdAllocator::starting_at(1);
        assert!(reorganize_by_date(Vec::new(), &mut alloc, DateNaming::default()).unwrap().is_empty());
        assert_eq!(alloc.peek(), Some(1));
    }

    #[test]
    fn test_sorted_nested_buckets() {
        let mut alloc = IdAllocator::starting_at(100);
        let links = vec![
            link(3, "c", day(2015, 6, 10)),
            link(1, "a", day(2014, 1, 1)),
            link(2, "b", day(2014, 1, 2)),
        ];
        let folders = reorganize_by_date(links, &mut alloc, DateNaming::default()).unwrap();

        assert_eq!(names(&folders), vec!["2014", "2015"]);
        assert_eq!(child_names(&folders[0]), vec!["2014-1"]);
        assert_eq!(child_names(sub(&folders[0], 0)), vec!["2014-1-1", "2014-1-2"]);
        assert_eq!(child_names(sub(sub(&folders[0], 0), 1)), vec!["b"]);
        assert_eq!(child_names(sub(sub(&folders[1], 0), 0)), vec!["c"]);

        // pre-order allocation: 2014, 2014-1, 2014-1-1, 2014-1-2, 2015, ...
        assert_eq!(folders[0].info.id_value(), Some(100));
        assert_eq!(sub(&folders[0], 0).info.id_value(), Some(101));
        assert_eq!(sub(sub(&folders[0], 0), 1).info.id_value(), Some(103));
        assert_eq!(folders[1].info.id_value(), Some(104));
        assert_eq!(alloc.peek(), Some(107));
    }

    #[test]
    fn test_folder_dates_are_calendar_midnights() {
        let mut alloc = IdAllocator::starting_at(1);
        let folders = reorganize_by_date(
            vec![link(1, "a", day(2014, 8, 22) + 3_600_000_000)],
            &mut alloc,
            DateNaming::default(),
        )
        .unwrap();
        let year = &folders[0];
        let month = sub(year, 0);
        let day_folder = sub(month, 0);
        assert_eq!(year.info.added_value(), Some(day(2014, 1, 1)));
        assert_eq!(month.info.added_value(), Some(day(2014, 8, 1)));
        assert_eq!(day_folder.info.modified_value(), Some(day(2014, 8, 22)));
    }

    #[test]
    fn test_same_day_links_share_a_folder_in_stable_order() {
        let mut alloc = IdAllocator::starting_at(1);
        let same = day(2014, 3, 5) + 42;
        let links = vec![link(1, "first", same), link(2, "later", same + 10), link(3, "second", same)];
        let folders = reorganize_by_date(links, &mut alloc, DateNaming::default()).unwrap();

        let day_folder = sub(sub(&folders[0], 0), 0);
        assert_eq!(child_names(day_folder), vec!["first", "second", "later"]);
    }

    #[test]
    fn test_days_ascend_within_month() {
        let mut alloc = IdAllocator::starting_at(1);
        let links = vec![
            link(1, "x", day(2016, 2, 29)),
            link(2, "y", day(2016, 2, 3)),
            link(3, "z", day(2016, 2, 14)),
        ];
        let folders = reorganize_by_date(links, &mut alloc, DateNaming { zero_pad: true }).unwrap();
        let month = sub(&folders[0], 0);
        assert_eq!(month.info.name, "2016-02");
        assert_eq!(child_names(month), vec!["2016-02-03", "2016-02-14", "2016-02-29"]);
    }

    #[test]
    fn test_undated_links_are_kept() {
        let mut alloc = IdAllocator::starting_at(1);
        let mut undated = link(2, "nodate", 0);
        undated.info.date_added = None;
        let folders = reorganize_by_date(
            vec![link(1, "a", day(2014, 1, 1)), undated, link(3, "zero", 0)],
            &mut alloc,
            DateNaming::default(),
        )
        .unwrap();
        assert_eq!(names(&folders), vec!["2014", UNDATED_FOLDER]);
        assert_eq!(child_names(&folders[1]), vec!["nodate", "zero"]);
    }

    #[test]
    fn test_reorganize_tree_walks_both_roots() {
        let bar = Folder::new(1, "bar", 0).with_children(vec![link(3, "a", day(2014, 1, 1)).into()]);
        let other = Folder::new(2, "other", 0).with_children(vec![link(4, "b", day(2014, 1, 1)).into()]);
        let tree = Tree::new(bar, other);
        let mut alloc = IdAllocator::seed(&tree);

        let folders = reorganize_tree(&tree, IncludeAll, &mut alloc, DateNaming::default()).unwrap();
        let day_folder = sub(sub(&folders[0], 0), 0);
        assert_eq!(child_names(day_folder), vec!["a", "b"]);
        assert_eq!(day_folder.children[1].info().path, vec!["other"]);
    }
}

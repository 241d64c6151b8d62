//! Identifier allocation
//!
//! One allocator exists per run. It is seeded from the largest id in the
//! tree and is the only place new ids come from, so ids stay unique across
//! every step of the pipeline, not just within one.

use crate::error::{Result, TreeError};
use crate::filter::IncludeAll;
use crate::node::{Folder, NodeInfo};
use crate::timestamp::LongValue;
use crate::tree::Tree;
use crate::walk::walk_folder;
use ahash::AHashSet;
use tracing::{debug, warn};

/// Monotonic id counter for one transformation run
///
/// Ids never wrap: once `i64::MAX` has been issued, or the tree already
/// holds it, further requests fail with [`TreeError::IdsExhausted`].
#[derive(Debug)]
pub struct IdAllocator {
    next: Option<i64>,
    last: i64,
}

impl IdAllocator {
    /// Create an allocator whose first id is `next`
    pub fn starting_at(next: i64) -> Self {
        let next = next.max(1);
        Self {
            next: Some(next),
            last: next - 1,
        }
    }

    /// Seed from every node in every root, unfiltered, folders included
    ///
    /// Starts at `max(id) + 1`, or 1 when the tree has no numeric ids.
    /// Unparsable ids are left out of the maximum.
    pub fn seed(tree: &Tree) -> Self {
        let mut max_id: Option<i64> = None;
        for root in tree.roots() {
            for visit in walk_folder(root, IncludeAll).with_folders() {
                let info = visit.node.info();
                match (&info.id, info.id_value()) {
                    (_, Some(id)) => max_id = Some(max_id.map_or(id, |m| m.max(id))),
                    (Some(raw), None) => {
                        warn!("Ignoring unparsable id {:?} on '{}'", raw.to_value(), info.name)
                    }
                    (None, None) => {}
                }
            }
        }

        match max_id {
            Some(i64::MAX) => {
                warn!("Tree already uses the largest possible id; no new ids can be issued");
                Self {
                    next: None,
                    last: i64::MAX,
                }
            }
            max => {
                let next = max.map_or(1, |max| max + 1);
                debug!("Id allocator starts at {}", next);
                Self::starting_at(next)
            }
        }
    }

    /// Issue a fresh id
    pub fn next_id(&mut self) -> Result<i64> {
        let id = self.next.ok_or(TreeError::IdsExhausted(self.last))?;
        self.next = id.checked_add(1);
        self.last = id;
        Ok(id)
    }

    /// The id the next call to [`IdAllocator::next_id`] returns, if any
    pub fn peek(&self) -> Option<i64> {
        self.next
    }

    /// Give a fresh id to every node whose id is missing, unparsable, or
    /// already used earlier in enumeration order
    ///
    /// Returns the number of nodes renumbered.
    pub fn repair(&mut self, tree: &mut Tree) -> Result<usize> {
        let mut seen = AHashSet::new();
        let mut repaired = 0;
        for root in tree.roots_mut() {
            repaired += self.repair_folder(root, &mut seen)?;
        }
        if repaired > 0 {
            debug!("Renumbered {} node(s) with missing or duplicate ids", repaired);
        }
        Ok(repaired)
    }

    fn repair_folder(&mut self, folder: &mut Folder, seen: &mut AHashSet<i64>) -> Result<usize> {
        let mut repaired = self.repair_info(&mut folder.info, seen)?;
        for child in &mut folder.children {
            repaired += match child.as_folder_mut() {
                Some(sub) => self.repair_folder(sub, seen)?,
                None => self.repair_info(child.info_mut(), seen)?,
            };
        }
        Ok(repaired)
    }

    fn repair_info(&mut self, info: &mut NodeInfo, seen: &mut AHashSet<i64>) -> Result<usize> {
        if let Some(id) = info.id_value() {
            if seen.insert(id) {
                return Ok(0);
            }
        }
        let fresh = self.next_id()?;
        debug!("Renumbering '{}' from {:?} to {}", info.name, info.id.as_ref().map(LongValue::key), fresh);
        info.id = Some(LongValue::from_i64(fresh));
        seen.insert(fresh);
        Ok(1)
    }
}

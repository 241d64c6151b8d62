//! Tree representation of a `Bookmarks` document
//!
//! Document shape:
//! ```text
//! {
//!   "checksum": "...",            dropped on load
//!   "roots": {
//!     "bookmark_bar": {folder},   primary root
//!     "other": {folder},          secondary root
//!     "synced": {folder}          optional
//!   },
//!   "version": 1                  passed through
//! }
//! ```

use crate::error::{Result, TreeError};
use crate::node::{Folder, KeyOrder, Node};
use serde_json::{Map, Value};
use tracing::debug;

/// Key of the primary ("bookmark bar") root
pub const BOOKMARK_BAR: &str = "bookmark_bar";
/// Key of the secondary ("other bookmarks") root
pub const OTHER: &str = "other";
/// Key of the optional mobile/synced root
pub const SYNCED: &str = "synced";

const OTHER_DEFAULT_NAME: &str = "Other bookmarks";

/// A bookmark tree: typed roots plus the untouched rest of the document
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    /// Primary, visible root
    pub bookmark_bar: Folder,
    /// Secondary catch-all root
    pub other: Folder,
    /// Mobile root, when present
    pub synced: Option<Folder>,
    /// Roots this crate does not model, kept verbatim
    extra_roots: Map<String, Value>,
    /// Top-level keys other than `roots`, kept verbatim
    document: Map<String, Value>,
    document_order: KeyOrder,
    roots_order: KeyOrder,
}

impl Tree {
    /// Create a tree from its two roots
    pub fn new(bookmark_bar: Folder, other: Folder) -> Self {
        Self {
            bookmark_bar,
            other,
            synced: None,
            extra_roots: Map::new(),
            document: Map::new(),
            document_order: KeyOrder::default(),
            roots_order: KeyOrder::default(),
        }
    }

    /// Build a tree from a decoded `Bookmarks` document
    ///
    /// A missing `other` root is replaced by an empty folder without an id;
    /// it receives one when the pipeline repairs ids.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut document) = value else {
            return Err(TreeError::NotAnObject);
        };
        let document_order = KeyOrder::of(&document);

        if document.remove("checksum").is_some() {
            debug!("Dropped stale checksum");
        }

        let mut roots = match document.remove("roots") {
            Some(Value::Object(roots)) => roots,
            _ => return Err(TreeError::MissingRoots),
        };
        let roots_order = KeyOrder::of(&roots);

        let bookmark_bar = match roots.remove(BOOKMARK_BAR) {
            Some(record) => root_folder(BOOKMARK_BAR, &record)?,
            None => return Err(TreeError::MissingRoot(BOOKMARK_BAR.to_string())),
        };
        let other = match roots.remove(OTHER) {
            Some(record) => root_folder(OTHER, &record)?,
            None => {
                debug!("Document has no '{}' root; synthesizing an empty one", OTHER);
                let mut folder = Folder::new(0, OTHER_DEFAULT_NAME, 0);
                folder.info.id = None;
                folder
            }
        };
        let synced = match roots.remove(SYNCED) {
            Some(record) => Some(root_folder(SYNCED, &record)?),
            None => None,
        };

        Ok(Self {
            bookmark_bar,
            other,
            synced,
            extra_roots: roots,
            document,
            document_order,
            roots_order,
        })
    }

    /// Parse a tree from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Project the tree back to a `Bookmarks` document
    ///
    /// Keys come out in the order they were read, so an untouched document
    /// serializes to the same text minus its checksum.
    pub fn to_value(&self) -> Value {
        let mut roots = Map::new();
        roots.insert(BOOKMARK_BAR.to_string(), self.bookmark_bar.to_record());
        roots.insert(OTHER.to_string(), self.other.to_record());
        if let Some(synced) = &self.synced {
            roots.insert(SYNCED.to_string(), synced.to_record());
        }
        for (key, value) in &self.extra_roots {
            roots.insert(key.clone(), value.clone());
        }

        let mut document = Map::new();
        document.insert("roots".to_string(), Value::Object(self.roots_order.arrange(roots)));
        for (key, value) in &self.document {
            document.insert(key.clone(), value.clone());
        }
        Value::Object(self.document_order.arrange(document))
    }

    /// Serialize as indented JSON text
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_value())?)
    }

    /// All typed roots: primary, secondary, then synced
    pub fn roots(&self) -> impl Iterator<Item = &Folder> {
        [Some(&self.bookmark_bar), Some(&self.other), self.synced.as_ref()]
            .into_iter()
            .flatten()
    }

    /// Mutable access to all typed roots, same order as [`Tree::roots`]
    pub fn roots_mut(&mut self) -> impl Iterator<Item = &mut Folder> {
        [Some(&mut self.bookmark_bar), Some(&mut self.other), self.synced.as_mut()]
            .into_iter()
            .flatten()
    }

    /// Remove every top-level primary-root folder with this name
    ///
    /// Returns the removed folders in their original order.
    pub fn remove_bar_folders(&mut self, name: &str) -> Vec<Folder> {
        let (removed, kept): (Vec<Node>, Vec<Node>) = std::mem::take(&mut self.bookmark_bar.children)
            .into_iter()
            .partition(|node| matches!(node, Node::Folder(folder) if folder.info.name == name));
        self.bookmark_bar.children = kept;

        if !removed.is_empty() {
            debug!("Removed {} '{}' folder(s) from {}", removed.len(), name, BOOKMARK_BAR);
        }
        removed
            .into_iter()
            .filter_map(|node| match node {
                Node::Folder(folder) => Some(folder),
                Node::Link(_) => None,
            })
            .collect()
    }

    /// Append a folder to the primary root
    pub fn push_bar_folder(&mut self, folder: Folder) {
        self.bookmark_bar.children.push(Node::Folder(folder));
    }

    /// Insert a folder into the primary root, clamping the position
    pub fn insert_bar_folder(&mut self, index: usize, folder: Folder) {
        let index = index.min(self.bookmark_bar.children.len());
        self.bookmark_bar.children.insert(index, Node::Folder(folder));
    }
}

fn root_folder(key: &str, record: &Value) -> Result<Folder> {
    Folder::from_record(record).ok_or_else(|| TreeError::RootNotFolder(key.to_string()))
}

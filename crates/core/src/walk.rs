//! Lazy depth-first traversal
//!
//! [`Walk`] yields every link reached, in child order, descending into every
//! folder the filter admits. Folders themselves are only yielded when asked
//! for with [`Walk::with_folders`]. The starting node is always entered; the
//! filter applies to its descendants.

use crate::filter::Filter;
use crate::node::{Folder, Link, Node, NodeRef};
use crate::tree::Tree;
use smallvec::SmallVec;
use std::iter::Chain;

/// Ancestor folder names, root first
pub type WalkPath<'a> = SmallVec<[&'a str; 8]>;

/// A node reached by the walker, with the folder chain leading to it
#[derive(Debug, Clone)]
pub struct Visit<'a> {
    pub node: NodeRef<'a>,
    pub path: WalkPath<'a>,
}

impl<'a> Visit<'a> {
    /// The visited link, if this visit is a link.
    pub fn link(&self) -> Option<&'a Link> {
        self.node.as_link()
    }

    /// Owned copy of the node, annotated with its path
    pub fn annotated(&self) -> Node {
        let mut node = self.node.to_node();
        node.info_mut().path = self.path.iter().map(|s| s.to_string()).collect();
        node
    }

    /// Owned, path-annotated copy of the visited link.
    pub fn annotated_link(&self) -> Option<Link> {
        match self.annotated() {
            Node::Link(link) => Some(link),
            Node::Folder(_) => None,
        }
    }
}

struct Frame<'a> {
    children: std::slice::Iter<'a, Node>,
    path: WalkPath<'a>,
}

/// Depth-first, pre-order iterator over a subtree
pub struct Walk<'a, F> {
    filter: F,
    start: Option<NodeRef<'a>>,
    stack: Vec<Frame<'a>>,
    yield_folders: bool,
}

impl<'a, F: Filter> Walk<'a, F> {
    fn new(start: NodeRef<'a>, filter: F) -> Self {
        Self {
            filter,
            start: Some(start),
            stack: Vec::new(),
            yield_folders: false,
        }
    }

    /// Also yield folders, each once, before their contents
    pub fn with_folders(mut self) -> Self {
        self.yield_folders = true;
        self
    }

    fn enter(&mut self, folder: &'a Folder, parent_path: &WalkPath<'a>) {
        let mut path = parent_path.clone();
        path.push(folder.info.name.as_str());
        self.stack.push(Frame {
            children: folder.children.iter(),
            path,
        });
    }
}

impl<'a, F: Filter> Iterator for Walk<'a, F> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(start) = self.start.take() {
            let root_path = WalkPath::new();
            match start {
                NodeRef::Link(_) => {
                    return Some(Visit {
                        node: start,
                        path: root_path,
                    })
                }
                NodeRef::Folder(folder) => {
                    self.enter(folder, &root_path);
                    if self.yield_folders {
                        return Some(Visit {
                            node: start,
                            path: root_path,
                        });
                    }
                }
            }
        }

        while let Some(frame) = self.stack.last_mut() {
            let Some(child) = frame.children.next() else {
                self.stack.pop();
                continue;
            };
            let view = child.view();
            if !self.filter.include(view) {
                continue;
            }
            let path = frame.path.clone();
            match view {
                NodeRef::Link(_) => return Some(Visit { node: view, path }),
                NodeRef::Folder(folder) => {
                    self.enter(folder, &path);
                    if self.yield_folders {
                        return Some(Visit { node: view, path });
                    }
                }
            }
        }
        None
    }
}

/// Walk a node and its descendants
pub fn walk<F: Filter>(node: &Node, filter: F) -> Walk<'_, F> {
    Walk::new(node.view(), filter)
}

/// Walk a folder (typically a root) and its descendants
pub fn walk_folder<F: Filter>(folder: &Folder, filter: F) -> Walk<'_, F> {
    Walk::new(NodeRef::Folder(folder), filter)
}

/// Walk the primary root, then the secondary root
///
/// This is the canonical enumeration order for every pipeline step.
pub fn walk_both_roots<F: Filter + Clone>(tree: &Tree, filter: F) -> Chain<Walk<'_, F>, Walk<'_, F>> {
    walk_folder(&tree.bookmark_bar, filter.clone()).chain(walk_folder(&tree.other, filter))
}

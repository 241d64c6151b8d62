//! Bookmark node model
//!
//! A node is either a [`Link`] (`"type": "url"`) or a [`Folder`]
//! (`"type": "folder"`). Nodes are decoded from the loosely-typed JSON records
//! of the `Bookmarks` file through a [`Record`] view and projected back with
//! [`Node::to_record`]; raw id and timestamp values are kept verbatim so the
//! projection is lossless for well-formed records.

use crate::timestamp::LongValue;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::debug;

/// Typed read access to a generic JSON record, with per-field defaults
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Record<'a> {
    /// View a JSON value as a record; `None` unless it is an object.
    pub fn new(value: &'a Value) -> Option<Self> {
        value.as_object().map(|map| Self { map })
    }

    /// Node kind from the `type` field.
    pub fn kind(&self) -> Option<NodeKind> {
        self.map.get("type").and_then(Value::as_str).and_then(NodeKind::parse)
    }

    /// String field, or `default` when missing or not a string.
    pub fn str_or(&self, field: &str, default: &'a str) -> &'a str {
        self.map.get(field).and_then(Value::as_str).unwrap_or(default)
    }

    /// Integer-like field (number or decimal string), kept raw.
    pub fn long(&self, field: &str) -> Option<LongValue> {
        self.map.get(field).and_then(LongValue::from_value)
    }

    /// Child records; empty when missing or null.
    pub fn children(&self) -> &'a [Value] {
        self.map
            .get("children")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Optional ancestor-folder annotation.
    pub fn path(&self) -> Vec<String> {
        self.map
            .get("path")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Type of bookmark node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A bookmarked URL
    Link,
    /// A folder of nodes
    Folder,
}

impl NodeKind {
    /// Parse the `type` field value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "url" => Some(Self::Link),
            "folder" => Some(Self::Folder),
            _ => None,
        }
    }

    /// Value written to the `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Link => "url",
            Self::Folder => "folder",
        }
    }
}

/// Key order of a decoded JSON object, replayed when it is written back
///
/// Chromium sorts keys alphabetically, other writers do not; emitting keys in
/// the order they were read keeps an unchanged node byte-identical. Layout
/// only: equality ignores it.
#[derive(Debug, Clone, Default)]
pub struct KeyOrder(Vec<String>);

impl KeyOrder {
    /// Record the key order of `map`.
    pub fn of(map: &Map<String, Value>) -> Self {
        Self(map.keys().cloned().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reorder `map`: recorded keys first, in recorded order, then any
    /// other keys in their current order.
    pub fn arrange(&self, map: Map<String, Value>) -> Map<String, Value> {
        if self.0.is_empty() {
            return map;
        }
        let rank = |key: &str| self.0.iter().position(|k| k == key).unwrap_or(self.0.len());
        let mut entries: Vec<(String, Value)> = map.into_iter().collect();
        entries.sort_by_key(|(key, _)| rank(key));
        entries.into_iter().collect()
    }
}

impl PartialEq for KeyOrder {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

/// Fields shared by links and folders
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeInfo {
    /// Identifier, unique within a tree once the pipeline has run
    pub id: Option<LongValue>,
    /// Display name
    pub name: String,
    /// Creation time (long-date)
    pub date_added: Option<LongValue>,
    /// Last edit time (long-date)
    pub date_modified: Option<LongValue>,
    /// Ancestor folder names; diagnostic only, never serialized
    pub path: Vec<String>,
    /// Source key order; empty for synthesized nodes
    pub key_order: KeyOrder,
}

impl NodeInfo {
    fn from_record(record: &Record<'_>) -> Self {
        Self {
            id: record.long("id"),
            name: record.str_or("name", "").to_string(),
            date_added: record.long("date_added"),
            date_modified: record.long("date_modified"),
            path: record.path(),
            key_order: KeyOrder::of(record.map),
        }
    }

    /// Fields for a node synthesized by the pipeline.
    pub fn synthesized(id: i64, name: impl Into<String>, date_added: i64, date_modified: i64) -> Self {
        Self {
            id: Some(LongValue::from_i64(id)),
            name: name.into(),
            date_added: Some(LongValue::from_i64(date_added)),
            date_modified: Some(LongValue::from_i64(date_modified)),
            path: Vec::new(),
            key_order: KeyOrder::default(),
        }
    }

    /// Numeric id, if the raw id parses.
    pub fn id_value(&self) -> Option<i64> {
        self.id.as_ref().and_then(LongValue::as_i64)
    }

    /// Decoded creation time.
    pub fn added_at(&self) -> Option<DateTime<Utc>> {
        self.date_added.as_ref().and_then(LongValue::decode)
    }

    /// Decoded modification time.
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        self.date_modified.as_ref().and_then(LongValue::decode)
    }

    /// Raw creation time as an integer, for ordering.
    pub fn added_value(&self) -> Option<i64> {
        self.date_added.as_ref().and_then(LongValue::as_i64)
    }

    /// Raw modification time as an integer, for ordering.
    pub fn modified_value(&self) -> Option<i64> {
        self.date_modified.as_ref().and_then(LongValue::as_i64)
    }

    fn write_head(&self, kind: NodeKind, out: &mut Map<String, Value>) {
        out.insert("type".to_string(), Value::from(kind.as_str()));
        if let Some(id) = &self.id {
            out.insert("id".to_string(), id.to_value());
        }
        out.insert("name".to_string(), Value::from(self.name.as_str()));
    }

    fn write_dates(&self, out: &mut Map<String, Value>) {
        if let Some(added) = &self.date_added {
            out.insert("date_added".to_string(), added.to_value());
        }
        if let Some(modified) = &self.date_modified {
            out.insert("date_modified".to_string(), modified.to_value());
        }
    }
}

/// A bookmarked URL
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub info: NodeInfo,
    /// Target URL; any scheme, including `javascript:` and `data:`
    pub url: String,
}

impl Link {
    /// Create a link for a node synthesized by the pipeline
    pub fn new(id: i64, name: impl Into<String>, url: impl Into<String>, date: i64) -> Self {
        Self {
            info: NodeInfo::synthesized(id, name, date, date),
            url: url.into(),
        }
    }

    /// Multi-line console rendering used by `pbm print`
    pub fn to_console_string(&self) -> String {
        let mut lines = Vec::new();
        if let Some(id) = &self.info.id {
            lines.push(format!("# {:<5}: {}", "id", id));
        }
        if let Some(added) = self.info.added_at() {
            lines.push(format!("# {:<5}: {}", "ctime", added.to_rfc3339()));
        }
        if let Some(modified) = self.info.modified_at() {
            lines.push(format!("# {:<5}: {}", "mtime", modified.to_rfc3339()));
        }
        if !self.info.path.is_empty() {
            lines.push(format!("# {:<5}: {}", "path", self.info.path.join("/")));
        }
        if !self.info.name.is_empty() {
            lines.push(format!("# {:<5}: {}", "name", self.info.name));
        }
        lines.push(self.url.clone());
        lines.join("\n")
    }

    fn to_record(&self) -> Value {
        let mut out = Map::new();
        self.info.write_head(NodeKind::Link, &mut out);
        out.insert("url".to_string(), Value::from(self.url.as_str()));
        self.info.write_dates(&mut out);
        Value::Object(self.info.key_order.arrange(out))
    }
}

/// An ordered folder of nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Folder {
    pub info: NodeInfo,
    pub children: Vec<Node>,
}

impl Folder {
    /// Create an empty folder for a node synthesized by the pipeline
    pub fn new(id: i64, name: impl Into<String>, date: i64) -> Self {
        Self {
            info: NodeInfo::synthesized(id, name, date, date),
            children: Vec::new(),
        }
    }

    /// Replace the children, builder-style
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Decode a folder record; malformed children are skipped
    pub fn from_record(value: &Value) -> Option<Self> {
        match Node::from_record(value)? {
            Node::Folder(folder) => Some(folder),
            Node::Link(_) => None,
        }
    }

    /// Project back to a JSON record
    pub fn to_record(&self) -> Value {
        let mut out = Map::new();
        self.info.write_head(NodeKind::Folder, &mut out);
        self.info.write_dates(&mut out);
        out.insert(
            "children".to_string(),
            Value::Array(self.children.iter().map(Node::to_record).collect()),
        );
        Value::Object(self.info.key_order.arrange(out))
    }

    /// Direct child folders with the given name.
    pub fn subfolders_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Folder> + 'a {
        self.children.iter().filter_map(move |child| match child {
            Node::Folder(folder) if folder.info.name == name => Some(folder),
            _ => None,
        })
    }
}

/// A bookmark tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Link(Link),
    Folder(Folder),
}

impl Node {
    /// Decode a generic record
    ///
    /// Returns `None` for null, non-object, or untyped records. Missing
    /// optional fields default to an empty string or an absent timestamp.
    pub fn from_record(value: &Value) -> Option<Self> {
        let Some(record) = Record::new(value) else {
            debug!("Skipping non-object bookmark entry: {}", value);
            return None;
        };
        let Some(kind) = record.kind() else {
            debug!("Skipping bookmark entry without a known type: {}", value);
            return None;
        };

        let info = NodeInfo::from_record(&record);
        let node = match kind {
            NodeKind::Link => Node::Link(Link {
                info,
                url: record.str_or("url", "").to_string(),
            }),
            NodeKind::Folder => Node::Folder(Folder {
                info,
                children: record.children().iter().filter_map(Node::from_record).collect(),
            }),
        };
        Some(node)
    }

    /// Project back to a JSON record, dropping derived fields
    pub fn to_record(&self) -> Value {
        match self {
            Node::Link(link) => link.to_record(),
            Node::Folder(folder) => folder.to_record(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Link(_) => NodeKind::Link,
            Node::Folder(_) => NodeKind::Folder,
        }
    }

    pub fn info(&self) -> &NodeInfo {
        match self {
            Node::Link(link) => &link.info,
            Node::Folder(folder) => &folder.info,
        }
    }

    pub fn info_mut(&mut self) -> &mut NodeInfo {
        match self {
            Node::Link(link) => &mut link.info,
            Node::Folder(folder) => &mut folder.info,
        }
    }

    pub fn name(&self) -> &str {
        &self.info().name
    }

    pub fn as_link(&self) -> Option<&Link> {
        match self {
            Node::Link(link) => Some(link),
            Node::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            Node::Folder(folder) => Some(folder),
            Node::Link(_) => None,
        }
    }

    pub fn as_folder_mut(&mut self) -> Option<&mut Folder> {
        match self {
            Node::Folder(folder) => Some(folder),
            Node::Link(_) => None,
        }
    }

    /// Borrowed view, the form filters and the walker work with
    pub fn view(&self) -> NodeRef<'_> {
        match self {
            Node::Link(link) => NodeRef::Link(link),
            Node::Folder(folder) => NodeRef::Folder(folder),
        }
    }
}

impl From<Link> for Node {
    fn from(link: Link) -> Self {
        Node::Link(link)
    }
}

impl From<Folder> for Node {
    fn from(folder: Folder) -> Self {
        Node::Folder(folder)
    }
}

/// Borrowed view of a node
///
/// Tree roots are stored as bare [`Folder`]s, so traversal works on this view
/// rather than on `&Node`.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Link(&'a Link),
    Folder(&'a Folder),
}

impl<'a> NodeRef<'a> {
    pub fn info(&self) -> &'a NodeInfo {
        match *self {
            NodeRef::Link(link) => &link.info,
            NodeRef::Folder(folder) => &folder.info,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Link(_) => NodeKind::Link,
            NodeRef::Folder(_) => NodeKind::Folder,
        }
    }

    pub fn name(&self) -> &'a str {
        &self.info().name
    }

    pub fn as_link(&self) -> Option<&'a Link> {
        match *self {
            NodeRef::Link(link) => Some(link),
            NodeRef::Folder(_) => None,
        }
    }

    /// Owned copy of the viewed node.
    pub fn to_node(&self) -> Node {
        match *self {
            NodeRef::Link(link) => Node::Link(link.clone()),
            NodeRef::Folder(folder) => Node::Folder(folder.clone()),
        }
    }
}

impl<'a> From<&'a Folder> for NodeRef<'a> {
    fn from(folder: &'a Folder) -> Self {
        NodeRef::Folder(folder)
    }
}

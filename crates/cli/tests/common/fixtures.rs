//! Bookmarks files for CLI tests

use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 2014-01-02 12:00 UTC
pub const JAN_2_2014: i64 = 13_033_137_600_000_000;
/// 2015-03-04 12:00 UTC
pub const MAR_4_2015: i64 = 13_069_944_000_000_000;

/// A temporary directory holding one `Bookmarks` file
pub struct BookmarksFixture {
    dir: TempDir,
    path: PathBuf,
}

impl BookmarksFixture {
    /// Write `document` to `<tmp>/Bookmarks`
    pub fn new(document: &Value) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("Bookmarks");
        let text = serde_json::to_string_pretty(document).expect("Failed to serialize fixture");
        std::fs::write(&path, text).expect("Failed to write fixture");
        Self { dir, path }
    }

    /// Dated links in both roots, one duplicate, a bookmarklet and a quicklinks folder
    pub fn sample() -> Self {
        Self::new(&sample_document())
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn path_str(&self) -> String {
        self.path.display().to_string()
    }

    /// Raw file content
    pub fn raw(&self) -> String {
        std::fs::read_to_string(&self.path).expect("Failed to read fixture")
    }

    /// Decoded file content
    pub fn document(&self) -> Value {
        serde_json::from_str(&self.raw()).expect("Fixture is not valid JSON")
    }

    /// Backup files written next to the fixture
    pub fn backups(&self) -> Vec<PathBuf> {
        let mut backups: Vec<PathBuf> = std::fs::read_dir(self.dir.path())
            .expect("Failed to list fixture dir")
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().map_or(false, |ext| ext == "bkp"))
            .collect();
        backups.sort();
        backups
    }
}

pub fn url(id: &str, name: &str, url: &str, date: i64) -> Value {
    json!({
        "type": "url",
        "id": id,
        "name": name,
        "url": url,
        "date_added": date.to_string()
    })
}

pub fn folder(id: &str, name: &str, children: Vec<Value>) -> Value {
    json!({
        "type": "folder",
        "id": id,
        "name": name,
        "children": children
    })
}

pub fn sample_document() -> Value {
    json!({
        "checksum": "0123456789abcdef",
        "roots": {
            "bookmark_bar": folder("1", "Bookmarks bar", vec![
                folder("3", "news", vec![
                    url("4", "old news", "https://news.example/old", JAN_2_2014),
                    url("5", "new news", "https://news.example/new", MAR_4_2015),
                ]),
                url("6", "tool", "javascript:alert(1)", JAN_2_2014),
                folder("9", "quicklinks", vec![
                    url("10", "daily", "https://daily.example/", JAN_2_2014),
                ]),
            ]),
            "other": folder("2", "Other bookmarks", vec![
                url("7", "old news", "https://news.example/old", JAN_2_2014),
                url("8", "docs", "https://docs.example/", JAN_2_2014),
            ])
        },
        "version": 1
    })
}

/// Names of the top-level folders and links of the primary root
pub fn top_level_names(document: &Value) -> Vec<String> {
    document["roots"]["bookmark_bar"]["children"]
        .as_array()
        .map(|children| {
            children
                .iter()
                .filter_map(|c| c["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// The top-level primary-root entry called `name`
pub fn top_level<'a>(document: &'a Value, name: &str) -> Option<&'a Value> {
    document["roots"]["bookmark_bar"]["children"]
        .as_array()?
        .iter()
        .find(|c| c["name"] == name)
}

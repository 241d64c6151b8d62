//! Locating the `Bookmarks` files of installed browser profiles
//!
//! ```text
//! <user data dir>/
//!   Default/Bookmarks
//!   Default/Bookmarks.bak        backups, listed on request
//!   Profile 1/Bookmarks
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Environment variable replacing the platform user data directories
/// (a path list, `:`-separated on Unix)
pub const PROFILE_DIRS_ENV: &str = "PBM_PROFILE_DIRS";

const BOOKMARKS_FILE: &str = "Bookmarks";

/// User data directories to search
///
/// `PBM_PROFILE_DIRS` wins when set; otherwise the Chrome and Chromium
/// locations for this platform.
pub fn user_data_dirs() -> Vec<PathBuf> {
    match std::env::var_os(PROFILE_DIRS_ENV) {
        Some(value) => dirs_from_env(&value),
        None => platform_dirs(),
    }
}

fn dirs_from_env(value: &OsString) -> Vec<PathBuf> {
    std::env::split_paths(value)
        .filter(|path| !path.as_os_str().is_empty())
        .collect()
}

#[cfg(target_os = "linux")]
fn platform_dirs() -> Vec<PathBuf> {
    dirs::config_dir()
        .map(|config| {
            ["google-chrome", "google-chrome-unstable", "chromium"]
                .iter()
                .map(|name| config.join(name))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(target_os = "macos")]
fn platform_dirs() -> Vec<PathBuf> {
    dirs::data_dir()
        .map(|support| vec![support.join("Google").join("Chrome"), support.join("Chromium")])
        .unwrap_or_default()
}

#[cfg(target_os = "windows")]
fn platform_dirs() -> Vec<PathBuf> {
    dirs::data_local_dir()
        .map(|local| {
            vec![
                local.join("Google").join("Chrome").join("User Data"),
                local.join("Chromium").join("User Data"),
            ]
        })
        .unwrap_or_default()
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn platform_dirs() -> Vec<PathBuf> {
    Vec::new()
}

/// `Bookmarks` files one profile level below each of `roots`
///
/// With `backups`, every file whose name starts with `Bookmarks` is listed.
/// Missing or unreadable directories are skipped. Results are grouped by
/// root and sorted by profile name within each root.
pub fn list_profile_bookmarks(roots: &[PathBuf], backups: bool) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for root in roots {
        debug!("Listing profile bookmarks in {}", root.display());
        for entry in WalkDir::new(root)
            .min_depth(2)
            .max_depth(2)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
        {
            if entry.file_type().is_file() && is_bookmarks_file(entry.path(), backups) {
                found.push(entry.into_path());
            }
        }
    }
    found
}

fn is_bookmarks_file(path: &Path, backups: bool) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if backups {
        name.starts_with(BOOKMARKS_FILE)
    } else {
        name == BOOKMARKS_FILE
    }
}

//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde_json::Value;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Backup path for `path` taken at `now`: `<path>.<YYYY-MM-DDTHH:MM:SS>.bkp`
pub fn backup_path(path: &Path, now: DateTime<Local>) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".{}.bkp", now.format("%Y-%m-%dT%H:%M:%S")));
    PathBuf::from(name)
}

/// Copy `path` next to itself under a timestamped name
pub fn backup_file(path: &Path) -> Result<PathBuf> {
    let backup = backup_path(path, Local::now());
    std::fs::copy(path, &backup)
        .with_context(|| format!("Failed to back up {} to {}", path.display(), backup.display()))?;
    debug!(from = %path.display(), to = %backup.display(), "backup written");
    Ok(backup)
}

/// Read and decode a `Bookmarks` JSON file
pub fn read_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read bookmarks file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Bookmarks file is not valid JSON: {}", path.display()))
}

/// Replace `path` with `contents` without leaving a partial file behind
///
/// Writes a temporary file in the destination directory and renames it over
/// the target.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(&dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    temp.write_all(contents.as_bytes())
        .context("Failed to write temporary file")?;
    temp.as_file().sync_all().context("Failed to sync temporary file")?;
    temp.persist(path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

/// Ask a yes/no question on stderr, reading the answer from `input`
///
/// Anything other than `y`/`yes` (including end of input) is a no.
pub fn confirm_with(prompt: &str, input: &mut impl BufRead) -> Result<bool> {
    eprint!("{} [y/N] ", prompt);
    std::io::stderr().flush().ok();

    let mut answer = String::new();
    input.read_line(&mut answer).context("Failed to read confirmation")?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// [`confirm_with`] on the process stdin
pub fn confirm(prompt: &str) -> Result<bool> {
    confirm_with(prompt, &mut std::io::stdin().lock())
}

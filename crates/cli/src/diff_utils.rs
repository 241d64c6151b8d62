//! Line-by-line diffs of a bookmarks document before and after a run

use owo_colors::OwoColorize;
use similar::{ChangeTag, TextDiff};

/// Summary counts of a diff
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub inserted: usize,
    pub deleted: usize,
}

impl DiffStats {
    pub fn is_empty(&self) -> bool {
        self.inserted == 0 && self.deleted == 0
    }
}

/// Count inserted and deleted lines between two texts
pub fn diff_stats(old_text: &str, new_text: &str) -> DiffStats {
    let diff = TextDiff::from_lines(old_text, new_text);
    let mut stats = DiffStats::default();
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => stats.inserted += 1,
            ChangeTag::Delete => stats.deleted += 1,
            ChangeTag::Equal => {}
        }
    }
    stats
}

/// Generate a unified diff with colored output
///
/// `label` names the file in the `---`/`+++` header.
pub fn generate_unified_diff(old_text: &str, new_text: &str, label: &str, context_lines: usize) -> String {
    let diff = TextDiff::from_lines(old_text, new_text);

    let mut output = String::new();
    output.push_str(&format!("{}\n", format!("--- {} (before)", label).red()));
    output.push_str(&format!("{}\n", format!("+++ {} (after)", label).green()));

    for hunk in diff.unified_diff().context_radius(context_lines).iter_hunks() {
        // e.g. @@ -12,7 +12,8 @@
        let header = format!("{}", hunk.header());
        output.push_str(&format!("{}\n", header.cyan()));

        for change in hunk.iter_changes() {
            let line: &str = change.value();

            match change.tag() {
                ChangeTag::Delete => output.push_str(&format!("{}", format!("-{}", line).red())),
                ChangeTag::Insert => output.push_str(&format!("{}", format!("+{}", line).green())),
                ChangeTag::Equal => output.push_str(&format!("{}", format!(" {}", line).dimmed())),
            }

            if !line.ends_with('\n') {
                output.push('\n');
            }
        }
    }

    output
}

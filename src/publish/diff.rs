//! Committed diff collection and pull request body rendering

use crate::error::Result;
use crate::platform::RepositoryClient;
use crate::types::FileDiff;
use std::fmt::Write;

/// Text rendered for an empty diff
pub const NO_CHANGES: &str = "No changes detected.";

/// Appended to a summary whose file lists were cut short by the host
pub const TRUNCATED_NOTE: &str =
    "_GitHub listed only part of the changed files; see the Files changed tab for the rest._";

/// Compare `head` against `base` and partition the changed files
pub async fn collect_diff(client: &dyn RepositoryClient, base: &str, head: &str) -> Result<FileDiff> {
    let comparison = client.compare_refs(base, head).await?;
    Ok(FileDiff::from_comparison(comparison))
}

/// Render a Markdown summary with one section per non-empty category
pub fn render_summary(diff: &FileDiff) -> String {
    if diff.is_empty() {
        return NO_CHANGES.to_string();
    }

    let sections = [
        ("Added", &diff.added_files),
        ("Modified", &diff.modified_files),
        ("Removed", &diff.removed_files),
    ];

    let mut out = String::new();
    for (title, files) in sections.iter().filter(|(_, files)| !files.is_empty()) {
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "### {title}");
        for file in *files {
            let _ = writeln!(out, "- `{file}`");
        }
    }
    if diff.truncated {
        let _ = writeln!(out, "\n{TRUNCATED_NOTE}");
    }
    out.truncate(out.trim_end().len());
    out
}

/// Pull request body: the user's text, optionally followed by the summary
pub fn compose_body(body: &str, diff: &FileDiff, include_summary: bool) -> String {
    if include_summary {
        format!("{body}\n{}", render_summary(diff))
    } else {
        body.to_string()
    }
}

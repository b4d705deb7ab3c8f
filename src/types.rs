//! Core types for icon-sync

use serde::{Deserialize, Serialize};
use std::fmt;

/// File mode for regular (non-executable) files in a git tree
pub const BLOB_MODE: &str = "100644";

/// Tree entry type for file content
pub const BLOB_TYPE: &str = "blob";

/// An SVG document exported from the design tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SvgDocument {
    /// Stable node identifier from the design tool
    pub id: String,
    /// Proposed file stem
    pub name: String,
    /// Serialized SVG markup
    pub svg_text: String,
}

/// A tree entry submitted to the remote tree-merge operation
///
/// `sha: None` is a tombstone: the path is removed from the base tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobRef {
    /// Repository path (`<folder>/<name>.svg`)
    pub path: String,
    /// Git file mode, always `100644`
    pub mode: String,
    /// Git object type, always `blob`
    #[serde(rename = "type")]
    pub kind: String,
    /// Blob SHA, or `None` to delete the path
    pub sha: Option<String>,
}

impl BlobRef {
    /// Entry pointing `path` at an uploaded blob
    pub fn blob(path: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: BLOB_MODE.to_string(),
            kind: BLOB_TYPE.to_string(),
            sha: Some(sha.into()),
        }
    }

    /// Entry removing `path`
    pub fn tombstone(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: BLOB_MODE.to_string(),
            kind: BLOB_TYPE.to_string(),
            sha: None,
        }
    }

    /// Whether this entry removes its path
    pub const fn is_tombstone(&self) -> bool {
        self.sha.is_none()
    }
}

/// A file in a listed remote tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Full repository path
    pub path: String,
    /// Blob SHA
    pub sha: String,
}

/// Repository owner/name, plus the API host for GitHub Enterprise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoCoordinates {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

impl fmt::Display for RepoCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Status of a file in a ref comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// File exists only in head
    Added,
    /// File content differs between base and head
    Modified,
    /// File exists only in base
    Removed,
}

/// A file reported by a ref comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    /// Repository path
    pub path: String,
    /// How the file changed
    pub status: FileStatus,
}

/// Files reported by a ref comparison
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comparison {
    /// Changed files, in comparison order
    pub files: Vec<ChangedFile>,
    /// The host stopped listing files before the end of the comparison
    pub truncated: bool,
}

/// Files partitioned by change status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiff {
    /// Paths that are new in head
    pub added_files: Vec<String>,
    /// Paths whose content changed
    pub modified_files: Vec<String>,
    /// Paths deleted in head
    pub removed_files: Vec<String>,
    /// The lists above are incomplete
    #[serde(default)]
    pub truncated: bool,
}

impl FileDiff {
    /// Partition compared files by status, keeping comparison order
    pub fn from_changes(changes: impl IntoIterator<Item = ChangedFile>) -> Self {
        let mut diff = Self::default();
        for change in changes {
            match change.status {
                FileStatus::Added => diff.added_files.push(change.path),
                FileStatus::Modified => diff.modified_files.push(change.path),
                FileStatus::Removed => diff.removed_files.push(change.path),
            }
        }
        diff
    }

    /// Partition a comparison, carrying over its truncation flag
    pub fn from_comparison(comparison: Comparison) -> Self {
        Self {
            truncated: comparison.truncated,
            ..Self::from_changes(comparison.files)
        }
    }

    /// True when no file changed
    pub fn is_empty(&self) -> bool {
        self.added_files.is_empty() && self.modified_files.is_empty() && self.removed_files.is_empty()
    }

    /// Total number of changed files
    pub fn len(&self) -> usize {
        self.added_files.len() + self.modified_files.len() + self.removed_files.len()
    }
}

/// A pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
    /// PR title
    pub title: String,
}

/// Request to open a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrRequest {
    /// Head branch (the published branch)
    pub head: String,
    /// Base branch to merge into
    pub base: String,
    /// PR title
    pub title: String,
    /// PR description
    pub body: String,
}

//! Tree reconciliation
//!
//! Turns the previous contents of the icon folder and the freshly uploaded
//! blobs into one tree mutation:
//! - every uploaded blob is written (new path or content overwrite)
//! - every previously published icon that is no longer present gets a tombstone
//!
//! The mutation is applied by the remote as a merge over the base tree, so
//! paths outside the icon folder are never touched.

use crate::error::Result;
use crate::platform::RepositoryClient;
use crate::types::{BlobRef, TreeEntry};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Computed tree mutation plus its local classification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreePlan {
    /// Entries to submit: current blobs first, then tombstones
    pub entries: Vec<BlobRef>,
    /// Current paths that did not exist in the folder before
    pub created: Vec<String>,
    /// Current paths that already existed (content may or may not differ)
    pub overwritten: Vec<String>,
    /// Previous paths that are deleted
    pub removed: Vec<String>,
}

impl TreePlan {
    /// Number of tombstone entries
    pub fn tombstone_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_tombstone()).count()
    }
}

/// Whether `path` is an icon managed under `folder`
pub fn is_managed_path(folder: &str, path: &str) -> bool {
    path.strip_prefix(folder)
        .and_then(|rest| rest.strip_prefix('/'))
        .is_some_and(|rest| !rest.is_empty() && path.ends_with(".svg"))
}

/// Compute the tree mutation for `folder`
///
/// `previous` is the full base tree listing; only `.svg` files under the
/// folder are considered. When `current` repeats a path, the last entry wins.
pub fn plan_tree(folder: &str, previous: &[TreeEntry], current: &[BlobRef]) -> TreePlan {
    let mut entries: Vec<BlobRef> = Vec::with_capacity(current.len());
    let mut position: HashMap<&str, usize> = HashMap::new();
    for blob in current {
        if let Some(&idx) = position.get(blob.path.as_str()) {
            warn!(path = %blob.path, "duplicate icon path, keeping the last one");
            entries[idx] = blob.clone();
        } else {
            position.insert(blob.path.as_str(), entries.len());
            entries.push(blob.clone());
        }
    }

    let mut previous_seen: HashSet<&str> = HashSet::new();
    let previous_paths: Vec<&str> = previous
        .iter()
        .map(|e| e.path.as_str())
        .filter(|p| is_managed_path(folder, p))
        .filter(|p| previous_seen.insert(*p))
        .collect();

    let (overwritten, created): (Vec<String>, Vec<String>) = entries
        .iter()
        .map(|e| e.path.clone())
        .partition(|p| previous_seen.contains(p.as_str()));

    let removed: Vec<String> = previous_paths
        .into_iter()
        .filter(|p| !position.contains_key(p))
        .map(ToString::to_string)
        .collect();

    entries.extend(removed.iter().map(BlobRef::tombstone));

    TreePlan {
        entries,
        created,
        overwritten,
        removed,
    }
}

/// List the base tree, plan the mutation, and create the new tree
///
/// Returns the plan and the SHA of the created tree.
pub async fn reconcile_tree(
    client: &dyn RepositoryClient,
    base_tree_sha: &str,
    folder: &str,
    current: &[BlobRef],
) -> Result<(TreePlan, String)> {
    let previous = client.list_tree(base_tree_sha).await?;
    let plan = plan_tree(folder, &previous, current);
    debug!(
        created = plan.created.len(),
        overwritten = plan.overwritten.len(),
        removed = plan.removed.len(),
        "planned tree mutation"
    );
    let tree_sha = client.create_tree(base_tree_sha, &plan.entries).await?;
    Ok((plan, tree_sha))
}

//! Commit creation and ref update

use crate::error::Result;
use crate::platform::RepositoryClient;
use tracing::info;

/// Default commit message for published icons
pub const DEFAULT_COMMIT_MESSAGE: &str = "Update icons from Figma";

/// Commit `tree_sha` on top of the base commit and move `branch` to it
///
/// The branch was created at the base commit by this run and nothing else
/// writes to it, so the ref is force-updated.
pub async fn commit_and_advance(
    client: &dyn RepositoryClient,
    message: &str,
    tree_sha: &str,
    base_commit_sha: &str,
    branch: &str,
) -> Result<String> {
    let parents = [base_commit_sha.to_string()];
    let commit_sha = client.create_commit(message, tree_sha, &parents).await?;
    client.update_ref(branch, &commit_sha, true).await?;
    info!(branch, commit_sha = %commit_sha, "advanced publish branch");
    Ok(commit_sha)
}

//! Branch provisioning

use crate::error::Result;
use crate::platform::RepositoryClient;
use chrono::{DateTime, Utc};
use tracing::info;

/// Default prefix for publish branches
pub const DEFAULT_BRANCH_PREFIX: &str = "icon-update-";

/// Branch name for a run started at `now` (millisecond resolution)
pub fn branch_name(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{prefix}{}", now.timestamp_millis())
}

/// Create a fresh branch at the captured base commit
///
/// Two runs in the same millisecond collide; the second one fails with
/// `RefAlreadyExists` and is not retried.
pub async fn provision_branch(
    client: &dyn RepositoryClient,
    prefix: &str,
    base_commit_sha: &str,
) -> Result<String> {
    let name = branch_name(prefix, Utc::now());
    client.create_branch(&name, base_commit_sha).await?;
    info!(branch = %name, base_commit_sha, "created publish branch");
    Ok(name)
}

//! Repository client for the remote VCS host
//!
//! Exposes the git-data operations the publish pipeline needs as a trait, so
//! the pipeline can run against GitHub or an in-memory test double.

mod detection;
mod factory;
mod github;

pub use detection::parse_repo_url;
pub use factory::create_repository_client;
pub use github::{expand_compare_entry, GitHubService, COMPARE_FILE_LIMIT};

use crate::error::Result;
use crate::types::{BlobRef, Comparison, CreatePrRequest, PullRequest, RepoCoordinates, TreeEntry};
use async_trait::async_trait;

/// Typed operations against one remote repository
///
/// A client is bound to a single repository and constructed per publish run.
/// Read operations are idempotent; write operations are not.
#[async_trait]
pub trait RepositoryClient: Send + Sync {
    /// Name of the repository's default branch
    async fn get_default_branch(&self) -> Result<String>;

    /// Commit SHA a branch currently points at
    async fn get_ref_commit_sha(&self, branch: &str) -> Result<String>;

    /// Root tree SHA of a commit
    async fn get_commit_tree_sha(&self, commit_sha: &str) -> Result<String>;

    /// Create `refs/heads/<name>` at a commit
    ///
    /// Fails with [`Error::RefAlreadyExists`](crate::error::Error::RefAlreadyExists)
    /// when the name is taken.
    async fn create_branch(&self, name: &str, from_commit_sha: &str) -> Result<()>;

    /// Store UTF-8 text as a blob and return its SHA
    async fn create_blob(&self, content: &str) -> Result<String>;

    /// Recursively list the files of a tree
    async fn list_tree(&self, tree_sha: &str) -> Result<Vec<TreeEntry>>;

    /// Merge `entries` over a base tree and return the new tree SHA
    async fn create_tree(&self, base_tree_sha: &str, entries: &[BlobRef]) -> Result<String>;

    /// Create a commit and return its SHA
    async fn create_commit(
        &self,
        message: &str,
        tree_sha: &str,
        parent_shas: &[String],
    ) -> Result<String>;

    /// Point a branch at a commit
    async fn update_ref(&self, branch: &str, commit_sha: &str, force: bool) -> Result<()>;

    /// Files that differ between two refs
    ///
    /// A renamed file is reported as a removal of its old path plus an
    /// addition of its new one.
    async fn compare_refs(&self, base: &str, head: &str) -> Result<Comparison>;

    /// Open a pull request
    async fn create_pull_request(&self, request: &CreatePrRequest) -> Result<PullRequest>;

    /// The repository this client is bound to
    fn coordinates(&self) -> &RepoCoordinates;
}

//! Repository client factory
//!
//! Builds a fresh client per publish run from a repository URL and token.

use crate::error::Result;
use crate::platform::{parse_repo_url, GitHubService, RepositoryClient};
use std::sync::Arc;

/// Parse the repository URL and construct a client bound to that repository
pub fn create_repository_client(repo_url: &str, token: &str) -> Result<Arc<dyn RepositoryClient>> {
    let coordinates = parse_repo_url(repo_url)?;
    Ok(Arc::new(GitHubService::new(token, coordinates)?))
}

//! Authentication for GitHub
//!
//! Supports explicit tokens, environment variables, and the `gh` CLI.

mod github;

pub use github::{get_github_auth, test_github_auth, GitHubAuthConfig};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token passed on the command line or in the config file
    Explicit,
    /// Token from CLI tool (gh)
    Cli,
    /// Token from environment variable
    EnvVar,
}

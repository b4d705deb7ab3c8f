//! GitHub authentication

use crate::auth::AuthSource;
use crate::error::{Error, Result};
use crate::types::RepoCoordinates;
use std::env;
use tokio::process::Command;
use tracing::debug;

/// GitHub authentication configuration
#[derive(Clone)]
pub struct GitHubAuthConfig {
    /// Authentication token
    pub token: String,
    /// Where the token was obtained from
    pub source: AuthSource,
}

impl std::fmt::Debug for GitHubAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuthConfig")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Get GitHub authentication
///
/// Priority:
/// 1. Explicit token (`--token` or `ICON_SYNC_TOKEN`)
/// 2. `GITHUB_TOKEN` environment variable
/// 3. `GH_TOKEN` environment variable
/// 4. gh CLI (`gh auth token`)
pub async fn get_github_auth(explicit: Option<&str>) -> Result<GitHubAuthConfig> {
    if let Some(config) = token_from(explicit, |var| env::var(var).ok()) {
        return Ok(config);
    }

    if let Some(token) = get_gh_cli_token().await {
        debug!("using token from gh CLI");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::Cli,
        });
    }

    Err(Error::Auth(
        "No GitHub authentication found. Pass --token, set GITHUB_TOKEN, or run `gh auth login`"
            .to_string(),
    ))
}

/// Explicit or environment token, without consulting the gh CLI
fn token_from(
    explicit: Option<&str>,
    env_lookup: impl Fn(&str) -> Option<String>,
) -> Option<GitHubAuthConfig> {
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Some(GitHubAuthConfig {
            token: token.to_string(),
            source: AuthSource::Explicit,
        });
    }

    ["GITHUB_TOKEN", "GH_TOKEN"].into_iter().find_map(|var| {
        let token = env_lookup(var)?;
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        debug!(var, "using token from environment");
        Some(GitHubAuthConfig {
            token: token.to_string(),
            source: AuthSource::EnvVar,
        })
    })
}

async fn get_gh_cli_token() -> Option<String> {
    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Test GitHub authentication, returning the authenticated login
pub async fn test_github_auth(
    config: &GitHubAuthConfig,
    coordinates: Option<&RepoCoordinates>,
) -> Result<String> {
    let mut builder = octocrab::Octocrab::builder().personal_token(config.token.clone());

    if let Some(host) = coordinates.and_then(|c| c.host.as_ref()) {
        builder = builder
            .base_uri(format!("https://{host}/api/v3"))
            .map_err(|e| Error::GitHubApi(e.to_string()))?;
    }

    let octocrab = builder
        .build()
        .map_err(|e| Error::GitHubApi(e.to_string()))?;

    let user = octocrab
        .current()
        .user()
        .await
        .map_err(|e| Error::Auth(format!("Invalid token: {e}")))?;

    Ok(user.login)
}

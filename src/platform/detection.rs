//! Repository coordinates from URLs

use crate::error::{Error, Result};
use crate::types::RepoCoordinates;
use regex::Regex;
use std::sync::OnceLock;

const GITHUB_HOST: &str = "github.com";

fn ssh_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:ssh://)?git@([^:/]+)[:/]([^/]+)/([^/]+?)(?:\.git)?/?$")
            .expect("hardcoded SSH pattern is valid")
    })
}

fn shorthand_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?$")
            .expect("hardcoded shorthand pattern is valid")
    })
}

/// Parse owner/repo from a repository URL
///
/// Accepts:
/// - `https://github.com/owner/repo` (trailing `.git` and extra path segments ignored)
/// - `git@github.com:owner/repo.git`
/// - `owner/repo`
///
/// Hosts other than github.com are treated as GitHub Enterprise instances.
pub fn parse_repo_url(input: &str) -> Result<RepoCoordinates> {
    let input = input.trim();
    let invalid = || Error::InvalidRepoUrl(input.to_string());

    if let Some(caps) = ssh_pattern().captures(input) {
        return Ok(coordinates(&caps[1], &caps[2], &caps[3]));
    }

    if input.starts_with("http://") || input.starts_with("https://") {
        let url = url::Url::parse(input).map_err(|_| invalid())?;
        let host = url.host_str().ok_or_else(invalid)?;
        let mut segments = url
            .path_segments()
            .ok_or_else(invalid)?
            .filter(|s| !s.is_empty());
        let owner = segments.next().ok_or_else(invalid)?;
        let repo = segments.next().ok_or_else(invalid)?;
        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        if repo.is_empty() {
            return Err(invalid());
        }
        return Ok(coordinates(host, owner, repo));
    }

    if let Some(caps) = shorthand_pattern().captures(input) {
        return Ok(coordinates(GITHUB_HOST, &caps[1], &caps[2]));
    }

    Err(invalid())
}

fn coordinates(host: &str, owner: &str, repo: &str) -> RepoCoordinates {
    let host = host.to_ascii_lowercase();
    RepoCoordinates {
        owner: owner.to_string(),
        repo: repo.to_string(),
        host: if host == GITHUB_HOST || host == "www.github.com" {
            None
        } else {
            Some(host)
        },
    }
}

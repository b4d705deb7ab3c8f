//! Configuration
//!
//! Settings are resolved in order of precedence:
//! 1. Command-line flags
//! 2. `ICON_SYNC_*` environment variables
//! 3. Config file: `$ICON_SYNC_CONFIG`, else `<config dir>/icon-sync/config.toml`
//! 4. Built-in defaults
//!
//! # Example
//!
//! ```toml
//! repo_url = "https://github.com/acme/design-system"
//! folder = "packages/icons/svg"
//! pr_title = "Update icons from Figma"
//! include_summary = true
//! ```

use crate::error::{Error, Result};
use crate::publish::{
    PublishRequest, DEFAULT_BRANCH_PREFIX, DEFAULT_COMMIT_MESSAGE, DEFAULT_PR_BODY,
    DEFAULT_PR_TITLE,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "ICON_SYNC_CONFIG";

/// Contents of the config file; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Repository URL
    pub repo_url: Option<String>,
    /// Target folder inside the repository
    pub folder: Option<String>,
    /// Pull request title
    pub pr_title: Option<String>,
    /// Pull request description
    pub pr_body: Option<String>,
    /// Append the changed-files summary to the description
    pub include_summary: Option<bool>,
    /// Commit message
    pub commit_message: Option<String>,
    /// Branch name prefix
    pub branch_prefix: Option<String>,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--repo`
    pub repo_url: Option<String>,
    /// `--folder`
    pub folder: Option<String>,
    /// `--title`
    pub pr_title: Option<String>,
    /// `--body`
    pub pr_body: Option<String>,
    /// `--no-summary`
    pub no_summary: bool,
}

/// Fully resolved settings for a publish run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Repository URL
    pub repo_url: String,
    /// Normalised target folder
    pub folder: String,
    /// Pull request title
    pub pr_title: String,
    /// Pull request description
    pub pr_body: String,
    /// Append the changed-files summary
    pub include_summary: bool,
    /// Commit message
    pub commit_message: String,
    /// Branch name prefix
    pub branch_prefix: String,
}

/// Default config file location
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("icon-sync").join("config.toml"))
}

/// Load the config file; a missing file yields defaults
pub fn load_file_config(path: Option<&Path>) -> Result<FileConfig> {
    let Some(path) = path else {
        return Ok(FileConfig::default());
    };
    match std::fs::read_to_string(path) {
        Ok(raw) => {
            debug!(path = %path.display(), "loaded config file");
            parse_file_config(&raw)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
        Err(e) => Err(Error::Config(format!("cannot read {}: {e}", path.display()))),
    }
}

/// Parse config file contents
pub fn parse_file_config(raw: &str) -> Result<FileConfig> {
    Ok(toml::from_str(raw)?)
}

/// Normalise a folder path: trim whitespace and surrounding slashes
pub fn normalize_folder(folder: &str) -> Result<String> {
    let trimmed = folder.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Err(Error::Config("folder path must not be empty".to_string()));
    }
    if trimmed
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(Error::Config(format!("invalid folder path: {folder}")));
    }
    Ok(trimmed.to_string())
}

impl Settings {
    /// Resolve settings from flags, the process environment, and the file
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self> {
        Self::resolve_from(file, overrides, |key| env::var(key).ok())
    }

    /// Resolve settings with an explicit environment lookup
    pub fn resolve_from(
        file: FileConfig,
        overrides: Overrides,
        env_lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let pick = |flag: Option<String>, var: &str, file: Option<String>| {
            flag.or_else(|| env_lookup(var)).or(file)
        };

        let repo_url = pick(overrides.repo_url, "ICON_SYNC_REPO", file.repo_url).ok_or_else(
            || Error::Config("repository URL is required (--repo or repo_url)".to_string()),
        )?;
        let folder = pick(overrides.folder, "ICON_SYNC_FOLDER", file.folder)
            .ok_or_else(|| Error::Config("folder is required (--folder or folder)".to_string()))?;

        let include_summary = if overrides.no_summary {
            false
        } else {
            match env_lookup("ICON_SYNC_INCLUDE_SUMMARY") {
                Some(value) => parse_bool(&value)?,
                None => file.include_summary.unwrap_or(true),
            }
        };

        Ok(Self {
            repo_url,
            folder: normalize_folder(&folder)?,
            pr_title: pick(overrides.pr_title, "ICON_SYNC_PR_TITLE", file.pr_title)
                .unwrap_or_else(|| DEFAULT_PR_TITLE.to_string()),
            pr_body: pick(overrides.pr_body, "ICON_SYNC_PR_BODY", file.pr_body)
                .unwrap_or_else(|| DEFAULT_PR_BODY.to_string()),
            include_summary,
            commit_message: file
                .commit_message
                .unwrap_or_else(|| DEFAULT_COMMIT_MESSAGE.to_string()),
            branch_prefix: file
                .branch_prefix
                .unwrap_or_else(|| DEFAULT_BRANCH_PREFIX.to_string()),
        })
    }

    /// Build the publish request for these settings
    pub fn publish_request(&self, dry_run: bool) -> PublishRequest {
        PublishRequest {
            folder: self.folder.clone(),
            title: self.pr_title.clone(),
            body: self.pr_body.clone(),
            include_summary: self.include_summary,
            commit_message: self.commit_message.clone(),
            branch_prefix: self.branch_prefix.clone(),
            dry_run,
        }
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!("expected a boolean, got '{other}'"))),
    }
}

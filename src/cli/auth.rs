//! Auth command - test and explain authentication

use crate::cli::style::{check, Stylize};
use anstream::println;
use icon_sync::auth::{get_github_auth, test_github_auth};
use icon_sync::error::Result;
use icon_sync::platform::parse_repo_url;

/// Run the auth test command
pub async fn run_auth_test(token: Option<&str>, repo: Option<&str>) -> Result<()> {
    let coordinates = repo.map(parse_repo_url).transpose()?;
    let host = coordinates
        .as_ref()
        .and_then(|c| c.host.as_deref())
        .unwrap_or("github.com");

    println!("Testing GitHub authentication against {}...", host.accent());
    let config = get_github_auth(token).await?;
    let username = test_github_auth(&config, coordinates.as_ref()).await?;
    println!("{} Authenticated as: {}", check(), username.emphasis());
    println!("  Token source: {}", format!("{:?}", config.source).muted());
    Ok(())
}

/// Run the auth setup command (show instructions)
pub fn run_auth_setup() {
    println!("{}", "GitHub Authentication Setup".emphasis());
    println!("===========================");
    println!();
    println!("Option 1: GitHub CLI (recommended)");
    println!("  Install: https://cli.github.com/");
    println!("  Run: gh auth login");
    println!();
    println!("Option 2: Environment variable");
    println!("  Set GITHUB_TOKEN or GH_TOKEN");
    println!();
    println!("Option 3: Flag");
    println!("  Pass --token or set ICON_SYNC_TOKEN");
    println!();
    println!("The token needs the `repo` scope (or contents and pull requests");
    println!("write access for fine-grained tokens).");
    println!();
    println!("For GitHub Enterprise:");
    println!("  Use your instance URL in --repo, e.g. https://ghe.example.com/owner/repo");
}

//! Publish command - push the exported selection as a pull request

use crate::cli::progress::CliProgress;
use crate::cli::style::{check, Stylize};
use anstream::{eprintln, println};
use dialoguer::Confirm;
use icon_sync::auth::get_github_auth;
use icon_sync::config::{load_file_config, Overrides, Settings};
use icon_sync::error::{Error, Result};
use icon_sync::extract::{SceneFileSource, SelectionSource, StaticSource};
use icon_sync::platform::{create_repository_client, parse_repo_url};
use icon_sync::publish::{blob_path, preview, publish, PublishOutcome};
use std::io::IsTerminal;
use std::path::Path;
use tracing::debug;

/// Arguments for the publish command
pub struct PublishArgs<'a> {
    /// Scene export path
    pub scene: &'a Path,
    /// Config file path
    pub config_path: Option<&'a Path>,
    /// Command-line overrides
    pub overrides: Overrides,
    /// Explicit token
    pub token: Option<&'a str>,
    /// Stop before contacting GitHub
    pub dry_run: bool,
    /// Skip the confirmation prompt
    pub assume_yes: bool,
}

/// Run the publish command
pub async fn run_publish(args: PublishArgs<'_>) -> Result<()> {
    let file = load_file_config(args.config_path)?;
    let settings = Settings::resolve(file, args.overrides)?;
    // Fail on a bad --repo before extracting or prompting
    parse_repo_url(&settings.repo_url)?;

    // Extract up front so the prompt can list what will be published
    let documents = SceneFileSource::new(args.scene).extract_selection().await?;
    let request = settings.publish_request(args.dry_run);

    println!(
        "Publishing {} icon{} to {} ({})",
        documents.len().accent(),
        if documents.len() == 1 { "" } else { "s" },
        settings.repo_url.emphasis(),
        settings.folder.accent()
    );

    if !args.dry_run && !args.assume_yes && std::io::stdin().is_terminal() {
        for doc in &documents {
            println!("  {}", blob_path(&settings.folder, &doc.name).muted());
        }
        let proceed = Confirm::new()
            .with_prompt("Create a branch and open a pull request?")
            .default(true)
            .interact()
            .map_err(|e| Error::Internal(format!("prompt failed: {e}")))?;
        if !proceed {
            println!("Aborted");
            return Ok(());
        }
    }

    let source = StaticSource::new(documents);

    let outcome = if args.dry_run {
        PublishOutcome::DryRun {
            paths: preview(&request.folder, &source).await?,
        }
    } else {
        let auth = get_github_auth(args.token).await?;
        debug!(source = ?auth.source, "resolved GitHub token");
        let client = create_repository_client(&settings.repo_url, &auth.token)?;
        publish(&request, &source, client, &CliProgress::new()).await?
    };

    match outcome {
        PublishOutcome::Published { diff, .. } => {
            println!(
                "{} Published {} changed file{}",
                check(),
                diff.len().accent(),
                if diff.len() == 1 { "" } else { "s" }
            );
        }
        PublishOutcome::NoChanges { branch } => {
            eprintln!(
                "{} - no pull request created (branch {} left in place)",
                "No changes detected".warn(),
                branch.accent().for_stderr()
            );
        }
        PublishOutcome::DryRun { paths } => {
            println!("Dry run - would write:");
            for path in paths {
                println!("  {}", path.accent());
            }
        }
    }

    Ok(())
}

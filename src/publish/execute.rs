//! Publish orchestration
//!
//! Sequences extraction, branching, upload, reconciliation, commit, diff,
//! and pull request creation. Any failure aborts the run at the failing
//! stage; remote objects created up to that point are left in place.

use crate::error::{Error, Result};
use crate::extract::{duplicate_names, validate_documents, SelectionSource};
use crate::platform::RepositoryClient;
use crate::publish::branch::{provision_branch, DEFAULT_BRANCH_PREFIX};
use crate::publish::commit::{commit_and_advance, DEFAULT_COMMIT_MESSAGE};
use crate::publish::diff::{collect_diff, compose_body};
use crate::publish::reconcile::reconcile_tree;
use crate::publish::upload::{blob_path, upload_blobs};
use crate::publish::{ProgressCallback, Stage};
use crate::types::{BlobRef, CreatePrRequest, FileDiff, PullRequest, SvgDocument};
use std::future::Future;
use std::sync::Arc;
use tracing::{info, warn};

/// Default pull request title
pub const DEFAULT_PR_TITLE: &str = "Update icons from Figma";

/// Default pull request description
pub const DEFAULT_PR_BODY: &str = "This PR was created by the Figma plugin to update icons.";

/// What to publish and how to describe it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    /// Target folder, without leading or trailing `/`
    pub folder: String,
    /// Pull request title
    pub title: String,
    /// Pull request description
    pub body: String,
    /// Append the changed-files summary to the description
    pub include_summary: bool,
    /// Commit message
    pub commit_message: String,
    /// Branch name prefix
    pub branch_prefix: String,
    /// Stop after extraction without touching the remote
    pub dry_run: bool,
}

impl PublishRequest {
    /// Request with default title, body, message, and prefix
    pub fn new(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            title: DEFAULT_PR_TITLE.to_string(),
            body: DEFAULT_PR_BODY.to_string(),
            include_summary: true,
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            branch_prefix: DEFAULT_BRANCH_PREFIX.to_string(),
            dry_run: false,
        }
    }
}

/// Terminal outcome of a publish run
#[derive(Debug, Clone)]
pub enum PublishOutcome {
    /// A pull request was opened
    Published {
        /// The new pull request
        pull_request: PullRequest,
        /// Branch holding the commit
        branch: String,
        /// Committed changes
        diff: FileDiff,
    },
    /// The commit produced no file-level change; no pull request was opened
    NoChanges {
        /// Branch holding the (empty) commit
        branch: String,
    },
    /// Dry run: the paths that would be written
    DryRun {
        /// Planned repository paths, in extraction order
        paths: Vec<String>,
    },
}

/// Per-run state, owned by a single publish invocation
#[derive(Debug, Default)]
struct PublishContext {
    base_branch: String,
    base_commit_sha: String,
    base_tree_sha: String,
    branch: String,
    blobs: Vec<BlobRef>,
    tree_sha: String,
    commit_sha: String,
}

struct Runner<'a> {
    progress: &'a dyn ProgressCallback,
    stage: Stage,
}

impl Runner<'_> {
    async fn enter(&mut self, stage: Stage) {
        self.stage = stage;
        self.progress.on_stage(stage).await;
    }

    /// Run one remote step, attaching the current stage to any error
    async fn step<T>(&mut self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        match fut.await {
            Ok(value) => Ok(value),
            Err(e) => Err(self.fail(e).await),
        }
    }

    async fn fail(&mut self, error: Error) -> Error {
        let error = Error::StepFailed {
            stage: self.stage,
            source: Box::new(error),
        };
        self.stage = Stage::Failed;
        self.progress.on_stage(Stage::Failed).await;
        self.progress.on_error(&error).await;
        error
    }
}

/// Publish the current selection as a pull request
///
/// Precondition failures (empty selection, no vector content, invalid names)
/// are returned unwrapped before any remote call. Remote failures are
/// returned as [`Error::StepFailed`] naming the stage that failed.
pub async fn publish(
    request: &PublishRequest,
    source: &dyn SelectionSource,
    client: Arc<dyn RepositoryClient>,
    progress: &dyn ProgressCallback,
) -> Result<PublishOutcome> {
    let mut runner = Runner {
        progress,
        stage: Stage::Idle,
    };

    runner.enter(Stage::Extracting).await;
    let documents = match extract(source).await {
        Ok(docs) => docs,
        Err(e) => {
            runner.progress.on_stage(Stage::Failed).await;
            runner.progress.on_error(&e).await;
            return Err(e);
        }
    };

    if request.dry_run {
        runner.enter(Stage::Done).await;
        return Ok(PublishOutcome::DryRun {
            paths: planned_paths(&request.folder, &documents),
        });
    }

    let repo = client.coordinates().to_string();
    info!(%repo, folder = %request.folder, icons = documents.len(), "publishing icons");
    let mut ctx = PublishContext::default();

    runner.enter(Stage::Provisioning).await;
    ctx.base_branch = runner.step(client.get_default_branch()).await?;
    ctx.base_commit_sha = runner
        .step(client.get_ref_commit_sha(&ctx.base_branch))
        .await?;
    ctx.base_tree_sha = runner
        .step(client.get_commit_tree_sha(&ctx.base_commit_sha))
        .await?;
    ctx.branch = runner
        .step(provision_branch(
            client.as_ref(),
            &request.branch_prefix,
            &ctx.base_commit_sha,
        ))
        .await?;

    runner.enter(Stage::Uploading).await;
    ctx.blobs = runner
        .step(upload_blobs(&client, &request.folder, &documents, progress))
        .await?;

    runner.enter(Stage::Reconciling).await;
    let (plan, tree_sha) = runner
        .step(reconcile_tree(
            client.as_ref(),
            &ctx.base_tree_sha,
            &request.folder,
            &ctx.blobs,
        ))
        .await?;
    ctx.tree_sha = tree_sha;
    progress.on_tree_planned(&plan).await;

    runner.enter(Stage::Committing).await;
    ctx.commit_sha = runner
        .step(commit_and_advance(
            client.as_ref(),
            &request.commit_message,
            &ctx.tree_sha,
            &ctx.base_commit_sha,
            &ctx.branch,
        ))
        .await?;

    runner.enter(Stage::Diffing).await;
    let diff = runner
        .step(collect_diff(client.as_ref(), &ctx.base_branch, &ctx.branch))
        .await?;
    progress.on_diff(&diff).await;

    if diff.is_empty() {
        warn!(branch = %ctx.branch, commit = %ctx.commit_sha, "no changes detected, skipping pull request");
        progress
            .on_message("No changes detected. Please check the SVG files.")
            .await;
        runner.enter(Stage::Done).await;
        return Ok(PublishOutcome::NoChanges { branch: ctx.branch });
    }

    runner.enter(Stage::OpeningPr).await;
    let pr_request = CreatePrRequest {
        head: ctx.branch.clone(),
        base: ctx.base_branch.clone(),
        title: request.title.clone(),
        body: compose_body(&request.body, &diff, request.include_summary),
    };
    let pull_request = runner
        .step(client.create_pull_request(&pr_request))
        .await?;
    progress.on_pr_created(&pull_request).await;
    info!(url = %pull_request.html_url, "opened pull request");

    runner.enter(Stage::Done).await;
    Ok(PublishOutcome::Published {
        pull_request,
        branch: ctx.branch,
        diff,
    })
}

/// Extract and validate the selection without touching the remote
///
/// Returns the repository paths a publish would write, in extraction order.
pub async fn preview(folder: &str, source: &dyn SelectionSource) -> Result<Vec<String>> {
    let documents = extract(source).await?;
    Ok(planned_paths(folder, &documents))
}

fn planned_paths(folder: &str, documents: &[SvgDocument]) -> Vec<String> {
    documents.iter().map(|d| blob_path(folder, &d.name)).collect()
}

async fn extract(source: &dyn SelectionSource) -> Result<Vec<SvgDocument>> {
    let documents = source.extract_selection().await?;
    if documents.is_empty() {
        return Err(Error::NoVectorContent);
    }
    validate_documents(&documents)?;
    for name in duplicate_names(&documents) {
        warn!(name = %name, "multiple icons share a name; the last one is published");
    }
    Ok(documents)
}

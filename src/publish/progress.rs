//! Progress callback trait for interface-agnostic updates
//!
//! This trait allows different interfaces (CLI, plugin bridge, etc.) to receive
//! progress updates while a publish run executes.

use crate::error::Error;
use crate::publish::reconcile::TreePlan;
use crate::types::{FileDiff, PullRequest};
use async_trait::async_trait;

/// Pipeline state
///
/// Runs move strictly forward through the stages; `Failed` is reachable from
/// any stage and `Diffing` may skip straight to `Done` when nothing changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Nothing started yet
    Idle,
    /// Extracting SVG documents from the selection
    Extracting,
    /// Reading the base branch and creating the publish branch
    Provisioning,
    /// Uploading blobs
    Uploading,
    /// Computing and creating the reconciled tree
    Reconciling,
    /// Creating the commit and advancing the branch
    Committing,
    /// Comparing the new branch against the base
    Diffing,
    /// Opening the pull request
    OpeningPr,
    /// Run finished (published or no-op)
    Done,
    /// Run aborted
    Failed,
}

impl Stage {
    /// Coarse, user-visible step this stage belongs to
    pub const fn step(self) -> PublishStep {
        match self {
            Self::Idle | Self::Done | Self::Failed => PublishStep::Idle,
            Self::Extracting => PublishStep::Extracting,
            Self::Provisioning | Self::Uploading => PublishStep::BranchingAndUploading,
            Self::Reconciling | Self::Committing | Self::Diffing => PublishStep::BuildingTree,
            Self::OpeningPr => PublishStep::OpeningPullRequest,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Extracting => write!(f, "extracting SVG nodes"),
            Self::Provisioning => write!(f, "preparing branch"),
            Self::Uploading => write!(f, "uploading SVG files"),
            Self::Reconciling => write!(f, "building tree"),
            Self::Committing => write!(f, "committing"),
            Self::Diffing => write!(f, "comparing branches"),
            Self::OpeningPr => write!(f, "opening pull request"),
            Self::Done => write!(f, "done"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// User-visible progress label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PublishStep {
    /// Not running
    Idle,
    /// Extracting SVG nodes
    Extracting,
    /// Creating the branch and uploading files
    BranchingAndUploading,
    /// Building the tree and commit
    BuildingTree,
    /// Creating the pull request
    OpeningPullRequest,
}

impl PublishStep {
    /// Number of non-idle steps
    pub const COUNT: u8 = 4;

    /// 1-based position for progress bars, 0 when idle
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Extracting => 1,
            Self::BranchingAndUploading => 2,
            Self::BuildingTree => 3,
            Self::OpeningPullRequest => 4,
        }
    }

    /// Status line shown while this step runs
    pub const fn message(self) -> &'static str {
        match self {
            Self::Idle => "",
            Self::Extracting => "Extracting SVG nodes...",
            Self::BranchingAndUploading => "Creating a new branch and uploading SVG files...",
            Self::BuildingTree => "Building the new tree...",
            Self::OpeningPullRequest => "Creating a pull request...",
        }
    }
}

/// Progress callback trait
///
/// Implement this trait to receive progress updates during a publish run.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when the pipeline enters a new stage
    async fn on_stage(&self, stage: Stage);

    /// Called after each blob upload completes
    async fn on_blob_uploaded(&self, path: &str);

    /// Called once the tree mutation is computed
    async fn on_tree_planned(&self, plan: &TreePlan);

    /// Called with the committed diff
    async fn on_diff(&self, diff: &FileDiff);

    /// Called when the pull request is created
    async fn on_pr_created(&self, pr: &PullRequest);

    /// Called when the run aborts
    async fn on_error(&self, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_stage(&self, _stage: Stage) {}
    async fn on_blob_uploaded(&self, _path: &str) {}
    async fn on_tree_planned(&self, _plan: &TreePlan) {}
    async fn on_diff(&self, _diff: &FileDiff) {}
    async fn on_pr_created(&self, _pr: &PullRequest) {}
    async fn on_error(&self, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_maps_to_step() {
        assert_eq!(Stage::Provisioning.step(), PublishStep::BranchingAndUploading);
        assert_eq!(Stage::Uploading.step(), PublishStep::BranchingAndUploading);
        assert_eq!(Stage::Diffing.step(), PublishStep::BuildingTree);
        assert_eq!(Stage::OpeningPr.step(), PublishStep::OpeningPullRequest);
        assert_eq!(Stage::Failed.step(), PublishStep::Idle);
    }

    #[test]
    fn test_step_ordinals_are_ordered() {
        let steps = [
            PublishStep::Idle,
            PublishStep::Extracting,
            PublishStep::BranchingAndUploading,
            PublishStep::BuildingTree,
            PublishStep::OpeningPullRequest,
        ];
        for pair in steps.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].ordinal() + 1, pair[1].ordinal());
        }
        assert_eq!(PublishStep::OpeningPullRequest.ordinal(), PublishStep::COUNT);
    }
}

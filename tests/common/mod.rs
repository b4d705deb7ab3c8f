//! Shared test support

#![allow(dead_code)]

pub mod fixtures;
pub mod mock_client;

pub use fixtures::*;
pub use mock_client::MockRepositoryClient;

use async_trait::async_trait;
use icon_sync::error::Error;
use icon_sync::publish::{ProgressCallback, Stage, TreePlan};
use icon_sync::types::{FileDiff, PullRequest};
use std::sync::Mutex;

/// Progress callback that records everything it is told
#[derive(Default)]
pub struct RecordingProgress {
    pub stages: Mutex<Vec<Stage>>,
    pub uploaded: Mutex<Vec<String>>,
    pub plans: Mutex<Vec<TreePlan>>,
    pub diffs: Mutex<Vec<FileDiff>>,
    pub prs: Mutex<Vec<PullRequest>>,
    pub errors: Mutex<Vec<String>>,
    pub messages: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn stages(&self) -> Vec<Stage> {
        self.stages.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_stage(&self, stage: Stage) {
        self.stages.lock().unwrap().push(stage);
    }

    async fn on_blob_uploaded(&self, path: &str) {
        self.uploaded.lock().unwrap().push(path.to_string());
    }

    async fn on_tree_planned(&self, plan: &TreePlan) {
        self.plans.lock().unwrap().push(plan.clone());
    }

    async fn on_diff(&self, diff: &FileDiff) {
        self.diffs.lock().unwrap().push(diff.clone());
    }

    async fn on_pr_created(&self, pr: &PullRequest) {
        self.prs.lock().unwrap().push(pr.clone());
    }

    async fn on_error(&self, error: &Error) {
        self.errors.lock().unwrap().push(error.to_string());
    }

    async fn on_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

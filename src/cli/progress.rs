//! CLI progress callback with styled output and a spinner

use crate::cli::style::{change_marker, check, hyperlink_url, spinner_style, Stream, Stylize};
use anstream::println;
use async_trait::async_trait;
use icon_sync::error::Error;
use icon_sync::publish::{ProgressCallback, PublishStep, Stage, TreePlan};
use icon_sync::types::{FileDiff, FileStatus, PullRequest};
use indicatif::ProgressBar;
use std::time::Duration;

/// CLI progress callback
///
/// Shows the current step as `[n/4]` on a spinner and prints a line per
/// completed step.
pub struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    /// Create a progress reporter with a running spinner
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_stage(&self, stage: Stage) {
        match stage {
            Stage::Done | Stage::Failed => self.spinner.finish_and_clear(),
            Stage::Idle => {}
            _ => {
                let step = stage.step();
                self.spinner.set_message(format!(
                    "[{}/{}] {} {}",
                    step.ordinal(),
                    PublishStep::COUNT,
                    step.message(),
                    format!("({stage})").muted()
                ));
            }
        }
    }

    async fn on_blob_uploaded(&self, path: &str) {
        self.spinner
            .println(format!("  {} Uploaded {}", check(), path.accent()));
    }

    async fn on_tree_planned(&self, plan: &TreePlan) {
        self.spinner.println(format!(
            "  {} Tree: {} new, {} overwritten, {} removed",
            check(),
            plan.created.len().accent(),
            plan.overwritten.len().accent(),
            plan.removed.len().accent()
        ));
    }

    async fn on_diff(&self, diff: &FileDiff) {
        let groups = [
            (FileStatus::Added, &diff.added_files),
            (FileStatus::Modified, &diff.modified_files),
            (FileStatus::Removed, &diff.removed_files),
        ];
        for (status, paths) in groups {
            for path in paths {
                self.spinner
                    .println(format!("    {} {path}", change_marker(status)));
            }
        }
        if diff.truncated {
            self.spinner
                .println(format!("    {}", "(list truncated by GitHub)".muted()));
        }
    }

    async fn on_pr_created(&self, pr: &PullRequest) {
        let pr_num = format!("#{}", pr.number);
        println!(
            "{} Created PR {} ({} -> {})",
            check(),
            pr_num.accent(),
            pr.head_ref.emphasis(),
            pr.base_ref.muted()
        );
        println!("  {}", hyperlink_url(Stream::Stdout, &pr.html_url));
    }

    async fn on_error(&self, _err: &Error) {
        // The command's caller prints the error
        self.spinner.finish_and_clear();
    }

    async fn on_message(&self, message: &str) {
        self.spinner.println(message.warn().to_string());
    }
}

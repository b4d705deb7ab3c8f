//! Publish pipeline
//!
//! Turns extracted SVG documents into a branch, a single commit, and a pull
//! request against one folder of a repository:
//! 1. Provision - fork a fresh branch from the base branch's current commit
//! 2. Upload - store every document as a blob
//! 3. Reconcile - write new/changed icons and tombstone vanished ones
//! 4. Commit - commit the tree and advance the branch
//! 5. Diff - compare against the base; stop here if nothing changed
//! 6. Open the pull request

mod branch;
mod commit;
mod diff;
mod execute;
mod progress;
mod reconcile;
mod upload;

pub use branch::{branch_name, provision_branch, DEFAULT_BRANCH_PREFIX};
pub use commit::{commit_and_advance, DEFAULT_COMMIT_MESSAGE};
pub use diff::{collect_diff, compose_body, render_summary, NO_CHANGES, TRUNCATED_NOTE};
pub use execute::{preview, publish, PublishOutcome, PublishRequest, DEFAULT_PR_BODY, DEFAULT_PR_TITLE};
pub use progress::{NoopProgress, ProgressCallback, PublishStep, Stage};
pub use reconcile::{is_managed_path, plan_tree, reconcile_tree, TreePlan};
pub use upload::{blob_path, upload_blobs};

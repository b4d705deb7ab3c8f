//! icon-sync - publish design-tool icons to GitHub
//!
//! Takes the vector-bearing frames of a design selection, exports them as SVG
//! files, and publishes them to a single folder of a GitHub repository as a
//! new branch plus pull request. Icons that disappeared from the selection are
//! removed from the folder in the same commit.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod platform;
pub mod publish;
pub mod types;

//! Tasrel GitHub - Commit history linking for release changelogs
//!
//! This crate resolves the commit range between the two most recent release
//! tags, classifies each commit by its conventional-commit header and
//! attaches the pull requests associated with it.

pub mod classify;
pub mod client;
pub mod error;
pub mod linker;
pub mod types;

pub use client::{GitHubClient, GitHubConfig, ReleaseHost};
pub use error::{HistoryError, Result};
pub use linker::HistoryLinker;
pub use types::{ClassifiedCommit, CommitHistory, PullRequest};

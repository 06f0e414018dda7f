//! Commit history linking
//!
//! Bounds a release by the two most recent tags, walks the commit range
//! between them and classifies every non-merge commit by its
//! conventional-commit header, attaching associated pull requests.

use tracing::{debug, info, instrument, warn};

use crate::classify::classify;
use crate::client::ReleaseHost;
use crate::error::{HistoryError, Result};
use crate::types::{ClassifiedCommit, CommitHistory};

/// Links the commit history of the current release window
pub struct HistoryLinker<H: ReleaseHost> {
    host: H,
}

impl<H: ReleaseHost> HistoryLinker<H> {
    /// Create a linker over a release host
    pub fn new(host: H) -> Self {
        Self { host }
    }

    /// Build the classified history between the two most recent tags.
    ///
    /// Tag-listing and comparison failures abort linking; a failed pull
    /// request lookup only leaves that commit without linked pull requests.
    #[instrument(skip(self))]
    pub fn link(&self) -> Result<CommitHistory> {
        let tags = self.host.list_tags()?;
        if tags.len() < 2 {
            return Err(HistoryError::NotEnoughTags(tags.len()));
        }

        // The tag endpoint returns tags newest first
        let current = &tags[0];
        let previous = &tags[1];
        info!(
            from = %previous.name,
            to = %current.name,
            "generating commit history for release range"
        );

        let commits = self.host.compare(&previous.commit.sha, &current.commit.sha)?;

        let mut history = CommitHistory::new();
        for raw in commits {
            // Skip merge commits
            if raw.parents.len() != 1 {
                debug!(sha = %raw.sha, "skipping merge commit");
                continue;
            }

            debug!(first_line = raw.first_line(), "parsing commit");
            let classified = classify(&raw.commit.message);

            let pull_requests = match self.host.pull_requests_for(&raw.sha) {
                Ok(pulls) => pulls,
                Err(err) => {
                    warn!(sha = %raw.sha, error = %err, "pull request lookup failed");
                    Vec::new()
                }
            };

            let author = raw.author_name().to_string();
            history.push(ClassifiedCommit {
                sha: raw.sha,
                commit_type: classified.commit_type,
                scope: classified.scope,
                message: classified.message,
                author,
                pull_requests,
            });
        }

        debug!(commit_count = history.len(), "commit history linked");
        Ok(history)
    }
}

//! Commit history types

use serde::Deserialize;

/// Recognized conventional-commit types and their section headings, in the
/// order sections appear in the rendered commit details.
pub const COMMIT_TYPES: [(&str, &str); 14] = [
    ("feat", "Features"),
    ("fix", "Bug Fixes"),
    ("docs", "Documentation"),
    ("style", "Styles"),
    ("refactor", "Code Refactoring"),
    ("tweak", "Tweaks"),
    ("remove", "Removals"),
    ("perf", "Performance Improvements"),
    ("test", "Tests"),
    ("build", "Builds"),
    ("ci", "Continuous Integration"),
    ("chore", "Chores"),
    ("revert", "Reverts"),
    (FALLBACK_TYPE, "Commits"),
];

/// Catch-all type for commits whose message is not a conventional commit
pub const FALLBACK_TYPE: &str = "commit";

/// Look up the section heading for a commit type
pub fn heading_for(commit_type: &str) -> Option<&'static str> {
    COMMIT_TYPES
        .iter()
        .find(|(ty, _)| *ty == commit_type)
        .map(|(_, heading)| *heading)
}

/// A pull request associated with a commit
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    /// API URL of the pull request
    pub url: String,
    /// Pull request number
    #[serde(rename = "number")]
    pub id: u64,
}

/// A commit classified by its conventional-commit header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedCommit {
    /// Full commit SHA
    pub sha: String,
    /// Conventional-commit type, or [`FALLBACK_TYPE`]
    pub commit_type: String,
    /// Scope (optional, in parentheses)
    pub scope: Option<String>,
    /// Subject line, or the whole first line for fallback commits
    pub message: String,
    /// GitHub login of the author, or the git author name when unlinked
    pub author: String,
    /// Linked pull requests in API order
    pub pull_requests: Vec<PullRequest>,
}

impl ClassifiedCommit {
    /// First 7 characters of the SHA
    pub fn short_sha(&self) -> &str {
        let end = self.sha.len().min(7);
        &self.sha[..end]
    }
}

/// Commits grouped by conventional-commit type.
///
/// Groups exist for every entry of [`COMMIT_TYPES`] and keep the table
/// order; commits keep their chronological order within a group.
#[derive(Debug, Clone)]
pub struct CommitHistory {
    groups: Vec<Vec<ClassifiedCommit>>,
}

impl Default for CommitHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitHistory {
    /// Create an empty history with a group per recognized type
    pub fn new() -> Self {
        Self {
            groups: vec![Vec::new(); COMMIT_TYPES.len()],
        }
    }

    /// Append a commit to its type's group.
    ///
    /// Commits with a type outside [`COMMIT_TYPES`] land in the fallback
    /// group; the classifier never produces one, but grouping stays total.
    pub fn push(&mut self, commit: ClassifiedCommit) {
        let index = COMMIT_TYPES
            .iter()
            .position(|(ty, _)| *ty == commit.commit_type)
            .unwrap_or(COMMIT_TYPES.len() - 1);
        self.groups[index].push(commit);
    }

    /// Iterate non-empty groups as `(heading, commits)` in table order
    pub fn sections(&self) -> impl Iterator<Item = (&'static str, &[ClassifiedCommit])> {
        COMMIT_TYPES
            .iter()
            .zip(self.groups.iter())
            .filter(|(_, commits)| !commits.is_empty())
            .map(|((_, heading), commits)| (*heading, commits.as_slice()))
    }

    /// Check if no commits were recorded
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.is_empty())
    }

    /// Total number of recorded commits
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.len()).sum()
    }
}

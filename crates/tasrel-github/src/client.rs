//! GitHub API client
//!
//! Read-only, synchronous access to the three endpoints history linking
//! needs: tag listing, commit-range comparison and per-commit pull request
//! lookup. Comparison follows the `Link: <...>; rel="next"` response header
//! until no next page remains.

use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::{HistoryError, Result};
use crate::types::PullRequest;

const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Page size for the paginated endpoints (the documented API maximum)
const PAGE_SIZE: u32 = 100;

/// Regex extracting the `rel="next"` target from a Link header
static NEXT_LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<([^>]*)>\s*;\s*rel="(?i:next)""#).expect("Invalid regex"));

/// A tag as returned by the tag-listing endpoint, newest first
#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    /// Tag name (e.g. `v3.43.0`)
    pub name: String,
    /// Commit the tag points to
    pub commit: TagCommit,
}

/// Commit reference inside a tag entry
#[derive(Debug, Clone, Deserialize)]
pub struct TagCommit {
    pub sha: String,
}

/// One commit entry from the comparison endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RawCommit {
    pub sha: String,
    pub commit: RawCommitDetail,
    /// Linked GitHub account, absent when the git author has none
    pub author: Option<RawActor>,
    pub parents: Vec<RawParent>,
}

impl RawCommit {
    /// First line of the commit message
    pub fn first_line(&self) -> &str {
        self.commit.message.lines().next().unwrap_or_default()
    }

    /// GitHub login when the commit is linked to an account, otherwise the
    /// git author name
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(|actor| actor.login.as_str())
            .or_else(|| self.commit.author.as_ref().map(|a| a.name.as_str()))
            .unwrap_or("unknown")
    }
}

/// Git-level commit data
#[derive(Debug, Clone, Deserialize)]
pub struct RawCommitDetail {
    pub message: String,
    pub author: Option<RawGitAuthor>,
}

/// A GitHub account reference
#[derive(Debug, Clone, Deserialize)]
pub struct RawActor {
    pub login: String,
}

/// Git author signature
#[derive(Debug, Clone, Deserialize)]
pub struct RawGitAuthor {
    pub name: String,
}

/// Parent reference of a commit
#[derive(Debug, Clone, Deserialize)]
pub struct RawParent {
    pub sha: String,
}

#[derive(Debug, Deserialize)]
struct ComparePage {
    commits: Vec<RawCommit>,
}

/// Remote operations the history linker needs.
///
/// Kept behind a trait so retries or a different forge can be added without
/// touching classification or rendering.
pub trait ReleaseHost {
    /// List tags, newest first
    fn list_tags(&self) -> Result<Vec<Tag>>;

    /// All commits between `base` (exclusive) and `head` (inclusive), in
    /// chronological order
    fn compare(&self, base: &str, head: &str) -> Result<Vec<RawCommit>>;

    /// Pull requests associated with a commit, in API order
    fn pull_requests_for(&self, sha: &str) -> Result<Vec<PullRequest>>;
}

/// GitHub client configuration
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// Repository in `owner/name` form
    pub repo: String,
    /// Bearer token for API authentication
    pub token: String,
    /// API base URL (default: `https://api.github.com`)
    pub api_base: String,
}

impl GitHubConfig {
    /// Create a configuration against the public GitHub API
    pub fn new(repo: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            token: token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Override the API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

/// Synchronous GitHub API client
pub struct GitHubClient {
    config: GitHubConfig,
    client: Client,
}

impl GitHubClient {
    /// Create a new client
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("tasrel/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { config, client })
    }

    /// GET a JSON resource, returning the body and the next-page URL when
    /// the response carries one
    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<(T, Option<String>)> {
        debug!(url, "GitHub API request");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.config.token)
            .header(header::ACCEPT, "application/vnd.github+json")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(HistoryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let next = response
            .headers()
            .get(header::LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_next_link);

        Ok((response.json()?, next))
    }
}

impl ReleaseHost for GitHubClient {
    fn list_tags(&self) -> Result<Vec<Tag>> {
        let url = format!("{}/repos/{}/tags", self.config.api_base, self.config.repo);
        let (tags, _) = self.get_json(&url)?;
        Ok(tags)
    }

    fn compare(&self, base: &str, head: &str) -> Result<Vec<RawCommit>> {
        let url = format!(
            "{}/repos/{}/compare/{}...{}?per_page={}",
            self.config.api_base, self.config.repo, base, head, PAGE_SIZE
        );

        collect_compare_pages(url, |url| self.get_json(url))
    }

    fn pull_requests_for(&self, sha: &str) -> Result<Vec<PullRequest>> {
        let url = format!(
            "{}/repos/{}/commits/{}/pulls?per_page={}",
            self.config.api_base, self.config.repo, sha, PAGE_SIZE
        );
        let (pulls, _) = self.get_json(&url)?;
        Ok(pulls)
    }
}

/// Walk comparison pages, following the next-page URL until none remains
fn collect_compare_pages<F>(first_url: String, mut fetch_page: F) -> Result<Vec<RawCommit>>
where
    F: FnMut(&str) -> Result<(ComparePage, Option<String>)>,
{
    let mut url = first_url;
    let mut commits = Vec::new();

    loop {
        let (page, next) = fetch_page(&url)?;
        debug!(page_commits = page.commits.len(), "comparison page fetched");
        commits.extend(page.commits);

        match next {
            Some(next_url) => url = next_url,
            None => break,
        }
    }

    Ok(commits)
}

/// Extract the `rel="next"` target from a Link header value
fn parse_next_link(header: &str) -> Option<String> {
    NEXT_LINK_REGEX
        .captures(header)
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_next_link() {
        let header = r#"<https://api.github.com/repositories/1/compare/a...b?page=2>; rel="next", <https://api.github.com/repositories/1/compare/a...b?page=5>; rel="last""#;
        assert_eq!(
            parse_next_link(header).as_deref(),
            Some("https://api.github.com/repositories/1/compare/a...b?page=2")
        );
    }

    #[test]
    fn test_parse_next_link_case_insensitive_relation() {
        let header = r#"<https://example.com/page/2>; rel="Next""#;
        assert_eq!(
            parse_next_link(header).as_deref(),
            Some("https://example.com/page/2")
        );
    }

    #[test]
    fn test_parse_next_link_absent() {
        let header = r#"<https://example.com/page/1>; rel="prev""#;
        assert!(parse_next_link(header).is_none());
        assert!(parse_next_link("").is_none());
    }

    #[test]
    fn test_raw_commit_author_fallbacks() {
        let linked: RawCommit = serde_json::from_value(serde_json::json!({
            "sha": "abc",
            "commit": { "message": "feat: x", "author": { "name": "Jane Doe" } },
            "author": { "login": "janedoe" },
            "parents": [{ "sha": "def" }],
        }))
        .unwrap();
        assert_eq!(linked.author_name(), "janedoe");

        let unlinked: RawCommit = serde_json::from_value(serde_json::json!({
            "sha": "abc",
            "commit": { "message": "feat: x", "author": { "name": "Jane Doe" } },
            "author": null,
            "parents": [{ "sha": "def" }],
        }))
        .unwrap();
        assert_eq!(unlinked.author_name(), "Jane Doe");
    }

    fn make_page(shas: &[&str]) -> ComparePage {
        let commits = shas
            .iter()
            .map(|sha| {
                serde_json::json!({
                    "sha": sha,
                    "commit": { "message": "fix: something", "author": { "name": "Jane" } },
                    "author": { "login": "jane" },
                    "parents": [{ "sha": "p0" }],
                })
            })
            .collect::<Vec<_>>();
        serde_json::from_value(serde_json::json!({ "commits": commits })).unwrap()
    }

    #[test]
    fn test_compare_traversal_follows_next_links() {
        let mut requested = Vec::new();
        let commits = collect_compare_pages("page1".to_string(), |url| {
            requested.push(url.to_string());
            match url {
                "page1" => Ok((make_page(&["aaa", "bbb"]), Some("page2".to_string()))),
                "page2" => Ok((make_page(&["ccc"]), Some("page3".to_string()))),
                "page3" => Ok((make_page(&["ddd"]), None)),
                other => panic!("unexpected url {other}"),
            }
        })
        .unwrap();

        assert_eq!(requested, ["page1", "page2", "page3"]);
        let shas: Vec<_> = commits.iter().map(|c| c.sha.as_str()).collect();
        assert_eq!(shas, ["aaa", "bbb", "ccc", "ddd"]);
    }

    #[test]
    fn test_compare_traversal_stops_without_next_link() {
        let mut requests = 0;
        let commits = collect_compare_pages("page1".to_string(), |_| {
            requests += 1;
            Ok((make_page(&["aaa"]), None))
        })
        .unwrap();

        assert_eq!(requests, 1);
        assert_eq!(commits.len(), 1);
    }

    #[test]
    fn test_compare_traversal_propagates_page_errors() {
        let result = collect_compare_pages("page1".to_string(), |url| match url {
            "page1" => Ok((make_page(&["aaa"]), Some("page2".to_string()))),
            _ => Err(HistoryError::Api {
                status: 502,
                message: "bad gateway".to_string(),
            }),
        });

        assert!(matches!(
            result,
            Err(HistoryError::Api { status: 502, .. })
        ));
    }

    #[test]
    fn test_config_api_base_override() {
        let config = GitHubConfig::new("owner/repo", "token").with_api_base("http://localhost:1");
        assert_eq!(config.api_base, "http://localhost:1");
    }
}

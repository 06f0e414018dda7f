//! GitHub release body encoding
//!
//! Markdown document: the release's pages separated by horizontal rules,
//! one section per non-empty category, and optionally a collapsible commit
//! details block built from the linked history.

use tracing::{debug, instrument};

use tasrel_github::CommitHistory;

use crate::types::{Align, Image, Version};

/// Renders the markdown release body
#[derive(Debug, Clone, Default)]
pub struct GitHubRenderer {
    /// Base URL the page image paths are resolved against
    image_base: Option<String>,
}

impl GitHubRenderer {
    /// Create a renderer without an image base URL
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve page image paths against a base URL
    pub fn with_image_base(mut self, base: impl Into<String>) -> Self {
        self.image_base = Some(base.into());
        self
    }

    /// Render the release body for one version, with commit details when
    /// history is available
    #[instrument(skip(self, version, history), fields(celestetas = %version.celestetas_version))]
    pub fn render(&self, version: &Version, history: Option<&CommitHistory>) -> String {
        let mut output = String::new();

        // Pages, each closed by a horizontal rule
        for page in &version.pages {
            if let Some(image) = &page.image {
                output.push_str(&self.image_tag(image));
                output.push_str("\n\n");
            }
            output.push_str(&page.text);
            output.push_str("\n\n---\n\n");
        }

        // One section per non-empty category
        for (category, messages) in version.changes.iter() {
            if messages.is_empty() {
                continue;
            }

            output.push_str(&format!("## {}\n", category.section_label()));
            for message in messages {
                output.push_str(&format!("- {}\n", message));
            }
            output.push('\n');
        }

        let mut output = output.trim_end().to_string();

        if let Some(history) = history.filter(|h| !h.is_empty()) {
            output.push_str("\n\n<details>\n<summary><h3>Commit Details</h3></summary>\n");

            for (heading, commits) in history.sections() {
                output.push_str(&format!("\n### {}\n", heading));
                for commit in commits {
                    let scope = commit
                        .scope
                        .as_deref()
                        .map(|scope| format!("**{}**: ", scope))
                        .unwrap_or_default();
                    output.push_str(&format!(
                        "- {} {}{} (@{})",
                        commit.short_sha(),
                        scope,
                        commit.message,
                        commit.author
                    ));

                    let pulls: Vec<String> = commit
                        .pull_requests
                        .iter()
                        .map(|pr| format!("[#{}]({})", pr.id, pr.url))
                        .collect();
                    if !pulls.is_empty() {
                        output.push(' ');
                        output.push_str(&pulls.join(", "));
                    }
                    output.push('\n');
                }
            }

            output.push_str("</details>");
        }

        output.push('\n');
        debug!(output_len = output.len(), "release body rendered");
        output
    }

    fn image_tag(&self, image: &Image) -> String {
        let src = match &self.image_base {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), image.source),
            None => image.source.clone(),
        };
        let align = match image.align {
            Align::Left => "left",
            Align::Right => "right",
        };

        format!(
            r#"<img src="{}" align="{}" width="{}" height="{}">"#,
            src, align, image.width, image.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::Category;
    use crate::types::Page;
    use tasrel_github::{ClassifiedCommit, PullRequest};

    fn make_version() -> Version {
        let mut version = Version::new("v3.43.0", "v3.8.0");
        version.push_page(Page {
            text: "Highlights of this release.".to_string(),
            image: None,
        });
        version.push_change(Category::Feature, "New hotkeys");
        version.push_change(Category::Fix, "Crash on start");
        version
    }

    fn make_history() -> CommitHistory {
        let mut history = CommitHistory::new();
        history.push(ClassifiedCommit {
            sha: "abc1234567890".to_string(),
            commit_type: "feat".to_string(),
            scope: Some("input".to_string()),
            message: "add frame-advance hotkey".to_string(),
            author: "jane".to_string(),
            pull_requests: vec![PullRequest {
                url: "https://api.github.com/repos/o/r/pulls/12".to_string(),
                id: 12,
            }],
        });
        history
    }

    #[test]
    fn test_pages_are_separated_by_rules() {
        let mut version = make_version();
        version.push_page(Page {
            text: "Second page.".to_string(),
            image: None,
        });

        let output = GitHubRenderer::new().render(&version, None);
        assert!(output.contains("Highlights of this release.\n\n---\n\nSecond page.\n\n---"));
    }

    #[test]
    fn test_only_non_empty_sections_appear() {
        let output = GitHubRenderer::new().render(&make_version(), None);

        assert!(output.contains("## Features\n- New hotkeys"));
        assert!(output.contains("## Bug Fixes\n- Crash on start"));
        assert!(!output.contains("## Tweaks"));
        assert!(!output.contains("## Removals"));
    }

    #[test]
    fn test_image_tag_precedes_page_text() {
        let mut version = make_version();
        version.pages[0].image = Some(Image {
            source: "studio.png".to_string(),
            align: Align::Left,
            width: 300,
            height: 200,
        });

        let renderer =
            GitHubRenderer::new().with_image_base("https://github.com/o/r/raw/v3.43.0/");
        let output = renderer.render(&version, None);

        let tag = r#"<img src="https://github.com/o/r/raw/v3.43.0/studio.png" align="left" width="300" height="200">"#;
        let tag_pos = output.find(tag).unwrap();
        let text_pos = output.find("Highlights").unwrap();
        assert!(tag_pos < text_pos);
    }

    #[test]
    fn test_commit_details_block() {
        let output = GitHubRenderer::new().render(&make_version(), Some(&make_history()));

        assert!(output.contains("<details>\n<summary><h3>Commit Details</h3></summary>"));
        assert!(output.contains("### Features"));
        assert!(output.contains(
            "- abc1234 **input**: add frame-advance hotkey (@jane) [#12](https://api.github.com/repos/o/r/pulls/12)"
        ));
        assert!(output.trim_end().ends_with("</details>"));
    }

    #[test]
    fn test_no_details_block_without_history() {
        let output = GitHubRenderer::new().render(&make_version(), None);
        assert!(!output.contains("<details>"));

        let empty = CommitHistory::new();
        let output = GitHubRenderer::new().render(&make_version(), Some(&empty));
        assert!(!output.contains("<details>"));
    }

    #[test]
    fn test_scopeless_commit_has_no_bold_prefix() {
        let mut history = CommitHistory::new();
        history.push(ClassifiedCommit {
            sha: "def4567890123".to_string(),
            commit_type: "commit".to_string(),
            scope: None,
            message: "Update README".to_string(),
            author: "jane".to_string(),
            pull_requests: vec![],
        });

        let output = GitHubRenderer::new().render(&make_version(), Some(&history));
        assert!(output.contains("- def4567 Update README (@jane)\n"));
        assert!(!output.contains("****"));
    }
}

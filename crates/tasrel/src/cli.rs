//! Command-line interface

use std::path::PathBuf;

use clap::Parser;

use tasrel_github::{GitHubClient, GitHubConfig};

use crate::pipeline::{self, OutputPaths};

/// Compile the CelesteTAS changelog into release artifacts
#[derive(Debug, Parser)]
#[command(name = "tasrel", version)]
pub struct Cli {
    /// Release trigger message containing the CelesteTAS and Studio version tokens
    pub trigger: String,

    /// Path to the changelog document
    #[arg(long)]
    pub changelog: PathBuf,

    /// Output path for the two-line version info file
    #[arg(long)]
    pub version_info: PathBuf,

    /// Output path for the GameBanana update list (JSON)
    #[arg(long)]
    pub gamebanana: PathBuf,

    /// Output path for the GitHub release body (markdown)
    #[arg(long)]
    pub github: PathBuf,

    /// Output path for the Studio version history export (JSON)
    #[arg(long)]
    pub studio: PathBuf,

    /// Repository in owner/name form
    #[arg(long, env = "GITHUB_REPO")]
    pub repo: String,

    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,
}

impl Cli {
    pub fn execute(self) -> anyhow::Result<()> {
        let host = GitHubClient::new(GitHubConfig::new(&self.repo, &self.token))?;
        let outputs = OutputPaths {
            version_info: self.version_info,
            gamebanana: self.gamebanana,
            github: self.github,
            studio: self.studio,
        };

        pipeline::run(&self.trigger, &self.changelog, &outputs, &self.repo, host)
    }
}

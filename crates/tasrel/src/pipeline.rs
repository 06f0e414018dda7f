//! Release pipeline
//!
//! Orchestration only: extract the target version pair from the trigger
//! message, parse the document, link commit history for the matching
//! version and write the three artifacts plus the version info file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use thiserror::Error;
use tracing::{info, instrument, warn};

use tasrel_changelog::parser::{find_celestetas_version, find_studio_version, parse_document};
use tasrel_changelog::render::{render_gamebanana, render_version_history, GitHubRenderer};
use tasrel_github::{HistoryLinker, ReleaseHost};

/// Input-shape errors that abort the whole run
#[derive(Debug, Error)]
pub enum InputError {
    /// The trigger message lacks one of the required version tokens
    #[error("trigger message is missing the '{0} vX.Y.Z' token")]
    MissingVersionToken(&'static str),

    /// The changelog document could not be read
    #[error("failed to read changelog document at {path}: {source}")]
    UnreadableDocument {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Where the pipeline writes its artifacts
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub version_info: PathBuf,
    pub gamebanana: PathBuf,
    pub github: PathBuf,
    pub studio: PathBuf,
}

/// Run the whole pipeline.
///
/// The version history export always covers all parsed versions; the
/// GameBanana and GitHub artifacts are only written when the document has
/// an entry matching the trigger's version pair. A history linking failure
/// degrades the release body to its document-derived content.
#[instrument(skip_all)]
pub fn run<H: ReleaseHost>(
    trigger: &str,
    changelog_path: &Path,
    outputs: &OutputPaths,
    repo: &str,
    host: H,
) -> anyhow::Result<()> {
    let celestetas = find_celestetas_version(trigger)
        .ok_or(InputError::MissingVersionToken("CelesteTAS"))?;
    let studio =
        find_studio_version(trigger).ok_or(InputError::MissingVersionToken("Studio"))?;
    info!(celestetas = %celestetas, studio = %studio, "building release artifacts");

    // The version info file carries the bare versions, without the `v`
    // prefix the tokens use everywhere else
    let version_info = format!(
        "{}\n{}\n",
        celestetas.trim_start_matches('v'),
        studio.trim_start_matches('v')
    );
    fs::write(&outputs.version_info, version_info)
        .with_context(|| format!("failed to write {}", outputs.version_info.display()))?;

    let document =
        fs::read_to_string(changelog_path).map_err(|source| InputError::UnreadableDocument {
            path: changelog_path.to_path_buf(),
            source,
        })?;
    let versions = parse_document(&document);

    // The Studio export covers every parsed version, matched or not
    let history_json = render_version_history(&versions)?;
    fs::write(&outputs.studio, history_json)
        .with_context(|| format!("failed to write {}", outputs.studio.display()))?;

    let Some(version) = versions.iter().find(|v| v.matches(&celestetas, &studio)) else {
        warn!(
            celestetas = %celestetas,
            studio = %studio,
            "no changelog entry for the release, skipping update list and release body"
        );
        return Ok(());
    };

    let update_list = render_gamebanana(version)?;
    fs::write(&outputs.gamebanana, update_list)
        .with_context(|| format!("failed to write {}", outputs.gamebanana.display()))?;

    // History is optional: without it the release body is still written,
    // just without the commit details block
    let history = match HistoryLinker::new(host).link() {
        Ok(history) => Some(history),
        Err(err) => {
            warn!(error = %err, "commit history unavailable, rendering without commit details");
            None
        }
    };

    // Page images live in the repository tree at the release tag
    let image_base = format!("https://github.com/{}/raw/{}", repo, celestetas);
    let body = GitHubRenderer::new()
        .with_image_base(image_base)
        .render(version, history.as_ref());
    fs::write(&outputs.github, body)
        .with_context(|| format!("failed to write {}", outputs.github.display()))?;

    info!("release artifacts written");
    Ok(())
}

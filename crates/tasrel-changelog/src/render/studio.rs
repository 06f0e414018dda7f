//! Studio version history export
//!
//! Raw data export covering all parsed versions, consumed by the Studio
//! changelog dialog. Carries no markdown and no commit history.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::categories::Category;
use crate::error::Result;
use crate::types::{ChangeMap, Page, Version};

/// Top-level export document
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VersionHistory<'a> {
    category_names: CategoryNames,
    versions: Vec<VersionEntry<'a>>,
}

/// Section label per category key, in canonical order
struct CategoryNames;

impl Serialize for CategoryNames {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Category::ALL.len()))?;
        for category in Category::ALL {
            map.serialize_entry(category.key(), category.section_label())?;
        }
        map.end()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VersionEntry<'a> {
    celeste_tas_version: &'a str,
    studio_version: &'a str,
    pages: &'a [Page],
    changes: &'a ChangeMap,
}

impl<'a> From<&'a Version> for VersionEntry<'a> {
    fn from(version: &'a Version) -> Self {
        Self {
            celeste_tas_version: &version.celestetas_version,
            studio_version: &version.studio_version,
            pages: &version.pages,
            changes: &version.changes,
        }
    }
}

/// Render the version history export for all parsed versions
pub fn render_version_history(versions: &[Version]) -> Result<String> {
    let history = VersionHistory {
        category_names: CategoryNames,
        versions: versions.iter().map(VersionEntry::from).collect(),
    };

    debug!(version_count = versions.len(), "version history rendered");
    Ok(serde_json::to_string(&history)?)
}

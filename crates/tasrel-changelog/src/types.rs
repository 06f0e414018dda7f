//! Changelog document types

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::categories::Category;

/// Horizontal alignment of a page image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Right,
}

/// Image attached to a page of release notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Path of the image within the release's published tree
    pub source: String,
    /// Alignment next to the page text
    pub align: Align,
    /// Display width in pixels
    pub width: u32,
    /// Display height in pixels
    pub height: u32,
}

/// One prose section of a release's notes, optionally illustrated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Trimmed page text
    pub text: String,
    /// At most one image per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
}

/// Change messages grouped by category.
///
/// Always carries exactly the six canonical categories, possibly with
/// empty lists, regardless of what appeared in the source document.
/// Serializes as a JSON object keyed by category in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeMap {
    by_category: [Vec<String>; Category::ALL.len()],
}

impl ChangeMap {
    /// Create a map with all categories empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to a category, preserving insertion order
    pub fn push(&mut self, category: Category, message: impl Into<String>) {
        self.by_category[category as usize].push(message.into());
    }

    /// Messages recorded for a category
    pub fn get(&self, category: Category) -> &[String] {
        &self.by_category[category as usize]
    }

    /// Iterate all categories in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        Category::ALL
            .iter()
            .map(|&category| (category, self.get(category)))
    }
}

impl Serialize for ChangeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Category::ALL.len()))?;
        for (category, messages) in self.iter() {
            map.serialize_entry(category.key(), messages)?;
        }
        map.end()
    }
}

/// One version record parsed from the changelog document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    /// CelesteTAS version string, `v` prefix included
    pub celestetas_version: String,
    /// Studio version string, `v` prefix included
    pub studio_version: String,
    /// Pages of release notes prose, in source order
    pub pages: Vec<Page>,
    /// Change entries in source order, across categories
    pub change_list: Vec<(Category, String)>,
    /// Change entries grouped by category
    pub changes: ChangeMap,
}

impl Version {
    /// Create an empty version record
    pub fn new(celestetas_version: impl Into<String>, studio_version: impl Into<String>) -> Self {
        Self {
            celestetas_version: celestetas_version.into(),
            studio_version: studio_version.into(),
            pages: Vec::new(),
            change_list: Vec::new(),
            changes: ChangeMap::new(),
        }
    }

    /// Record a change entry in both the flat list and the category map
    pub fn push_change(&mut self, category: Category, message: impl Into<String>) {
        let message = message.into();
        self.change_list.push((category, message.clone()));
        self.changes.push(category, message);
    }

    /// Append a finished page
    pub fn push_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Check whether this record describes the given version pair
    pub fn matches(&self, celestetas_version: &str, studio_version: &str) -> bool {
        self.celestetas_version == celestetas_version && self.studio_version == studio_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_map_always_has_all_categories() {
        let map = ChangeMap::new();
        let value = serde_json::to_value(&map).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 6);
        for category in Category::ALL {
            assert!(object[category.key()].as_array().unwrap().is_empty());
        }
    }

    #[test]
    fn test_change_map_preserves_intra_category_order() {
        let mut map = ChangeMap::new();
        map.push(Category::Fix, "first");
        map.push(Category::Feature, "between");
        map.push(Category::Fix, "second");

        assert_eq!(map.get(Category::Fix), ["first", "second"]);
        assert_eq!(map.get(Category::Feature), ["between"]);
    }

    #[test]
    fn test_version_push_change_updates_both_views() {
        let mut version = Version::new("v3.43.0", "v3.8.0");
        version.push_change(Category::Fix, "Corrected off-by-one in frame counter");

        assert_eq!(
            version.change_list,
            vec![(
                Category::Fix,
                "Corrected off-by-one in frame counter".to_string()
            )]
        );
        assert_eq!(
            version.changes.get(Category::Fix),
            ["Corrected off-by-one in frame counter"]
        );
    }

    #[test]
    fn test_page_serialization_omits_missing_image() {
        let page = Page {
            text: "Hello".to_string(),
            image: None,
        };
        assert_eq!(
            serde_json::to_string(&page).unwrap(),
            r#"{"text":"Hello"}"#
        );

        let page = Page {
            text: "Hello".to_string(),
            image: Some(Image {
                source: "studio.png".to_string(),
                align: Align::Left,
                width: 300,
                height: 200,
            }),
        };
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["image"]["align"], "left");
        assert_eq!(value["image"]["width"], 300);
    }
}

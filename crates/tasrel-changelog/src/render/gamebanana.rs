//! GameBanana update list encoding
//!
//! A JSON array of `{"cat": shortLabel, "text": message}` entries in
//! document order, consumed by the upload workflow.

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::types::Version;

/// GameBanana rejects entries shorter than this
const MIN_ENTRY_LEN: usize = 10;

/// Zero-width no-break space, invisible on the update page
const FILLER: char = '\u{feff}';

/// One entry of the update list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateEntry {
    /// Short category label
    #[serde(rename = "cat")]
    pub category: String,
    /// Change message, padded to the length constraint
    pub text: String,
}

/// Render the update list for a release
pub fn render_gamebanana(version: &Version) -> Result<String> {
    let entries: Vec<UpdateEntry> = version
        .change_list
        .iter()
        .map(|(category, message)| UpdateEntry {
            category: category.short_label().to_string(),
            text: prepare_text(message),
        })
        .collect();

    debug!(entry_count = entries.len(), "update list rendered");
    Ok(serde_json::to_string(&entries)?)
}

/// Pad short messages to the minimum length and strip code spans.
///
/// Messages under 10 characters become 9 visible characters right-padded
/// with spaces plus one invisible filler, leaving the visible text
/// unchanged. Backticks become single quotes since the update page does
/// not render code spans.
fn prepare_text(message: &str) -> String {
    let mut text = message.to_string();
    if text.chars().count() < MIN_ENTRY_LEN {
        text = format!("{text:<width$}{FILLER}", width = MIN_ENTRY_LEN - 1);
    }
    text.replace('`', "'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::Category;

    #[test]
    fn test_short_message_is_padded() {
        let text = prepare_text("typo fix");
        assert_eq!(text.chars().count(), 10);
        assert_eq!(&text[..9], "typo fix ");
        assert_eq!(text.chars().last(), Some(FILLER));
    }

    #[test]
    fn test_long_message_is_unchanged() {
        let message = "A message easily above the minimum";
        assert_eq!(prepare_text(message), message);
    }

    #[test]
    fn test_boundary_message_is_unchanged() {
        let message = "exactly 10";
        assert_eq!(message.chars().count(), 10);
        assert_eq!(prepare_text(message), message);
    }

    #[test]
    fn test_backticks_become_quotes() {
        assert_eq!(
            prepare_text("Renamed `Set` to `Assign` everywhere"),
            "Renamed 'Set' to 'Assign' everywhere"
        );
    }

    #[test]
    fn test_render_uses_short_labels_and_wire_keys() {
        let mut version = Version::new("v1.0.0", "v1.0.0");
        version.push_change(Category::Fix, "Corrected off-by-one in frame counter");
        version.push_change(Category::Optimize, "Faster playback");

        let json = render_gamebanana(&version).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["cat"], "Bugfix");
        assert_eq!(value[0]["text"], "Corrected off-by-one in frame counter");
        assert_eq!(value[1]["cat"], "Optimization");
    }

    #[test]
    fn test_render_preserves_document_order_across_categories() {
        let mut version = Version::new("v1.0.0", "v1.0.0");
        version.push_change(Category::Tweak, "First entry in the document");
        version.push_change(Category::Feature, "Second entry in the document");
        version.push_change(Category::Tweak, "Third entry in the document");

        let json = render_gamebanana(&version).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["cat"], "Tweak");
        assert_eq!(value[1]["cat"], "Feature");
        assert_eq!(value[2]["cat"], "Tweak");
    }
}

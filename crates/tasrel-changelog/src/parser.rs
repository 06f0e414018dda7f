//! Changelog document parser
//!
//! Walks the raw document line by line. A header line carrying both a
//! `CelesteTAS vX.Y.Z` and a `Studio vX.Y.Z` token opens a new version;
//! everything before the first header is discarded. Within a version,
//! `- category: message` lines become change entries, `IMAGE` directives
//! attach an illustration to the open page, `---` closes the open page and
//! all other non-empty lines accumulate into it.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, instrument, warn};

use crate::categories::Category;
use crate::types::{Align, Image, Page, Version};

/// Regex for the CelesteTAS version token
static CELESTETAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"CelesteTAS\s+(v[\d.]+)").expect("Invalid regex"));

/// Regex for the Studio version token
static STUDIO_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Studio\s+(v[\d.]+)").expect("Invalid regex"));

/// Regex for a change entry, matched anywhere in the line
static CHANGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\s+([a-zA-Z]+)\s*:\s*(.+)").expect("Invalid regex"));

/// Regex for an image directive
static IMAGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^IMAGE\s+(left|right)\s+(\d+)\s+(\d+)\s+(\S+)$").expect("Invalid regex")
});

/// Find the `CelesteTAS vX.Y.Z` token in a line of text
pub fn find_celestetas_version(text: &str) -> Option<String> {
    CELESTETAS_REGEX
        .captures(text)
        .map(|caps| caps[1].to_string())
}

/// Find the `Studio vX.Y.Z` token in a line of text
pub fn find_studio_version(text: &str) -> Option<String> {
    STUDIO_REGEX.captures(text).map(|caps| caps[1].to_string())
}

/// Parse the raw changelog document into ordered version records
#[instrument(skip(text), fields(len = text.len()))]
pub fn parse_document(text: &str) -> Vec<Version> {
    let mut parser = DocumentParser::default();
    for line in text.lines() {
        parser.handle_line(line);
    }
    let versions = parser.finish();
    debug!(version_count = versions.len(), "changelog document parsed");
    versions
}

/// Line-by-line parser state
#[derive(Default)]
struct DocumentParser {
    versions: Vec<Version>,
    current_version: Option<Version>,
    current_page: Option<Page>,
}

impl DocumentParser {
    fn handle_line(&mut self, line: &str) {
        // A version header needs both tokens on the same line
        if let (Some(celestetas), Some(studio)) =
            (find_celestetas_version(line), find_studio_version(line))
        {
            self.flush_page();
            self.flush_version();
            debug!(celestetas = %celestetas, studio = %studio, "version header");
            self.current_version = Some(Version::new(celestetas, studio));
            return;
        }

        // Everything before the first header is discarded
        if self.current_version.is_none() {
            return;
        }

        if let Some(caps) = CHANGE_REGEX.captures(line) {
            self.handle_change(&caps[1], caps[2].trim());
            return;
        }

        let trimmed = line.trim();
        if trimmed.starts_with("IMAGE ") {
            self.handle_image_directive(trimmed);
            return;
        }

        if line.starts_with("---") {
            self.flush_page();
            return;
        }

        match (&mut self.current_page, trimmed.is_empty()) {
            // Blank lines inside a page keep paragraph breaks
            (Some(page), _) => {
                page.text.push('\n');
                page.text.push_str(line);
            }
            (None, false) => {
                self.current_page = Some(Page {
                    text: line.to_string(),
                    image: None,
                });
            }
            // Blank lines before any page text are skipped
            (None, true) => {}
        }
    }

    fn handle_change(&mut self, raw_category: &str, message: &str) {
        let Some(version) = self.current_version.as_mut() else {
            return;
        };

        match raw_category.parse::<Category>() {
            Ok(category) => version.push_change(category, message),
            Err(()) => warn!(
                category = %raw_category.to_lowercase(),
                message, "invalid change category, entry dropped"
            ),
        }
    }

    fn handle_image_directive(&mut self, line: &str) {
        let Some(image) = parse_image_directive(line) else {
            warn!(line, "malformed image directive, line dropped");
            return;
        };

        // The image belongs to the page being accumulated; the directive
        // does not end it
        let page = self.current_page.get_or_insert_with(Page::default);
        if page.image.is_some() {
            warn!(source = %image.source, "page already has an image, directive dropped");
        } else {
            page.image = Some(image);
        }
    }

    fn flush_page(&mut self) {
        let Some(mut page) = self.current_page.take() else {
            return;
        };
        page.text = page.text.trim().to_string();

        if let Some(version) = self.current_version.as_mut() {
            version.push_page(page);
        }
    }

    fn flush_version(&mut self) {
        if let Some(version) = self.current_version.take() {
            self.versions.push(version);
        }
    }

    fn finish(mut self) -> Vec<Version> {
        self.flush_page();
        self.flush_version();
        self.versions
    }
}

fn parse_image_directive(line: &str) -> Option<Image> {
    let caps = IMAGE_REGEX.captures(line)?;

    let align = match &caps[1] {
        "left" => Align::Left,
        _ => Align::Right,
    };
    let width = caps[2].parse().ok()?;
    let height = caps[3].parse().ok()?;

    Some(Image {
        source: caps[4].to_string(),
        align,
        width,
        height,
    })
}

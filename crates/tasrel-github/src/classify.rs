//! Conventional commit header classification
//!
//! Parses the first line of a commit message against
//! `type(scope): subject`. Anything that does not match a recognized type
//! falls back to the catch-all `commit` type with the whole line as the
//! message.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{heading_for, FALLBACK_TYPE};

/// Regex for the conventional commit header line
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>[a-zA-Z]+)\s*(?:\((?P<scope>[a-zA-Z]+)\))?\s*:\s*(?P<subject>.+)")
        .expect("Invalid regex")
});

/// Result of classifying a commit header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub commit_type: String,
    pub scope: Option<String>,
    pub message: String,
}

/// Classify the first line of a commit message
pub fn classify(message: &str) -> Classified {
    let first_line = message.lines().next().unwrap_or_default();

    if let Some(caps) = HEADER_REGEX.captures(first_line) {
        let commit_type = &caps["type"];
        if heading_for(commit_type).is_some() {
            return Classified {
                commit_type: commit_type.to_string(),
                scope: caps.name("scope").map(|m| m.as_str().to_string()),
                message: caps["subject"].to_string(),
            };
        }
    }

    Classified {
        commit_type: FALLBACK_TYPE.to_string(),
        scope: None,
        message: first_line.to_string(),
    }
}

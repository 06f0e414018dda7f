//! Canonical change categories

use serde::{Deserialize, Serialize};

/// Canonical change category of a changelog entry.
///
/// Every category carries two labels: the short tag shown in the
/// GameBanana update list and the heading of its section on the release
/// page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// New functionality
    Feature,
    /// Bug fix
    Fix,
    /// Behavior adjustment
    Tweak,
    /// Internal restructuring
    Refactor,
    /// Removed functionality
    Remove,
    /// Performance improvement
    Optimize,
}

impl Category {
    /// All categories in canonical order
    pub const ALL: [Category; 6] = [
        Self::Feature,
        Self::Fix,
        Self::Tweak,
        Self::Refactor,
        Self::Remove,
        Self::Optimize,
    ];

    /// Lowercase key used in the document grammar and JSON exports
    pub fn key(&self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Fix => "fix",
            Self::Tweak => "tweak",
            Self::Refactor => "refactor",
            Self::Remove => "remove",
            Self::Optimize => "optimize",
        }
    }

    /// Short tag label for the GameBanana update list
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::Feature => "Feature",
            Self::Fix => "Bugfix",
            Self::Tweak => "Tweak",
            Self::Refactor => "Refactor",
            Self::Remove => "Removal",
            Self::Optimize => "Optimization",
        }
    }

    /// Section heading label for the release page
    pub fn section_label(&self) -> &'static str {
        match self {
            Self::Feature => "Features",
            Self::Fix => "Bug Fixes",
            Self::Tweak => "Tweaks",
            Self::Refactor => "Refactors",
            Self::Remove => "Removals",
            Self::Optimize => "Optimizations",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feature" => Ok(Self::Feature),
            "fix" => Ok(Self::Fix),
            "tweak" => Ok(Self::Tweak),
            "refactor" => Ok(Self::Refactor),
            "remove" => Ok(Self::Remove),
            "optimize" => Ok(Self::Optimize),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_case_folds() {
        assert_eq!("fix".parse::<Category>().unwrap(), Category::Fix);
        assert_eq!("Feature".parse::<Category>().unwrap(), Category::Feature);
        assert_eq!("OPTIMIZE".parse::<Category>().unwrap(), Category::Optimize);
        assert!("bogus".parse::<Category>().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Category::Fix.short_label(), "Bugfix");
        assert_eq!(Category::Fix.section_label(), "Bug Fixes");
        assert_eq!(Category::Remove.short_label(), "Removal");
        assert_eq!(Category::Optimize.section_label(), "Optimizations");
    }

    #[test]
    fn test_canonical_order() {
        let keys: Vec<_> = Category::ALL.iter().map(Category::key).collect();
        assert_eq!(
            keys,
            vec!["feature", "fix", "tweak", "refactor", "remove", "optimize"]
        );
    }

    #[test]
    fn test_serializes_as_key() {
        assert_eq!(
            serde_json::to_string(&Category::Refactor).unwrap(),
            "\"refactor\""
        );
    }
}

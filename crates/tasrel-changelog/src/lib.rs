//! Tasrel Changelog - Changelog compilation for CelesteTAS releases
//!
//! This crate parses the hand-authored changelog document into version
//! records and renders them into the three release artifacts: the
//! GameBanana upload list, the GitHub release body and the Studio version
//! history export.

pub mod categories;
pub mod error;
pub mod parser;
pub mod render;
pub mod types;

pub use categories::Category;
pub use error::{ChangelogError, Result};
pub use parser::parse_document;
pub use types::{Align, ChangeMap, Image, Page, Version};

//! Release artifact renderers
//!
//! Three independent encodings of a release: the GameBanana update list,
//! the GitHub release body and the Studio version history export. None is
//! derived from another.

pub mod gamebanana;
pub mod github;
pub mod studio;

pub use gamebanana::render_gamebanana;
pub use github::GitHubRenderer;
pub use studio::render_version_history;

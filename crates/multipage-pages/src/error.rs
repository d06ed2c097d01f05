//! Error types for page wiring.

use multipage_urls::BindError;

/// Errors raised while assembling a multipage application.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PagesError {
	#[error(transparent)]
	Bind(#[from] BindError),

	#[error("page path registered twice: {0}")]
	DuplicatePagePath(String),

	#[error("navigation link id registered twice: {0}")]
	DuplicateLinkId(String),
}

//! Page controllers.

use multipage_urls::QueryArgs;

use crate::page::Page;

/// Navigation entry of a controller.
///
/// For example `("Metrics Viewer", "/metrics", "metrics_view")` or
/// `("Run Viewer", "/", "run_view")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkInfo {
	/// Text of the navigation tab.
	pub link_text: String,
	/// Route of the page, starting with `/`.
	pub page_path: String,
	/// Unique id of the navigation link.
	pub page_link_id: String,
}

impl LinkInfo {
	/// Creates a link entry.
	pub fn new(
		link_text: impl Into<String>,
		page_path: impl Into<String>,
		page_link_id: impl Into<String>,
	) -> Self {
		Self {
			link_text: link_text.into(),
			page_path: page_path.into(),
			page_link_id: page_link_id.into(),
		}
	}
}

/// One page of a multipage application.
pub trait Controller {
	/// Builds the page layout, initializing bound fields from `args`.
	fn layout(&self, args: &QueryArgs) -> Page;

	/// Wires the page's subscriptions. Called once, after the top layout
	/// exists.
	fn register_callbacks(&self);

	/// Returns the navigation entry for this page.
	fn link_info(&self) -> LinkInfo;
}

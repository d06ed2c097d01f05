//! Multipage application shell.
//!
//! [`MultiPageController`] turns a list of [`Controller`]s into one
//! application: a navigation bar with one tab per page, a content area that
//! follows the current location, and a shared footer.
//!
//! The location is a [`Signal`]. Setting it through
//! [`MultiPageController::navigate`] updates the pathname, which in turn
//! updates every navigation link class, and re-renders the page content.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use multipage_conf::Settings;
use multipage_urls::parse_href;

use crate::controller::{Controller, LinkInfo};
use crate::error::PagesError;
use crate::page::{IntoPage, Page, html_escape};
use crate::reactive::Signal;

/// Id of the navigation bar.
pub const NAV_BAR_ID: &str = "nav-bar";
/// Id of the content area.
pub const PAGE_CONTENT_ID: &str = "page-content";

type Controllers = Rc<Vec<Box<dyn Controller>>>;

/// Routes locations to controllers and keeps the shell in sync.
pub struct MultiPageController {
	settings: Rc<Settings>,
	ctrls: Controllers,
	error_404: Rc<Page>,
	footer: Page,
	location: Signal<Option<String>>,
	pathname: Signal<Option<String>>,
	content: Signal<Page>,
	nav_classes: IndexMap<String, Signal<String>>,
}

impl MultiPageController {
	/// Assembles the application and registers every controller's callbacks.
	///
	/// # Errors
	///
	/// Returns [`PagesError::DuplicatePagePath`] or
	/// [`PagesError::DuplicateLinkId`] when two controllers share a route or
	/// a navigation link id.
	pub fn new(
		settings: Settings,
		ctrls: Vec<Box<dyn Controller>>,
		error_404: Page,
		footer: Page,
	) -> Result<Self, PagesError> {
		let mut paths = HashSet::new();
		let mut link_ids = HashSet::new();
		for info in ctrls.iter().map(|c| c.link_info()) {
			if !paths.insert(info.page_path.clone()) {
				return Err(PagesError::DuplicatePagePath(info.page_path));
			}
			if !link_ids.insert(info.page_link_id.clone()) {
				return Err(PagesError::DuplicateLinkId(info.page_link_id));
			}
		}

		let settings = Rc::new(settings);
		let loading = Page::text(settings.loading_text.clone());
		let controller = Self {
			settings,
			ctrls: Rc::new(ctrls),
			error_404: Rc::new(error_404),
			footer,
			location: Signal::new(None),
			pathname: Signal::new(None),
			content: Signal::new(loading),
			nav_classes: IndexMap::new(),
		};
		Ok(controller.register_callbacks())
	}

	fn register_callbacks(mut self) -> Self {
		for ctrl in self.ctrls.iter() {
			let LinkInfo {
				page_path,
				page_link_id,
				..
			} = ctrl.link_info();

			let class = Signal::new(self.settings.nav_link_class(false));
			let target = class.clone();
			let settings = Rc::clone(&self.settings);
			self.pathname.subscribe(move |pathname| {
				let active = pathname.as_deref() == Some(page_path.as_str());
				target.set(settings.nav_link_class(active));
			});
			self.nav_classes.insert(page_link_id, class);

			ctrl.register_callbacks();
		}

		let pathname = self.pathname.clone();
		self.location.subscribe(move |href| {
			pathname.set(href.as_deref().map(|h| parse_href(Some(h)).path));
		});

		let ctrls = Rc::clone(&self.ctrls);
		let error_404 = Rc::clone(&self.error_404);
		let settings = Rc::clone(&self.settings);
		let content = self.content.clone();
		self.location.subscribe(move |href| {
			content.set(route(&ctrls, &error_404, &settings, href.as_deref()));
		});

		self
	}

	/// Sets the current location, updating nav links and page content.
	pub fn navigate(&self, href: Option<&str>) {
		self.location.set(href.map(str::to_string));
	}

	/// Returns the content for `href` without changing the location.
	pub fn display_page(&self, href: Option<&str>) -> Page {
		route(&self.ctrls, &self.error_404, &self.settings, href)
	}

	/// Returns the application shell with the current page content.
	pub fn serve_layout(&self) -> Page {
		let nav_tabs = self.ctrls.iter().map(|ctrl| {
			let info = ctrl.link_info();
			let class = self.nav_link_class(&info.page_link_id).unwrap_or_default();
			Page::element("li").class("nav-item").child(
				Page::element("a")
					.class(class)
					.attr("href", info.page_path)
					.id(info.page_link_id)
					.child(info.link_text),
			)
		});

		let spacer = || Page::element("br");
		Page::element("div")
			.class("container")
			.child(Page::element("h4"))
			.child(
				Page::element("ul")
					.class("nav nav-tabs")
					.id(NAV_BAR_ID)
					.children(nav_tabs),
			)
			.child(spacer())
			.child(
				Page::element("div")
					.id(PAGE_CONTENT_ID)
					.child(self.content.get()),
			)
			.children((0..6).map(|_| spacer()))
			.child(&self.footer)
			.child(spacer())
			.into_page()
	}

	/// Returns the shell followed by every page's layout built from empty
	/// arguments, so that every field id appears in one tree.
	pub fn validation_layout(&self) -> Page {
		let empty = Default::default();
		let mut children = vec![self.serve_layout()];
		children.extend(self.ctrls.iter().map(|ctrl| ctrl.layout(&empty)));
		Page::element("div").children(children).into_page()
	}

	/// Renders a complete HTML document for the current state.
	pub fn render_document(&self) -> String {
		let mut html = String::from("<!DOCTYPE html><html><head><meta charset=\"utf-8\" />");
		html.push_str("<title>");
		html.push_str(&html_escape(&self.settings.title));
		html.push_str("</title>");
		for href in &self.settings.stylesheets {
			let link = Page::element("link")
				.attr("rel", "stylesheet")
				.attr("href", href.clone())
				.into_page();
			html.push_str(&link.render_to_string());
		}
		html.push_str("</head><body>");
		html.push_str(&self.serve_layout().render_to_string());
		html.push_str("</body></html>");
		html
	}

	/// Returns the class of the navigation link `link_id`.
	pub fn nav_link_class(&self, link_id: &str) -> Option<String> {
		self.nav_classes.get(link_id).map(Signal::get)
	}

	/// Returns the route of the current location.
	pub fn pathname(&self) -> Option<String> {
		self.pathname.get()
	}

	/// Returns the current location.
	pub fn location(&self) -> Option<String> {
		self.location.get()
	}

	/// Returns the current page content.
	pub fn content(&self) -> Page {
		self.content.get()
	}

	/// Returns the navigation entries in display order.
	pub fn link_infos(&self) -> Vec<LinkInfo> {
		self.ctrls.iter().map(|c| c.link_info()).collect()
	}

	/// Returns the settings.
	pub fn settings(&self) -> &Settings {
		&self.settings
	}
}

fn route(
	ctrls: &[Box<dyn Controller>],
	error_404: &Page,
	settings: &Settings,
	href: Option<&str>,
) -> Page {
	tracing::info!(href = ?href, "Loading path");
	// The location is unknown until the client reports it.
	let Some(href) = href else {
		return Page::text(settings.loading_text.clone());
	};

	let parsed = parse_href(Some(href));
	match ctrls
		.iter()
		.find(|ctrl| ctrl.link_info().page_path == parsed.path)
	{
		Some(ctrl) => ctrl.layout(&parsed.args),
		None => {
			tracing::warn!(path = %parsed.path, "no page for path");
			error_404.clone()
		}
	}
}

impl fmt::Debug for MultiPageController {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MultiPageController")
			.field("pages", &self.link_infos())
			.field("location", &self.location.get())
			.field("nav_classes", &self.nav_classes)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use multipage_urls::QueryArgs;
	use rstest::{fixture, rstest};
	use std::cell::Cell;

	struct Static {
		info: LinkInfo,
		callbacks: Rc<Cell<usize>>,
	}

	impl Controller for Static {
		fn layout(&self, args: &QueryArgs) -> Page {
			let name = args
				.get("name")
				.and_then(|v| v.last().cloned())
				.unwrap_or_else(|| "nobody".to_string());
			Page::element("h2")
				.child(format!("{} for {}", self.info.link_text, name))
				.into_page()
		}

		fn register_callbacks(&self) {
			self.callbacks.set(self.callbacks.get() + 1);
		}

		fn link_info(&self) -> LinkInfo {
			self.info.clone()
		}
	}

	fn page(
		text: &str,
		path: &str,
		id: &str,
		callbacks: &Rc<Cell<usize>>,
	) -> Box<dyn Controller> {
		Box::new(Static {
			info: LinkInfo::new(text, path, id),
			callbacks: callbacks.clone(),
		})
	}

	#[fixture]
	fn callbacks() -> Rc<Cell<usize>> {
		Rc::new(Cell::new(0))
	}

	#[fixture]
	fn app(callbacks: Rc<Cell<usize>>) -> MultiPageController {
		MultiPageController::new(
			Settings::default(),
			vec![
				page("Home", "/", "home", &callbacks),
				page("Runs", "/runs", "runs", &callbacks),
			],
			Page::text("Not found"),
			Page::element("footer").child("bye").into_page(),
		)
		.unwrap()
	}

	#[rstest]
	fn test_new_registers_controller_callbacks(callbacks: Rc<Cell<usize>>) {
		let _app = MultiPageController::new(
			Settings::default(),
			vec![page("Home", "/", "home", &callbacks)],
			Page::empty(),
			Page::empty(),
		)
		.unwrap();
		assert_eq!(callbacks.get(), 1);
	}

	#[rstest]
	fn test_initial_state_is_loading(app: MultiPageController) {
		assert_eq!(app.content().render_to_string(), "Loading.....");
		assert_eq!(app.nav_link_class("home").as_deref(), Some("nav-link"));
		assert_eq!(app.pathname(), None);
	}

	#[rstest]
	fn test_navigate_routes_and_marks_active(app: MultiPageController) {
		app.navigate(Some("http://localhost:5000/runs?name=ada"));

		assert_eq!(app.pathname().as_deref(), Some("/runs"));
		assert_eq!(app.content().text_content(), "Runs for ada");
		assert_eq!(app.nav_link_class("runs").as_deref(), Some("nav-link active"));
		assert_eq!(app.nav_link_class("home").as_deref(), Some("nav-link"));
	}

	#[rstest]
	#[case(Some("/missing"), "Not found")]
	#[case(Some("/runs/"), "Not found")]
	#[case(None, "Loading.....")]
	fn test_fallback_content(
		app: MultiPageController,
		#[case] href: Option<&str>,
		#[case] expected: &str,
	) {
		app.navigate(Some("/"));
		app.navigate(href);
		assert_eq!(app.content().text_content(), expected);
		assert_eq!(app.nav_link_class("home").as_deref(), Some("nav-link"));
		assert_eq!(app.nav_link_class("runs").as_deref(), Some("nav-link"));
	}

	#[rstest]
	fn test_display_page_keeps_location(app: MultiPageController) {
		let page = app.display_page(Some("/?name=bob"));
		assert_eq!(page.text_content(), "Home for bob");
		assert_eq!(app.location(), None);
	}

	#[rstest]
	fn test_serve_layout_structure(app: MultiPageController) {
		app.navigate(Some("/"));
		let layout = app.serve_layout();

		let nav = layout.find_by_id(NAV_BAR_ID).unwrap();
		assert_eq!(nav.get_attr("class"), Some("nav nav-tabs"));
		assert_eq!(nav.child_views().len(), 2);

		let home = layout.find_by_id("home").unwrap();
		assert_eq!(home.get_attr("class"), Some("nav-link active"));
		assert_eq!(home.get_attr("href"), Some("/"));

		let content = layout.find_by_id(PAGE_CONTENT_ID).unwrap();
		assert_eq!(content.child_views()[0].text_content(), "Home for nobody");
		assert!(layout.text_content().ends_with("bye"));
	}

	#[rstest]
	fn test_validation_layout_contains_every_page(app: MultiPageController) {
		let text = app.validation_layout().text_content();
		assert!(text.contains("Home for nobody"));
		assert!(text.contains("Runs for nobody"));
	}

	#[rstest]
	fn test_render_document_head(app: MultiPageController) {
		let html = app.render_document();
		assert!(html.starts_with("<!DOCTYPE html>"));
		assert!(html.contains("<title>Multipage App</title>"));
		assert!(html.contains(r#"<link rel="stylesheet" href="https://maxcdn.bootstrapcdn.com"#));
		assert!(html.contains(r#"<ul class="nav nav-tabs" id="nav-bar">"#));
	}

	#[rstest]
	#[case(("/", "a"), ("/", "b"), PagesError::DuplicatePagePath("/".into()))]
	#[case(("/", "a"), ("/b", "a"), PagesError::DuplicateLinkId("a".into()))]
	fn test_duplicate_pages_are_rejected(
		callbacks: Rc<Cell<usize>>,
		#[case] first: (&str, &str),
		#[case] second: (&str, &str),
		#[case] expected: PagesError,
	) {
		let err = MultiPageController::new(
			Settings::default(),
			vec![
				page("First", first.0, first.1, &callbacks),
				page("Second", second.0, second.1, &callbacks),
			],
			Page::empty(),
			Page::empty(),
		)
		.unwrap_err();
		assert_eq!(err, expected);
		assert_eq!(callbacks.get(), 0);
	}
}

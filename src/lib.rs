//! # Multipage
//!
//! Multipage routing and URL state for reactive dashboard applications.
//!
//! An application is a list of page controllers. The current location picks
//! the page, the query string initializes the page's fields, and every field
//! change rebuilds a shareable link that restores the same view.
//!
//! ## Crates
//!
//! - [`urls`]: query-string parsing, typed value decoding, field binding and
//!   link building. Always available.
//! - [`pages`] (feature `pages`): view tree, signals, fields, [`UrlArgs`] and
//!   [`MultiPageController`].
//! - [`conf`] (feature `conf`): layered [`Settings`] from defaults, files and
//!   `MULTIPAGE_*` environment variables.
//!
//! ## Quick Example
//!
//! ```
//! use multipage::prelude::*;
//!
//! struct Cities {
//!     url_args: UrlArgs,
//!     drop: Field,
//! }
//!
//! impl Controller for Cities {
//!     fn layout(&self, args: &QueryArgs) -> Page {
//!         self.url_args.initialize_components(args);
//!         Page::element("div")
//!             .child(self.url_args.generate_link_box())
//!             .child(&self.drop)
//!             .into_page()
//!     }
//!     fn register_callbacks(&self) {
//!         self.url_args.register_callbacks();
//!     }
//!     fn link_info(&self) -> LinkInfo {
//!         LinkInfo::new("Cities", "/cities", "cities")
//!     }
//! }
//!
//! let settings = Settings::default();
//! let url_args = UrlArgs::new("cities", settings.page_url("/cities"));
//! let drop = Field::dropdown("cities/dropdown", ["LA", "NYC", "MTL"]);
//! url_args
//!     .register_component(&drop, "value", Some("LA".into()), ValueType::Str)
//!     .unwrap();
//! let link_box = url_args.link_box().clone();
//!
//! let app = MultiPageController::new(
//!     settings,
//!     vec![Box::new(Cities { url_args, drop })],
//!     Page::text("404"),
//!     Page::empty(),
//! )
//! .unwrap();
//!
//! app.navigate(Some("http://localhost:5000/cities?dropdown=NYC"));
//! assert_eq!(
//!     link_box.value(),
//!     Some(UrlValue::from("http://localhost:5000/cities?dropdown=NYC"))
//! );
//! ```

pub use multipage_urls as urls;

#[cfg(feature = "conf")]
pub use multipage_conf as conf;

#[cfg(feature = "pages")]
pub use multipage_pages as pages;

pub use multipage_urls::{
	ArgBinder, BindError, BindTarget, DecodeError, FieldBinding, ParsedRoute, QueryArgs, UrlValue,
	ValueType, build_url, parse_href, parse_query,
};

#[cfg(feature = "conf")]
pub use multipage_conf::{Settings, SettingsBuilder, SettingsError};

#[cfg(feature = "pages")]
pub use multipage_pages::{
	Controller, Field, FieldKind, FieldProp, IntoPage, LinkInfo, MultiPageController, Page,
	PageElement, PagesError, Signal, SubscriptionId, UrlArgs,
};

/// Common imports.
pub mod prelude {
	pub use crate::{
		ArgBinder, BindTarget, FieldBinding, ParsedRoute, QueryArgs, UrlValue, ValueType, build_url,
		parse_href,
	};

	#[cfg(feature = "conf")]
	pub use crate::{Settings, SettingsBuilder};

	#[cfg(feature = "pages")]
	pub use crate::{
		Controller, Field, IntoPage, LinkInfo, MultiPageController, Page, Signal, UrlArgs,
	};
}

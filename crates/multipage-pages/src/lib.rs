//! # multipage-pages
//!
//! Building blocks for multipage dashboard applications.
//!
//! - [`Page`]: renderable view tree
//! - [`Signal`]: shared value with change subscriptions
//! - [`Field`]: UI element whose properties are signals
//! - [`UrlArgs`]: keeps fields and the shareable link in sync with the URL
//! - [`Controller`] / [`MultiPageController`]: one controller per page,
//!   routed by path with a navigation bar and a not-found page
//!
//! ## Example
//!
//! ```
//! use multipage_conf::Settings;
//! use multipage_pages::{Controller, LinkInfo, MultiPageController, Page, IntoPage};
//! use multipage_urls::QueryArgs;
//!
//! struct Hello;
//!
//! impl Controller for Hello {
//!     fn layout(&self, _args: &QueryArgs) -> Page {
//!         Page::element("h2").child("Hello").into_page()
//!     }
//!     fn register_callbacks(&self) {}
//!     fn link_info(&self) -> LinkInfo {
//!         LinkInfo::new("Hello", "/", "hello")
//!     }
//! }
//!
//! let app = MultiPageController::new(
//!     Settings::default(),
//!     vec![Box::new(Hello)],
//!     Page::text("404"),
//!     Page::empty(),
//! )
//! .unwrap();
//!
//! app.navigate(Some("/"));
//! assert_eq!(app.nav_link_class("hello").as_deref(), Some("nav-link active"));
//! ```

pub mod controller;
pub mod error;
pub mod field;
pub mod multipage;
pub mod page;
pub mod reactive;
pub mod url_args;

pub use controller::{Controller, LinkInfo};
pub use error::PagesError;
pub use field::{Field, FieldKind, FieldProp};
pub use multipage::{MultiPageController, NAV_BAR_ID, PAGE_CONTENT_ID};
pub use page::{IntoPage, Page, PageElement, html_escape};
pub use reactive::{Signal, SubscriptionId};
pub use url_args::UrlArgs;

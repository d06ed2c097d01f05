//! # multipage-urls
//!
//! URL argument codec for multipage dashboard applications.
//!
//! A page registers the fields whose values should survive in its URL. On
//! navigation the href is parsed and every field receives its typed value
//! (or its default); whenever a field changes, a shareable link capturing
//! all of them is rebuilt.
//!
//! - [`parse_href`]: href → route path + multi-valued arguments
//! - [`ValueType`] / [`UrlValue`]: per-type decoding with explicit failure
//! - [`ArgBinder`]: applies decoded values onto [`BindTarget`]s
//! - [`build_url`]: ordered values → `base?key=value&...`
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use multipage_urls::{ArgBinder, BindTarget, FieldBinding, UrlValue, ValueType, parse_href};
//!
//! #[derive(Clone, Default)]
//! struct Slot(Rc<RefCell<Option<UrlValue>>>);
//!
//! impl BindTarget for Slot {
//!     fn read(&self) -> Option<UrlValue> { self.0.borrow().clone() }
//!     fn write(&self, value: Option<UrlValue>) { *self.0.borrow_mut() = value; }
//! }
//!
//! let zoom = Slot::default();
//! let mut binder = ArgBinder::new("/map");
//! binder
//!     .register(FieldBinding::new(zoom.clone(), "zoom").with_type(ValueType::Int).with_default(UrlValue::Int(4)))
//!     .unwrap();
//!
//! binder.initialize(&parse_href(Some("/map?zoom=12")).args);
//! assert_eq!(zoom.read(), Some(UrlValue::Int(12)));
//! assert_eq!(binder.shareable_url(), "/map?zoom=12");
//! ```

pub mod binder;
pub mod link;
pub mod query;
pub mod value;

pub use binder::{ArgBinder, BindError, BindTarget, FieldBinding};
pub use link::build_url;
pub use query::{ParsedRoute, QueryArgs, parse_href, parse_query};
pub use value::{DecodeError, UrlValue, ValueType, resolve};

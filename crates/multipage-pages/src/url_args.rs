//! Page state carried in the URL.
//!
//! [`UrlArgs`] wraps an [`ArgBinder`] over field properties and owns the
//! read-only link box that always shows a URL restoring the page's current
//! state.
//!
//! ```
//! use multipage_pages::{Field, UrlArgs};
//! use multipage_urls::parse_href;
//!
//! let args = UrlArgs::new("app2", "http://localhost:5000/app2");
//! let drop = Field::dropdown("app2/dropdown", ["LA", "NYC", "MTL"]);
//! args.register_component(&drop, "value", Some("LA".into()), Default::default())
//!     .unwrap();
//! args.register_callbacks();
//!
//! args.initialize_components(&parse_href(Some("/app2?dropdown=NYC")).args);
//! assert_eq!(args.current_url(), "http://localhost:5000/app2?dropdown=NYC");
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use multipage_urls::{ArgBinder, BindError, FieldBinding, QueryArgs, UrlValue, ValueType};

use crate::field::{Field, FieldProp, VALUE};
use crate::page::{IntoPage, Page};
use crate::reactive::SubscriptionId;

/// URL state manager for one page.
pub struct UrlArgs {
	id_namespace: String,
	link_box: Field,
	binder: Rc<RefCell<ArgBinder<FieldProp>>>,
	subscriptions: RefCell<Vec<(FieldProp, SubscriptionId)>>,
}

impl UrlArgs {
	/// Creates a manager whose links start with `page_path`.
	///
	/// `id_namespace` prefixes the ids of the fields on the page, e.g.
	/// `app1` for `app1/input-1`. The link box gets the id
	/// `{id_namespace}/quick-link-box`.
	pub fn new(id_namespace: impl Into<String>, page_path: impl Into<String>) -> Self {
		let id_namespace = id_namespace.into();
		let link_box = Field::read_only_input(format!("{id_namespace}/quick-link-box"));
		link_box.set_value("");
		Self {
			id_namespace,
			link_box,
			binder: Rc::new(RefCell::new(ArgBinder::new(page_path))),
			subscriptions: RefCell::new(Vec::new()),
		}
	}

	/// Binds property `prop` of `field` to the URL key [`Field::key`].
	///
	/// # Errors
	///
	/// Returns [`BindError::DuplicateKey`] if another field on this page
	/// already uses the same key.
	pub fn register_component(
		&self,
		field: &Field,
		prop: &str,
		default: Option<UrlValue>,
		value_type: ValueType,
	) -> Result<(), BindError> {
		let binding = FieldBinding::new(field.prop(prop), field.key())
			.with_type(value_type)
			.with_optional_default(default);
		self.binder.borrow_mut().register(binding)
	}

	/// Binds the `value` of `field` as a string with no default.
	pub fn register(&self, field: &Field) -> Result<(), BindError> {
		self.register_component(field, VALUE, None, ValueType::Str)
	}

	/// Writes the value resolved from `args` onto every bound field.
	pub fn initialize_components(&self, args: &QueryArgs) {
		self.binder.borrow().initialize(args);
	}

	/// Returns the link box layout.
	pub fn generate_link_box(&self) -> Page {
		Page::element("div").child(&self.link_box).into_page()
	}

	/// Keeps the link box current: every bound property change rebuilds the
	/// link. Calling it again replaces the previous subscriptions.
	pub fn register_callbacks(&self) {
		let mut subscriptions = self.subscriptions.borrow_mut();
		for (prop, id) in subscriptions.drain(..) {
			prop.unsubscribe(id);
		}

		let targets: Vec<FieldProp> = self
			.binder
			.borrow()
			.bindings()
			.iter()
			.map(|b| b.target().clone())
			.collect();

		for prop in targets {
			let binder = Rc::clone(&self.binder);
			let link_box = self.link_box.clone();
			let id = prop.subscribe(move |_| {
				let url = binder.borrow().shareable_url();
				link_box.set_value(url);
			});
			subscriptions.push((prop, id));
		}
		drop(subscriptions);

		self.link_box.set_value(self.current_url());
	}

	/// Returns the link box field.
	pub fn link_box(&self) -> &Field {
		&self.link_box
	}

	/// Builds the link for the current field values.
	pub fn current_url(&self) -> String {
		self.binder.borrow().shareable_url()
	}

	/// Returns the id namespace.
	pub fn id_namespace(&self) -> &str {
		&self.id_namespace
	}

	/// Returns the number of bound fields.
	pub fn len(&self) -> usize {
		self.binder.borrow().len()
	}

	/// Returns whether no field is bound.
	pub fn is_empty(&self) -> bool {
		self.binder.borrow().is_empty()
	}
}

impl fmt::Debug for UrlArgs {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("UrlArgs")
			.field("id_namespace", &self.id_namespace)
			.field("link_box", &self.link_box)
			.field("binder", &*self.binder.borrow())
			.finish()
	}
}

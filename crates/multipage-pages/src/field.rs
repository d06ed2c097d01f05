//! UI fields with named, observable property slots.
//!
//! A [`Field`] is a cloneable handle: layouts render it, bindings write to
//! its properties and subscribers react to them. All clones share the same
//! slots, so a value written on navigation is what the next render shows.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use multipage_urls::{BindTarget, UrlValue};

use crate::page::{IntoPage, Page};
use crate::reactive::{Signal, SubscriptionId};

/// Property holding the user-editable value.
pub const VALUE: &str = "value";
/// Property holding the rendered children of a display field.
pub const CHILDREN: &str = "children";
/// Property counting button clicks.
pub const N_CLICKS: &str = "n_clicks";

type Slot = Signal<Option<UrlValue>>;

/// What a field renders as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
	/// `<input type="text">`
	TextInput { read_only: bool },
	/// `<select>` over a fixed set of options.
	Dropdown { options: Vec<String> },
	/// `<button>`; clicks increment [`N_CLICKS`].
	Button { label: String },
	/// `<div>` showing [`CHILDREN`].
	Display,
}

struct FieldInner {
	id: String,
	kind: FieldKind,
	props: RefCell<IndexMap<String, Slot>>,
}

/// Shared handle to a UI element.
#[derive(Clone)]
pub struct Field {
	inner: Rc<FieldInner>,
}

impl Field {
	/// Creates a field with no property values.
	pub fn new(id: impl Into<String>, kind: FieldKind) -> Self {
		Self {
			inner: Rc::new(FieldInner {
				id: id.into(),
				kind,
				props: RefCell::new(IndexMap::new()),
			}),
		}
	}

	/// Creates an editable text input.
	pub fn text_input(id: impl Into<String>) -> Self {
		Self::new(id, FieldKind::TextInput { read_only: false })
	}

	/// Creates a read-only text input.
	pub fn read_only_input(id: impl Into<String>) -> Self {
		Self::new(id, FieldKind::TextInput { read_only: true })
	}

	/// Creates a dropdown over `options`.
	pub fn dropdown<I, S>(id: impl Into<String>, options: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let options = options.into_iter().map(Into::into).collect();
		Self::new(id, FieldKind::Dropdown { options })
	}

	/// Creates a button with zero clicks.
	pub fn button(id: impl Into<String>, label: impl Into<String>) -> Self {
		let field = Self::new(
			id,
			FieldKind::Button {
				label: label.into(),
			},
		);
		field.prop(N_CLICKS).write(Some(UrlValue::Int(0)));
		field
	}

	/// Creates an output area.
	pub fn display(id: impl Into<String>) -> Self {
		Self::new(id, FieldKind::Display)
	}

	/// Sets the initial [`VALUE`].
	pub fn with_value(self, value: impl Into<UrlValue>) -> Self {
		self.prop(VALUE).write(Some(value.into()));
		self
	}

	/// Returns the element id.
	pub fn id(&self) -> &str {
		&self.inner.id
	}

	/// Returns the URL key of this field: the last `/` segment of its id.
	///
	/// ```
	/// use multipage_pages::Field;
	///
	/// assert_eq!(Field::text_input("app1/input-1-state").key(), "input-1-state");
	/// assert_eq!(Field::text_input("plain").key(), "plain");
	/// ```
	pub fn key(&self) -> &str {
		self.inner.id.rsplit('/').next().unwrap_or(&self.inner.id)
	}

	/// Returns the field kind.
	pub fn kind(&self) -> &FieldKind {
		&self.inner.kind
	}

	/// Returns the property slot `name`, creating an empty one on first use.
	pub fn prop(&self, name: &str) -> FieldProp {
		let signal = self
			.inner
			.props
			.borrow_mut()
			.entry(name.to_string())
			.or_insert_with(|| Signal::new(None))
			.clone();
		FieldProp {
			field_id: self.inner.id.clone(),
			name: name.to_string(),
			signal,
		}
	}

	/// Returns the current [`VALUE`].
	pub fn value(&self) -> Option<UrlValue> {
		self.prop(VALUE).read()
	}

	/// Sets [`VALUE`] as a user edit would.
	pub fn set_value(&self, value: impl Into<UrlValue>) {
		self.prop(VALUE).write(Some(value.into()));
	}

	/// Returns the current [`CHILDREN`] as text.
	pub fn text(&self) -> String {
		self.prop(CHILDREN)
			.read()
			.map(|v| v.to_string())
			.unwrap_or_default()
	}

	/// Returns the click count of a button.
	pub fn clicks(&self) -> i64 {
		match self.prop(N_CLICKS).read() {
			Some(UrlValue::Int(n)) => n,
			_ => 0,
		}
	}

	/// Records a click, incrementing [`N_CLICKS`].
	pub fn click(&self) {
		let clicks = self.clicks();
		self.prop(N_CLICKS).write(Some(UrlValue::Int(clicks + 1)));
	}

	/// Renders the field with its current property values.
	pub fn render(&self) -> Page {
		let value = self.value();
		match self.kind() {
			FieldKind::TextInput { read_only } => Page::element("input")
				.id(self.id().to_string())
				.attr("type", "text")
				.attr("value", value.map(|v| v.to_string()).unwrap_or_default())
				.bool_attr("readonly", *read_only)
				.into_page(),
			FieldKind::Dropdown { options } => {
				let selected = |option: &str| match &value {
					Some(UrlValue::StrList(items)) => items.iter().any(|i| i == option),
					Some(other) => other.to_string() == option,
					None => false,
				};
				Page::element("select")
					.id(self.id().to_string())
					.children(options.iter().map(|option| {
						Page::element("option")
							.attr("value", option.clone())
							.bool_attr("selected", selected(option.as_str()))
							.child(option.clone())
					}))
					.into_page()
			}
			FieldKind::Button { label } => Page::element("button")
				.id(self.id().to_string())
				.child(label.clone())
				.into_page(),
			FieldKind::Display => Page::element("div")
				.id(self.id().to_string())
				.child(self.text())
				.into_page(),
		}
	}
}

impl IntoPage for &Field {
	fn into_page(self) -> Page {
		self.render()
	}
}

impl IntoPage for Field {
	fn into_page(self) -> Page {
		self.render()
	}
}

impl fmt::Debug for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Field")
			.field("id", &self.inner.id)
			.field("kind", &self.inner.kind)
			.finish()
	}
}

/// One named property of a field.
#[derive(Clone)]
pub struct FieldProp {
	field_id: String,
	name: String,
	signal: Slot,
}

impl FieldProp {
	/// Returns the id of the owning field.
	pub fn field_id(&self) -> &str {
		&self.field_id
	}

	/// Returns the property name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Runs `f` whenever the property changes.
	pub fn subscribe(&self, f: impl Fn(&Option<UrlValue>) + 'static) -> SubscriptionId {
		self.signal.subscribe(f)
	}

	/// Removes a subscription added with [`FieldProp::subscribe`].
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		self.signal.unsubscribe(id)
	}

	/// Returns the underlying signal.
	pub fn signal(&self) -> &Signal<Option<UrlValue>> {
		&self.signal
	}
}

impl BindTarget for FieldProp {
	fn read(&self) -> Option<UrlValue> {
		self.signal.get()
	}

	fn write(&self, value: Option<UrlValue>) {
		self.signal.set(value);
	}
}

impl fmt::Debug for FieldProp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "FieldProp({}.{})", self.field_id, self.name)
	}
}

//! Binding query arguments onto UI fields.
//!
//! An [`ArgBinder`] owns the ordered list of [`FieldBinding`]s for one page.
//! On navigation, [`ArgBinder::initialize`] writes the resolved value of
//! every binding onto its target; whenever a field changes,
//! [`ArgBinder::shareable_url`] rebuilds the link that restores the page.

use std::fmt;

use crate::link::build_url;
use crate::query::QueryArgs;
use crate::value::{UrlValue, ValueType, resolve};

/// A settable value slot that a binding reads from and writes to.
pub trait BindTarget {
	/// Returns the slot's current value.
	fn read(&self) -> Option<UrlValue>;

	/// Replaces the slot's value.
	fn write(&self, value: Option<UrlValue>);
}

/// Errors raised while registering bindings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
	/// Another binding on the same page already uses this key.
	#[error("duplicate URL argument key: {0}")]
	DuplicateKey(String),
}

/// Links a field slot to a query key, a value type and a default.
#[derive(Clone)]
pub struct FieldBinding<T> {
	target: T,
	source_key: String,
	value_type: ValueType,
	default: Option<UrlValue>,
}

impl<T> FieldBinding<T> {
	/// Creates a string binding with no default.
	pub fn new(target: T, source_key: impl Into<String>) -> Self {
		Self {
			target,
			source_key: source_key.into(),
			value_type: ValueType::Str,
			default: None,
		}
	}

	/// Sets how the query argument is decoded.
	pub fn with_type(mut self, value_type: ValueType) -> Self {
		self.value_type = value_type;
		self
	}

	/// Sets the value used when the key is absent or fails to decode.
	pub fn with_default(mut self, default: impl Into<UrlValue>) -> Self {
		self.default = Some(default.into());
		self
	}

	/// Sets or clears the default value.
	pub fn with_optional_default(mut self, default: Option<UrlValue>) -> Self {
		self.default = default;
		self
	}

	/// Returns the query key.
	pub fn source_key(&self) -> &str {
		&self.source_key
	}

	/// Returns the declared value type.
	pub fn value_type(&self) -> ValueType {
		self.value_type
	}

	/// Returns the default value.
	pub fn default_value(&self) -> Option<&UrlValue> {
		self.default.as_ref()
	}

	/// Returns the bound target.
	pub fn target(&self) -> &T {
		&self.target
	}
}

impl<T: BindTarget> FieldBinding<T> {
	/// Resolves this binding against `args` and writes the result.
	pub fn apply(&self, args: &QueryArgs) {
		let raw = args.get(&self.source_key).map(Vec::as_slice);
		let value = resolve(&self.source_key, self.value_type, raw, self.default.as_ref());
		self.target.write(value);
	}
}

impl<T> fmt::Debug for FieldBinding<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FieldBinding")
			.field("source_key", &self.source_key)
			.field("value_type", &self.value_type)
			.field("default", &self.default)
			.finish()
	}
}

/// The ordered set of bindings for one page.
pub struct ArgBinder<T> {
	base_path: String,
	bindings: Vec<FieldBinding<T>>,
}

impl<T> ArgBinder<T> {
	/// Creates an empty binder whose links start with `base_path`.
	pub fn new(base_path: impl Into<String>) -> Self {
		Self {
			base_path: base_path.into(),
			bindings: Vec::new(),
		}
	}

	/// Adds a binding.
	///
	/// # Errors
	///
	/// Returns [`BindError::DuplicateKey`] if a binding with the same key is
	/// already registered; the binder is left unchanged.
	pub fn register(&mut self, binding: FieldBinding<T>) -> Result<(), BindError> {
		if self.contains_key(binding.source_key()) {
			return Err(BindError::DuplicateKey(binding.source_key));
		}
		tracing::debug!(
			key = %binding.source_key,
			value_type = %binding.value_type,
			"registered URL argument"
		);
		self.bindings.push(binding);
		Ok(())
	}

	/// Returns whether a binding uses `key`.
	pub fn contains_key(&self, key: &str) -> bool {
		self.bindings.iter().any(|b| b.source_key == key)
	}

	/// Returns the bindings in registration order.
	pub fn bindings(&self) -> &[FieldBinding<T>] {
		&self.bindings
	}

	/// Returns the link prefix.
	pub fn base_path(&self) -> &str {
		&self.base_path
	}

	/// Returns the number of bindings.
	pub fn len(&self) -> usize {
		self.bindings.len()
	}

	/// Returns whether no binding is registered.
	pub fn is_empty(&self) -> bool {
		self.bindings.is_empty()
	}
}

impl<T: BindTarget> ArgBinder<T> {
	/// Writes the resolved value of every binding onto its target.
	///
	/// Missing keys and undecodable values fall back to each binding's default.
	pub fn initialize(&self, args: &QueryArgs) {
		for binding in &self.bindings {
			binding.apply(args);
		}
	}

	/// Reads the current value of every binding, in registration order.
	pub fn current_values(&self) -> Vec<(&str, Option<UrlValue>)> {
		self.bindings
			.iter()
			.map(|b| (b.source_key(), b.target.read()))
			.collect()
	}

	/// Builds the link that restores every bound value.
	pub fn shareable_url(&self) -> String {
		let values = self.current_values();
		build_url(
			&self.base_path,
			values.iter().map(|(key, value)| (*key, value.as_ref())),
		)
	}
}

impl<T> fmt::Debug for ArgBinder<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ArgBinder")
			.field("base_path", &self.base_path)
			.field("bindings", &self.bindings)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::query::parse_href;
	use rstest::{fixture, rstest};
	use std::cell::RefCell;
	use std::rc::Rc;

	#[derive(Clone, Default)]
	struct Slot(Rc<RefCell<Option<UrlValue>>>);

	impl BindTarget for Slot {
		fn read(&self) -> Option<UrlValue> {
			self.0.borrow().clone()
		}

		fn write(&self, value: Option<UrlValue>) {
			*self.0.borrow_mut() = value;
		}
	}

	#[fixture]
	fn slots() -> (Slot, Slot, Slot) {
		(Slot::default(), Slot::default(), Slot::default())
	}

	#[rstest]
	fn test_duplicate_key_is_rejected(slots: (Slot, Slot, Slot)) {
		let (a, b, _) = slots;
		let mut binder = ArgBinder::new("/p");
		binder.register(FieldBinding::new(a, "city")).unwrap();

		let err = binder.register(FieldBinding::new(b, "city")).unwrap_err();
		assert_eq!(err, BindError::DuplicateKey("city".to_string()));
		assert_eq!(binder.len(), 1);
	}

	#[rstest]
	fn test_initialize_writes_resolved_values(slots: (Slot, Slot, Slot)) {
		let (city, ratio, tags) = slots;
		let mut binder = ArgBinder::new("/p");
		binder
			.register(FieldBinding::new(city.clone(), "city").with_default("LA"))
			.unwrap();
		binder
			.register(
				FieldBinding::new(ratio.clone(), "ratio")
					.with_type(ValueType::Float)
					.with_default(UrlValue::Float(3.5)),
			)
			.unwrap();
		binder
			.register(FieldBinding::new(tags.clone(), "tag").with_type(ValueType::StrList))
			.unwrap();

		let route = parse_href(Some("/p?ratio=notanumber&tag=a&tag=b"));
		binder.initialize(&route.args);

		assert_eq!(city.read(), Some(UrlValue::from("LA")));
		assert_eq!(ratio.read(), Some(UrlValue::Float(3.5)));
		assert_eq!(
			tags.read(),
			Some(UrlValue::StrList(vec!["a".to_string(), "b".to_string()]))
		);
	}

	#[rstest]
	fn test_initialize_overwrites_previous_values(slots: (Slot, Slot, Slot)) {
		let (city, _, _) = slots;
		city.write(Some(UrlValue::from("stale")));
		let mut binder = ArgBinder::new("/p");
		binder.register(FieldBinding::new(city.clone(), "city")).unwrap();

		binder.initialize(&QueryArgs::new());
		assert_eq!(city.read(), None);
	}

	#[rstest]
	fn test_shareable_url_skips_missing_values(slots: (Slot, Slot, Slot)) {
		let (a, b, c) = slots;
		let mut binder = ArgBinder::new("http://localhost:5000/app");
		binder.register(FieldBinding::new(a.clone(), "a")).unwrap();
		binder.register(FieldBinding::new(b, "b")).unwrap();
		binder.register(FieldBinding::new(c.clone(), "c")).unwrap();

		a.write(Some(UrlValue::from("x y")));
		c.write(Some(UrlValue::Int(3)));

		assert_eq!(binder.shareable_url(), "http://localhost:5000/app?a=x+y&c=3");
	}
}

//! View tree and server-side rendering.
//!
//! [`Page`] is the renderable content of a layout: elements, text,
//! fragments or nothing. Layouts are rebuilt on every navigation, so the
//! tree holds plain data and is cheap to clone into a signal.

use std::borrow::Cow;

/// Renderable content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Page {
	/// An HTML element.
	Element(PageElement),
	/// A text node (escaped on render).
	Text(Cow<'static, str>),
	/// Several nodes without a wrapper element.
	Fragment(Vec<Page>),
	/// Nothing.
	#[default]
	Empty,
}

/// An HTML element with attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageElement {
	tag: Cow<'static, str>,
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	children: Vec<Page>,
	is_void: bool,
}

impl PageElement {
	/// Creates an element.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		let tag = tag.into();
		let is_void = VOID_ELEMENTS.contains(&tag.as_ref());
		Self {
			tag,
			attrs: Vec::new(),
			children: Vec::new(),
			is_void,
		}
	}

	/// Adds an attribute.
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Adds a boolean attribute when `value` is true (`readonly="readonly"`).
	pub fn bool_attr(self, name: &'static str, value: bool) -> Self {
		if value { self.attr(name, name) } else { self }
	}

	/// Sets the `id` attribute.
	pub fn id(self, id: impl Into<Cow<'static, str>>) -> Self {
		self.attr("id", id)
	}

	/// Sets the `class` attribute.
	pub fn class(self, class: impl Into<Cow<'static, str>>) -> Self {
		self.attr("class", class)
	}

	/// Adds a child.
	pub fn child(mut self, child: impl IntoPage) -> Self {
		self.children.push(child.into_page());
		self
	}

	/// Adds several children.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoPage>) -> Self {
		self.children
			.extend(children.into_iter().map(IntoPage::into_page));
		self
	}

	/// Returns the tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Returns the attributes in insertion order.
	pub fn attrs(&self) -> &[(Cow<'static, str>, Cow<'static, str>)] {
		&self.attrs
	}

	/// Returns the value of the first attribute named `name`.
	pub fn get_attr(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.as_ref())
	}

	/// Returns the children.
	pub fn child_views(&self) -> &[Page] {
		&self.children
	}

	/// Returns whether this element has no closing tag.
	pub fn is_void(&self) -> bool {
		self.is_void
	}
}

const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
	"wbr",
];

impl Page {
	/// Creates an element.
	pub fn element(tag: impl Into<Cow<'static, str>>) -> PageElement {
		PageElement::new(tag)
	}

	/// Creates a text node.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(content.into())
	}

	/// Creates a fragment.
	pub fn fragment(children: impl IntoIterator<Item = impl IntoPage>) -> Self {
		Self::Fragment(children.into_iter().map(IntoPage::into_page).collect())
	}

	/// Creates an empty page.
	pub fn empty() -> Self {
		Self::Empty
	}

	/// Finds the first element with the given `id`, depth first.
	pub fn find_by_id(&self, id: &str) -> Option<&PageElement> {
		match self {
			Page::Element(el) => {
				if el.get_attr("id") == Some(id) {
					return Some(el);
				}
				el.child_views().iter().find_map(|c| c.find_by_id(id))
			}
			Page::Fragment(children) => children.iter().find_map(|c| c.find_by_id(id)),
			Page::Text(_) | Page::Empty => None,
		}
	}

	/// Returns the concatenated text content, unescaped.
	pub fn text_content(&self) -> String {
		let mut out = String::new();
		self.collect_text(&mut out);
		out
	}

	fn collect_text(&self, out: &mut String) {
		match self {
			Page::Element(el) => el.child_views().iter().for_each(|c| c.collect_text(out)),
			Page::Text(text) => out.push_str(text),
			Page::Fragment(children) => children.iter().for_each(|c| c.collect_text(out)),
			Page::Empty => {}
		}
	}

	/// Renders the tree to an HTML string.
	pub fn render_to_string(&self) -> String {
		let mut output = String::new();
		self.render_into(&mut output);
		output
	}

	fn render_into(&self, output: &mut String) {
		match self {
			Page::Element(el) => {
				output.push('<');
				output.push_str(el.tag_name());

				for (name, value) in el.attrs() {
					output.push(' ');
					output.push_str(name);
					output.push_str("=\"");
					output.push_str(&html_escape(value));
					output.push('"');
				}

				if el.is_void() {
					output.push_str(" />");
				} else {
					output.push('>');
					for child in el.child_views() {
						child.render_into(output);
					}
					output.push_str("</");
					output.push_str(el.tag_name());
					output.push('>');
				}
			}
			Page::Text(text) => output.push_str(&html_escape(text)),
			Page::Fragment(children) => {
				for child in children {
					child.render_into(output);
				}
			}
			Page::Empty => {}
		}
	}
}

/// Escapes `& < > " '` for text and attribute values.
pub fn html_escape(s: &str) -> Cow<'_, str> {
	if !s.contains(['&', '<', '>', '"', '\'']) {
		return Cow::Borrowed(s);
	}
	let mut escaped = String::with_capacity(s.len() + 8);
	for c in s.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#x27;"),
			_ => escaped.push(c),
		}
	}
	Cow::Owned(escaped)
}

/// Conversion into renderable content.
pub trait IntoPage {
	/// Converts self into a [`Page`].
	fn into_page(self) -> Page;
}

impl IntoPage for Page {
	fn into_page(self) -> Page {
		self
	}
}

impl IntoPage for &Page {
	fn into_page(self) -> Page {
		self.clone()
	}
}

impl IntoPage for PageElement {
	fn into_page(self) -> Page {
		Page::Element(self)
	}
}

impl IntoPage for String {
	fn into_page(self) -> Page {
		Page::Text(Cow::Owned(self))
	}
}

impl IntoPage for &'static str {
	fn into_page(self) -> Page {
		Page::Text(Cow::Borrowed(self))
	}
}

impl<T: IntoPage> IntoPage for Option<T> {
	fn into_page(self) -> Page {
		self.map_or(Page::Empty, IntoPage::into_page)
	}
}

impl<T: IntoPage> IntoPage for Vec<T> {
	fn into_page(self) -> Page {
		Page::fragment(self)
	}
}

impl IntoPage for () {
	fn into_page(self) -> Page {
		Page::Empty
	}
}

impl<A: IntoPage, B: IntoPage> IntoPage for (A, B) {
	fn into_page(self) -> Page {
		Page::Fragment(vec![self.0.into_page(), self.1.into_page()])
	}
}

impl<A: IntoPage, B: IntoPage, C: IntoPage> IntoPage for (A, B, C) {
	fn into_page(self) -> Page {
		Page::Fragment(vec![
			self.0.into_page(),
			self.1.into_page(),
			self.2.into_page(),
		])
	}
}

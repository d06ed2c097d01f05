//! Page two: a city dropdown and a line echoing the selection.

use multipage::BindError;
use multipage::pages::field::{CHILDREN, VALUE};
use multipage::prelude::*;

pub const CITIES: [&str; 3] = ["LA", "NYC", "MTL"];

pub struct App2 {
	url_args: UrlArgs,
	drop: Field,
	display: Field,
}

impl App2 {
	pub fn new(settings: &Settings) -> Result<Self, BindError> {
		let info = Self::info();
		let ns = info.page_link_id;
		let url_args = UrlArgs::new(ns.as_str(), settings.page_url(&info.page_path));

		let drop = Field::dropdown(format!("{ns}/dropdown"), CITIES);
		url_args.register_component(&drop, VALUE, Some("LA".into()), ValueType::Str)?;
		let display = Field::display(format!("{ns}/display-value"));

		Ok(Self {
			url_args,
			drop,
			display,
		})
	}

	fn info() -> LinkInfo {
		LinkInfo::new("App2", "/app2", "app2")
	}

	/// Every field on the page, link box included.
	pub fn fields(&self) -> Vec<Field> {
		vec![
			self.url_args.link_box().clone(),
			self.drop.clone(),
			self.display.clone(),
		]
	}
}

impl Controller for App2 {
	fn layout(&self, args: &QueryArgs) -> Page {
		self.url_args.initialize_components(args);
		Page::element("div")
			.child(Page::element("h2").child("Page 2"))
			.child(self.url_args.generate_link_box())
			.child(&self.drop)
			.child(&self.display)
			.into_page()
	}

	fn register_callbacks(&self) {
		self.url_args.register_callbacks();

		let display = self.display.clone();
		self.drop.prop(VALUE).subscribe(move |value| {
			tracing::debug!(value = ?value, "dropdown changed");
			let selected = value.as_ref().map(ToString::to_string).unwrap_or_default();
			display
				.prop(CHILDREN)
				.write(Some(format!("You have selected \"{selected}\"").into()));
		});
	}

	fn link_info(&self) -> LinkInfo {
		Self::info()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("/app2", "LA")]
	#[case("/app2?dropdown=NYC", "NYC")]
	#[case("/app2?dropdown=LA&dropdown=MTL", "MTL")]
	fn test_selection_from_url(#[case] href: &str, #[case] expected: &str) {
		let app = App2::new(&Settings::default()).unwrap();
		app.register_callbacks();
		app.layout(&parse_href(Some(href)).args);

		assert_eq!(app.drop.value(), Some(UrlValue::from(expected)));
		assert_eq!(app.display.text(), format!("You have selected \"{expected}\""));
		assert_eq!(
			app.url_args.current_url(),
			format!("http://localhost:5000/app2?dropdown={expected}")
		);
	}
}

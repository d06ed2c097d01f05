//! Page one: two text inputs, a submit button and an output line.

use multipage::BindError;
use multipage::pages::field::{CHILDREN, N_CLICKS, VALUE};
use multipage::prelude::*;

pub struct App1 {
	url_args: UrlArgs,
	input1: Field,
	input2: Field,
	button: Field,
	output: Field,
}

impl App1 {
	pub fn new(settings: &Settings) -> Result<Self, BindError> {
		let info = Self::info();
		let ns = info.page_link_id;
		let url_args = UrlArgs::new(ns.as_str(), settings.page_url(&info.page_path));

		let input1 = Field::text_input(format!("{ns}/input-1-state")).with_value("Montreal");
		let input2 = Field::text_input(format!("{ns}/input-2-state")).with_value("Canada");
		url_args.register_component(&input1, VALUE, Some("Montreal".into()), ValueType::Str)?;
		url_args.register_component(&input2, VALUE, Some("Canada".into()), ValueType::Str)?;

		let button = Field::button(format!("{ns}/submit-button"), "Submit");
		let output = Field::display(format!("{ns}/output-state"));

		Ok(Self {
			url_args,
			input1,
			input2,
			button,
			output,
		})
	}

	fn info() -> LinkInfo {
		LinkInfo::new("App1", "/", "app1")
	}

	/// Every field on the page, link box included.
	pub fn fields(&self) -> Vec<Field> {
		vec![
			self.url_args.link_box().clone(),
			self.input1.clone(),
			self.input2.clone(),
			self.button.clone(),
			self.output.clone(),
		]
	}
}

impl Controller for App1 {
	fn layout(&self, args: &QueryArgs) -> Page {
		self.url_args.initialize_components(args);
		Page::element("div")
			.child(Page::element("h2").child("Page 1"))
			.child(self.url_args.generate_link_box())
			.child(&self.input1)
			.child(&self.input2)
			.child(&self.button)
			.child(&self.output)
			.into_page()
	}

	fn register_callbacks(&self) {
		self.url_args.register_callbacks();

		// Inputs are read when the button fires, not on every edit.
		let input1 = self.input1.clone();
		let input2 = self.input2.clone();
		let output = self.output.clone();
		self.button.prop(N_CLICKS).subscribe(move |clicks| {
			let clicks = clicks.as_ref().map(ToString::to_string).unwrap_or_default();
			write_report(&output, &clicks, &input1, &input2);
		});
		let clicks = self.button.clicks().to_string();
		write_report(&self.output, &clicks, &self.input1, &self.input2);
	}

	fn link_info(&self) -> LinkInfo {
		Self::info()
	}
}

fn write_report(output: &Field, clicks: &str, input1: &Field, input2: &Field) {
	let text = format!(
		"The Button has been pressed {clicks} times, Input 1 is \"{}\", and Input 2 is \"{}\"",
		input1.value().map(|v| v.to_string()).unwrap_or_default(),
		input2.value().map(|v| v.to_string()).unwrap_or_default(),
	);
	output.prop(CHILDREN).write(Some(text.into()));
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_submit_reports_inputs() {
		let app = App1::new(&Settings::default()).unwrap();
		app.register_callbacks();
		app.layout(&parse_href(Some("/?input-1-state=Paris")).args);

		app.input2.set_value("France");
		assert_eq!(
			app.output.text(),
			"The Button has been pressed 0 times, Input 1 is \"Montreal\", and Input 2 is \"Canada\""
		);

		app.button.click();
		assert_eq!(
			app.output.text(),
			"The Button has been pressed 1 times, Input 1 is \"Paris\", and Input 2 is \"France\""
		);
	}

	#[rstest]
	fn test_output_filled_before_first_click() {
		let app = App1::new(&Settings::default()).unwrap();
		assert_eq!(app.output.text(), "");

		app.register_callbacks();
		assert_eq!(
			app.output.text(),
			"The Button has been pressed 0 times, Input 1 is \"Montreal\", and Input 2 is \"Canada\""
		);
	}

	#[rstest]
	fn test_defaults_restore_initial_values() {
		let app = App1::new(&Settings::default()).unwrap();
		app.register_callbacks();
		app.layout(&QueryArgs::new());

		assert_eq!(
			app.url_args.current_url(),
			"http://localhost:5000/?input-1-state=Montreal&input-2-state=Canada"
		);
	}
}

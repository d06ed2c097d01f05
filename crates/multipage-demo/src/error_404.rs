use multipage::prelude::*;

const CATS: &str = "http://thecatapi.com/api/images/get?format=src&type=gif";

/// Content for routes no page claims.
pub fn render_404() -> Page {
	Page::element("div")
		.attr("style", "text-align: center")
		.child(
			Page::element("img")
				.id("sbpla_cats")
				.attr("src", CATS)
				.attr("width", "100%")
				.attr("style", "margin-top: 10px; margin-bottom: 20px"),
		)
		.child(Page::element("br"))
		.child(Page::element("h3").child("404 - No Content Available."))
		.into_page()
}

use multipage::prelude::*;

/// Footer shown under every page.
pub fn render_footer() -> Page {
	Page::element("footer")
		.class("page-footer")
		.attr(
			"style",
			"text-align: center; position: absolute; bottom: 0; width: 100%; padding: 60px 15px 0",
		)
		.child(
			Page::element("div")
				.id("footer-copyright")
				.class("container-fluid text-center")
				.child(
					Page::element("span")
						.class("text-muted")
						.child("Copyright © 2019 Jonathan Diamond"),
				)
				.child(Page::element("h5")),
		)
		.into_page()
}

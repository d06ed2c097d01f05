//! Href parsing.
//!
//! An href such as `http://localhost:5000/app2?city=LA&tag=a&tag=b#top` is
//! split into the route path (`/app2`) and a multi-valued argument mapping
//! (`city: [LA]`, `tag: [a, b]`).

use indexmap::IndexMap;
use url::{Url, form_urlencoded};

/// Query arguments: each key maps to its values in order of appearance.
pub type QueryArgs = IndexMap<String, Vec<String>>;

/// A parsed navigation target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRoute {
	/// The route path, without query or fragment.
	pub path: String,
	/// The decoded query arguments.
	pub args: QueryArgs,
}

impl ParsedRoute {
	/// Returns the values for a key, if present.
	pub fn get(&self, key: &str) -> Option<&[String]> {
		self.args.get(key).map(Vec::as_slice)
	}

	/// Splits the route into its parts.
	pub fn into_parts(self) -> (String, QueryArgs) {
		(self.path, self.args)
	}
}

/// Base that relative hrefs are resolved against.
const RELATIVE_BASE: &str = "http://localhost/";

/// Parses an href into its route path and query arguments.
///
/// `None` and the empty string both yield an empty path and no arguments.
/// Absolute hrefs are parsed as URLs; anything else is resolved against
/// `http://localhost/`, so the path follows the same normalization a
/// browser location reports (`/a/../b` is `/b`, a bare host is `/`).
///
/// Parsing never fails: an href that is not a valid URL yields an empty
/// route, undecodable query bytes are replaced and pairs with an empty
/// value are dropped.
///
/// # Example
///
/// ```
/// use multipage_urls::parse_href;
///
/// let route = parse_href(Some("/app2?tag=a&tag=b&city=New+York"));
/// assert_eq!(route.path, "/app2");
/// assert_eq!(route.args["tag"], vec!["a", "b"]);
/// assert_eq!(route.args["city"], vec!["New York"]);
/// ```
pub fn parse_href(href: Option<&str>) -> ParsedRoute {
	let href = match href {
		Some(href) if !href.is_empty() => href,
		_ => return ParsedRoute::default(),
	};

	match to_url(href) {
		Ok(url) => ParsedRoute {
			path: url.path().to_string(),
			args: url.query().map(parse_query).unwrap_or_default(),
		},
		Err(err) => {
			tracing::debug!(href, error = %err, "unparseable href");
			ParsedRoute::default()
		}
	}
}

fn to_url(href: &str) -> Result<Url, url::ParseError> {
	match Url::parse(href) {
		Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(RELATIVE_BASE)?.join(href),
		parsed => parsed,
	}
}

/// Decodes an `application/x-www-form-urlencoded` query string.
///
/// Repeated keys accumulate in order; pairs with an empty value are skipped.
pub fn parse_query(query: &str) -> QueryArgs {
	let mut args = QueryArgs::new();
	for (key, value) in form_urlencoded::parse(query.as_bytes()) {
		if value.is_empty() {
			continue;
		}
		args.entry(key.into_owned())
			.or_default()
			.push(value.into_owned());
	}
	args
}

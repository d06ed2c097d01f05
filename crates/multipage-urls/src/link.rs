//! Shareable link generation.

use url::form_urlencoded;

use crate::value::UrlValue;

/// Builds `base_path?query` from ordered `(key, value)` pairs.
///
/// `None` values are skipped, list values expand into one pair per element.
/// The `?` separator is always present, even when no pair survives.
///
/// # Example
///
/// ```
/// use multipage_urls::{UrlValue, build_url};
///
/// let tags = UrlValue::StrList(vec!["a".into(), "b".into()]);
/// let city = UrlValue::from("New York");
/// let url = build_url(
///     "http://localhost:5000/app2",
///     [("city", Some(&city)), ("missing", None), ("tag", Some(&tags))],
/// );
/// assert_eq!(url, "http://localhost:5000/app2?city=New+York&tag=a&tag=b");
/// ```
pub fn build_url<'a, K, I>(base_path: &str, pairs: I) -> String
where
	K: AsRef<str>,
	I: IntoIterator<Item = (K, Option<&'a UrlValue>)>,
{
	let mut serializer = form_urlencoded::Serializer::new(String::new());
	for (key, value) in pairs {
		let Some(value) = value else {
			continue;
		};
		for item in value.to_query_values() {
			serializer.append_pair(key.as_ref(), &item);
		}
	}
	format!("{}?{}", base_path, serializer.finish())
}

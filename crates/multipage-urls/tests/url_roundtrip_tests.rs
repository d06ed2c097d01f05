//! Round-trip tests for the URL argument codec.
//!
//! Values written with the link builder must come back unchanged through
//! the href parser and the value codec.

use multipage_urls::{UrlValue, ValueType, build_url, parse_href, resolve};
use proptest::prelude::*;
use rstest::rstest;
use serde_json::json;

// Non-empty values only: blank pairs are dropped by the parser.
fn value_strategy() -> impl Strategy<Value = String> {
	"[a-zA-Z0-9 &=?#%+/'\"é-]{1,12}"
}

fn key_strategy() -> impl Strategy<Value = String> {
	"[a-z][a-z0-9_-]{0,8}"
}

proptest! {
	#[test]
	fn prop_path_without_query_has_no_args(path in "(/[a-z0-9_-]{1,8}){1,3}/?") {
		let route = parse_href(Some(&path));
		prop_assert_eq!(route.path, path);
		prop_assert!(route.args.is_empty());
	}

	#[test]
	fn prop_scalar_round_trip(
		pairs in proptest::collection::btree_map(key_strategy(), value_strategy(), 0..6)
	) {
		let values: Vec<(String, UrlValue)> = pairs
			.iter()
			.map(|(k, v)| (k.clone(), UrlValue::Str(v.clone())))
			.collect();
		let url = build_url(
			"http://localhost:5000/page",
			values.iter().map(|(k, v)| (k.as_str(), Some(v))),
		);

		let route = parse_href(Some(&url));
		prop_assert_eq!(route.path.as_str(), "/page");
		prop_assert_eq!(route.args.len(), pairs.len());
		for (key, value) in &pairs {
			prop_assert_eq!(route.args.get(key), Some(&vec![value.clone()]));
		}
	}

	#[test]
	fn prop_list_round_trip_keeps_order(items in proptest::collection::vec(value_strategy(), 1..6)) {
		let list = UrlValue::StrList(items.clone());
		let url = build_url("/p", [("tag", Some(&list))]);

		let route = parse_href(Some(&url));
		let decoded = resolve("tag", ValueType::StrList, route.get("tag"), None);
		prop_assert_eq!(decoded, Some(UrlValue::StrList(items)));
	}

	#[test]
	fn prop_int_round_trip(n in any::<i64>()) {
		let value = UrlValue::Int(n);
		let url = build_url("/p", [("n", Some(&value))]);
		let route = parse_href(Some(&url));
		prop_assert_eq!(resolve("n", ValueType::Int, route.get("n"), None), Some(value));
	}
}

#[rstest]
fn test_list_round_trip_a_b() {
	let list = UrlValue::StrList(vec!["a".to_string(), "b".to_string()]);
	let url = build_url("/p", [("tag", Some(&list))]);
	assert_eq!(url, "/p?tag=a&tag=b");

	let route = parse_href(Some(&url));
	assert_eq!(route.args["tag"], vec!["a", "b"]);
}

#[rstest]
fn test_struct_round_trip() {
	let cfg = UrlValue::Struct(json!({"a": 1, "b": ["x", "it's"]}));
	let url = build_url("/p", [("cfg", Some(&cfg))]);

	let route = parse_href(Some(&url));
	assert_eq!(resolve("cfg", ValueType::Struct, route.get("cfg"), None), Some(cfg));
}

#[rstest]
fn test_single_quoted_struct_from_hand_written_url() {
	let route = parse_href(Some("/p?cfg={'a': 1}"));
	assert_eq!(
		resolve("cfg", ValueType::Struct, route.get("cfg"), None),
		Some(UrlValue::Struct(json!({"a": 1})))
	);
}

#[rstest]
#[case(ValueType::Float, "x=notanumber", UrlValue::Float(3.5))]
#[case(ValueType::Int, "x=2.5", UrlValue::Int(7))]
#[case(ValueType::Struct, "x={broken", UrlValue::Struct(json!({})))]
fn test_bad_input_keeps_default(
	#[case] value_type: ValueType,
	#[case] query: &str,
	#[case] default: UrlValue,
) {
	let route = parse_href(Some(&format!("/p?{query}")));
	assert_eq!(
		resolve("x", value_type, route.get("x"), Some(&default)),
		Some(default.clone())
	);
}

#[rstest]
fn test_none_values_are_omitted() {
	let kept = UrlValue::from("yes");
	let url = build_url("/p", [("gone", None), ("kept", Some(&kept)), ("also_gone", None)]);
	assert_eq!(url, "/p?kept=yes");
	assert!(parse_href(Some(&url)).get("gone").is_none());
}

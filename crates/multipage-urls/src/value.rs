//! Typed URL values.
//!
//! A query argument arrives as a list of strings (one per occurrence of the
//! key). [`ValueType`] describes how that list is turned into a [`UrlValue`],
//! and [`UrlValue::to_query_values`] turns a value back into strings for the
//! link builder.
//!
//! ## Example
//!
//! ```
//! use multipage_urls::{UrlValue, ValueType};
//!
//! let raw = vec!["1".to_string(), "2.5".to_string()];
//! assert_eq!(ValueType::Float.decode(&raw).unwrap(), UrlValue::Float(2.5));
//! assert!(ValueType::Int.decode(&raw).is_err());
//! ```

use std::fmt;

use serde_json::Value;

/// How a query argument is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueType {
	/// Last occurrence as a string.
	#[default]
	Str,
	/// Every occurrence, in order.
	StrList,
	/// Last occurrence as an integer.
	Int,
	/// Last occurrence as a float.
	Float,
	/// Last occurrence as a JSON object or array.
	Struct,
}

/// A decoded URL argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum UrlValue {
	/// A single string.
	Str(String),
	/// A list of strings (repeated keys).
	StrList(Vec<String>),
	/// An integer.
	Int(i64),
	/// A floating-point number.
	Float(f64),
	/// A structured value (object or array).
	Struct(Value),
}

/// Reasons a raw argument could not be decoded into the declared type.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
	#[error("no value supplied")]
	Empty,

	#[error("invalid number: {raw:?}")]
	InvalidNumber { raw: String },

	#[error("not an integer: {raw:?}")]
	NotIntegral { raw: String },

	#[error("invalid structured value {raw:?}: {source}")]
	InvalidStruct {
		raw: String,
		#[source]
		source: serde_json::Error,
	},

	#[error("structured value must be an object or array: {raw:?}")]
	NotStructured { raw: String },
}

impl ValueType {
	/// Decodes the raw occurrences of a key into a typed value.
	///
	/// Scalar types use the last occurrence; [`ValueType::StrList`] keeps
	/// them all.
	///
	/// # Errors
	///
	/// Returns a [`DecodeError`] when the raw list is empty (scalar types
	/// only) or the last occurrence cannot be parsed.
	pub fn decode(self, raw: &[String]) -> Result<UrlValue, DecodeError> {
		let last = || raw.last().ok_or(DecodeError::Empty);
		match self {
			ValueType::StrList => Ok(UrlValue::StrList(raw.to_vec())),
			ValueType::Str => last().map(|s| UrlValue::Str(s.clone())),
			ValueType::Float => parse_float(last()?).map(UrlValue::Float),
			ValueType::Int => parse_int(last()?).map(UrlValue::Int),
			ValueType::Struct => parse_struct(last()?).map(UrlValue::Struct),
		}
	}

	/// Returns the lowercase name used in logs and settings.
	pub fn as_str(self) -> &'static str {
		match self {
			ValueType::Str => "str",
			ValueType::StrList => "str_list",
			ValueType::Int => "int",
			ValueType::Float => "float",
			ValueType::Struct => "struct",
		}
	}
}

impl fmt::Display for ValueType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

fn parse_float(raw: &str) -> Result<f64, DecodeError> {
	raw.trim()
		.parse::<f64>()
		.map_err(|_| DecodeError::InvalidNumber {
			raw: raw.to_string(),
		})
}

// Plain integers parse exactly over the whole i64 range. Anything else goes
// through float parsing so that "3.0" and "1e3" are accepted, but a
// fractional part or a value outside i64 is rejected.
fn parse_int(raw: &str) -> Result<i64, DecodeError> {
	if let Ok(value) = raw.trim().parse::<i64>() {
		return Ok(value);
	}
	let value = parse_float(raw)?;
	let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
	if !value.is_finite() || value.fract() != 0.0 || !in_range {
		return Err(DecodeError::NotIntegral {
			raw: raw.to_string(),
		});
	}
	Ok(value as i64)
}

fn parse_struct(raw: &str) -> Result<Value, DecodeError> {
	let parsed = match serde_json::from_str::<Value>(raw) {
		Ok(value) => value,
		// Single-quoted literals such as {'a': 1}
		Err(_) => serde_json::from_str::<Value>(&raw.replace('\'', "\"")).map_err(|source| {
			DecodeError::InvalidStruct {
				raw: raw.to_string(),
				source,
			}
		})?,
	};

	if parsed.is_object() || parsed.is_array() {
		Ok(parsed)
	} else {
		Err(DecodeError::NotStructured {
			raw: raw.to_string(),
		})
	}
}

/// Resolves the value for one field.
///
/// A missing key or a value that fails to decode yields `default`. Decode
/// failures are logged at debug level and never surfaced.
pub fn resolve(
	key: &str,
	value_type: ValueType,
	raw: Option<&[String]>,
	default: Option<&UrlValue>,
) -> Option<UrlValue> {
	let Some(raw) = raw else {
		return default.cloned();
	};

	match value_type.decode(raw) {
		Ok(value) => Some(value),
		Err(err) => {
			tracing::debug!(key, value_type = %value_type, error = %err, "falling back to default");
			default.cloned()
		}
	}
}

impl UrlValue {
	/// Returns the string form(s) of this value for a query string.
	///
	/// Lists expand to one entry per element, every other variant to exactly
	/// one entry. Structured values are written as compact JSON.
	pub fn to_query_values(&self) -> Vec<String> {
		match self {
			UrlValue::Str(s) => vec![s.clone()],
			UrlValue::StrList(items) => items.clone(),
			UrlValue::Int(n) => vec![n.to_string()],
			UrlValue::Float(x) => vec![x.to_string()],
			UrlValue::Struct(value) => vec![value.to_string()],
		}
	}

	/// Returns the string if this is a [`UrlValue::Str`].
	pub fn as_str(&self) -> Option<&str> {
		match self {
			UrlValue::Str(s) => Some(s),
			_ => None,
		}
	}
}

impl fmt::Display for UrlValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			UrlValue::StrList(items) => f.write_str(&items.join(", ")),
			other => {
				let mut values = other.to_query_values();
				f.write_str(&values.pop().unwrap_or_default())
			}
		}
	}
}

impl From<&str> for UrlValue {
	fn from(value: &str) -> Self {
		UrlValue::Str(value.to_string())
	}
}

impl From<String> for UrlValue {
	fn from(value: String) -> Self {
		UrlValue::Str(value)
	}
}

impl From<Vec<String>> for UrlValue {
	fn from(value: Vec<String>) -> Self {
		UrlValue::StrList(value)
	}
}

impl From<i64> for UrlValue {
	fn from(value: i64) -> Self {
		UrlValue::Int(value)
	}
}

impl From<f64> for UrlValue {
	fn from(value: f64) -> Self {
		UrlValue::Float(value)
	}
}

impl From<Value> for UrlValue {
	fn from(value: Value) -> Self {
		UrlValue::Struct(value)
	}
}

//! Where settings come from.
//!
//! Each source yields a flat map of keys to JSON values. [`SettingsBuilder`]
//! applies them from the lowest [`ConfigSource::priority`] up, so a key from
//! the environment overrides the same key from a file, which overrides a
//! default.
//!
//! [`SettingsBuilder`]: crate::SettingsBuilder

use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Priority of [`EnvSource`].
pub const ENV_PRIORITY: u8 = 100;
/// Priority of [`TomlFileSource`] and [`JsonFileSource`].
pub const FILE_PRIORITY: u8 = 50;
/// Priority of [`DefaultSource`].
pub const DEFAULT_PRIORITY: u8 = 0;

/// Flat key/value map produced by one source.
pub type SourceValues = IndexMap<String, Value>;

/// A provider of setting values.
pub trait ConfigSource {
	/// Reads every key this source knows about.
	fn load(&self) -> Result<SourceValues, SourceError>;

	/// Sources with a higher priority win on conflicting keys.
	fn priority(&self) -> u8;

	/// Human-readable origin, used in logs.
	fn description(&self) -> String;
}

/// Failure to read a source.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("cannot read settings file: {0}")]
	Io(#[from] std::io::Error),

	#[error("malformed settings: {0}")]
	Parse(String),

	#[error("invalid TOML: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("invalid JSON: {0}")]
	Json(#[from] serde_json::Error),

	#[error("unsupported settings source: {0}")]
	InvalidSource(String),
}

// Environment values for these keys are split on commas.
const LIST_KEYS: &[&str] = &["stylesheets"];

/// Reads settings from environment variables.
///
/// Keys are lowercased. Values stay strings, except for list keys such as
/// `stylesheets`, which become arrays.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
	prefix: Option<String>,
}

impl EnvSource {
	pub fn new() -> Self {
		Self::default()
	}

	/// Restricts the source to variables named `{prefix}KEY`.
	///
	/// ```
	/// use multipage_conf::sources::EnvSource;
	///
	/// let source = EnvSource::new().with_prefix("MULTIPAGE_");
	/// ```
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = Some(prefix.into());
		self
	}

	fn key_for(&self, var: String) -> Option<String> {
		match &self.prefix {
			Some(prefix) => var.strip_prefix(prefix.as_str()).map(str::to_lowercase),
			None => Some(var.to_lowercase()),
		}
	}

	fn parse_pairs<I>(&self, vars: I) -> SourceValues
	where
		I: IntoIterator<Item = (String, String)>,
	{
		vars.into_iter()
			.filter_map(|(var, raw)| {
				let key = self.key_for(var)?;
				let value = if LIST_KEYS.contains(&key.as_str()) {
					split_list(&raw)
				} else {
					Value::String(raw)
				};
				Some((key, value))
			})
			.collect()
	}
}

fn split_list(raw: &str) -> Value {
	raw.split(',')
		.map(str::trim)
		.filter(|item| !item.is_empty())
		.map(|item| Value::String(item.to_string()))
		.collect()
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<SourceValues, SourceError> {
		Ok(self.parse_pairs(std::env::vars()))
	}

	fn priority(&self) -> u8 {
		ENV_PRIORITY
	}

	fn description(&self) -> String {
		match &self.prefix {
			Some(prefix) => format!("env {prefix}*"),
			None => "env".to_string(),
		}
	}
}

/// Reads settings from a TOML document whose top level is a table.
#[derive(Debug, Clone)]
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	/// A missing file yields no keys.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<SourceValues, SourceError> {
		read_document(&self.path, |text| {
			let table: toml::Table = toml::from_str(text)?;
			Ok(serde_json::to_value(table)?)
		})
	}

	fn priority(&self) -> u8 {
		FILE_PRIORITY
	}

	fn description(&self) -> String {
		format!("toml {}", self.path.display())
	}
}

/// Reads settings from a JSON document whose top level is an object.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
	path: PathBuf,
}

impl JsonFileSource {
	/// A missing file yields no keys.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for JsonFileSource {
	fn load(&self) -> Result<SourceValues, SourceError> {
		read_document(&self.path, |text| Ok(serde_json::from_str(text)?))
	}

	fn priority(&self) -> u8 {
		FILE_PRIORITY
	}

	fn description(&self) -> String {
		format!("json {}", self.path.display())
	}
}

fn read_document<F>(path: &Path, parse: F) -> Result<SourceValues, SourceError>
where
	F: FnOnce(&str) -> Result<Value, SourceError>,
{
	let text = match fs::read_to_string(path) {
		Ok(text) => text,
		Err(err) if err.kind() == ErrorKind::NotFound => return Ok(SourceValues::new()),
		Err(err) => return Err(err.into()),
	};
	match parse(&text)? {
		Value::Object(map) => Ok(map.into_iter().collect()),
		other => Err(SourceError::Parse(format!(
			"{} must hold a table of settings, found {}",
			path.display(),
			kind_name(&other)
		))),
	}
}

fn kind_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "a table",
	}
}

/// Fixed fallback values.
#[derive(Debug, Clone, Default)]
pub struct DefaultSource {
	values: SourceValues,
}

impl DefaultSource {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a fallback for `key`.
	///
	/// ```
	/// use multipage_conf::sources::DefaultSource;
	/// use serde_json::Value;
	///
	/// let source = DefaultSource::new()
	///     .with_value("title", Value::String("Dashboards".to_string()));
	/// ```
	pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
		self.values.insert(key.into(), value);
		self
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<SourceValues, SourceError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		DEFAULT_PRIORITY
	}

	fn description(&self) -> String {
		format!("defaults ({} keys)", self.values.len())
	}
}

/// Chooses [`TomlFileSource`] or [`JsonFileSource`] from the extension of
/// `path`.
pub fn auto_source(path: impl AsRef<Path>) -> Result<Box<dyn ConfigSource>, SourceError> {
	let path = path.as_ref();
	match path.extension().and_then(|ext| ext.to_str()) {
		Some("toml") => Ok(Box::new(TomlFileSource::new(path))),
		Some("json") => Ok(Box::new(JsonFileSource::new(path))),
		Some(ext) => Err(SourceError::InvalidSource(format!(
			"{}: .{ext} files are not supported",
			path.display()
		))),
		None => Err(SourceError::InvalidSource(format!(
			"{}: no file extension",
			path.display()
		))),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::fs::File;
	use std::io::Write;
	use tempfile::TempDir;

	#[rstest]
	fn test_env_source_prefix_and_lists() {
		let source = EnvSource::new().with_prefix("MULTIPAGE_");
		let config = source.parse_pairs([
			("MULTIPAGE_TITLE".to_string(), "Runs".to_string()),
			("MULTIPAGE_STYLESHEETS".to_string(), "a.css, b.css,".to_string()),
			("OTHER_TITLE".to_string(), "ignored".to_string()),
		]);

		assert_eq!(config.len(), 2);
		assert_eq!(config["title"], Value::String("Runs".to_string()));
		assert_eq!(
			config["stylesheets"],
			Value::Array(vec![
				Value::String("a.css".to_string()),
				Value::String("b.css".to_string())
			])
		);
	}

	#[rstest]
	fn test_env_values_stay_strings() {
		let config = EnvSource::new().parse_pairs([("LOADING_TEXT".to_string(), "42".to_string())]);
		assert_eq!(config["loading_text"], Value::String("42".to_string()));
	}

	#[rstest]
	fn test_toml_source() {
		let temp_dir = TempDir::new().unwrap();
		let config_path = temp_dir.path().join("multipage.toml");

		let mut file = File::create(&config_path).unwrap();
		writeln!(
			file,
			r#"
title = "Run Viewer"
stylesheets = ["one.css"]
"#
		)
		.unwrap();

		let config = TomlFileSource::new(&config_path).load().unwrap();
		assert_eq!(config["title"], Value::String("Run Viewer".to_string()));
		assert_eq!(
			config["stylesheets"],
			Value::Array(vec![Value::String("one.css".to_string())])
		);
	}

	#[rstest]
	fn test_missing_file_is_empty() {
		let temp_dir = TempDir::new().unwrap();
		let source = TomlFileSource::new(temp_dir.path().join("absent.toml"));
		assert!(source.load().unwrap().is_empty());
	}

	#[rstest]
	fn test_json_root_must_be_object() {
		let temp_dir = TempDir::new().unwrap();
		let config_path = temp_dir.path().join("multipage.json");
		fs::write(&config_path, "[1, 2]").unwrap();

		let err = JsonFileSource::new(&config_path).load().unwrap_err();
		assert!(matches!(err, SourceError::Parse(_)));
	}

	#[rstest]
	#[case("settings.toml", true)]
	#[case("settings.json", true)]
	#[case("settings.yaml", false)]
	#[case("settings", false)]
	fn test_auto_source(#[case] path: &str, #[case] supported: bool) {
		assert_eq!(auto_source(path).is_ok(), supported);
	}

	#[rstest]
	fn test_source_priority() {
		assert_eq!(EnvSource::new().priority(), 100);
		assert_eq!(TomlFileSource::new("x.toml").priority(), 50);
		assert_eq!(JsonFileSource::new("x.json").priority(), 50);
		assert_eq!(DefaultSource::new().priority(), 0);
	}

	#[rstest]
	fn test_unreadable_path_is_an_error() {
		let temp_dir = TempDir::new().unwrap();
		let err = JsonFileSource::new(temp_dir.path()).load().unwrap_err();
		assert!(matches!(err, SourceError::Io(_)));
	}

	#[rstest]
	fn test_invalid_toml_is_an_error() {
		let temp_dir = TempDir::new().unwrap();
		let config_path = temp_dir.path().join("multipage.toml");
		fs::write(&config_path, "title = ").unwrap();

		let err = TomlFileSource::new(&config_path).load().unwrap_err();
		assert!(matches!(err, SourceError::Toml(_)));
	}
}

//! Application settings
//!
//! [`Settings`] holds everything a multipage application needs that is not
//! page-specific: the host prefix used in shareable links, navigation
//! class names, the loading placeholder and the document head.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::sources::{ConfigSource, DefaultSource, EnvSource, SourceError, auto_source};

/// Environment variable prefix read by [`SettingsBuilder::with_env`]
pub const ENV_PREFIX: &str = "MULTIPAGE_";

/// Settings for a multipage application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Document title
	pub title: String,
	/// Prefix of shareable links, e.g. `http://localhost:5000`
	pub host_path: String,
	/// Content shown while the location is not yet known
	pub loading_text: String,
	/// Class of every navigation link
	pub nav_class: String,
	/// Class added to the link of the current page
	pub nav_active_class: String,
	/// Stylesheets linked from the document head
	pub stylesheets: Vec<String>,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			title: "Multipage App".to_string(),
			host_path: "http://localhost:5000".to_string(),
			loading_text: "Loading.....".to_string(),
			nav_class: "nav-link".to_string(),
			nav_active_class: "active".to_string(),
			stylesheets: vec![
				"https://maxcdn.bootstrapcdn.com/bootstrap/4.0.0-alpha.6/css/bootstrap.min.css"
					.to_string(),
			],
		}
	}
}

/// Settings error
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error(transparent)]
	Source(#[from] SourceError),

	#[error("Invalid settings: {0}")]
	Deserialize(#[from] serde_json::Error),

	#[error("Invalid value for {key}: {message}")]
	Invalid { key: &'static str, message: String },
}

impl Settings {
	/// Checks values that would produce broken links or markup
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.nav_class.trim().is_empty() {
			return Err(SettingsError::Invalid {
				key: "nav_class",
				message: "must not be empty".to_string(),
			});
		}
		if self.host_path.ends_with('/') {
			return Err(SettingsError::Invalid {
				key: "host_path",
				message: format!("must not end with '/': {}", self.host_path),
			});
		}
		Ok(())
	}

	/// Returns the absolute link prefix for a page path
	///
	/// ```
	/// use multipage_conf::Settings;
	///
	/// let settings = Settings::default();
	/// assert_eq!(settings.page_url("/app2"), "http://localhost:5000/app2");
	/// ```
	pub fn page_url(&self, page_path: &str) -> String {
		format!("{}{}", self.host_path, page_path)
	}

	/// Returns the class attribute of a navigation link
	pub fn nav_link_class(&self, active: bool) -> String {
		if active {
			format!("{} {}", self.nav_class, self.nav_active_class)
		} else {
			self.nav_class.clone()
		}
	}
}

/// Merges configuration sources into [`Settings`]
#[derive(Default)]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	/// Create a builder with no sources; unset keys take [`Settings::default`]
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a source
	pub fn add_source(mut self, source: impl ConfigSource + 'static) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Add a TOML or JSON file, chosen by extension
	pub fn with_file(mut self, path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
		self.sources.push(auto_source(path)?);
		Ok(self)
	}

	/// Add `MULTIPAGE_*` environment variables
	pub fn with_env(self) -> Self {
		self.add_source(EnvSource::new().with_prefix(ENV_PREFIX))
	}

	/// Add individual default values
	pub fn with_defaults(self, defaults: DefaultSource) -> Self {
		self.add_source(defaults)
	}

	/// Load every source, lowest priority first, and validate the result
	pub fn build(mut self) -> Result<Settings, SettingsError> {
		self.sources.sort_by_key(|s| s.priority());

		let mut merged: IndexMap<String, Value> = IndexMap::new();
		for source in &self.sources {
			let values = source.load()?;
			tracing::debug!(source = %source.description(), keys = values.len(), "loaded settings source");
			merged.extend(values);
		}

		let settings: Settings = serde_json::from_value(Value::Object(merged.into_iter().collect()))?;
		settings.validate()?;
		Ok(settings)
	}
}

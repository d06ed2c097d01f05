//! # multipage-conf
//!
//! Layered settings for multipage applications.
//!
//! Values are merged from defaults, an optional TOML or JSON file and
//! `MULTIPAGE_*` environment variables, in that order of increasing
//! priority, then deserialized into [`Settings`].
//!
//! ```
//! use multipage_conf::SettingsBuilder;
//!
//! let settings = SettingsBuilder::new().build().unwrap();
//! assert_eq!(settings.loading_text, "Loading.....");
//! ```

pub mod settings;
pub mod sources;

pub use settings::{ENV_PREFIX, Settings, SettingsBuilder, SettingsError};
pub use sources::{ConfigSource, DefaultSource, EnvSource, JsonFileSource, SourceError, TomlFileSource};

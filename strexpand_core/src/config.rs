use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::ExpandError;
use crate::ExpandResult;
use crate::Registry;
use crate::Value;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"strexpand.toml",
	".strexpand.toml",
	".config/strexpand.toml",
];

/// A static value declared in the `[values]` table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
#[non_exhaustive]
pub enum ConfigValue {
	Bool(bool),
	Integer(i64),
	Float(f64),
	String(String),
}

impl From<&ConfigValue> for Value {
	fn from(value: &ConfigValue) -> Self {
		match value {
			ConfigValue::Bool(value) => Self::Bool(*value),
			ConfigValue::Integer(value) => Self::Int(*value),
			ConfigValue::Float(value) => Self::Float(*value),
			ConfigValue::String(value) => Self::Str(value.clone()),
		}
	}
}

/// Configuration loaded from a `strexpand.toml` file.
///
/// ```toml
/// counter = 100
///
/// [values]
/// APP = "strexpand"
/// BUILD = 42
/// RATIO = 0.25
/// DEBUG = false
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ExpandConfig {
	/// The value the `COUNTER` expander starts from.
	#[serde(default)]
	pub counter: Option<i64>,
	/// Static named entries registered on top of the built-ins.
	#[serde(default)]
	pub values: BTreeMap<String, ConfigValue>,
}

impl ExpandConfig {
	/// Find the first config file candidate that exists under `root`.
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if the file does not exist.
	pub fn load(root: &Path) -> ExpandResult<Option<Self>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		tracing::debug!(path = %config_path.display(), "load config");
		let content = std::fs::read_to_string(&config_path)?;

		Self::parse(&content).map(Some)
	}

	pub fn parse(content: &str) -> ExpandResult<Self> {
		toml::from_str(content).map_err(|e| ExpandError::ConfigParse(e.to_string()))
	}

	/// Register every configured value and reset the counter when one is set.
	pub fn apply(&self, registry: &Registry) {
		for (name, value) in &self.values {
			if !is_placeholder_key(name) {
				tracing::warn!(name = %name, "config value can never match a placeholder");
			}

			registry.register(name.as_str(), Value::from(value));
		}

		if let Some(counter) = self.counter {
			registry.counter().set(counter);
		}
	}

	/// A registry with the built-ins plus this config applied.
	pub fn registry(&self) -> Registry {
		let registry = Registry::new();
		self.apply(&registry);
		registry
	}
}

/// Whether `name` can appear as the key of a named placeholder.
pub fn is_placeholder_key(name: &str) -> bool {
	let mut chars = name.chars();
	chars.next().is_some_and(|first| first.is_ascii_alphabetic())
		&& chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

use crate::error::Result;
use crate::rules::DEFAULT_EXPAND_SIZE;
use crate::tree::{ConversionOptions, Substitution};
use serde::Deserialize;
use std::path::PathBuf;

/// Top-level configuration from a `.remap.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// If true, stop directory cascade and jump directly to ~/.remap.toml.
	#[serde(default)]
	pub root: bool,

	/// Environment variable name that, if truthy, skips ~/.remap.toml lookup.
	/// Useful for CI environments.
	#[serde(default)]
	pub root_config_lookup_disable_env_var: Option<String>,

	/// Indices per wildcard when expanding rules.
	#[serde(default)]
	pub expand_size: Option<usize>,

	/// How XML sources are turned into documents.
	#[serde(default)]
	pub conversion: ConversionSettings,
}

/// Conversion settings as written in a config file. Unset fields fall
/// through to the next config in the cascade, then to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConversionSettings {
	pub attribute_prefix: Option<String>,
	pub always_array: Option<Vec<String>>,
	pub auto_array: Option<bool>,
	pub text_content_key: Option<String>,
	pub auto_text: Option<bool>,
	pub namespace_separator: Option<String>,

	/// Sed-like rename for tag and attribute names, e.g. "s/-/_/g".
	pub key_rewrite: Option<String>,
}

impl ConversionSettings {
	/// Fill every unset field from `fallback`.
	pub fn or(self, fallback: &ConversionSettings) -> ConversionSettings {
		ConversionSettings {
			attribute_prefix: self
				.attribute_prefix
				.or_else(|| fallback.attribute_prefix.clone()),
			always_array: self.always_array.or_else(|| fallback.always_array.clone()),
			auto_array: self.auto_array.or(fallback.auto_array),
			text_content_key: self
				.text_content_key
				.or_else(|| fallback.text_content_key.clone()),
			auto_text: self.auto_text.or(fallback.auto_text),
			namespace_separator: self
				.namespace_separator
				.or_else(|| fallback.namespace_separator.clone()),
			key_rewrite: self.key_rewrite.or_else(|| fallback.key_rewrite.clone()),
		}
	}

	/// Build conversion options, using defaults for unset fields.
	pub fn to_options(&self) -> Result<ConversionOptions> {
		let defaults = ConversionOptions::default();
		let key_rewrite = self
			.key_rewrite
			.as_deref()
			.map(Substitution::parse)
			.transpose()?;

		Ok(ConversionOptions {
			attribute_prefix: self
				.attribute_prefix
				.clone()
				.unwrap_or(defaults.attribute_prefix),
			always_array: self
				.always_array
				.iter()
				.flatten()
				.cloned()
				.collect(),
			auto_array: self.auto_array.unwrap_or(defaults.auto_array),
			text_content_key: self
				.text_content_key
				.clone()
				.unwrap_or(defaults.text_content_key),
			auto_text: self.auto_text.unwrap_or(defaults.auto_text),
			namespace_separator: self
				.namespace_separator
				.clone()
				.unwrap_or(defaults.namespace_separator),
			key_rewrite,
		})
	}
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Merged configuration from multiple config files in the cascade.
#[derive(Debug, Clone)]
pub struct MergedConfig {
	/// Effective expand size.
	pub expand_size: usize,

	/// Conversion settings, nearest config first.
	pub conversion: ConversionSettings,

	/// Config files that contributed, in cascade order.
	pub sources: Vec<PathBuf>,
}

impl Default for MergedConfig {
	fn default() -> Self {
		MergedConfig {
			expand_size: DEFAULT_EXPAND_SIZE,
			conversion: ConversionSettings::default(),
			sources: Vec::new(),
		}
	}
}

impl Config {
	/// Validate settings that are only checked when used.
	pub fn validate(&self) -> Result<()> {
		self.conversion.to_options()?;
		Ok(())
	}
}

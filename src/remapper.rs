use crate::error::Result;
use crate::rules::{DEFAULT_EXPAND_SIZE, RuleSet};
use crate::source::SourceInput;
use crate::tree::ConversionOptions;
use crate::value::Value;

/// A loaded source document paired with the rules that reshape it.
#[derive(Debug, Clone)]
pub struct Remapper {
	source: SourceInput,
	options: ConversionOptions,
	data: Value,
	rules: RuleSet,
	expand_size: usize,
}

impl Remapper {
	/// Load `source` with the given conversion options.
	pub fn new(source: SourceInput, rules: RuleSet, options: ConversionOptions) -> Result<Self> {
		let data = source.load(&options)?;
		Ok(Remapper {
			source,
			options,
			data,
			rules,
			expand_size: DEFAULT_EXPAND_SIZE,
		})
	}

	/// The source document as a value, before any rule is applied.
	pub fn data(&self) -> &Value {
		&self.data
	}

	pub fn options(&self) -> &ConversionOptions {
		&self.options
	}

	pub fn expand_size(&self) -> usize {
		self.expand_size
	}

	/// Set how many indices each wildcard expands to.
	///
	/// The cost is `size^k` for a rule with `k` wildcards.
	pub fn set_expand_size(&mut self, expand_size: usize) {
		self.expand_size = expand_size;
	}

	/// Replace the conversion options and reload the source with them.
	pub fn set_conversion_options(&mut self, options: ConversionOptions) -> Result<()> {
		self.data = self.source.load(&options)?;
		self.options = options;
		Ok(())
	}

	/// Apply the rules to the loaded document.
	pub fn transform(&self) -> Result<Value> {
		self.rules.resolve(&self.data, self.expand_size)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rules::parse_rules_str;

	const FEED: &str = "<items><item>Item</item></items>";

	fn remapper(rules: &str) -> Remapper {
		Remapper::new(
			SourceInput::RawText(FEED.to_string()),
			parse_rules_str(rules).unwrap(),
			ConversionOptions::default(),
		)
		.unwrap()
	}

	#[test]
	fn test_data_is_the_converted_source() {
		let remapper = remapper("");
		assert_eq!(
			remapper.data(),
			&Value::from_json_str(r#"{"items":{"item":"Item"}}"#).unwrap()
		);
	}

	#[test]
	fn test_set_expand_size() {
		let mut remapper = remapper("");
		assert_eq!(remapper.expand_size(), DEFAULT_EXPAND_SIZE);
		remapper.set_expand_size(5);
		assert_eq!(remapper.expand_size(), 5);
	}

	#[test]
	fn test_set_conversion_options_reloads() {
		let mut remapper = remapper("");
		remapper
			.set_conversion_options(ConversionOptions {
				always_array: ["item".to_string()].into_iter().collect(),
				..Default::default()
			})
			.unwrap();

		assert!(remapper.options().always_array.contains("item"));
		assert_eq!(
			remapper.data(),
			&Value::from_json_str(r#"{"items":{"item":["Item"]}}"#).unwrap()
		);
	}

	#[test]
	fn test_transform() {
		let output = remapper("foo.bar: items.item").transform().unwrap();
		assert_eq!(
			output,
			Value::from_json_str(r#"{"foo":{"bar":"Item"}}"#).unwrap()
		);
	}

	#[test]
	fn test_transform_with_wildcards_after_promotion() {
		let mut remapper = remapper("foo.bar.*: items.item.*");
		remapper
			.set_conversion_options(ConversionOptions {
				auto_array: false,
				..Default::default()
			})
			.unwrap();

		let output = remapper.transform().unwrap();
		assert_eq!(
			output,
			Value::from_json_str(r#"{"foo":{"bar":["Item"]}}"#).unwrap()
		);
	}
}

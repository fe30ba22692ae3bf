use crate::error::Result;
use crate::paths::{self, FlatMap};
use crate::rules::types::{RuleEntry, RuleSet};
use crate::value::Value;

/// Default number of indices each wildcard expands to.
pub const DEFAULT_EXPAND_SIZE: usize = 1000;

/// Wildcard rules expanding to more candidate paths than this are logged.
pub const EXPANSION_WARN_THRESHOLD: usize = 100_000;

/// Project `source` through a decoded rules document.
///
/// Convenience wrapper around [`RuleSet::from_value`] and [`RuleSet::resolve`].
pub fn resolve(source: &Value, rules: &Value, expand_size: usize) -> Result<Value> {
	RuleSet::from_value(rules)?.resolve(source, expand_size)
}

impl RuleSet {
	/// Project `source` through these rules into a fresh output document.
	///
	/// Every rule is checked for arity before anything is expanded, so a
	/// mismatched rule aborts the whole call. Paths missing from the source are
	/// left out of the output.
	pub fn resolve(&self, source: &Value, expand_size: usize) -> Result<Value> {
		self.check(expand_size)?;

		let source_flat = paths::flatten(source);
		let mut output = Value::empty_mapping();

		for entry in self.entries() {
			for (output_path, input_path) in resolve_entry(entry, &source_flat, expand_size) {
				if let Some(value) = paths::get(&source_flat, &input_path) {
					paths::set(&mut output, &output_path, value);
				}
			}
		}

		Ok(output)
	}
}

/// Concrete `(output, input)` pairs for one rule, in expansion order.
fn resolve_entry(
	entry: &RuleEntry,
	source_flat: &FlatMap,
	expand_size: usize,
) -> Vec<(String, String)> {
	if entry.is_literal() {
		if !source_flat.contains_key(&entry.input) {
			tracing::debug!(output = %entry.output, input = %entry.input, "Literal rule input not found in source");
		}
		return vec![(entry.output.clone(), entry.input.clone())];
	}

	let candidates = paths::expansion_len(&entry.output, expand_size);
	if candidates > EXPANSION_WARN_THRESHOLD {
		tracing::warn!(
			output = %entry.output,
			input = %entry.input,
			expand_size,
			candidates,
			"Wildcard rule expands combinatorially; consider a smaller expand size"
		);
	}

	let outputs = paths::expand_wildcards(&entry.output, expand_size);
	let inputs = paths::expand_wildcards(&entry.input, expand_size);
	let resolved: Vec<_> = outputs
		.into_iter()
		.zip(inputs)
		.filter(|(_, input)| source_flat.contains_key(input))
		.collect();

	tracing::debug!(
		output = %entry.output,
		input = %entry.input,
		resolved = resolved.len(),
		"Resolved wildcard rule"
	);
	resolved
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::RemapError;
	use crate::tree::{ConversionOptions, convert_tree, parse_xml};

	fn json(content: &str) -> Value {
		Value::from_json_str(content).unwrap()
	}

	fn yaml(content: &str) -> Value {
		Value::from_yaml_str(content).unwrap()
	}

	#[test]
	fn test_literal_rule() {
		let output = resolve(
			&json(r#"{"items":{"item":"Item"}}"#),
			&yaml("foo.bar: items.item"),
			DEFAULT_EXPAND_SIZE,
		)
		.unwrap();
		assert_eq!(output, json(r#"{"foo":{"bar":"Item"}}"#));
	}

	#[test]
	fn test_wildcard_rule_over_converted_tree() {
		let tree = parse_xml("<items><item>Item</item><item>Another Item</item></items>").unwrap();
		let source = convert_tree(&tree, &ConversionOptions::default());

		let output = resolve(&source, &yaml("foo.bar.*: items.item.*"), DEFAULT_EXPAND_SIZE).unwrap();
		assert_eq!(output, json(r#"{"foo":{"bar":["Item","Another Item"]}}"#));
	}

	#[test]
	fn test_missing_literal_path_is_dropped() {
		let output = resolve(
			&json(r#"{"a":"1"}"#),
			&yaml("x: a\ny: missing.path\n"),
			DEFAULT_EXPAND_SIZE,
		)
		.unwrap();
		assert_eq!(output, json(r#"{"x":"1"}"#));
	}

	#[test]
	fn test_expansion_beyond_source_is_dropped() {
		let output = resolve(&json(r#"{"list":["a","b"]}"#), &yaml("out.*: list.*"), 10).unwrap();
		assert_eq!(output, json(r#"{"out":["a","b"]}"#));
	}

	#[test]
	fn test_expand_size_caps_results() {
		let output = resolve(&json(r#"{"list":["a","b","c"]}"#), &yaml("out.*: list.*"), 2).unwrap();
		assert_eq!(output, json(r#"{"out":["a","b"]}"#));
	}

	#[test]
	fn test_nested_wildcards() {
		let source = json(r#"{"groups":[{"items":["a","b"]},{"items":["c"]}]}"#);
		let output = resolve(&source, &yaml("g.*.i.*: groups.*.items.*"), 5).unwrap();
		assert_eq!(output, json(r#"{"g":[{"i":["a","b"]},{"i":["c"]}]}"#));
	}

	#[test]
	fn test_wildcard_rule_reshapes_records() {
		let source = json(
			r#"{"rss":{"channel":{"item":[
				{"title":"One","link":"http://one"},
				{"title":"Two","link":"http://two"}
			]}}}"#,
		);
		let rules = yaml(
			"articles.*.headline: rss.channel.item.*.title\narticles.*.url: rss.channel.item.*.link\n",
		);

		let output = resolve(&source, &rules, 50).unwrap();
		assert_eq!(
			output,
			json(
				r#"{"articles":[
					{"headline":"One","url":"http://one"},
					{"headline":"Two","url":"http://two"}
				]}"#
			)
		);
	}

	#[test]
	fn test_arity_mismatch_aborts() {
		let result = resolve(
			&json(r#"{"list":["a"]}"#),
			&yaml("ok: list.0\nout.*.x.*: list.*\n"),
			3,
		);
		assert!(matches!(
			result,
			Err(RemapError::RuleArityMismatch { .. })
		));
	}

	#[test]
	fn test_resolve_does_not_touch_inputs() {
		let source = json(r#"{"a":{"b":"c"}}"#);
		let rules = yaml("x: a.b");
		let before = (source.clone(), rules.clone());

		let first = resolve(&source, &rules, 10).unwrap();
		let second = resolve(&source, &rules, 10).unwrap();

		assert_eq!(first, second);
		assert_eq!((source, rules), before);
	}
}

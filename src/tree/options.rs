use crate::tree::rewriter::Substitution;
use std::collections::HashSet;

/// Policy for turning an element tree into a [`crate::value::Value`].
///
/// Built once per conversion and passed down the recursion by reference.
#[derive(Debug, Clone)]
pub struct ConversionOptions {
	/// Prefix for attribute keys, so they never read like child tags.
	pub attribute_prefix: String,

	/// Tag keys that always become sequences, even with a single occurrence.
	pub always_array: HashSet<String>,

	/// When false, every child key becomes a sequence.
	pub auto_array: bool,

	/// Key for text content that sits beside attributes or children.
	pub text_content_key: String,

	/// Collapse elements with only text into the bare text.
	pub auto_text: bool,

	/// Joins a namespace prefix and a local name.
	pub namespace_separator: String,

	/// Optional rename applied to every tag and attribute local name.
	pub key_rewrite: Option<Substitution>,
}

impl Default for ConversionOptions {
	fn default() -> Self {
		ConversionOptions {
			attribute_prefix: "@".to_string(),
			always_array: HashSet::new(),
			auto_array: true,
			text_content_key: "$".to_string(),
			auto_text: true,
			namespace_separator: ":".to_string(),
			key_rewrite: None,
		}
	}
}

impl ConversionOptions {
	/// Whether the first occurrence of `key` starts out as a sequence.
	pub fn wraps_single(&self, key: &str) -> bool {
		!self.auto_array || self.always_array.contains(key)
	}

	/// Apply the key rewrite, if any, to a local name.
	pub fn rewrite_name(&self, local: &str) -> String {
		match &self.key_rewrite {
			Some(sub) => sub.apply(local),
			None => local.to_string(),
		}
	}
}

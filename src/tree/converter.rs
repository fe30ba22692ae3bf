use crate::tree::node::{ElementNode, QualifiedName};
use crate::tree::options::ConversionOptions;
use crate::value::{Mapping, Value};
use indexmap::IndexMap;
use indexmap::map::Entry;
use std::borrow::Cow;

/// Convert an element tree into a single-entry mapping `{root_name: value}`.
///
/// The root is keyed by its local name as written. Child keys carry their
/// namespace prefix and the key rewrite. Attributes become prefixed keys,
/// repeated children are promoted to sequences in document order, and
/// text-only elements collapse to their text unless `auto_text` is off.
pub fn convert_tree(root: &ElementNode, options: &ConversionOptions) -> Value {
	let top = NamespaceScope::default();
	let scope = top.enter(root);
	let value = convert_element(root, options, &scope);

	let mut map = Mapping::new();
	map.insert(root.name.local.clone(), value);
	Value::Mapping(map)
}

/// Convert one element, already inside its own namespace scope.
fn convert_element(node: &ElementNode, options: &ConversionOptions, scope: &NamespaceScope) -> Value {
	let mut properties = Mapping::new();
	for (name, value) in &node.attributes {
		let attribute_key = format!("{}{}", options.attribute_prefix, scope.qualify(name, options));
		properties.insert(attribute_key, Value::Scalar(value.clone()));
	}

	let children = group_children(node, options, scope);
	let text = node.text.trim();

	if options.auto_text && properties.is_empty() && children.is_empty() && !text.is_empty() {
		return Value::Scalar(text.to_string());
	}

	for (child_key, slot) in children {
		properties.insert(child_key, slot.into_value());
	}
	if !text.is_empty() {
		properties.insert(
			options.text_content_key.clone(),
			Value::Scalar(text.to_string()),
		);
	}

	Value::Mapping(properties)
}

/// A child key seen once or several times.
#[derive(Debug)]
enum Slot {
	Single(Value),
	Many(Vec<Value>),
}

impl Slot {
	fn push(&mut self, value: Value) {
		match self {
			Slot::Many(items) => items.push(value),
			Slot::Single(previous) => {
				let previous = std::mem::replace(previous, Value::empty_mapping());
				*self = Slot::Many(vec![previous, value]);
			}
		}
	}

	fn into_value(self) -> Value {
		match self {
			Slot::Single(value) => value,
			Slot::Many(items) => Value::Sequence(items),
		}
	}
}

/// Fold the children into slots keyed by qualified tag, first-seen order.
fn group_children(
	node: &ElementNode,
	options: &ConversionOptions,
	scope: &NamespaceScope,
) -> IndexMap<String, Slot> {
	node.children
		.iter()
		.fold(IndexMap::new(), |mut groups, child| {
			let child_scope = scope.enter(child);
			let key = child_scope.qualify(&child.name, options);
			let value = convert_element(child, options, &child_scope);
			match groups.entry(key) {
				Entry::Vacant(entry) => {
					let slot = if options.wraps_single(entry.key()) {
						Slot::Many(vec![value])
					} else {
						Slot::Single(value)
					};
					entry.insert(slot);
				}
				Entry::Occupied(mut entry) => entry.get_mut().push(value),
			}
			groups
		})
}

/// Namespace bindings visible at an element, inherited from its ancestors.
#[derive(Debug, Clone)]
struct NamespaceScope {
	bindings: IndexMap<String, String>,
}

impl Default for NamespaceScope {
	fn default() -> Self {
		let mut bindings = IndexMap::new();
		bindings.insert(String::new(), String::new());
		NamespaceScope { bindings }
	}
}

impl NamespaceScope {
	/// Scope inside `node`; only elements that declare namespaces get a copy.
	fn enter(&self, node: &ElementNode) -> Cow<'_, NamespaceScope> {
		if node.namespaces.is_empty() {
			return Cow::Borrowed(self);
		}
		let mut bindings = self.bindings.clone();
		for (prefix, uri) in &node.namespaces {
			bindings.insert(prefix.clone(), uri.clone());
		}
		Cow::Owned(NamespaceScope { bindings })
	}

	/// The prefix to print for a name, if it is not the default namespace.
	///
	/// A prefix bound to the same URI as the default namespace is dropped.
	fn effective_prefix<'a>(&self, prefix: Option<&'a str>) -> Option<&'a str> {
		let prefix = prefix.filter(|p| !p.is_empty())?;
		match (self.bindings.get(prefix), self.bindings.get("")) {
			(Some(uri), Some(default)) if !default.is_empty() && uri == default => None,
			_ => Some(prefix),
		}
	}

	fn qualify(&self, name: &QualifiedName, options: &ConversionOptions) -> String {
		let local = options.rewrite_name(&name.local);
		match self.effective_prefix(name.prefix.as_deref()) {
			Some(prefix) => format!("{prefix}{}{local}", options.namespace_separator),
			None => local,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tree::rewriter::Substitution;

	fn element(name: &str) -> ElementNode {
		ElementNode::new(QualifiedName::parse(name))
	}

	fn text_element(name: &str, text: &str) -> ElementNode {
		element(name).with_text(text)
	}

	fn json(content: &str) -> Value {
		Value::from_json_str(content).unwrap()
	}

	#[test]
	fn test_text_leaves_collapse() {
		let root = element("items").with_child(text_element("item", "Item"));
		let value = convert_tree(&root, &ConversionOptions::default());
		assert_eq!(value, json(r#"{"items":{"item":"Item"}}"#));
	}

	#[test]
	fn test_attributes_keep_text_under_content_key() {
		let root = element("items").with_child(
			text_element("item", "Item").with_attribute(QualifiedName::new("src"), "foo"),
		);
		let value = convert_tree(&root, &ConversionOptions::default());
		assert_eq!(value, json(r#"{"items":{"item":{"@src":"foo","$":"Item"}}}"#));
	}

	#[test]
	fn test_namespaced_child_gets_prefixed_key() {
		let root = element("items")
			.with_namespace("m", "uri")
			.with_child(
				text_element("m:item", "Item").with_attribute(QualifiedName::new("src"), "foo"),
			);
		let value = convert_tree(&root, &ConversionOptions::default());
		assert_eq!(
			value,
			json(r#"{"items":{"m:item":{"@src":"foo","$":"Item"}}}"#)
		);
	}

	#[test]
	fn test_namespaced_attribute_and_custom_separator() {
		let root = element("feed").with_namespace("dc", "http://purl.org/dc").with_child(
			element("entry").with_attribute(QualifiedName::prefixed("dc", "lang"), "en"),
		);
		let options = ConversionOptions {
			namespace_separator: "_".to_string(),
			..Default::default()
		};
		let value = convert_tree(&root, &options);
		assert_eq!(value, json(r#"{"feed":{"entry":{"@dc_lang":"en"}}}"#));
	}

	#[test]
	fn test_prefix_bound_to_default_namespace_is_dropped() {
		let root = element("feed")
			.with_namespace("", "urn:feed")
			.with_namespace("f", "urn:feed")
			.with_child(text_element("f:title", "Hello"));
		let value = convert_tree(&root, &ConversionOptions::default());
		assert_eq!(value, json(r#"{"feed":{"title":"Hello"}}"#));
	}

	#[test]
	fn test_repeated_children_promote_in_document_order() {
		let root = element("items")
			.with_child(text_element("item", "a"))
			.with_child(text_element("other", "x"))
			.with_child(text_element("item", "b"))
			.with_child(text_element("item", "c"));
		let value = convert_tree(&root, &ConversionOptions::default());
		assert_eq!(
			value,
			json(r#"{"items":{"item":["a","b","c"],"other":"x"}}"#)
		);
	}

	#[test]
	fn test_always_array_wraps_single_child() {
		let root = element("items").with_child(text_element("item", "only"));
		let options = ConversionOptions {
			always_array: ["item".to_string()].into_iter().collect(),
			..Default::default()
		};
		let value = convert_tree(&root, &options);
		assert_eq!(value, json(r#"{"items":{"item":["only"]}}"#));
	}

	#[test]
	fn test_auto_array_off_wraps_every_child() {
		let root = element("items")
			.with_child(element("group").with_child(text_element("item", "x")));
		let options = ConversionOptions {
			auto_array: false,
			..Default::default()
		};
		let value = convert_tree(&root, &options);
		assert_eq!(value, json(r#"{"items":{"group":[{"item":["x"]}]}}"#));
	}

	#[test]
	fn test_auto_text_off_keeps_content_key() {
		let root = element("items").with_child(text_element("item", "Item"));
		let options = ConversionOptions {
			auto_text: false,
			text_content_key: "#text".to_string(),
			..Default::default()
		};
		let value = convert_tree(&root, &options);
		assert_eq!(value, json(r##"{"items":{"item":{"#text":"Item"}}}"##));
	}

	#[test]
	fn test_empty_element_is_empty_mapping() {
		let root = element("items").with_child(element("item"));
		let value = convert_tree(&root, &ConversionOptions::default());
		assert_eq!(value, json(r#"{"items":{"item":{}}}"#));
	}

	#[test]
	fn test_text_is_trimmed() {
		let root = element("items").with_child(text_element("item", "\n   spaced  \n"));
		let value = convert_tree(&root, &ConversionOptions::default());
		assert_eq!(value, json(r#"{"items":{"item":"spaced"}}"#));
	}

	#[test]
	fn test_mixed_content_keeps_text_beside_children() {
		let root = element("p").with_text("hello").with_child(text_element("b", "world"));
		let value = convert_tree(&root, &ConversionOptions::default());
		assert_eq!(value, json(r#"{"p":{"b":"world","$":"hello"}}"#));
	}

	#[test]
	fn test_key_rewrite_runs_before_prefixing() {
		let root = element("feed").with_namespace("m", "uri").with_child(
			text_element("m:pub-date", "2024")
				.with_attribute(QualifiedName::new("time-zone"), "UTC"),
		);
		let options = ConversionOptions {
			key_rewrite: Some(Substitution::parse("s/-/_/g").unwrap()),
			..Default::default()
		};
		let value = convert_tree(&root, &options);
		assert_eq!(
			value,
			json(r#"{"feed":{"m:pub_date":{"@time_zone":"UTC","$":"2024"}}}"#)
		);
	}

	#[test]
	fn test_prefixed_root_is_keyed_by_local_name() {
		let root = element("m:feed")
			.with_namespace("m", "u")
			.with_child(text_element("m:item", "x"));
		let value = convert_tree(&root, &ConversionOptions::default());
		assert_eq!(value, json(r#"{"feed":{"m:item":"x"}}"#));
	}

	#[test]
	fn test_key_rewrite_skips_root() {
		let root = element("news-feed").with_child(text_element("pub-date", "2024"));
		let options = ConversionOptions {
			key_rewrite: Some(Substitution::parse("s/-/_/g").unwrap()),
			..Default::default()
		};
		let value = convert_tree(&root, &options);
		assert_eq!(value, json(r#"{"news-feed":{"pub_date":"2024"}}"#));
	}

	#[test]
	fn test_child_declaring_its_own_namespace() {
		let root = element("items").with_child(
			text_element("m:item", "x").with_namespace("m", "urn:m"),
		);
		let value = convert_tree(&root, &ConversionOptions::default());
		assert_eq!(value, json(r#"{"items":{"m:item":"x"}}"#));
	}
}

//! Dot-path addressing over nested values.
//!
//! This module handles:
//! - Flattening a [`Value`] into a single-level `dot.path -> scalar` map
//! - Exact lookups in a flattened map
//! - Writing a scalar into a nested value by dot-path
//! - Wildcard pattern expansion

pub mod wildcard;

pub use wildcard::{WILDCARD, expand_wildcards, expansion_len, wildcard_count};

use crate::value::{Mapping, Value};
use indexmap::IndexMap;

/// Flattened document: dot-path to scalar text, in depth-first order.
pub type FlatMap = IndexMap<String, String>;

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// Flatten a value into a map of dot-paths to scalar leaves.
///
/// Mapping keys and sequence indices become path segments. Empty mappings and
/// sequences contribute no entries. A bare scalar flattens to the empty path.
pub fn flatten(value: &Value) -> FlatMap {
	let mut flat = FlatMap::new();
	flatten_into(value, "", &mut flat);
	flat
}

fn flatten_into(value: &Value, path: &str, flat: &mut FlatMap) {
	match value {
		Value::Scalar(s) => {
			flat.insert(path.to_string(), s.clone());
		}
		Value::Sequence(items) => {
			for (i, item) in items.iter().enumerate() {
				flatten_into(item, &join(path, &i.to_string()), flat);
			}
		}
		Value::Mapping(map) => {
			for (key, item) in map {
				flatten_into(item, &join(path, key), flat);
			}
		}
	}
}

fn join(path: &str, segment: &str) -> String {
	if path.is_empty() {
		segment.to_string()
	} else {
		format!("{path}{SEPARATOR}{segment}")
	}
}

/// Exact lookup of a dot-path in a flattened document.
pub fn get<'a>(flat: &'a FlatMap, path: &str) -> Option<&'a str> {
	flat.get(path).map(String::as_str)
}

/// Write `value` at `path` inside `target`, creating containers on the way.
///
/// Index segments (`0`, `1`, ...) address sequences positionally and a
/// missing container is created as a sequence when the segment after it is
/// `0`. Appending at `len` keeps a sequence dense; writing past the end or a
/// plain key into a sequence turns it into a mapping keyed by index.
pub fn set(target: &mut Value, path: &str, value: impl Into<String>) {
	let segments: Vec<&str> = path.split(SEPARATOR).collect();
	let current = std::mem::replace(target, Value::empty_mapping());
	*target = assign(Some(current), &segments, value.into());
}

fn assign(node: Option<Value>, segments: &[&str], value: String) -> Value {
	let Some((&head, rest)) = segments.split_first() else {
		return Value::Scalar(value);
	};

	match (node, parse_index(head)) {
		(Some(Value::Sequence(mut items)), Some(i)) if i < items.len() => {
			let child = std::mem::replace(&mut items[i], Value::empty_mapping());
			items[i] = assign(Some(child), rest, value);
			Value::Sequence(items)
		}
		(Some(Value::Sequence(mut items)), Some(i)) if i == items.len() => {
			items.push(assign(None, rest, value));
			Value::Sequence(items)
		}
		(None | Some(Value::Scalar(_)), Some(0)) => Value::Sequence(vec![assign(None, rest, value)]),
		(node, _) => {
			let mut map = match node {
				Some(Value::Mapping(map)) => map,
				Some(Value::Sequence(items)) => index_keyed(items),
				Some(Value::Scalar(_)) | None => Mapping::new(),
			};
			match map.get_mut(head) {
				Some(slot) => {
					let child = std::mem::replace(slot, Value::empty_mapping());
					*slot = assign(Some(child), rest, value);
				}
				None => {
					map.insert(head.to_string(), assign(None, rest, value));
				}
			}
			Value::Mapping(map)
		}
	}
}

/// Re-key a sequence by its stringified indices.
fn index_keyed(items: Vec<Value>) -> Mapping {
	items
		.into_iter()
		.enumerate()
		.map(|(i, item)| (i.to_string(), item))
		.collect()
}

/// Parse a canonical non-negative integer segment (`0`, `12`, but not `01`).
pub fn parse_index(segment: &str) -> Option<usize> {
	let canonical = !segment.is_empty()
		&& segment.bytes().all(|b| b.is_ascii_digit())
		&& (segment == "0" || !segment.starts_with('0'));
	if canonical { segment.parse().ok() } else { None }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn doc(json: &str) -> Value {
		Value::from_json_str(json).unwrap()
	}

	#[test]
	fn test_flatten_nested_document() {
		let flat = flatten(&doc(r#"{"a":{"b":"1","c":["x","y"]},"d":"2"}"#));

		let entries: Vec<_> = flat.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
		assert_eq!(
			entries,
			vec![("a.b", "1"), ("a.c.0", "x"), ("a.c.1", "y"), ("d", "2")]
		);
	}

	#[test]
	fn test_flatten_omits_empty_containers() {
		let flat = flatten(&doc(r#"{"a":{},"b":[],"c":"v"}"#));
		assert_eq!(flat.len(), 1);
		assert_eq!(get(&flat, "c"), Some("v"));
	}

	#[test]
	fn test_flatten_bare_scalar() {
		let flat = flatten(&Value::from("only"));
		assert_eq!(get(&flat, ""), Some("only"));
	}

	#[test]
	fn test_get_is_exact() {
		let flat = flatten(&doc(r#"{"a":{"b":"1"}}"#));
		assert_eq!(get(&flat, "a.b"), Some("1"));
		assert_eq!(get(&flat, "a"), None);
		assert_eq!(get(&flat, "a.b.c"), None);
	}

	#[test]
	fn test_set_then_flatten_round_trip() {
		let mut target = Value::empty_mapping();
		set(&mut target, "x.y.0", "v");

		assert_eq!(target, doc(r#"{"x":{"y":["v"]}}"#));
		let flat = flatten(&target);
		assert_eq!(flat.len(), 1);
		assert_eq!(get(&flat, "x.y.0"), Some("v"));
	}

	#[test]
	fn test_set_builds_dense_sequence() {
		let mut target = Value::empty_mapping();
		set(&mut target, "list.0.name", "a");
		set(&mut target, "list.0.id", "1");
		set(&mut target, "list.1.name", "b");

		assert_eq!(
			target,
			doc(r#"{"list":[{"name":"a","id":"1"},{"name":"b"}]}"#)
		);
	}

	#[test]
	fn test_set_overwrites_existing_scalar() {
		let mut target = Value::empty_mapping();
		set(&mut target, "a.b", "old");
		set(&mut target, "a.b", "new");
		assert_eq!(target, doc(r#"{"a":{"b":"new"}}"#));

		set(&mut target, "a.b.c", "deeper");
		assert_eq!(target, doc(r#"{"a":{"b":{"c":"deeper"}}}"#));
	}

	#[test]
	fn test_set_gap_turns_sequence_into_mapping() {
		let mut target = Value::empty_mapping();
		set(&mut target, "a.0", "first");
		set(&mut target, "a.2", "third");
		assert_eq!(target, doc(r#"{"a":{"0":"first","2":"third"}}"#));
	}

	#[test]
	fn test_set_numeric_root_key_stays_mapping() {
		let mut target = Value::empty_mapping();
		set(&mut target, "0", "zero");
		assert_eq!(target, doc(r#"{"0":"zero"}"#));
	}

	#[test]
	fn test_parse_index() {
		assert_eq!(parse_index("0"), Some(0));
		assert_eq!(parse_index("42"), Some(42));
		assert_eq!(parse_index("01"), None);
		assert_eq!(parse_index("+1"), None);
		assert_eq!(parse_index("-1"), None);
		assert_eq!(parse_index(""), None);
		assert_eq!(parse_index("item"), None);
	}
}

//! The canonical document model.
//!
//! Every source document (decoded JSON, decoded YAML, converted XML tree) and
//! every output document is a [`Value`]. Scalars are always text; mappings
//! keep their insertion order.

use crate::error::{RemapError, Result};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Ordered mapping with unique keys.
pub type Mapping = IndexMap<String, Value>;

/// A nested document value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
	Scalar(String),
	Sequence(Vec<Value>),
	Mapping(Mapping),
}

impl Value {
	/// An empty mapping, the starting point for every output document.
	pub fn empty_mapping() -> Self {
		Value::Mapping(Mapping::new())
	}

	/// Decode a JSON document.
	pub fn from_json_str(content: &str) -> Result<Self> {
		let json: serde_json::Value =
			serde_json::from_str(content).map_err(RemapError::JsonParseError)?;
		Ok(Value::from(json))
	}

	/// Decode a YAML document.
	pub fn from_yaml_str(content: &str) -> Result<Self> {
		let yaml: serde_yaml::Value =
			serde_yaml::from_str(content).map_err(RemapError::YamlParseError)?;
		Ok(Value::from(yaml))
	}

	pub fn as_mapping(&self) -> Option<&Mapping> {
		match self {
			Value::Mapping(map) => Some(map),
			_ => None,
		}
	}

	/// Look up a key when this value is a mapping.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.as_mapping().and_then(|map| map.get(key))
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Value::Scalar(s.to_string())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Value::Scalar(s)
	}
}

impl From<serde_json::Value> for Value {
	fn from(json: serde_json::Value) -> Self {
		match json {
			serde_json::Value::Null => Value::Scalar(String::new()),
			serde_json::Value::Bool(b) => Value::Scalar(b.to_string()),
			serde_json::Value::Number(n) => Value::Scalar(n.to_string()),
			serde_json::Value::String(s) => Value::Scalar(s),
			serde_json::Value::Array(items) => {
				Value::Sequence(items.into_iter().map(Value::from).collect())
			}
			serde_json::Value::Object(map) => Value::Mapping(
				map.into_iter()
					.map(|(key, value)| (key, Value::from(value)))
					.collect(),
			),
		}
	}
}

impl From<serde_yaml::Value> for Value {
	fn from(yaml: serde_yaml::Value) -> Self {
		match yaml {
			serde_yaml::Value::Sequence(items) => {
				Value::Sequence(items.into_iter().map(Value::from).collect())
			}
			serde_yaml::Value::Mapping(map) => Value::Mapping(
				map.into_iter()
					.map(|(key, value)| (yaml_key_text(key), Value::from(value)))
					.collect(),
			),
			serde_yaml::Value::Tagged(tagged) => Value::from(tagged.value),
			scalar => Value::Scalar(yaml_scalar_text(scalar).unwrap_or_default()),
		}
	}
}

/// Text of a YAML scalar, or `None` for collections.
fn yaml_scalar_text(yaml: serde_yaml::Value) -> Option<String> {
	match yaml {
		serde_yaml::Value::Null => Some(String::new()),
		serde_yaml::Value::Bool(b) => Some(b.to_string()),
		serde_yaml::Value::Number(n) => Some(n.to_string()),
		serde_yaml::Value::String(s) => Some(s),
		serde_yaml::Value::Tagged(tagged) => yaml_scalar_text(tagged.value),
		serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => None,
	}
}

/// Mapping keys are usually strings; anything else is rendered back to YAML.
fn yaml_key_text(key: serde_yaml::Value) -> String {
	match yaml_scalar_text(key.clone()) {
		Some(text) => text,
		None => serde_yaml::to_string(&key)
			.map(|s| s.trim_end().to_string())
			.unwrap_or_default(),
	}
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		match self {
			Value::Scalar(s) => serializer.serialize_str(s),
			Value::Sequence(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Value::Mapping(map) => {
				let mut out = serializer.serialize_map(Some(map.len()))?;
				for (key, value) in map {
					out.serialize_entry(key, value)?;
				}
				out.end()
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_json_objects_keep_scalars_as_text() {
		let value =
			Value::from_json_str(r#"{"name":"x","count":3,"ok":true,"gone":null}"#).unwrap();

		assert_eq!(value.get("name"), Some(&Value::from("x")));
		assert_eq!(value.get("count"), Some(&Value::from("3")));
		assert_eq!(value.get("ok"), Some(&Value::from("true")));
		assert_eq!(value.get("gone"), Some(&Value::from("")));
	}

	#[test]
	fn test_yaml_mapping_preserves_declaration_order() {
		let value = Value::from_yaml_str("zeta: 1\nalpha: 2\nmid: 3\n").unwrap();
		let keys: Vec<_> = value.as_mapping().unwrap().keys().cloned().collect();
		assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
	}

	#[test]
	fn test_yaml_non_string_keys_are_stringified() {
		let value = Value::from_yaml_str("1: one\ntrue: yes\n").unwrap();
		assert_eq!(value.get("1"), Some(&Value::from("one")));
		assert_eq!(value.get("true"), Some(&Value::from("yes")));
	}

	#[test]
	fn test_invalid_json_is_reported() {
		let result = Value::from_json_str("{not json");
		assert!(matches!(result, Err(RemapError::JsonParseError(_))));
	}

	#[test]
	fn test_serialize_as_json() {
		let value = Value::from_json_str(r#"{"b":["x","y"],"a":{"c":"d"}}"#).unwrap();
		let json = serde_json::to_string(&value).unwrap();
		assert_eq!(json, r#"{"b":["x","y"],"a":{"c":"d"}}"#);
	}
}

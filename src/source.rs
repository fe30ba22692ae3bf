//! Source documents and how they are loaded.
//!
//! The kind of input is decided once, when a [`SourceInput`] is built; loading
//! never sniffs again.

use crate::error::{RemapError, Result};
use crate::tree::{ConversionOptions, ElementNode, convert_tree, parse_xml};
use crate::value::Value;
use std::path::{Path, PathBuf};

/// Every shape of input remap accepts.
#[derive(Debug, Clone)]
pub enum SourceInput {
	/// A `.json` or `.xml` file on disk.
	Path(PathBuf),

	/// Raw JSON or XML text.
	RawText(String),

	/// An element tree parsed elsewhere.
	ParsedTree(ElementNode),

	/// A document already decoded into a value.
	ParsedValue(Value),
}

/// Format of a textual document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
	Json,
	Xml,
}

impl DocumentKind {
	/// Detect the format of a file from its extension.
	pub fn from_path(path: &Path) -> Option<Self> {
		let extension = path.extension()?.to_str()?.to_ascii_lowercase();
		match extension.as_str() {
			"json" => Some(DocumentKind::Json),
			"xml" => Some(DocumentKind::Xml),
			_ => None,
		}
	}

	/// Detect the format of raw text from its first significant character.
	pub fn sniff(content: &str) -> Option<Self> {
		match content.trim_start().chars().next()? {
			'<' => Some(DocumentKind::Xml),
			'{' | '[' => Some(DocumentKind::Json),
			_ => None,
		}
	}

	/// Decode text of this kind into a value.
	pub fn decode(self, content: &str, options: &ConversionOptions) -> Result<Value> {
		match self {
			DocumentKind::Json => Value::from_json_str(content),
			DocumentKind::Xml => Ok(convert_tree(&parse_xml(content)?, options)),
		}
	}
}

impl SourceInput {
	/// Classify a command-line style argument: an existing file is a path,
	/// anything else is raw text.
	pub fn detect(arg: &str) -> Self {
		let path = Path::new(arg);
		if path.is_file() {
			SourceInput::Path(path.to_path_buf())
		} else {
			SourceInput::RawText(arg.to_string())
		}
	}

	/// Load the input into a value, converting element trees with `options`.
	pub fn load(&self, options: &ConversionOptions) -> Result<Value> {
		match self {
			SourceInput::Path(path) => load_file(path, options),
			SourceInput::RawText(content) => {
				let kind =
					DocumentKind::sniff(content).ok_or_else(|| RemapError::UnsupportedInputShape {
						reason: "input is neither an existing file nor JSON or XML text".to_string(),
					})?;
				tracing::debug!(?kind, "Decoding raw source text");
				kind.decode(content, options)
			}
			SourceInput::ParsedTree(tree) => Ok(convert_tree(tree, options)),
			SourceInput::ParsedValue(value) => Ok(value.clone()),
		}
	}
}

fn load_file(path: &Path, options: &ConversionOptions) -> Result<Value> {
	if !path.is_file() {
		return Err(RemapError::InputNotFound {
			path: path.to_path_buf(),
		});
	}

	let kind = DocumentKind::from_path(path).ok_or_else(|| RemapError::UnsupportedFileType {
		path: path.to_path_buf(),
	})?;

	let content = std::fs::read_to_string(path).map_err(|source| RemapError::InputReadError {
		path: path.to_path_buf(),
		source,
	})?;

	tracing::debug!(path = %path.display(), ?kind, "Decoding source file");
	kind.decode(&content, options)
}

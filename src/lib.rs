//! Remap - project XML and JSON feeds onto a target shape with dot-path rules.
//!
//! This library provides the core functionality for remap, including:
//! - Element tree to value conversion (attributes, namespaces, array promotion)
//! - Dot-path flattening, lookup, assignment and wildcard expansion
//! - Rule resolution from a YAML rules document
//! - Source loading and configuration file cascade discovery
//!
//! # Example
//!
//! ```
//! use remap_cli::rules::{DEFAULT_EXPAND_SIZE, parse_rules_str};
//! use remap_cli::source::SourceInput;
//! use remap_cli::tree::ConversionOptions;
//!
//! let source = SourceInput::RawText("<items><item>A</item><item>B</item></items>".to_string())
//! 	.load(&ConversionOptions::default())
//! 	.unwrap();
//! let rules = parse_rules_str("names.*: items.item.*").unwrap();
//!
//! let output = rules.resolve(&source, DEFAULT_EXPAND_SIZE).unwrap();
//! assert_eq!(serde_json::to_string(&output).unwrap(), r#"{"names":["A","B"]}"#);
//! ```

pub mod config;
pub mod error;
pub mod paths;
pub mod remapper;
pub mod rules;
pub mod source;
pub mod tree;
pub mod value;

pub use error::{RemapError, Result};
pub use remapper::Remapper;
pub use value::Value;

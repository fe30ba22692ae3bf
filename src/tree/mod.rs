//! Element trees and their conversion into values.
//!
//! This module handles:
//! - The element tree model handed over by markup readers
//! - Conversion options (attribute prefix, array promotion, text collapsing)
//! - Tree to value conversion
//! - Reading XML into element trees
//! - Sed-like renaming of tag and attribute names

pub mod converter;
pub mod node;
pub mod options;
pub mod reader;
pub mod rewriter;

pub use converter::convert_tree;
pub use node::{ElementNode, QualifiedName};
pub use options::ConversionOptions;
pub use reader::parse_xml;
pub use rewriter::Substitution;

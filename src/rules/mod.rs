//! Rule sets and path remapping for remap.
//!
//! This module handles:
//! - Rule entries and rule sets decoded from YAML documents
//! - Wildcard arity checks
//! - Resolving rules against a source document into an output document

pub mod loader;
pub mod resolver;
pub mod types;

pub use loader::{parse_rules_file, parse_rules_str};
pub use resolver::{DEFAULT_EXPAND_SIZE, EXPANSION_WARN_THRESHOLD, resolve};
pub use types::{RuleEntry, RuleSet};

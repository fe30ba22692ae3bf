use crate::error::{RemapError, Result};
use crate::rules::types::RuleSet;
use crate::value::Value;
use std::path::Path;

/// Parse a YAML rules file from the given path.
pub fn parse_rules_file(path: &Path) -> Result<RuleSet> {
	if !path.is_file() {
		return Err(RemapError::RulesNotFound {
			path: path.to_path_buf(),
		});
	}

	let content = std::fs::read_to_string(path).map_err(|source| RemapError::RulesReadError {
		path: path.to_path_buf(),
		source,
	})?;

	tracing::debug!(path = %path.display(), "Loaded rules file");
	parse_rules_str(&content)
}

/// Parse YAML rules from a string (useful for testing).
pub fn parse_rules_str(content: &str) -> Result<RuleSet> {
	let rules = Value::from_yaml_str(content)?;
	RuleSet::from_value(&rules)
}

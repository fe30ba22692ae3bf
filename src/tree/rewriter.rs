use crate::error::{RemapError, Result};
use regex::Regex;

/// Parsed substitution command (sed-like syntax) applied to tag and attribute names.
#[derive(Debug, Clone)]
pub struct Substitution {
	/// The pattern to match.
	pub pattern: Regex,

	/// The replacement string.
	pub replacement: String,

	/// Whether to replace all occurrences (global flag).
	pub global: bool,
}

impl Substitution {
	/// Parse a substitution string in sed-like format: "s/pattern/replacement/" or "s/pattern/replacement/g"
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = |reason: &str| RemapError::InvalidSubstitution {
			input: input.to_string(),
			reason: reason.to_string(),
		};

		let mut chars = input.chars();
		if chars.next() != Some('s') {
			return Err(invalid("substitution must start with 's'"));
		}

		// The delimiter is whatever follows the 's'
		let delimiter = chars.next().ok_or_else(|| invalid("substitution too short"))?;
		let parts = split_by_delimiter(chars.as_str(), delimiter);

		if parts.len() < 2 {
			return Err(invalid("substitution must have pattern and replacement"));
		}

		let pattern_str = &parts[0];
		let replacement = parts[1].clone();
		let flags = parts.get(2).map(String::as_str).unwrap_or("");

		let pattern = Regex::new(pattern_str).map_err(|source| RemapError::InvalidRegex {
			pattern: pattern_str.to_string(),
			source,
		})?;

		Ok(Substitution {
			pattern,
			replacement,
			global: flags.contains('g'),
		})
	}

	/// Apply this substitution to a name.
	pub fn apply(&self, input: &str) -> String {
		if self.global {
			self.pattern
				.replace_all(input, &self.replacement)
				.to_string()
		} else {
			self.pattern.replace(input, &self.replacement).to_string()
		}
	}
}

/// Split a string by a delimiter, respecting backslash escapes.
fn split_by_delimiter(input: &str, delimiter: char) -> Vec<String> {
	let mut parts = Vec::new();
	let mut current = String::new();
	let mut chars = input.chars().peekable();
	let mut escape_next = false;

	while let Some(c) = chars.next() {
		if escape_next {
			current.push(c);
			escape_next = false;
		} else if c == '\\' {
			// Only an escaped delimiter loses its backslash
			if chars.peek() == Some(&delimiter) {
				escape_next = true;
			} else {
				current.push(c);
			}
		} else if c == delimiter {
			parts.push(std::mem::take(&mut current));
		} else {
			current.push(c);
		}
	}

	parts.push(current);
	parts
}

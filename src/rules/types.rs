use crate::error::{RemapError, Result};
use crate::paths::{self, WILDCARD};
use crate::value::Value;

/// One `output <- input` path alias from a rules document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEntry {
	/// Where the value lands in the output document.
	pub output: String,

	/// Where the value is read from in the source document.
	pub input: String,
}

impl RuleEntry {
	pub fn new(output: impl Into<String>, input: impl Into<String>) -> Self {
		RuleEntry {
			output: output.into(),
			input: input.into(),
		}
	}

	/// A rule whose output pattern has no wildcard is resolved as written.
	pub fn is_literal(&self) -> bool {
		!self.output.contains(WILDCARD)
	}

	/// Number of candidate paths this rule expands to.
	///
	/// Fails when the output and input patterns would not pair up index for
	/// index.
	pub fn expansion_len(&self, expand_size: usize) -> Result<usize> {
		if self.is_literal() {
			return Ok(1);
		}

		let output_len = paths::expansion_len(&self.output, expand_size);
		let input_len = paths::expansion_len(&self.input, expand_size);
		if output_len != input_len {
			return Err(RemapError::RuleArityMismatch {
				output: self.output.clone(),
				input: self.input.clone(),
				output_len,
				input_len,
			});
		}

		Ok(output_len)
	}
}

/// Rules in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
	entries: Vec<RuleEntry>,
}

impl RuleSet {
	pub fn new(entries: Vec<RuleEntry>) -> Self {
		RuleSet { entries }
	}

	/// Build a rule set from a decoded rules document.
	///
	/// The document is flattened, so `foo.bar: items.item` and
	/// `foo: {bar: items.item}` declare the same rule.
	pub fn from_value(rules: &Value) -> Result<Self> {
		match rules {
			Value::Mapping(_) => {}
			Value::Scalar(s) if s.trim().is_empty() => return Ok(RuleSet::default()),
			Value::Scalar(_) => {
				return Err(RemapError::InvalidRules {
					reason: "expected a mapping of output paths to input paths, found a scalar"
						.to_string(),
				});
			}
			Value::Sequence(_) => {
				return Err(RemapError::InvalidRules {
					reason: "expected a mapping of output paths to input paths, found a sequence"
						.to_string(),
				});
			}
		}

		let entries = paths::flatten(rules)
			.into_iter()
			.map(|(output, input)| RuleEntry { output, input })
			.collect();
		Ok(RuleSet { entries })
	}

	pub fn entries(&self) -> &[RuleEntry] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Verify every wildcard rule pairs up at the given expand size.
	pub fn check(&self, expand_size: usize) -> Result<()> {
		for entry in &self.entries {
			entry.expansion_len(expand_size)?;
		}
		Ok(())
	}
}

use std::path::PathBuf;

/// Library-level structured errors for remap.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum RemapError {
	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid regex pattern in key rewrite: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Invalid substitution {input}: {reason}")]
	InvalidSubstitution { input: String, reason: String },

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,

	#[error("File does not exist at path {path}")]
	InputNotFound { path: PathBuf },

	#[error("Failed to read input file: {path}")]
	InputReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("File type not allowed: {path}")]
	UnsupportedFileType { path: PathBuf },

	#[error("Unsupported input shape: {reason}")]
	UnsupportedInputShape { reason: String },

	#[error("Failed to parse JSON document")]
	JsonParseError(#[source] serde_json::Error),

	#[error("Failed to parse YAML document")]
	YamlParseError(#[source] serde_yaml::Error),

	#[error("XML syntax error at byte {position}")]
	XmlSyntax {
		position: u64,
		#[source]
		source: quick_xml::Error,
	},

	#[error("Invalid XML structure: {message}")]
	XmlStructure { message: String },

	#[error("Rules file does not exist at path {path}")]
	RulesNotFound { path: PathBuf },

	#[error("Failed to read rules file: {path}")]
	RulesReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Invalid rules document: {reason}")]
	InvalidRules { reason: String },

	#[error(
		"Rule arity mismatch: {output} expands to {output_len} paths but {input} expands to {input_len}"
	)]
	RuleArityMismatch {
		output: String,
		input: String,
		output_len: usize,
		input_len: usize,
	},
}

/// Result type alias using RemapError.
pub type Result<T> = std::result::Result<T, RemapError>;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use remap_cli::config::{
	CONFIG_FILE_NAME, ConversionSettings, MergedConfig, generate_init_template,
	load_merged_config, merge_configs, user_config_path,
};
use remap_cli::rules::parse_rules_file;
use remap_cli::source::SourceInput;
use remap_cli::{Remapper, Value};

#[derive(Parser)]
#[command(name = "remap")]
#[command(
	author,
	version,
	about = "CLI tool for projecting XML and JSON feeds onto a target shape with dot-path rules"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Create a template .remap.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .remap.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Apply a rules file to an XML or JSON source
	Transform {
		/// Source file (.xml or .json) or raw XML/JSON text
		input: String,

		/// YAML file mapping output paths to input paths
		#[arg(long, short)]
		rules: PathBuf,

		/// Indices each wildcard expands to
		#[arg(long, value_name = "N")]
		expand_size: Option<usize>,

		#[command(flatten)]
		conversion: ConversionArgs,

		/// Output format
		#[arg(long, value_enum, default_value = "json")]
		format: OutputFormat,
	},
	/// Print a source document the way rules see it
	Convert {
		/// Source file (.xml or .json) or raw XML/JSON text
		input: String,

		#[command(flatten)]
		conversion: ConversionArgs,

		/// Output format
		#[arg(long, value_enum, default_value = "json")]
		format: OutputFormat,
	},
	/// Rules file commands
	Rules {
		#[command(subcommand)]
		action: RulesAction,
	},
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum RulesAction {
	/// List the rules in a file and check that wildcards pair up
	Check {
		/// YAML rules file
		file: PathBuf,

		/// Indices each wildcard expands to
		#[arg(long, value_name = "N")]
		expand_size: Option<usize>,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display merged effective configuration with source annotations
	Show,
	/// Check all config files for errors without running anything
	Validate,
}

/// Conversion overrides; anything unset falls back to the config cascade.
#[derive(Args)]
struct ConversionArgs {
	/// Tag that always becomes a list (repeatable)
	#[arg(long = "always-array", value_name = "TAG")]
	always_array: Vec<String>,

	/// Wrap every child tag in a list, not only repeated ones
	#[arg(long)]
	no_auto_array: bool,

	/// Keep text under the text content key even for text-only elements
	#[arg(long)]
	no_auto_text: bool,

	/// Prefix for attribute keys
	#[arg(long, value_name = "PREFIX")]
	attribute_prefix: Option<String>,

	/// Key for text beside attributes or child elements
	#[arg(long, value_name = "KEY")]
	text_content_key: Option<String>,

	/// Separator between namespace prefix and name
	#[arg(long, value_name = "SEP")]
	namespace_separator: Option<String>,

	/// Sed-like rename for tag and attribute names, e.g. "s/-/_/g"
	#[arg(long, value_name = "SUBSTITUTION")]
	key_rewrite: Option<String>,
}

impl ConversionArgs {
	fn to_settings(&self) -> ConversionSettings {
		ConversionSettings {
			attribute_prefix: self.attribute_prefix.clone(),
			always_array: (!self.always_array.is_empty()).then(|| self.always_array.clone()),
			auto_array: self.no_auto_array.then_some(false),
			text_content_key: self.text_content_key.clone(),
			auto_text: self.no_auto_text.then_some(false),
			namespace_separator: self.namespace_separator.clone(),
			key_rewrite: self.key_rewrite.clone(),
		}
	}
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
	Json,
	Yaml,
}

fn main() -> ExitCode {
	init_logging();

	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_logging() {
	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "remap_cli=warn".into()),
		)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	// Handle --init
	if cli.init {
		return handle_init(cli.force);
	}

	let Some(command) = cli.command else {
		// No command specified - this shouldn't happen due to arg_required_else_help
		return Ok(ExitCode::SUCCESS);
	};

	match command {
		Commands::Transform {
			input,
			rules,
			expand_size,
			conversion,
			format,
		} => handle_transform(&input, &rules, expand_size, &conversion, format),
		Commands::Convert {
			input,
			conversion,
			format,
		} => handle_convert(&input, &conversion, format),
		Commands::Rules { action } => match action {
			RulesAction::Check { file, expand_size } => handle_rules_check(&file, expand_size),
		},
		Commands::Config { action } => match action {
			ConfigAction::Show => handle_config_show(),
			ConfigAction::Validate => handle_config_validate(),
		},
	}
}

fn load_config() -> Result<MergedConfig> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	load_merged_config(&cwd).context("Failed to load configuration")
}

fn render(value: &Value, format: OutputFormat) -> Result<String> {
	match format {
		OutputFormat::Json => {
			serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
		}
		OutputFormat::Yaml => {
			serde_yaml::to_string(value).context("Failed to serialize output as YAML")
		}
	}
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(CONFIG_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{CONFIG_FILE_NAME} already exists. Use --force to overwrite.");
	}

	std::fs::write(&config_path, generate_init_template())
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {CONFIG_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

fn handle_transform(
	input: &str,
	rules_path: &Path,
	expand_size: Option<usize>,
	conversion: &ConversionArgs,
	format: OutputFormat,
) -> Result<ExitCode> {
	let config = load_config()?;
	let options = conversion
		.to_settings()
		.or(&config.conversion)
		.to_options()
		.context("Invalid conversion options")?;

	let rules = parse_rules_file(rules_path)
		.with_context(|| format!("Failed to load rules: {}", rules_path.display()))?;

	let mut remapper = Remapper::new(SourceInput::detect(input), rules, options)
		.context("Failed to load source document")?;
	remapper.set_expand_size(expand_size.unwrap_or(config.expand_size));

	let output = remapper.transform().context("Failed to apply rules")?;
	println!("{}", render(&output, format)?);

	Ok(ExitCode::SUCCESS)
}

fn handle_convert(input: &str, conversion: &ConversionArgs, format: OutputFormat) -> Result<ExitCode> {
	let config = load_config()?;
	let options = conversion
		.to_settings()
		.or(&config.conversion)
		.to_options()
		.context("Invalid conversion options")?;

	let value = SourceInput::detect(input)
		.load(&options)
		.context("Failed to load source document")?;
	println!("{}", render(&value, format)?);

	Ok(ExitCode::SUCCESS)
}

fn handle_rules_check(file: &Path, expand_size: Option<usize>) -> Result<ExitCode> {
	let expand_size = match expand_size {
		Some(size) => size,
		None => load_config()?.expand_size,
	};

	let rules = parse_rules_file(file)
		.with_context(|| format!("Failed to load rules: {}", file.display()))?;

	if rules.is_empty() {
		println!("No rules found in {}.", file.display());
		return Ok(ExitCode::SUCCESS);
	}

	println!("Rules in {} (expand size {}):\n", file.display(), expand_size);

	let mut failed = false;
	for (i, entry) in rules.entries().iter().enumerate() {
		println!("  Rule {}: {} <- {}", i + 1, entry.output, entry.input);
		match entry.expansion_len(expand_size) {
			Ok(_) if entry.is_literal() => println!("    literal"),
			Ok(candidates) => println!("    wildcard, {} candidate paths", candidates),
			Err(e) => {
				println!("    {}", e);
				failed = true;
			}
		}
	}

	if failed {
		eprintln!("Rules file has arity mismatches: {}", file.display());
		return Ok(ExitCode::FAILURE);
	}

	println!("\nAll {} rules are valid.", rules.len());
	Ok(ExitCode::SUCCESS)
}

fn handle_config_show() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let configs =
		remap_cli::config::discover_configs(&cwd).context("Failed to discover config files")?;

	if configs.is_empty() {
		println!("No configuration files found.");
		return Ok(ExitCode::SUCCESS);
	}

	println!("Configuration files (in cascade order):\n");

	for loaded in &configs {
		let config = &loaded.config;
		let conversion = &config.conversion;

		println!("# Source: {}", loaded.path.display());
		println!("# root: {}", config.root);
		if let Some(ref env_var) = config.root_config_lookup_disable_env_var {
			println!("# root-config-lookup-disable-env-var: {}", env_var);
		}
		if let Some(size) = config.expand_size {
			println!("  expand-size: {}", size);
		}
		if let Some(ref prefix) = conversion.attribute_prefix {
			println!("  attribute-prefix: {}", prefix);
		}
		if let Some(ref tags) = conversion.always_array {
			println!("  always-array: [{}]", tags.join(", "));
		}
		if let Some(auto_array) = conversion.auto_array {
			println!("  auto-array: {}", auto_array);
		}
		if let Some(ref key) = conversion.text_content_key {
			println!("  text-content-key: {}", key);
		}
		if let Some(auto_text) = conversion.auto_text {
			println!("  auto-text: {}", auto_text);
		}
		if let Some(ref separator) = conversion.namespace_separator {
			println!("  namespace-separator: {}", separator);
		}
		if let Some(ref rewrite) = conversion.key_rewrite {
			println!("  key-rewrite: {}", rewrite);
		}
		println!();
	}

	let merged = merge_configs(&configs);
	println!("Effective expand-size: {}", merged.expand_size);
	println!("Merged from:");
	for source in &merged.sources {
		println!("  {}", source.display());
	}
	println!();

	// Show user config path
	if let Ok(user_path) = user_config_path() {
		println!("User config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	match remap_cli::config::discover_configs(&cwd) {
		Ok(configs) => {
			if configs.is_empty() {
				println!("No configuration files found.");
			} else {
				println!("All configuration files are valid:");
				for loaded in &configs {
					println!("  {}", loaded.path.display());
				}
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {}", e);
			Ok(ExitCode::FAILURE)
		}
	}
}

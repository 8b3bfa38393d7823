use std::io::Read;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use serde::Serialize;
use strexpand_cli::Commands;
use strexpand_cli::HexEncoding;
use strexpand_cli::OutputFormat;
use strexpand_cli::StrexpandCli;
use strexpand_cli::parse_assignments;
use strexpand_cli::parse_value;
use strexpand_core::CONFIG_FILE_CANDIDATES;
use strexpand_core::ExpandConfig;
use strexpand_core::ExpandError;
use strexpand_core::Expander;
use strexpand_core::Registry;
use strexpand_core::Value;
use strexpand_core::decode_hex;
use strexpand_core::is_hex;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
	let args = StrexpandCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	let result = match &args.command {
		Some(Commands::Expand {
			template,
			args: values,
			set,
			format,
		}) => run_expand(&args, template, values, set, *format),
		Some(Commands::Hex {
			digits,
			encoding,
			strict,
		}) => run_hex(digits, *encoding, *strict),
		Some(Commands::List { format }) => run_list(&args, *format),
		Some(Commands::Init) => run_init(&args),
		None => {
			eprintln!("No subcommand specified. Run `strexpand --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		match e.downcast::<ExpandError>() {
			Ok(expand_err) => {
				let report: miette::Report = (*expand_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `--verbose` forces `debug`, otherwise `RUST_LOG` applies
/// with `warn` as the fallback.
fn init_tracing(verbose: bool, use_color: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.try_init()
		.ok();
}

fn resolve_root(args: &StrexpandCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// The built-ins with the project config, if any, applied on top.
fn load_registry(args: &StrexpandCli) -> Result<Registry, ExpandError> {
	let root = resolve_root(args);
	let config = ExpandConfig::load(&root)?.unwrap_or_default();
	tracing::debug!(
		root = %root.display(),
		values = config.values.len(),
		"registry ready"
	);

	Ok(config.registry())
}

fn read_template(template: &str) -> Result<String, ExpandError> {
	if template != "-" {
		return Ok(template.to_string());
	}

	let mut content = String::new();
	std::io::stdin().read_to_string(&mut content)?;
	let trimmed = content
		.strip_suffix('\n')
		.map(|text| text.strip_suffix('\r').unwrap_or(text))
		.unwrap_or(content.as_str());

	Ok(trimmed.to_string())
}

#[derive(Serialize)]
struct ExpandOutput<'a> {
	template: &'a str,
	output: &'a str,
}

fn run_expand(
	args: &StrexpandCli,
	template: &str,
	values: &[String],
	set: &[String],
	format: OutputFormat,
) -> CliResult {
	let registry = load_registry(args)?;
	let template = read_template(template)?;
	let named = parse_assignments(set)?;
	let values: Vec<Value> = values.iter().map(|value| parse_value(value)).collect();

	let output = registry.expand_with(&template, Some(&named), &values)?;

	match format {
		OutputFormat::Text => println!("{output}"),
		OutputFormat::Json => {
			let json = serde_json::to_string(&ExpandOutput {
				template: &template,
				output: &output,
			})?;
			println!("{json}");
		}
	}

	Ok(())
}

fn run_hex(digits: &str, encoding: HexEncoding, strict: bool) -> CliResult {
	if !is_hex(digits, !strict) {
		return Err(ExpandError::InvalidHex(digits.to_string()).into());
	}

	let digits: String = digits.split_whitespace().collect();
	println!("{}", decode_hex(encoding.into(), &digits));

	Ok(())
}

#[derive(Serialize)]
struct ListEntry {
	name: String,
	kind: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	value: Option<String>,
}

fn run_list(args: &StrexpandCli, format: OutputFormat) -> CliResult {
	let registry = load_registry(args)?;
	let entries: Vec<ListEntry> = registry
		.names()
		.into_iter()
		.filter_map(|name| {
			let expander = registry.resolve(&name)?;
			let (kind, value) = match expander {
				Expander::Handler(_) => ("handler", None),
				Expander::Static(value) => ("value", Some(value.to_string())),
			};
			Some(ListEntry { name, kind, value })
		})
		.collect();

	match format {
		OutputFormat::Text => {
			println!("{}", colored!("Expanders:", bold));
			for entry in &entries {
				match &entry.value {
					Some(value) => println!("  {:<12} {:<8} {value}", entry.name, entry.kind),
					None => println!("  {:<12} {}", entry.name, entry.kind),
				}
			}
			println!();
			println!("{} expander(s)", entries.len());
		}
		OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
	}

	Ok(())
}

fn run_init(args: &StrexpandCli) -> CliResult {
	let root = resolve_root(args);

	if let Some(existing) = ExpandConfig::resolve_path(&root) {
		println!("Config file already exists: {}", existing.display());
		return Ok(());
	}

	let config_path = root.join(CONFIG_FILE_CANDIDATES[0]);
	let sample_config = "# strexpand configuration\n\n# Initial value of the {COUNTER} \
	                     expander.\n# counter = 1\n\n# Static values available as named \
	                     placeholders, e.g. {APP} or {BUILD:D5}.\n[values]\nAPP = \
	                     \"strexpand\"\n# BUILD = 42\n";

	std::fs::write(&config_path, sample_config)?;
	println!(
		"{} {}",
		colored!("Created", green),
		config_path.display()
	);
	println!();
	println!("Next steps:");
	println!("  1. Add values to the [values] table");
	println!("  2. Run `strexpand list` to see every expander");
	println!("  3. Run `strexpand expand \"{{APP}} {{DATE}}\"`");

	Ok(())
}

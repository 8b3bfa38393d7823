use std::path::PathBuf;

use chrono::DateTime;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use strexpand_core::Encoding;
use strexpand_core::ExpandError;
use strexpand_core::ExpandResult;
use strexpand_core::NamedValues;
use strexpand_core::Value;
use strexpand_core::is_placeholder_key;
use uuid::Uuid;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Expand placeholders, hex escapes and positional arguments in strings.",
	long_about = "strexpand expands runtime placeholders embedded in template strings.\n\nNamed \
	              placeholders such as {DATE:yyyy-MM-dd}, {GUID:N} or {COUNTER} are resolved \
	              from built-in expanders and from the [values] table of strexpand.toml. Indexed \
	              placeholders such as {0,8:x} take the positional arguments, and hex escapes \
	              such as #41 or #u{4100} are decoded to text.\n\nQuick start:\n  strexpand \
	              expand \"{DATE} {0,-8}|\" build\n  strexpand hex 48656c6c6f\n  strexpand list\n  \
	              strexpand init"
)]
pub struct StrexpandCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Directory searched for `strexpand.toml`.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Expand a template and print the result.
	///
	/// Positional arguments are typed by inference: integers, floats, UUIDs
	/// and RFC 3339 date-times keep their type so that `{0:x}`, `{GUID-0:N}`
	/// or `{DATE-0:yyyy}` format them; anything else is a string.
	Expand {
		/// The template to expand, or `-` to read it from stdin.
		template: String,

		/// Positional arguments for `{0}`, `{1}`, … and `-INDEX` bindings.
		/// Negative numbers are accepted; other values starting with `-` go
		/// after `--`.
		#[arg(allow_negative_numbers = true)]
		args: Vec<String>,

		/// Named values for this expansion only, written as `NAME=VALUE`.
		/// They take precedence over built-ins and configured values.
		#[arg(long = "set", short = 's', value_name = "NAME=VALUE")]
		set: Vec<String>,

		/// Output format. `json` also echoes the template.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Decode a string of hex digits to text.
	Hex {
		/// Hex digits, two per byte. Whitespace between digits is ignored.
		digits: String,

		/// How the decoded bytes are interpreted.
		#[arg(long, value_enum, default_value_t = HexEncoding::Utf8)]
		encoding: HexEncoding,

		/// Reject whitespace in the digits.
		#[arg(long, default_value_t = false)]
		strict: bool,
	},
	/// List the registered expanders, including configured values.
	List {
		/// Output format for the listing.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Create a sample `strexpand.toml` in the project root.
	///
	/// If a config file already exists this command is a no-op and exits
	/// successfully.
	Init,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output.
	#[default]
	Text,
	/// JSON output for programmatic consumption.
	Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HexEncoding {
	Utf8,
	/// UTF-16, little-endian, as selected by `#u` in templates.
	Utf16le,
	/// UTF-16, big-endian, as selected by `#U` in templates.
	Utf16be,
}

impl From<HexEncoding> for Encoding {
	fn from(encoding: HexEncoding) -> Self {
		match encoding {
			HexEncoding::Utf8 => Encoding::Utf8,
			HexEncoding::Utf16le => Encoding::Utf16Le,
			HexEncoding::Utf16be => Encoding::Utf16Be,
		}
	}
}

/// Type a command line argument: integer, float, UUID, RFC 3339 date-time,
/// otherwise a string.
pub fn parse_value(text: &str) -> Value {
	if let Ok(number) = text.parse::<i64>() {
		return Value::Int(number);
	}

	if text.bytes().any(|b| b.is_ascii_digit()) {
		if let Ok(number) = text.parse::<f64>() {
			return Value::Float(number);
		}
	}

	if let Ok(guid) = Uuid::parse_str(text) {
		return Value::Guid(guid);
	}

	if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
		return Value::DateTime(datetime);
	}

	Value::Str(text.to_string())
}

/// Split a `NAME=VALUE` pair. The value is typed like a positional argument.
pub fn parse_assignment(text: &str) -> ExpandResult<(String, Value)> {
	let Some((name, value)) = text.split_once('=') else {
		return Err(ExpandError::InvalidAssignment(text.to_string()));
	};

	let name = name.trim();
	if !is_placeholder_key(name) {
		return Err(ExpandError::InvalidAssignment(text.to_string()));
	}

	Ok((name.to_string(), parse_value(value)))
}

/// Collect every `--set` pair into call-scoped named values. Later pairs win.
pub fn parse_assignments(pairs: &[String]) -> ExpandResult<NamedValues> {
	let mut named = NamedValues::new();
	for pair in pairs {
		let (name, value) = parse_assignment(pair)?;
		named.insert(name, value.into());
	}

	Ok(named)
}

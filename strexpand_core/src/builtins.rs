//! The expanders every [`Registry::new`] starts with.
//!
//! The handler functions are public so they can be registered again under
//! other names, e.g. `registry.register("NOW", Expander::handler(builtins::expand_datetime))`.

use std::path::Component;
use std::path::Path;

use chrono::Local;
use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::ExpandResult;
use crate::Expander;
use crate::HandlerCall;
use crate::Registry;
use crate::Value;
use crate::format;
use crate::format::DEFAULT_DATETIME_PATTERN;

/// Names of the date expanders. A leading `U` selects UTC.
pub const DATE_NAMES: [&str; 6] = ["DATE", "TIME", "DATETIME", "UDATE", "UTIME", "UDATETIME"];

/// Every built-in name.
pub const BUILTIN_NAMES: [&str; 13] = [
	"DATE",
	"TIME",
	"DATETIME",
	"UDATE",
	"UTIME",
	"UDATETIME",
	"GUID",
	"RANDOM",
	"COUNTER",
	"FILE",
	"TEXT",
	"ENV",
	"REPEAT",
];

pub(crate) fn install(registry: &Registry) {
	for name in DATE_NAMES {
		registry.register(name, Expander::handler(expand_datetime));
	}

	registry.register("GUID", Expander::handler(expand_guid));
	registry.register("RANDOM", Expander::handler(expand_random));
	registry.register("FILE", Expander::handler(expand_file));
	registry.register("TEXT", Expander::handler(expand_text));
	registry.register("ENV", Expander::handler(expand_env));
	registry.register("REPEAT", Expander::handler(expand_repeat));

	let counter = registry.shared_counter();
	registry.register(
		"COUNTER",
		Expander::handler(move |call| {
			let current = match call.value.and_then(Value::as_int) {
				Some(start) => counter.restart(start),
				None => counter.next(),
			};
			format::format_integer(i128::from(current), call.format)
		}),
	);
}

fn default_date_pattern(name: &str) -> &'static str {
	match name {
		"DATE" | "UDATE" => "yyyy-MM-dd",
		"TIME" | "UTIME" => "HH:mm:ss",
		"UDATETIME" => "yyyy-MM-ddTHH:mm:ssZ",
		_ => DEFAULT_DATETIME_PATTERN,
	}
}

/// `DATE`, `TIME`, `DATETIME` and their `U`-prefixed UTC variants. Without a
/// bound value the start of the expansion is used; a bound value that is not
/// a date yields the name itself.
pub fn expand_datetime(call: &HandlerCall<'_>) -> ExpandResult<String> {
	let datetime = match call.value {
		None => call.now.fixed_offset(),
		Some(value) => {
			let Some(datetime) = value.as_datetime() else {
				return Ok(call.name.to_string());
			};
			datetime
		}
	};

	let utc = call.name.starts_with('U');
	let datetime = if utc {
		datetime.with_timezone(&Utc).fixed_offset()
	} else {
		datetime.with_timezone(&Local).fixed_offset()
	};
	let pattern = if call.format.is_empty() {
		default_date_pattern(call.name)
	} else {
		call.format
	};

	format::format_datetime(&datetime, utc, pattern)
}

/// A bound identifier, or a fresh random one.
pub fn expand_guid(call: &HandlerCall<'_>) -> ExpandResult<String> {
	let guid = call
		.value
		.and_then(Value::as_guid)
		.unwrap_or_else(Uuid::new_v4);

	format::format_guid(&guid, call.format)
}

/// A bound integer, or a non-negative random one in the `i32` range.
pub fn expand_random(call: &HandlerCall<'_>) -> ExpandResult<String> {
	let number = call
		.value
		.and_then(Value::as_int)
		.unwrap_or_else(|| i64::from(rand::thread_rng().gen_range(0..i32::MAX)));

	format::format_integer(i128::from(number), call.format)
}

/// A component of a path: `BASENAME`, `SHORTNAME`, `EXTENSION`, `DIRECTORY`
/// or `ROOT`. Any other format returns the path as given.
pub fn expand_file(call: &HandlerCall<'_>) -> ExpandResult<String> {
	let Some(value) = call.value else {
		return Ok(String::new());
	};

	let text = value.to_string();
	let path = Path::new(&text);
	let part = match call.format {
		"BASENAME" => path.file_stem(),
		"SHORTNAME" => path.file_name(),
		"EXTENSION" => path.extension(),
		"DIRECTORY" => path.parent().map(Path::as_os_str),
		"ROOT" => return Ok(path_root(path)),
		_ => return Ok(text),
	};

	Ok(part
		.map(|part| part.to_string_lossy().into_owned())
		.unwrap_or_default())
}

fn path_root(path: &Path) -> String {
	path.components()
		.take_while(|component| matches!(component, Component::Prefix(_) | Component::RootDir))
		.map(|component| component.as_os_str().to_string_lossy().into_owned())
		.collect()
}

fn change_case(text: String, format: &str) -> String {
	match format {
		"LCASE" => text.to_lowercase(),
		"UCASE" => text.to_uppercase(),
		_ => text,
	}
}

/// `LCASE` or `UCASE` of the bound value. Without a value the format text is
/// returned.
pub fn expand_text(call: &HandlerCall<'_>) -> ExpandResult<String> {
	match call.value {
		Some(value) => Ok(change_case(value.to_string(), call.format)),
		None => Ok(call.format.to_string()),
	}
}

/// An environment variable. Without a bound value the format names the
/// variable; otherwise the value names it and the format changes its case.
/// Unset variables expand to nothing.
pub fn expand_env(call: &HandlerCall<'_>) -> ExpandResult<String> {
	match call.value {
		Some(value) => Ok(change_case(read_env(&value.to_string()), call.format)),
		None => Ok(read_env(call.format)),
	}
}

fn read_env(name: &str) -> String {
	if name.is_empty() || name.contains(['=', '\0']) {
		return String::new();
	}

	std::env::var(name).unwrap_or_default()
}

/// The bound value repeated `format` times. A count below one yields nothing,
/// a missing or unparsable count means once.
pub fn expand_repeat(call: &HandlerCall<'_>) -> ExpandResult<String> {
	let Some(value) = call.value else {
		return Ok(call.format.to_string());
	};

	let count = call.format.trim().parse::<i32>().unwrap_or(1);
	if count < 1 {
		return Ok(String::new());
	}

	Ok(value.to_string().repeat(count as usize))
}

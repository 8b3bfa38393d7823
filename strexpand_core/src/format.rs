//! Formatting of [`Value`]s with inline format strings.
//!
//! The format text after `:` in a placeholder is interpreted according to the
//! type of the value being formatted:
//!
//! - integers and floats accept standard specifiers (`D`, `X`, `B`, `N`, `F`,
//!   `E`, `P`, `G`, `R`, each with an optional precision such as `x8` or `N2`)
//!   and custom patterns built from `0`, `#`, `,` and `.`. In a custom pattern
//!   each `%` multiplies the number by 100 and each `,` directly before the
//!   decimal point or after the last digit divides it by 1000. The currency
//!   specifier `C` is not supported.
//! - date-times accept custom patterns (`yyyy-MM-dd HH:mm:ss`) and the
//!   single-letter standard patterns (`d`, `T`, `s`, `u`, `o`, …).
//! - identifiers accept `N`, `D`, `B`, `P` and `X`.
//! - strings, chars and booleans ignore the format.

use chrono::DateTime;
use chrono::Datelike;
use chrono::FixedOffset;
use chrono::Timelike;
use chrono::Utc;
use uuid::Uuid;

use crate::ExpandError;
use crate::ExpandResult;
use crate::Value;

/// Pattern used for date-times formatted without an explicit format.
pub const DEFAULT_DATETIME_PATTERN: &str = "yyyy-MM-dd HH:mm:ss";

const MONTHS: [&str; 12] = [
	"January",
	"February",
	"March",
	"April",
	"May",
	"June",
	"July",
	"August",
	"September",
	"October",
	"November",
	"December",
];

const DAYS: [&str; 7] = [
	"Sunday",
	"Monday",
	"Tuesday",
	"Wednesday",
	"Thursday",
	"Friday",
	"Saturday",
];

pub(crate) fn format_value(value: &Value, spec: &str) -> ExpandResult<String> {
	match value {
		Value::Str(text) => Ok(text.clone()),
		Value::Char(ch) => Ok(ch.to_string()),
		Value::Bool(flag) => Ok(flag.to_string()),
		Value::Int(number) => format_integer(i128::from(*number), spec),
		Value::UInt(number) => format_integer(i128::from(*number), spec),
		Value::Float(number) => format_float(*number, spec),
		Value::DateTime(datetime) => {
			format_datetime(datetime, datetime.offset().local_minus_utc() == 0, spec)
		}
		Value::Guid(guid) => format_guid(guid, spec),
	}
}

/// A standard numeric specifier: one letter and an optional precision of at
/// most two digits.
struct Standard {
	letter: char,
	precision: Option<usize>,
}

impl Standard {
	fn parse(spec: &str) -> Option<Self> {
		let mut chars = spec.chars();
		let letter = chars.next().filter(char::is_ascii_alphabetic)?;
		let rest = chars.as_str();
		if rest.len() > 2 || !rest.bytes().all(|b| b.is_ascii_digit()) {
			return None;
		}

		Some(Self {
			letter,
			precision: rest.parse().ok(),
		})
	}
}

pub fn format_integer(number: i128, spec: &str) -> ExpandResult<String> {
	if spec.is_empty() {
		return Ok(number.to_string());
	}

	let Some(Standard { letter, precision }) = Standard::parse(spec) else {
		let pattern = NumericPattern::parse(spec);
		if pattern.scale != 0 {
			return Ok(pattern.render_float(number as f64));
		}
		return Ok(pattern.render(number < 0, &number.unsigned_abs().to_string(), ""));
	};

	let sign = if number < 0 { "-" } else { "" };
	let magnitude = number.unsigned_abs();
	let bits = twos_complement(number);

	let text = match letter {
		'D' | 'd' => {
			format!("{sign}{magnitude:0width$}", width = precision.unwrap_or(0))
		}
		'X' => format!("{bits:0width$X}", width = precision.unwrap_or(0)),
		'x' => format!("{bits:0width$x}", width = precision.unwrap_or(0)),
		'B' | 'b' => format!("{bits:0width$b}", width = precision.unwrap_or(0)),
		'N' | 'n' => {
			let grouped = group_thousands(&magnitude.to_string());
			format!("{sign}{}", with_zero_fraction(grouped, precision.unwrap_or(2)))
		}
		'F' | 'f' => {
			format!(
				"{sign}{}",
				with_zero_fraction(magnitude.to_string(), precision.unwrap_or(2))
			)
		}
		'E' | 'e' | 'P' | 'p' => return format_float(number as f64, spec),
		'G' | 'g' | 'R' | 'r' => number.to_string(),
		_ => return Err(ExpandError::invalid_format(spec, "integer")),
	};

	Ok(text)
}

pub fn format_float(number: f64, spec: &str) -> ExpandResult<String> {
	if spec.is_empty() || !number.is_finite() {
		return Ok(number.to_string());
	}

	let Some(Standard { letter, precision }) = Standard::parse(spec) else {
		return Ok(NumericPattern::parse(spec).render_float(number));
	};

	let text = match letter {
		'F' | 'f' => format!("{number:.precision$}", precision = precision.unwrap_or(2)),
		'N' | 'n' => {
			let fixed = format!("{:.precision$}", number.abs(), precision = precision.unwrap_or(2));
			let (int_digits, frac_digits) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
			let sign = if number < 0.0 { "-" } else { "" };
			let grouped = group_thousands(int_digits);
			if frac_digits.is_empty() {
				format!("{sign}{grouped}")
			} else {
				format!("{sign}{grouped}.{frac_digits}")
			}
		}
		'E' | 'e' => scientific(number, precision.unwrap_or(6), letter),
		'P' | 'p' => {
			format!(
				"{:.precision$} %",
				number * 100.0,
				precision = precision.unwrap_or(2)
			)
		}
		'G' | 'g' | 'R' | 'r' => number.to_string(),
		_ => return Err(ExpandError::invalid_format(spec, "float")),
	};

	Ok(text)
}

/// The bit pattern printed by `X` and `B`. Negative numbers always originate
/// from an `i64` so they are shown as 64-bit two's complement.
fn twos_complement(number: i128) -> u128 {
	if number < 0 {
		u128::from((number as i64) as u64)
	} else {
		number as u128
	}
}

fn with_zero_fraction(int_digits: String, precision: usize) -> String {
	if precision == 0 {
		int_digits
	} else {
		format!("{int_digits}.{}", "0".repeat(precision))
	}
}

fn scientific(number: f64, precision: usize, letter: char) -> String {
	let text = format!("{number:.precision$e}");
	let Some((mantissa, exponent)) = text.split_once('e') else {
		return text;
	};
	let exponent: i32 = exponent.parse().unwrap_or_default();
	let sign = if exponent < 0 { '-' } else { '+' };
	let marker = if letter == 'E' { 'E' } else { 'e' };

	format!("{mantissa}{marker}{sign}{:03}", exponent.abs())
}

/// Insert `,` between every group of three integer digits.
fn group_thousands(digits: &str) -> String {
	let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
	for (position, ch) in digits.chars().enumerate() {
		if position > 0 && (digits.len() - position) % 3 == 0 {
			grouped.push(',');
		}
		grouped.push(ch);
	}

	grouped
}

/// A custom numeric pattern such as `#,##0.00` or `[000]`.
struct NumericPattern<'a> {
	/// Literal text before the first digit placeholder.
	prefix: &'a str,
	/// Literal text after the last digit placeholder.
	suffix: &'a str,
	/// False when the pattern holds no `0` or `#` at all.
	has_digits: bool,
	min_int: usize,
	grouping: bool,
	min_frac: usize,
	max_frac: usize,
	/// Power of ten applied before rendering: `+2` per `%`, `-3` per scaling
	/// comma.
	scale: i32,
}

impl<'a> NumericPattern<'a> {
	fn parse(spec: &'a str) -> Self {
		let is_digit = |ch: char| matches!(ch, '0' | '#');
		let (Some(mut start), Some(last)) = (spec.find(is_digit), spec.rfind(is_digit)) else {
			// No placeholders, the whole pattern is literal text.
			return Self {
				prefix: spec,
				suffix: "",
				has_digits: false,
				min_int: 0,
				grouping: false,
				min_frac: 0,
				max_frac: 0,
				scale: 0,
			};
		};

		if spec[..start].ends_with('.') {
			start -= 1;
		}

		let body = &spec[start..=last];
		let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
		let grouped_part = int_part.trim_end_matches(',');
		let tail = &spec[last + 1..];
		let suffix = tail.trim_start_matches(',');
		let scaling_commas = (int_part.len() - grouped_part.len()) + (tail.len() - suffix.len());
		let percents = spec[..start].matches('%').count() + suffix.matches('%').count();

		Self {
			prefix: &spec[..start],
			suffix,
			has_digits: true,
			min_int: grouped_part.matches('0').count(),
			grouping: grouped_part.contains(','),
			min_frac: frac_part.matches('0').count(),
			max_frac: frac_part.matches(is_digit).count(),
			scale: 2 * percents as i32 - 3 * scaling_commas as i32,
		}
	}

	fn render_float(&self, number: f64) -> String {
		let scaled = number * 10f64.powi(self.scale);
		let fixed = format!("{:.precision$}", scaled.abs(), precision = self.max_frac);
		let (int_digits, frac_digits) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

		self.render(scaled < 0.0, int_digits, frac_digits)
	}

	fn render(&self, negative: bool, int_digits: &str, frac_digits: &str) -> String {
		if !self.has_digits {
			let sign = if negative { "-" } else { "" };
			return format!("{sign}{}", self.prefix);
		}

		let mut frac = frac_digits.to_string();
		while frac.len() > self.min_frac && frac.ends_with('0') {
			frac.pop();
		}
		while frac.len() < self.min_frac {
			frac.push('0');
		}

		let mut int = int_digits.trim_start_matches('0').to_string();
		if int.len() < self.min_int {
			int = format!("{int:0>width$}", width = self.min_int);
		}
		if self.grouping {
			int = group_thousands(&int);
		}

		let is_zero = int.bytes().all(|b| matches!(b, b'0' | b',')) && frac.bytes().all(|b| b == b'0');
		let sign = if negative && !is_zero { "-" } else { "" };

		let mut text = format!("{sign}{}{int}", self.prefix);
		if !frac.is_empty() {
			text.push('.');
			text.push_str(&frac);
		}
		text.push_str(self.suffix);

		text
	}
}

/// Expand a single-letter standard date pattern. The flag marks patterns that
/// are always rendered in UTC.
fn standard_date_pattern(letter: char) -> Option<(&'static str, bool)> {
	let pattern = match letter {
		'd' => ("MM/dd/yyyy", false),
		'D' => ("dddd, dd MMMM yyyy", false),
		'f' => ("dddd, dd MMMM yyyy HH:mm", false),
		'F' => ("dddd, dd MMMM yyyy HH:mm:ss", false),
		'g' => ("MM/dd/yyyy HH:mm", false),
		'G' => ("MM/dd/yyyy HH:mm:ss", false),
		'M' | 'm' => ("MMMM dd", false),
		'o' | 'O' => ("yyyy'-'MM'-'dd'T'HH':'mm':'ss'.'fffffffK", false),
		'R' | 'r' => ("ddd, dd MMM yyyy HH':'mm':'ss 'GMT'", true),
		's' => ("yyyy'-'MM'-'dd'T'HH':'mm':'ss", false),
		't' => ("HH:mm", false),
		'T' => ("HH:mm:ss", false),
		'u' => ("yyyy'-'MM'-'dd HH':'mm':'ss'Z'", true),
		'Y' | 'y' => ("yyyy MMMM", false),
		_ => return None,
	};

	Some(pattern)
}

/// Format a date-time. `utc` controls how `K` is rendered.
pub fn format_datetime(
	datetime: &DateTime<FixedOffset>,
	utc: bool,
	spec: &str,
) -> ExpandResult<String> {
	let invalid = || ExpandError::invalid_format(spec, "date-time");
	let spec_or_default = if spec.is_empty() {
		DEFAULT_DATETIME_PATTERN
	} else {
		spec
	};

	let mut chars = spec_or_default.chars();
	if let (Some(letter), None) = (chars.next(), chars.next()) {
		let (pattern, force_utc) = standard_date_pattern(letter).ok_or_else(invalid)?;
		if force_utc {
			let datetime = datetime.with_timezone(&Utc).fixed_offset();
			return render_date_pattern(&datetime, true, pattern).ok_or_else(invalid);
		}
		return render_date_pattern(datetime, utc, pattern).ok_or_else(invalid);
	}

	render_date_pattern(datetime, utc, spec_or_default).ok_or_else(invalid)
}

/// Render a custom date pattern. Returns `None` for unterminated quotes, a
/// trailing escape or more than seven fraction digits.
fn render_date_pattern(datetime: &DateTime<FixedOffset>, utc: bool, pattern: &str) -> Option<String> {
	let chars: Vec<char> = pattern.chars().collect();
	let mut text = String::with_capacity(pattern.len() + 8);
	let mut cursor = 0;

	while cursor < chars.len() {
		let ch = chars[cursor];
		match ch {
			'\'' | '"' => {
				let close = chars[cursor + 1..].iter().position(|c| *c == ch)?;
				text.extend(&chars[cursor + 1..cursor + 1 + close]);
				cursor += close + 2;
			}
			'\\' => {
				text.push(*chars.get(cursor + 1)?);
				cursor += 2;
			}
			'%' => cursor += 1,
			'y' | 'M' | 'd' | 'h' | 'H' | 'm' | 's' | 'f' | 'F' | 't' | 'z' | 'g' | 'K' => {
				let run = chars[cursor..].iter().take_while(|c| **c == ch).count();
				push_date_field(&mut text, datetime, utc, ch, run)?;
				cursor += run;
			}
			_ => {
				text.push(ch);
				cursor += 1;
			}
		}
	}

	Some(text)
}

fn push_date_field(
	text: &mut String,
	datetime: &DateTime<FixedOffset>,
	utc: bool,
	field: char,
	run: usize,
) -> Option<()> {
	let padded = |value: u32| {
		if run == 1 {
			value.to_string()
		} else {
			format!("{value:02}")
		}
	};

	match field {
		'y' => {
			let year = datetime.year();
			let rendered = match run {
				1 => (year % 100).to_string(),
				2 => format!("{:02}", year % 100),
				_ => format!("{year:0run$}"),
			};
			text.push_str(&rendered);
		}
		'M' => {
			let name = MONTHS[datetime.month0() as usize];
			match run {
				1 | 2 => text.push_str(&padded(datetime.month())),
				3 => text.push_str(&name[..3]),
				_ => text.push_str(name),
			}
		}
		'd' => {
			let name = DAYS[datetime.weekday().num_days_from_sunday() as usize];
			match run {
				1 | 2 => text.push_str(&padded(datetime.day())),
				3 => text.push_str(&name[..3]),
				_ => text.push_str(name),
			}
		}
		'h' => text.push_str(&padded(datetime.hour12().1)),
		'H' => text.push_str(&padded(datetime.hour())),
		'm' => text.push_str(&padded(datetime.minute())),
		's' => text.push_str(&padded(datetime.second())),
		'f' | 'F' => {
			if run > 7 {
				return None;
			}
			let nanos = format!("{:09}", datetime.nanosecond() % 1_000_000_000);
			let mut digits = &nanos[..run];
			if field == 'F' {
				digits = digits.trim_end_matches('0');
				if digits.is_empty() && text.ends_with('.') {
					text.pop();
				}
			}
			text.push_str(digits);
		}
		't' => {
			let marker = if datetime.hour() >= 12 { "PM" } else { "AM" };
			text.push_str(if run == 1 { &marker[..1] } else { marker });
		}
		'z' => text.push_str(&offset_text(datetime, run)),
		'K' => {
			if utc {
				text.push('Z');
			} else {
				text.push_str(&offset_text(datetime, 3));
			}
		}
		'g' => text.push_str("A.D."),
		_ => {}
	}

	Some(())
}

fn offset_text(datetime: &DateTime<FixedOffset>, run: usize) -> String {
	let seconds = datetime.offset().local_minus_utc();
	let sign = if seconds < 0 { '-' } else { '+' };
	let hours = seconds.abs() / 3600;
	let minutes = seconds.abs() % 3600 / 60;

	match run {
		1 => format!("{sign}{hours}"),
		2 => format!("{sign}{hours:02}"),
		_ => format!("{sign}{hours:02}:{minutes:02}"),
	}
}

pub fn format_guid(guid: &Uuid, spec: &str) -> ExpandResult<String> {
	let text = match spec {
		"" | "D" | "d" => guid.hyphenated().to_string(),
		"N" | "n" => guid.simple().to_string(),
		"B" | "b" => guid.braced().to_string(),
		"P" | "p" => format!("({})", guid.hyphenated()),
		"X" | "x" => {
			let (first, second, third, rest) = guid.as_fields();
			let rest = rest
				.iter()
				.map(|byte| format!("0x{byte:02x}"))
				.collect::<Vec<_>>()
				.join(",");
			format!("{{0x{first:08x},0x{second:04x},0x{third:04x},{{{rest}}}}}")
		}
		_ => return Err(ExpandError::invalid_format(spec, "guid")),
	};

	Ok(text)
}

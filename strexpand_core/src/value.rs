use std::fmt::Display;

use chrono::DateTime;
use chrono::FixedOffset;
use chrono::Local;
use chrono::Utc;
use float_cmp::approx_eq;
use uuid::Uuid;

use crate::ExpandResult;
use crate::format;

/// A runtime value supplied to an expansion, either positionally or as a
/// static named entry.
#[derive(Debug, Clone)]
pub enum Value {
	Str(String),
	Char(char),
	Bool(bool),
	Int(i64),
	UInt(u64),
	Float(f64),
	/// A point in time. Date expanders convert it to local time or UTC.
	DateTime(DateTime<FixedOffset>),
	Guid(Uuid),
}

impl Value {
	/// Human readable name of the variant, used in error messages.
	pub fn kind(&self) -> &'static str {
		match self {
			Value::Str(_) => "string",
			Value::Char(_) => "char",
			Value::Bool(_) => "bool",
			Value::Int(_) | Value::UInt(_) => "integer",
			Value::Float(_) => "float",
			Value::DateTime(_) => "date-time",
			Value::Guid(_) => "guid",
		}
	}

	/// Format the value with an inline format string. An empty format gives
	/// the same text as `Display`.
	pub fn format(&self, spec: &str) -> ExpandResult<String> {
		format::format_value(self, spec)
	}

	/// The value as a signed integer, if it is one.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Value::Int(value) => Some(*value),
			Value::UInt(value) => i64::try_from(*value).ok(),
			_ => None,
		}
	}

	pub fn as_datetime(&self) -> Option<DateTime<FixedOffset>> {
		match self {
			Value::DateTime(value) => Some(*value),
			_ => None,
		}
	}

	/// The value as an identifier. Strings holding a valid UUID are accepted.
	pub fn as_guid(&self) -> Option<Uuid> {
		match self {
			Value::Guid(value) => Some(*value),
			Value::Str(value) => Uuid::parse_str(value).ok(),
			_ => None,
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Value::Str(value), Value::Str(other_value)) => value == other_value,
			(Value::Char(value), Value::Char(other_value)) => value == other_value,
			(Value::Bool(value), Value::Bool(other_value)) => value == other_value,
			(Value::Int(value), Value::Int(other_value)) => value == other_value,
			(Value::UInt(value), Value::UInt(other_value)) => value == other_value,
			(Value::Float(value), Value::Float(other_value)) => {
				approx_eq!(f64, *value, *other_value, ulps = 2)
			}
			(Value::DateTime(value), Value::DateTime(other_value)) => value == other_value,
			(Value::Guid(value), Value::Guid(other_value)) => value == other_value,
			_ => false,
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Str(value) => write!(f, "{value}"),
			Value::Char(value) => write!(f, "{value}"),
			Value::Bool(value) => write!(f, "{value}"),
			Value::Int(value) => write!(f, "{value}"),
			Value::UInt(value) => write!(f, "{value}"),
			Value::Float(value) => write!(f, "{value}"),
			Value::DateTime(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S")),
			Value::Guid(value) => write!(f, "{}", value.hyphenated()),
		}
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::Str(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::Str(value.to_string())
	}
}

impl From<char> for Value {
	fn from(value: char) -> Self {
		Value::Char(value)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

macro_rules! impl_from_int {
	($variant:ident, $target:ty, $($source:ty),+) => {
		$(
			impl From<$source> for Value {
				fn from(value: $source) -> Self {
					Value::$variant(<$target>::from(value))
				}
			}
		)+
	};
}

impl_from_int!(Int, i64, i8, i16, i32, i64);
impl_from_int!(UInt, u64, u8, u16, u32, u64);

impl From<usize> for Value {
	fn from(value: usize) -> Self {
		Value::UInt(value as u64)
	}
}

impl From<f32> for Value {
	fn from(value: f32) -> Self {
		Value::Float(f64::from(value))
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Float(value)
	}
}

impl From<DateTime<FixedOffset>> for Value {
	fn from(value: DateTime<FixedOffset>) -> Self {
		Value::DateTime(value)
	}
}

impl From<DateTime<Utc>> for Value {
	fn from(value: DateTime<Utc>) -> Self {
		Value::DateTime(value.fixed_offset())
	}
}

impl From<DateTime<Local>> for Value {
	fn from(value: DateTime<Local>) -> Self {
		Value::DateTime(value.fixed_offset())
	}
}

impl From<Uuid> for Value {
	fn from(value: Uuid) -> Self {
		Value::Guid(value)
	}
}

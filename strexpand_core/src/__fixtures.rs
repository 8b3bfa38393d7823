use chrono::DateTime;
use chrono::FixedOffset;
use uuid::Uuid;

use crate::Expander;
use crate::Registry;

pub const GUID_TEXT: &str = "936da01f-9abd-4d9d-80c7-02af85c822a8";

pub fn guid() -> Uuid {
	Uuid::parse_str(GUID_TEXT).expect("valid uuid")
}

/// Tuesday 2024-03-05 13:07:09.1234567 at UTC+2.
pub fn datetime() -> DateTime<FixedOffset> {
	DateTime::parse_from_rfc3339("2024-03-05T13:07:09.1234567+02:00").expect("valid date-time")
}

/// The same wall-clock time as [`datetime`] in UTC, without fractional
/// seconds.
pub fn utc_datetime() -> DateTime<FixedOffset> {
	DateTime::parse_from_rfc3339("2024-03-05T13:07:09Z").expect("valid date-time")
}

/// Built-ins plus a couple of static entries.
pub fn registry() -> Registry {
	let registry = Registry::new();
	registry.register("APP", Expander::value("demo"));
	registry.register("NUM", Expander::value(42));
	registry
}

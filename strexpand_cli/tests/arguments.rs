use chrono::DateTime;
use rstest::rstest;
use similar_asserts::assert_eq;
use strexpand_cli::parse_assignment;
use strexpand_cli::parse_assignments;
use strexpand_cli::parse_value;
use strexpand_core::AnyEmptyResult;
use strexpand_core::ExpandError;
use strexpand_core::Expander;
use strexpand_core::Value;
use uuid::Uuid;

#[rstest]
#[case::integer("42", Value::Int(42))]
#[case::negative("-7", Value::Int(-7))]
#[case::float("1.5", Value::Float(1.5))]
#[case::exponent("1e3", Value::Float(1000.0))]
#[case::infinity_word("inf", Value::from("inf"))]
#[case::nan_word("NaN", Value::from("NaN"))]
#[case::guid(
	"936da01f-9abd-4d9d-80c7-02af85c822a8",
	Value::Guid(Uuid::from_u128(0x936d_a01f_9abd_4d9d_80c7_02af_85c8_22a8))
)]
#[case::text("hello", Value::from("hello"))]
#[case::empty("", Value::from(""))]
fn infers_argument_types(#[case] input: &str, #[case] expected: Value) {
	assert_eq!(parse_value(input), expected);
}

#[test]
fn infers_datetimes() -> AnyEmptyResult {
	let expected = DateTime::parse_from_rfc3339("2024-03-05T13:07:09+02:00")?;
	assert_eq!(
		parse_value("2024-03-05T13:07:09+02:00"),
		Value::DateTime(expected)
	);

	Ok(())
}

#[rstest]
#[case::text("NAME=value", "NAME", Value::from("value"))]
#[case::typed("N=1", "N", Value::Int(1))]
#[case::equals_in_value("A=b=c", "A", Value::from("b=c"))]
#[case::padded_name(" A =x", "A", Value::from("x"))]
#[case::empty_value("A=", "A", Value::from(""))]
fn parses_assignments(
	#[case] input: &str,
	#[case] name: &str,
	#[case] value: Value,
) -> AnyEmptyResult {
	assert_eq!(parse_assignment(input)?, (name.to_string(), value));

	Ok(())
}

#[rstest]
#[case::missing_equals("novalue")]
#[case::missing_name("=x")]
#[case::digit_led("9A=1")]
#[case::dashed("MY-NAME=1")]
fn rejects_assignments(#[case] input: &str) {
	let error = parse_assignment(input).unwrap_err();
	assert!(matches!(error, ExpandError::InvalidAssignment(ref text) if text == input));
}

#[test]
fn later_assignments_win() -> AnyEmptyResult {
	let named = parse_assignments(&["A=1".to_string(), "A=2".to_string()])?;
	assert_eq!(named.len(), 1);

	let Some(Expander::Static(value)) = named.get("A") else {
		panic!("expected a static value");
	};
	assert_eq!(value, &Value::Int(2));

	Ok(())
}

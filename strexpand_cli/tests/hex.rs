mod common;

use rstest::rstest;

#[rstest]
#[case::utf8(&["hex", "48656c6c6f"], "Hello\n")]
#[case::spaced(&["hex", "48 65 6c"], "Hel\n")]
#[case::odd_digit(&["hex", "414"], "A\u{4}\n")]
#[case::utf16le(&["hex", "41004200", "--encoding", "utf16le"], "AB\n")]
#[case::utf16be(&["hex", "00410042", "--encoding", "utf16be"], "AB\n")]
#[case::multibyte(&["hex", "c3a9"], "é\n")]
fn decodes_hex(#[case] args: &[&str], #[case] expected: &str) {
	common::strexpand_cmd()
		.args(args)
		.assert()
		.success()
		.stdout(expected.to_string());
}

#[rstest]
#[case::not_hex(&["hex", "zz"])]
#[case::strict_whitespace(&["hex", "48 65", "--strict"])]
#[case::blank(&["hex", "  "])]
fn rejects_invalid_hex(#[case] args: &[&str]) {
	common::strexpand_cmd()
		.args(args)
		.assert()
		.code(2)
		.stderr(predicates::str::contains("is not a hex string"));
}

mod common;

use similar_asserts::assert_eq;
use strexpand_core::AnyEmptyResult;
use strexpand_core::builtins::BUILTIN_NAMES;

#[test]
fn lists_builtins() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	let assert = common::strexpand_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();
	let stdout = String::from_utf8(assert.get_output().stdout.clone())?;

	for name in BUILTIN_NAMES {
		assert!(stdout.contains(name), "missing {name}");
	}
	assert!(stdout.contains(&format!("{} expander(s)", BUILTIN_NAMES.len())));

	Ok(())
}

#[test]
fn lists_configured_values_in_order() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("strexpand.toml"),
		"[values]\nAPP = \"demo\"\nZED = 3\n",
	)?;

	let assert = common::strexpand_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();
	let stdout = String::from_utf8(assert.get_output().stdout.clone())?;

	let expected = "\
Expanders:
  APP          value    demo
  COUNTER      handler
  DATE         handler
  DATETIME     handler
  ENV          handler
  FILE         handler
  GUID         handler
  RANDOM       handler
  REPEAT       handler
  TEXT         handler
  TIME         handler
  UDATE        handler
  UDATETIME    handler
  UTIME        handler
  ZED          value    3

15 expander(s)
";
	assert_eq!(stdout, expected);

	Ok(())
}

#[test]
fn lists_as_json() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join(".strexpand.toml"), "[values]\nAPP = \"demo\"\n")?;

	let assert = common::strexpand_cmd()
		.args(["list", "--format", "json", "--path"])
		.arg(tmp.path())
		.assert()
		.success();
	let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
	let entries = json.as_array().expect("json array");

	assert_eq!(entries.len(), BUILTIN_NAMES.len() + 1);
	assert_eq!(entries[0]["name"], "APP");
	assert_eq!(entries[0]["kind"], "value");
	assert_eq!(entries[0]["value"], "demo");
	assert_eq!(entries[1]["name"], "COUNTER");
	assert_eq!(entries[1]["kind"], "handler");
	assert!(entries[1].get("value").is_none());

	Ok(())
}

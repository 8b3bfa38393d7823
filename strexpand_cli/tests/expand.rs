mod common;

use strexpand_core::AnyEmptyResult;

#[test]
fn expands_positional_arguments() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::strexpand_cmd()
		.arg("expand")
		.arg("{0,5:x}|{1,-3}|")
		.arg("42")
		.arg("ab")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("   2a|ab |\n");

	Ok(())
}

#[test]
fn negative_numbers_are_arguments() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::strexpand_cmd()
		.args(["expand", "{0:D3}", "-5", "--path"])
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("-005\n");

	Ok(())
}

#[test]
fn flags_after_arguments_take_effect() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("strexpand.toml"), "[values]\nAPP = \"demo\"\n")?;

	let output = common::strexpand_cmd()
		.args([
			"expand",
			"{APP}|{USER}|{0}|{1}|{2}",
			"x",
			"--set",
			"USER=ada",
			"--format",
			"json",
			"--path",
		])
		.arg(tmp.path())
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	let json: serde_json::Value = serde_json::from_slice(&output)?;
	assert_eq!(json["output"], "demo|ada|x|{1}|{2}");

	Ok(())
}

#[test]
fn path_after_arguments_loads_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("strexpand.toml"), "counter = \"ten\"\n")?;

	common::strexpand_cmd()
		.args(["expand", "{0}|{1}|{2}", "x", "-5", "--path"])
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to parse config file"));

	Ok(())
}

#[test]
fn hyphenated_text_after_separator() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::strexpand_cmd()
		.args(["expand", "{0}{1}", "--path"])
		.arg(tmp.path())
		.args(["--", "a", "--path"])
		.assert()
		.success()
		.stdout("a--path\n");

	Ok(())
}

#[test]
fn typed_arguments() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::strexpand_cmd()
		.args([
			"expand",
			"{GUID-0:N} {UDATE-1} {2:F1}",
			"936da01f-9abd-4d9d-80c7-02af85c822a8",
			"2024-03-05T13:07:09Z",
			"2.75",
		])
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("936da01f9abd4d9d80c702af85c822a8 2024-03-05 2.8\n");

	Ok(())
}

#[test]
fn set_overrides_named_values() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("strexpand.toml"),
		"[values]\nUSER = \"config\"\n",
	)?;

	common::strexpand_cmd()
		.args(["expand", "{USER} #21", "--set", "USER=ada"])
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("ada !\n");

	Ok(())
}

#[test]
fn reads_template_from_stdin() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::strexpand_cmd()
		.args(["expand", "-", "7", "--path"])
		.arg(tmp.path())
		.write_stdin("n={0:D3}\n")
		.assert()
		.success()
		.stdout("n=007\n");

	Ok(())
}

#[test]
fn json_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	let output = common::strexpand_cmd()
		.args(["expand", "{0}", "x", "--format", "json", "--path"])
		.arg(tmp.path())
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	let json: serde_json::Value = serde_json::from_slice(&output)?;
	assert_eq!(json["template"], "{0}");
	assert_eq!(json["output"], "x");

	Ok(())
}

#[test]
fn uses_configured_values_and_counter() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("strexpand.toml"),
		"counter = 5\n\n[values]\nAPP = \"demo\"\n",
	)?;

	common::strexpand_cmd()
		.args(["expand", "{APP}-{COUNTER}-{COUNTER}", "--path"])
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("demo-5-6\n");

	Ok(())
}

#[test]
fn unresolved_placeholders_are_kept() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::strexpand_cmd()
		.args(["expand", "{NOPE} {3}", "a", "--path"])
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("{NOPE} {3}\n");

	Ok(())
}

#[test]
fn invalid_assignment_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::strexpand_cmd()
		.args(["expand", "{A}", "--set", "9A=1", "--path"])
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("invalid assignment"));

	Ok(())
}

#[test]
fn invalid_format_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::strexpand_cmd()
		.args(["expand", "{0:Q}", "5", "--path"])
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("invalid format"));

	Ok(())
}

#[test]
fn invalid_config_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("strexpand.toml"), "counter = \"ten\"\n")?;

	common::strexpand_cmd()
		.args(["expand", "{0}", "x", "--path"])
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to parse config file"));

	Ok(())
}

#[test]
fn verbose_logs_to_stderr() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::strexpand_cmd()
		.args(["--verbose", "expand", "{NOPE}", "--path"])
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("{NOPE}\n")
		.stderr(predicates::str::contains("unresolved placeholder"));

	Ok(())
}

#[test]
fn missing_subcommand_exits_with_one() {
	common::strexpand_cmd()
		.assert()
		.code(1)
		.stderr(predicates::str::contains("No subcommand specified"));
}

mod common;

use strexpand_core::AnyEmptyResult;
use strexpand_core::ExpandConfig;

#[test]
fn can_init() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::strexpand_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Created"))
		.stdout(predicates::str::contains("Next steps"));

	let config_path = tmp.path().join("strexpand.toml");
	assert!(config_path.exists());

	let content = std::fs::read_to_string(&config_path)?;
	assert!(content.contains("[values]"));

	Ok(())
}

#[test]
fn init_does_not_overwrite() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let existing = tmp.path().join(".strexpand.toml");
	std::fs::write(&existing, "counter = 3\n")?;

	common::strexpand_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already exists"));

	assert_eq!(std::fs::read_to_string(&existing)?, "counter = 3\n");
	assert!(!tmp.path().join("strexpand.toml").exists());

	Ok(())
}

#[test]
fn init_creates_valid_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::strexpand_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	let config = ExpandConfig::load(tmp.path())?.expect("config should be discovered");
	assert!(config.values.contains_key("APP"));

	common::strexpand_cmd()
		.args(["expand", "{APP}", "--path"])
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("strexpand\n");

	Ok(())
}

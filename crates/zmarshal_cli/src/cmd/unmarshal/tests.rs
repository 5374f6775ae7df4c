use crate::cmd::test_support::{run_zmarshal, run_zmarshal_json, run_zmarshal_stdout};

#[test]
fn unmarshal_flamingo_text() {
	let stdout = run_zmarshal_stdout(&["unmarshal", "{MyColor:\"pink\"}(=Animal)"]);
	assert_eq!(stdout, "type: Animal\ncolor: pink\n");
}

#[test]
fn unmarshal_json_lists_bindings() {
	let json = run_zmarshal_json(&["unmarshal", "{MyColor:\"red\"}(=main.Plant)", "--style", "qualified", "--json"]);
	assert_eq!(json["type"], "Plant");
	assert_eq!(json["color"], "red");
	assert_eq!(json["naming"], "qualified");
	assert_eq!(json["bindings"], serde_json::json!(["main.Animal", "main.Plant"]));
}

#[test]
fn unmarshal_versioned_name_into_legacy_type() {
	let json = run_zmarshal_json(&[
		"unmarshal",
		"{MyColor:\"grey\"}(=Animal.v0)",
		"--bind",
		"Animal.v0=legacy-animal",
		"--bind",
		"Animal=animal",
		"--json",
	]);
	assert_eq!(json["type"], "LegacyAnimal");
	assert_eq!(json["color"], "grey");
	assert_eq!(json["bindings"], serde_json::json!(["Animal", "Animal.v0"]));
}

#[test]
fn unmarshal_unbound_name_fails() {
	let output = run_zmarshal(&["unmarshal", "{MyColor:\"blue\"}(=Bird)"]);
	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("Bird"), "unexpected stderr: {stderr}");
}

#[test]
fn unmarshal_strict_rejects_unknown_fields() {
	let payload = "{MyColor:\"pink\",Legs:2}(=Animal)";
	assert_eq!(run_zmarshal_json(&["unmarshal", payload, "--json"])["color"], "pink");

	let output = run_zmarshal(&["unmarshal", payload, "--strict"]);
	assert!(!output.status.success());
}

#[test]
fn unmarshal_style_picks_the_implicit_names() {
	let json = run_zmarshal_json(&["unmarshal", "{MyColor:\"pink\"}(=Animal)", "--json"]);
	assert_eq!(json["naming"], "simple");
	assert_eq!(json["bindings"], serde_json::json!(["Animal", "Plant"]));

	let output = run_zmarshal(&["unmarshal", "{MyColor:\"pink\"}(=Animal)", "--style", "qualified"]);
	assert!(!output.status.success(), "simple name is unbound under qualified bindings");
}

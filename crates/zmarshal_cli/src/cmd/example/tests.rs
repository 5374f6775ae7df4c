use super::lines;
use crate::cmd::test_support::run_zmarshal_stdout;

#[test]
fn simple_names_decorate_each_thing() {
	let lines = lines(1).expect("example runs");
	assert_eq!(lines, ["{MyColor:\"red\"}(=Plant)", "{MyColor:\"pink\"}(=Animal)"]);
}

#[test]
fn flamingo_keeps_its_color_and_type() {
	assert_eq!(lines(2).expect("example runs"), ["The flamingo is pink"]);
	assert_eq!(lines(3).expect("example runs"), ["The flamingo is an Animal? true"]);
}

#[test]
fn qualified_and_explicit_names() {
	assert_eq!(
		lines(4).expect("example runs"),
		["{MyColor:\"red\"}(=main.Plant)", "{MyColor:\"pink\"}(=main.Animal)"]
	);
	assert_eq!(
		lines(5).expect("example runs"),
		["{MyColor:\"red\"}(=Plant.v0)", "{MyColor:\"pink\"}(=Animal.v0)"]
	);
}

#[test]
fn example_command_prints_lines() {
	let stdout = run_zmarshal_stdout(&["example", "2"]);
	assert_eq!(stdout.trim_end(), "The flamingo is pink");
}

use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

static ZMARSHAL_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn run_zmarshal(args: &[&str]) -> Output {
	Command::new(zmarshal_bin()).args(args).output().expect("zmarshal command executes")
}

pub(crate) fn run_zmarshal_stdout(args: &[&str]) -> String {
	let output = run_zmarshal(args);
	assert!(
		output.status.success(),
		"zmarshal command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	String::from_utf8(output.stdout).expect("stdout should be utf-8")
}

pub(crate) fn run_zmarshal_json(args: &[&str]) -> serde_json::Value {
	let stdout = run_zmarshal_stdout(args);
	serde_json::from_str(&stdout).expect("stdout should be valid json")
}

fn zmarshal_bin() -> &'static PathBuf {
	ZMARSHAL_BIN.get_or_init(resolve_zmarshal_bin)
}

fn resolve_zmarshal_bin() -> PathBuf {
	if let Some(path) = option_env!("CARGO_BIN_EXE_zmarshal") {
		return PathBuf::from(path);
	}

	let mut bin = zmarshal_testkit::target_dir().join("debug");
	bin.push(if cfg!(windows) { "zmarshal.exe" } else { "zmarshal" });

	let status = Command::new("cargo")
		.current_dir(zmarshal_testkit::workspace_root())
		.args(["build", "--quiet", "--bin", "zmarshal"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build zmarshal binary at {}", bin.display());

	bin
}

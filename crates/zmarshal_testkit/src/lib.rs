//! Shared demonstration types and test helpers for workspace crates.

use std::path::{Path, PathBuf};

/// Garden domain: things with a color behind one interface.
pub mod garden;

pub use garden::{Animal, Garden, Gardener, LegacyAnimal, Link, Plant, Sprinkler, Thing, Walkie, make, thing_descriptors};

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

use std::fmt;

use crate::zson::{Result, ZsonError};

/// How a concrete type's decoration is derived from its identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NamingPolicy {
	/// Bare type identifier, e.g. `Animal`.
	#[default]
	Simple,
	/// Namespace-prefixed identifier, e.g. `main.Animal`.
	Qualified,
	/// Package path plus identifier, with an optional `@version` suffix.
	Full,
	/// Caller-supplied names only; types without one cannot be named.
	Explicit,
}

impl NamingPolicy {
	/// Stable lowercase label.
	pub fn label(self) -> &'static str {
		match self {
			NamingPolicy::Simple => "simple",
			NamingPolicy::Qualified => "qualified",
			NamingPolicy::Full => "full",
			NamingPolicy::Explicit => "explicit",
		}
	}
}

impl fmt::Display for NamingPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// Implementation identifier a naming policy renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeIdent {
	namespace: Box<str>,
	name: Box<str>,
	path: Option<Box<str>>,
	version: Option<Box<str>>,
}

impl TypeIdent {
	/// Identifier `name` declared in `namespace`.
	pub fn new(namespace: &str, name: &str) -> Self {
		Self {
			namespace: namespace.into(),
			name: name.into(),
			path: None,
			version: None,
		}
	}

	/// Attach the full package path used by [`NamingPolicy::Full`].
	pub fn with_path(mut self, path: &str) -> Self {
		self.path = Some(path.into());
		self
	}

	/// Attach a version suffix used by [`NamingPolicy::Full`].
	pub fn with_version(mut self, version: &str) -> Self {
		self.version = Some(version.into());
		self
	}

	/// Bare identifier.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Declaring namespace.
	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	/// Full package path, if one was attached.
	pub fn path(&self) -> Option<&str> {
		self.path.as_deref()
	}

	/// Version suffix, if one was attached.
	pub fn version(&self) -> Option<&str> {
		self.version.as_deref()
	}

	/// Render the decoration for `policy`; `None` under [`NamingPolicy::Explicit`].
	pub fn render(&self, policy: NamingPolicy) -> Option<String> {
		match policy {
			NamingPolicy::Simple => Some(self.name.to_string()),
			NamingPolicy::Qualified => Some(format!("{}.{}", self.namespace, self.name)),
			NamingPolicy::Full => {
				let package = self.path.as_deref().unwrap_or(&self.namespace);
				Some(match &self.version {
					Some(version) => format!("{package}.{}@{version}", self.name),
					None => format!("{package}.{}", self.name),
				})
			}
			NamingPolicy::Explicit => None,
		}
	}
}

/// Reject names that cannot be used as a decoration.
pub fn validate_type_name(name: &str) -> Result<()> {
	if name.is_empty() || name.chars().any(char::is_control) {
		return Err(ZsonError::InvalidTypeName { name: name.to_owned() });
	}
	Ok(())
}

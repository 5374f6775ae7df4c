use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::zson::{NamingPolicy, Record, Result, TypeDescriptor, Variant, ZsonError, validate_type_name};

type Constructor = Box<dyn Fn() -> Box<dyn Variant> + Send + Sync>;

/// Registry configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryOptions {
	/// Policy used to derive names for implicit bindings.
	pub naming: NamingPolicy,
	/// Keep accepting bindings after the first lookup.
	pub allow_late_binding: bool,
}

/// A type name bound to a concrete type and its constructor.
pub struct Binding {
	name: Box<str>,
	descriptor: &'static TypeDescriptor,
	construct: Constructor,
}

impl Binding {
	/// Bound type name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Descriptor of the bound type.
	pub fn descriptor(&self) -> &'static TypeDescriptor {
		self.descriptor
	}

	/// Fresh instance ready to be populated.
	pub fn construct(&self) -> Box<dyn Variant> {
		(self.construct)()
	}
}

impl fmt::Debug for Binding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Binding")
			.field("name", &self.name)
			.field("type_name", &self.descriptor.type_name())
			.finish_non_exhaustive()
	}
}

/// Type names the unmarshaler can resolve.
///
/// Bindings are append-only: a name keeps its first type, and rebinding the
/// same type under the same name is a no-op. The first [`Registry::resolve`]
/// seals the registry unless late binding is allowed.
#[derive(Debug, Default)]
pub struct Registry {
	bindings: HashMap<Box<str>, Binding>,
	options: RegistryOptions,
	sealed: AtomicBool,
}

impl Registry {
	/// Empty registry with default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Empty registry with explicit options.
	pub fn with_options(options: RegistryOptions) -> Self {
		Self {
			options,
			..Self::default()
		}
	}

	/// Active options.
	pub fn options(&self) -> RegistryOptions {
		self.options
	}

	/// Bind `name` to `R`, constructing instances with `R::default()`.
	pub fn register<R: Record>(&mut self, name: &str) -> Result<()> {
		self.register_named(name, R::descriptor())
	}

	/// Bind `name` to the type `descriptor` describes.
	pub fn register_named(&mut self, name: &str, descriptor: &'static TypeDescriptor) -> Result<()> {
		self.insert(name, descriptor, Box::new(move || descriptor.construct()))
	}

	/// Bind `name` to `R` with a custom constructor.
	pub fn register_with<R: Record>(&mut self, name: &str, constructor: fn() -> R) -> Result<()> {
		self.insert(name, R::descriptor(), Box::new(move || Box::new(constructor()) as Box<dyn Variant>))
	}

	/// Bind `R` under the name the naming policy renders for it.
	pub fn register_implicit<R: Record>(&mut self) -> Result<Box<str>> {
		self.register_descriptor(R::descriptor())
	}

	/// Bind each descriptor under the name the naming policy renders for it.
	pub fn register_descriptors(&mut self, descriptors: impl IntoIterator<Item = &'static TypeDescriptor>) -> Result<()> {
		for descriptor in descriptors {
			self.register_descriptor(descriptor)?;
		}
		Ok(())
	}

	fn register_descriptor(&mut self, descriptor: &'static TypeDescriptor) -> Result<Box<str>> {
		let name = descriptor.ident().render(self.options.naming).ok_or(ZsonError::UnnamedType {
			type_name: descriptor.type_name(),
		})?;
		self.insert(&name, descriptor, Box::new(move || descriptor.construct()))?;
		Ok(name.into_boxed_str())
	}

	fn insert(&mut self, name: &str, descriptor: &'static TypeDescriptor, construct: Constructor) -> Result<()> {
		validate_type_name(name)?;
		if *self.sealed.get_mut() && !self.options.allow_late_binding {
			return Err(ZsonError::RegistryFrozen { name: name.to_owned() });
		}

		if let Some(existing) = self.bindings.get(name) {
			if existing.descriptor.type_id() == descriptor.type_id() {
				return Ok(());
			}
			return Err(ZsonError::DuplicateBinding {
				name: name.to_owned(),
				existing: existing.descriptor.type_name(),
				requested: descriptor.type_name(),
			});
		}

		debug!(name, type_name = descriptor.short_name(), "bound type name");
		self.bindings.insert(
			name.into(),
			Binding {
				name: name.into(),
				descriptor,
				construct,
			},
		);
		Ok(())
	}

	/// Look up a binding; the first call seals the registry.
	pub fn resolve(&self, name: &str) -> Option<&Binding> {
		if !self.sealed.load(Ordering::Relaxed) && !self.sealed.swap(true, Ordering::Relaxed) {
			debug!(bindings = self.bindings.len(), "registry sealed");
		}
		self.bindings.get(name)
	}

	/// Whether `name` is bound. Does not seal.
	pub fn contains(&self, name: &str) -> bool {
		self.bindings.contains_key(name)
	}

	/// Whether lookups have started.
	pub fn is_sealed(&self) -> bool {
		self.sealed.load(Ordering::Relaxed)
	}

	/// Bound names, sorted.
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.bindings.keys().map(AsRef::as_ref).collect();
		names.sort_unstable();
		names
	}

	/// Number of bindings.
	pub fn len(&self) -> usize {
		self.bindings.len()
	}

	/// Whether nothing is bound.
	pub fn is_empty(&self) -> bool {
		self.bindings.is_empty()
	}
}

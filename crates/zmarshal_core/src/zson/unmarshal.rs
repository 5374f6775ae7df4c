use std::any::{TypeId, type_name};

use tracing::{debug, trace};

use crate::zson::descriptor::short_type_name;
use crate::zson::{
	Binding, DEFAULT_MAX_DEPTH, Decode, FieldPath, Interface, Record, RecordValue, Registry, RegistryOptions, Result, Shape, Value, Variant, ZsonError,
	parse_with_depth,
};

/// Unmarshal configuration.
#[derive(Debug, Clone)]
pub struct UnmarshalOptions {
	/// Nesting ceiling applied while parsing and decoding.
	pub max_depth: u32,
	/// Fail on payload fields the destination does not declare.
	pub deny_unknown_fields: bool,
}

impl Default for UnmarshalOptions {
	fn default() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
			deny_unknown_fields: false,
		}
	}
}

impl UnmarshalOptions {
	/// Defaults with unknown fields rejected.
	pub fn strict() -> Self {
		Self {
			deny_unknown_fields: true,
			..Self::default()
		}
	}
}

/// Decodes text into caller-provided destinations.
///
/// Bindings are added through `&mut self`. Once configured, an unmarshaler
/// is `Send + Sync` and can serve concurrent calls through `&self`.
#[derive(Debug, Default)]
pub struct Unmarshaler {
	registry: Registry,
	options: UnmarshalOptions,
}

impl Unmarshaler {
	/// Unmarshaler with an empty registry and default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Unmarshaler with an empty registry and explicit options.
	pub fn with_options(options: UnmarshalOptions) -> Self {
		Self {
			registry: Registry::default(),
			options,
		}
	}

	/// Unmarshaler over an existing registry.
	pub fn with_registry(registry: Registry, options: UnmarshalOptions) -> Self {
		Self { registry, options }
	}

	/// Unmarshaler whose implicit bindings follow `naming`.
	pub fn with_registry_options(registry: RegistryOptions, options: UnmarshalOptions) -> Self {
		Self::with_registry(Registry::with_options(registry), options)
	}

	/// Active options.
	pub fn options(&self) -> &UnmarshalOptions {
		&self.options
	}

	/// Binding registry.
	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	/// Mutable binding registry.
	pub fn registry_mut(&mut self) -> &mut Registry {
		&mut self.registry
	}

	/// Bind `R` under its policy-derived name and return that name.
	pub fn bind<R: Record>(&mut self) -> Result<Box<str>> {
		self.registry.register_implicit::<R>()
	}

	/// Bind `R` under a caller-chosen name.
	pub fn bind_named<R: Record>(&mut self, name: &str) -> Result<&mut Self> {
		self.registry.register::<R>(name)?;
		Ok(self)
	}

	/// Bind `R` under a caller-chosen name with a custom constructor.
	pub fn bind_with<R: Record>(&mut self, name: &str, constructor: fn() -> R) -> Result<&mut Self> {
		self.registry.register_with(name, constructor)?;
		Ok(self)
	}

	/// Parse and decode `payload` into a fresh `T`.
	pub fn unmarshal<T: Decode>(&self, payload: &str) -> Result<T> {
		let tree = parse_with_depth(payload, self.options.max_depth)?;
		let value = self.decode_value(&tree)?;
		debug!(bytes = payload.len(), "unmarshaled payload");
		Ok(value)
	}

	/// Decode `payload` into `dest`, leaving it untouched on failure.
	pub fn unmarshal_into<T: Decode>(&self, payload: &str, dest: &mut T) -> Result<()> {
		*dest = self.unmarshal(payload)?;
		Ok(())
	}

	/// Decode an already parsed value tree.
	pub fn decode_value<T: Decode>(&self, value: &Value) -> Result<T> {
		let mut dec = Decoder {
			registry: &self.registry,
			options: &self.options,
			path: FieldPath::default(),
			depth: 0,
		};
		T::decode(value, &mut dec)
	}
}

/// State of one unmarshal call.
pub struct Decoder<'a> {
	registry: &'a Registry,
	options: &'a UnmarshalOptions,
	path: FieldPath,
	depth: u32,
}

impl<'a> Decoder<'a> {
	/// Location of the value being decoded.
	pub fn path(&self) -> &FieldPath {
		&self.path
	}

	/// Decode a record into concrete type `R`.
	///
	/// A decoration, when present, must name `R` itself.
	pub fn decode_record<R: Record>(&mut self, value: &Value) -> Result<R> {
		let Value::Record(record) = value else {
			return Err(self.mismatch(&<R as Decode>::shape(), value));
		};

		let mut target: Box<dyn Variant> = match record.decoration.as_deref() {
			Some(name) => {
				let binding = self.resolve(name)?;
				if binding.descriptor().type_id() != TypeId::of::<R>() {
					return Err(ZsonError::IncompatibleBinding {
						name: name.to_owned(),
						target: short_type_name(type_name::<R>()).to_owned(),
					});
				}
				binding.construct()
			}
			None => Box::new(R::default()),
		};

		self.populate(&mut *target, record)?;
		target
			.into_any()
			.downcast::<R>()
			.map(|boxed| *boxed)
			.map_err(|_| ZsonError::DescriptorMismatch { expected: type_name::<R>() })
	}

	/// Decode a decorated record into interface `I`.
	pub fn decode_abstract<I: ?Sized + Interface>(&mut self, value: &Value) -> Result<Box<I>> {
		let Value::Record(record) = value else {
			return Err(self.mismatch(&Shape::Abstract(I::NAME), value));
		};
		let Some(name) = record.decoration.as_deref() else {
			return Err(ZsonError::AmbiguousTarget {
				path: self.path.to_string(),
				target: format!("dyn {}", I::NAME),
			});
		};

		let binding = self.resolve(name)?;
		let descriptor = binding.descriptor();
		let incompatible = || ZsonError::IncompatibleBinding {
			name: name.to_owned(),
			target: format!("dyn {}", I::NAME),
		};
		if !descriptor.implements::<I>() {
			return Err(incompatible());
		}

		let mut target = binding.construct();
		self.populate(&mut *target, record)?;
		descriptor.cast::<I>(target).ok_or_else(incompatible)
	}

	/// Decode each array element as `M`.
	pub fn decode_list<M: Decode>(&mut self, items: &[Value]) -> Result<Vec<M>> {
		self.enter()?;
		let mut out = Vec::with_capacity(items.len());
		for (idx, item) in items.iter().enumerate() {
			self.path.push_index(idx);
			out.push(M::decode(item, self)?);
			self.path.pop();
		}
		self.depth -= 1;
		Ok(out)
	}

	/// Error for a payload value that does not fit `expected`.
	///
	/// Scalar-for-scalar mismatches are malformed payloads; anything else is a
	/// shape mismatch.
	pub fn mismatch(&self, expected: &Shape, found: &Value) -> ZsonError {
		if expected.is_scalar() && found.is_scalar() {
			return self.malformed(format!("expected {expected}, found {}", found.kind()));
		}
		ZsonError::ShapeMismatch {
			path: self.path.to_string(),
			expected: expected.to_string(),
			found: found.kind(),
		}
	}

	/// Malformed-payload error located at the current path.
	pub fn malformed(&self, reason: impl Into<String>) -> ZsonError {
		ZsonError::MalformedPayload {
			location: self.path.to_string(),
			reason: reason.into(),
		}
	}

	/// Error for a member kind with no text representation.
	pub fn unsupported(&self, kind: &str) -> ZsonError {
		ZsonError::UnsupportedType {
			path: self.path.to_string(),
			kind: kind.to_owned(),
		}
	}

	fn resolve(&self, name: &str) -> Result<&'a Binding> {
		self.registry.resolve(name).ok_or_else(|| ZsonError::UnboundType { name: name.to_owned() })
	}

	fn enter(&mut self) -> Result<()> {
		let max_depth = self.options.max_depth;
		if self.depth >= max_depth {
			return Err(ZsonError::DepthExceeded { max_depth });
		}
		self.depth += 1;
		Ok(())
	}

	fn populate(&mut self, target: &mut dyn Variant, record: &RecordValue) -> Result<()> {
		let descriptor = target.type_descriptor();
		self.enter()?;
		trace!(
			path = %self.path,
			type_name = descriptor.short_name(),
			decoration = record.decoration.as_deref(),
			"decoding record"
		);

		for field in &record.fields {
			let Some(slot) = descriptor.field(&field.name) else {
				if self.options.deny_unknown_fields {
					return Err(ZsonError::UnknownField {
						path: self.path.to_string(),
						type_name: descriptor.short_name(),
						name: field.name.to_string(),
					});
				}
				trace!(field = %field.name, type_name = descriptor.short_name(), "ignoring unknown field");
				continue;
			};

			self.path.push_field(&field.name);
			slot.decode(target.as_any_mut(), &field.value, self)?;
			self.path.pop();
		}

		self.depth -= 1;
		Ok(())
	}
}

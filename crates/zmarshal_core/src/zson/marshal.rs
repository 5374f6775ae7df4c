use std::any::{TypeId, type_name};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::zson::descriptor::short_type_name;
use crate::zson::{
	DEFAULT_MAX_DEPTH, Encode, FieldPath, FieldValue, NamingPolicy, Record, RecordValue, Result, TypeDescriptor, Value, Variant, WriteOptions, ZsonError,
	validate_type_name, write,
};

/// Which records in an encoded tree carry a decoration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecorationScope {
	/// The root record plus every record reached through an interface.
	#[default]
	Ambiguous,
	/// The root record only.
	RootOnly,
	/// Every record in the tree.
	Every,
}

/// Marshal configuration.
#[derive(Debug, Clone)]
pub struct MarshalOptions {
	/// Policy rendering type names for decorations.
	pub naming: NamingPolicy,
	/// Which records get decorated.
	pub scope: DecorationScope,
	/// Nesting ceiling for records and lists.
	pub max_depth: u32,
	/// Spaces per nesting level in the text output; `0` is compact.
	pub indent: usize,
}

impl Default for MarshalOptions {
	fn default() -> Self {
		Self {
			naming: NamingPolicy::default(),
			scope: DecorationScope::default(),
			max_depth: DEFAULT_MAX_DEPTH,
			indent: 0,
		}
	}
}

impl MarshalOptions {
	/// Defaults with four-space indented output.
	pub fn pretty() -> Self {
		Self { indent: 4, ..Self::default() }
	}
}

#[derive(Debug)]
struct NamedType {
	name: Box<str>,
	type_name: &'static str,
}

/// Encodes values into decorated text.
///
/// Configuration happens through `&mut self`; a configured marshaler is
/// shared read-only and each call walks the value with its own [`Encoder`].
#[derive(Debug, Default)]
pub struct Marshaler {
	options: MarshalOptions,
	named: HashMap<TypeId, NamedType>,
	claims: HashMap<Box<str>, (TypeId, &'static str)>,
}

impl Marshaler {
	/// Marshaler with default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Marshaler with explicit options.
	pub fn with_options(options: MarshalOptions) -> Self {
		Self {
			options,
			..Self::default()
		}
	}

	/// Active options.
	pub fn options(&self) -> &MarshalOptions {
		&self.options
	}

	/// Switch the naming policy.
	pub fn decorate(&mut self, policy: NamingPolicy) -> &mut Self {
		self.options.naming = policy;
		self
	}

	/// Switch which records get decorated.
	pub fn scope(&mut self, scope: DecorationScope) -> &mut Self {
		self.options.scope = scope;
		self
	}

	/// Give `R` a caller-chosen type name, overriding the naming policy.
	///
	/// Binding a type again replaces its previous name. Claiming a name
	/// another type already holds fails with [`ZsonError::NameCollision`].
	pub fn bind_name<R: Record>(&mut self, name: &str) -> Result<&mut Self> {
		self.bind_descriptor(R::descriptor(), name)?;
		Ok(self)
	}

	/// Bind several caller-chosen names at once.
	pub fn named_bindings<'n>(&mut self, bindings: impl IntoIterator<Item = (&'n str, &'static TypeDescriptor)>) -> Result<&mut Self> {
		for (name, descriptor) in bindings {
			self.bind_descriptor(descriptor, name)?;
		}
		Ok(self)
	}

	fn bind_descriptor(&mut self, descriptor: &'static TypeDescriptor, name: &str) -> Result<()> {
		validate_type_name(name)?;
		let type_id = descriptor.type_id();
		if let Some(&(owner, owner_name)) = self.claims.get(name)
			&& owner != type_id
		{
			return Err(ZsonError::NameCollision {
				name: name.to_owned(),
				first: owner_name,
				second: descriptor.type_name(),
			});
		}

		let named = NamedType {
			name: name.into(),
			type_name: descriptor.type_name(),
		};
		if let Some(previous) = self.named.insert(type_id, named) {
			self.claims.remove(&previous.name);
		}
		self.claims.insert(name.into(), (type_id, descriptor.type_name()));
		debug!(name, type_name = descriptor.short_name(), "bound explicit type name");
		Ok(())
	}

	/// Type name the marshaler writes for `descriptor`.
	pub fn type_name(&self, descriptor: &TypeDescriptor) -> Result<Box<str>> {
		if let Some(named) = self.named.get(&descriptor.type_id()) {
			return Ok(named.name.clone());
		}
		descriptor
			.ident()
			.render(self.options.naming)
			.map(String::into_boxed_str)
			.ok_or(ZsonError::UnnamedType {
				type_name: descriptor.type_name(),
			})
	}

	/// Explicit names bound so far, sorted by name.
	pub fn bound_names(&self) -> Vec<(&str, &'static str)> {
		let mut names: Vec<_> = self
			.named
			.values()
			.map(|named| (named.name.as_ref(), short_type_name(named.type_name)))
			.collect();
		names.sort_unstable();
		names
	}

	/// Encode `value` into a value tree.
	pub fn encode<T: Encode + ?Sized>(&self, value: &T) -> Result<Value> {
		let mut enc = Encoder::new(self);
		value.encode(&mut enc)
	}

	/// Encode `value` into text.
	pub fn marshal<T: Encode + ?Sized>(&self, value: &T) -> Result<String> {
		let tree = self.encode(value)?;
		let text = write(&tree, &WriteOptions { indent: self.options.indent });
		debug!(bytes = text.len(), naming = %self.options.naming, "marshaled value");
		Ok(text)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Site {
	Concrete,
	Abstract,
}

/// State of one marshal call.
pub struct Encoder<'a> {
	marshaler: &'a Marshaler,
	path: FieldPath,
	depth: u32,
	active: Vec<usize>,
	claimed: HashMap<Box<str>, (TypeId, &'static str)>,
}

impl<'a> Encoder<'a> {
	fn new(marshaler: &'a Marshaler) -> Self {
		Self {
			marshaler,
			path: FieldPath::default(),
			depth: 0,
			active: Vec::new(),
			claimed: HashMap::new(),
		}
	}

	/// Location of the value being encoded.
	pub fn path(&self) -> &FieldPath {
		&self.path
	}

	/// Encode a record held in a concrete slot.
	pub fn encode_record(&mut self, value: &dyn Variant) -> Result<Value> {
		self.record(value, Site::Concrete)
	}

	/// Encode a record held behind an interface.
	pub fn encode_abstract(&mut self, value: &dyn Variant) -> Result<Value> {
		self.record(value, Site::Abstract)
	}

	/// Encode a list of members.
	pub fn encode_list<M: Encode>(&mut self, items: &[M]) -> Result<Value> {
		self.enter()?;
		let mut out = Vec::with_capacity(items.len());
		for (idx, item) in items.iter().enumerate() {
			self.path.push_index(idx);
			out.push(item.encode(self)?);
			self.path.pop();
		}
		self.depth -= 1;
		Ok(Value::Array(out))
	}

	/// Encode a shared node, failing if it is already being encoded.
	pub fn encode_shared<M: Encode>(&mut self, cell: &Rc<RefCell<M>>) -> Result<Value> {
		let identity = Rc::as_ptr(cell).addr();
		if self.active.contains(&identity) {
			return Err(ZsonError::CyclicValue {
				path: self.path.to_string(),
				type_name: short_type_name(type_name::<M>()).to_owned(),
			});
		}

		let inner = cell.try_borrow().map_err(|_| self.unsupported("mutably borrowed cell"))?;
		self.active.push(identity);
		let encoded = inner.encode(self);
		self.active.pop();
		encoded
	}

	/// Error for a member kind with no text representation.
	pub fn unsupported(&self, kind: &str) -> ZsonError {
		ZsonError::UnsupportedType {
			path: self.path.to_string(),
			kind: kind.to_owned(),
		}
	}

	fn enter(&mut self) -> Result<()> {
		let max_depth = self.marshaler.options.max_depth;
		if self.depth >= max_depth {
			return Err(ZsonError::DepthExceeded { max_depth });
		}
		self.depth += 1;
		Ok(())
	}

	fn record(&mut self, value: &dyn Variant, site: Site) -> Result<Value> {
		let descriptor = value.type_descriptor();
		if descriptor.type_id() != value.as_any().type_id() {
			return Err(ZsonError::DescriptorMismatch {
				expected: descriptor.type_name(),
			});
		}

		let root = self.depth == 0;
		let decoration = if self.decorates(site, root) { Some(self.claim(descriptor)?) } else { None };
		self.enter()?;
		trace!(
			path = %self.path,
			type_name = descriptor.short_name(),
			decoration = decoration.as_deref(),
			"encoding record"
		);

		let mut fields = Vec::with_capacity(descriptor.fields().len());
		for field in descriptor.fields() {
			self.path.push_field(field.name());
			if let Some(kind) = field.shape().unsupported() {
				return Err(self.unsupported(kind));
			}
			let encoded = field.encode(value.as_any(), self)?;
			self.path.pop();
			fields.push(FieldValue {
				name: field.name().into(),
				value: encoded,
			});
		}

		self.depth -= 1;
		Ok(Value::Record(RecordValue { decoration, fields }))
	}

	fn decorates(&self, site: Site, root: bool) -> bool {
		match self.marshaler.options.scope {
			DecorationScope::Every => true,
			DecorationScope::RootOnly => root,
			DecorationScope::Ambiguous => root || site == Site::Abstract,
		}
	}

	fn claim(&mut self, descriptor: &'static TypeDescriptor) -> Result<Box<str>> {
		let name = self.marshaler.type_name(descriptor)?;
		match self.claimed.get(&name) {
			Some(&(owner, owner_name)) if owner != descriptor.type_id() => Err(ZsonError::NameCollision {
				name: name.into_string(),
				first: owner_name,
				second: descriptor.type_name(),
			}),
			Some(_) => Ok(name),
			None => {
				self.claimed.insert(name.clone(), (descriptor.type_id(), descriptor.type_name()));
				Ok(name)
			}
		}
	}
}

#[cfg(test)]
mod tests;

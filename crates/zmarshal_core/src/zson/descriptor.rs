use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::marker::PhantomData;

use crate::zson::{Decode, Decoder, Encode, Encoder, Interface, Record, Result, TypeIdent, Value, Variant, ZsonError};

type EncodeFn = Box<dyn Fn(&dyn Any, &mut Encoder<'_>) -> Result<Value> + Send + Sync>;
type DecodeFn = Box<dyn Fn(&mut dyn Any, &Value, &mut Decoder<'_>) -> Result<()> + Send + Sync>;
type CastFn<I> = Box<dyn Fn(Box<dyn Variant>) -> Option<Box<I>> + Send + Sync>;

/// Declared shape of a field or destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
	/// Boolean scalar.
	Bool,
	/// Signed integer scalar.
	Int,
	/// Unsigned integer scalar.
	Uint,
	/// Floating point scalar.
	Float,
	/// String scalar.
	String,
	/// Concrete record; carries the Rust type path.
	Record(&'static str),
	/// Interface destination; carries the interface name.
	Abstract(&'static str),
	/// Ordered collection.
	List(Box<Shape>),
	/// Value that may be absent.
	Optional(Box<Shape>),
	/// Shared, reference-counted node.
	Shared(Box<Shape>),
	/// Kind with no text representation.
	Unsupported(&'static str),
}

impl Shape {
	/// Whether this is a leaf scalar.
	pub fn is_scalar(&self) -> bool {
		matches!(self, Shape::Bool | Shape::Int | Shape::Uint | Shape::Float | Shape::String)
	}

	/// First unsupported kind reachable through wrappers, if any.
	pub fn unsupported(&self) -> Option<&'static str> {
		match self {
			Shape::Unsupported(kind) => Some(*kind),
			Shape::List(inner) | Shape::Optional(inner) | Shape::Shared(inner) => inner.unsupported(),
			_ => None,
		}
	}
}

impl fmt::Display for Shape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Shape::Bool => f.write_str("bool"),
			Shape::Int => f.write_str("int"),
			Shape::Uint => f.write_str("uint"),
			Shape::Float => f.write_str("float"),
			Shape::String => f.write_str("string"),
			Shape::Record(name) => f.write_str(short_type_name(*name)),
			Shape::Abstract(name) => write!(f, "dyn {name}"),
			Shape::List(inner) => write!(f, "[{inner}]"),
			Shape::Optional(inner) => write!(f, "{inner}?"),
			Shape::Shared(inner) => write!(f, "shared {inner}"),
			Shape::Unsupported(kind) => f.write_str(kind),
		}
	}
}

/// Last path segment of a Rust type name, generics dropped.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
	let head = full.split('<').next().unwrap_or(full);
	head.rsplit("::").next().unwrap_or(head)
}

/// One declared field of a record type.
pub struct FieldDescriptor {
	name: &'static str,
	shape: Shape,
	encode: EncodeFn,
	decode: DecodeFn,
}

impl FieldDescriptor {
	/// Field name as written in payloads.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Declared shape of the field's member type.
	pub fn shape(&self) -> &Shape {
		&self.shape
	}

	pub(crate) fn encode(&self, owner: &dyn Any, enc: &mut Encoder<'_>) -> Result<Value> {
		(self.encode)(owner, enc)
	}

	pub(crate) fn decode(&self, owner: &mut dyn Any, value: &Value, dec: &mut Decoder<'_>) -> Result<()> {
		(self.decode)(owner, value, dec)
	}
}

impl fmt::Debug for FieldDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FieldDescriptor")
			.field("name", &self.name)
			.field("shape", &self.shape)
			.finish_non_exhaustive()
	}
}

struct Capability {
	interface: &'static str,
	target: TypeId,
	// Holds a `CastFn<I>` for the interface `target` names.
	cast: Box<dyn Any + Send + Sync>,
}

/// Static description of one concrete record type.
///
/// Built once per type through [`TypeDescriptor::of`] and handed out as a
/// `&'static` reference by [`Record::descriptor`].
pub struct TypeDescriptor {
	ident: TypeIdent,
	type_id: TypeId,
	type_name: &'static str,
	fields: Vec<FieldDescriptor>,
	capabilities: Vec<Capability>,
	construct: fn() -> Box<dyn Variant>,
}

impl TypeDescriptor {
	/// Start describing record type `R`.
	pub fn of<R: Record>(ident: TypeIdent) -> DescriptorBuilder<R> {
		DescriptorBuilder {
			ident,
			fields: Vec::new(),
			capabilities: Vec::new(),
			_record: PhantomData,
		}
	}

	/// Implementation identifier naming policies render from.
	pub fn ident(&self) -> &TypeIdent {
		&self.ident
	}

	/// Runtime identity of the described type.
	pub fn type_id(&self) -> TypeId {
		self.type_id
	}

	/// Full Rust type path.
	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	/// Rust type name without its module path.
	pub fn short_name(&self) -> &'static str {
		short_type_name(self.type_name)
	}

	/// Fields in declaration order.
	pub fn fields(&self) -> &[FieldDescriptor] {
		&self.fields
	}

	/// Look up a field by payload name.
	pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|field| field.name == name)
	}

	/// Names of the interfaces this type declared.
	pub fn interfaces(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.capabilities.iter().map(|capability| capability.interface)
	}

	/// Whether values of this type can be stored as `Box<I>`.
	pub fn implements<I: ?Sized + Interface>(&self) -> bool {
		let target = TypeId::of::<I>();
		self.capabilities.iter().any(|capability| capability.target == target)
	}

	/// Convert a boxed value of this type into `Box<I>`.
	///
	/// Returns `None` when the type does not implement `I` or `value` is of
	/// another type.
	pub fn cast<I: ?Sized + Interface>(&self, value: Box<dyn Variant>) -> Option<Box<I>> {
		let target = TypeId::of::<I>();
		let capability = self.capabilities.iter().find(|capability| capability.target == target)?;
		let cast = capability.cast.downcast_ref::<CastFn<I>>()?;
		cast(value)
	}

	/// Fresh default-constructed instance.
	pub fn construct(&self) -> Box<dyn Variant> {
		(self.construct)()
	}
}

impl fmt::Debug for TypeDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeDescriptor")
			.field("ident", &self.ident)
			.field("type_name", &self.type_name)
			.field("fields", &self.fields)
			.field("interfaces", &self.interfaces().collect::<Vec<_>>())
			.finish_non_exhaustive()
	}
}

/// Builder returned by [`TypeDescriptor::of`].
pub struct DescriptorBuilder<R> {
	ident: TypeIdent,
	fields: Vec<FieldDescriptor>,
	capabilities: Vec<Capability>,
	_record: PhantomData<fn() -> R>,
}

impl<R: Record> DescriptorBuilder<R> {
	/// Declare a field backed by a member of `R`.
	///
	/// Fields are encoded in the order they are declared.
	pub fn field<M>(mut self, name: &'static str, get: fn(&R) -> &M, get_mut: fn(&mut R) -> &mut M) -> Self
	where
		M: Encode + Decode + 'static,
	{
		debug_assert!(
			self.fields.iter().all(|field| field.name != name),
			"field {name} declared twice on {}",
			type_name::<R>()
		);

		let encode: EncodeFn = Box::new(move |owner: &dyn Any, enc: &mut Encoder<'_>| {
			let owner = owner
				.downcast_ref::<R>()
				.ok_or(ZsonError::DescriptorMismatch { expected: type_name::<R>() })?;
			get(owner).encode(enc)
		});
		let decode: DecodeFn = Box::new(move |owner: &mut dyn Any, value: &Value, dec: &mut Decoder<'_>| {
			let owner = owner
				.downcast_mut::<R>()
				.ok_or(ZsonError::DescriptorMismatch { expected: type_name::<R>() })?;
			*get_mut(owner) = M::decode(value, dec)?;
			Ok(())
		});

		self.fields.push(FieldDescriptor {
			name,
			shape: M::shape(),
			encode,
			decode,
		});
		self
	}

	/// Declare that `R` can be stored as `Box<I>`; `cast` is usually `|value| value`.
	pub fn implements<I: ?Sized + Interface>(mut self, cast: fn(Box<R>) -> Box<I>) -> Self {
		let erased: CastFn<I> = Box::new(move |value: Box<dyn Variant>| value.into_any().downcast::<R>().ok().map(cast));
		self.capabilities.push(Capability {
			interface: I::NAME,
			target: TypeId::of::<I>(),
			cast: Box::new(erased),
		});
		self
	}

	/// Finish the descriptor.
	pub fn build(self) -> TypeDescriptor {
		TypeDescriptor {
			ident: self.ident,
			type_id: TypeId::of::<R>(),
			type_name: type_name::<R>(),
			fields: self.fields,
			capabilities: self.capabilities,
			construct: construct_default::<R>,
		}
	}
}

fn construct_default<R: Record>() -> Box<dyn Variant> {
	Box::new(R::default())
}

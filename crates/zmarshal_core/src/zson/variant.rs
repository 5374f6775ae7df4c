use std::any::{Any, type_name};
use std::fmt;

use crate::zson::{Decoder, Encoder, Result, Shape, TypeDescriptor, Value};

/// Object-safe view of any marshalable concrete type.
///
/// Implemented for every [`Record`]; abstract destinations are traits with
/// `Variant` as a supertrait, declared with [`interface!`](crate::interface).
pub trait Variant: Any + fmt::Debug {
	/// Descriptor of the value's concrete type.
	fn type_descriptor(&self) -> &'static TypeDescriptor;
	/// Upcast to `&dyn Variant`.
	fn as_variant(&self) -> &dyn Variant;
	/// Upcast to `&dyn Any` for downcasting.
	fn as_any(&self) -> &dyn Any;
	/// Upcast to `&mut dyn Any` for downcasting.
	fn as_any_mut(&mut self) -> &mut dyn Any;
	/// Upcast an owned box to `Box<dyn Any>`.
	fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// Concrete record type with a static field table.
///
/// `Default` is the zero-argument constructor used when a payload omits a
/// decoration or a binding has no custom constructor.
pub trait Record: Default + fmt::Debug + 'static {
	/// Descriptor built once per type, usually cached in a `OnceLock`.
	fn descriptor() -> &'static TypeDescriptor;
}

/// Marker for `dyn Trait` types usable as abstract destinations.
pub trait Interface: 'static {
	/// Interface name used in error messages.
	const NAME: &'static str;
}

/// Conversion into the substrate value tree.
pub trait Encode {
	/// Encode `self`, recursing through `enc` for nested values.
	fn encode(&self, enc: &mut Encoder<'_>) -> Result<Value>;
}

/// Conversion out of the substrate value tree.
pub trait Decode: Sized {
	/// Decode one value, recursing through `dec` for nested values.
	fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self>;
	/// Declared shape of this destination type.
	fn shape() -> Shape;
}

impl<R: Record> Variant for R {
	fn type_descriptor(&self) -> &'static TypeDescriptor {
		R::descriptor()
	}

	fn as_variant(&self) -> &dyn Variant {
		self
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}

	fn into_any(self: Box<Self>) -> Box<dyn Any> {
		self
	}
}

impl<R: Record> Encode for R {
	fn encode(&self, enc: &mut Encoder<'_>) -> Result<Value> {
		enc.encode_record(self)
	}
}

impl<R: Record> Decode for R {
	fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self> {
		dec.decode_record::<R>(value)
	}

	fn shape() -> Shape {
		Shape::Record(type_name::<R>())
	}
}

/// Declare a trait as an abstract destination.
///
/// The trait must have [`Variant`] as a supertrait. This implements
/// [`Interface`] for `dyn Trait` and the encode/decode glue for `dyn Trait`
/// and `Box<dyn Trait>`.
///
/// ```
/// use std::sync::OnceLock;
///
/// use zmarshal::zson::{Record, TypeDescriptor, TypeIdent, Variant};
///
/// pub trait Shape: Variant {
/// 	fn sides(&self) -> i64;
/// }
/// zmarshal::interface!(Shape);
///
/// #[derive(Debug, Default)]
/// pub struct Square {
/// 	pub side: f64,
/// }
///
/// impl Shape for Square {
/// 	fn sides(&self) -> i64 {
/// 		4
/// 	}
/// }
///
/// impl Record for Square {
/// 	fn descriptor() -> &'static TypeDescriptor {
/// 		static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
/// 		DESCRIPTOR.get_or_init(|| {
/// 			TypeDescriptor::of::<Square>(TypeIdent::new("geometry", "Square"))
/// 				.implements::<dyn Shape>(|square| square)
/// 				.field("side", |square| &square.side, |square| &mut square.side)
/// 				.build()
/// 		})
/// 	}
/// }
/// ```
#[macro_export]
macro_rules! interface {
	($name:ident) => {
		impl $crate::zson::Interface for dyn $name {
			const NAME: &'static str = ::core::stringify!($name);
		}

		impl $crate::zson::Encode for dyn $name {
			fn encode(&self, enc: &mut $crate::zson::Encoder<'_>) -> $crate::zson::Result<$crate::zson::Value> {
				enc.encode_abstract($crate::zson::Variant::as_variant(self))
			}
		}

		impl $crate::zson::Encode for ::std::boxed::Box<dyn $name> {
			fn encode(&self, enc: &mut $crate::zson::Encoder<'_>) -> $crate::zson::Result<$crate::zson::Value> {
				<dyn $name as $crate::zson::Encode>::encode(&**self, enc)
			}
		}

		impl $crate::zson::Decode for ::std::boxed::Box<dyn $name> {
			fn decode(value: &$crate::zson::Value, dec: &mut $crate::zson::Decoder<'_>) -> $crate::zson::Result<Self> {
				dec.decode_abstract::<dyn $name>(value)
			}

			fn shape() -> $crate::zson::Shape {
				$crate::zson::Shape::Abstract(::core::stringify!($name))
			}
		}
	};
}

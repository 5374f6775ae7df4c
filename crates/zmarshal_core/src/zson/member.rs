use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{Sender, SyncSender};

use crate::zson::{Decode, Decoder, Encode, Encoder, Result, Shape, Value};

impl Encode for bool {
	fn encode(&self, _enc: &mut Encoder<'_>) -> Result<Value> {
		Ok(Value::Bool(*self))
	}
}

impl Decode for bool {
	fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self> {
		match value {
			Value::Bool(v) => Ok(*v),
			other => Err(dec.mismatch(&Self::shape(), other)),
		}
	}

	fn shape() -> Shape {
		Shape::Bool
	}
}

macro_rules! integer_member {
	($shape:ident, $variant:ident, $wide:ty => $($ty:ty),+) => {$(
		impl Encode for $ty {
			fn encode(&self, _enc: &mut Encoder<'_>) -> Result<Value> {
				Ok(Value::$variant(<$wide>::from(*self)))
			}
		}

		impl Decode for $ty {
			fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self> {
				let fitted = match value {
					Value::I64(v) => <$ty>::try_from(*v).ok(),
					Value::U64(v) => <$ty>::try_from(*v).ok(),
					other => return Err(dec.mismatch(&Self::shape(), other)),
				};
				fitted.ok_or_else(|| dec.malformed(format!("{} does not fit in {}", value_text(value), stringify!($ty))))
			}

			fn shape() -> Shape {
				Shape::$shape
			}
		}
	)+};
}

integer_member!(Int, I64, i64 => i8, i16, i32, i64);
integer_member!(Uint, U64, u64 => u8, u16, u32, u64);

macro_rules! float_member {
	($($ty:ty),+) => {$(
		impl Encode for $ty {
			fn encode(&self, _enc: &mut Encoder<'_>) -> Result<Value> {
				Ok(Value::F64(f64::from(*self)))
			}
		}

		impl Decode for $ty {
			fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self> {
				// Integer literals widen into float fields.
				match value {
					Value::F64(v) => Ok(*v as $ty),
					Value::I64(v) => Ok(*v as $ty),
					Value::U64(v) => Ok(*v as $ty),
					other => Err(dec.mismatch(&Self::shape(), other)),
				}
			}

			fn shape() -> Shape {
				Shape::Float
			}
		}
	)+};
}

float_member!(f32, f64);

fn value_text(value: &Value) -> String {
	match value {
		Value::I64(v) => v.to_string(),
		Value::U64(v) => v.to_string(),
		other => other.kind().to_owned(),
	}
}

impl Encode for String {
	fn encode(&self, _enc: &mut Encoder<'_>) -> Result<Value> {
		Ok(Value::String(self.as_str().into()))
	}
}

impl Decode for String {
	fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self> {
		match value {
			Value::String(v) => Ok(v.to_string()),
			other => Err(dec.mismatch(&Self::shape(), other)),
		}
	}

	fn shape() -> Shape {
		Shape::String
	}
}

impl<M: Encode> Encode for Vec<M> {
	fn encode(&self, enc: &mut Encoder<'_>) -> Result<Value> {
		enc.encode_list(self)
	}
}

impl<M: Decode> Decode for Vec<M> {
	fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self> {
		match value {
			Value::Array(items) => dec.decode_list(items),
			other => Err(dec.mismatch(&Self::shape(), other)),
		}
	}

	fn shape() -> Shape {
		Shape::List(Box::new(M::shape()))
	}
}

impl<M: Encode> Encode for Option<M> {
	fn encode(&self, enc: &mut Encoder<'_>) -> Result<Value> {
		match self {
			Some(inner) => inner.encode(enc),
			None => Ok(Value::Null),
		}
	}
}

impl<M: Decode> Decode for Option<M> {
	fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self> {
		match value {
			Value::Null => Ok(None),
			other => M::decode(other, dec).map(Some),
		}
	}

	fn shape() -> Shape {
		Shape::Optional(Box::new(M::shape()))
	}
}

impl<M: Encode> Encode for Rc<RefCell<M>> {
	fn encode(&self, enc: &mut Encoder<'_>) -> Result<Value> {
		enc.encode_shared(self)
	}
}

impl<M: Decode> Decode for Rc<RefCell<M>> {
	fn decode(value: &Value, dec: &mut Decoder<'_>) -> Result<Self> {
		M::decode(value, dec).map(|inner| Rc::new(RefCell::new(inner)))
	}

	fn shape() -> Shape {
		Shape::Shared(Box::new(M::shape()))
	}
}

macro_rules! unsupported_member {
	($kind:literal => $($ty:ty),+) => {$(
		impl<T> Encode for $ty {
			fn encode(&self, enc: &mut Encoder<'_>) -> Result<Value> {
				Err(enc.unsupported($kind))
			}
		}

		impl<T> Decode for $ty {
			fn decode(_value: &Value, dec: &mut Decoder<'_>) -> Result<Self> {
				Err(dec.unsupported($kind))
			}

			fn shape() -> Shape {
				Shape::Unsupported($kind)
			}
		}
	)+};
}

unsupported_member!("channel" => Sender<T>, SyncSender<T>);
unsupported_member!("function" => fn() -> T);

/// One node of the text substrate's value tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Absent value.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar.
	I64(i64),
	/// Unsigned integer too large for `I64`, or produced by an unsigned field.
	U64(u64),
	/// Floating point scalar.
	F64(f64),
	/// UTF-8 string scalar.
	String(Box<str>),
	/// Ordered collection.
	Array(Vec<Value>),
	/// Record with ordered fields and an optional type-name decoration.
	Record(RecordValue),
}

/// Record node: ordered fields plus the out-of-band decoration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordValue {
	/// Type name attached outside the field list, if any.
	pub decoration: Option<Box<str>>,
	/// Fields in encoded order.
	pub fields: Vec<FieldValue>,
}

/// One named record field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Field name.
	pub name: Box<str>,
	/// Field value.
	pub value: Value,
}

impl Value {
	/// Short label for the value's kind, used in error messages.
	pub fn kind(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Bool(_) => "bool",
			Value::I64(_) => "int",
			Value::U64(_) => "uint",
			Value::F64(_) => "float",
			Value::String(_) => "string",
			Value::Array(_) => "array",
			Value::Record(_) => "record",
		}
	}

	/// Whether the value is a leaf scalar (null excluded).
	pub fn is_scalar(&self) -> bool {
		matches!(self, Value::Bool(_) | Value::I64(_) | Value::U64(_) | Value::F64(_) | Value::String(_))
	}

	/// Borrow the record node, if this is one.
	pub fn as_record(&self) -> Option<&RecordValue> {
		match self {
			Value::Record(record) => Some(record),
			_ => None,
		}
	}

	/// Decoration of a record value.
	pub fn decoration(&self) -> Option<&str> {
		self.as_record().and_then(|record| record.decoration.as_deref())
	}
}

impl RecordValue {
	/// Look up a field by name.
	pub fn field(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| field.name.as_ref() == name).map(|field| &field.value)
	}
}

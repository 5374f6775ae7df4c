use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ZsonError>;

/// Errors produced while marshaling, unmarshaling, and managing bindings.
#[derive(Debug, Error)]
pub enum ZsonError {
	/// A field holds a kind the text substrate cannot represent.
	#[error("unsupported type {kind} at {path}")]
	UnsupportedType {
		/// Field path of the offending value.
		path: String,
		/// Declared kind that has no representation.
		kind: String,
	},
	/// The value graph reached a shared node that is already being encoded.
	#[error("cyclic value at {path}: {type_name} refers back to itself")]
	CyclicValue {
		/// Field path where the cycle closes.
		path: String,
		/// Short type name of the revisited node.
		type_name: String,
	},
	/// Two distinct concrete types resolved to the same type name.
	#[error("type name {name:?} is claimed by both {first} and {second}")]
	NameCollision {
		/// Colliding type name.
		name: String,
		/// Type that claimed the name first.
		first: &'static str,
		/// Type that tried to claim it second.
		second: &'static str,
	},
	/// Explicit naming is active but the type has no caller-supplied name.
	#[error("no explicit type name bound for {type_name}")]
	UnnamedType {
		/// Rust type lacking a binding.
		type_name: &'static str,
	},
	/// A descriptor was applied to a value of another type.
	#[error("descriptor for {expected} applied to a value of another type")]
	DescriptorMismatch {
		/// Type the descriptor was built for.
		expected: &'static str,
	},
	/// Encoding or decoding nested deeper than the configured limit.
	#[error("nesting depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Payload is syntactically invalid or holds a scalar of the wrong kind.
	#[error("malformed payload at {location}: {reason}")]
	MalformedPayload {
		/// Byte offset (while parsing) or field path (while decoding).
		location: String,
		/// What was wrong.
		reason: String,
	},
	/// A decoration names a type the registry does not know.
	#[error("unbound type name {name:?}")]
	UnboundType {
		/// Decoration text.
		name: String,
	},
	/// The bound type cannot be stored in the destination.
	#[error("type {name:?} cannot be bound to {target}")]
	IncompatibleBinding {
		/// Decoration text.
		name: String,
		/// Destination type or interface.
		target: String,
	},
	/// An undecorated record met an abstract destination.
	#[error("ambiguous target at {path}: undecorated record cannot populate {target}")]
	AmbiguousTarget {
		/// Field path of the record.
		path: String,
		/// Abstract destination.
		target: String,
	},
	/// The payload's structure cannot fit the destination's declared shape.
	#[error("shape mismatch at {path}: expected {expected}, found {found}")]
	ShapeMismatch {
		/// Field path of the value.
		path: String,
		/// Declared destination shape.
		expected: String,
		/// Payload value kind.
		found: &'static str,
	},
	/// Strict decoding met a payload field the destination does not declare.
	#[error("unknown field {name} on {type_name} at {path}")]
	UnknownField {
		/// Field path of the enclosing record.
		path: String,
		/// Destination type.
		type_name: &'static str,
		/// Offending field name.
		name: String,
	},
	/// A name is already bound to a different type.
	#[error("type name {name:?} already bound to {existing}, refusing {requested}")]
	DuplicateBinding {
		/// Contested name.
		name: String,
		/// Type currently bound.
		existing: &'static str,
		/// Type the caller tried to bind.
		requested: &'static str,
	},
	/// Registration attempted after the registry started resolving names.
	#[error("registry is sealed, cannot bind {name:?}")]
	RegistryFrozen {
		/// Name the caller tried to bind.
		name: String,
	},
	/// A type name is empty or contains control characters.
	#[error("invalid type name {name:?}")]
	InvalidTypeName {
		/// Rejected name.
		name: String,
	},
}

impl ZsonError {
	pub(crate) fn malformed_at(offset: usize, reason: impl Into<String>) -> Self {
		Self::MalformedPayload {
			location: format!("byte {offset}"),
			reason: reason.into(),
		}
	}
}

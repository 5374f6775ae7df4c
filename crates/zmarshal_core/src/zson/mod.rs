mod cursor;
mod descriptor;
mod error;
#[cfg(test)]
mod fixtures;
mod marshal;
mod member;
mod naming;
mod parse;
mod path;
mod registry;
mod unmarshal;
mod value;
mod variant;
mod write;

/// Per-type descriptor tables and the declared field shapes.
pub use descriptor::{DescriptorBuilder, FieldDescriptor, Shape, TypeDescriptor};
/// Error and result aliases.
pub use error::{Result, ZsonError};
/// Encode-side engine, options, and the per-call walker.
pub use marshal::{DecorationScope, Encoder, MarshalOptions, Marshaler};
/// Type naming policy and implementation identifiers.
pub use naming::{NamingPolicy, TypeIdent, validate_type_name};
/// Text parser entry points.
pub use parse::{DEFAULT_MAX_DEPTH, parse, parse_with_depth};
/// Field path used to locate errors inside a value tree.
pub use path::{FieldPath, PathStep};
/// Binding registry types.
pub use registry::{Binding, Registry, RegistryOptions};
/// Decode-side engine, options, and the per-call walker.
pub use unmarshal::{Decoder, UnmarshalOptions, Unmarshaler};
/// Substrate value tree.
pub use value::{FieldValue, RecordValue, Value};
/// Traits implemented by marshalable types.
pub use variant::{Decode, Encode, Interface, Record, Variant};
/// Text writer entry points.
pub use write::{WriteOptions, write};

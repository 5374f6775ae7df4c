use std::fmt::Write as _;

use crate::zson::parse::{is_ident_byte, is_ident_start, is_type_name_byte};
use crate::zson::value::{RecordValue, Value};

/// Layout switches for the text writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
	/// Spaces per nesting level; `0` writes everything on one line.
	pub indent: usize,
}

/// Render a value tree as text.
pub fn write(value: &Value, options: &WriteOptions) -> String {
	let mut out = String::new();
	write_value(&mut out, value, 0, options);
	out
}

fn write_value(out: &mut String, value: &Value, level: usize, options: &WriteOptions) {
	match value {
		Value::Null => out.push_str("null"),
		Value::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
		Value::I64(v) => {
			let _ = write!(out, "{v}");
		}
		Value::U64(v) => {
			let _ = write!(out, "{v}");
		}
		Value::F64(v) => write_float(out, *v),
		Value::String(v) => write_quoted(out, v),
		Value::Array(items) => {
			if items.is_empty() {
				out.push_str("[]");
				return;
			}
			out.push('[');
			for (idx, item) in items.iter().enumerate() {
				if idx > 0 {
					out.push(',');
				}
				newline(out, level + 1, options);
				write_value(out, item, level + 1, options);
			}
			newline(out, level, options);
			out.push(']');
		}
		Value::Record(record) => write_record(out, record, level, options),
	}
}

fn write_record(out: &mut String, record: &RecordValue, level: usize, options: &WriteOptions) {
	if record.fields.is_empty() {
		out.push_str("{}");
	} else {
		out.push('{');
		for (idx, field) in record.fields.iter().enumerate() {
			if idx > 0 {
				out.push(',');
			}
			newline(out, level + 1, options);
			write_field_name(out, &field.name);
			out.push(':');
			if options.indent > 0 {
				out.push(' ');
			}
			write_value(out, &field.value, level + 1, options);
		}
		newline(out, level, options);
		out.push('}');
	}

	if let Some(name) = &record.decoration {
		out.push_str("(=");
		if !name.is_empty() && name.bytes().all(is_type_name_byte) {
			out.push_str(name);
		} else {
			write_quoted(out, name);
		}
		out.push(')');
	}
}

fn newline(out: &mut String, level: usize, options: &WriteOptions) {
	if options.indent == 0 {
		return;
	}
	out.push('\n');
	out.extend(std::iter::repeat_n(' ', level * options.indent));
}

fn write_field_name(out: &mut String, name: &str) {
	let mut bytes = name.bytes();
	let bare = bytes.next().is_some_and(is_ident_start) && bytes.all(is_ident_byte);
	if bare {
		out.push_str(name);
	} else {
		write_quoted(out, name);
	}
}

fn write_float(out: &mut String, value: f64) {
	if value.is_nan() {
		out.push_str("NaN");
	} else if value == f64::INFINITY {
		out.push_str("+Inf");
	} else if value == f64::NEG_INFINITY {
		out.push_str("-Inf");
	} else {
		// Debug keeps a `.0` or exponent so the reader sees a float.
		let _ = write!(out, "{value:?}");
	}
}

fn write_quoted(out: &mut String, input: &str) {
	out.push('"');
	for ch in input.chars() {
		match ch {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\t' => out.push_str("\\t"),
			c if c.is_control() => {
				let _ = write!(out, "\\u{:04x}", c as u32);
			}
			c => out.push(c),
		}
	}
	out.push('"');
}

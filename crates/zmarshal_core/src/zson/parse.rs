use crate::zson::cursor::Cursor;
use crate::zson::value::{FieldValue, RecordValue, Value};
use crate::zson::{Result, ZsonError};

/// Nesting limit applied by [`parse`].
pub const DEFAULT_MAX_DEPTH: u32 = 64;

/// Parse one text payload into a value tree.
pub fn parse(input: &str) -> Result<Value> {
	parse_with_depth(input, DEFAULT_MAX_DEPTH)
}

/// Parse one text payload, failing once more than `max_depth` records and arrays nest.
pub fn parse_with_depth(input: &str, max_depth: u32) -> Result<Value> {
	let mut parser = Parser {
		cursor: Cursor::new(input),
		max_depth,
	};

	let value = parser.value(0)?;
	parser.cursor.skip_ws();
	if parser.cursor.peek().is_some() {
		return Err(ZsonError::malformed_at(
			parser.cursor.pos(),
			format!("trailing input starting with {}", parser.cursor.describe_next()),
		));
	}
	Ok(value)
}

/// Bytes allowed in an unquoted field name after the first one.
pub(crate) fn is_ident_byte(byte: u8) -> bool {
	byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}

/// Bytes allowed to start an unquoted field name.
pub(crate) fn is_ident_start(byte: u8) -> bool {
	byte.is_ascii_alphabetic() || byte == b'_' || byte == b'$'
}

/// Bytes allowed in an unquoted decoration.
pub(crate) fn is_type_name_byte(byte: u8) -> bool {
	byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'.' | b'$' | b'/' | b'@' | b'-')
}

struct Parser<'a> {
	cursor: Cursor<'a>,
	max_depth: u32,
}

impl Parser<'_> {
	fn value(&mut self, depth: u32) -> Result<Value> {
		self.cursor.skip_ws();
		let start = self.cursor.pos();
		let value = match self.cursor.peek() {
			None => return Err(ZsonError::malformed_at(start, "unexpected end of input")),
			Some(b'{') => return self.record(depth),
			Some(b'[') => self.array(depth)?,
			Some(b'"') => Value::String(self.string()?.into_boxed_str()),
			Some(b't') if self.keyword("true") => Value::Bool(true),
			Some(b'f') if self.keyword("false") => Value::Bool(false),
			Some(b'n') if self.keyword("null") => Value::Null,
			Some(b'N') if self.keyword("NaN") => Value::F64(f64::NAN),
			Some(b'-' | b'+' | b'.' | b'0'..=b'9') => self.number()?,
			Some(_) => {
				return Err(ZsonError::malformed_at(start, format!("unexpected {}", self.cursor.describe_next())));
			}
		};

		self.cursor.skip_ws();
		if self.cursor.peek() == Some(b'(') {
			return Err(ZsonError::malformed_at(self.cursor.pos(), format!("decoration on {} value", value.kind())));
		}
		Ok(value)
	}

	fn record(&mut self, depth: u32) -> Result<Value> {
		self.enter(depth)?;
		self.cursor.expect(b'{')?;
		let mut fields: Vec<FieldValue> = Vec::new();

		self.cursor.skip_ws();
		if !self.cursor.eat(b'}') {
			loop {
				self.cursor.skip_ws();
				let at = self.cursor.pos();
				let name = self.field_name()?;
				self.cursor.skip_ws();
				self.cursor.expect(b':')?;
				let value = self.value(depth + 1)?;

				if fields.iter().any(|field| field.name.as_ref() == name) {
					return Err(ZsonError::malformed_at(at, format!("duplicate field {name:?}")));
				}
				fields.push(FieldValue {
					name: name.into_boxed_str(),
					value,
				});

				self.cursor.skip_ws();
				if self.cursor.eat(b',') {
					continue;
				}
				self.cursor.expect(b'}')?;
				break;
			}
		}

		let decoration = self.decoration()?;
		Ok(Value::Record(RecordValue { decoration, fields }))
	}

	fn decoration(&mut self) -> Result<Option<Box<str>>> {
		self.cursor.skip_ws();
		if self.cursor.peek() != Some(b'(') {
			return Ok(None);
		}

		let at = self.cursor.pos();
		if !self.cursor.eat_word("(=") {
			return Err(ZsonError::malformed_at(at, "expected '(=' to open a decoration"));
		}

		self.cursor.skip_ws();
		let name = if self.cursor.peek() == Some(b'"') {
			self.string()?
		} else {
			self.cursor.take_while(is_type_name_byte).to_owned()
		};
		if name.is_empty() {
			return Err(ZsonError::malformed_at(at, "empty decoration"));
		}
		self.cursor.skip_ws();
		self.cursor.expect(b')')?;

		self.cursor.skip_ws();
		if self.cursor.peek() == Some(b'(') {
			return Err(ZsonError::malformed_at(self.cursor.pos(), "record carries more than one decoration"));
		}
		Ok(Some(name.into_boxed_str()))
	}

	fn array(&mut self, depth: u32) -> Result<Value> {
		self.enter(depth)?;
		self.cursor.expect(b'[')?;
		let mut items = Vec::new();

		self.cursor.skip_ws();
		if self.cursor.eat(b']') {
			return Ok(Value::Array(items));
		}

		loop {
			items.push(self.value(depth + 1)?);
			self.cursor.skip_ws();
			if self.cursor.eat(b',') {
				continue;
			}
			self.cursor.expect(b']')?;
			return Ok(Value::Array(items));
		}
	}

	// Only records and arrays count toward the nesting limit.
	fn enter(&self, depth: u32) -> Result<()> {
		if depth >= self.max_depth {
			return Err(ZsonError::DepthExceeded { max_depth: self.max_depth });
		}
		Ok(())
	}

	fn field_name(&mut self) -> Result<String> {
		match self.cursor.peek() {
			Some(b'"') => self.string(),
			Some(byte) if is_ident_start(byte) => Ok(self.cursor.take_while(is_ident_byte).to_owned()),
			_ => Err(ZsonError::malformed_at(
				self.cursor.pos(),
				format!("expected field name, found {}", self.cursor.describe_next()),
			)),
		}
	}

	fn keyword(&mut self, word: &str) -> bool {
		// `nullable` and `trueish` are not keywords.
		if !self.cursor.starts_with(word) || self.cursor.peek_at(word.len()).is_some_and(is_ident_byte) {
			return false;
		}
		self.cursor.eat_word(word)
	}

	fn number(&mut self) -> Result<Value> {
		let start = self.cursor.pos();
		if self.cursor.eat_word("+Inf") {
			return Ok(Value::F64(f64::INFINITY));
		}
		if self.cursor.eat_word("-Inf") {
			return Ok(Value::F64(f64::NEG_INFINITY));
		}

		let text = self
			.cursor
			.take_while(|byte| byte.is_ascii_digit() || matches!(byte, b'-' | b'+' | b'.' | b'e' | b'E'));
		let invalid = || ZsonError::malformed_at(start, format!("invalid number {text:?}"));

		if text.contains(['.', 'e', 'E']) {
			return text.parse::<f64>().map(Value::F64).map_err(|_| invalid());
		}
		if let Ok(value) = text.parse::<i64>() {
			return Ok(Value::I64(value));
		}
		text.parse::<u64>().map(Value::U64).map_err(|_| invalid())
	}

	fn string(&mut self) -> Result<String> {
		let open = self.cursor.pos();
		self.cursor.expect(b'"')?;
		let mut out = String::new();
		let mut run = self.cursor.pos();

		loop {
			let at = self.cursor.pos();
			match self.cursor.peek() {
				None => return Err(ZsonError::malformed_at(open, "unterminated string")),
				Some(b'"') => {
					out.push_str(self.cursor.slice_from(run));
					self.cursor.bump();
					return Ok(out);
				}
				Some(b'\\') => {
					out.push_str(self.cursor.slice_from(run));
					self.cursor.bump();
					out.push(self.escape(at)?);
					run = self.cursor.pos();
				}
				Some(byte) if byte < 0x20 => {
					return Err(ZsonError::malformed_at(at, "control character in string"));
				}
				Some(_) => {
					self.cursor.bump();
				}
			}
		}
	}

	fn escape(&mut self, at: usize) -> Result<char> {
		let ch = match self.cursor.bump() {
			Some(b'"') => '"',
			Some(b'\\') => '\\',
			Some(b'/') => '/',
			Some(b'b') => '\u{8}',
			Some(b'f') => '\u{c}',
			Some(b'n') => '\n',
			Some(b'r') => '\r',
			Some(b't') => '\t',
			Some(b'u') => return self.unicode_escape(at),
			_ => return Err(ZsonError::malformed_at(at, "invalid escape")),
		};
		Ok(ch)
	}

	fn unicode_escape(&mut self, at: usize) -> Result<char> {
		let high = self.hex4(at)?;
		if !(0xD800..0xDC00).contains(&high) {
			return char::from_u32(u32::from(high)).ok_or_else(|| ZsonError::malformed_at(at, "invalid unicode escape"));
		}

		if !self.cursor.eat_word("\\u") {
			return Err(ZsonError::malformed_at(at, "unpaired surrogate"));
		}
		let low = self.hex4(at)?;
		if !(0xDC00..0xE000).contains(&low) {
			return Err(ZsonError::malformed_at(at, "unpaired surrogate"));
		}
		let code = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
		char::from_u32(code).ok_or_else(|| ZsonError::malformed_at(at, "invalid unicode escape"))
	}

	fn hex4(&mut self, at: usize) -> Result<u16> {
		let mut value = 0_u16;
		for _ in 0..4 {
			let digit = self
				.cursor
				.bump()
				.and_then(|byte| char::from(byte).to_digit(16))
				.ok_or_else(|| ZsonError::malformed_at(at, "invalid unicode escape"))?;
			value = (value << 4) | digit as u16;
		}
		Ok(value)
	}
}

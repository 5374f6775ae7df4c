use crate::zson::{Result, ZsonError};

/// Simple bounded cursor over the bytes of a text payload.
pub struct Cursor<'a> {
	text: &'a str,
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(text: &'a str) -> Self {
		Self { text, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Peek at the next byte without consuming it.
	pub fn peek(&self) -> Option<u8> {
		self.peek_at(0)
	}

	/// Peek `offset` bytes ahead without consuming anything.
	pub fn peek_at(&self, offset: usize) -> Option<u8> {
		self.text.as_bytes().get(self.pos + offset).copied()
	}

	/// Consume and return the next byte.
	pub fn bump(&mut self) -> Option<u8> {
		let byte = self.peek()?;
		self.pos += 1;
		Some(byte)
	}

	/// Skip ASCII whitespace.
	pub fn skip_ws(&mut self) {
		while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
			self.pos += 1;
		}
	}

	/// Consume `byte` if it is next.
	pub fn eat(&mut self, byte: u8) -> bool {
		if self.peek() == Some(byte) {
			self.pos += 1;
			return true;
		}
		false
	}

	/// Consume `byte` or fail.
	pub fn expect(&mut self, byte: u8) -> Result<()> {
		if self.eat(byte) {
			return Ok(());
		}
		Err(ZsonError::malformed_at(self.pos, format!("expected '{}', found {}", char::from(byte), self.describe_next())))
	}

	/// Whether the unread input starts with `word`.
	pub fn starts_with(&self, word: &str) -> bool {
		self.rest().starts_with(word)
	}

	/// Consume `word` if the input continues with it.
	pub fn eat_word(&mut self, word: &str) -> bool {
		if self.starts_with(word) {
			self.pos += word.len();
			return true;
		}
		false
	}

	/// Consume the longest run of ASCII bytes accepted by `accept`.
	pub fn take_while(&mut self, accept: impl Fn(u8) -> bool) -> &'a str {
		let start = self.pos;
		while self.peek().is_some_and(&accept) {
			self.pos += 1;
		}
		&self.text[start..self.pos]
	}

	/// Return the unread text from `start` up to the current position.
	pub fn slice_from(&self, start: usize) -> &'a str {
		&self.text[start..self.pos]
	}

	fn rest(&self) -> &'a str {
		self.text.get(self.pos..).unwrap_or("")
	}

	/// Render the next character for error messages.
	pub fn describe_next(&self) -> String {
		match self.rest().chars().next() {
			Some(ch) => format!("{ch:?}"),
			None => "end of input".to_owned(),
		}
	}
}

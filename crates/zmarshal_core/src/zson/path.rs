use std::fmt;

/// One step from a record or array into a nested value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
	/// Select a named record field.
	Field(Box<str>),
	/// Select an array element by zero-based index.
	Index(usize),
}

/// Location of a value inside the tree being encoded or decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
	/// Ordered sequence of steps from the root.
	pub steps: Vec<PathStep>,
}

impl FieldPath {
	/// Enter a named field.
	pub fn push_field(&mut self, name: &str) {
		self.steps.push(PathStep::Field(name.into()));
	}

	/// Enter an array element.
	pub fn push_index(&mut self, index: usize) {
		self.steps.push(PathStep::Index(index));
	}

	/// Leave the innermost step.
	pub fn pop(&mut self) {
		self.steps.pop();
	}
}

impl fmt::Display for FieldPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.steps.is_empty() {
			return f.write_str("<root>");
		}

		for (idx, step) in self.steps.iter().enumerate() {
			match step {
				PathStep::Field(name) if idx == 0 => write!(f, "{name}")?,
				PathStep::Field(name) => write!(f, ".{name}")?,
				PathStep::Index(index) => write!(f, "[{index}]")?,
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::FieldPath;

	#[test]
	fn renders_dotted_fields_and_indices() {
		let mut path = FieldPath::default();
		assert_eq!(path.to_string(), "<root>");

		path.push_field("things");
		path.push_index(2);
		path.push_field("MyColor");
		assert_eq!(path.to_string(), "things[2].MyColor");

		path.pop();
		path.pop();
		assert_eq!(path.to_string(), "things");
	}

	#[test]
	fn leading_index_has_no_separator() {
		let mut path = FieldPath::default();
		path.push_index(0);
		path.push_field("name");
		assert_eq!(path.to_string(), "[0].name");
	}
}

use serde::Serialize;
use std::fmt::Display;

/// A validation problem with one input field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
	/// Name of the field, or an empty string for the input as a whole.
	pub path: String,
	pub message: String,
}

impl FieldIssue {
	pub fn new(path: &str, message: impl Into<String>) -> FieldIssue {
		FieldIssue {
			path: path.to_string(),
			message: message.into(),
		}
	}
}

impl Display for FieldIssue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.path.is_empty() {
			write!(f, "{}", self.message)
		} else {
			write!(f, "{}: {}", self.path, self.message)
		}
	}
}

use crate::{
	FieldIssue,
	parse::{parse_br_date, to_int, to_number},
};
use serde_json::{Map, Value};

/// Reads typed fields from a JSON form body and collects every problem on the way.
///
/// Missing members, `null` and (for optional fields) empty strings all count as absent.
pub(crate) struct FormReader<'a> {
	object: Option<&'a Map<String, Value>>,
	issues: Vec<FieldIssue>,
}

impl<'a> FormReader<'a> {
	pub fn new(input: &'a Value) -> FormReader<'a> {
		let object = input.as_object();
		let mut issues = Vec::new();
		if object.is_none() {
			issues.push(FieldIssue::new("", "expected a JSON object"));
		}
		FormReader { object, issues }
	}

	fn get(&self, key: &str) -> Option<&'a Value> {
		self.object?.get(key).filter(|v| !v.is_null())
	}

	fn issue(&mut self, key: &str, message: impl Into<String>) {
		self.issues.push(FieldIssue::new(key, message));
	}

	/// A string with at least one character.
	pub fn required_text(&mut self, key: &str) -> String {
		match self.get(key) {
			Some(Value::String(s)) if !s.is_empty() => s.clone(),
			Some(Value::String(_)) | None => {
				self.issue(key, "is required");
				String::new()
			}
			Some(_) => {
				self.issue(key, "must be a string");
				String::new()
			}
		}
	}

	pub fn optional_text(&mut self, key: &str) -> Option<String> {
		match self.get(key) {
			Some(Value::String(s)) if s.is_empty() => None,
			Some(Value::String(s)) => Some(s.clone()),
			None => None,
			Some(_) => {
				self.issue(key, "must be a string");
				None
			}
		}
	}

	/// One of `allowed`. An absent value takes `default`, or is an issue without one.
	pub fn choice(&mut self, key: &str, allowed: &[&str], default: Option<&str>) -> String {
		match (self.get(key), default) {
			(None, Some(default)) => default.to_string(),
			(Some(Value::String(s)), _) if allowed.contains(&s.as_str()) => s.clone(),
			_ => {
				self.issue(key, format!("must be one of: {}", allowed.join(", ")));
				String::new()
			}
		}
	}

	/// An id for editing: a non-empty string or an integer.
	pub fn optional_id(&mut self, key: &str) -> Option<String> {
		match self.get(key) {
			Some(Value::String(s)) if s.trim().is_empty() => None,
			Some(Value::String(s)) => Some(s.trim().to_string()),
			Some(Value::Number(n)) if n.is_i64() || n.is_u64() => Some(n.to_string()),
			None => None,
			Some(_) => {
				self.issue(key, "must be a string or an integer");
				None
			}
		}
	}

	/// A JSON number or Brazilian formatted text, within `-limit..=limit`.
	pub fn coordinate(&mut self, key: &str, limit: f64) -> Option<f64> {
		let value = self.number(key)?;
		if value.abs() > limit {
			self.issue(key, format!("must be between -{limit} and {limit}"));
			return None;
		}
		Some(value)
	}

	/// A JSON number or Brazilian formatted text such as `R$ 1.234,56`.
	pub fn number(&mut self, key: &str) -> Option<f64> {
		match self.get(key) {
			Some(Value::Number(n)) => n.as_f64(),
			Some(Value::String(s)) if s.trim().is_empty() => None,
			Some(Value::String(s)) => {
				let parsed = to_number(s);
				if parsed.is_none() {
					self.issue(key, "must be a number");
				}
				parsed
			}
			None => None,
			Some(_) => {
				self.issue(key, "must be a number");
				None
			}
		}
	}

	/// A percentage between 0 and 100.
	pub fn percent(&mut self, key: &str) -> Option<f64> {
		let value = self.number(key)?;
		if !(0.0..=100.0).contains(&value) {
			self.issue(key, "must be between 0 and 100");
			return None;
		}
		Some(value)
	}

	/// A count; fractional parts are dropped.
	pub fn integer(&mut self, key: &str) -> Option<i64> {
		match self.get(key) {
			Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
			Some(Value::String(s)) if s.trim().is_empty() => None,
			Some(Value::String(s)) => {
				let parsed = to_int(s);
				if parsed.is_none() {
					self.issue(key, "must be a whole number");
				}
				parsed
			}
			None => None,
			Some(_) => {
				self.issue(key, "must be a whole number");
				None
			}
		}
	}

	/// A `dd/mm/yyyy` date, returned as `yyyy-mm-dd`.
	pub fn date(&mut self, key: &str) -> Option<String> {
		let text = self.optional_text(key)?;
		if text.trim().is_empty() {
			return None;
		}
		let parsed = parse_br_date(&text);
		if parsed.is_none() {
			self.issue(key, "must be a valid date in the format dd/mm/yyyy");
		}
		parsed
	}

	/// Adds an issue that is not tied to reading a single field.
	pub fn reject(&mut self, key: &str, message: impl Into<String>) {
		self.issue(key, message);
	}

	pub fn finish<T>(self, value: T) -> Result<T, Vec<FieldIssue>> {
		if self.issues.is_empty() {
			Ok(value)
		} else {
			Err(self.issues)
		}
	}
}

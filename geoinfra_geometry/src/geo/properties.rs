use serde_json::{Map, Value};

/// A JSON object as found in GeoJSON members.
pub type JsonObject = Map<String, Value>;

/// Read-only view on the `properties` member of a feature.
///
/// A missing member and a member that is not an object both read as an empty bag.
/// JSON `null` values are treated like missing keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeoProperties<'a>(Option<&'a JsonObject>);

impl<'a> GeoProperties<'a> {
	pub fn new(object: Option<&'a JsonObject>) -> GeoProperties<'a> {
		GeoProperties(object)
	}

	pub fn get(&self, key: &str) -> Option<&'a Value> {
		self.0?.get(key).filter(|v| !v.is_null())
	}

	/// Returns the value of the first key that is present and not `null`.
	pub fn first(&self, keys: &[&str]) -> Option<&'a Value> {
		keys.iter().find_map(|key| self.get(key))
	}

	/// Like [`first`](Self::first), rendered as display text. Missing values give an empty string.
	pub fn text(&self, keys: &[&str]) -> String {
		self.first(keys).map(value_to_text).unwrap_or_default()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_none_or(Map::is_empty)
	}
}

/// Renders a JSON value the way it should appear in a popup.
///
/// Strings are taken verbatim, `null` becomes empty, arrays and objects are written as JSON.
pub fn value_to_text(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		Value::Bool(b) => b.to_string(),
		Value::Number(n) => n.to_string(),
		Value::Array(_) | Value::Object(_) => value.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn object(value: Value) -> JsonObject {
		match value {
			Value::Object(map) => map,
			_ => panic!("expected object"),
		}
	}

	#[test]
	fn first_skips_missing_and_null() {
		let props = object(json!({"nome": null, "Name": "Porto de Santos", "tipo": ""}));
		let view = GeoProperties::new(Some(&props));
		assert_eq!(view.text(&["nome", "Name"]), "Porto de Santos");
		assert_eq!(view.text(&["tipo", "Name"]), "");
		assert_eq!(view.text(&["missing"]), "");
	}

	#[test]
	fn empty_views() {
		assert!(GeoProperties::default().is_empty());
		assert_eq!(GeoProperties::default().text(&["nome"]), "");
		let props = JsonObject::new();
		assert!(GeoProperties::new(Some(&props)).is_empty());
	}

	#[test]
	fn renders_values() {
		assert_eq!(value_to_text(&json!(12)), "12");
		assert_eq!(value_to_text(&json!(1.5)), "1.5");
		assert_eq!(value_to_text(&json!(true)), "true");
		assert_eq!(value_to_text(&json!(null)), "");
		assert_eq!(value_to_text(&json!("SBBR")), "SBBR");
		assert_eq!(value_to_text(&json!([1, 2])), "[1,2]");
	}
}

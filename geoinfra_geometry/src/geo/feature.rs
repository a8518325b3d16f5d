use super::{GeoProperties, Geometry, JsonObject};
use geoinfra_core::GeoBBox;
use serde::Serialize;
use serde_json::Value;

/// A GeoJSON feature.
///
/// The feature keeps the JSON object it was read from, so members this crate does not know
/// about (`id`, `bbox`, foreign members) survive a round trip unchanged.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GeoFeature(JsonObject);

impl GeoFeature {
	/// Creates a feature with `type: "Feature"` from a geometry and a property bag.
	pub fn new(geometry: Value, properties: JsonObject) -> GeoFeature {
		let mut object = JsonObject::new();
		object.insert("type".into(), Value::from("Feature"));
		object.insert("geometry".into(), geometry);
		object.insert("properties".into(), Value::Object(properties));
		GeoFeature(object)
	}

	/// Wraps an existing JSON object without checking it.
	pub fn from_object(object: JsonObject) -> GeoFeature {
		GeoFeature(object)
	}

	/// The `geometry` member, or `None` if it is missing or `null`.
	pub fn geometry(&self) -> Option<&Value> {
		self.0.get("geometry").filter(|g| !g.is_null())
	}

	pub fn geometry_type(&self) -> Option<&str> {
		self.geometry()?.get("type")?.as_str()
	}

	pub fn properties(&self) -> GeoProperties<'_> {
		GeoProperties::new(self.0.get("properties").and_then(Value::as_object))
	}

	/// Sets `properties` to an empty object when it is missing or `null`.
	pub fn ensure_properties(&mut self) {
		let properties = self.0.entry("properties").or_insert(Value::Null);
		if properties.is_null() {
			*properties = Value::Object(JsonObject::new());
		}
	}

	/// Bounding box of the geometry, or `None` if it can't be measured.
	pub fn bounds(&self) -> Option<GeoBBox> {
		let geometry = Geometry::from_json(self.geometry()?).ok()?;
		geometry.compute_bounds().ok().flatten()
	}

	pub fn as_object(&self) -> &JsonObject {
		&self.0
	}

	pub fn into_object(self) -> JsonObject {
		self.0
	}

	pub fn to_json(&self) -> Value {
		Value::Object(self.0.clone())
	}
}

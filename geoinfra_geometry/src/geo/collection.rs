use super::{GeoFeature, JsonObject};
use geoinfra_core::GeoBBox;
use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::{Value, json};

/// An ordered list of features, written as a GeoJSON `FeatureCollection`.
///
/// Top-level members other than `type` and `features` (`name`, `crs`, `bbox`, ...) are kept
/// in `foreign_members` and written back out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeoCollection {
	pub features: Vec<GeoFeature>,
	pub foreign_members: JsonObject,
}

impl GeoCollection {
	pub fn new() -> GeoCollection {
		GeoCollection::default()
	}

	pub fn len(&self) -> usize {
		self.features.len()
	}

	pub fn is_empty(&self) -> bool {
		self.features.is_empty()
	}

	/// Keeps every member of `object` except `type` and `features`.
	pub fn with_foreign_members(mut self, mut object: JsonObject) -> GeoCollection {
		object.remove("type");
		object.remove("features");
		self.foreign_members = object;
		self
	}

	pub fn iter(&self) -> std::slice::Iter<'_, GeoFeature> {
		self.features.iter()
	}

	/// Union of the bounds of all measurable features. Other features are ignored.
	pub fn bounds(&self) -> Option<GeoBBox> {
		self
			.features
			.iter()
			.filter_map(GeoFeature::bounds)
			.reduce(|a, b| a.extended(&b))
	}

	pub fn to_json(&self) -> Value {
		let mut object = JsonObject::new();
		object.insert("type".to_string(), json!("FeatureCollection"));
		for (key, value) in &self.foreign_members {
			object.insert(key.clone(), value.clone());
		}
		object.insert(
			"features".to_string(),
			Value::Array(self.features.iter().map(GeoFeature::to_json).collect()),
		);
		Value::Object(object)
	}
}

impl From<Vec<GeoFeature>> for GeoCollection {
	fn from(features: Vec<GeoFeature>) -> Self {
		GeoCollection {
			features,
			foreign_members: JsonObject::new(),
		}
	}
}

impl Serialize for GeoCollection {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.foreign_members.len() + 2))?;
		map.serialize_entry("type", "FeatureCollection")?;
		for (key, value) in &self.foreign_members {
			map.serialize_entry(key, value)?;
		}
		map.serialize_entry("features", &self.features)?;
		map.end()
	}
}

use crate::{GeoCollection, GeoFeature};
use serde_json::Value;

/// Result of [`normalize`].
#[derive(Clone, Debug, PartialEq)]
pub enum Normalized {
	/// The input had one of the accepted shapes.
	Recognized(GeoCollection),
	/// The input had some other shape, described in a few words.
	Unrecognized(String),
}

impl Normalized {
	/// Returns the collection, or an empty one for unrecognized input.
	pub fn into_collection(self) -> GeoCollection {
		match self {
			Normalized::Recognized(collection) => collection,
			Normalized::Unrecognized(_) => GeoCollection::new(),
		}
	}

	pub fn is_recognized(&self) -> bool {
		matches!(self, Normalized::Recognized(_))
	}
}

/// Turns any JSON value into a feature collection.
///
/// Accepted shapes:
/// - a falsy value (`null`, `false`, `0`, `""`) gives an empty collection
/// - a `FeatureCollection` with a `features` array; non-object entries are dropped, other
///   top-level members (`name`, `crs`, ...) are kept
/// - a single `Feature` with a truthy `geometry`
/// - a non-empty array whose first element is a `Feature`; non-object entries are dropped
///
/// Every resulting feature has a `properties` object. Order is preserved.
///
/// ```
/// use geoinfra_geometry::{Normalized, normalize};
/// use serde_json::json;
///
/// let result = normalize(json!([{"type": "Feature", "geometry": {"type": "Point", "coordinates": [1, 2]}}]));
/// let Normalized::Recognized(collection) = result else { panic!() };
/// assert_eq!(collection.len(), 1);
///
/// let result = normalize(json!({"type": "Topology"}));
/// assert_eq!(result, Normalized::Unrecognized("object with type 'Topology'".to_string()));
/// ```
pub fn normalize(input: Value) -> Normalized {
	if is_falsy(&input) {
		return Normalized::Recognized(GeoCollection::new());
	}

	match input {
		Value::Object(mut object) => match object.get("type").and_then(Value::as_str).map(str::to_owned).as_deref() {
			Some("FeatureCollection") => match object.remove("features") {
				Some(Value::Array(features)) => {
					Normalized::Recognized(collect_features(features).with_foreign_members(object))
				}
				_ => Normalized::Unrecognized("FeatureCollection without a features array".to_string()),
			},
			Some("Feature") => {
				if object.get("geometry").is_some_and(|g| !is_falsy(g)) {
					let mut feature = GeoFeature::from_object(object);
					feature.ensure_properties();
					Normalized::Recognized(GeoCollection::from(vec![feature]))
				} else {
					Normalized::Unrecognized("Feature without geometry".to_string())
				}
			}
			Some(other) => Normalized::Unrecognized(format!("object with type '{other}'")),
			None => Normalized::Unrecognized("object without type".to_string()),
		},
		Value::Array(items) => {
			if items.is_empty() {
				Normalized::Unrecognized("empty array".to_string())
			} else if items[0].get("type").and_then(Value::as_str) == Some("Feature") {
				Normalized::Recognized(collect_features(items))
			} else {
				Normalized::Unrecognized(format!("array of {} items not starting with a Feature", items.len()))
			}
		}
		Value::Bool(_) => Normalized::Unrecognized("boolean".to_string()),
		Value::Number(_) => Normalized::Unrecognized("number".to_string()),
		Value::String(_) => Normalized::Unrecognized("string".to_string()),
		Value::Null => Normalized::Recognized(GeoCollection::new()),
	}
}

fn collect_features(items: Vec<Value>) -> GeoCollection {
	let features = items
		.into_iter()
		.filter_map(|item| match item {
			Value::Object(object) => {
				let mut feature = GeoFeature::from_object(object);
				feature.ensure_properties();
				Some(feature)
			}
			_ => None,
		})
		.collect::<Vec<_>>();
	GeoCollection::from(features)
}

fn is_falsy(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::Bool(b) => !b,
		Value::Number(n) => n.as_f64() == Some(0.0),
		Value::String(s) => s.is_empty(),
		Value::Array(_) | Value::Object(_) => false,
	}
}

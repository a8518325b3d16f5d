use crate::{GeoCollection, GeoFeature};
use serde_json::Value;

/// Returns `true` if the feature has no drawable geometry.
///
/// The check is structural and shallow: it looks at the shape of the first elements only and
/// never at the values of nested coordinates. Geometry types it doesn't know are accepted.
pub fn is_empty_geometry(feature: &GeoFeature) -> bool {
	let Some(geometry) = feature.geometry() else {
		return true;
	};
	let Some(coordinates) = geometry.get("coordinates").and_then(Value::as_array) else {
		return true;
	};

	match geometry.get("type").and_then(Value::as_str) {
		Some("Point") => coordinates.len() != 2 || coordinates.iter().any(|v| !v.is_number()),
		Some("MultiPoint" | "LineString") => coordinates.is_empty(),
		Some("MultiLineString" | "Polygon") => first_non_empty(coordinates).is_none(),
		Some("MultiPolygon") => first_non_empty(coordinates).and_then(|p| first_non_empty(p)).is_none(),
		_ => false,
	}
}

/// The first element, if it is a non-empty array.
fn first_non_empty(items: &[Value]) -> Option<&Vec<Value>> {
	items.first()?.as_array().filter(|a| !a.is_empty())
}

/// Drops every feature flagged by [`is_empty_geometry`] and returns how many were dropped.
pub fn remove_empty_geometries(collection: &mut GeoCollection) -> usize {
	let before = collection.len();
	collection.features.retain(|f| !is_empty_geometry(f));
	before - collection.len()
}

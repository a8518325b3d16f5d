use crate::LoadedLayers;
use geoinfra_core::Viewport;
use geoinfra_geometry::GeoCollection;

/// Share of the width and height added on every side of the combined bounds.
pub const BOUNDS_PADDING: f64 = 0.1;

/// Frames all loaded features.
///
/// Failed and empty layers are ignored, as are features whose geometry can't be measured.
/// Without any measurable feature the default national view is returned.
pub fn aggregate_viewport(layers: &LoadedLayers) -> Viewport {
	let bbox = layers
		.collections()
		.filter(|c| !c.is_empty())
		.filter_map(GeoCollection::bounds)
		.reduce(|a, b| a.extended(&b));

	match bbox {
		Some(bbox) => Viewport::Bounds(bbox.pad(BOUNDS_PADDING)),
		None => Viewport::default(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::LayerEntry;
	use geoinfra_geometry::{GeoFeature, JsonObject};
	use serde_json::json;

	fn collection(geometries: Vec<serde_json::Value>) -> GeoCollection {
		GeoCollection::from(
			geometries
				.into_iter()
				.map(|g| GeoFeature::new(g, JsonObject::new()))
				.collect::<Vec<_>>(),
		)
	}

	#[test]
	fn union_of_layers_is_padded() {
		let layers = LoadedLayers::new(vec![
			LayerEntry::loaded(
				"a",
				collection(vec![json!({"type": "Point", "coordinates": [-70.0, -30.0]})]),
				0,
			),
			LayerEntry::failed("b"),
			LayerEntry::loaded(
				"c",
				collection(vec![json!({"type": "LineString", "coordinates": [[-60.0, -10.0], [-50.0, 0.0]]})]),
				0,
			),
		]);
		let Viewport::Bounds(bbox) = aggregate_viewport(&layers) else {
			panic!("expected bounds");
		};
		assert_eq!(bbox.as_tuple(), (-72.0, -33.0, -48.0, 3.0));
	}

	#[test]
	fn no_layers_gives_default() {
		assert!(aggregate_viewport(&LoadedLayers::default()).is_default());
	}

	#[test]
	fn only_failed_or_empty_layers_gives_default() {
		let layers = LoadedLayers::new(vec![
			LayerEntry::failed("a"),
			LayerEntry::loaded("b", GeoCollection::new(), 0),
		]);
		assert!(aggregate_viewport(&layers).is_default());
	}

	#[test]
	fn unmeasurable_features_are_skipped() {
		let layers = LoadedLayers::new(vec![LayerEntry::loaded(
			"a",
			collection(vec![
				json!({"type": "Circle", "coordinates": [1, 1]}),
				json!({"type": "Point", "coordinates": [400, 0]}),
			]),
			0,
		)]);
		assert!(aggregate_viewport(&layers).is_default());

		let layers = LoadedLayers::new(vec![LayerEntry::loaded(
			"a",
			collection(vec![
				json!({"type": "Point", "coordinates": ["x", 0]}),
				json!({"type": "Point", "coordinates": [-47.93, -15.78]}),
			]),
			0,
		)]);
		let Viewport::Bounds(bbox) = aggregate_viewport(&layers) else {
			panic!("expected bounds");
		};
		assert_eq!(bbox.as_tuple(), (-47.93, -15.78, -47.93, -15.78));
	}
}

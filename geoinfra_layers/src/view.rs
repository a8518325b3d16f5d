//! What the map renderer receives: per layer its style, features, popups and tooltips,
//! plus the initial viewport.

use crate::{LayerCategory, LayerDescriptor, LayerStyle, LoadedLayers};
use geoinfra_core::Viewport;
use geoinfra_geometry::{GeoCollection, popup::PopupFormatter};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerView<'a> {
	pub id: &'a str,
	pub name: &'a str,
	pub category: LayerCategory,
	pub style: LayerStyle,
	pub hover_style: LayerStyle,
	pub loaded: bool,
	pub count: usize,
	pub dropped: usize,
	/// `None` if the layer failed to load.
	pub data: Option<&'a GeoCollection>,
	/// Popup markup per feature, parallel to `data.features`.
	pub popups: Vec<String>,
	/// Tooltip text per feature, parallel to `data.features`.
	pub tooltips: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MapView<'a> {
	pub layers: Vec<LayerView<'a>>,
	pub viewport: Viewport,
}

impl<'a> LayerView<'a> {
	pub fn new(descriptor: &'a LayerDescriptor, layers: &'a LoadedLayers) -> LayerView<'a> {
		let entry = layers.entry(&descriptor.id);
		let data = entry.and_then(|e| e.collection.as_ref());
		let template = descriptor.category.popup_template();

		let (popups, tooltips): (Vec<String>, Vec<String>) = data
			.map(|collection| {
				collection
					.iter()
					.map(|f| (template.popup(&f.properties()), template.tooltip(&f.properties())))
					.unzip()
			})
			.unwrap_or_default();

		let style = descriptor.style();
		LayerView {
			id: &descriptor.id,
			name: &descriptor.name,
			category: descriptor.category,
			hover_style: style.hover(),
			style,
			loaded: data.is_some(),
			count: data.map_or(0, GeoCollection::len),
			dropped: entry.map_or(0, |e| e.dropped),
			data,
			popups,
			tooltips,
		}
	}
}

impl<'a> MapView<'a> {
	pub fn new(descriptors: &'a [LayerDescriptor], layers: &'a LoadedLayers, viewport: Viewport) -> MapView<'a> {
		MapView {
			layers: descriptors.iter().map(|d| LayerView::new(d, layers)).collect(),
			viewport,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{LayerEntry, default_layers};
	use geoinfra_geometry::{GeoFeature, JsonObject};
	use serde_json::json;

	#[test]
	fn builds_views_for_loaded_and_failed_layers() {
		let descriptors = default_layers();
		let mut properties = JsonObject::new();
		properties.insert("nome".into(), json!("Santos"));
		let ports = GeoCollection::from(vec![GeoFeature::new(
			json!({"type": "Point", "coordinates": [-46.3, -23.9]}),
			properties,
		)]);
		let layers = LoadedLayers::new(vec![
			LayerEntry::failed("ferrovias"),
			LayerEntry::failed("rodoviasfederais"),
			LayerEntry::loaded("portos", ports, 1),
			LayerEntry::failed("aeroportos"),
		]);

		let view = MapView::new(&descriptors, &layers, Viewport::default());
		assert_eq!(view.layers.len(), 4);

		let ferrovias = &view.layers[0];
		assert!(!ferrovias.loaded);
		assert!(ferrovias.data.is_none());
		assert!(ferrovias.popups.is_empty());

		let portos = &view.layers[2];
		assert!(portos.loaded);
		assert_eq!(portos.count, 1);
		assert_eq!(portos.dropped, 1);
		assert_eq!(portos.tooltips, ["Santos"]);
		assert!(portos.popups[0].starts_with("<b>Porto</b>"));

		let value = serde_json::to_value(&view).unwrap();
		assert_eq!(value["layers"][2]["category"], "port");
		assert_eq!(value["layers"][2]["hoverStyle"]["weight"], 5.0);
		assert_eq!(value["layers"][0]["data"], serde_json::Value::Null);
		assert_eq!(value["viewport"]["type"], "center");
	}
}

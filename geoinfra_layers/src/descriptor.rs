//! Layer descriptors: what a layer is called, where its file lives and how it is drawn.

use anyhow::{Result, ensure};
use geoinfra_geometry::popup::{
	PopupTemplate, airport_popup, economic_support_popup, highway_popup, pipeline_popup, port_popup, railway_popup,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, sync::LazyLock};

static COLOR: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap());

/// The kind of infrastructure a layer shows. Selects the popup.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerCategory {
	Railway,
	Highway,
	Port,
	Airport,
	Pipeline,
	EconomicSupport,
}

impl LayerCategory {
	pub fn popup_template(self) -> PopupTemplate {
		match self {
			LayerCategory::Railway => railway_popup(),
			LayerCategory::Highway => highway_popup(),
			LayerCategory::Port => port_popup(),
			LayerCategory::Airport => airport_popup(),
			LayerCategory::Pipeline => pipeline_popup(),
			LayerCategory::EconomicSupport => economic_support_popup(),
		}
	}
}

/// One map layer, as configured.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LayerDescriptor {
	/// Unique key of the layer.
	pub id: String,
	/// Name shown in the layer control.
	pub name: String,
	/// Path of the GeoJSON file, relative to the data base.
	pub url: String,
	/// CSS hex color, `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
	pub color: String,
	pub category: LayerCategory,
}

impl LayerDescriptor {
	pub fn new(id: &str, name: &str, url: &str, color: &str, category: LayerCategory) -> LayerDescriptor {
		LayerDescriptor {
			id: id.to_string(),
			name: name.to_string(),
			url: url.to_string(),
			color: color.to_string(),
			category,
		}
	}

	pub fn check(&self) -> Result<()> {
		ensure!(!self.id.trim().is_empty(), "layer id must not be empty");
		ensure!(!self.url.trim().is_empty(), "layer '{}' has an empty url", self.id);
		ensure!(
			COLOR.is_match(&self.color),
			"layer '{}' has an invalid color '{}'",
			self.id,
			self.color
		);
		Ok(())
	}

	pub fn style(&self) -> LayerStyle {
		LayerStyle::from_color(&self.color)
	}
}

/// Checks every descriptor and that all ids are unique.
pub fn check_layers(layers: &[LayerDescriptor]) -> Result<()> {
	let mut ids = HashSet::new();
	for layer in layers {
		layer.check()?;
		ensure!(ids.insert(layer.id.as_str()), "duplicate layer id '{}'", layer.id);
	}
	Ok(())
}

/// Railways, federal highways, ports and airports.
pub fn default_layers() -> Vec<LayerDescriptor> {
	vec![
		LayerDescriptor::new(
			"ferrovias",
			"Ferrovias",
			"/dados/Ferroviario/Ferrovias.geojson",
			"#e31a1c",
			LayerCategory::Railway,
		),
		LayerDescriptor::new(
			"rodoviasfederais",
			"Rodovias Federais",
			"/dados/Rodoviário/federais.geojson",
			"#00c050ff",
			LayerCategory::Highway,
		),
		LayerDescriptor::new(
			"portos",
			"Portos",
			"/dados/Portos/Portos.geojson",
			"#2800b8ff",
			LayerCategory::Port,
		),
		LayerDescriptor::new(
			"aeroportos",
			"Aeroportos",
			"/dados/Aeroportos/Aeroportos.geojson",
			"#505050ff",
			LayerCategory::Airport,
		),
	]
}

/// Path options for drawing a layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerStyle {
	pub color: String,
	pub weight: f64,
	pub opacity: f64,
	pub fill_opacity: f64,
	/// Radius of the circle marker used for points.
	pub radius: f64,
}

impl LayerStyle {
	pub fn from_color(color: &str) -> LayerStyle {
		LayerStyle {
			color: color.to_string(),
			weight: 3.0,
			opacity: 0.9,
			fill_opacity: 0.25,
			radius: 3.0,
		}
	}

	/// The highlighted variant while the pointer is over a feature.
	pub fn hover(&self) -> LayerStyle {
		LayerStyle {
			weight: 5.0,
			opacity: 1.0,
			fill_opacity: 0.4,
			..self.clone()
		}
	}
}

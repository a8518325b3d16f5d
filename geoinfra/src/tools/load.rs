use anyhow::{Context, Result};
use geoinfra::Config;
use geoinfra_core::{Viewport, io::get_data_source};
use geoinfra_layers::{EventBus, LayerDescriptor, LayerLoader, LayerMap, LoadedLayers, MapView};
use std::path::PathBuf;

#[derive(clap::Args, Debug)]
#[command(disable_version_flag = true, verbatim_doc_comment)]
pub struct Subcommand {
	/// URL or folder the layer files are read from,
	/// e.g. "https://example.org/painel" or "./site".
	/// Defaults to the data base of the configuration file.
	#[arg(value_name = "BASE", verbatim_doc_comment)]
	pub base: Option<String>,

	/// Path to a configuration file (YAML) defining layers and data.
	#[arg(short = 'c', long, value_name = "FILE", display_order = 0)]
	pub config: Option<PathBuf>,

	/// Timeout for fetching one layer file, in seconds. Default: 30
	#[arg(short = 't', long, value_name = "SECONDS", display_order = 1)]
	pub timeout: Option<u64>,

	/// Print everything the map receives as JSON instead of a summary.
	#[arg(long, display_order = 2)]
	pub json: bool,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	let mut config = if let Some(config_path) = &arguments.config {
		Config::from_path(config_path)?
	} else {
		Config::default()
	};
	config.data.override_optional_base(&arguments.base);
	if arguments.timeout.is_some() {
		config.data.timeout_seconds = arguments.timeout;
	}

	let base = config
		.data
		.layer_base()
		.context("no data base given: pass BASE or a configuration file with data.base")?;
	let source = get_data_source(&base, Some(config.data.timeout()))?;

	let events = EventBus::new();
	events.subscribe(|event| log::info!("{event}"));
	let map = LayerMap::new(LayerLoader::new(source, config.layers, events));

	let snapshot = map.reload().await.context("load cycle was cancelled")?;
	let (Some(layers), Some(viewport)) = (snapshot.layers, snapshot.viewport) else {
		anyhow::bail!("load cycle finished without results");
	};

	if arguments.json {
		let view = MapView::new(map.descriptors(), &layers, viewport);
		println!("{}", serde_json::to_string_pretty(&view)?);
	} else {
		print!("{}", summary(map.descriptors(), &layers, &viewport));
	}
	Ok(())
}

fn summary(descriptors: &[LayerDescriptor], layers: &LoadedLayers, viewport: &Viewport) -> String {
	let mut text = String::new();
	for descriptor in descriptors {
		let loaded = layers
			.entry(&descriptor.id)
			.and_then(|entry| entry.collection.as_ref().map(|c| (c.len(), entry.dropped)));
		let line = match loaded {
			Some((features, dropped)) => format!("{:<20} {features:>7} features {dropped:>5} dropped\n", descriptor.id),
			None => format!("{:<20} failed\n", descriptor.id),
		};
		text.push_str(&line);
	}
	text.push_str(&format!("viewport: {}\n", describe_viewport(viewport)));
	text
}

fn describe_viewport(viewport: &Viewport) -> String {
	match viewport {
		Viewport::Bounds(bbox) => {
			let (x_min, y_min, x_max, y_max) = bbox.as_tuple();
			format!("bounds {x_min}, {y_min}, {x_max}, {y_max}")
		}
		Viewport::Center(center) => format!(
			"center {}, {} at zoom {}",
			center.longitude(),
			center.latitude(),
			center.zoom()
		),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tests::run_command;
	use geoinfra_core::GeoBBox;
	use geoinfra_geometry::GeoCollection;
	use geoinfra_layers::{LayerEntry, default_layers};

	#[test]
	fn describes_viewports() {
		assert_eq!(
			describe_viewport(&Viewport::default()),
			"center -47.93, -15.78 at zoom 5"
		);
		let bbox = GeoBBox::new(-50.0, -20.0, -40.0, -10.0).unwrap();
		assert_eq!(
			describe_viewport(&Viewport::Bounds(bbox)),
			"bounds -50, -20, -40, -10"
		);
	}

	#[test]
	fn summary_lists_every_layer() {
		let layers = LoadedLayers::new(vec![
			LayerEntry::failed("ferrovias"),
			LayerEntry::loaded("rodoviasfederais", GeoCollection::new(), 2),
			LayerEntry::failed("portos"),
			LayerEntry::failed("aeroportos"),
		]);
		assert_eq!(
			summary(&default_layers(), &layers, &Viewport::default()),
			"ferrovias            failed\n\
			 rodoviasfederais           0 features     2 dropped\n\
			 portos               failed\n\
			 aeroportos           failed\n\
			 viewport: center -47.93, -15.78 at zoom 5\n"
		);
	}

	#[test]
	fn load_site_folder() -> Result<()> {
		run_command(vec!["geoinfra", "load", "../testdata/site"])?;
		run_command(vec!["geoinfra", "load", "--json", "../testdata/site"])?;
		Ok(())
	}

	#[test]
	fn load_needs_a_base() {
		let err = run_command(vec!["geoinfra", "load"]).unwrap_err();
		assert!(err.to_string().starts_with("no data base given"));
	}
}

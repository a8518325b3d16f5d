//! Concurrent loading of all layers.
//!
//! Every layer is read, parsed, normalized and cleaned independently. A failing layer becomes
//! a `None` entry and never affects its siblings. One [`CancellationToken`] covers the whole
//! batch: cancelling it drops every in-flight read and the cycle yields
//! [`LoadOutcome::Cancelled`] instead of partial results.

use crate::{EventBus, LayerDescriptor, LayerEntry, LoadEvent, LoadedLayers};
use anyhow::{Context, Result};
use futures::future::join_all;
use geoinfra_core::io::DataSource;
use geoinfra_geometry::{GeoCollection, Normalized, parse_geojson_bytes, remove_empty_geometries};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Result of one load cycle.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadOutcome {
	Completed(LoadedLayers),
	Cancelled,
}

#[derive(Debug)]
pub struct LayerLoader {
	source: DataSource,
	layers: Arc<Vec<LayerDescriptor>>,
	events: EventBus,
}

impl LayerLoader {
	pub fn new(source: DataSource, layers: Vec<LayerDescriptor>, events: EventBus) -> LayerLoader {
		LayerLoader {
			source,
			layers: Arc::new(layers),
			events,
		}
	}

	pub fn layers(&self) -> &[LayerDescriptor] {
		&self.layers
	}

	pub fn events(&self) -> &EventBus {
		&self.events
	}

	/// Loads all layers concurrently and waits until each one has settled.
	pub async fn load(&self, token: &CancellationToken) -> LoadOutcome {
		log::info!("loading {} layers from {}", self.layers.len(), self.source.get_name());
		self.events.emit(LoadEvent::CycleStarted {
			layers: self.layers.len(),
		});

		let entries = join_all(self.layers.iter().map(|layer| self.load_layer(layer, token))).await;

		if token.is_cancelled() {
			log::debug!("load cycle cancelled");
			self.events.emit(LoadEvent::CycleCancelled);
			return LoadOutcome::Cancelled;
		}

		let layers = LoadedLayers::new(entries);
		let failed = layers.len() - layers.loaded_count();
		log::info!("loaded {} layers, {} failed", layers.loaded_count(), failed);
		self.events.emit(LoadEvent::CycleCompleted {
			loaded: layers.loaded_count(),
			failed,
		});
		LoadOutcome::Completed(layers)
	}

	async fn load_layer(&self, layer: &LayerDescriptor, token: &CancellationToken) -> LayerEntry {
		tokio::select! {
			biased;
			() = token.cancelled() => LayerEntry::failed(&layer.id),
			result = self.fetch_layer(layer) => match result {
				Ok((collection, dropped)) => {
					log::debug!("[{}] {} features, {} dropped", layer.id, collection.len(), dropped);
					self.events.emit(LoadEvent::LayerLoaded {
						id: layer.id.clone(),
						features: collection.len(),
						dropped,
					});
					LayerEntry::loaded(&layer.id, collection, dropped)
				}
				Err(err) => {
					log::error!("[{}] failed to load: {err:#}", layer.id);
					self.events.emit(LoadEvent::LayerFailed {
						id: layer.id.clone(),
						message: format!("{err:#}"),
					});
					LayerEntry::failed(&layer.id)
				}
			},
		}
	}

	async fn fetch_layer(&self, layer: &LayerDescriptor) -> Result<(GeoCollection, usize)> {
		let reader = self.source.get_reader(&layer.url)?;
		let blob = reader.read_all().await?;
		let normalized =
			parse_geojson_bytes(blob.as_slice()).with_context(|| format!("reading '{}'", reader.get_name()))?;

		let mut collection = match normalized {
			Normalized::Recognized(collection) => collection,
			Normalized::Unrecognized(description) => {
				log::warn!("[{}] unrecognized GeoJSON: {description}", layer.id);
				GeoCollection::new()
			}
		};
		let dropped = remove_empty_geometries(&mut collection);
		Ok((collection, dropped))
	}
}

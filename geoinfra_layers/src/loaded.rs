use geoinfra_geometry::GeoCollection;

/// Outcome of loading one layer.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerEntry {
	pub id: String,
	/// The cleaned collection, or `None` if the layer failed.
	pub collection: Option<GeoCollection>,
	/// Number of features removed because their geometry was empty.
	pub dropped: usize,
}

impl LayerEntry {
	pub fn loaded(id: &str, collection: GeoCollection, dropped: usize) -> LayerEntry {
		LayerEntry {
			id: id.to_string(),
			collection: Some(collection),
			dropped,
		}
	}

	pub fn failed(id: &str) -> LayerEntry {
		LayerEntry {
			id: id.to_string(),
			collection: None,
			dropped: 0,
		}
	}

	pub fn is_failed(&self) -> bool {
		self.collection.is_none()
	}
}

/// All layers of one load cycle, one entry per configured layer in configuration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadedLayers {
	entries: Vec<LayerEntry>,
}

impl LoadedLayers {
	pub fn new(entries: Vec<LayerEntry>) -> LoadedLayers {
		LoadedLayers { entries }
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, LayerEntry> {
		self.entries.iter()
	}

	pub fn entry(&self, id: &str) -> Option<&LayerEntry> {
		self.entries.iter().find(|e| e.id == id)
	}

	/// The collection of a layer; `None` if the layer is unknown or failed.
	pub fn get(&self, id: &str) -> Option<&GeoCollection> {
		self.entry(id)?.collection.as_ref()
	}

	/// Collections of all layers that loaded.
	pub fn collections(&self) -> impl Iterator<Item = &GeoCollection> {
		self.entries.iter().filter_map(|e| e.collection.as_ref())
	}

	pub fn loaded_count(&self) -> usize {
		self.collections().count()
	}

	pub fn failed_ids(&self) -> Vec<&str> {
		self
			.entries
			.iter()
			.filter(|e| e.is_failed())
			.map(|e| e.id.as_str())
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lookups() {
		let layers = LoadedLayers::new(vec![
			LayerEntry::loaded("portos", GeoCollection::new(), 2),
			LayerEntry::failed("ferrovias"),
		]);
		assert_eq!(layers.len(), 2);
		assert!(layers.get("portos").is_some());
		assert!(layers.get("ferrovias").is_none());
		assert!(layers.entry("ferrovias").unwrap().is_failed());
		assert!(layers.get("unknown").is_none());
		assert_eq!(layers.loaded_count(), 1);
		assert_eq!(layers.failed_ids(), ["ferrovias"]);
		assert_eq!(layers.entry("portos").unwrap().dropped, 2);
	}
}

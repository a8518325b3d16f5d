use super::{CorsConfig, DataConfig, ServerConfig, StoreConfig};
use anyhow::{Context, Result};
use geoinfra_layers::{LayerDescriptor, check_layers, default_layers};
use serde::Deserialize;
use std::{
	fs::File,
	io::{BufReader, Read},
	path::Path,
};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
	/// HTTP server configuration
	#[serde(default)]
	pub server: ServerConfig,

	/// Cross-Origin Resource Sharing (CORS) settings
	#[serde(default)]
	pub cors: CorsConfig,

	/// Layer files and static folder
	#[serde(default)]
	pub data: DataConfig,

	/// Record persistence
	#[serde(default)]
	pub store: StoreConfig,

	/// Map layers, in drawing order
	#[serde(default = "default_layers")]
	pub layers: Vec<LayerDescriptor>,
}

impl Default for Config {
	fn default() -> Self {
		Config {
			server: ServerConfig::default(),
			cors: CorsConfig::default(),
			data: DataConfig::default(),
			store: StoreConfig::default(),
			layers: default_layers(),
		}
	}
}

impl Config {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		let config: Config = serde_yaml_ng::from_reader(reader)?;
		config.check()?;
		Ok(config)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		let config: Config = serde_yaml_ng::from_str(text)?;
		config.check()?;
		Ok(config)
	}

	/// Parses a config file. Relative paths in it are resolved against the file's folder.
	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("opening config file {path:?}"))?;
		let mut config = Config::from_reader(BufReader::new(file)).with_context(|| format!("parsing config file {path:?}"))?;
		config.data.resolve_paths(path.parent().unwrap_or(Path::new("")));
		Ok(config)
	}

	fn check(&self) -> Result<()> {
		check_layers(&self.layers).context("checking layers")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::StoreKind;
	use geoinfra_layers::LayerCategory;
	use pretty_assertions::assert_eq;
	use std::{collections::BTreeMap, path::PathBuf};

	#[test]
	fn parse_example_config() {
		let cfg = Config::from_path(Path::new("../testdata/config.yml")).unwrap();

		assert_eq!(
			cfg,
			Config {
				server: ServerConfig {
					ip: Some("127.0.0.1".into()),
					port: Some(51234),
				},
				cors: CorsConfig {
					allowed_origins: vec!["https://painel.example.org".into(), "*.example.net".into()],
					max_age_seconds: Some(3600),
				},
				data: DataConfig {
					base: None,
					folder: Some(PathBuf::from("../testdata/site")),
					timeout_seconds: Some(10),
				},
				store: StoreConfig {
					kind: StoreKind::Rest,
					url: Some("https://db.example.org".into()),
					headers: BTreeMap::from([("apikey".to_string(), "public-anon-key".to_string())]),
				},
				layers: vec![
					LayerDescriptor::new(
						"portos",
						"Portos",
						"/dados/Portos/Portos.geojson",
						"#2800b8ff",
						LayerCategory::Port
					),
					LayerDescriptor::new(
						"dutovias",
						"Dutovias",
						"/dados/Dutoviario/Dutovias.geojson",
						"#ff7f00",
						LayerCategory::Pipeline
					),
				],
			}
		);
	}

	#[test]
	fn parse_empty_config() {
		assert_eq!(Config::from_string("").unwrap(), Config::default());
		assert_eq!(Config::default().layers.len(), 4);
	}

	#[test]
	fn parse_invalid_config() {
		assert!(Config::from_string("server:\n  pi: 3.14.15.9").is_err());
		assert!(Config::from_string("store:\n  kind: sqlite").is_err());
	}

	#[test]
	fn duplicate_layer_ids_are_rejected() {
		let yaml = r##"
layers:
  - { id: portos, name: Portos, url: /a.geojson, color: "#000", category: port }
  - { id: portos, name: Portos 2, url: /b.geojson, color: "#fff", category: port }
"##;
		let err = Config::from_string(yaml).unwrap_err();
		assert_eq!(format!("{err:#}"), "checking layers: duplicate layer id 'portos'");
	}

	#[test]
	fn missing_file_names_the_path() {
		let err = Config::from_path(Path::new("../testdata/missing.yml")).unwrap_err();
		assert!(err.to_string().contains("missing.yml"));
	}
}

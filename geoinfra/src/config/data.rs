use serde::Deserialize;
use std::{
	path::{Path, PathBuf},
	time::Duration,
};

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Where layer files come from.
///
/// Layer urls such as `/dados/Portos/Portos.geojson` are resolved against `base`. Without a
/// `base`, they are read from `folder`, which is also served statically.
#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
	/// An `http(s)://` URL or a local folder. Defaults to `folder`.
	pub base: Option<String>,

	/// Local folder served at `/`, relative to the config file.
	pub folder: Option<PathBuf>,

	/// Timeout for fetching one layer file. Default: 30
	pub timeout_seconds: Option<u64>,
}

impl DataConfig {
	pub fn override_optional_base(&mut self, base: &Option<String>) {
		if base.is_some() {
			self.base = base.clone();
		}
	}

	pub fn override_optional_folder(&mut self, folder: &Option<PathBuf>) {
		if folder.is_some() {
			self.folder = folder.clone();
		}
	}

	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
	}

	/// The base layer urls are resolved against, if any is configured.
	pub fn layer_base(&self) -> Option<String> {
		self
			.base
			.clone()
			.or_else(|| self.folder.as_ref().map(|folder| folder.to_string_lossy().to_string()))
	}

	/// Makes relative local paths relative to `dir`.
	pub fn resolve_paths(&mut self, dir: &Path) {
		if let Some(folder) = &self.folder {
			self.folder = Some(dir.join(folder));
		}
		if let Some(base) = &self.base
			&& !is_remote(base)
		{
			self.base = Some(dir.join(base).to_string_lossy().to_string());
		}
	}
}

fn is_remote(base: &str) -> bool {
	base.starts_with("http://") || base.starts_with("https://")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn layer_base_falls_back_to_folder() {
		let mut config = DataConfig {
			folder: Some(PathBuf::from("site")),
			..Default::default()
		};
		assert_eq!(config.layer_base().as_deref(), Some("site"));

		config.override_optional_base(&Some("https://example.org/painel".into()));
		assert_eq!(config.layer_base().as_deref(), Some("https://example.org/painel"));
		assert_eq!(DataConfig::default().layer_base(), None);
	}

	#[test]
	fn timeout_defaults_to_thirty_seconds() {
		assert_eq!(DataConfig::default().timeout(), Duration::from_secs(30));
		let config = DataConfig {
			timeout_seconds: Some(5),
			..Default::default()
		};
		assert_eq!(config.timeout(), Duration::from_secs(5));
	}

	#[test]
	fn resolve_paths_keeps_remote_base() {
		let mut config = DataConfig {
			base: Some("https://example.org".into()),
			folder: Some(PathBuf::from("site")),
			timeout_seconds: None,
		};
		config.resolve_paths(Path::new("/etc/geoinfra"));
		assert_eq!(config.base.as_deref(), Some("https://example.org"));
		assert_eq!(config.folder, Some(PathBuf::from("/etc/geoinfra/site")));
	}

	#[test]
	fn resolve_paths_moves_local_base() {
		let mut config = DataConfig {
			base: Some("mirror".into()),
			..Default::default()
		};
		config.resolve_paths(Path::new("/srv"));
		assert_eq!(config.base.as_deref(), Some("/srv/mirror"));
	}
}

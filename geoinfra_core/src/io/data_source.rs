//! Data sources resolve a relative layer path (for example `/dados/Portos/Portos.geojson`)
//! against a base and hand out a [`DataReader`] for it.
//!
//! ```rust
//! use geoinfra_core::{Blob, io::{BlobDataSource, DataSourceTrait}};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let mut source = BlobDataSource::new();
//! source.insert("/dados/Portos/Portos.geojson", Blob::from("[]"));
//! let reader = source.get_reader("/dados/Portos/Portos.geojson")?;
//! assert_eq!(reader.read_all().await?.to_str()?, "[]");
//! # Ok(())
//! # }
//! ```

use super::{DataReader, DataReaderBlob, DataReaderFile, DataReaderHttp, build_client};
use crate::Blob;
use anyhow::{Context, Result, bail, ensure};
use reqwest::{Client, Url};
use std::{
	collections::HashMap,
	fmt::Debug,
	path::{Component, Path, PathBuf},
	sync::Arc,
	time::Duration,
};

/// Shared handle to a data source.
pub type DataSource = Arc<dyn DataSourceTrait>;

/// Resolves relative paths into readers.
pub trait DataSourceTrait: Debug + Send + Sync {
	/// Returns a reader for `path`, relative to the base of this source.
	fn get_reader(&self, path: &str) -> Result<DataReader>;

	/// Describes the base of this source, for logs.
	fn get_name(&self) -> &str;
}

/// Picks a data source for `base`: an `http(s)://` URL becomes an [`HttpDataSource`],
/// anything else is treated as a local folder.
pub fn get_data_source(base: &str, timeout: Option<Duration>) -> Result<DataSource> {
	let base = base.trim();
	if base.starts_with("http://") || base.starts_with("https://") {
		Ok(Arc::new(HttpDataSource::new(base, timeout)?))
	} else {
		Ok(Arc::new(FolderDataSource::new(Path::new(base))?))
	}
}

/// Joins `path` onto `base` with exactly one slash in between.
fn join_url(base: &str, path: &str) -> String {
	format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Reads layer files from an HTTP(S) server. All readers share one client.
#[derive(Debug)]
pub struct HttpDataSource {
	base: String,
	client: Client,
}

impl HttpDataSource {
	pub fn new(base: &str, timeout: Option<Duration>) -> Result<HttpDataSource> {
		let url = Url::parse(base).with_context(|| format!("parsing base URL '{base}'"))?;
		match url.scheme() {
			"http" | "https" => (),
			other => bail!("unsupported URL scheme '{other}' in base '{base}'"),
		}
		Ok(HttpDataSource {
			base: base.trim_end_matches('/').to_string(),
			client: build_client(timeout)?,
		})
	}
}

impl DataSourceTrait for HttpDataSource {
	fn get_reader(&self, path: &str) -> Result<DataReader> {
		let joined = join_url(&self.base, path);
		let url = Url::parse(&joined).with_context(|| format!("parsing URL '{joined}'"))?;
		Ok(DataReaderHttp::from_url_with_client(url, self.client.clone())?)
	}

	fn get_name(&self) -> &str {
		&self.base
	}
}

/// Reads layer files from a local folder. Paths may not leave the folder.
#[derive(Debug)]
pub struct FolderDataSource {
	root: PathBuf,
	name: String,
}

impl FolderDataSource {
	pub fn new(root: &Path) -> Result<FolderDataSource> {
		ensure!(root.is_dir(), "data folder {root:?} does not exist or is not a directory");
		Ok(FolderDataSource {
			root: root.to_path_buf(),
			name: root.to_string_lossy().to_string(),
		})
	}

	fn resolve(&self, path: &str) -> Result<PathBuf> {
		let relative = Path::new(path.trim_start_matches('/'));
		for component in relative.components() {
			match component {
				Component::Normal(_) | Component::CurDir => (),
				_ => bail!("path '{path}' must stay inside the data folder"),
			}
		}
		Ok(self.root.join(relative))
	}
}

impl DataSourceTrait for FolderDataSource {
	fn get_reader(&self, path: &str) -> Result<DataReader> {
		Ok(DataReaderFile::open(&self.resolve(path)?)?)
	}

	fn get_name(&self) -> &str {
		&self.name
	}
}

/// An in-memory table of bodies, keyed by path.
#[derive(Debug, Default)]
pub struct BlobDataSource {
	entries: HashMap<String, Blob>,
}

impl BlobDataSource {
	#[must_use]
	pub fn new() -> BlobDataSource {
		BlobDataSource::default()
	}

	pub fn insert(&mut self, path: &str, blob: Blob) {
		self.entries.insert(normalize_key(path), blob);
	}

	/// Builder-style variant of [`insert`](Self::insert).
	#[must_use]
	pub fn with(mut self, path: &str, content: &str) -> BlobDataSource {
		self.insert(path, Blob::from(content));
		self
	}
}

fn normalize_key(path: &str) -> String {
	format!("/{}", path.trim_start_matches('/'))
}

impl DataSourceTrait for BlobDataSource {
	fn get_reader(&self, path: &str) -> Result<DataReader> {
		let key = normalize_key(path);
		match self.entries.get(&key) {
			Some(blob) => Ok(DataReaderBlob::new(&key, blob.clone())),
			None => bail!("no entry for '{key}'"),
		}
	}

	fn get_name(&self) -> &str {
		"memory"
	}
}

//! Where asset and project records are kept.
//!
//! ```yaml
//! store:
//!   kind: rest
//!   url: https://db.example.org
//!   headers:
//!     apikey: public-anon-key
//!     Authorization: Bearer public-anon-key
//! ```

use anyhow::{Context, Result, ensure};
use geoinfra_records::store::{MemoryStore, RecordStore, RestStore};
use serde::Deserialize;
use std::{collections::BTreeMap, sync::Arc, time::Duration};

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
	/// Records live in the process and are lost on exit.
	#[default]
	Memory,
	/// A PostgREST-style table API.
	Rest,
}

#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
	#[serde(default)]
	pub kind: StoreKind,

	/// Base URL of the REST API. Required for `kind: rest`.
	pub url: Option<String>,

	/// Headers sent with every request, for example API keys.
	#[serde(default)]
	pub headers: BTreeMap<String, String>,
}

impl StoreConfig {
	pub fn open(&self, timeout: Duration) -> Result<RecordStore> {
		match self.kind {
			StoreKind::Memory => {
				ensure!(self.url.is_none(), "store.url is only used with kind 'rest'");
				log::info!("keeping records in memory");
				Ok(Arc::new(MemoryStore::new()))
			}
			StoreKind::Rest => {
				let url = self.url.as_deref().context("store kind 'rest' needs a url")?;
				log::info!("keeping records at {url}");
				Ok(Arc::new(RestStore::new(url, &self.headers, Some(timeout))?))
			}
		}
	}
}

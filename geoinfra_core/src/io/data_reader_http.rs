//! This module provides functionality for reading data from HTTP endpoints.
//!
//! Layer files are fetched with caching disabled: every request asks intermediaries and the
//! origin to revalidate. A non-success status is an error, and there are no automatic retries.
//!
//! # Examples
//!
//! ```rust,no_run
//! use geoinfra_core::io::{DataReaderHttp, DataReaderTrait};
//! use anyhow::Result;
//! use reqwest::Url;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let url = Url::parse("https://example.org/dados/Portos/Portos.geojson")?;
//!     let reader = DataReaderHttp::from_url(url, Some(Duration::from_secs(30)))?;
//!     let blob = reader.read_all().await?;
//!     println!("Read {} bytes", blob.len());
//!     Ok(())
//! }
//! ```

use super::DataReaderTrait;
use crate::Blob;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::{
	Client, Url,
	header::{CACHE_CONTROL, PRAGMA},
};
use std::time::Duration;

/// A struct that provides reading capabilities from an HTTP(S) endpoint.
#[derive(Debug)]
pub struct DataReaderHttp {
	client: Client,
	name: String,
	url: Url,
}

impl DataReaderHttp {
	/// Creates a `DataReaderHttp` with its own client.
	pub fn from_url(url: Url, timeout: Option<Duration>) -> Result<Box<DataReaderHttp>> {
		Self::from_url_with_client(url, build_client(timeout)?)
	}

	/// Creates a `DataReaderHttp` that shares an existing client (and its connection pool).
	pub fn from_url_with_client(url: Url, client: Client) -> Result<Box<DataReaderHttp>> {
		match url.scheme() {
			"http" | "https" => (),
			other => bail!("unsupported URL scheme '{other}' in '{url}', expected 'http' or 'https'"),
		}

		Ok(Box::new(DataReaderHttp {
			client,
			name: url.to_string(),
			url,
		}))
	}
}

/// Builds the HTTP client used for layer files. `timeout` bounds the whole request.
pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
	let mut builder = Client::builder().tcp_keepalive(Duration::from_secs(600));
	if let Some(timeout) = timeout {
		builder = builder.timeout(timeout);
	}
	builder.build().context("building HTTP client")
}

#[async_trait]
impl DataReaderTrait for DataReaderHttp {
	async fn read_all(&self) -> Result<Blob> {
		log::debug!("GET {}", self.url);

		let response = self
			.client
			.get(self.url.clone())
			.header(CACHE_CONTROL, "no-cache")
			.header(PRAGMA, "no-cache")
			.send()
			.await
			.with_context(|| format!("requesting '{}'", self.url))?;

		let status = response.status();
		if !status.is_success() {
			bail!("HTTP {} while fetching '{}'", status.as_u16(), self.url);
		}

		let bytes = response
			.bytes()
			.await
			.with_context(|| format!("reading body of '{}'", self.url))?;

		Ok(Blob::from(bytes.to_vec()))
	}

	fn get_name(&self) -> &str {
		&self.name
	}
}

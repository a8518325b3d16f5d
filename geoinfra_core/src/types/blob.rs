//! This module provides the [`Blob`] struct, a wrapper around [`Vec<u8>`] holding the raw body
//! of a layer source or an API payload.
//!
//! # Examples
//!
//! ```rust
//! use geoinfra_core::Blob;
//!
//! let blob = Blob::from("{\"type\":\"FeatureCollection\"}");
//! assert_eq!(blob.len(), 28);
//! assert_eq!(blob.to_str().unwrap(), "{\"type\":\"FeatureCollection\"}");
//! ```

use anyhow::{Context, Result};
use std::fmt::Debug;

/// A simple wrapper around [`Vec<u8>`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Blob(Vec<u8>);

impl Blob {
	/// Creates an empty `Blob`.
	#[must_use]
	pub fn new_empty() -> Blob {
		Blob(Vec::new())
	}

	/// Returns the bytes as a slice.
	#[must_use]
	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}

	/// Interprets the bytes as UTF-8 text.
	pub fn to_str(&self) -> Result<&str> {
		std::str::from_utf8(&self.0).context("blob is not valid UTF-8")
	}

	/// Consumes the blob and returns the inner vector.
	#[must_use]
	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<u8>> for Blob {
	fn from(value: Vec<u8>) -> Self {
		Blob(value)
	}
}

impl From<&[u8]> for Blob {
	fn from(value: &[u8]) -> Self {
		Blob(value.to_vec())
	}
}

impl From<&str> for Blob {
	fn from(value: &str) -> Self {
		Blob(value.as_bytes().to_vec())
	}
}

impl From<String> for Blob {
	fn from(value: String) -> Self {
		Blob(value.into_bytes())
	}
}

impl Debug for Blob {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Blob({})", self.0.len())
	}
}

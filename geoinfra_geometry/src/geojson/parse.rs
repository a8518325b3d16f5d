use super::{Normalized, normalize};
use anyhow::{Context, Result};
use serde_json::Value;

/// Parses GeoJSON text and normalizes it.
///
/// Fails only if the text is not valid JSON; any valid JSON gives a [`Normalized`].
pub fn parse_geojson(text: &str) -> Result<Normalized> {
	parse_geojson_bytes(text.as_bytes())
}

/// Like [`parse_geojson`], for raw bytes. A leading UTF-8 byte order mark is ignored.
pub fn parse_geojson_bytes(bytes: &[u8]) -> Result<Normalized> {
	let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
	let value: Value = serde_json::from_slice(bytes).context("parsing GeoJSON")?;
	Ok(normalize(value))
}

use super::{GeoBBox, GeoCenter};
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::fmt::Debug;

/// Center of Brazil (Brasília) at a national zoom level.
pub const DEFAULT_CENTER: GeoCenter = GeoCenter(-47.93, -15.78, 5);

/// The initial framing of a map: either a region to fit or a fixed center and zoom.
#[derive(Clone, Copy, PartialEq)]
pub enum Viewport {
	Bounds(GeoBBox),
	Center(GeoCenter),
}

impl Viewport {
	#[must_use]
	pub fn is_default(&self) -> bool {
		*self == Viewport::Center(DEFAULT_CENTER)
	}
}

impl Default for Viewport {
	fn default() -> Self {
		Viewport::Center(DEFAULT_CENTER)
	}
}

impl Debug for Viewport {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Viewport::Bounds(bbox) => write!(f, "Bounds({bbox:?})"),
			Viewport::Center(center) => write!(f, "Center({center:?})"),
		}
	}
}

impl Serialize for Viewport {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Viewport::Bounds(bbox) => {
				let mut map = serializer.serialize_map(Some(2))?;
				map.serialize_entry("type", "bounds")?;
				map.serialize_entry("bbox", bbox)?;
				map.end()
			}
			Viewport::Center(center) => {
				let mut map = serializer.serialize_map(Some(3))?;
				map.serialize_entry("type", "center")?;
				map.serialize_entry("center", &[center.0, center.1])?;
				map.serialize_entry("zoom", &center.2)?;
				map.end()
			}
		}
	}
}

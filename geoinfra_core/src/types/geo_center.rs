use anyhow::{Result, ensure};
use serde::{Serialize, Serializer, ser::SerializeStruct};
use std::fmt::Debug;

/// A center point in geographic space, represented by:
/// - `f64` longitude (range: [-180, 180])
/// - `f64` latitude (range: [-90, 90])
/// - `u8` zoom level (typical range: 0 to 30)
#[derive(Clone, Copy, PartialEq)]
pub struct GeoCenter(pub f64, pub f64, pub u8);

impl GeoCenter {
	/// Checks that longitude, latitude and zoom are within valid ranges.
	pub fn check(&self) -> Result<()> {
		ensure!(-180.0 <= self.0, "center[0] (longitude) must be >= -180");
		ensure!(-90.0 <= self.1, "center[1] (latitude) must be >= -90");
		ensure!(self.0 <= 180.0, "center[0] (longitude) must be <= 180");
		ensure!(self.1 <= 90.0, "center[1] (latitude) must be <= 90");
		ensure!(self.2 <= 30, "center[2] (zoom) must be <= 30");
		Ok(())
	}

	#[must_use]
	pub fn longitude(&self) -> f64 {
		self.0
	}

	#[must_use]
	pub fn latitude(&self) -> f64 {
		self.1
	}

	#[must_use]
	pub fn zoom(&self) -> u8 {
		self.2
	}
}

impl Debug for GeoCenter {
	/// Formats the `GeoCenter` as `"longitude, latitude (zoom)"`.
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}, {} ({})", self.0, self.1, self.2)
	}
}

impl TryFrom<Vec<f64>> for GeoCenter {
	type Error = anyhow::Error;

	/// Builds a `GeoCenter` from `[longitude, latitude, zoom]`.
	fn try_from(input: Vec<f64>) -> Result<Self> {
		ensure!(
			input.len() == 3,
			"center must have 3 elements: [longitude, latitude, zoom]"
		);
		ensure!(
			(0.0..=30.0).contains(&input[2]),
			"center[2] (zoom) must be between 0 and 30"
		);
		let center = GeoCenter(input[0], input[1], input[2] as u8);
		center.check()?;
		Ok(center)
	}
}

impl Serialize for GeoCenter {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut state = serializer.serialize_struct("GeoCenter", 2)?;
		state.serialize_field("center", &[self.0, self.1])?;
		state.serialize_field("zoom", &self.2)?;
		state.end()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn check_ranges() {
		assert!(GeoCenter(-47.93, -15.78, 5).check().is_ok());
		assert!(GeoCenter(-181.0, 0.0, 5).check().is_err());
		assert!(GeoCenter(0.0, 91.0, 5).check().is_err());
		assert!(GeoCenter(0.0, 0.0, 31).check().is_err());
	}

	#[test]
	fn try_from_vec() {
		let center = GeoCenter::try_from(vec![-47.93, -15.78, 5.0]).unwrap();
		assert_eq!(center, GeoCenter(-47.93, -15.78, 5));
		assert!(GeoCenter::try_from(vec![1.0, 2.0]).is_err());
		assert!(GeoCenter::try_from(vec![1.0, 2.0, -1.0]).is_err());
	}

	#[test]
	fn debug_and_serialize() {
		let center = GeoCenter(-47.93, -15.78, 5);
		assert_eq!(format!("{center:?}"), "-47.93, -15.78 (5)");
		assert_eq!(
			serde_json::to_string(&center).unwrap(),
			r#"{"center":[-47.93,-15.78],"zoom":5}"#
		);
	}
}

use anyhow::{Result, ensure};
use serde::{Serialize, Serializer};
use std::fmt::Debug;

static MAX_LNG: f64 = 180.0;
static MAX_LAT: f64 = 90.0;

/// A geographical bounding box (`GeoBBox`) represents a rectangular area on a map
/// defined by its minimum and maximum longitude (x) and latitude (y) coordinates.
///
/// The bounding box is defined by four `f64` values:
/// - `x_min` (west): Minimum longitude.
/// - `y_min` (south): Minimum latitude.
/// - `x_max` (east): Maximum longitude.
/// - `y_max` (north): Maximum latitude.
///
/// # Examples
///
/// ## Expanding a bounding box
/// ```
/// use geoinfra_core::GeoBBox;
///
/// let mut bbox1 = GeoBBox::new(-50.0, -20.0, -40.0, -10.0).unwrap();
/// let bbox2 = GeoBBox::new(-52.0, -18.0, -42.0, -9.0).unwrap();
/// bbox1.extend(&bbox2);
/// assert_eq!(bbox1.as_tuple(), (-52.0, -20.0, -40.0, -9.0));
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct GeoBBox {
	pub x_min: f64,
	pub y_min: f64,
	pub x_max: f64,
	pub y_max: f64,
}

impl GeoBBox {
	/// Creates a new `GeoBBox` from `west, south, east, north`.
	///
	/// Fails if a value is not finite, lies outside the WGS84 range, or if min > max.
	pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<GeoBBox> {
		GeoBBox {
			x_min,
			y_min,
			x_max,
			y_max,
		}
		.checked()
	}

	/// Creates a degenerate bounding box covering a single position.
	pub fn from_point(x: f64, y: f64) -> Result<GeoBBox> {
		GeoBBox::new(x, y, x, y)
	}

	/// Returns the bounding box as `[west, south, east, north]`.
	#[must_use]
	pub fn as_array(&self) -> [f64; 4] {
		[self.x_min, self.y_min, self.x_max, self.y_max]
	}

	/// Returns the bounding box as a tuple `(x_min, y_min, x_max, y_max)`.
	#[must_use]
	pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
		(self.x_min, self.y_min, self.x_max, self.y_max)
	}

	#[must_use]
	pub fn width(&self) -> f64 {
		self.x_max - self.x_min
	}

	#[must_use]
	pub fn height(&self) -> f64 {
		self.y_max - self.y_min
	}

	/// Returns the midpoint `(x, y)` of the bounding box.
	#[must_use]
	pub fn center(&self) -> (f64, f64) {
		(f64::midpoint(self.x_min, self.x_max), f64::midpoint(self.y_min, self.y_max))
	}

	/// Expands the current bounding box in place so that it includes the area
	/// covered by `other`.
	pub fn extend(&mut self, other: &GeoBBox) {
		self.x_min = self.x_min.min(other.x_min);
		self.y_min = self.y_min.min(other.y_min);
		self.x_max = self.x_max.max(other.x_max);
		self.y_max = self.y_max.max(other.y_max);
	}

	/// Non-mutating version of [`extend`](Self::extend).
	#[must_use]
	pub fn extended(mut self, other: &GeoBBox) -> GeoBBox {
		self.extend(other);
		self
	}

	/// Grows every side by `ratio` times the width (west/east) or height (south/north)
	/// and clamps the result to the WGS84 range.
	///
	/// ```
	/// use geoinfra_core::GeoBBox;
	///
	/// let bbox = GeoBBox::new(-50.0, -20.0, -40.0, -10.0).unwrap().pad(0.1);
	/// assert_eq!(bbox.as_tuple(), (-51.0, -21.0, -39.0, -9.0));
	/// ```
	#[must_use]
	pub fn pad(&self, ratio: f64) -> GeoBBox {
		let dx = self.width().abs() * ratio;
		let dy = self.height().abs() * ratio;
		GeoBBox {
			x_min: (self.x_min - dx).max(-MAX_LNG),
			y_min: (self.y_min - dy).max(-MAX_LAT),
			x_max: (self.x_max + dx).min(MAX_LNG),
			y_max: (self.y_max + dy).min(MAX_LAT),
		}
	}

	fn checked(self) -> Result<Self> {
		ensure!(
			self.as_array().iter().all(|v| v.is_finite()),
			"bounding box values must be finite: {self:?}"
		);
		ensure!(self.x_min >= -MAX_LNG, "x_min ({}) must be >= -180", self.x_min);
		ensure!(self.y_min >= -MAX_LAT, "y_min ({}) must be >= -90", self.y_min);
		ensure!(self.x_max <= MAX_LNG, "x_max ({}) must be <= 180", self.x_max);
		ensure!(self.y_max <= MAX_LAT, "y_max ({}) must be <= 90", self.y_max);
		ensure!(
			self.x_min <= self.x_max,
			"x_min ({}) must be <= x_max ({})",
			self.x_min,
			self.x_max
		);
		ensure!(
			self.y_min <= self.y_max,
			"y_min ({}) must be <= y_max ({})",
			self.y_min,
			self.y_max
		);
		Ok(self)
	}
}

impl Debug for GeoBBox {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"GeoBBox({}, {}, {}, {})",
			self.x_min, self.y_min, self.x_max, self.y_max
		)
	}
}

impl TryFrom<[f64; 4]> for GeoBBox {
	type Error = anyhow::Error;

	fn try_from(input: [f64; 4]) -> Result<Self> {
		GeoBBox::new(input[0], input[1], input[2], input[3])
	}
}

impl Serialize for GeoBBox {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.as_array().serialize(serializer)
	}
}

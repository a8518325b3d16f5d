use anyhow::{Context, Result, anyhow, bail, ensure};
use geoinfra_core::GeoBBox;
use serde_json::Value;

/// A position as `[longitude, latitude]`. Additional ordinates (altitude) are dropped.
pub type Coordinates = [f64; 2];

/// A strictly parsed GeoJSON geometry, used for measuring extents.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
	Point(Coordinates),
	MultiPoint(Vec<Coordinates>),
	LineString(Vec<Coordinates>),
	MultiLineString(Vec<Vec<Coordinates>>),
	Polygon(Vec<Vec<Coordinates>>),
	MultiPolygon(Vec<Vec<Vec<Coordinates>>>),
}

impl Geometry {
	/// Parses a GeoJSON geometry object.
	///
	/// Fails on unknown types and on coordinates that are not nested arrays of numbers.
	pub fn from_json(value: &Value) -> Result<Geometry> {
		let geometry_type = value
			.get("type")
			.and_then(Value::as_str)
			.ok_or_else(|| anyhow!("geometry has no type"))?;
		let coordinates = value
			.get("coordinates")
			.ok_or_else(|| anyhow!("{geometry_type} has no coordinates"))?;

		let geometry = match geometry_type {
			"Point" => Geometry::Point(parse_position(coordinates)?),
			"MultiPoint" => Geometry::MultiPoint(parse_list(coordinates, parse_position)?),
			"LineString" => Geometry::LineString(parse_list(coordinates, parse_position)?),
			"MultiLineString" => Geometry::MultiLineString(parse_list(coordinates, |v| parse_list(v, parse_position))?),
			"Polygon" => Geometry::Polygon(parse_list(coordinates, |v| parse_list(v, parse_position))?),
			"MultiPolygon" => Geometry::MultiPolygon(parse_list(coordinates, |v| {
				parse_list(v, |v| parse_list(v, parse_position))
			})?),
			other => bail!("unknown geometry type '{other}'"),
		};
		Ok(geometry)
	}

	pub fn get_type_name(&self) -> &'static str {
		match self {
			Geometry::Point(_) => "Point",
			Geometry::MultiPoint(_) => "MultiPoint",
			Geometry::LineString(_) => "LineString",
			Geometry::MultiLineString(_) => "MultiLineString",
			Geometry::Polygon(_) => "Polygon",
			Geometry::MultiPolygon(_) => "MultiPolygon",
		}
	}

	/// All positions of the geometry, flattened.
	pub fn positions(&self) -> Vec<Coordinates> {
		match self {
			Geometry::Point(p) => vec![*p],
			Geometry::MultiPoint(v) | Geometry::LineString(v) => v.clone(),
			Geometry::MultiLineString(v) | Geometry::Polygon(v) => v.iter().flatten().copied().collect(),
			Geometry::MultiPolygon(v) => v.iter().flatten().flatten().copied().collect(),
		}
	}

	/// Computes the bounding box of all positions.
	///
	/// Returns `Ok(None)` for a geometry without positions and an error if a position lies
	/// outside the WGS84 range.
	pub fn compute_bounds(&self) -> Result<Option<GeoBBox>> {
		let mut bbox: Option<GeoBBox> = None;
		for [x, y] in self.positions() {
			let point = GeoBBox::from_point(x, y).context("measuring geometry")?;
			match bbox.as_mut() {
				Some(b) => b.extend(&point),
				None => bbox = Some(point),
			}
		}
		Ok(bbox)
	}
}

fn parse_position(value: &Value) -> Result<Coordinates> {
	let array = value.as_array().ok_or_else(|| anyhow!("position must be an array"))?;
	ensure!(array.len() >= 2, "position must have at least two values");
	let x = array[0].as_f64().ok_or_else(|| anyhow!("longitude must be a number"))?;
	let y = array[1].as_f64().ok_or_else(|| anyhow!("latitude must be a number"))?;
	Ok([x, y])
}

fn parse_list<T>(value: &Value, parse: impl Fn(&Value) -> Result<T>) -> Result<Vec<T>> {
	value
		.as_array()
		.ok_or_else(|| anyhow!("coordinates must be an array"))?
		.iter()
		.map(parse)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(json!({"type": "Point", "coordinates": [1, 2]}), "Point", 1)]
	#[case(json!({"type": "Point", "coordinates": [1, 2, 300]}), "Point", 1)]
	#[case(json!({"type": "MultiPoint", "coordinates": [[1, 2], [3, 4]]}), "MultiPoint", 2)]
	#[case(json!({"type": "LineString", "coordinates": [[1, 2], [3, 4]]}), "LineString", 2)]
	#[case(json!({"type": "MultiLineString", "coordinates": [[[1, 2], [3, 4]], [[5, 6]]]}), "MultiLineString", 3)]
	#[case(json!({"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}), "Polygon", 4)]
	#[case(json!({"type": "MultiPolygon", "coordinates": [[[[0, 0], [1, 0], [0, 1], [0, 0]]]]}), "MultiPolygon", 4)]
	fn parses_known_types(#[case] value: Value, #[case] name: &str, #[case] count: usize) {
		let geometry = Geometry::from_json(&value).unwrap();
		assert_eq!(geometry.get_type_name(), name);
		assert_eq!(geometry.positions().len(), count);
	}

	#[rstest]
	#[case(json!({"type": "Circle", "coordinates": [1, 2]}))]
	#[case(json!({"coordinates": [1, 2]}))]
	#[case(json!({"type": "Point"}))]
	#[case(json!({"type": "Point", "coordinates": [1]}))]
	#[case(json!({"type": "Point", "coordinates": ["1", 2]}))]
	#[case(json!({"type": "LineString", "coordinates": [[1, 2], 3]}))]
	fn rejects_malformed(#[case] value: Value) {
		assert!(Geometry::from_json(&value).is_err());
	}

	#[test]
	fn bounds_of_polygon() -> Result<()> {
		let geometry = Geometry::from_json(&json!({
			"type": "Polygon",
			"coordinates": [[[-50, -20], [-40, -20], [-40, -10], [-50, -20]]]
		}))?;
		assert_eq!(geometry.compute_bounds()?.unwrap().as_tuple(), (-50.0, -20.0, -40.0, -10.0));
		Ok(())
	}

	#[test]
	fn bounds_of_empty_and_invalid() -> Result<()> {
		let empty = Geometry::from_json(&json!({"type": "LineString", "coordinates": []}))?;
		assert_eq!(empty.compute_bounds()?, None);

		let invalid = Geometry::from_json(&json!({"type": "Point", "coordinates": [0, 95]}))?;
		assert!(invalid.compute_bounds().is_err());
		Ok(())
	}
}

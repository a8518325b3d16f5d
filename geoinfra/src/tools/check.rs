use anyhow::{Context, Result, bail};
use geoinfra_core::io::{DataReaderFile, DataReaderTrait};
use geoinfra_geometry::{GeoCollection, Normalized, parse_geojson_bytes, remove_empty_geometries};
use std::{collections::BTreeMap, path::PathBuf};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// GeoJSON file to check
	#[arg(value_name = "FILE")]
	pub file: PathBuf,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	let file = &arguments.file;
	let blob = DataReaderFile::open(file)?.read_all().await?;

	let mut collection = match parse_geojson_bytes(blob.as_slice()).with_context(|| format!("checking {file:?}"))? {
		Normalized::Recognized(collection) => collection,
		Normalized::Unrecognized(description) => bail!("{file:?} holds no features: found {description}"),
	};

	let total = collection.len();
	let dropped = remove_empty_geometries(&mut collection);
	print!("{}", report(total, dropped, &collection));
	Ok(())
}

fn report(total: usize, dropped: usize, collection: &GeoCollection) -> String {
	let mut types: BTreeMap<&str, usize> = BTreeMap::new();
	for feature in collection.iter() {
		*types.entry(feature.geometry_type().unwrap_or("unknown")).or_default() += 1;
	}

	let mut text = format!("features: {total}\ndropped:  {dropped}\n");
	for (name, count) in types {
		text.push_str(&format!("  {name}: {count}\n"));
	}
	match collection.bounds() {
		Some(bbox) => text.push_str(&format!("bounds:   {:?}\n", bbox.as_array())),
		None => text.push_str("bounds:   none\n"),
	}
	text
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tests::run_command;
	use geoinfra_geometry::parse_geojson;
	use pretty_assertions::assert_eq;

	#[test]
	fn report_counts_types_and_bounds() {
		let mut collection = parse_geojson(
			r#"[{"type":"Feature","geometry":{"type":"Point","coordinates":[-40,-20]}},
			    {"type":"Feature","geometry":{"type":"LineString","coordinates":[[-41,-21],[-42,-19]]}},
			    {"type":"Feature","geometry":{"type":"LineString","coordinates":[]}}]"#,
		)
		.unwrap()
		.into_collection();
		let dropped = remove_empty_geometries(&mut collection);
		assert_eq!(
			report(3, dropped, &collection),
			"features: 3\ndropped:  1\n  LineString: 1\n  Point: 1\nbounds:   [-42.0, -21.0, -40.0, -19.0]\n"
		);
	}

	#[test]
	fn check_fixture() -> Result<()> {
		run_command(vec!["geoinfra", "check", "../testdata/site/dados/Portos/Portos.geojson"])?;
		Ok(())
	}

	#[test]
	fn check_rejects_unrecognized_json() {
		let err = run_command(vec!["geoinfra", "check", "../testdata/not_features.json"]).unwrap_err();
		assert!(err.to_string().ends_with("holds no features: found object with type 'Topology'"));
	}
}

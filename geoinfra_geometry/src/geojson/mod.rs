//! Reading GeoJSON into [`crate::GeoCollection`]s.
//!
//! Parsing goes in three steps: [`parse_geojson`] decodes the text, [`normalize`] accepts the
//! shapes layer files come in (collection, single feature, bare array of features), and
//! [`remove_empty_geometries`] drops features that can't be drawn.

mod normalize;
mod parse;
mod validate;

pub use normalize::*;
pub use parse::*;
pub use validate::*;

//! GeoJSON features and collections for infrastructure layers: validation of geometries,
//! normalization of loosely shaped inputs, bounding boxes, and popup formatting.

mod geo;
pub mod geojson;
pub mod popup;

pub use geo::*;
pub use geojson::*;

mod blob;
mod geo_bbox;
mod geo_center;
mod viewport;

pub use blob::*;
pub use geo_bbox::*;
pub use geo_center::*;
pub use viewport::*;

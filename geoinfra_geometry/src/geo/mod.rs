#![allow(clippy::module_inception)]

mod collection;
mod feature;
mod geometry;
mod properties;

pub use collection::*;
pub use feature::*;
pub use geometry::*;
pub use properties::*;

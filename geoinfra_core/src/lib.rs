//! Shared building blocks of geoinfra: byte blobs, geographic bounding boxes and view centers,
//! and data readers for layer sources on the web or on the local filesystem.

pub mod io;

pub mod types;
pub use types::*;

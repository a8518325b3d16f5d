//! Data readers and data sources for layer files.
//!
//! A [`DataSourceTrait`] resolves a path relative to its base (an `http(s)://` URL, a local folder,
//! or an in-memory table) into a [`DataReader`], which reads the whole body as a [`Blob`](crate::Blob).

mod data_reader;
mod data_reader_blob;
mod data_reader_file;
mod data_reader_http;
mod data_source;

pub use data_reader::*;
pub use data_reader_blob::*;
pub use data_reader_file::*;
pub use data_reader_http::*;
pub use data_source::*;

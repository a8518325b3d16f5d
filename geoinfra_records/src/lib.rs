//! Validated create, edit and read operations for infrastructure assets and projects.
//!
//! Input arrives as loosely typed JSON from forms. It is validated into typed records,
//! normalized into the column types of the table store, and written through a
//! [`store::RecordStoreTrait`]. Validation problems and store errors are returned as data.

pub mod asset;
pub mod filter;
mod form;
pub mod issues;
pub mod parse;
pub mod project;
pub mod service;
pub mod store;

pub use asset::*;
pub use filter::*;
pub use issues::*;
pub use project::*;
pub use service::*;

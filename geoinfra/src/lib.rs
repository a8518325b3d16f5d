//! Server and configuration of the geoinfra dashboard backend.
//!
//! The binary's `serve` command builds a [`server::MapServer`] from a [`Config`]; the library
//! exposes both so the server can be embedded or tested without the CLI.

pub mod config;
pub mod server;

pub use config::Config;

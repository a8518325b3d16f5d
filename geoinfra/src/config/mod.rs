//! Configuration of the geoinfra server.
//!
//! A single YAML file (`config.yml`) with these sections, all optional:
//! - [`ServerConfig`]: address to listen on
//! - [`CorsConfig`]: which browser origins may call the API
//! - [`DataConfig`]: where the layer files come from and which folder is served statically
//! - [`StoreConfig`]: where asset and project records are persisted
//! - `layers`: the map layers, defaulting to railways, federal highways, ports and airports

mod cors;
mod data;
mod main;
mod server;
mod store;

pub use cors::CorsConfig;
pub use data::DataConfig;
pub use main::Config;
pub use server::ServerConfig;
pub use store::{StoreConfig, StoreKind};

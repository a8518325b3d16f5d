//! HTTP server: record API, map layers and static files.

mod cors;
mod handlers;
mod map_server;
mod routes;

pub use handlers::AppState;
pub use map_server::MapServer;
pub use routes::build_router;

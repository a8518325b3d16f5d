//! Infrastructure map layers: what to load, how to load it concurrently and cancellably,
//! and how to frame the result.

pub mod bounds;
pub mod descriptor;
pub mod events;
pub mod loaded;
pub mod loader;
pub mod state;
pub mod view;

pub use bounds::*;
pub use descriptor::*;
pub use events::*;
pub use loaded::*;
pub use loader::*;
pub use state::*;
pub use view::*;

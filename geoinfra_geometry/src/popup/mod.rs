//! Popup and tooltip markup for map features.
//!
//! Each layer category has one [`PopupTemplate`]; the map renderer shows the markup
//! when a feature is clicked and the tooltip on hover.

mod categories;
mod escape;
mod template;

pub use categories::*;
pub use escape::*;
pub use template::*;

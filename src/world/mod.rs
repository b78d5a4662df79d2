//! The endless layer column: layer entities and their manager.

pub mod layer;
pub mod manager;

pub use layer::{Fragment, Layer};
pub use manager::LayerColumn;

mod edge;
mod image_id;
pub mod sprites;
pub mod tables;

pub use edge::{rotate_offset, Edge};
pub use image_id::*;
pub use tables::{CornerHeights, TerrainSmoothing, TunnelShape};

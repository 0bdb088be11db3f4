mod element;
mod park_map;
mod query;

pub use element::*;
pub use park_map::{ParkMap, ParkMapError};
pub use query::MapQuery;

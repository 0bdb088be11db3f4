mod descriptor;
mod fences;
mod overlays;
mod paint;
mod smoothing;
mod supports;
mod vertical;

pub use descriptor::{build_descriptors, EdgeCorners, TileDescriptor, ABSENT_NEIGHBOUR_HEIGHT};
pub use fences::{paint_park_fences, rotated_fence_mask};
pub use overlays::{
    ConstructionHighlight, MapSelection, OverlayState, PatrolArea, PatrolHighlight, PeepSpawn,
    SelectionKind, MAX_PEEP_SPAWNS,
};
pub use paint::paint_surface_tile;
pub use smoothing::{resolve_edge_blend, EdgeBlend};
pub use supports::publish_surface_supports;

pub mod config;
pub mod geometry;
pub mod map;
pub mod ride;
pub mod session;
pub mod surface;

pub use config::{DisplayConfig, DisplayConfigError, ScreenMode, ViewFlags, MAX_ZOOM};
pub use geometry::{Edge, ImageId};
pub use map::{
    MapQuery, ParkMap, ParkMapError, SurfaceElement, TileCoord, TileElement, TrackElement,
};
pub use ride::{
    paint_ride_track_tile, rotate_sequence_index, RideLookup, RidePaintEntry, RidePaintRegistry,
    RideState, RideType, VehicleState,
};
pub use session::{
    digest_paint_list, AttachedImage, BoundBox, InteractionKind, PaintContext, PaintList,
    PaintPrimitive, PaintSink, Segment, SegmentSet, SupportHeights, TunnelRun, TunnelRunError,
    TunnelRuns,
};
pub use surface::{paint_surface_tile, OverlayState};
